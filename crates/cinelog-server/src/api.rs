use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::{Method, StatusCode},
    routing::{get, put},
    Json, Router,
};
use serde::Serialize;
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::{ServeDir, ServeFile};
use tower_http::trace::TraceLayer;
use tracing::info;
use uuid::Uuid;

use cinelog_shared::{Review, ReviewDraft};
use cinelog_store::ReviewStore;

use crate::config::ServerConfig;
use crate::error::ApiError;

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<ReviewStore>,
}

pub fn build_router(state: AppState, config: &ServerConfig) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers(Any);

    // Unmatched routes serve the prebuilt client; unknown paths fall back to
    // the entry document so client-side routing keeps working.
    let index = config.static_dir.join("index.html");
    let assets = ServeDir::new(&config.static_dir).fallback(ServeFile::new(index));

    Router::new()
        .route("/api/health", get(health_check))
        .route("/api/reviews", get(list_reviews).post(create_review))
        .route("/api/reviews/:id", put(update_review).delete(delete_review))
        .fallback_service(assets)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    version: &'static str,
}

async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    })
}

async fn list_reviews(State(state): State<AppState>) -> Result<Json<Vec<Review>>, ApiError> {
    let reviews = state.store.list_all().await?;
    Ok(Json(reviews))
}

/// Bodies are taken as raw JSON and normalized, so duck-typed payloads (a
/// comma-string or an array for `tags`, a numeric string for `rating`) reach
/// the validation gate instead of a strict-deserialization rejection.
async fn create_review(
    State(state): State<AppState>,
    Json(payload): Json<serde_json::Value>,
) -> Result<(StatusCode, Json<Review>), ApiError> {
    let draft = ReviewDraft::from_json(&payload);
    let review = state.store.create(draft).await?;

    info!(id = %review.id, film = %review.film, "Review published");

    Ok((StatusCode::CREATED, Json(review)))
}

async fn update_review(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<serde_json::Value>,
) -> Result<Json<Review>, ApiError> {
    let draft = ReviewDraft::from_json(&payload);
    let review = state.store.update(id, draft).await?;

    info!(id = %id, "Review updated");

    Ok(Json(review))
}

async fn delete_review(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    state.store.delete(id).await?;

    info!(id = %id, "Review deleted");

    Ok(StatusCode::NO_CONTENT)
}

pub async fn serve(state: AppState, config: &ServerConfig) -> anyhow::Result<()> {
    let app = build_router(state, config);

    info!(addr = %config.http_addr, "Starting HTTP API server");

    let listener = tokio::net::TcpListener::bind(config.http_addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::Request;
    use serde_json::{json, Value};
    use tempfile::TempDir;
    use tower::ServiceExt;

    async fn test_app() -> (Router, TempDir) {
        let dir = TempDir::new().unwrap();
        let store = ReviewStore::open(dir.path().join("reviews.json"))
            .await
            .unwrap();

        let config = ServerConfig {
            data_path: dir.path().join("reviews.json"),
            static_dir: dir.path().join("client"),
            ..ServerConfig::default()
        };

        let app = build_router(
            AppState {
                store: Arc::new(store),
            },
            &config,
        );
        (app, dir)
    }

    fn json_request(method: &str, uri: &str, payload: &Value) -> Request<Body> {
        Request::builder()
            .method(method)
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(serde_json::to_vec(payload).unwrap()))
            .unwrap()
    }

    fn empty_request(method: &str, uri: &str) -> Request<Body> {
        Request::builder()
            .method(method)
            .uri(uri)
            .body(Body::empty())
            .unwrap()
    }

    async fn body_json(response: axum::response::Response) -> Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    fn review_payload(film: &str) -> Value {
        json!({
            "title": format!("On {film}"),
            "film": film,
            "director": "Someone",
            "rating": 8.9,
            "watchDate": "2024-03-15",
            "tags": "drama, crime",
            "excerpt": "In brief.",
            "body": "At length."
        })
    }

    #[tokio::test]
    async fn health_reports_ok() {
        let (app, _dir) = test_app().await;

        let response = app.oneshot(empty_request("GET", "/api/health")).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body = body_json(response).await;
        assert_eq!(body["status"], "ok");
    }

    #[tokio::test]
    async fn create_then_list() {
        let (app, _dir) = test_app().await;

        let response = app
            .clone()
            .oneshot(json_request("POST", "/api/reviews", &review_payload("Drive")))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);

        let created = body_json(response).await;
        assert!(created["id"].is_string());
        assert!(created["createdAt"].is_string());
        assert_eq!(created["tags"], json!(["drama", "crime"]));

        let response = app.oneshot(empty_request("GET", "/api/reviews")).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let listed = body_json(response).await;
        assert_eq!(listed.as_array().unwrap().len(), 1);
        assert_eq!(listed[0]["film"], "Drive");
    }

    #[tokio::test]
    async fn invalid_payload_is_rejected_and_not_persisted() {
        let (app, _dir) = test_app().await;

        let mut payload = review_payload("Drive");
        payload["rating"] = json!(11);

        let response = app
            .clone()
            .oneshot(json_request("POST", "/api/reviews", &payload))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let body = body_json(response).await;
        assert_eq!(body["message"], "Invalid review payload.");

        let response = app.oneshot(empty_request("GET", "/api/reviews")).await.unwrap();
        assert!(body_json(response).await.as_array().unwrap().is_empty());
    }

    #[tokio::test]
    async fn update_preserves_id_and_created_at() {
        let (app, _dir) = test_app().await;

        let response = app
            .clone()
            .oneshot(json_request("POST", "/api/reviews", &review_payload("Drive")))
            .await
            .unwrap();
        let created = body_json(response).await;
        let id = created["id"].as_str().unwrap().to_string();

        let response = app
            .clone()
            .oneshot(json_request(
                "PUT",
                &format!("/api/reviews/{id}"),
                &review_payload("Heat"),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let updated = body_json(response).await;
        assert_eq!(updated["film"], "Heat");
        assert_eq!(updated["id"], created["id"]);
        assert_eq!(updated["createdAt"], created["createdAt"]);
    }

    #[tokio::test]
    async fn update_unknown_id_is_404() {
        let (app, _dir) = test_app().await;

        let response = app
            .oneshot(json_request(
                "PUT",
                &format!("/api/reviews/{}", Uuid::new_v4()),
                &review_payload("Drive"),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let body = body_json(response).await;
        assert_eq!(body["message"], "Review not found.");
    }

    #[tokio::test]
    async fn delete_returns_204_then_404() {
        let (app, _dir) = test_app().await;

        let response = app
            .clone()
            .oneshot(json_request("POST", "/api/reviews", &review_payload("Drive")))
            .await
            .unwrap();
        let id = body_json(response).await["id"].as_str().unwrap().to_string();

        let response = app
            .clone()
            .oneshot(empty_request("DELETE", &format!("/api/reviews/{id}")))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NO_CONTENT);

        let response = app
            .oneshot(empty_request("DELETE", &format!("/api/reviews/{id}")))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
