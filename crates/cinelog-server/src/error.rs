use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use thiserror::Error;
use uuid::Uuid;

use cinelog_shared::ValidationError;
use cinelog_store::StoreError;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Invalid review payload: {0}")]
    InvalidPayload(#[from] ValidationError),

    #[error("Review not found: {0}")]
    NotFound(Uuid),

    #[error("Storage error: {0}")]
    Storage(String),
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::Invalid(e) => ApiError::InvalidPayload(e),
            StoreError::NotFound(id) => ApiError::NotFound(id),
            other => ApiError::Storage(other.to_string()),
        }
    }
}

/// JSON error body: a human message plus an optional detail string.
#[derive(Serialize)]
struct ErrorBody {
    message: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    detail: Option<String>,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message, detail) = match self {
            ApiError::InvalidPayload(e) => (
                StatusCode::BAD_REQUEST,
                "Invalid review payload.",
                Some(e.to_string()),
            ),
            ApiError::NotFound(_) => (StatusCode::NOT_FOUND, "Review not found.", None),
            ApiError::Storage(detail) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Server error.",
                Some(detail),
            ),
        };

        let body = ErrorBody { message, detail };
        (status, axum::Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn store_errors_map_to_api_errors() {
        let id = Uuid::new_v4();
        assert!(matches!(
            ApiError::from(StoreError::NotFound(id)),
            ApiError::NotFound(got) if got == id
        ));
        assert!(matches!(
            ApiError::from(StoreError::Invalid(ValidationError::RatingNotANumber)),
            ApiError::InvalidPayload(_)
        ));
        assert!(matches!(
            ApiError::from(StoreError::Io(std::io::Error::other("disk"))),
            ApiError::Storage(_)
        ));
    }

    #[test]
    fn error_body_omits_absent_detail() {
        let body = ErrorBody {
            message: "Review not found.",
            detail: None,
        };
        assert_eq!(
            serde_json::to_string(&body).unwrap(),
            r#"{"message":"Review not found."}"#
        );
    }
}
