//! # cinelog-server
//!
//! HTTP server for the Cinelog review publishing tool.
//!
//! This binary provides:
//! - **REST API** (axum) for listing, publishing, editing and deleting film
//!   reviews
//! - **JSON-document persistence**: the whole collection lives in one file
//!   on disk, rewritten on every mutation
//! - **Static asset serving** for the prebuilt browser client, with the
//!   entry document as the fallback for unmatched routes

mod api;
mod config;
mod error;

use std::sync::Arc;

use tracing::info;
use tracing_subscriber::EnvFilter;

use cinelog_store::ReviewStore;

use crate::api::AppState;
use crate::config::ServerConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // -----------------------------------------------------------------------
    // 1. Initialize tracing (respects RUST_LOG env var)
    // -----------------------------------------------------------------------
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,cinelog_server=debug")),
        )
        .init();

    info!("Starting Cinelog server v{}", env!("CARGO_PKG_VERSION"));

    // -----------------------------------------------------------------------
    // 2. Load configuration
    // -----------------------------------------------------------------------
    let config = ServerConfig::from_env();
    info!(?config, "Loaded configuration");

    // -----------------------------------------------------------------------
    // 3. Initialize the review store (creates the data directory if missing)
    // -----------------------------------------------------------------------
    let store = Arc::new(ReviewStore::open(config.data_path.clone()).await?);

    let app_state = AppState { store };

    // -----------------------------------------------------------------------
    // 4. Run the HTTP server (blocks until shutdown)
    // -----------------------------------------------------------------------
    tokio::select! {
        result = api::serve(app_state, &config) => {
            if let Err(e) = result {
                tracing::error!(error = %e, "HTTP server failed");
                return Err(e);
            }
        }
        _ = tokio::signal::ctrl_c() => {
            info!("Received Ctrl+C, shutting down");
        }
    }

    Ok(())
}
