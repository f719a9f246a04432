//! Keep-alive HTTP endpoint with Axum

use axum::{routing::get, Router};

/// Create the keep-alive router
pub fn create_router() -> Router {
    Router::new()
        .route("/", get(alive))
        .route("/health", get(health_check))
}

async fn alive() -> &'static str {
    "rollkeeper is alive"
}

/// Health check endpoint
async fn health_check() -> &'static str {
    "OK"
}
