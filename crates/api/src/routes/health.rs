//! Health check route.

use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::get;
use axum::Router;
use serde_json::json;

use crate::AppState;
use crate::response::success;

/// Creates the health routes.
pub fn routes() -> Router<AppState> {
    Router::new().route("/health", get(health))
}

/// GET `/health` - liveness probe.
async fn health() -> impl IntoResponse {
    success(StatusCode::OK, json!({ "status": "ok" }))
}
