//! HTTP API layer with Axum routes and middleware.
//!
//! This crate provides:
//! - The `/finance` REST API routes
//! - The actor-context extractor for authorization
//! - The `{success, data, message, error}` response envelope
//! - The catalog client used by the inventory reconciler

pub mod catalog;
pub mod middleware;
pub mod response;
pub mod routes;

use std::sync::Arc;

use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use catalog::CatalogSource;
use storebooks_shared::AppConfig;
use storebooks_store::Store;

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    /// The shared ledger/transaction store.
    pub store: Store,
    /// Catalog collaborator for inventory valuation.
    pub catalog: Arc<dyn CatalogSource>,
    /// Application configuration.
    pub config: Arc<AppConfig>,
}

/// Creates the main application router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .merge(routes::health::routes())
        .nest("/finance", routes::finance_routes())
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state)
}
