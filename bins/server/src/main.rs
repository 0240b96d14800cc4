//! Storebooks API Server
//!
//! Main entry point for the Storebooks accounting engine.

use std::sync::Arc;

use anyhow::Context;
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use storebooks_api::catalog::HttpCatalog;
use storebooks_api::{AppState, create_router};
use storebooks_shared::AppConfig;
use storebooks_store::Store;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "storebooks=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let config = AppConfig::load().context("Failed to load configuration")?;

    // Catalog client for inventory valuation
    let catalog = HttpCatalog::new(&config.catalog)
        .map_err(|e| anyhow::anyhow!("Failed to build catalog client: {e}"))?;
    info!(
        base_url = %config.catalog.base_url,
        timeout_secs = config.catalog.timeout_secs,
        "Catalog client configured"
    );

    // Shared ledger/transaction store
    let store = Store::new();

    // Create application state
    let state = AppState {
        store,
        catalog: Arc::new(catalog),
        config: Arc::new(config.clone()),
    };

    // Create router
    let app = create_router(state);

    // Start server
    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = TcpListener::bind(&addr).await?;
    info!("Server listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
