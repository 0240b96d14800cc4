//! Catalog collaborator for inventory valuation.
//!
//! The reconciler pulls per-variant cost and quantity from the external
//! catalog service with a bounded timeout; a failed or slow fetch surfaces
//! as an upstream error, never as silently stale numbers.

use async_trait::async_trait;
use std::time::Duration;
use thiserror::Error;

use storebooks_core::inventory::CatalogVariant;
use storebooks_shared::config::CatalogConfig;

/// Error types for catalog fetches.
#[derive(Debug, Clone, Error)]
pub enum CatalogError {
    /// The catalog could not be reached or answered non-success.
    #[error("Catalog request failed: {0}")]
    Request(String),

    /// The catalog answered with an unparseable payload.
    #[error("Catalog returned a malformed payload: {0}")]
    Malformed(String),
}

/// Source of catalog variant rows.
#[async_trait]
pub trait CatalogSource: Send + Sync {
    /// Fetches all variants with cost and quantity on hand.
    async fn fetch_variants(&self) -> Result<Vec<CatalogVariant>, CatalogError>;
}

/// HTTP catalog client.
#[derive(Debug, Clone)]
pub struct HttpCatalog {
    client: reqwest::Client,
    base_url: String,
}

impl HttpCatalog {
    /// Builds a client with the configured bounded timeout.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying client cannot be constructed.
    pub fn new(config: &CatalogConfig) -> Result<Self, CatalogError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| CatalogError::Request(e.to_string()))?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }
}

#[async_trait]
impl CatalogSource for HttpCatalog {
    async fn fetch_variants(&self) -> Result<Vec<CatalogVariant>, CatalogError> {
        let url = format!("{}/catalog/variants", self.base_url);

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .and_then(reqwest::Response::error_for_status)
            .map_err(|e| CatalogError::Request(e.to_string()))?;

        response
            .json::<Vec<CatalogVariant>>()
            .await
            .map_err(|e| CatalogError::Malformed(e.to_string()))
    }
}
