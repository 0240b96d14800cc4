//! Application configuration management.

use serde::Deserialize;

/// Application configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// Server configuration.
    pub server: ServerConfig,
    /// Catalog feed configuration.
    pub catalog: CatalogConfig,
    /// Accounting configuration.
    #[serde(default)]
    pub accounting: AccountingConfig,
}

/// Server configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Host to bind to.
    #[serde(default = "default_host")]
    pub host: String,
    /// Port to listen on.
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

/// Catalog feed configuration for inventory valuation.
#[derive(Debug, Clone, Deserialize)]
pub struct CatalogConfig {
    /// Base URL of the catalog service.
    pub base_url: String,
    /// Request timeout in seconds for catalog fetches.
    #[serde(default = "default_catalog_timeout")]
    pub timeout_secs: u64,
}

fn default_catalog_timeout() -> u64 {
    10
}

/// Accounting configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct AccountingConfig {
    /// ISO 4217 code of the single posting currency.
    #[serde(default = "default_currency")]
    pub currency: String,
    /// Name fragment identifying the inventory ledger (case-insensitive).
    #[serde(default = "default_inventory_ledger")]
    pub inventory_ledger: String,
}

fn default_currency() -> String {
    "INR".to_string()
}

fn default_inventory_ledger() -> String {
    "inventory".to_string()
}

impl Default for AccountingConfig {
    fn default() -> Self {
        Self {
            currency: default_currency(),
            inventory_ledger: default_inventory_ledger(),
        }
    }
}

impl AppConfig {
    /// Loads configuration from environment and config files.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be loaded.
    pub fn load() -> Result<Self, config::ConfigError> {
        let run_mode = std::env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{run_mode}")).required(false))
            .add_source(config::Environment::with_prefix("STOREBOOKS").separator("__"))
            .build()?;

        config.try_deserialize()
    }
}
