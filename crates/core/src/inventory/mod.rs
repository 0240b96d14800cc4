//! Inventory valuation against the catalog.
//!
//! Computes current stock value from per-variant catalog rows and compares
//! it to the designated inventory ledger's balance. Read-only: variance is
//! a signal for a human or a correcting journal, never auto-posted.

pub mod error;
pub mod service;
pub mod types;

pub use error::InventoryError;
pub use service::ValuationService;
pub use types::{CatalogVariant, InventoryItem, InventorySnapshot};
