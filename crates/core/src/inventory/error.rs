//! Inventory valuation error types.

use thiserror::Error;

/// Errors for inventory valuation.
#[derive(Debug, Clone, Error)]
pub enum InventoryError {
    /// A variant row carries a negative cost or quantity.
    #[error("Catalog variant {variant_id} has invalid cost or quantity")]
    InvalidVariant {
        /// The offending variant.
        variant_id: String,
    },

    /// The summed stock value overflowed the minor-unit range.
    #[error("Inventory value overflowed while summing variant values")]
    ValueOverflow,
}
