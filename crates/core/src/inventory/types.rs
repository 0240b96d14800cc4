//! Inventory valuation types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use storebooks_shared::types::{LedgerId, Money};

/// One sellable variant as reported by the catalog service.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogVariant {
    /// Catalog product identifier.
    pub product_id: String,
    /// Catalog variant identifier.
    pub variant_id: String,
    /// Stock keeping unit.
    #[serde(default)]
    pub sku: String,
    /// Product title.
    #[serde(default)]
    pub product_title: String,
    /// Variant title.
    #[serde(default)]
    pub variant_title: String,
    /// Unit cost in minor units.
    pub cost_per_item: Money,
    /// Current selling price in minor units.
    #[serde(default)]
    pub selling_price: Money,
    /// Quantity on hand.
    pub quantity: i64,
}

/// One valued inventory line in the snapshot.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InventoryItem {
    /// Catalog product identifier.
    pub product_id: String,
    /// Catalog variant identifier.
    pub variant_id: String,
    /// Stock keeping unit.
    pub sku: String,
    /// Product title.
    pub product_title: String,
    /// Variant title.
    pub variant_title: String,
    /// Unit cost in minor units.
    pub cost_per_item: Money,
    /// Current selling price in minor units.
    pub selling_price: Money,
    /// Quantity on hand.
    pub quantity: i64,
    /// `cost_per_item * quantity`.
    pub total_value: Money,
}

/// Result of an inventory reconciliation run. Recomputed on demand,
/// never persisted.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InventorySnapshot {
    /// Total catalog-derived stock value.
    pub total_inventory_value: Money,
    /// Number of distinct variants counted.
    pub total_items: u64,
    /// Total quantity on hand across variants.
    pub total_quantity: i64,
    /// Average unit cost (`total value / total quantity`, zero when empty).
    pub average_cost_per_item: Money,
    /// Posting currency code.
    pub currency: String,
    /// The designated inventory ledger, if one exists.
    pub ledger_id: Option<LedgerId>,
    /// The inventory ledger's derived balance (zero when absent).
    pub ledger_balance: Money,
    /// `total_inventory_value - ledger_balance`.
    pub variance: Money,
    /// When the snapshot was computed.
    pub calculated_at: DateTime<Utc>,
    /// Valued lines, largest value first.
    pub items: Vec<InventoryItem>,
}
