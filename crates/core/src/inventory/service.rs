//! Stock valuation from catalog rows.

use chrono::{DateTime, Utc};
use storebooks_shared::types::{LedgerId, Money};

use super::error::InventoryError;
use super::types::{CatalogVariant, InventoryItem, InventorySnapshot};

/// Stateless valuation service.
pub struct ValuationService;

impl ValuationService {
    /// Values the given catalog variants and compares the total against the
    /// inventory ledger balance supplied by the caller.
    ///
    /// Variants with zero quantity carry no value and are skipped, matching
    /// how the catalog reports stock on hand.
    ///
    /// # Errors
    ///
    /// Returns an error on negative costs/quantities or arithmetic overflow;
    /// catalog data is external input and is not trusted.
    pub fn build_snapshot(
        variants: &[CatalogVariant],
        ledger: Option<(LedgerId, Money)>,
        currency: &str,
        calculated_at: DateTime<Utc>,
    ) -> Result<InventorySnapshot, InventoryError> {
        let mut items = Vec::new();
        let mut total_value = Money::ZERO;
        let mut total_quantity: i64 = 0;

        for variant in variants {
            if variant.cost_per_item.is_negative() || variant.quantity < 0 {
                return Err(InventoryError::InvalidVariant {
                    variant_id: variant.variant_id.clone(),
                });
            }
            if variant.quantity == 0 {
                continue;
            }

            let line_value = variant
                .cost_per_item
                .checked_mul(variant.quantity)
                .ok_or(InventoryError::ValueOverflow)?;
            total_value = total_value
                .checked_add(line_value)
                .ok_or(InventoryError::ValueOverflow)?;
            total_quantity = total_quantity
                .checked_add(variant.quantity)
                .ok_or(InventoryError::ValueOverflow)?;

            items.push(InventoryItem {
                product_id: variant.product_id.clone(),
                variant_id: variant.variant_id.clone(),
                sku: variant.sku.clone(),
                product_title: variant.product_title.clone(),
                variant_title: variant.variant_title.clone(),
                cost_per_item: variant.cost_per_item,
                selling_price: variant.selling_price,
                quantity: variant.quantity,
                total_value: line_value,
            });
        }

        items.sort_by(|a, b| b.total_value.cmp(&a.total_value));

        let average_cost_per_item = if total_quantity > 0 {
            Money::from_minor(total_value.minor() / total_quantity)
        } else {
            Money::ZERO
        };

        let (ledger_id, ledger_balance) = match ledger {
            Some((id, balance)) => (Some(id), balance),
            None => (None, Money::ZERO),
        };

        Ok(InventorySnapshot {
            total_inventory_value: total_value,
            total_items: items.len() as u64,
            total_quantity,
            average_cost_per_item,
            currency: currency.to_string(),
            ledger_id,
            ledger_balance,
            variance: total_value - ledger_balance,
            calculated_at,
            items,
        })
    }
}
