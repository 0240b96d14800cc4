//! Inventory reconciliation route.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::Response;
use axum::routing::get;
use axum::Router;
use chrono::Utc;
use tracing::{error, warn};

use storebooks_core::inventory::{InventoryError, ValuationService};
use storebooks_shared::AppError;
use storebooks_store::repositories::{AccountRepository, ReportRepository};

use crate::middleware::AuthActor;
use crate::response::{app_error, success};
use crate::AppState;

/// Creates the inventory routes.
pub fn routes() -> Router<AppState> {
    Router::new().route(
        "/inventory-assets/realtime-calculation",
        get(realtime_calculation),
    )
}

/// GET `/finance/inventory-assets/realtime-calculation` - Reconcile catalog
/// stock value against the inventory ledger.
///
/// Read-only: the variance is surfaced for a human or a correcting-journal
/// workflow; nothing is posted back to the ledger here. A catalog failure is
/// an explicit upstream error, never silently stale numbers.
async fn realtime_calculation(State(state): State<AppState>, _actor: AuthActor) -> Response {
    let variants = match state.catalog.fetch_variants().await {
        Ok(variants) => variants,
        Err(e) => {
            error!(error = %e, "Catalog fetch failed, reconciliation aborted");
            return app_error(&AppError::Upstream(e.to_string()));
        }
    };

    let accounts = AccountRepository::new(state.store.clone());
    let fragment = &state.config.accounting.inventory_ledger;
    let ledger = match accounts.find_ledger_by_name_fragment(fragment).await {
        Some(ledger) => {
            let reports = ReportRepository::new(
                state.store.clone(),
                state.config.accounting.currency.clone(),
            );
            match reports
                .ledger_balance_as_of(ledger.id, Utc::now().date_naive())
                .await
            {
                Ok(balance) => Some((ledger.id, balance)),
                Err(e) => {
                    error!(error = %e, "Inventory ledger balance lookup failed");
                    return app_error(&AppError::Internal(
                        "Failed to read the inventory ledger balance".into(),
                    ));
                }
            }
        }
        None => {
            warn!(
                fragment = %fragment,
                "No active inventory ledger found, variance covers full stock value"
            );
            None
        }
    };

    match ValuationService::build_snapshot(
        &variants,
        ledger,
        &state.config.accounting.currency,
        Utc::now(),
    ) {
        Ok(snapshot) => success(StatusCode::OK, snapshot),
        Err(e @ InventoryError::InvalidVariant { .. }) => {
            error!(error = %e, "Catalog payload failed validation");
            app_error(&AppError::Upstream(e.to_string()))
        }
        Err(e @ InventoryError::ValueOverflow) => {
            error!(error = %e, "Inventory valuation overflowed");
            app_error(&AppError::Internal(e.to_string()))
        }
    }
}
