//! API route definitions.

use axum::Router;

use crate::AppState;

pub mod account_groups;
pub mod health;
pub mod inventory;
pub mod ledgers;
pub mod reports;
pub mod transactions;

/// Creates the `/finance` router.
pub fn finance_routes() -> Router<AppState> {
    Router::new()
        .merge(account_groups::routes())
        .merge(ledgers::routes())
        .merge(transactions::routes())
        .merge(reports::routes())
        .merge(inventory::routes())
}
