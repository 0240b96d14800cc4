//! Report routes.
//!
//! Trial balance and balance sheet imbalances are server faults, not user
//! errors: they are logged under the `invariant` target for alerting and
//! still returned so the caller sees the flagged report.

use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::Response;
use axum::routing::get;
use axum::Router;
use chrono::{NaiveDate, Utc};
use serde::Deserialize;
use tracing::error;
use uuid::Uuid;

use storebooks_core::journal::TransactionType;
use storebooks_shared::types::LedgerId;
use storebooks_store::repositories::ReportRepository;

use crate::middleware::AuthActor;
use crate::response::{account_error, failure, success};
use crate::AppState;

/// Creates the report routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/reports/daybook", get(day_book))
        .route("/reports/ledger", get(ledger_statement))
        .route("/trial-balance", get(trial_balance))
        .route("/reports/profit-loss", get(profit_loss))
        .route("/reports/balance-sheet", get(balance_sheet))
}

fn report_repo(state: &AppState) -> ReportRepository {
    ReportRepository::new(state.store.clone(), state.config.accounting.currency.clone())
}

/// Query parameters for the day book.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DayBookQuery {
    /// Range start (YYYY-MM-DD).
    pub start_date: NaiveDate,
    /// Range end (YYYY-MM-DD).
    pub end_date: NaiveDate,
    /// Filter by transaction type.
    #[serde(rename = "type")]
    pub transaction_type: Option<String>,
    /// Filter by ledger.
    pub ledger_id: Option<Uuid>,
}

/// Query parameters for the ledger statement.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LedgerStatementQuery {
    /// The ledger to report on.
    pub ledger_id: Uuid,
    /// Range start; defaults to the epoch.
    pub start_date: Option<NaiveDate>,
    /// Range end; defaults to today.
    pub end_date: Option<NaiveDate>,
}

/// Query parameters for as-of reports.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AsOfQuery {
    /// As-of date; defaults to today.
    pub as_of_date: Option<NaiveDate>,
}

/// Query parameters for period reports.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PeriodQuery {
    /// Range start (YYYY-MM-DD).
    pub start_date: NaiveDate,
    /// Range end (YYYY-MM-DD).
    pub end_date: NaiveDate,
}

/// GET `/finance/reports/daybook` - Day book over a date range.
async fn day_book(
    State(state): State<AppState>,
    _actor: AuthActor,
    Query(query): Query<DayBookQuery>,
) -> Response {
    let type_filter = match &query.transaction_type {
        Some(raw) => match TransactionType::parse(raw) {
            Some(t) => Some(t),
            None => {
                return failure(
                    StatusCode::BAD_REQUEST,
                    "invalid_transaction_type",
                    format!("Unknown transaction type: {raw}"),
                );
            }
        },
        None => None,
    };

    let report = report_repo(&state)
        .day_book(
            query.start_date,
            query.end_date,
            type_filter,
            query.ledger_id.map(LedgerId::from_uuid),
        )
        .await;
    success(StatusCode::OK, report)
}

/// GET `/finance/reports/ledger` - Statement of one ledger.
async fn ledger_statement(
    State(state): State<AppState>,
    _actor: AuthActor,
    Query(query): Query<LedgerStatementQuery>,
) -> Response {
    let start = query
        .start_date
        .unwrap_or(NaiveDate::from_ymd_opt(1970, 1, 1).unwrap_or(NaiveDate::MIN));
    let end = query.end_date.unwrap_or_else(|| Utc::now().date_naive());

    match report_repo(&state)
        .ledger_statement(LedgerId::from_uuid(query.ledger_id), start, end)
        .await
    {
        Ok(statement) => success(StatusCode::OK, statement),
        Err(e) => account_error(&e),
    }
}

/// GET `/finance/trial-balance` - Trial balance as of a date.
async fn trial_balance(
    State(state): State<AppState>,
    _actor: AuthActor,
    Query(query): Query<AsOfQuery>,
) -> Response {
    let as_of = query.as_of_date.unwrap_or_else(|| Utc::now().date_naive());
    let report = report_repo(&state).trial_balance(as_of).await;

    if !report.is_balanced {
        error!(
            target: "invariant",
            as_of = %report.as_of_date,
            total_debit = report.total_debit.minor(),
            total_credit = report.total_credit.minor(),
            "Trial balance does not balance despite individually balanced transactions"
        );
    }

    success(StatusCode::OK, report)
}

/// GET `/finance/reports/profit-loss` - Profit & loss over a date range.
async fn profit_loss(
    State(state): State<AppState>,
    _actor: AuthActor,
    Query(query): Query<PeriodQuery>,
) -> Response {
    let report = report_repo(&state)
        .profit_loss(query.start_date, query.end_date)
        .await;
    success(StatusCode::OK, report)
}

/// GET `/finance/reports/balance-sheet` - Balance sheet as of a date.
async fn balance_sheet(
    State(state): State<AppState>,
    _actor: AuthActor,
    Query(query): Query<AsOfQuery>,
) -> Response {
    let as_of = query.as_of_date.unwrap_or_else(|| Utc::now().date_naive());
    let report = report_repo(&state).balance_sheet(as_of).await;

    if !report.is_balanced {
        error!(
            target: "invariant",
            as_of = %report.as_of_date,
            total_assets = report.total_assets.minor(),
            total_liabilities = report.total_liabilities.minor(),
            total_equity = report.total_equity.minor(),
            "Balance sheet does not balance"
        );
    }

    success(StatusCode::OK, report)
}
