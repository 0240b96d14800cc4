//! Ledger routes.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::Response;
use axum::routing::{get, post};
use axum::{Json, Router};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use storebooks_core::ledger::AccountType;
use storebooks_shared::types::{AccountGroupId, LedgerId, Money};
use storebooks_store::repositories::AccountRepository;
use storebooks_store::repositories::account::{
    CreateLedgerInput, LedgerFilter, LedgerWithBalance, UpdateLedgerInput,
};

use crate::middleware::{ActorRole, AuthActor};
use crate::response::{account_error, failure, success};
use crate::AppState;

/// Creates the ledger routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/ledgers", post(create_ledger).get(list_ledgers))
        .route("/ledgers/{id}", get(get_ledger).patch(update_ledger))
        .route("/ledgers/{id}/balance", get(ledger_balance))
}

/// Request body for creating a ledger.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateLedgerRequest {
    /// Ledger name.
    pub name: String,
    /// Owning account group.
    pub group_id: Uuid,
    /// Opening balance in minor units (defaults to zero).
    #[serde(default)]
    pub opening_balance: Money,
    /// Optional description.
    pub description: Option<String>,
}

/// Request body for updating a ledger.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateLedgerRequest {
    /// New name.
    pub name: Option<String>,
    /// New description.
    pub description: Option<String>,
    /// New active flag.
    pub is_active: Option<bool>,
}

/// Query parameters for listing ledgers.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListLedgersQuery {
    /// Filter by owning group.
    pub group_id: Option<Uuid>,
    /// Filter by active flag.
    pub is_active: Option<bool>,
    /// Case-insensitive name search.
    pub search: Option<String>,
}

/// Response for a ledger with its derived balance.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LedgerResponse {
    /// Ledger ID.
    pub id: Uuid,
    /// Ledger name.
    pub name: String,
    /// Owning group ID.
    pub group_id: Uuid,
    /// Owning group name.
    pub group_name: String,
    /// Owning group type.
    pub group_type: AccountType,
    /// Opening balance in minor units.
    pub opening_balance: Money,
    /// Derived current balance in minor units.
    pub current_balance: Money,
    /// Description.
    pub description: Option<String>,
    /// Active flag.
    pub is_active: bool,
    /// Created at timestamp.
    pub created_at: String,
    /// Updated at timestamp.
    pub updated_at: String,
}

impl From<LedgerWithBalance> for LedgerResponse {
    fn from(row: LedgerWithBalance) -> Self {
        Self {
            id: row.ledger.id.into_inner(),
            name: row.ledger.name,
            group_id: row.ledger.group_id.into_inner(),
            group_name: row.group_name,
            group_type: row.group_type,
            opening_balance: row.ledger.opening_balance,
            current_balance: row.current_balance,
            description: row.ledger.description,
            is_active: row.ledger.is_active,
            created_at: row.ledger.created_at.to_rfc3339(),
            updated_at: row.ledger.updated_at.to_rfc3339(),
        }
    }
}

/// Response for the ledger balance detail view.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LedgerBalanceResponse {
    /// Ledger ID.
    pub ledger_id: Uuid,
    /// Ledger name.
    pub ledger_name: String,
    /// Owning group name.
    pub group_name: String,
    /// Opening balance.
    pub opening_balance: Money,
    /// Total approved debits.
    pub debit_total: Money,
    /// Total approved credits.
    pub credit_total: Money,
    /// Derived current balance.
    pub current_balance: Money,
    /// Most recent entries, newest first.
    pub recent_entries: Vec<RecentEntryResponse>,
}

/// One recent entry line.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RecentEntryResponse {
    /// Entry ID.
    pub id: Uuid,
    /// Owning transaction.
    pub transaction_id: Uuid,
    /// Posting date.
    pub date: NaiveDate,
    /// Debit amount.
    pub debit: Money,
    /// Credit amount.
    pub credit: Money,
    /// Entry description.
    pub description: Option<String>,
}

/// POST `/finance/ledgers` - Create a ledger.
async fn create_ledger(
    State(state): State<AppState>,
    actor: AuthActor,
    Json(payload): Json<CreateLedgerRequest>,
) -> Response {
    if let Err(response) = actor.require(ActorRole::Submitter) {
        return response;
    }

    let repo = AccountRepository::new(state.store.clone());
    let created = repo
        .create_ledger(CreateLedgerInput {
            name: payload.name,
            group_id: AccountGroupId::from_uuid(payload.group_id),
            opening_balance: payload.opening_balance,
            description: payload.description,
            created_by: actor.user_id,
        })
        .await;

    match created {
        Ok(ledger) => {
            info!(ledger_id = %ledger.id, "Ledger created");
            match repo.get_ledger(ledger.id).await {
                Ok(row) => success(StatusCode::CREATED, LedgerResponse::from(row)),
                Err(e) => account_error(&e),
            }
        }
        Err(e) => account_error(&e),
    }
}

/// GET `/finance/ledgers` - List ledgers with derived current balances.
async fn list_ledgers(
    State(state): State<AppState>,
    _actor: AuthActor,
    Query(query): Query<ListLedgersQuery>,
) -> Response {
    let repo = AccountRepository::new(state.store.clone());
    let ledgers = repo
        .list_ledgers(LedgerFilter {
            group_id: query.group_id.map(AccountGroupId::from_uuid),
            is_active: query.is_active,
            search: query.search,
        })
        .await;

    let items: Vec<LedgerResponse> = ledgers.into_iter().map(LedgerResponse::from).collect();
    success(StatusCode::OK, items)
}

/// GET `/finance/ledgers/{id}` - Fetch one ledger with its balance.
async fn get_ledger(
    State(state): State<AppState>,
    _actor: AuthActor,
    Path(id): Path<Uuid>,
) -> Response {
    let repo = AccountRepository::new(state.store.clone());
    match repo.get_ledger(LedgerId::from_uuid(id)).await {
        Ok(row) => success(StatusCode::OK, LedgerResponse::from(row)),
        Err(e) => account_error(&e),
    }
}

/// PATCH `/finance/ledgers/{id}` - Update a ledger.
async fn update_ledger(
    State(state): State<AppState>,
    actor: AuthActor,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateLedgerRequest>,
) -> Response {
    if let Err(response) = actor.require(ActorRole::Submitter) {
        return response;
    }

    if payload.name.is_none() && payload.description.is_none() && payload.is_active.is_none() {
        return failure(
            StatusCode::BAD_REQUEST,
            "empty_update",
            "At least one field must be provided",
        );
    }

    let repo = AccountRepository::new(state.store.clone());
    match repo
        .update_ledger(
            LedgerId::from_uuid(id),
            UpdateLedgerInput {
                name: payload.name,
                description: payload.description,
                is_active: payload.is_active,
            },
        )
        .await
    {
        Ok(ledger) => {
            info!(ledger_id = %ledger.id, "Ledger updated");
            match repo.get_ledger(ledger.id).await {
                Ok(row) => success(StatusCode::OK, LedgerResponse::from(row)),
                Err(e) => account_error(&e),
            }
        }
        Err(e) => account_error(&e),
    }
}

/// GET `/finance/ledgers/{id}/balance` - Balance detail with recent entries.
async fn ledger_balance(
    State(state): State<AppState>,
    _actor: AuthActor,
    Path(id): Path<Uuid>,
) -> Response {
    let repo = AccountRepository::new(state.store.clone());
    match repo.ledger_balance(LedgerId::from_uuid(id)).await {
        Ok(summary) => success(
            StatusCode::OK,
            LedgerBalanceResponse {
                ledger_id: summary.ledger_id.into_inner(),
                ledger_name: summary.ledger_name,
                group_name: summary.group_name,
                opening_balance: summary.opening_balance,
                debit_total: summary.debit_total,
                credit_total: summary.credit_total,
                current_balance: summary.current_balance,
                recent_entries: summary
                    .recent_entries
                    .into_iter()
                    .map(|e| RecentEntryResponse {
                        id: e.id.into_inner(),
                        transaction_id: e.transaction_id.into_inner(),
                        date: e.date,
                        debit: e.debit,
                        credit: e.credit,
                        description: e.description,
                    })
                    .collect(),
            },
        ),
        Err(e) => account_error(&e),
    }
}
