//! Transaction routes.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::Response;
use axum::routing::{get, patch, post};
use axum::{Json, Router};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use storebooks_core::journal::{
    CreateTransactionInput, EntryInput, Transaction, TransactionFilter, TransactionStatus,
    TransactionType,
};
use storebooks_core::ledger::EntryType;
use storebooks_shared::types::{LedgerId, Money, PageRequest, PageResponse, TransactionId};
use storebooks_store::repositories::TransactionRepository;
use storebooks_store::repositories::transaction::UpdateTransactionInput;

use crate::middleware::{ActorRole, AuthActor};
use crate::response::{failure, journal_error, success};
use crate::AppState;

/// Creates the transaction routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/transactions", post(create_transaction).get(list_transactions))
        .route(
            "/transactions/{id}",
            get(get_transaction)
                .patch(update_transaction)
                .delete(delete_transaction),
        )
        .route("/transactions/{id}/submit", patch(submit_transaction))
        .route("/transactions/{id}/approve", patch(approve_transaction))
        .route("/transactions/{id}/reject", patch(reject_transaction))
}

/// Request body for one transaction entry.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EntryRequest {
    /// The ledger to post to.
    pub ledger_id: Uuid,
    /// Debit when true, credit when false.
    pub is_debit: bool,
    /// Amount in minor units (must be positive).
    pub amount: Money,
    /// Optional description for this line.
    pub description: Option<String>,
}

impl EntryRequest {
    fn into_input(self) -> EntryInput {
        EntryInput {
            ledger_id: LedgerId::from_uuid(self.ledger_id),
            entry_type: if self.is_debit {
                EntryType::Debit
            } else {
                EntryType::Credit
            },
            amount: self.amount,
            description: self.description,
        }
    }
}

/// Request body for creating a transaction.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateTransactionRequest {
    /// Posting date (YYYY-MM-DD).
    pub date: NaiveDate,
    /// Transaction type: payment, receipt, or journal.
    #[serde(rename = "type")]
    pub transaction_type: String,
    /// Description.
    pub description: String,
    /// Optional notes.
    pub notes: Option<String>,
    /// Initial status: draft (default) or pending.
    pub status: Option<String>,
    /// The entries (at least 2, balanced).
    pub entries: Vec<EntryRequest>,
}

/// Request body for updating a transaction.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateTransactionRequest {
    /// New posting date.
    pub date: Option<NaiveDate>,
    /// New transaction type.
    #[serde(rename = "type")]
    pub transaction_type: Option<String>,
    /// New description.
    pub description: Option<String>,
    /// New notes.
    pub notes: Option<String>,
    /// Replacement entries (draft only, re-validated).
    pub entries: Option<Vec<EntryRequest>>,
}

/// Query parameters for listing transactions.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListTransactionsQuery {
    /// Filter by date range start (YYYY-MM-DD).
    pub start_date: Option<NaiveDate>,
    /// Filter by date range end (YYYY-MM-DD).
    pub end_date: Option<NaiveDate>,
    /// Filter by ledger referenced in any entry.
    pub ledger_id: Option<Uuid>,
    /// Filter by status.
    pub status: Option<String>,
    /// Filter by transaction type.
    #[serde(rename = "type")]
    pub transaction_type: Option<String>,
    /// Page number (1-indexed).
    pub page: Option<u32>,
    /// Page size.
    pub limit: Option<u32>,
}

/// Response for one transaction entry.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EntryResponse {
    /// Entry ID.
    pub id: Uuid,
    /// The ledger posted to.
    pub ledger_id: Uuid,
    /// Debit when true.
    pub is_debit: bool,
    /// Amount in minor units.
    pub amount: Money,
    /// Description.
    pub description: Option<String>,
}

/// Response for a transaction.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionResponse {
    /// Transaction ID.
    pub id: Uuid,
    /// Posting date.
    pub date: NaiveDate,
    /// Transaction type.
    #[serde(rename = "type")]
    pub transaction_type: TransactionType,
    /// Description.
    pub description: String,
    /// Status.
    pub status: TransactionStatus,
    /// Notes.
    pub notes: Option<String>,
    /// Creating user ID.
    pub created_by: Uuid,
    /// Created at timestamp.
    pub created_at: String,
    /// Updated at timestamp.
    pub updated_at: String,
    /// Entries.
    pub entries: Vec<EntryResponse>,
    /// Sum of debit entries.
    pub total_debit: Money,
    /// Sum of credit entries.
    pub total_credit: Money,
    /// Whether debits equal credits.
    pub is_balanced: bool,
}

impl From<Transaction> for TransactionResponse {
    fn from(tx: Transaction) -> Self {
        let total_debit = tx.total_debit();
        let total_credit = tx.total_credit();
        Self {
            id: tx.id.into_inner(),
            date: tx.date,
            transaction_type: tx.transaction_type,
            description: tx.description,
            status: tx.status,
            notes: tx.notes,
            created_by: tx.created_by.into_inner(),
            created_at: tx.created_at.to_rfc3339(),
            updated_at: tx.updated_at.to_rfc3339(),
            entries: tx
                .entries
                .into_iter()
                .map(|e| EntryResponse {
                    id: e.id.into_inner(),
                    ledger_id: e.ledger_id.into_inner(),
                    is_debit: e.entry_type.is_debit(),
                    amount: e.amount,
                    description: e.description,
                })
                .collect(),
            total_debit,
            total_credit,
            is_balanced: total_debit == total_credit,
        }
    }
}

/// POST `/finance/transactions` - Create a transaction.
///
/// Returns 400 when the entries are unbalanced, reference unknown or
/// inactive ledgers, or carry non-positive amounts.
async fn create_transaction(
    State(state): State<AppState>,
    actor: AuthActor,
    Json(payload): Json<CreateTransactionRequest>,
) -> Response {
    if let Err(response) = actor.require(ActorRole::Submitter) {
        return response;
    }

    let Some(transaction_type) = TransactionType::parse(&payload.transaction_type) else {
        return failure(
            StatusCode::BAD_REQUEST,
            "invalid_transaction_type",
            format!("Unknown transaction type: {}", payload.transaction_type),
        );
    };

    let submit = match payload.status.as_deref() {
        None => false,
        Some(raw) => match TransactionStatus::parse(raw) {
            Some(TransactionStatus::Draft) => false,
            Some(TransactionStatus::Pending) => true,
            _ => {
                return failure(
                    StatusCode::BAD_REQUEST,
                    "invalid_initial_status",
                    "Initial status must be draft or pending",
                );
            }
        },
    };

    let repo = TransactionRepository::new(state.store.clone());
    match repo
        .create_transaction(CreateTransactionInput {
            date: payload.date,
            transaction_type,
            description: payload.description,
            notes: payload.notes,
            entries: payload
                .entries
                .into_iter()
                .map(EntryRequest::into_input)
                .collect(),
            created_by: actor.user_id,
            submit,
        })
        .await
    {
        Ok(tx) => {
            info!(transaction_id = %tx.id, status = %tx.status, "Transaction created");
            success(StatusCode::CREATED, TransactionResponse::from(tx))
        }
        Err(e) => journal_error(&e),
    }
}

/// GET `/finance/transactions` - List transactions, `(date, seq)` ordered.
async fn list_transactions(
    State(state): State<AppState>,
    _actor: AuthActor,
    Query(query): Query<ListTransactionsQuery>,
) -> Response {
    let status = match &query.status {
        Some(raw) => match TransactionStatus::parse(raw) {
            Some(s) => Some(s),
            None => {
                return failure(
                    StatusCode::BAD_REQUEST,
                    "invalid_status",
                    format!("Unknown status: {raw}"),
                );
            }
        },
        None => None,
    };
    let transaction_type = match &query.transaction_type {
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

    let repo = TransactionRepository::new(state.store.clone());
    let transactions = repo
        .list_transactions(TransactionFilter {
            status,
            transaction_type,
            ledger_id: query.ledger_id.map(LedgerId::from_uuid),
            date_from: query.start_date,
            date_to: query.end_date,
        })
        .await;

    let page = PageRequest {
        page: query.page.unwrap_or(1).max(1),
        per_page: query.limit.unwrap_or(20).clamp(1, 100),
    };
    let total = transactions.len() as u64;
    let items: Vec<TransactionResponse> = transactions
        .into_iter()
        .skip(page.offset())
        .take(page.limit())
        .map(TransactionResponse::from)
        .collect();
    success(
        StatusCode::OK,
        PageResponse::new(items, page.page, page.per_page, total),
    )
}

/// GET `/finance/transactions/{id}` - Fetch one transaction.
async fn get_transaction(
    State(state): State<AppState>,
    _actor: AuthActor,
    Path(id): Path<Uuid>,
) -> Response {
    let repo = TransactionRepository::new(state.store.clone());
    match repo.get_transaction(TransactionId::from_uuid(id)).await {
        Ok(tx) => success(StatusCode::OK, TransactionResponse::from(tx)),
        Err(e) => journal_error(&e),
    }
}

/// PATCH `/finance/transactions/{id}` - Update a non-terminal transaction.
async fn update_transaction(
    State(state): State<AppState>,
    actor: AuthActor,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateTransactionRequest>,
) -> Response {
    if let Err(response) = actor.require(ActorRole::Submitter) {
        return response;
    }

    let transaction_type = match &payload.transaction_type {
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

    let repo = TransactionRepository::new(state.store.clone());
    match repo
        .update_transaction(
            TransactionId::from_uuid(id),
            UpdateTransactionInput {
                date: payload.date,
                transaction_type,
                description: payload.description,
                notes: payload.notes,
                entries: payload
                    .entries
                    .map(|entries| entries.into_iter().map(EntryRequest::into_input).collect()),
            },
        )
        .await
    {
        Ok(tx) => {
            info!(transaction_id = %tx.id, "Transaction updated");
            success(StatusCode::OK, TransactionResponse::from(tx))
        }
        Err(e) => journal_error(&e),
    }
}

/// DELETE `/finance/transactions/{id}` - Delete a draft transaction.
async fn delete_transaction(
    State(state): State<AppState>,
    actor: AuthActor,
    Path(id): Path<Uuid>,
) -> Response {
    if let Err(response) = actor.require(ActorRole::Submitter) {
        return response;
    }

    let repo = TransactionRepository::new(state.store.clone());
    match repo.delete_transaction(TransactionId::from_uuid(id)).await {
        Ok(()) => {
            info!(transaction_id = %id, "Transaction deleted");
            success(StatusCode::OK, serde_json::json!({ "deleted": true }))
        }
        Err(e) => journal_error(&e),
    }
}

/// PATCH `/finance/transactions/{id}/submit` - Submit a draft for approval.
async fn submit_transaction(
    State(state): State<AppState>,
    actor: AuthActor,
    Path(id): Path<Uuid>,
) -> Response {
    if let Err(response) = actor.require(ActorRole::Submitter) {
        return response;
    }

    let repo = TransactionRepository::new(state.store.clone());
    match repo.submit(TransactionId::from_uuid(id)).await {
        Ok(tx) => {
            info!(transaction_id = %tx.id, "Transaction submitted");
            success(StatusCode::OK, TransactionResponse::from(tx))
        }
        Err(e) => journal_error(&e),
    }
}

/// PATCH `/finance/transactions/{id}/approve` - Approve; 409 if terminal.
async fn approve_transaction(
    State(state): State<AppState>,
    actor: AuthActor,
    Path(id): Path<Uuid>,
) -> Response {
    if let Err(response) = actor.require(ActorRole::Approver) {
        return response;
    }

    let repo = TransactionRepository::new(state.store.clone());
    match repo.approve(TransactionId::from_uuid(id)).await {
        Ok(tx) => {
            info!(
                transaction_id = %tx.id,
                approved_by = %actor.user_id,
                "Transaction approved"
            );
            success(StatusCode::OK, TransactionResponse::from(tx))
        }
        Err(e) => journal_error(&e),
    }
}

/// PATCH `/finance/transactions/{id}/reject` - Reject; 409 if terminal.
async fn reject_transaction(
    State(state): State<AppState>,
    actor: AuthActor,
    Path(id): Path<Uuid>,
) -> Response {
    if let Err(response) = actor.require(ActorRole::Approver) {
        return response;
    }

    let repo = TransactionRepository::new(state.store.clone());
    match repo.reject(TransactionId::from_uuid(id)).await {
        Ok(tx) => {
            info!(
                transaction_id = %tx.id,
                rejected_by = %actor.user_id,
                "Transaction rejected"
            );
            success(StatusCode::OK, TransactionResponse::from(tx))
        }
        Err(e) => journal_error(&e),
    }
}
