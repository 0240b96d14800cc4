//! The `{success, data?, message?, error?}` response envelope.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use serde_json::json;

use storebooks_core::journal::JournalError;
use storebooks_shared::AppError;
use storebooks_store::repositories::AccountError;

/// Returns a success envelope with the given status and payload.
pub fn success<T: Serialize>(status: StatusCode, data: T) -> Response {
    (
        status,
        Json(json!({
            "success": true,
            "data": data,
        })),
    )
        .into_response()
}

/// Returns a success envelope with a human-readable message.
pub fn success_with_message<T: Serialize>(status: StatusCode, data: T, message: &str) -> Response {
    (
        status,
        Json(json!({
            "success": true,
            "data": data,
            "message": message,
        })),
    )
        .into_response()
}

/// Returns a failure envelope with an error code and message.
pub fn failure(status: StatusCode, error: &str, message: impl Into<String>) -> Response {
    (
        status,
        Json(json!({
            "success": false,
            "error": error,
            "message": message.into(),
        })),
    )
        .into_response()
}

/// Maps an application error to its response using its own status and code.
pub fn app_error(err: &AppError) -> Response {
    let status = StatusCode::from_u16(err.status_code())
        .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    failure(status, err.error_code(), err.to_string())
}

/// Maps a journal error to its response.
pub fn journal_error(err: &JournalError) -> Response {
    let (status, code) = match err {
        JournalError::InsufficientEntries => (StatusCode::BAD_REQUEST, "insufficient_entries"),
        JournalError::NonPositiveAmount => (StatusCode::BAD_REQUEST, "invalid_amount"),
        JournalError::Unbalanced { .. } => (StatusCode::BAD_REQUEST, "unbalanced_transaction"),
        JournalError::UnknownLedger(_) => (StatusCode::BAD_REQUEST, "ledger_not_found"),
        JournalError::InactiveLedger(_) => (StatusCode::BAD_REQUEST, "ledger_inactive"),
        JournalError::NotFound(_) => (StatusCode::NOT_FOUND, "not_found"),
        JournalError::AlreadyTerminal { .. } => (StatusCode::CONFLICT, "already_terminal"),
        JournalError::InvalidTransition { .. } => (StatusCode::CONFLICT, "invalid_transition"),
        JournalError::EntriesLocked { .. } => (StatusCode::BAD_REQUEST, "entries_locked"),
        JournalError::OnlyDraftDeletable { .. } => {
            (StatusCode::BAD_REQUEST, "can_only_delete_draft")
        }
    };
    failure(status, code, err.to_string())
}

/// Maps an account error to its response.
pub fn account_error(err: &AccountError) -> Response {
    let (status, code) = match err {
        AccountError::GroupNotFound(_) => (StatusCode::NOT_FOUND, "group_not_found"),
        AccountError::LedgerNotFound(_) => (StatusCode::NOT_FOUND, "ledger_not_found"),
        AccountError::InactiveGroup(_) => (StatusCode::BAD_REQUEST, "group_inactive"),
        AccountError::DuplicateGroupName { .. } => (StatusCode::BAD_REQUEST, "duplicate_group"),
        AccountError::EmptyName => (StatusCode::BAD_REQUEST, "empty_name"),
    };
    failure(status, code, err.to_string())
}
