//! Account group routes.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::Response;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use storebooks_core::ledger::{AccountGroup, AccountType};
use storebooks_shared::types::AccountGroupId;
use storebooks_store::repositories::AccountRepository;
use storebooks_store::repositories::account::{
    CreateAccountGroupInput, GroupFilter, UpdateAccountGroupInput,
};

use crate::middleware::{ActorRole, AuthActor};
use crate::response::{account_error, failure, success};
use crate::AppState;

/// Creates the account group routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/account-groups", post(create_group).get(list_groups))
        .route("/account-groups/{id}", get(get_group).patch(update_group))
}

/// Request body for creating an account group.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateGroupRequest {
    /// Group name.
    pub name: String,
    /// Account type: asset, liability, equity, income, or expense.
    #[serde(rename = "type")]
    pub account_type: String,
    /// Optional description.
    pub description: Option<String>,
}

/// Request body for updating an account group.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateGroupRequest {
    /// New name.
    pub name: Option<String>,
    /// New description.
    pub description: Option<String>,
    /// New active flag.
    pub is_active: Option<bool>,
}

/// Query parameters for listing account groups.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListGroupsQuery {
    /// Filter by account type.
    #[serde(rename = "type")]
    pub account_type: Option<String>,
    /// Filter by active flag.
    pub is_active: Option<bool>,
}

/// Response for an account group.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountGroupResponse {
    /// Group ID.
    pub id: Uuid,
    /// Group name.
    pub name: String,
    /// Account type.
    #[serde(rename = "type")]
    pub account_type: AccountType,
    /// Description.
    pub description: Option<String>,
    /// Active flag.
    pub is_active: bool,
    /// Created at timestamp.
    pub created_at: String,
    /// Updated at timestamp.
    pub updated_at: String,
}

impl From<AccountGroup> for AccountGroupResponse {
    fn from(group: AccountGroup) -> Self {
        Self {
            id: group.id.into_inner(),
            name: group.name,
            account_type: group.account_type,
            description: group.description,
            is_active: group.is_active,
            created_at: group.created_at.to_rfc3339(),
            updated_at: group.updated_at.to_rfc3339(),
        }
    }
}

/// POST `/finance/account-groups` - Create an account group.
async fn create_group(
    State(state): State<AppState>,
    actor: AuthActor,
    Json(payload): Json<CreateGroupRequest>,
) -> Response {
    if let Err(response) = actor.require(ActorRole::Submitter) {
        return response;
    }

    let Some(account_type) = AccountType::parse(&payload.account_type) else {
        return failure(
            StatusCode::BAD_REQUEST,
            "invalid_account_type",
            format!("Unknown account type: {}", payload.account_type),
        );
    };

    let repo = AccountRepository::new(state.store.clone());
    match repo
        .create_group(CreateAccountGroupInput {
            name: payload.name,
            account_type,
            description: payload.description,
        })
        .await
    {
        Ok(group) => {
            info!(group_id = %group.id, "Account group created");
            success(StatusCode::CREATED, AccountGroupResponse::from(group))
        }
        Err(e) => account_error(&e),
    }
}

/// GET `/finance/account-groups` - List account groups.
async fn list_groups(
    State(state): State<AppState>,
    _actor: AuthActor,
    Query(query): Query<ListGroupsQuery>,
) -> Response {
    let account_type = match &query.account_type {
        Some(raw) => match AccountType::parse(raw) {
            Some(t) => Some(t),
            None => {
                return failure(
                    StatusCode::BAD_REQUEST,
                    "invalid_account_type",
                    format!("Unknown account type: {raw}"),
                );
            }
        },
        None => None,
    };

    let repo = AccountRepository::new(state.store.clone());
    let groups = repo
        .list_groups(GroupFilter {
            account_type,
            is_active: query.is_active,
        })
        .await;

    let items: Vec<AccountGroupResponse> =
        groups.into_iter().map(AccountGroupResponse::from).collect();
    success(StatusCode::OK, items)
}

/// GET `/finance/account-groups/{id}` - Fetch one account group.
async fn get_group(
    State(state): State<AppState>,
    _actor: AuthActor,
    Path(id): Path<Uuid>,
) -> Response {
    let repo = AccountRepository::new(state.store.clone());
    match repo.get_group(AccountGroupId::from_uuid(id)).await {
        Ok(group) => success(StatusCode::OK, AccountGroupResponse::from(group)),
        Err(e) => account_error(&e),
    }
}

/// PATCH `/finance/account-groups/{id}` - Update an account group.
///
/// The account type is immutable; it is not part of the request body.
async fn update_group(
    State(state): State<AppState>,
    actor: AuthActor,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateGroupRequest>,
) -> Response {
    if let Err(response) = actor.require(ActorRole::Submitter) {
        return response;
    }

    let repo = AccountRepository::new(state.store.clone());
    match repo
        .update_group(
            AccountGroupId::from_uuid(id),
            UpdateAccountGroupInput {
                name: payload.name,
                description: payload.description,
                is_active: payload.is_active,
            },
        )
        .await
    {
        Ok(group) => {
            info!(group_id = %group.id, "Account group updated");
            success(StatusCode::OK, AccountGroupResponse::from(group))
        }
        Err(e) => account_error(&e),
    }
}
