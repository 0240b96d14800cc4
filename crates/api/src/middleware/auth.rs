//! Actor context extraction for authorization.
//!
//! The engine trusts the identity forwarded by the out-of-scope gateway via
//! `x-actor-id` and `x-actor-role` headers and turns it into an explicit
//! request-scoped context. Roles gate mutations; reads only need a valid
//! actor.

use axum::extract::FromRequestParts;
use axum::http::StatusCode;
use axum::http::request::Parts;
use axum::response::Response;
use std::str::FromStr;

use storebooks_shared::types::UserId;

use crate::response::failure;

/// Actor role, ordered from lowest to highest privilege.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ActorRole {
    /// Can only view ledgers, transactions, and reports.
    Viewer = 0,
    /// Can create and edit transactions.
    Submitter = 1,
    /// Can approve and reject transactions.
    Approver = 2,
    /// Full access.
    Admin = 3,
}

impl ActorRole {
    /// Parses a role from a string.
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "viewer" => Some(Self::Viewer),
            "submitter" => Some(Self::Submitter),
            "approver" => Some(Self::Approver),
            "admin" => Some(Self::Admin),
            _ => None,
        }
    }

    /// Returns the string representation of the role.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Viewer => "viewer",
            Self::Submitter => "submitter",
            Self::Approver => "approver",
            Self::Admin => "admin",
        }
    }
}

/// The authenticated actor for this request.
#[derive(Debug, Clone, Copy)]
pub struct AuthActor {
    /// The acting user.
    pub user_id: UserId,
    /// The actor's role.
    pub role: ActorRole,
}

impl AuthActor {
    /// Requires at least the given role.
    ///
    /// # Errors
    ///
    /// Returns a 403 response when the actor's role is below `required`.
    pub fn require(&self, required: ActorRole) -> Result<(), Response> {
        if self.role >= required {
            Ok(())
        } else {
            Err(failure(
                StatusCode::FORBIDDEN,
                "forbidden",
                format!(
                    "Role '{}' required, actor has '{}'",
                    required.as_str(),
                    self.role.as_str()
                ),
            ))
        }
    }
}

impl<S> FromRequestParts<S> for AuthActor
where
    S: Send + Sync,
{
    type Rejection = Response;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let header = |name: &str| {
            parts
                .headers
                .get(name)
                .and_then(|v| v.to_str().ok())
                .map(str::trim)
        };

        let user_id = header("x-actor-id")
            .and_then(|v| UserId::from_str(v).ok())
            .ok_or_else(|| {
                failure(
                    StatusCode::UNAUTHORIZED,
                    "missing_actor",
                    "x-actor-id header with a valid UUID is required",
                )
            })?;

        let role = header("x-actor-role")
            .and_then(ActorRole::parse)
            .ok_or_else(|| {
                failure(
                    StatusCode::UNAUTHORIZED,
                    "missing_role",
                    "x-actor-role header with a valid role is required",
                )
            })?;

        Ok(Self { user_id, role })
    }
}
