//! Account group and ledger domain types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use storebooks_shared::types::{AccountGroupId, LedgerId, Money, UserId};

use super::balance::NormalBalance;

/// Classification of account groups.
///
/// The type determines the normal balance side and which reports a
/// ledger's activity appears in. It is immutable after group creation;
/// changing it would silently rewrite historical reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AccountType {
    /// Asset accounts (debit-normal).
    Asset,
    /// Liability accounts (credit-normal).
    Liability,
    /// Equity accounts (credit-normal).
    Equity,
    /// Income accounts (credit-normal).
    Income,
    /// Expense accounts (debit-normal).
    Expense,
}

impl AccountType {
    /// Returns the string representation of the type.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Asset => "asset",
            Self::Liability => "liability",
            Self::Equity => "equity",
            Self::Income => "income",
            Self::Expense => "expense",
        }
    }

    /// Parses an account type from a string.
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "asset" => Some(Self::Asset),
            "liability" => Some(Self::Liability),
            "equity" => Some(Self::Equity),
            "income" => Some(Self::Income),
            "expense" => Some(Self::Expense),
            _ => None,
        }
    }

    /// Returns the normal balance side for this account type.
    #[must_use]
    pub const fn normal_balance(self) -> NormalBalance {
        match self {
            Self::Asset | Self::Expense => NormalBalance::DebitNormal,
            Self::Liability | Self::Equity | Self::Income => NormalBalance::CreditNormal,
        }
    }
}

impl std::fmt::Display for AccountType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A classification bucket owning a set of ledgers.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccountGroup {
    /// Unique identifier.
    pub id: AccountGroupId,
    /// Group name (unique per type, case-insensitive).
    pub name: String,
    /// Account classification (immutable after creation).
    pub account_type: AccountType,
    /// Optional description.
    pub description: Option<String>,
    /// Whether the group accepts new ledgers and postings.
    pub is_active: bool,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}

/// An individual account tracking a derived running balance.
///
/// There is deliberately no `current_balance` field: the balance is a
/// pure function of `opening_balance` and approved entries.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ledger {
    /// Unique identifier.
    pub id: LedgerId,
    /// The account group this ledger belongs to.
    pub group_id: AccountGroupId,
    /// Ledger name.
    pub name: String,
    /// Balance carried in at creation, in minor units.
    pub opening_balance: Money,
    /// Optional description.
    pub description: Option<String>,
    /// Whether the ledger accepts new postings.
    pub is_active: bool,
    /// The user who created the ledger.
    pub created_by: UserId,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}
