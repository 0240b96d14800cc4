//! Journal domain types for transaction lifecycle management.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use storebooks_shared::types::{LedgerId, Money, TransactionId, UserId};

use crate::ledger::{EntryType, TransactionEntry};

/// Transaction status in the approval workflow.
///
/// The valid transitions are:
/// - Draft → Pending (submit)
/// - Draft → Approved (approve, skipping explicit submission)
/// - Draft → Rejected (reject, skipping explicit submission)
/// - Pending → Approved (approve)
/// - Pending → Rejected (reject)
///
/// `Approved` and `Rejected` are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionStatus {
    /// Transaction is being drafted and can be modified.
    Draft,
    /// Transaction has been submitted for approval.
    Pending,
    /// Transaction has been approved and affects ledger balances (immutable).
    Approved,
    /// Transaction has been rejected and never affects balances (immutable).
    Rejected,
}

impl TransactionStatus {
    /// Returns the string representation of the status.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Draft => "draft",
            Self::Pending => "pending",
            Self::Approved => "approved",
            Self::Rejected => "rejected",
        }
    }

    /// Parses a status from a string.
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "draft" => Some(Self::Draft),
            "pending" => Some(Self::Pending),
            "approved" => Some(Self::Approved),
            "rejected" => Some(Self::Rejected),
            _ => None,
        }
    }

    /// Returns true if the transaction's entries can still be replaced.
    #[must_use]
    pub fn is_editable(&self) -> bool {
        matches!(self, Self::Draft)
    }

    /// Returns true once no further transitions are allowed.
    #[must_use]
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Approved | Self::Rejected)
    }
}

impl fmt::Display for TransactionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Transaction type classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionType {
    /// Outgoing payment.
    Payment,
    /// Incoming receipt.
    Receipt,
    /// General journal entry.
    Journal,
}

impl TransactionType {
    /// Returns the string representation of the type.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Payment => "payment",
            Self::Receipt => "receipt",
            Self::Journal => "journal",
        }
    }

    /// Parses a transaction type from a string.
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "payment" => Some(Self::Payment),
            "receipt" => Some(Self::Receipt),
            "journal" => Some(Self::Journal),
            _ => None,
        }
    }
}

impl fmt::Display for TransactionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A journaled transaction with its entries.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Transaction {
    /// Unique identifier.
    pub id: TransactionId,
    /// Posting date.
    pub date: NaiveDate,
    /// Transaction classification.
    pub transaction_type: TransactionType,
    /// Description.
    pub description: String,
    /// Current workflow status.
    pub status: TransactionStatus,
    /// Optional free-form notes.
    pub notes: Option<String>,
    /// The user who created the transaction.
    pub created_by: UserId,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
    /// Insertion sequence; `(date, seq)` defines the stable posting order.
    pub seq: u64,
    /// The entries (at least two, balanced).
    pub entries: Vec<TransactionEntry>,
}

impl Transaction {
    /// Sum of debit entries.
    #[must_use]
    pub fn total_debit(&self) -> Money {
        self.entries.iter().map(TransactionEntry::debit).sum()
    }

    /// Sum of credit entries.
    #[must_use]
    pub fn total_credit(&self) -> Money {
        self.entries.iter().map(TransactionEntry::credit).sum()
    }

    /// Whether debits equal credits exactly.
    #[must_use]
    pub fn is_balanced(&self) -> bool {
        self.total_debit() == self.total_credit()
    }
}

/// Input for a single entry of a new transaction.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EntryInput {
    /// The ledger to post to.
    pub ledger_id: LedgerId,
    /// Whether this is a debit or credit entry.
    pub entry_type: EntryType,
    /// Amount in minor units (must be positive).
    pub amount: Money,
    /// Optional description for this line.
    pub description: Option<String>,
}

/// Input for creating a new transaction.
#[derive(Debug, Clone)]
pub struct CreateTransactionInput {
    /// Posting date.
    pub date: NaiveDate,
    /// Transaction classification.
    pub transaction_type: TransactionType,
    /// Description.
    pub description: String,
    /// Optional notes.
    pub notes: Option<String>,
    /// The entries (must have at least 2 and balance).
    pub entries: Vec<EntryInput>,
    /// The user creating the transaction.
    pub created_by: UserId,
    /// Create directly in `Pending` instead of `Draft`.
    pub submit: bool,
}

/// Filter options for listing transactions.
#[derive(Debug, Clone, Default)]
pub struct TransactionFilter {
    /// Filter by status.
    pub status: Option<TransactionStatus>,
    /// Filter by transaction type.
    pub transaction_type: Option<TransactionType>,
    /// Filter by ledger referenced in any entry.
    pub ledger_id: Option<LedgerId>,
    /// Filter by date range start (inclusive).
    pub date_from: Option<NaiveDate>,
    /// Filter by date range end (inclusive).
    pub date_to: Option<NaiveDate>,
}

/// An entry of an approved transaction, joined with the transaction
/// fields the balance calculator and reports need.
#[derive(Debug, Clone)]
pub struct PostedEntry {
    /// The entry itself.
    pub entry: TransactionEntry,
    /// Posting date of the owning transaction.
    pub date: NaiveDate,
    /// Insertion sequence of the owning transaction.
    pub seq: u64,
    /// Type of the owning transaction.
    pub transaction_type: TransactionType,
    /// Description of the owning transaction.
    pub description: String,
}
