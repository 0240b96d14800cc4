//! Journal error types.

use storebooks_shared::types::{LedgerId, Money, TransactionId};
use thiserror::Error;

use super::types::TransactionStatus;

/// Errors for journal operations.
#[derive(Debug, Clone, Error)]
pub enum JournalError {
    /// Transaction has fewer than two entries.
    #[error("Transaction must have at least 2 entries")]
    InsufficientEntries,

    /// Entry amount is zero or negative.
    #[error("Entry amount must be positive")]
    NonPositiveAmount,

    /// Transaction entries do not balance.
    #[error("Transaction is unbalanced: debits ({debits}) != credits ({credits})")]
    Unbalanced {
        /// Total debit amount in minor units.
        debits: Money,
        /// Total credit amount in minor units.
        credits: Money,
    },

    /// Entry references a ledger that does not exist.
    #[error("Ledger not found: {0}")]
    UnknownLedger(LedgerId),

    /// Entry references an inactive ledger.
    #[error("Ledger is inactive: {0}")]
    InactiveLedger(LedgerId),

    /// Transaction not found.
    #[error("Transaction not found: {0}")]
    NotFound(TransactionId),

    /// Transaction already reached a terminal status.
    #[error("Transaction is already {status}, no further transitions allowed")]
    AlreadyTerminal {
        /// The terminal status the transaction holds.
        status: TransactionStatus,
    },

    /// Requested status transition is not part of the state machine.
    #[error("Invalid status transition: {from} -> {to}")]
    InvalidTransition {
        /// Current status.
        from: TransactionStatus,
        /// Requested status.
        to: TransactionStatus,
    },

    /// Entries of a submitted or terminal transaction cannot be replaced.
    #[error("Entries cannot be modified once the transaction is {status}")]
    EntriesLocked {
        /// The status blocking the edit.
        status: TransactionStatus,
    },

    /// Only draft transactions can be deleted.
    #[error("Can only delete draft transactions (status is {status})")]
    OnlyDraftDeletable {
        /// The status blocking the delete.
        status: TransactionStatus,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = JournalError::Unbalanced {
            debits: Money::from_minor(3_000),
            credits: Money::from_minor(2_999),
        };
        assert_eq!(
            err.to_string(),
            "Transaction is unbalanced: debits (3000) != credits (2999)"
        );

        let err = JournalError::AlreadyTerminal {
            status: TransactionStatus::Approved,
        };
        assert_eq!(
            err.to_string(),
            "Transaction is already approved, no further transitions allowed"
        );
    }
}
