//! The approval state machine.
//!
//! All methods are associated functions that validate a transition from the
//! current status and return the resulting status. The store executes the
//! returned transition inside its own atomic unit, so a concurrent loser
//! re-reads a terminal status and observes `AlreadyTerminal`.

use super::error::JournalError;
use super::types::TransactionStatus;

/// Stateless service for transaction workflow transitions.
pub struct JournalService;

impl JournalService {
    /// Submit a draft transaction for approval.
    ///
    /// # Errors
    ///
    /// Returns `AlreadyTerminal` for approved/rejected transactions and
    /// `InvalidTransition` when the transaction is already pending.
    pub fn submit(current: TransactionStatus) -> Result<TransactionStatus, JournalError> {
        match current {
            TransactionStatus::Draft => Ok(TransactionStatus::Pending),
            TransactionStatus::Pending => Err(JournalError::InvalidTransition {
                from: current,
                to: TransactionStatus::Pending,
            }),
            TransactionStatus::Approved | TransactionStatus::Rejected => {
                Err(JournalError::AlreadyTerminal { status: current })
            }
        }
    }

    /// Approve a draft or pending transaction.
    ///
    /// Draft transactions may be approved directly, skipping explicit
    /// submission.
    ///
    /// # Errors
    ///
    /// Returns `AlreadyTerminal` for approved/rejected transactions.
    pub fn approve(current: TransactionStatus) -> Result<TransactionStatus, JournalError> {
        match current {
            TransactionStatus::Draft | TransactionStatus::Pending => {
                Ok(TransactionStatus::Approved)
            }
            TransactionStatus::Approved | TransactionStatus::Rejected => {
                Err(JournalError::AlreadyTerminal { status: current })
            }
        }
    }

    /// Reject a draft or pending transaction. Rejection is terminal and has
    /// no balance effect, including retroactively.
    ///
    /// # Errors
    ///
    /// Returns `AlreadyTerminal` for approved/rejected transactions.
    pub fn reject(current: TransactionStatus) -> Result<TransactionStatus, JournalError> {
        match current {
            TransactionStatus::Draft | TransactionStatus::Pending => {
                Ok(TransactionStatus::Rejected)
            }
            TransactionStatus::Approved | TransactionStatus::Rejected => {
                Err(JournalError::AlreadyTerminal { status: current })
            }
        }
    }

    /// Check if a status transition is part of the state machine.
    ///
    /// Valid transitions:
    /// - Draft → Pending (submit)
    /// - Draft → Approved / Rejected (direct decision)
    /// - Pending → Approved / Rejected
    #[must_use]
    pub fn is_valid_transition(from: TransactionStatus, to: TransactionStatus) -> bool {
        matches!(
            (from, to),
            (
                TransactionStatus::Draft,
                TransactionStatus::Pending
                    | TransactionStatus::Approved
                    | TransactionStatus::Rejected
            ) | (
                TransactionStatus::Pending,
                TransactionStatus::Approved | TransactionStatus::Rejected
            )
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_submit_from_draft() {
        assert_eq!(
            JournalService::submit(TransactionStatus::Draft).unwrap(),
            TransactionStatus::Pending
        );
    }

    #[test]
    fn test_submit_from_pending_fails() {
        assert!(matches!(
            JournalService::submit(TransactionStatus::Pending),
            Err(JournalError::InvalidTransition { .. })
        ));
    }

    #[test]
    fn test_approve_from_draft_and_pending() {
        assert_eq!(
            JournalService::approve(TransactionStatus::Draft).unwrap(),
            TransactionStatus::Approved
        );
        assert_eq!(
            JournalService::approve(TransactionStatus::Pending).unwrap(),
            TransactionStatus::Approved
        );
    }

    #[test]
    fn test_approve_terminal_fails() {
        assert!(matches!(
            JournalService::approve(TransactionStatus::Approved),
            Err(JournalError::AlreadyTerminal {
                status: TransactionStatus::Approved
            })
        ));
        assert!(matches!(
            JournalService::approve(TransactionStatus::Rejected),
            Err(JournalError::AlreadyTerminal {
                status: TransactionStatus::Rejected
            })
        ));
    }

    #[test]
    fn test_reject_from_draft_and_pending() {
        assert_eq!(
            JournalService::reject(TransactionStatus::Draft).unwrap(),
            TransactionStatus::Rejected
        );
        assert_eq!(
            JournalService::reject(TransactionStatus::Pending).unwrap(),
            TransactionStatus::Rejected
        );
    }

    #[test]
    fn test_reject_terminal_fails() {
        assert!(matches!(
            JournalService::reject(TransactionStatus::Rejected),
            Err(JournalError::AlreadyTerminal { .. })
        ));
        assert!(matches!(
            JournalService::reject(TransactionStatus::Approved),
            Err(JournalError::AlreadyTerminal { .. })
        ));
    }

    #[test]
    fn test_is_valid_transition() {
        assert!(JournalService::is_valid_transition(
            TransactionStatus::Draft,
            TransactionStatus::Pending
        ));
        assert!(JournalService::is_valid_transition(
            TransactionStatus::Draft,
            TransactionStatus::Approved
        ));
        assert!(JournalService::is_valid_transition(
            TransactionStatus::Draft,
            TransactionStatus::Rejected
        ));
        assert!(JournalService::is_valid_transition(
            TransactionStatus::Pending,
            TransactionStatus::Approved
        ));
        assert!(JournalService::is_valid_transition(
            TransactionStatus::Pending,
            TransactionStatus::Rejected
        ));

        assert!(!JournalService::is_valid_transition(
            TransactionStatus::Pending,
            TransactionStatus::Draft
        ));
        assert!(!JournalService::is_valid_transition(
            TransactionStatus::Approved,
            TransactionStatus::Rejected
        ));
        assert!(!JournalService::is_valid_transition(
            TransactionStatus::Rejected,
            TransactionStatus::Pending
        ));
    }
}
