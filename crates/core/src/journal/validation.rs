//! Double-entry validation for transaction inputs.

use storebooks_shared::types::Money;

use super::error::JournalError;
use super::types::EntryInput;
use crate::ledger::EntryType;

/// Validates that a set of entry inputs forms a legal transaction body.
///
/// Checks, in order: at least two entries, every amount strictly positive,
/// and exact debit/credit balance on integer minor units. Ledger existence
/// and activity are checked by the store, which owns that state.
///
/// # Errors
///
/// Returns the first violated rule as a `JournalError`.
pub fn validate_entries(entries: &[EntryInput]) -> Result<(), JournalError> {
    if entries.len() < 2 {
        return Err(JournalError::InsufficientEntries);
    }

    let mut total_debits = Money::ZERO;
    let mut total_credits = Money::ZERO;

    for entry in entries {
        if !entry.amount.is_positive() {
            return Err(JournalError::NonPositiveAmount);
        }

        match entry.entry_type {
            EntryType::Debit => total_debits += entry.amount,
            EntryType::Credit => total_credits += entry.amount,
        }
    }

    if total_debits != total_credits {
        return Err(JournalError::Unbalanced {
            debits: total_debits,
            credits: total_credits,
        });
    }

    Ok(())
}
