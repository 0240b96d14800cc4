//! Transaction entry domain types.

use serde::{Deserialize, Serialize};
use storebooks_shared::types::{EntryId, LedgerId, Money, TransactionId};

/// Type of ledger entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryType {
    /// Debit entry (increases assets/expenses, decreases liabilities/equity/income).
    Debit,
    /// Credit entry (decreases assets/expenses, increases liabilities/equity/income).
    Credit,
}

impl EntryType {
    /// Returns true for debit entries.
    #[must_use]
    pub const fn is_debit(self) -> bool {
        matches!(self, Self::Debit)
    }
}

/// A single line of a transaction, owned exclusively by that transaction.
///
/// Each transaction consists of at least two entries that must balance
/// (debits = credits, exact on minor units).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransactionEntry {
    /// Unique identifier for this entry.
    pub id: EntryId,
    /// The transaction this entry belongs to.
    pub transaction_id: TransactionId,
    /// The ledger affected by this entry.
    pub ledger_id: LedgerId,
    /// Whether this is a debit or credit.
    pub entry_type: EntryType,
    /// Amount in minor units (always positive).
    pub amount: Money,
    /// Optional description for this line item.
    pub description: Option<String>,
}

impl TransactionEntry {
    /// Returns the debit portion (zero for credit entries).
    #[must_use]
    pub fn debit(&self) -> Money {
        match self.entry_type {
            EntryType::Debit => self.amount,
            EntryType::Credit => Money::ZERO,
        }
    }

    /// Returns the credit portion (zero for debit entries).
    #[must_use]
    pub fn credit(&self) -> Money {
        match self.entry_type {
            EntryType::Debit => Money::ZERO,
            EntryType::Credit => self.amount,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(entry_type: EntryType, amount: i64) -> TransactionEntry {
        TransactionEntry {
            id: EntryId::new(),
            transaction_id: TransactionId::new(),
            ledger_id: LedgerId::new(),
            entry_type,
            amount: Money::from_minor(amount),
            description: None,
        }
    }

    #[test]
    fn test_debit_credit_split() {
        let d = entry(EntryType::Debit, 5_000);
        assert_eq!(d.debit(), Money::from_minor(5_000));
        assert_eq!(d.credit(), Money::ZERO);

        let c = entry(EntryType::Credit, 5_000);
        assert_eq!(c.debit(), Money::ZERO);
        assert_eq!(c.credit(), Money::from_minor(5_000));
    }
}
