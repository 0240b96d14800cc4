//! Ledger domain: account groups, ledgers, entries, and balance rules.
//!
//! Balances are always derived. A ledger's balance as of a date is its
//! opening balance plus the normal-balance-signed sum of entries belonging
//! to approved transactions dated on or before that date.

pub mod balance;
pub mod entry;
pub mod types;

pub use balance::{NormalBalance, RunningBalance, balance_as_of, signed_amount};
pub use entry::{EntryType, TransactionEntry};
pub use types::{AccountGroup, AccountType, Ledger};
