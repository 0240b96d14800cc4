//! Transaction journal: validation and the approval state machine.
//!
//! Transactions enter as `Draft` (or directly `Pending`), must satisfy the
//! double-entry balance check, and only affect ledger balances once
//! `Approved`. `Approved` and `Rejected` are terminal.

pub mod error;
pub mod service;
pub mod types;
pub mod validation;

pub use error::JournalError;
pub use service::JournalService;
pub use types::{
    CreateTransactionInput, EntryInput, PostedEntry, Transaction, TransactionFilter,
    TransactionStatus, TransactionType,
};
pub use validation::validate_entries;
