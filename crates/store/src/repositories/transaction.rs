//! Transaction repository: journal persistence and status transitions.
//!
//! Every mutation runs inside one write-guard critical section, so entry
//! insertion is all-or-nothing and approve/reject are status-guarded
//! conditional updates: a concurrent loser re-reads a terminal status and
//! gets `AlreadyTerminal` instead of double-applying.

use chrono::{NaiveDate, Utc};

use storebooks_core::journal::{
    CreateTransactionInput, EntryInput, JournalError, JournalService, Transaction,
    TransactionFilter, TransactionStatus, TransactionType, validate_entries,
};
use storebooks_core::ledger::TransactionEntry;
use storebooks_shared::types::{EntryId, TransactionId};

use crate::{Store, StoreInner};

/// Input for updating a transaction.
///
/// Header fields may change while the transaction is not terminal; entries
/// may only be replaced while it is still a draft.
#[derive(Debug, Clone, Default)]
pub struct UpdateTransactionInput {
    /// New posting date.
    pub date: Option<NaiveDate>,
    /// New transaction type.
    pub transaction_type: Option<TransactionType>,
    /// New description.
    pub description: Option<String>,
    /// New notes.
    pub notes: Option<String>,
    /// Replacement entries (re-validated as a whole).
    pub entries: Option<Vec<EntryInput>>,
}

/// Repository for journal transactions.
#[derive(Debug, Clone)]
pub struct TransactionRepository {
    store: Store,
}

impl TransactionRepository {
    /// Creates a new transaction repository over the shared store.
    #[must_use]
    pub fn new(store: Store) -> Self {
        Self { store }
    }

    /// Creates a transaction after validating the double-entry rules and
    /// ledger references. All entries are inserted atomically with the
    /// header, or nothing is.
    ///
    /// # Errors
    ///
    /// Returns a `JournalError` for any violated validation rule.
    pub async fn create_transaction(
        &self,
        input: CreateTransactionInput,
    ) -> Result<Transaction, JournalError> {
        validate_entries(&input.entries)?;

        let mut inner = self.store.write().await;
        check_ledgers(&inner, &input.entries)?;

        let id = TransactionId::new();
        let now = Utc::now();
        let entries = input
            .entries
            .iter()
            .map(|e| TransactionEntry {
                id: EntryId::new(),
                transaction_id: id,
                ledger_id: e.ledger_id,
                entry_type: e.entry_type,
                amount: e.amount,
                description: e.description.clone(),
            })
            .collect();

        let transaction = Transaction {
            id,
            date: input.date,
            transaction_type: input.transaction_type,
            description: input.description,
            status: if input.submit {
                TransactionStatus::Pending
            } else {
                TransactionStatus::Draft
            },
            notes: input.notes,
            created_by: input.created_by,
            created_at: now,
            updated_at: now,
            seq: inner.claim_seq(),
            entries,
        };

        inner.transactions.insert(id, transaction.clone());
        Ok(transaction)
    }

    /// Fetches one transaction with its entries.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` for unknown ids.
    pub async fn get_transaction(&self, id: TransactionId) -> Result<Transaction, JournalError> {
        let inner = self.store.read().await;
        inner
            .transactions
            .get(&id)
            .cloned()
            .ok_or(JournalError::NotFound(id))
    }

    /// Lists transactions matching the filter, ordered by `(date, seq)`
    /// ascending. The ordering is stable and deterministic: same-date
    /// transactions appear in insertion order.
    pub async fn list_transactions(&self, filter: TransactionFilter) -> Vec<Transaction> {
        let inner = self.store.read().await;
        let mut transactions: Vec<Transaction> = inner
            .transactions
            .values()
            .filter(|t| filter.status.is_none_or(|s| t.status == s))
            .filter(|t| filter.transaction_type.is_none_or(|ty| t.transaction_type == ty))
            .filter(|t| filter.date_from.is_none_or(|d| t.date >= d))
            .filter(|t| filter.date_to.is_none_or(|d| t.date <= d))
            .filter(|t| {
                filter
                    .ledger_id
                    .is_none_or(|l| t.entries.iter().any(|e| e.ledger_id == l))
            })
            .cloned()
            .collect();
        transactions.sort_by_key(|t| (t.date, t.seq));
        transactions
    }

    /// Updates a transaction per the lifecycle rules: header fields while
    /// not terminal, entry replacement only while draft.
    ///
    /// # Errors
    ///
    /// Returns `NotFound`, `EntriesLocked`, or a validation error for the
    /// replacement entries. On error the stored transaction is unchanged.
    pub async fn update_transaction(
        &self,
        id: TransactionId,
        input: UpdateTransactionInput,
    ) -> Result<Transaction, JournalError> {
        // Validate replacement entries before taking the write guard so a
        // rejected update leaves no partial state behind.
        if let Some(entries) = &input.entries {
            validate_entries(entries)?;
        }

        let mut inner = self.store.write().await;

        let current = inner
            .transactions
            .get(&id)
            .ok_or(JournalError::NotFound(id))?;
        if current.status.is_terminal() {
            return Err(JournalError::EntriesLocked {
                status: current.status,
            });
        }
        if input.entries.is_some() && !current.status.is_editable() {
            return Err(JournalError::EntriesLocked {
                status: current.status,
            });
        }
        if let Some(entries) = &input.entries {
            check_ledgers(&inner, entries)?;
        }

        let transaction = inner
            .transactions
            .get_mut(&id)
            .ok_or(JournalError::NotFound(id))?;

        if let Some(date) = input.date {
            transaction.date = date;
        }
        if let Some(transaction_type) = input.transaction_type {
            transaction.transaction_type = transaction_type;
        }
        if let Some(description) = input.description {
            transaction.description = description;
        }
        if let Some(notes) = input.notes {
            transaction.notes = Some(notes);
        }
        if let Some(entries) = input.entries {
            transaction.entries = entries
                .iter()
                .map(|e| TransactionEntry {
                    id: EntryId::new(),
                    transaction_id: id,
                    ledger_id: e.ledger_id,
                    entry_type: e.entry_type,
                    amount: e.amount,
                    description: e.description.clone(),
                })
                .collect();
        }
        transaction.updated_at = Utc::now();

        Ok(transaction.clone())
    }

    /// Deletes a draft transaction and its entries.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` or `OnlyDraftDeletable`.
    pub async fn delete_transaction(&self, id: TransactionId) -> Result<(), JournalError> {
        let mut inner = self.store.write().await;

        let status = inner
            .transactions
            .get(&id)
            .ok_or(JournalError::NotFound(id))?
            .status;
        if status != TransactionStatus::Draft {
            return Err(JournalError::OnlyDraftDeletable { status });
        }

        inner.transactions.remove(&id);
        Ok(())
    }

    /// Submits a draft transaction for approval.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` or the state-machine error for the current status.
    pub async fn submit(&self, id: TransactionId) -> Result<Transaction, JournalError> {
        self.transition(id, JournalService::submit).await
    }

    /// Approves a draft or pending transaction. The status check and the
    /// update happen in the same critical section, so concurrent approvals
    /// serialize and exactly one wins.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` or `AlreadyTerminal`.
    pub async fn approve(&self, id: TransactionId) -> Result<Transaction, JournalError> {
        self.transition(id, JournalService::approve).await
    }

    /// Rejects a draft or pending transaction. Terminal, no balance effect.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` or `AlreadyTerminal`.
    pub async fn reject(&self, id: TransactionId) -> Result<Transaction, JournalError> {
        self.transition(id, JournalService::reject).await
    }

    async fn transition(
        &self,
        id: TransactionId,
        step: fn(TransactionStatus) -> Result<TransactionStatus, JournalError>,
    ) -> Result<Transaction, JournalError> {
        let mut inner = self.store.write().await;
        let transaction = inner
            .transactions
            .get_mut(&id)
            .ok_or(JournalError::NotFound(id))?;

        transaction.status = step(transaction.status)?;
        transaction.updated_at = Utc::now();
        Ok(transaction.clone())
    }
}

/// Verifies that every referenced ledger exists and is active.
fn check_ledgers(inner: &StoreInner, entries: &[EntryInput]) -> Result<(), JournalError> {
    for entry in entries {
        let ledger = inner
            .ledgers
            .get(&entry.ledger_id)
            .ok_or(JournalError::UnknownLedger(entry.ledger_id))?;
        if !ledger.is_active {
            return Err(JournalError::InactiveLedger(entry.ledger_id));
        }
    }
    Ok(())
}
