//! Shared ledger/transaction store and repositories.
//!
//! The durable storage adapter sits outside this engine; this crate provides
//! the store contract the rest of the system programs against: all mutations
//! run as single atomic units inside one write-guard critical section, status
//! transitions are guarded by the current status (so exactly one concurrent
//! approver wins), and reads capture one consistent point-in-time snapshot.

pub mod repositories;

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::RwLock;

use storebooks_core::journal::{PostedEntry, Transaction, TransactionStatus};
use storebooks_core::ledger::{AccountGroup, Ledger};
use storebooks_core::reports::LedgerContext;
use storebooks_shared::types::{AccountGroupId, LedgerId, TransactionId};

/// The shared store handle. Cheap to clone; all clones see the same state.
#[derive(Debug, Clone, Default)]
pub struct Store {
    inner: Arc<RwLock<StoreInner>>,
}

/// Store state behind the lock.
#[derive(Debug, Default)]
pub(crate) struct StoreInner {
    pub(crate) groups: HashMap<AccountGroupId, AccountGroup>,
    pub(crate) ledgers: HashMap<LedgerId, Ledger>,
    pub(crate) transactions: HashMap<TransactionId, Transaction>,
    /// Monotonic insertion counter; `(date, seq)` is the posting order.
    pub(crate) next_seq: u64,
}

impl Store {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) async fn read(&self) -> tokio::sync::RwLockReadGuard<'_, StoreInner> {
        self.inner.read().await
    }

    pub(crate) async fn write(&self) -> tokio::sync::RwLockWriteGuard<'_, StoreInner> {
        self.inner.write().await
    }
}

impl StoreInner {
    /// Claims the next insertion sequence number.
    pub(crate) fn claim_seq(&mut self) -> u64 {
        self.next_seq += 1;
        self.next_seq
    }

    /// Every ledger joined with its owning group.
    pub(crate) fn ledger_contexts(&self) -> Vec<LedgerContext> {
        self.ledgers
            .values()
            .filter_map(|ledger| {
                self.groups.get(&ledger.group_id).map(|group| LedgerContext {
                    ledger: ledger.clone(),
                    group: group.clone(),
                })
            })
            .collect()
    }

    /// Entries of approved transactions, joined with the transaction
    /// fields the balance calculator and reports need.
    pub(crate) fn posted_entries(&self) -> Vec<PostedEntry> {
        self.transactions
            .values()
            .filter(|tx| tx.status == TransactionStatus::Approved)
            .flat_map(|tx| {
                tx.entries.iter().map(|entry| PostedEntry {
                    entry: entry.clone(),
                    date: tx.date,
                    seq: tx.seq,
                    transaction_type: tx.transaction_type,
                    description: tx.description.clone(),
                })
            })
            .collect()
    }
}
