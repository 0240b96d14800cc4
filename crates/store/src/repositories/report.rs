//! Report repository: point-in-time snapshot reads.
//!
//! Each method captures ledgers and posted entries under a single read
//! guard, then hands both to the pure report builders. A report can never
//! observe a half-applied mutation.

use chrono::NaiveDate;

use storebooks_core::journal::TransactionType;
use storebooks_core::ledger::balance_as_of;
use storebooks_core::reports::{
    BalanceSheetReport, DayBookReport, LedgerStatement, ProfitLossReport, ReportService,
    TrialBalanceReport,
};
use storebooks_shared::types::{LedgerId, Money};

use crate::Store;

use super::account::AccountError;

/// Repository for read-side reports.
#[derive(Debug, Clone)]
pub struct ReportRepository {
    store: Store,
    currency: String,
}

impl ReportRepository {
    /// Creates a new report repository over the shared store.
    #[must_use]
    pub fn new(store: Store, currency: String) -> Self {
        Self { store, currency }
    }

    /// Day book over a date range, optionally filtered by transaction type
    /// and ledger.
    pub async fn day_book(
        &self,
        start: NaiveDate,
        end: NaiveDate,
        type_filter: Option<TransactionType>,
        ledger_filter: Option<LedgerId>,
    ) -> DayBookReport {
        let inner = self.store.read().await;
        ReportService::day_book(
            start,
            end,
            type_filter,
            ledger_filter,
            &self.currency,
            &inner.ledger_contexts(),
            &inner.posted_entries(),
        )
    }

    /// Statement of one ledger over a date range.
    ///
    /// # Errors
    ///
    /// Returns `LedgerNotFound` for unknown ledgers.
    pub async fn ledger_statement(
        &self,
        ledger_id: LedgerId,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<LedgerStatement, AccountError> {
        let inner = self.store.read().await;
        let contexts = inner.ledger_contexts();
        let context = contexts
            .iter()
            .find(|c| c.ledger.id == ledger_id)
            .ok_or(AccountError::LedgerNotFound(ledger_id))?;

        Ok(ReportService::ledger_statement(
            context,
            start,
            end,
            &self.currency,
            &inner.posted_entries(),
        ))
    }

    /// Trial balance as of a date.
    pub async fn trial_balance(&self, as_of: NaiveDate) -> TrialBalanceReport {
        let inner = self.store.read().await;
        ReportService::trial_balance(
            as_of,
            &self.currency,
            &inner.ledger_contexts(),
            &inner.posted_entries(),
        )
    }

    /// Profit & loss over a date range.
    pub async fn profit_loss(&self, start: NaiveDate, end: NaiveDate) -> ProfitLossReport {
        let inner = self.store.read().await;
        ReportService::profit_loss(
            start,
            end,
            &self.currency,
            &inner.ledger_contexts(),
            &inner.posted_entries(),
        )
    }

    /// Balance sheet as of a date.
    pub async fn balance_sheet(&self, as_of: NaiveDate) -> BalanceSheetReport {
        let inner = self.store.read().await;
        ReportService::balance_sheet(
            as_of,
            &self.currency,
            &inner.ledger_contexts(),
            &inner.posted_entries(),
        )
    }

    /// Derived balance of one ledger as of a date, for the reconciler.
    ///
    /// # Errors
    ///
    /// Returns `LedgerNotFound` for unknown ledgers.
    pub async fn ledger_balance_as_of(
        &self,
        ledger_id: LedgerId,
        as_of: NaiveDate,
    ) -> Result<Money, AccountError> {
        let inner = self.store.read().await;
        let ledger = inner
            .ledgers
            .get(&ledger_id)
            .ok_or(AccountError::LedgerNotFound(ledger_id))?;
        let group = inner
            .groups
            .get(&ledger.group_id)
            .ok_or(AccountError::GroupNotFound(ledger.group_id))?;

        Ok(balance_as_of(
            ledger.opening_balance,
            group.account_type.normal_balance(),
            inner
                .posted_entries()
                .iter()
                .filter(|e| e.entry.ledger_id == ledger_id)
                .map(|e| (e.date, e.entry.entry_type, e.entry.amount)),
            as_of,
        ))
    }
}
