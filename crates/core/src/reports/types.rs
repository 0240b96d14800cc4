//! Report data types.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use storebooks_shared::types::{
    AccountGroupId, EntryId, LedgerId, Money, TransactionId,
};

use crate::ledger::{AccountGroup, AccountType, EntryType, Ledger};
use crate::journal::TransactionType;

/// A ledger joined with its owning group, as reports consume it.
#[derive(Debug, Clone)]
pub struct LedgerContext {
    /// The ledger.
    pub ledger: Ledger,
    /// The group the ledger belongs to.
    pub group: AccountGroup,
}

/// One line of the day book.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DayBookEntry {
    /// Entry ID.
    pub id: EntryId,
    /// Owning transaction ID.
    pub transaction_id: TransactionId,
    /// Posting date.
    pub date: NaiveDate,
    /// Transaction type.
    pub transaction_type: TransactionType,
    /// Transaction description (entry description as fallback).
    pub description: String,
    /// Ledger posted to.
    pub ledger_id: LedgerId,
    /// Ledger name.
    pub ledger_name: String,
    /// Owning group name.
    pub group_name: String,
    /// Debit or credit.
    pub entry_type: EntryType,
    /// Amount in minor units.
    pub amount: Money,
    /// The entry's own ledger balance after this entry, across all
    /// approved activity (not just the filtered view).
    pub running_balance: Money,
}

/// Day book report: all entries across ledgers in a date range.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DayBookReport {
    /// Range start (inclusive).
    pub start_date: NaiveDate,
    /// Range end (inclusive).
    pub end_date: NaiveDate,
    /// Posting currency code.
    pub currency: String,
    /// Entries in `(date, insertion order)` sequence.
    pub entries: Vec<DayBookEntry>,
    /// Sum of displayed debit amounts.
    pub total_debit: Money,
    /// Sum of displayed credit amounts.
    pub total_credit: Money,
    /// Sum of in-scope ledgers' balances the day before the range.
    pub opening_balance: Money,
    /// Sum of in-scope ledgers' balances at range end.
    pub closing_balance: Money,
}

/// One line of a ledger statement.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LedgerStatementEntry {
    /// Entry ID.
    pub id: EntryId,
    /// Owning transaction ID (serves as the reference).
    pub transaction_id: TransactionId,
    /// Posting date.
    pub date: NaiveDate,
    /// Transaction description (entry description as fallback).
    pub description: String,
    /// Debit amount (zero for credit entries).
    pub debit: Money,
    /// Credit amount (zero for debit entries).
    pub credit: Money,
    /// Ledger balance after this entry.
    pub balance: Money,
}

/// Statement of one ledger over a date range.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LedgerStatement {
    /// The ledger.
    pub ledger_id: LedgerId,
    /// Ledger name.
    pub ledger_name: String,
    /// Owning group name.
    pub group_name: String,
    /// Range start (inclusive).
    pub start_date: NaiveDate,
    /// Range end (inclusive).
    pub end_date: NaiveDate,
    /// Posting currency code.
    pub currency: String,
    /// Balance at the day before the range start.
    pub opening_balance: Money,
    /// Entries with per-entry running balance.
    pub entries: Vec<LedgerStatementEntry>,
    /// Sum of debit amounts in range.
    pub total_debit: Money,
    /// Sum of credit amounts in range.
    pub total_credit: Money,
    /// Balance at range end.
    pub closing_balance: Money,
}

/// One ledger row of the trial balance.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrialBalanceRow {
    /// The ledger.
    pub ledger_id: LedgerId,
    /// Ledger name.
    pub ledger_name: String,
    /// Owning group name.
    pub group_name: String,
    /// Owning group type.
    pub group_type: AccountType,
    /// Opening balance.
    pub opening_balance: Money,
    /// Total debits through the as-of date.
    pub debit_total: Money,
    /// Total credits through the as-of date.
    pub credit_total: Money,
    /// Closing balance (normal-balance signed).
    pub closing_balance: Money,
}

/// Trial balance as of a date.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrialBalanceReport {
    /// As-of date (inclusive).
    pub as_of_date: NaiveDate,
    /// Posting currency code.
    pub currency: String,
    /// Per-ledger rows, sorted by (group type, group name, ledger name).
    pub rows: Vec<TrialBalanceRow>,
    /// Sum of all debit totals.
    pub total_debit: Money,
    /// Sum of all credit totals.
    pub total_credit: Money,
    /// Whether debits equal credits. `false` signals a data-integrity
    /// fault, never a legitimate business state.
    pub is_balanced: bool,
}

/// One account-group row of the profit & loss report.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfitLossRow {
    /// The account group.
    pub group_id: AccountGroupId,
    /// Group name.
    pub group_name: String,
    /// Net activity in range (always positive; zero/negative nets are
    /// omitted from the report).
    pub amount: Money,
    /// Share of total income, in percent.
    pub percentage: Decimal,
}

/// Profit & loss over a date range.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfitLossReport {
    /// Range start (inclusive).
    pub start_date: NaiveDate,
    /// Range end (inclusive).
    pub end_date: NaiveDate,
    /// Posting currency code.
    pub currency: String,
    /// Income groups, largest first.
    pub income: Vec<ProfitLossRow>,
    /// Expense groups, largest first.
    pub expenses: Vec<ProfitLossRow>,
    /// Total income in range.
    pub total_income: Money,
    /// Total expenses in range.
    pub total_expenses: Money,
    /// Total of cost-of-goods expense groups in range.
    pub total_cost_of_goods: Money,
    /// `total_income - total_expenses`.
    pub net_profit: Money,
    /// `(total_income - total_cost_of_goods) / total_income * 100`,
    /// zero when there is no income.
    pub gross_margin: Decimal,
}

/// One row of a balance sheet section.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BalanceSheetRow {
    /// The account group, absent for the derived earnings line.
    pub group_id: Option<AccountGroupId>,
    /// Row name.
    pub name: String,
    /// Closing balance (normal-balance signed).
    pub amount: Money,
    /// Share of the section total, in percent.
    pub percentage: Decimal,
}

/// Balance sheet as of a date.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BalanceSheetReport {
    /// As-of date (inclusive).
    pub as_of_date: NaiveDate,
    /// Posting currency code.
    pub currency: String,
    /// Asset groups, largest first.
    pub assets: Vec<BalanceSheetRow>,
    /// Liability groups, largest first.
    pub liabilities: Vec<BalanceSheetRow>,
    /// Equity groups plus the derived current-period earnings line.
    pub equity: Vec<BalanceSheetRow>,
    /// Sum of asset rows.
    pub total_assets: Money,
    /// Sum of liability rows.
    pub total_liabilities: Money,
    /// Sum of equity rows.
    pub total_equity: Money,
    /// Whether assets equal liabilities plus equity. `false` signals a
    /// data-integrity fault, never a legitimate business state.
    pub is_balanced: bool,
}
