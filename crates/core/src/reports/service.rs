//! Report generation over ledger/journal snapshots.
//!
//! Each builder takes the full set of ledgers (with groups) and the entries
//! of approved transactions, applies its own filters, and produces a report.
//! Callers are expected to capture both inputs from one consistent snapshot.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use std::collections::HashMap;
use storebooks_shared::types::{AccountGroupId, LedgerId, Money};

use super::types::{
    BalanceSheetReport, BalanceSheetRow, DayBookEntry, DayBookReport, LedgerContext,
    LedgerStatement, LedgerStatementEntry, ProfitLossReport, ProfitLossRow, TrialBalanceReport,
    TrialBalanceRow,
};
use crate::journal::{PostedEntry, TransactionType};
use crate::ledger::{AccountType, RunningBalance, balance_as_of, signed_amount};

/// Service for generating financial reports.
pub struct ReportService;

impl ReportService {
    /// Builds the day book: every posted entry in range, in `(date, seq)`
    /// order, annotated with its own ledger's balance at that point in the
    /// full posting history (unaffected by the report filters).
    #[must_use]
    pub fn day_book(
        start: NaiveDate,
        end: NaiveDate,
        type_filter: Option<TransactionType>,
        ledger_filter: Option<LedgerId>,
        currency: &str,
        ledgers: &[LedgerContext],
        entries: &[PostedEntry],
    ) -> DayBookReport {
        let by_ledger: HashMap<LedgerId, &LedgerContext> =
            ledgers.iter().map(|c| (c.ledger.id, c)).collect();

        let mut sorted: Vec<&PostedEntry> = entries.iter().collect();
        sorted.sort_by_key(|e| (e.date, e.seq));

        let mut running: HashMap<LedgerId, Money> = ledgers
            .iter()
            .map(|c| (c.ledger.id, c.ledger.opening_balance))
            .collect();

        let mut rows = Vec::new();
        let mut total_debit = Money::ZERO;
        let mut total_credit = Money::ZERO;

        for posted in sorted {
            let Some(context) = by_ledger.get(&posted.entry.ledger_id) else {
                continue;
            };
            let normal = context.group.account_type.normal_balance();

            let balance = running
                .entry(posted.entry.ledger_id)
                .or_insert(context.ledger.opening_balance);
            *balance += signed_amount(normal, posted.entry.entry_type, posted.entry.amount);
            let balance = *balance;

            if posted.date < start || posted.date > end {
                continue;
            }
            if type_filter.is_some_and(|t| t != posted.transaction_type) {
                continue;
            }
            if ledger_filter.is_some_and(|l| l != posted.entry.ledger_id) {
                continue;
            }

            total_debit += posted.entry.debit();
            total_credit += posted.entry.credit();

            rows.push(DayBookEntry {
                id: posted.entry.id,
                transaction_id: posted.entry.transaction_id,
                date: posted.date,
                transaction_type: posted.transaction_type,
                description: entry_description(posted),
                ledger_id: posted.entry.ledger_id,
                ledger_name: context.ledger.name.clone(),
                group_name: context.group.name.clone(),
                entry_type: posted.entry.entry_type,
                amount: posted.entry.amount,
                running_balance: balance,
            });
        }

        let in_scope: Vec<&LedgerContext> = ledgers
            .iter()
            .filter(|c| match ledger_filter {
                Some(id) => c.ledger.id == id,
                None => c.ledger.is_active,
            })
            .collect();

        let opening_balance = in_scope
            .iter()
            .map(|c| balance_before(c, entries, start))
            .sum();
        let closing_balance = in_scope
            .iter()
            .map(|c| ledger_balance(c, entries, end))
            .sum();

        DayBookReport {
            start_date: start,
            end_date: end,
            currency: currency.to_string(),
            entries: rows,
            total_debit,
            total_credit,
            opening_balance,
            closing_balance,
        }
    }

    /// Builds the statement of one ledger over a range, with per-entry
    /// running balance seeded from the balance the day before the range.
    #[must_use]
    pub fn ledger_statement(
        context: &LedgerContext,
        start: NaiveDate,
        end: NaiveDate,
        currency: &str,
        entries: &[PostedEntry],
    ) -> LedgerStatement {
        let normal = context.group.account_type.normal_balance();

        let mut ledger_entries: Vec<&PostedEntry> = entries
            .iter()
            .filter(|e| e.entry.ledger_id == context.ledger.id)
            .collect();
        ledger_entries.sort_by_key(|e| (e.date, e.seq));

        let opening_balance = balance_before(context, entries, start);

        let mut walk = RunningBalance::seed(opening_balance);
        let mut rows = Vec::new();
        let mut total_debit = Money::ZERO;
        let mut total_credit = Money::ZERO;

        for posted in ledger_entries {
            if posted.date < start || posted.date > end {
                continue;
            }

            walk = walk.apply(signed_amount(
                normal,
                posted.entry.entry_type,
                posted.entry.amount,
            ));
            total_debit += posted.entry.debit();
            total_credit += posted.entry.credit();

            rows.push(LedgerStatementEntry {
                id: posted.entry.id,
                transaction_id: posted.entry.transaction_id,
                date: posted.date,
                description: entry_description(posted),
                debit: posted.entry.debit(),
                credit: posted.entry.credit(),
                balance: walk.current_balance,
            });
        }

        LedgerStatement {
            ledger_id: context.ledger.id,
            ledger_name: context.ledger.name.clone(),
            group_name: context.group.name.clone(),
            start_date: start,
            end_date: end,
            currency: currency.to_string(),
            opening_balance,
            entries: rows,
            total_debit,
            total_credit,
            closing_balance: walk.current_balance,
        }
    }

    /// Builds the trial balance over every active ledger as of a date.
    ///
    /// `is_balanced == false` in the result is an invariant violation (every
    /// posted transaction was individually balanced), not a business state.
    #[must_use]
    pub fn trial_balance(
        as_of: NaiveDate,
        currency: &str,
        ledgers: &[LedgerContext],
        entries: &[PostedEntry],
    ) -> TrialBalanceReport {
        let mut rows = Vec::new();
        let mut total_debit = Money::ZERO;
        let mut total_credit = Money::ZERO;

        for context in ledgers.iter().filter(|c| c.ledger.is_active) {
            let mut debit_total = Money::ZERO;
            let mut credit_total = Money::ZERO;
            for posted in entries
                .iter()
                .filter(|e| e.entry.ledger_id == context.ledger.id && e.date <= as_of)
            {
                debit_total += posted.entry.debit();
                credit_total += posted.entry.credit();
            }

            let normal = context.group.account_type.normal_balance();
            let closing_balance = context.ledger.opening_balance
                + normal.balance_change(debit_total, credit_total);

            total_debit += debit_total;
            total_credit += credit_total;

            rows.push(TrialBalanceRow {
                ledger_id: context.ledger.id,
                ledger_name: context.ledger.name.clone(),
                group_name: context.group.name.clone(),
                group_type: context.group.account_type,
                opening_balance: context.ledger.opening_balance,
                debit_total,
                credit_total,
                closing_balance,
            });
        }

        rows.sort_by(|a, b| {
            (a.group_type.as_str(), &a.group_name, &a.ledger_name)
                .cmp(&(b.group_type.as_str(), &b.group_name, &b.ledger_name))
        });

        TrialBalanceReport {
            as_of_date: as_of,
            currency: currency.to_string(),
            rows,
            total_debit,
            total_credit,
            is_balanced: total_debit == total_credit,
        }
    }

    /// Builds the profit & loss report: income and expense activity in
    /// range, grouped by account group.
    #[must_use]
    pub fn profit_loss(
        start: NaiveDate,
        end: NaiveDate,
        currency: &str,
        ledgers: &[LedgerContext],
        entries: &[PostedEntry],
    ) -> ProfitLossReport {
        let mut income_nets: HashMap<AccountGroupId, (String, Money)> = HashMap::new();
        let mut expense_nets: HashMap<AccountGroupId, (String, Money)> = HashMap::new();

        for context in ledgers.iter().filter(|c| c.ledger.is_active) {
            let section = match context.group.account_type {
                AccountType::Income => &mut income_nets,
                AccountType::Expense => &mut expense_nets,
                _ => continue,
            };

            let mut debit = Money::ZERO;
            let mut credit = Money::ZERO;
            for posted in entries.iter().filter(|e| {
                e.entry.ledger_id == context.ledger.id && e.date >= start && e.date <= end
            }) {
                debit += posted.entry.debit();
                credit += posted.entry.credit();
            }

            let net = context
                .group
                .account_type
                .normal_balance()
                .balance_change(debit, credit);

            let slot = section
                .entry(context.group.id)
                .or_insert_with(|| (context.group.name.clone(), Money::ZERO));
            slot.1 += net;
        }

        // Only groups with positive net activity appear in the report.
        let income = positive_rows(section_rows(income_nets));
        let expenses = positive_rows(section_rows(expense_nets));

        let total_income: Money = income.iter().map(|(_, _, amount)| *amount).sum();
        let total_expenses: Money = expenses.iter().map(|(_, _, amount)| *amount).sum();
        let total_cost_of_goods: Money = expenses
            .iter()
            .filter(|(_, name, _)| is_cost_of_goods(name))
            .map(|(_, _, amount)| *amount)
            .sum();

        let net_profit = total_income - total_expenses;
        let gross_margin = if total_income.is_positive() {
            ratio_percent(total_income - total_cost_of_goods, total_income)
        } else {
            Decimal::ZERO
        };

        let to_rows = |section: Vec<(AccountGroupId, String, Money)>| -> Vec<ProfitLossRow> {
            section
                .into_iter()
                .map(|(group_id, group_name, amount)| ProfitLossRow {
                    group_id,
                    group_name,
                    amount,
                    percentage: ratio_percent(amount, total_income),
                })
                .collect()
        };

        ProfitLossReport {
            start_date: start,
            end_date: end,
            currency: currency.to_string(),
            income: to_rows(income),
            expenses: to_rows(expenses),
            total_income,
            total_expenses,
            total_cost_of_goods,
            net_profit,
            gross_margin,
        }
    }

    /// Builds the balance sheet as of a date.
    ///
    /// Income/Expense activity through the date is folded into equity as a
    /// derived "Current period earnings" line, so assets equal liabilities
    /// plus equity without an explicit closing entry. `is_balanced == false`
    /// is an invariant violation.
    #[must_use]
    pub fn balance_sheet(
        as_of: NaiveDate,
        currency: &str,
        ledgers: &[LedgerContext],
        entries: &[PostedEntry],
    ) -> BalanceSheetReport {
        let mut assets: HashMap<AccountGroupId, (String, Money)> = HashMap::new();
        let mut liabilities: HashMap<AccountGroupId, (String, Money)> = HashMap::new();
        let mut equity: HashMap<AccountGroupId, (String, Money)> = HashMap::new();
        let mut earnings = Money::ZERO;

        for context in ledgers.iter().filter(|c| c.ledger.is_active) {
            let balance = ledger_balance(context, entries, as_of);

            match context.group.account_type {
                AccountType::Asset => &mut assets,
                AccountType::Liability => &mut liabilities,
                AccountType::Equity => &mut equity,
                AccountType::Income => {
                    earnings += balance;
                    continue;
                }
                AccountType::Expense => {
                    earnings -= balance;
                    continue;
                }
            }
            .entry(context.group.id)
            .or_insert_with(|| (context.group.name.clone(), Money::ZERO))
            .1 += balance;
        }

        let mut equity_rows = section_rows(equity);
        if !earnings.is_zero() {
            equity_rows.push((
                AccountGroupId::from_uuid(uuid::Uuid::nil()),
                "Current period earnings".to_string(),
                earnings,
            ));
        }

        let asset_rows = section_rows(assets);
        let liability_rows = section_rows(liabilities);

        let total_assets: Money = asset_rows.iter().map(|(_, _, a)| *a).sum();
        let total_liabilities: Money = liability_rows.iter().map(|(_, _, a)| *a).sum();
        let total_equity: Money = equity_rows.iter().map(|(_, _, a)| *a).sum();

        let section = |rows: Vec<(AccountGroupId, String, Money)>,
                       total: Money|
         -> Vec<BalanceSheetRow> {
            rows.into_iter()
                .map(|(group_id, name, amount)| BalanceSheetRow {
                    // The derived earnings line carries the nil sentinel.
                    group_id: (!group_id.into_inner().is_nil()).then_some(group_id),
                    name,
                    amount,
                    percentage: ratio_percent(amount, total),
                })
                .collect()
        };

        BalanceSheetReport {
            as_of_date: as_of,
            currency: currency.to_string(),
            assets: section(asset_rows, total_assets),
            liabilities: section(liability_rows, total_liabilities),
            equity: section(equity_rows, total_equity),
            total_assets,
            total_liabilities,
            total_equity,
            is_balanced: total_assets == total_liabilities + total_equity,
        }
    }
}

/// Transaction description with the entry's own description as fallback.
fn entry_description(posted: &PostedEntry) -> String {
    if posted.description.is_empty() {
        posted.entry.description.clone().unwrap_or_default()
    } else {
        posted.description.clone()
    }
}

/// Balance of a ledger as of the day before `start` (opening balance when
/// `start` has no predecessor).
fn balance_before(context: &LedgerContext, entries: &[PostedEntry], start: NaiveDate) -> Money {
    match start.pred_opt() {
        Some(prev) => ledger_balance(context, entries, prev),
        None => context.ledger.opening_balance,
    }
}

/// Balance of a ledger as of a date.
fn ledger_balance(context: &LedgerContext, entries: &[PostedEntry], as_of: NaiveDate) -> Money {
    balance_as_of(
        context.ledger.opening_balance,
        context.group.account_type.normal_balance(),
        entries
            .iter()
            .filter(|e| e.entry.ledger_id == context.ledger.id)
            .map(|e| (e.date, e.entry.entry_type, e.entry.amount)),
        as_of,
    )
}

/// Collapses a per-group accumulator into non-zero rows, largest first.
///
/// Zero nets are omitted (a group with no activity carries no information);
/// negative nets are kept so section totals stay exact.
fn section_rows(
    nets: HashMap<AccountGroupId, (String, Money)>,
) -> Vec<(AccountGroupId, String, Money)> {
    let mut rows: Vec<(AccountGroupId, String, Money)> = nets
        .into_iter()
        .filter(|(_, (_, amount))| !amount.is_zero())
        .map(|(id, (name, amount))| (id, name, amount))
        .collect();
    rows.sort_by(|a, b| b.2.cmp(&a.2).then_with(|| a.1.cmp(&b.1)));
    rows
}

fn positive_rows(
    rows: Vec<(AccountGroupId, String, Money)>,
) -> Vec<(AccountGroupId, String, Money)> {
    rows.into_iter()
        .filter(|(_, _, amount)| amount.is_positive())
        .collect()
}

/// `part / whole * 100` as an exact decimal, zero when `whole` is zero.
fn ratio_percent(part: Money, whole: Money) -> Decimal {
    if whole.is_zero() {
        Decimal::ZERO
    } else {
        Decimal::from(part.minor()) / Decimal::from(whole.minor()) * Decimal::ONE_HUNDRED
    }
}

fn is_cost_of_goods(name: &str) -> bool {
    let lower = name.to_lowercase();
    lower.contains("cost of goods") || lower.contains("cogs")
}
