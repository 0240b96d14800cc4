//! Financial report builders.
//!
//! All reports are pure read-side computations over a point-in-time snapshot
//! of ledgers and approved entries. They never mutate balances.

pub mod service;
pub mod types;


pub use service::ReportService;
pub use types::{
    BalanceSheetReport, BalanceSheetRow, DayBookEntry, DayBookReport, LedgerContext,
    LedgerStatement, LedgerStatementEntry, ProfitLossReport, ProfitLossRow, TrialBalanceReport,
    TrialBalanceRow,
};
