//! End-to-end report behavior over the repositories.

use chrono::NaiveDate;
use storebooks_core::journal::{
    CreateTransactionInput, EntryInput, TransactionType,
};
use storebooks_core::ledger::{AccountType, EntryType};
use storebooks_shared::types::{LedgerId, Money, TransactionId, UserId};
use storebooks_store::Store;
use storebooks_store::repositories::account::{
    CreateAccountGroupInput, CreateLedgerInput, LedgerFilter,
};
use storebooks_store::repositories::{AccountRepository, ReportRepository, TransactionRepository};

struct World {
    store: Store,
    cash: LedgerId,
    sales: LedgerId,
}

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

async fn setup() -> World {
    let store = Store::new();
    let accounts = AccountRepository::new(store.clone());

    let assets = accounts
        .create_group(CreateAccountGroupInput {
            name: "Assets".into(),
            account_type: AccountType::Asset,
            description: None,
        })
        .await
        .unwrap();
    let income = accounts
        .create_group(CreateAccountGroupInput {
            name: "Sales".into(),
            account_type: AccountType::Income,
            description: None,
        })
        .await
        .unwrap();

    let cash = accounts
        .create_ledger(CreateLedgerInput {
            name: "Cash".into(),
            group_id: assets.id,
            opening_balance: Money::from_minor(10_000),
            description: None,
            created_by: UserId::new(),
        })
        .await
        .unwrap();
    let sales = accounts
        .create_ledger(CreateLedgerInput {
            name: "Sales".into(),
            group_id: income.id,
            opening_balance: Money::ZERO,
            description: None,
            created_by: UserId::new(),
        })
        .await
        .unwrap();

    World {
        store,
        cash: cash.id,
        sales: sales.id,
    }
}

async fn sale(world: &World, amount: i64, on: NaiveDate) -> TransactionId {
    let repo = TransactionRepository::new(world.store.clone());
    repo.create_transaction(CreateTransactionInput {
        date: on,
        transaction_type: TransactionType::Receipt,
        description: "cash sale".into(),
        notes: None,
        entries: vec![
            EntryInput {
                ledger_id: world.cash,
                entry_type: EntryType::Debit,
                amount: Money::from_minor(amount),
                description: None,
            },
            EntryInput {
                ledger_id: world.sales,
                entry_type: EntryType::Credit,
                amount: Money::from_minor(amount),
                description: None,
            },
        ],
        created_by: UserId::new(),
        submit: false,
    })
    .await
    .unwrap()
    .id
}

/// Scenario A: approved 5000 sale against Cash opening 10000.
#[tokio::test]
async fn approved_sale_moves_cash_and_balances_trial() {
    let world = setup().await;
    let tx = sale(&world, 5_000, date(2026, 3, 10)).await;
    TransactionRepository::new(world.store.clone())
        .approve(tx)
        .await
        .unwrap();

    let reports = ReportRepository::new(world.store.clone(), "INR".into());
    let balance = reports
        .ledger_balance_as_of(world.cash, date(2026, 12, 31))
        .await
        .unwrap();
    assert_eq!(balance, Money::from_minor(15_000));

    let trial = reports.trial_balance(date(2026, 12, 31)).await;
    assert!(trial.is_balanced);
    assert_eq!(trial.total_debit, Money::from_minor(5_000));
    assert_eq!(trial.total_credit, Money::from_minor(5_000));
}

#[tokio::test]
async fn draft_and_rejected_transactions_never_affect_balances() {
    let world = setup().await;
    let reports = ReportRepository::new(world.store.clone(), "INR".into());
    let as_of = date(2026, 12, 31);

    let before = reports.ledger_balance_as_of(world.cash, as_of).await.unwrap();

    // A draft sits outside the books.
    let draft = sale(&world, 4_000, date(2026, 3, 12)).await;
    let after_draft = reports.ledger_balance_as_of(world.cash, as_of).await.unwrap();
    assert_eq!(before, after_draft);

    // A rejection keeps it outside, retroactively and permanently.
    TransactionRepository::new(world.store.clone())
        .reject(draft)
        .await
        .unwrap();
    let after_reject = reports.ledger_balance_as_of(world.cash, as_of).await.unwrap();
    assert_eq!(before, after_reject);

    let trial = reports.trial_balance(as_of).await;
    assert_eq!(trial.total_debit, Money::ZERO);
}

/// Scenario C: a second approval attempt leaves balances identical.
#[tokio::test]
async fn approval_is_idempotent_on_balances() {
    let world = setup().await;
    let tx = sale(&world, 5_000, date(2026, 3, 10)).await;

    let repo = TransactionRepository::new(world.store.clone());
    let reports = ReportRepository::new(world.store.clone(), "INR".into());
    let as_of = date(2026, 12, 31);

    repo.approve(tx).await.unwrap();
    let after_first = reports.ledger_balance_as_of(world.cash, as_of).await.unwrap();

    let second = repo.approve(tx).await;
    assert!(second.is_err());

    let after_second = reports.ledger_balance_as_of(world.cash, as_of).await.unwrap();
    assert_eq!(after_first, after_second);
}

#[tokio::test]
async fn ledger_statement_closes_consistently() {
    let world = setup().await;
    let repo = TransactionRepository::new(world.store.clone());

    for (amount, day) in [(5_000, 5), (2_000, 12), (3_000, 20)] {
        let tx = sale(&world, amount, date(2026, 3, day)).await;
        repo.approve(tx).await.unwrap();
    }
    // Outside the window, seeds the opening balance.
    let early = sale(&world, 1_000, date(2026, 2, 10)).await;
    repo.approve(early).await.unwrap();

    let reports = ReportRepository::new(world.store.clone(), "INR".into());
    let statement = reports
        .ledger_statement(world.cash, date(2026, 3, 1), date(2026, 3, 31))
        .await
        .unwrap();

    assert_eq!(statement.opening_balance, Money::from_minor(11_000));
    assert_eq!(statement.entries.len(), 3);
    assert_eq!(
        statement.closing_balance,
        statement.opening_balance + Money::from_minor(10_000)
    );

    // Per-entry balances chain: each balance is the previous plus the entry.
    let mut previous = statement.opening_balance;
    for entry in &statement.entries {
        assert_eq!(entry.balance, previous + entry.debit - entry.credit);
        previous = entry.balance;
    }
}

#[tokio::test]
async fn day_book_covers_both_sides_of_a_sale() {
    let world = setup().await;
    let tx = sale(&world, 5_000, date(2026, 3, 10)).await;
    TransactionRepository::new(world.store.clone())
        .approve(tx)
        .await
        .unwrap();

    let reports = ReportRepository::new(world.store.clone(), "INR".into());
    let day_book = reports
        .day_book(date(2026, 3, 1), date(2026, 3, 31), None, None)
        .await;

    assert_eq!(day_book.entries.len(), 2);
    assert_eq!(day_book.total_debit, Money::from_minor(5_000));
    assert_eq!(day_book.total_credit, Money::from_minor(5_000));
    assert_eq!(
        day_book.closing_balance - day_book.opening_balance,
        Money::from_minor(10_000)
    );
}

#[tokio::test]
async fn ledger_listing_shows_derived_balances() {
    let world = setup().await;
    let tx = sale(&world, 5_000, date(2026, 3, 10)).await;
    TransactionRepository::new(world.store.clone())
        .approve(tx)
        .await
        .unwrap();

    let accounts = AccountRepository::new(world.store.clone());
    let ledgers = accounts.list_ledgers(LedgerFilter::default()).await;

    let cash = ledgers.iter().find(|l| l.ledger.name == "Cash").unwrap();
    assert_eq!(cash.current_balance, Money::from_minor(15_000));

    let sales_row = ledgers.iter().find(|l| l.ledger.name == "Sales").unwrap();
    assert_eq!(sales_row.current_balance, Money::from_minor(5_000));
}

#[tokio::test]
async fn ledger_balance_summary_reports_totals_and_recent_entries() {
    let world = setup().await;
    let repo = TransactionRepository::new(world.store.clone());
    for day in 1..=12 {
        let tx = sale(&world, 100, date(2026, 3, day)).await;
        repo.approve(tx).await.unwrap();
    }

    let accounts = AccountRepository::new(world.store.clone());
    let summary = accounts.ledger_balance(world.cash).await.unwrap();

    assert_eq!(summary.debit_total, Money::from_minor(1_200));
    assert_eq!(summary.credit_total, Money::ZERO);
    assert_eq!(summary.current_balance, Money::from_minor(11_200));
    assert_eq!(summary.recent_entries.len(), 10);
    // Newest first.
    assert_eq!(summary.recent_entries[0].date, date(2026, 3, 12));
}
