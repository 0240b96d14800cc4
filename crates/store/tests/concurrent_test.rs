//! Concurrency tests: the status-guarded transition must serialize so that
//! exactly one concurrent decision wins.

use chrono::NaiveDate;
use storebooks_core::journal::{
    CreateTransactionInput, EntryInput, JournalError, TransactionType,
};
use storebooks_core::ledger::{AccountType, EntryType};
use storebooks_shared::types::{LedgerId, Money, TransactionId, UserId};
use storebooks_store::Store;
use storebooks_store::repositories::account::{CreateAccountGroupInput, CreateLedgerInput};
use storebooks_store::repositories::{AccountRepository, ReportRepository, TransactionRepository};

async fn seed_transaction(store: &Store) -> (TransactionId, LedgerId) {
    let accounts = AccountRepository::new(store.clone());
    let assets = accounts
        .create_group(CreateAccountGroupInput {
            name: "Current Assets".into(),
            account_type: AccountType::Asset,
            description: None,
        })
        .await
        .unwrap();
    let revenue = accounts
        .create_group(CreateAccountGroupInput {
            name: "Revenue".into(),
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
            group_id: revenue.id,
            opening_balance: Money::ZERO,
            description: None,
            created_by: UserId::new(),
        })
        .await
        .unwrap();

    let transactions = TransactionRepository::new(store.clone());
    let tx = transactions
        .create_transaction(CreateTransactionInput {
            date: NaiveDate::from_ymd_opt(2026, 3, 10).unwrap(),
            transaction_type: TransactionType::Journal,
            description: "contested".into(),
            notes: None,
            entries: vec![
                EntryInput {
                    ledger_id: cash.id,
                    entry_type: EntryType::Debit,
                    amount: Money::from_minor(5_000),
                    description: None,
                },
                EntryInput {
                    ledger_id: sales.id,
                    entry_type: EntryType::Credit,
                    amount: Money::from_minor(5_000),
                    description: None,
                },
            ],
            created_by: UserId::new(),
            submit: true,
        })
        .await
        .unwrap();

    (tx.id, cash.id)
}

#[tokio::test(flavor = "multi_thread", worker_threads = 8)]
async fn concurrent_approvals_serialize_to_one_winner() {
    let store = Store::new();
    let (tx_id, cash_id) = seed_transaction(&store).await;

    let mut handles = Vec::new();
    for _ in 0..16 {
        let repo = TransactionRepository::new(store.clone());
        handles.push(tokio::spawn(async move { repo.approve(tx_id).await }));
    }

    let mut winners = 0;
    let mut losers = 0;
    for handle in handles {
        match handle.await.unwrap() {
            Ok(_) => winners += 1,
            Err(JournalError::AlreadyTerminal { .. }) => losers += 1,
            Err(other) => panic!("unexpected error: {other}"),
        }
    }

    assert_eq!(winners, 1);
    assert_eq!(losers, 15);

    // The single approval applied exactly once.
    let reports = ReportRepository::new(store, "INR".into());
    let balance = reports
        .ledger_balance_as_of(cash_id, NaiveDate::from_ymd_opt(2026, 12, 31).unwrap())
        .await
        .unwrap();
    assert_eq!(balance, Money::from_minor(15_000));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 8)]
async fn concurrent_approve_and_reject_yield_one_terminal_state() {
    let store = Store::new();
    let (tx_id, _) = seed_transaction(&store).await;

    let approve_repo = TransactionRepository::new(store.clone());
    let reject_repo = TransactionRepository::new(store.clone());

    let approve = tokio::spawn(async move { approve_repo.approve(tx_id).await });
    let reject = tokio::spawn(async move { reject_repo.reject(tx_id).await });

    let results = [approve.await.unwrap(), reject.await.unwrap()];
    let wins = results.iter().filter(|r| r.is_ok()).count();
    let terminal_losses = results
        .iter()
        .filter(|r| matches!(r, Err(JournalError::AlreadyTerminal { .. })))
        .count();

    assert_eq!(wins, 1);
    assert_eq!(terminal_losses, 1);

    let final_status = TransactionRepository::new(store)
        .get_transaction(tx_id)
        .await
        .unwrap()
        .status;
    assert!(final_status.is_terminal());
}

#[tokio::test(flavor = "multi_thread", worker_threads = 8)]
async fn reads_run_against_consistent_snapshots() {
    let store = Store::new();
    let (tx_id, _) = seed_transaction(&store).await;

    // Trial balances taken while an approval lands must always balance:
    // either the transaction is fully absent or fully applied.
    let reports = ReportRepository::new(store.clone(), "INR".into());
    let as_of = NaiveDate::from_ymd_opt(2026, 12, 31).unwrap();

    let reader = tokio::spawn(async move {
        for _ in 0..100 {
            let report = reports.trial_balance(as_of).await;
            assert!(report.is_balanced, "trial balance must never tear");
        }
    });

    let writer = TransactionRepository::new(store);
    let approver = tokio::spawn(async move { writer.approve(tx_id).await });

    reader.await.unwrap();
    approver.await.unwrap().unwrap();
}
