//! Integration tests for the recurrence storage layer against a real
//! SQLite database in a temp directory.

use std::str::FromStr;
use std::sync::Arc;

use chrono::NaiveDate;
use rust_decimal_macros::dec;
use tempfile::TempDir;

use financeiq_core::recurrence::{
    Frequency, NewRecurrenceRule, PaymentMethod, RecurrenceRule, RecurrenceRuleRepositoryTrait,
    TransactionKind,
};
use financeiq_core::transactions::{Transaction, TransactionRepositoryTrait};
use financeiq_storage_sqlite::recurrence::RecurrenceRuleRepository;
use financeiq_storage_sqlite::transactions::TransactionRepository;
use financeiq_storage_sqlite::{create_pool, run_migrations, spawn_writer};

struct TestDb {
    // Held so the directory outlives the pool
    _dir: TempDir,
    rules: RecurrenceRuleRepository,
    transactions: TransactionRepository,
}

fn setup() -> TestDb {
    let dir = TempDir::new().unwrap();
    let db_path = dir.path().join("financeiq.db");
    let pool = create_pool(db_path.to_str().unwrap()).unwrap();
    run_migrations(&pool).unwrap();
    let writer = spawn_writer(pool.clone());
    TestDb {
        _dir: dir,
        rules: RecurrenceRuleRepository::new(pool.clone(), writer.clone()),
        transactions: TransactionRepository::new(pool, writer),
    }
}

fn d(y: i32, m: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, day).unwrap()
}

fn new_rule(id: &str, next_run: NaiveDate, active: bool) -> NewRecurrenceRule {
    NewRecurrenceRule {
        id: Some(id.to_string()),
        owner_id: "owner-1".to_string(),
        kind: TransactionKind::Expense,
        amount: dec!(49.99),
        category: "subscriptions".to_string(),
        description: Some("Cloud storage".to_string()),
        payment_method: Some(PaymentMethod::Card),
        frequency: Frequency::Monthly,
        next_run_date: next_run,
        is_active: active,
    }
}

async fn insert_rule(db: &TestDb, id: &str, next_run: NaiveDate, active: bool) -> RecurrenceRule {
    db.rules.insert_rule(new_rule(id, next_run, active)).await.unwrap()
}

#[tokio::test]
async fn due_query_filters_inactive_and_future_and_orders_deterministically() {
    let db = setup();
    insert_rule(&db, "late-b", d(2024, 1, 5), true).await;
    insert_rule(&db, "late-a", d(2024, 1, 5), true).await;
    insert_rule(&db, "early", d(2024, 1, 1), true).await;
    insert_rule(&db, "inactive", d(2023, 1, 1), false).await;
    insert_rule(&db, "future", d(2024, 2, 1), true).await;

    let due = db.rules.find_due_active_rules(d(2024, 1, 10)).unwrap();
    let ids: Vec<&str> = due.iter().map(|r| r.id.as_str()).collect();
    assert_eq!(ids, vec!["early", "late-a", "late-b"]);

    // Round-trip preserves typed fields
    let early = &due[0];
    assert_eq!(early.amount, dec!(49.99));
    assert_eq!(early.kind, TransactionKind::Expense);
    assert_eq!(early.frequency, Frequency::Monthly);
    assert_eq!(early.payment_method, Some(PaymentMethod::Card));
}

#[tokio::test]
async fn next_run_date_only_moves_forward() {
    let db = setup();
    insert_rule(&db, "rule-1", d(2024, 1, 15), true).await;

    let updated = db
        .rules
        .update_next_run_date("rule-1", d(2024, 2, 15))
        .await
        .unwrap();
    assert_eq!(updated.next_run_date, d(2024, 2, 15));

    // Same date again: refused, nothing changes
    let err = db
        .rules
        .update_next_run_date("rule-1", d(2024, 2, 15))
        .await
        .unwrap_err();
    assert!(err.to_string().contains("non-increasing"));

    // Regression: refused
    assert!(db
        .rules
        .update_next_run_date("rule-1", d(2024, 1, 20))
        .await
        .is_err());

    let due = db.rules.find_due_active_rules(d(2024, 12, 31)).unwrap();
    assert_eq!(due[0].next_run_date, d(2024, 2, 15));
}

#[tokio::test]
async fn update_next_run_date_for_missing_rule_is_not_found() {
    let db = setup();
    let err = db
        .rules
        .update_next_run_date("nope", d(2024, 2, 15))
        .await
        .unwrap_err();
    assert!(err.to_string().contains("not found"));
}

#[tokio::test]
async fn generated_transaction_insert_is_idempotent_per_rule_and_date() {
    let db = setup();
    let rule = insert_rule(&db, "rule-1", d(2024, 3, 1), true).await;

    let first = Transaction::from_rule(&rule);
    let second = Transaction::from_rule(&rule);
    assert_ne!(first.id, second.id);

    assert_eq!(db.transactions.insert_transaction(first).await.unwrap(), 1);
    // Same (source_rule_id, date), different transaction id: no-op
    assert_eq!(db.transactions.insert_transaction(second).await.unwrap(), 0);

    let stored = db.transactions.list_transactions_for_rule("rule-1").unwrap();
    assert_eq!(stored.len(), 1);
    assert_eq!(stored[0].date, d(2024, 3, 1));
    assert!(stored[0].is_recurring);
    assert_eq!(stored[0].source_rule_id.as_deref(), Some("rule-1"));
}

#[tokio::test]
async fn same_rule_different_dates_are_distinct_transactions() {
    let db = setup();
    let mut rule = insert_rule(&db, "rule-1", d(2024, 3, 1), true).await;

    assert_eq!(
        db.transactions
            .insert_transaction(Transaction::from_rule(&rule))
            .await
            .unwrap(),
        1
    );
    rule.next_run_date = d(2024, 4, 1);
    assert_eq!(
        db.transactions
            .insert_transaction(Transaction::from_rule(&rule))
            .await
            .unwrap(),
        1
    );

    let stored = db.transactions.list_transactions_for_rule("rule-1").unwrap();
    assert_eq!(stored.len(), 2);
    // Newest first
    assert_eq!(stored[0].date, d(2024, 4, 1));
    assert_eq!(stored[1].date, d(2024, 3, 1));
}

#[tokio::test]
async fn rule_crud_round_trip() {
    let db = setup();
    let rule = insert_rule(&db, "rule-1", d(2024, 6, 1), true).await;
    assert_eq!(rule.id, "rule-1");

    let listed = db.rules.list_rules("owner-1").unwrap();
    assert_eq!(listed.len(), 1);
    assert!(db.rules.list_rules("someone-else").unwrap().is_empty());

    let update = financeiq_core::recurrence::RecurrenceRuleUpdate {
        id: "rule-1".to_string(),
        kind: TransactionKind::Expense,
        amount: dec!(59.99),
        category: "subscriptions".to_string(),
        description: None,
        payment_method: Some(PaymentMethod::from_str("upi").unwrap()),
        frequency: Frequency::Yearly,
        next_run_date: d(2024, 7, 1),
        is_active: false,
    };
    let updated = db.rules.update_rule(update).await.unwrap();
    assert_eq!(updated.amount, dec!(59.99));
    assert_eq!(updated.frequency, Frequency::Yearly);
    assert!(!updated.is_active);
    assert_eq!(updated.created_at, rule.created_at);

    assert_eq!(db.rules.delete_rule("rule-1".to_string()).await.unwrap(), 1);
    assert!(db.rules.list_rules("owner-1").unwrap().is_empty());
}
