use std::sync::Arc;

use async_trait::async_trait;
use chrono::NaiveDate;
use log::{debug, error, info};
use rust_decimal::Decimal;
use tokio::sync::Mutex;

use crate::constants::is_valid_category;
use crate::recurrence::recurrence_model::{
    NewRecurrenceRule, RecurrenceRule, RecurrenceRuleUpdate, RuleFailure, RunSummary,
    TransactionKind,
};
use crate::recurrence::schedule;
use crate::recurrence::{RecurrenceError, RecurrenceRuleRepositoryTrait, RecurrenceServiceTrait};
use crate::transactions::{Transaction, TransactionRepositoryTrait};
use crate::Result;

/// Service for managing recurrence rules and running the recurrence engine.
pub struct RecurrenceService {
    rule_repository: Arc<dyn RecurrenceRuleRepositoryTrait>,
    transaction_repository: Arc<dyn TransactionRepositoryTrait>,
    /// Serializes whole runs so two concurrent invocations can never touch
    /// the same rule at the same time.
    run_lock: Mutex<()>,
}

impl RecurrenceService {
    /// Creates a new RecurrenceService instance with injected dependencies
    pub fn new(
        rule_repository: Arc<dyn RecurrenceRuleRepositoryTrait>,
        transaction_repository: Arc<dyn TransactionRepositoryTrait>,
    ) -> Self {
        Self {
            rule_repository,
            transaction_repository,
            run_lock: Mutex::new(()),
        }
    }

    /// Materializes one due occurrence of a rule and advances its schedule.
    ///
    /// The new next-run date is computed up front (pure math, no side
    /// effects on failure). The transaction insert is idempotent on
    /// `(source_rule_id, date)`, so a rule whose previous run wrote the
    /// transaction but failed to advance is safe to reprocess.
    async fn materialize_rule(&self, rule: &RecurrenceRule) -> Result<NaiveDate> {
        let new_next = schedule::advance(rule.next_run_date, rule.frequency)?;

        let transaction = Transaction::from_rule(rule);
        let inserted = self
            .transaction_repository
            .insert_transaction(transaction)
            .await?;
        if inserted == 0 {
            debug!(
                "Transaction for rule {} on {} already exists, advancing schedule only",
                rule.id, rule.next_run_date
            );
        }

        self.rule_repository
            .update_next_run_date(&rule.id, new_next)
            .await?;
        Ok(new_next)
    }

    fn validate_rule_fields(kind: TransactionKind, amount: Decimal, category: &str) -> Result<()> {
        if amount <= Decimal::ZERO {
            return Err(RecurrenceError::InvalidAmount(amount).into());
        }
        if !is_valid_category(kind, category) {
            return Err(RecurrenceError::UnknownCategory {
                kind: kind.to_string(),
                category: category.to_string(),
            }
            .into());
        }
        Ok(())
    }
}

#[async_trait]
impl RecurrenceServiceTrait for RecurrenceService {
    async fn process_due_recurrences(&self, as_of: NaiveDate) -> Result<RunSummary> {
        let _guard = self.run_lock.lock().await;

        // A failed due-rule query is fatal for the run and propagates.
        let mut due = self.rule_repository.find_due_active_rules(as_of)?;
        // The repository already orders the result set; re-sorting keeps runs
        // deterministic even with a store that doesn't.
        due.sort_by(|a, b| {
            a.next_run_date
                .cmp(&b.next_run_date)
                .then_with(|| a.id.cmp(&b.id))
        });

        info!("Processing {} due recurrence rules as of {}", due.len(), as_of);

        let mut summary = RunSummary::new(as_of);
        for rule in &due {
            match self.materialize_rule(rule).await {
                Ok(new_next) => {
                    debug!(
                        "Materialized rule {} for {}, next run {}",
                        rule.id, rule.next_run_date, new_next
                    );
                    summary.processed.push(rule.id.clone());
                }
                Err(e) => {
                    // One rule's failure must never block the others. The rule
                    // stays due (its next_run_date was not advanced) and is
                    // retried on the next tick.
                    error!("Failed to process recurrence rule {}: {}", rule.id, e);
                    summary.failed.push(RuleFailure {
                        rule_id: rule.id.clone(),
                        error: e.to_string(),
                    });
                }
            }
        }

        Ok(summary)
    }

    fn get_rules(&self, owner_id: &str) -> Result<Vec<RecurrenceRule>> {
        self.rule_repository.list_rules(owner_id)
    }

    async fn create_rule(&self, new_rule: NewRecurrenceRule) -> Result<RecurrenceRule> {
        Self::validate_rule_fields(new_rule.kind, new_rule.amount, &new_rule.category)?;
        self.rule_repository.insert_rule(new_rule).await
    }

    async fn update_rule(&self, update: RecurrenceRuleUpdate) -> Result<RecurrenceRule> {
        Self::validate_rule_fields(update.kind, update.amount, &update.category)?;
        self.rule_repository.update_rule(update).await
    }

    async fn delete_rule(&self, rule_id: String) -> Result<usize> {
        self.rule_repository.delete_rule(rule_id).await
    }
}
