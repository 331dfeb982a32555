use async_trait::async_trait;
use chrono::NaiveDate;

use crate::errors::Result;
use crate::recurrence::recurrence_model::{
    NewRecurrenceRule, RecurrenceRule, RecurrenceRuleUpdate, RunSummary,
};

/// Trait for recurrence rule repository operations
#[async_trait]
pub trait RecurrenceRuleRepositoryTrait: Send + Sync {
    /// Loads all rules where `is_active = true` and `next_run_date <= as_of`,
    /// ordered ascending by `(next_run_date, id)`.
    fn find_due_active_rules(&self, as_of: NaiveDate) -> Result<Vec<RecurrenceRule>>;

    /// Advances a rule's schedule. Implementations must refuse a `new_date`
    /// that does not strictly increase the stored `next_run_date`.
    async fn update_next_run_date(&self, rule_id: &str, new_date: NaiveDate)
        -> Result<RecurrenceRule>;

    fn list_rules(&self, owner_id: &str) -> Result<Vec<RecurrenceRule>>;
    async fn insert_rule(&self, new_rule: NewRecurrenceRule) -> Result<RecurrenceRule>;
    async fn update_rule(&self, update: RecurrenceRuleUpdate) -> Result<RecurrenceRule>;
    async fn delete_rule(&self, rule_id: String) -> Result<usize>;
}

/// Trait for recurrence service operations
#[async_trait]
pub trait RecurrenceServiceTrait: Send + Sync {
    /// Materializes every due active rule as of the given calendar date and
    /// advances each rule's schedule by exactly one period. Per-rule failures
    /// are collected in the summary; only a failed due-rule query returns `Err`.
    async fn process_due_recurrences(&self, as_of: NaiveDate) -> Result<RunSummary>;

    fn get_rules(&self, owner_id: &str) -> Result<Vec<RecurrenceRule>>;
    async fn create_rule(&self, new_rule: NewRecurrenceRule) -> Result<RecurrenceRule>;
    async fn update_rule(&self, update: RecurrenceRuleUpdate) -> Result<RecurrenceRule>;
    async fn delete_rule(&self, rule_id: String) -> Result<usize>;
}
