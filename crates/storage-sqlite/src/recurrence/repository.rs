use std::sync::Arc;

use async_trait::async_trait;
use chrono::{NaiveDate, Utc};
use diesel::prelude::*;
use diesel::SqliteConnection;
use uuid::Uuid;

use financeiq_core::recurrence::{
    NewRecurrenceRule, RecurrenceError, RecurrenceRule, RecurrenceRuleRepositoryTrait,
    RecurrenceRuleUpdate,
};
use financeiq_core::Result;

use super::model::RecurrenceRuleDB;
use crate::db::{get_connection, write_actor::WriteHandle, DbPool};
use crate::errors::StorageError;
use crate::schema::recurring_rules;
use crate::schema::recurring_rules::dsl::*;

pub struct RecurrenceRuleRepository {
    pool: Arc<DbPool>,
    writer: WriteHandle,
}

impl RecurrenceRuleRepository {
    pub fn new(pool: Arc<DbPool>, writer: WriteHandle) -> Self {
        RecurrenceRuleRepository { pool, writer }
    }
}

#[async_trait]
impl RecurrenceRuleRepositoryTrait for RecurrenceRuleRepository {
    fn find_due_active_rules(&self, as_of: NaiveDate) -> Result<Vec<RecurrenceRule>> {
        let mut conn = get_connection(&self.pool)?;
        let rules_db = recurring_rules
            .filter(is_active.eq(true))
            .filter(next_run_date.le(as_of))
            .order((next_run_date.asc(), id.asc()))
            .load::<RecurrenceRuleDB>(&mut conn)
            .map_err(StorageError::from)?;
        rules_db.into_iter().map(RecurrenceRule::try_from).collect()
    }

    async fn update_next_run_date(
        &self,
        rule_id: &str,
        new_date: NaiveDate,
    ) -> Result<RecurrenceRule> {
        let rule_id_owned = rule_id.to_string();
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<RecurrenceRule> {
                // The predicate enforces strict monotonicity at the store:
                // a stale or repeated date matches zero rows.
                let affected = diesel::update(
                    recurring_rules.filter(
                        id.eq(&rule_id_owned).and(next_run_date.lt(new_date)),
                    ),
                )
                .set(next_run_date.eq(new_date))
                .execute(conn)
                .map_err(StorageError::from)?;

                if affected == 0 {
                    let exists: i64 = recurring_rules
                        .filter(id.eq(&rule_id_owned))
                        .count()
                        .get_result(conn)
                        .map_err(StorageError::from)?;
                    return if exists == 0 {
                        Err(RecurrenceError::RuleNotFound(rule_id_owned).into())
                    } else {
                        Err(RecurrenceError::StaleNextRunDate {
                            rule_id: rule_id_owned,
                            new_date,
                        }
                        .into())
                    };
                }

                let result_db = recurring_rules
                    .filter(id.eq(&rule_id_owned))
                    .first::<RecurrenceRuleDB>(conn)
                    .map_err(StorageError::from)?;
                RecurrenceRule::try_from(result_db)
            })
            .await
    }

    fn list_rules(&self, rule_owner_id: &str) -> Result<Vec<RecurrenceRule>> {
        let mut conn = get_connection(&self.pool)?;
        let rules_db = recurring_rules
            .filter(owner_id.eq(rule_owner_id))
            .order((next_run_date.asc(), id.asc()))
            .load::<RecurrenceRuleDB>(&mut conn)
            .map_err(StorageError::from)?;
        rules_db.into_iter().map(RecurrenceRule::try_from).collect()
    }

    async fn insert_rule(&self, new_rule: NewRecurrenceRule) -> Result<RecurrenceRule> {
        let now = Utc::now().naive_utc();
        let rule = RecurrenceRule {
            id: new_rule.id.unwrap_or_else(|| Uuid::new_v4().to_string()),
            owner_id: new_rule.owner_id,
            kind: new_rule.kind,
            amount: new_rule.amount,
            category: new_rule.category,
            description: new_rule.description,
            payment_method: new_rule.payment_method,
            frequency: new_rule.frequency,
            next_run_date: new_rule.next_run_date,
            is_active: new_rule.is_active,
            created_at: now,
            updated_at: now,
        };
        let rule_db = RecurrenceRuleDB::from(rule);

        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<RecurrenceRule> {
                let result_db = diesel::insert_into(recurring_rules::table)
                    .values(&rule_db)
                    .returning(RecurrenceRuleDB::as_returning())
                    .get_result(conn)
                    .map_err(StorageError::from)?;
                RecurrenceRule::try_from(result_db)
            })
            .await
    }

    async fn update_rule(&self, update: RecurrenceRuleUpdate) -> Result<RecurrenceRule> {
        // Read the current row outside the writer so a missing rule surfaces
        // as RuleNotFound instead of a generic write error.
        let mut conn = get_connection(&self.pool)?;
        let current_db = recurring_rules
            .filter(id.eq(&update.id))
            .first::<RecurrenceRuleDB>(&mut conn)
            .optional()
            .map_err(StorageError::from)?
            .ok_or_else(|| RecurrenceError::RuleNotFound(update.id.clone()))?;
        let current = RecurrenceRule::try_from(current_db)?;

        let updated = RecurrenceRule {
            id: update.id,
            owner_id: current.owner_id,
            kind: update.kind,
            amount: update.amount,
            category: update.category,
            description: update.description,
            payment_method: update.payment_method,
            frequency: update.frequency,
            next_run_date: update.next_run_date,
            is_active: update.is_active,
            created_at: current.created_at,
            updated_at: Utc::now().naive_utc(),
        };
        let rule_db = RecurrenceRuleDB::from(updated);
        let rule_id_owned = rule_db.id.clone();

        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<RecurrenceRule> {
                diesel::update(recurring_rules.find(&rule_id_owned))
                    .set(&rule_db)
                    .execute(conn)
                    .map_err(StorageError::from)?;
                let result_db = recurring_rules
                    .filter(id.eq(&rule_id_owned))
                    .first::<RecurrenceRuleDB>(conn)
                    .map_err(StorageError::from)?;
                RecurrenceRule::try_from(result_db)
            })
            .await
    }

    async fn delete_rule(&self, rule_id_to_delete: String) -> Result<usize> {
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<usize> {
                Ok(diesel::delete(recurring_rules.find(rule_id_to_delete))
                    .execute(conn)
                    .map_err(StorageError::from)?)
            })
            .await
    }
}
