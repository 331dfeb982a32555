//! Transaction domain model.

use chrono::{NaiveDate, NaiveDateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::recurrence::{PaymentMethod, RecurrenceRule, TransactionKind};

/// A concrete financial record. Transactions generated by the recurrence
/// engine carry `is_recurring = true` and a back-reference to the rule that
/// produced them; the engine never mutates a transaction after insertion.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    pub id: String,
    pub owner_id: String,
    pub kind: TransactionKind,
    pub amount: Decimal,
    pub category: String,
    pub description: Option<String>,
    pub payment_method: Option<PaymentMethod>,
    /// Calendar date of the transaction. For generated transactions this is
    /// the rule's next_run_date at the moment of materialization.
    pub date: NaiveDate,
    pub is_recurring: bool,
    /// Lookup-only back-reference to the originating rule.
    pub source_rule_id: Option<String>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl Transaction {
    /// Materializes a rule's current due occurrence. The transaction gets a
    /// fresh id of its own; rule fields are copied at generation time.
    pub fn from_rule(rule: &RecurrenceRule) -> Self {
        let now = Utc::now().naive_utc();
        Self {
            id: Uuid::new_v4().to_string(),
            owner_id: rule.owner_id.clone(),
            kind: rule.kind,
            amount: rule.amount,
            category: rule.category.clone(),
            description: rule.description.clone(),
            payment_method: rule.payment_method,
            date: rule.next_run_date,
            is_recurring: true,
            source_rule_id: Some(rule.id.clone()),
            created_at: now,
            updated_at: now,
        }
    }
}
