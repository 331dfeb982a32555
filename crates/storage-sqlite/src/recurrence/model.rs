//! Database models for recurrence rules.

use std::str::FromStr;

use chrono::{NaiveDate, NaiveDateTime};
use diesel::prelude::*;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use financeiq_core::errors::{Error, ValidationError};
use financeiq_core::recurrence::{Frequency, PaymentMethod, RecurrenceRule, TransactionKind};

/// Database model for recurrence rules. Enums and decimal amounts are
/// stored as text and parsed on the way out.
#[derive(
    Queryable,
    Insertable,
    Identifiable,
    AsChangeset,
    Selectable,
    PartialEq,
    Serialize,
    Deserialize,
    Debug,
    Clone,
)]
#[diesel(table_name = crate::schema::recurring_rules)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
#[serde(rename_all = "camelCase")]
pub struct RecurrenceRuleDB {
    pub id: String,
    pub owner_id: String,
    pub kind: String,
    pub amount: String,
    pub category: String,
    pub description: Option<String>,
    pub payment_method: Option<String>,
    pub frequency: String,
    pub next_run_date: NaiveDate,
    pub is_active: bool,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

// Conversion to/from domain models

impl TryFrom<RecurrenceRuleDB> for RecurrenceRule {
    type Error = Error;

    fn try_from(db: RecurrenceRuleDB) -> Result<Self, Self::Error> {
        let amount = Decimal::from_str(&db.amount)
            .map_err(|e| ValidationError::DecimalParse(format!("{}: {}", db.amount, e)))?;
        let payment_method = db
            .payment_method
            .as_deref()
            .map(PaymentMethod::from_str)
            .transpose()?;
        Ok(Self {
            id: db.id,
            owner_id: db.owner_id,
            kind: TransactionKind::from_str(&db.kind)?,
            amount,
            category: db.category,
            description: db.description,
            payment_method,
            frequency: Frequency::from_str(&db.frequency)?,
            next_run_date: db.next_run_date,
            is_active: db.is_active,
            created_at: db.created_at,
            updated_at: db.updated_at,
        })
    }
}

impl From<RecurrenceRule> for RecurrenceRuleDB {
    fn from(domain: RecurrenceRule) -> Self {
        Self {
            id: domain.id,
            owner_id: domain.owner_id,
            kind: domain.kind.as_str().to_string(),
            amount: domain.amount.to_string(),
            category: domain.category,
            description: domain.description,
            payment_method: domain.payment_method.map(|m| m.as_str().to_string()),
            frequency: domain.frequency.as_str().to_string(),
            next_run_date: domain.next_run_date,
            is_active: domain.is_active,
            created_at: domain.created_at,
            updated_at: domain.updated_at,
        }
    }
}
