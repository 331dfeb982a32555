//! Database models for transactions.

use std::str::FromStr;

use chrono::{NaiveDate, NaiveDateTime};
use diesel::prelude::*;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use financeiq_core::errors::{Error, ValidationError};
use financeiq_core::recurrence::{PaymentMethod, TransactionKind};
use financeiq_core::transactions::Transaction;

use crate::recurrence::RecurrenceRuleDB;

/// Database model for transactions.
#[derive(
    Queryable,
    Insertable,
    Identifiable,
    Associations,
    Selectable,
    PartialEq,
    Serialize,
    Deserialize,
    Debug,
    Clone,
)]
#[diesel(belongs_to(RecurrenceRuleDB, foreign_key = source_rule_id))]
#[diesel(table_name = crate::schema::transactions)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
#[serde(rename_all = "camelCase")]
pub struct TransactionDB {
    pub id: String,
    pub owner_id: String,
    pub kind: String,
    pub amount: String,
    pub category: String,
    pub description: Option<String>,
    pub payment_method: Option<String>,
    pub date: NaiveDate,
    pub is_recurring: bool,
    pub source_rule_id: Option<String>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

// Conversion to/from domain models

impl TryFrom<TransactionDB> for Transaction {
    type Error = Error;

    fn try_from(db: TransactionDB) -> Result<Self, Self::Error> {
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
            date: db.date,
            is_recurring: db.is_recurring,
            source_rule_id: db.source_rule_id,
            created_at: db.created_at,
            updated_at: db.updated_at,
        })
    }
}

impl From<Transaction> for TransactionDB {
    fn from(domain: Transaction) -> Self {
        Self {
            id: domain.id,
            owner_id: domain.owner_id,
            kind: domain.kind.as_str().to_string(),
            amount: domain.amount.to_string(),
            category: domain.category,
            description: domain.description,
            payment_method: domain.payment_method.map(|m| m.as_str().to_string()),
            date: domain.date,
            is_recurring: domain.is_recurring,
            source_rule_id: domain.source_rule_id,
            created_at: domain.created_at,
            updated_at: domain.updated_at,
        }
    }
}
