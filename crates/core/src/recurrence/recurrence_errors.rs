//! Recurrence-specific error types.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use thiserror::Error;

/// Errors raised by rule validation and the recurrence engine.
#[derive(Error, Debug)]
pub enum RecurrenceError {
    #[error("Rule amount must be positive, got {0}")]
    InvalidAmount(Decimal),

    #[error("Category '{category}' is not valid for {kind} rules")]
    UnknownCategory { kind: String, category: String },

    #[error("Unknown frequency: '{0}'")]
    InvalidFrequency(String),

    #[error("Unknown transaction kind: '{0}'")]
    InvalidKind(String),

    #[error("Unknown payment method: '{0}'")]
    InvalidPaymentMethod(String),

    #[error("Cannot advance schedule past {0}: date out of calendar range")]
    DateOverflow(NaiveDate),

    #[error("Recurrence rule not found: {0}")]
    RuleNotFound(String),

    #[error("Refusing non-increasing next run date {new_date} for rule {rule_id}")]
    StaleNextRunDate {
        rule_id: String,
        new_date: NaiveDate,
    },
}
