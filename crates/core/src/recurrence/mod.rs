//! Recurrence module - rules, schedule math, and the recurrence engine.

mod recurrence_errors;
mod recurrence_model;
mod recurrence_service;
mod recurrence_traits;
pub mod schedule;

pub use recurrence_errors::RecurrenceError;
pub use recurrence_model::{
    Frequency, NewRecurrenceRule, PaymentMethod, RecurrenceRule, RecurrenceRuleUpdate,
    RuleFailure, RunSummary, TransactionKind,
};
pub use recurrence_service::RecurrenceService;
pub use recurrence_traits::{RecurrenceRuleRepositoryTrait, RecurrenceServiceTrait};
