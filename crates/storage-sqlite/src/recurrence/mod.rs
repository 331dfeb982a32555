//! SQLite storage implementation for recurrence rules.

mod model;
mod repository;

pub use model::RecurrenceRuleDB;
pub use repository::RecurrenceRuleRepository;
