//! FinanceIQ Core - Domain entities, services, and traits.
//!
//! This crate contains the business logic for the FinanceIQ recurrence
//! engine. It is database-agnostic and defines traits that are implemented
//! by the `storage-sqlite` crate.

pub mod constants;
pub mod errors;
pub mod recurrence;
pub mod transactions;

// Re-export error types
pub use errors::Error;
pub use errors::Result;
