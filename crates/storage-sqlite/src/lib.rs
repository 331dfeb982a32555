//! SQLite storage implementation for FinanceIQ.
//!
//! This crate provides all database-related functionality using Diesel ORM
//! with SQLite. It implements the repository traits defined in
//! `financeiq-core` and contains:
//! - Database connection pooling and management
//! - Diesel migrations
//! - Repository implementations for rules and transactions
//! - Database-specific model types (with Diesel derives)
//!
//! This crate is the only place in the application where Diesel dependencies
//! exist; `core` is database-agnostic and works with traits.

pub mod db;
pub mod errors;
pub mod schema;

// Repository implementations
pub mod recurrence;
pub mod transactions;

// Re-export database utilities
pub use db::{
    create_pool, get_connection, run_migrations, write_actor::spawn_writer,
    write_actor::WriteHandle, DbConnection, DbPool,
};

// Re-export storage errors
pub use errors::StorageError;

// Re-export from financeiq-core for convenience
pub use financeiq_core::errors::{DatabaseError, Error, Result};
