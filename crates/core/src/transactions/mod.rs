//! Transactions module - the records the recurrence engine materializes.

mod transactions_model;
mod transactions_traits;

pub use transactions_model::Transaction;
pub use transactions_traits::TransactionRepositoryTrait;
