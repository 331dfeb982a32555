use async_trait::async_trait;

use crate::errors::Result;
use crate::transactions::Transaction;

/// Trait for transaction repository operations
#[async_trait]
pub trait TransactionRepositoryTrait: Send + Sync {
    /// Inserts a transaction, idempotent on `(source_rule_id, date)`.
    ///
    /// Returns the number of rows written: 0 means a transaction for the
    /// same rule and date already exists and the insert was a no-op. This
    /// makes the engine's two-step write (insert, then advance) safe to
    /// retry after a crash or a failed schedule advance.
    async fn insert_transaction(&self, transaction: Transaction) -> Result<usize>;

    /// Lists the transactions a rule has generated, newest first.
    fn list_transactions_for_rule(&self, rule_id: &str) -> Result<Vec<Transaction>>;
}
