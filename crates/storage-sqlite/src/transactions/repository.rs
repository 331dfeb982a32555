use std::sync::Arc;

use async_trait::async_trait;
use diesel::prelude::*;
use diesel::SqliteConnection;

use financeiq_core::transactions::{Transaction, TransactionRepositoryTrait};
use financeiq_core::Result;

use super::model::TransactionDB;
use crate::db::{get_connection, write_actor::WriteHandle, DbPool};
use crate::errors::StorageError;
use crate::schema::transactions;
use crate::schema::transactions::dsl::*;

pub struct TransactionRepository {
    pool: Arc<DbPool>,
    writer: WriteHandle,
}

impl TransactionRepository {
    pub fn new(pool: Arc<DbPool>, writer: WriteHandle) -> Self {
        TransactionRepository { pool, writer }
    }
}

#[async_trait]
impl TransactionRepositoryTrait for TransactionRepository {
    async fn insert_transaction(&self, transaction: Transaction) -> Result<usize> {
        let transaction_db = TransactionDB::from(transaction);
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<usize> {
                // The unique index on (source_rule_id, date) turns a repeat
                // materialization of the same due occurrence into a no-op.
                let affected = diesel::insert_into(transactions::table)
                    .values(&transaction_db)
                    .on_conflict((source_rule_id, date))
                    .do_nothing()
                    .execute(conn)
                    .map_err(StorageError::from)?;
                Ok(affected)
            })
            .await
    }

    fn list_transactions_for_rule(&self, rule_id: &str) -> Result<Vec<Transaction>> {
        let mut conn = get_connection(&self.pool)?;
        let transactions_db = transactions
            .filter(source_rule_id.eq(rule_id))
            .order(date.desc())
            .load::<TransactionDB>(&mut conn)
            .map_err(StorageError::from)?;
        transactions_db
            .into_iter()
            .map(Transaction::try_from)
            .collect()
    }
}
