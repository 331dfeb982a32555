//! Single-writer actor for SQLite.
//!
//! SQLite allows one writer at a time. All repository writes are funneled
//! through a dedicated task that owns one connection and executes jobs
//! serially, each inside an immediate transaction. This also gives the
//! recurrence engine its durability ordering: a transaction insert and the
//! schedule advance that follows it are separate serialized transactions,
//! so the advance can never commit ahead of its insert.

use std::any::Any;
use std::sync::Arc;

use diesel::SqliteConnection;
use tokio::sync::{mpsc, oneshot};

use super::DbPool;
use crate::errors::StorageError;
use financeiq_core::errors::Result;

type ErasedResult = Result<Box<dyn Any + Send + 'static>>;
type ErasedJob = Box<dyn FnOnce(&mut SqliteConnection) -> ErasedResult + Send + 'static>;

/// Handle for sending write jobs to the actor.
#[derive(Clone)]
pub struct WriteHandle {
    tx: mpsc::Sender<(ErasedJob, oneshot::Sender<ErasedResult>)>,
}

impl WriteHandle {
    /// Executes a job on the writer's connection, inside an immediate
    /// transaction, and returns its result.
    pub async fn exec<F, T>(&self, job: F) -> Result<T>
    where
        F: FnOnce(&mut SqliteConnection) -> Result<T> + Send + 'static,
        T: Send + Any + 'static,
    {
        let (ret_tx, ret_rx) = oneshot::channel();
        self.tx
            .send((
                Box::new(move |conn| job(conn).map(|v| Box::new(v) as Box<dyn Any + Send>)),
                ret_tx,
            ))
            .await
            .expect("writer actor channel closed; the actor task has stopped");

        ret_rx
            .await
            .expect("writer actor dropped the reply channel without answering")
            .map(|boxed| {
                *boxed
                    .downcast::<T>()
                    .unwrap_or_else(|_| panic!("writer actor returned an unexpected type"))
            })
    }
}

/// Spawns the writer task. It holds one pooled connection for its lifetime
/// and processes jobs in arrival order until every `WriteHandle` is dropped.
pub fn spawn_writer(pool: Arc<DbPool>) -> WriteHandle {
    let (tx, mut rx) = mpsc::channel::<(ErasedJob, oneshot::Sender<ErasedResult>)>(1024);

    tokio::spawn(async move {
        let mut conn = pool
            .get()
            .expect("could not check out the writer connection from the pool");

        while let Some((job, reply_tx)) = rx.recv().await {
            let result: ErasedResult = conn
                .immediate_transaction::<_, StorageError, _>(|c| job(c).map_err(StorageError::from))
                .map_err(|e: StorageError| e.into());

            // The caller may have gone away (timeout, cancellation); that is fine.
            let _ = reply_tx.send(result);
        }
    });

    WriteHandle { tx }
}
