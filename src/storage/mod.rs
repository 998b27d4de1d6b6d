mod job_store;
mod transaction_store;

use crate::models::{MatchStatus, ReconciliationJob, ReconciliationResult, Transaction};
use crate::types::{JobId, Timestamp, TransactionId};
use thiserror::Error;

pub use job_store::MemoryJobStore;
pub use transaction_store::MemoryTransactionStore;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum StorageError {
    #[error("Job [{0}] already exists")]
    DuplicateJob(JobId),
    #[error("Job [{0}] was not found")]
    JobNotFound(JobId),
    #[error("Transaction [{0}] was not found")]
    TransactionNotFound(TransactionId)
}

/// Persists job metadata and result rows keyed by job id.
pub trait JobStore: Send + Sync + 'static {
    fn create_job(&self, job: ReconciliationJob) -> Result<(), StorageError>;
    fn update_job(&self, job: ReconciliationJob) -> Result<(), StorageError>;
    fn job(&self, job_id: &str) -> Result<ReconciliationJob, StorageError>;
    /// Appends `results` to the rows already stored for the job, keeping their order.
    fn save_results(&self, job_id: &str, results: Vec<ReconciliationResult>) -> Result<(), StorageError>;
    /// Stored rows of the job in saved order, restricted to `status` when one is given.
    fn results(&self, job_id: &str, status: Option<MatchStatus>) -> Result<Vec<ReconciliationResult>, StorageError>;
}

/// System-side transactions, queryable by an inclusive time range.
pub trait TransactionSource: Send + Sync + 'static {
    fn by_date_range(&self, start: Timestamp, end: Timestamp) -> Result<Vec<Transaction>, StorageError>;
}

/// A [`TransactionSource`] that can also be written to and searched by id.
pub trait TransactionStore: TransactionSource {
    /// Stores every transaction whose id is not known yet and returns how many were inserted.
    /// An id that is already stored keeps the record it was first stored with.
    fn insert_batch(&self, batch: Vec<Transaction>) -> Result<usize, StorageError>;
    fn transaction(&self, trx_id: &str) -> Result<Transaction, StorageError>;
}
