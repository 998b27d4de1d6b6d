use crate::engine::ValidationError;
use crate::models::ModelError;
use crate::parser::ParseError;
use crate::report::ReportError;
use crate::storage::StorageError;
use thiserror::Error;
use tokio::task::JoinError;

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error("Invalid transaction: {0}")]
    InvalidTransaction(#[from] ModelError),
    #[error("Failed to load system transactions: {0}")]
    Transactions(#[from] ParseError),
    #[error(transparent)]
    Storage(#[from] StorageError),
    #[error(transparent)]
    Report(#[from] ReportError),
    #[error("No bank statements loaded from {files} file(s)")]
    NoBankStatements {
        files: usize
    },
    #[error("Blocking task did not complete: {0}")]
    Task(#[from] JoinError)
}
