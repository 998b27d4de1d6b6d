use crate::config::AppConfig;
use crate::engine::ReconciliationEngine;
use crate::models::{ModelError, Transaction};
use crate::parser::{CsvParser, TransactionDecoder};
use crate::service::ServiceError;
use crate::storage::{StorageError, TransactionStore};
use crate::types::Timestamp;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::task::spawn_blocking;
use tracing::{info, warn};

/// Validated access to the system transaction store.
pub struct TransactionService<T> {
    store: Arc<T>,
    batch_size: usize
}

impl<T: TransactionStore> TransactionService<T> {
    pub fn new(store: Arc<T>, config: &AppConfig) -> Self {
        Self {
            store,
            batch_size: config.batch_size.get()
        }
    }

    /// Stores a single transaction. Returns `false` if its id was already stored.
    pub fn create(&self, transaction: Transaction) -> Result<bool, ServiceError> {
        transaction.validate()?;

        Ok(self.store.insert_batch(vec![transaction])? == 1)
    }

    /// Stores every valid transaction of `transactions` and returns how many were inserted.
    /// Invalid ones are logged and skipped.
    pub fn bulk_create(&self, transactions: Vec<Transaction>) -> Result<usize, ServiceError> {
        Ok(insert_valid(self.store.as_ref(), transactions)?)
    }

    /// Streams a transaction CSV into the store batch by batch and returns how many records were inserted.
    ///
    /// # Errors
    /// Returns `ServiceError` if the file cannot be parsed or the store rejects a batch. Batches
    /// stored before the failure stay stored.
    pub async fn import(&self, path: PathBuf) -> Result<usize, ServiceError> {
        let store = Arc::clone(&self.store);
        let batch_size = self.batch_size;
        let origin = path.display().to_string();

        let inserted = spawn_blocking(move || {
            let mut inserted = 0;

            CsvParser::new(TransactionDecoder).parse(&path, batch_size, |batch| {
                inserted += insert_valid(store.as_ref(), batch)?;
                Ok(())
            })?;

            Ok::<_, ServiceError>(inserted)
        }).await??;

        info!(origin = %origin, inserted, "Imported system transactions");

        Ok(inserted)
    }

    pub fn transaction(&self, trx_id: &str) -> Result<Transaction, ServiceError> {
        if trx_id.trim().is_empty() {
            return Err(ModelError::MissingTransactionId.into());
        }

        Ok(self.store.transaction(trx_id)?)
    }

    /// Stored transactions inside the inclusive range, ordered by time.
    pub fn by_date_range(&self, start: Timestamp, end: Timestamp) -> Result<Vec<Transaction>, ServiceError> {
        ReconciliationEngine::validate_window(start, end)?;

        Ok(self.store.by_date_range(start, end)?)
    }
}

fn insert_valid<T: TransactionStore>(store: &T, transactions: Vec<Transaction>) -> Result<usize, StorageError> {
    let valid = transactions.into_iter()
        .enumerate()
        .filter_map(|(index, transaction)| match transaction.validate() {
            Ok(()) => Some(transaction),
            Err(error) => {
                warn!(index, "Invalid transaction, skipping: {error}");
                None
            }
        })
        .collect();

    store.insert_batch(valid)
}
