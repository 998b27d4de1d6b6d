use crate::models::Transaction;
use crate::storage::{StorageError, TransactionSource, TransactionStore};
use crate::types::{Timestamp, TransactionId};
use dashmap::DashMap;
use dashmap::mapref::entry::Entry;

pub struct MemoryTransactionStore {
    transactions: DashMap<TransactionId, Transaction>
}

impl MemoryTransactionStore {
    pub fn new() -> Self {
        Self {
            transactions: DashMap::new()
        }
    }

    pub fn len(&self) -> usize {
        self.transactions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transactions.is_empty()
    }
}

impl Default for MemoryTransactionStore {
    fn default() -> Self {
        Self::new()
    }
}

impl TransactionSource for MemoryTransactionStore {
    fn by_date_range(&self, start: Timestamp, end: Timestamp) -> Result<Vec<Transaction>, StorageError> {
        let mut transactions: Vec<Transaction> = self.transactions.iter()
            .filter(|entry| entry.value().occurred_within(start, end))
            .map(|entry| entry.value().clone())
            .collect();

        transactions.sort_by(|left, right| {
            left.transaction_time.cmp(&right.transaction_time).then_with(|| left.id.cmp(&right.id))
        });

        Ok(transactions)
    }
}

impl TransactionStore for MemoryTransactionStore {
    fn insert_batch(&self, batch: Vec<Transaction>) -> Result<usize, StorageError> {
        let inserted = batch.into_iter()
            .filter_map(|transaction| match self.transactions.entry(transaction.id.clone()) {
                Entry::Occupied(_) => None,
                Entry::Vacant(slot) => {
                    slot.insert(transaction);
                    Some(())
                }
            })
            .count();

        Ok(inserted)
    }

    fn transaction(&self, trx_id: &str) -> Result<Transaction, StorageError> {
        self.transactions.get(trx_id)
            .map(|transaction| transaction.value().clone())
            .ok_or_else(|| StorageError::TransactionNotFound(trx_id.to_string()))
    }
}
