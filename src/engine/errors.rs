use crate::models::{BankStatement, Transaction};
use crate::types::{Timestamp, TransactionId};
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Invalid reconciliation window: start [{start}] is after end [{end}]")]
    InvalidWindow {
        start: Timestamp,
        end: Timestamp
    },
    #[error("Numeric overflow comparing transaction [{transaction_id}] with bank entry from [{bank_source}]")]
    AmountOverflow {
        transaction_id: TransactionId,
        bank_source: String
    }
}

impl ValidationError {
    pub fn amount_overflow(transaction: &Transaction, statement: &BankStatement) -> Self {
        Self::AmountOverflow {
            transaction_id: transaction.id.clone(),
            bank_source: statement.source.clone()
        }
    }
}
