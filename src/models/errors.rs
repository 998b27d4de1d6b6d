use crate::types::{TransactionId, AMOUNT_LIMIT};
use rust_decimal::Decimal;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ModelError {
    #[error("Unknown transaction type [{0}], expected DEBIT or CREDIT")]
    UnknownTransactionType(String),
    #[error("Transaction id is required")]
    MissingTransactionId,
    #[error("Amount must be non-zero for transaction [{0}]")]
    ZeroAmount(TransactionId),
    #[error("Amount must be positive for transaction [{transaction_id}], got [{amount}]")]
    NegativeAmount {
        transaction_id: TransactionId,
        amount: Decimal
    },
    #[error("Amount [{amount}] of transaction [{transaction_id}] exceeds the supported magnitude of {limit}", limit = AMOUNT_LIMIT)]
    AmountOutOfRange {
        transaction_id: TransactionId,
        amount: Decimal
    }
}
