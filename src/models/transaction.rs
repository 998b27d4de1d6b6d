use crate::models::{ModelError, TransactionType};
use crate::types::{Timestamp, TransactionId, AMOUNT_LIMIT};
use rust_decimal::Decimal;
use serde::Serialize;

/// A transaction as recorded by the internal system.
///
/// The amount is always a non-negative magnitude; `transaction_type` decides which way
/// the money moved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Transaction {
    /// Unique transaction key, matched against the bank's reference id.
    #[serde(rename = "trx_id")]
    pub id: TransactionId,
    pub amount: Decimal,
    #[serde(rename = "type")]
    pub transaction_type: TransactionType,
    pub transaction_time: Timestamp
}

impl Transaction {
    /// The amount signed the way a bank statement would show it: negative for debits, positive for credits.
    pub fn normalized_amount(&self) -> Decimal {
        match self.transaction_type {
            TransactionType::Debit => -self.amount,
            TransactionType::Credit => self.amount
        }
    }

    /// Checks the invariants a stored transaction must hold: a non-empty id and a positive amount
    /// no larger than [`AMOUNT_LIMIT`].
    pub fn validate(&self) -> Result<(), ModelError> {
        if self.id.trim().is_empty() {
            return Err(ModelError::MissingTransactionId);
        }

        if self.amount.is_zero() {
            return Err(ModelError::ZeroAmount(self.id.clone()));
        }

        if self.amount.is_sign_negative() {
            return Err(ModelError::NegativeAmount { transaction_id: self.id.clone(), amount: self.amount });
        }

        if self.amount > AMOUNT_LIMIT {
            return Err(ModelError::AmountOutOfRange { transaction_id: self.id.clone(), amount: self.amount });
        }

        Ok(())
    }

    pub fn occurred_within(&self, window_start: Timestamp, window_end: Timestamp) -> bool {
        window_start <= self.transaction_time && self.transaction_time <= window_end
    }
}
