use crate::models::{BankStatement, Transaction, TransactionType};
use crate::parser::{RecordError, Row};

/// Turns one row of a delimited source into a typed record.
pub trait RecordDecoder {
    type Record;

    /// Lower-cased header names that must be present before any row is decoded.
    const REQUIRED_COLUMNS: &'static [&'static str];

    fn decode(&self, row: &Row<'_>) -> Result<Self::Record, RecordError>;
}

/// Decodes bank statement rows, stamping every record with the feed it came from.
#[derive(Debug, Clone)]
pub struct StatementDecoder {
    source: String
}

impl StatementDecoder {
    pub fn new(source: impl Into<String>) -> Self {
        Self { source: source.into() }
    }
}

impl RecordDecoder for StatementDecoder {
    type Record = BankStatement;

    const REQUIRED_COLUMNS: &'static [&'static str] = &["trx_ref_id", "amount", "date"];

    fn decode(&self, row: &Row<'_>) -> Result<BankStatement, RecordError> {
        Ok(BankStatement {
            reference_id: row.required("trx_ref_id")?.to_string(),
            amount: row.decimal("amount")?,
            date: row.timestamp("date")?,
            source: self.source.clone()
        })
    }
}

/// Decodes system transaction rows.
#[derive(Debug, Clone, Copy, Default)]
pub struct TransactionDecoder;

impl RecordDecoder for TransactionDecoder {
    type Record = Transaction;

    const REQUIRED_COLUMNS: &'static [&'static str] = &["trx_id", "amount", "type", "transaction_time"];

    fn decode(&self, row: &Row<'_>) -> Result<Transaction, RecordError> {
        let id = row.required("trx_id")?.to_string();
        let amount = row.decimal("amount")?;

        if amount.is_zero() {
            return Err(RecordError::zero_amount(row));
        }

        if amount.is_sign_negative() {
            return Err(RecordError::negative_amount(row, amount));
        }

        let transaction_type = row.field("type")?
            .parse::<TransactionType>()
            .map_err(|error| RecordError::invalid_transaction_type(row, error))?;

        Ok(Transaction {
            id,
            amount,
            transaction_type,
            transaction_time: row.timestamp("transaction_time")?
        })
    }
}
