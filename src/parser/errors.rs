use crate::models::ModelError;
use crate::parser::Row;
use crate::types::{TimestampError, AMOUNT_LIMIT};
use rust_decimal::Decimal;
use std::error::Error as StdError;
use std::io;
use thiserror::Error;

/// Error type a batch consumer may fail with. Any error converts into it with `?` or `.into()`.
pub type BatchError = Box<dyn StdError + Send + Sync + 'static>;

/// Errors that end a parse. Row-level problems are [`RecordError`]s and never surface here.
#[derive(Debug, Error)]
pub enum ParseError {
    #[error("Failed to open [{origin}]: {error}")]
    Open {
        origin: String,
        #[source]
        error: io::Error
    },
    #[error("Failed to read header of [{origin}]: {error}")]
    Header {
        origin: String,
        #[source]
        error: csv::Error
    },
    #[error("Invalid format in [{origin}]: missing required columns ({})", .missing.join(", "))]
    Schema {
        origin: String,
        missing: Vec<String>
    },
    #[error("Batch consumer failed for [{origin}] at line {line}: {error}")]
    Callback {
        origin: String,
        line: u64,
        #[source]
        error: BatchError
    }
}

/// A single malformed row. The parser logs it and moves on.
#[derive(Debug, Error)]
pub enum RecordError {
    #[error("Line {line}: row could not be read: {error}")]
    Unreadable {
        line: u64,
        #[source]
        error: csv::Error
    },
    #[error("Line {line}: column [{column}] is missing from the row")]
    MissingField {
        line: u64,
        column: &'static str
    },
    #[error("Line {line}: column [{column}] is empty")]
    EmptyField {
        line: u64,
        column: &'static str
    },
    #[error("Line {line}: invalid amount '{value}': {error}")]
    InvalidAmount {
        line: u64,
        value: String,
        #[source]
        error: rust_decimal::Error
    },
    #[error("Line {line}: amount [{amount}] must not be negative")]
    NegativeAmount {
        line: u64,
        amount: Decimal
    },
    #[error("Line {line}: amount must be non-zero")]
    ZeroAmount {
        line: u64
    },
    #[error("Line {line}: amount [{amount}] exceeds the supported magnitude of {limit}", limit = AMOUNT_LIMIT)]
    AmountOutOfRange {
        line: u64,
        amount: Decimal
    },
    #[error("Line {line}: invalid [{column}]: {error}")]
    InvalidTimestamp {
        line: u64,
        column: &'static str,
        #[source]
        error: TimestampError
    },
    #[error("Line {line}: {error}")]
    InvalidTransactionType {
        line: u64,
        #[source]
        error: ModelError
    }
}

impl RecordError {
    //NOTE: Same factory approach as elsewhere, the row already knows its line so callers only supply what went wrong.

    pub fn missing_field(row: &Row<'_>, column: &'static str) -> Self {
        Self::MissingField { line: row.line(), column }
    }

    pub fn empty_field(row: &Row<'_>, column: &'static str) -> Self {
        Self::EmptyField { line: row.line(), column }
    }

    pub fn invalid_amount(row: &Row<'_>, value: &str, error: rust_decimal::Error) -> Self {
        Self::InvalidAmount { line: row.line(), value: value.to_string(), error }
    }

    pub fn negative_amount(row: &Row<'_>, amount: Decimal) -> Self {
        Self::NegativeAmount { line: row.line(), amount }
    }

    pub fn zero_amount(row: &Row<'_>) -> Self {
        Self::ZeroAmount { line: row.line() }
    }

    pub fn amount_out_of_range(row: &Row<'_>, amount: Decimal) -> Self {
        Self::AmountOutOfRange { line: row.line(), amount }
    }

    pub fn invalid_timestamp(row: &Row<'_>, column: &'static str, error: TimestampError) -> Self {
        Self::InvalidTimestamp { line: row.line(), column, error }
    }

    pub fn invalid_transaction_type(row: &Row<'_>, error: ModelError) -> Self {
        Self::InvalidTransactionType { line: row.line(), error }
    }

    pub fn line(&self) -> u64 {
        match self {
            Self::Unreadable { line, .. }
            | Self::MissingField { line, .. }
            | Self::EmptyField { line, .. }
            | Self::InvalidAmount { line, .. }
            | Self::NegativeAmount { line, .. }
            | Self::ZeroAmount { line }
            | Self::AmountOutOfRange { line, .. }
            | Self::InvalidTimestamp { line, .. }
            | Self::InvalidTransactionType { line, .. } => *line
        }
    }
}
