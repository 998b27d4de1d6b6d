mod errors;
mod result;
mod statement;
mod transaction;

use serde::Serialize;
use std::fmt::{self, Display, Formatter};
use std::str::FromStr;

pub use errors::ModelError;
pub use result::{ReconciliationJob, ReconciliationResult, ReconciliationSummary};
pub use statement::BankStatement;
pub use transaction::Transaction;

/// Direction of a system transaction. Bank statements carry the direction in the sign of the amount instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum TransactionType {
    Debit,
    Credit
}

impl TransactionType {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionType::Debit => "DEBIT",
            TransactionType::Credit => "CREDIT"
        }
    }
}

impl FromStr for TransactionType {
    type Err = ModelError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_uppercase().as_str() {
            "DEBIT" => Ok(TransactionType::Debit),
            "CREDIT" => Ok(TransactionType::Credit),
            _ => Err(ModelError::UnknownTransactionType(value.trim().to_string()))
        }
    }
}

impl Display for TransactionType {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> fmt::Result {
        formatter.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MatchStatus {
    Matched,
    Discrepancy,
    UnmatchedSystem,
    UnmatchedBank
}

impl MatchStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            MatchStatus::Matched => "MATCHED",
            MatchStatus::Discrepancy => "DISCREPANCY",
            MatchStatus::UnmatchedSystem => "UNMATCHED_SYSTEM",
            MatchStatus::UnmatchedBank => "UNMATCHED_BANK"
        }
    }
}

impl Display for MatchStatus {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> fmt::Result {
        formatter.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum JobStatus {
    Pending,
    Processing,
    Completed,
    Failed
}
