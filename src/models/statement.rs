use crate::types::Timestamp;
use rust_decimal::Decimal;
use serde::Serialize;

/// A single entry from an external bank feed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BankStatement {
    /// Reference key, matched against a system transaction id. Never empty.
    #[serde(rename = "trx_ref_id")]
    pub reference_id: String,
    /// Signed amount, the sign already encodes the direction.
    pub amount: Decimal,
    pub date: Timestamp,
    /// Label of the feed the entry came from.
    pub source: String
}

impl BankStatement {
    pub fn occurred_within(&self, window_start: Timestamp, window_end: Timestamp) -> bool {
        window_start <= self.date && self.date <= window_end
    }
}
