mod errors;
mod timestamp;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;

pub use errors::TimestampError;
pub use timestamp::{end_of_day, parse_timestamp, start_of_day};

pub type TransactionId = String;
pub type JobId = String;
pub type Timestamp = DateTime<Utc>;

/// Largest amount magnitude accepted from any source, `2^95 - 1`.
/// The difference of any two amounts within it still fits in a `Decimal`.
pub const AMOUNT_LIMIT: Decimal = Decimal::from_parts(u32::MAX, u32::MAX, i32::MAX as u32, false, 0);
