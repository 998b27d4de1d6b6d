use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum TimestampError {
    #[error("Timestamp error: value is empty")]
    Empty,
    #[error("Timestamp error: '{0}' does not match any supported format")]
    Unrecognized(String)
}
