use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ReportError {
    #[error("Numeric overflow summing discrepancies after {discrepancies} entries")]
    DiscrepancyOverflow {
        discrepancies: usize
    }
}
