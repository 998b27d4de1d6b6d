mod builder;
mod errors;
mod summary;

pub use builder::{build_results, total_discrepancy};
pub use errors::ReportError;
pub use summary::{summarize, UNKNOWN_SOURCE};
