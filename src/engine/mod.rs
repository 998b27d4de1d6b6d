mod errors;
mod index;
mod output;
mod reconciliation_engine;

pub use errors::ValidationError;
pub use output::{DiscrepancyPair, MatchedPair, ReconciliationOutput};
pub use reconciliation_engine::{ReconciliationEngine, Reconciler};
