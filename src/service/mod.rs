mod errors;
mod reconciliation_service;
mod transaction_service;

pub use errors::ServiceError;
pub use reconciliation_service::{ReconcileRequest, ReconciliationService};
pub use transaction_service::TransactionService;
