use crate::models::{JobStatus, MatchStatus};
use crate::types::{JobId, Timestamp, TransactionId};
use chrono::Utc;
use rust_decimal::Decimal;
use serde::Serialize;
use std::collections::BTreeMap;

/// One flattened report row.
///
/// Only the fields meaningful for `match_status` are present, e.g. an unmatched system row has
/// no bank side at all. A missing field is `None`, never a zero amount.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReconciliationResult {
    pub job_id: JobId,
    pub match_status: MatchStatus,
    pub trx_id: Option<TransactionId>,
    pub trx_ref_id: Option<String>,
    pub system_amount: Option<Decimal>,
    pub bank_amount: Option<Decimal>,
    pub discrepancy: Option<Decimal>,
    pub bank_source: Option<String>,
    pub transaction_date: Option<Timestamp>
}

/// Bookkeeping for a single reconciliation run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReconciliationJob {
    pub job_id: JobId,
    pub start_date: Timestamp,
    pub end_date: Timestamp,
    pub status: JobStatus,
    pub total_processed: usize,
    pub total_matched: usize,
    pub total_unmatched: usize,
    pub total_discrepancies: Decimal,
    pub error_message: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp
}

impl ReconciliationJob {
    pub fn new(job_id: JobId, start_date: Timestamp, end_date: Timestamp) -> Self {
        let now = Utc::now();

        Self {
            job_id,
            start_date,
            end_date,
            status: JobStatus::Pending,
            total_processed: 0,
            total_matched: 0,
            total_unmatched: 0,
            total_discrepancies: Decimal::ZERO,
            error_message: None,
            created_at: now,
            updated_at: now
        }
    }

    pub fn transition(&mut self, status: JobStatus) {
        self.status = status;
        self.updated_at = Utc::now();
    }
}

/// What a caller gets back after a run: the job totals plus every row that needs attention.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReconciliationSummary {
    pub job_id: JobId,
    pub total_processed: usize,
    pub total_matched: usize,
    pub total_unmatched: usize,
    pub total_discrepancies: Decimal,
    pub unmatched_system: Vec<ReconciliationResult>,
    /// Unmatched bank rows grouped by the feed they came from.
    pub unmatched_bank: BTreeMap<String, Vec<ReconciliationResult>>,
    pub discrepancies: Vec<ReconciliationResult>
}
