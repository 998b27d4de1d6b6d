use crate::models::{MatchStatus, ReconciliationJob, ReconciliationResult, ReconciliationSummary};
use std::collections::BTreeMap;

/// Group label for unmatched bank rows that carry no source.
pub const UNKNOWN_SOURCE: &str = "unknown";

/// Builds the caller-facing summary from a job's totals and its stored rows.
pub fn summarize(job: &ReconciliationJob, results: &[ReconciliationResult]) -> ReconciliationSummary {
    let mut unmatched_system = Vec::new();
    let mut unmatched_bank: BTreeMap<String, Vec<ReconciliationResult>> = BTreeMap::new();
    let mut discrepancies = Vec::new();

    for result in results {
        match result.match_status {
            MatchStatus::Matched => {}
            MatchStatus::Discrepancy => discrepancies.push(result.clone()),
            MatchStatus::UnmatchedSystem => unmatched_system.push(result.clone()),
            MatchStatus::UnmatchedBank => {
                let source = result.bank_source.as_deref().unwrap_or(UNKNOWN_SOURCE);
                unmatched_bank.entry(source.to_string()).or_default().push(result.clone());
            }
        }
    }

    ReconciliationSummary {
        job_id: job.job_id.clone(),
        total_processed: job.total_processed,
        total_matched: job.total_matched,
        total_unmatched: job.total_unmatched,
        total_discrepancies: job.total_discrepancies,
        unmatched_system,
        unmatched_bank,
        discrepancies
    }
}
