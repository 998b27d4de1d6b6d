use crate::engine::{DiscrepancyPair, MatchedPair, ReconciliationOutput};
use crate::models::{BankStatement, MatchStatus, ReconciliationResult, Transaction};
use crate::report::ReportError;
use rust_decimal::Decimal;

/// Flattens `output` into report rows: matched, then discrepancies, then unmatched system,
/// then unmatched bank, each in the order the engine produced them.
pub fn build_results(job_id: &str, output: &ReconciliationOutput) -> Vec<ReconciliationResult> {
    let mut results = Vec::with_capacity(output.len());

    results.extend(output.matched.iter().map(|pair| matched_row(job_id, pair)));
    results.extend(output.discrepancies.iter().map(|pair| discrepancy_row(job_id, pair)));
    results.extend(output.unmatched_system.iter().map(|transaction| unmatched_system_row(job_id, transaction)));
    results.extend(output.unmatched_bank.iter().map(|statement| unmatched_bank_row(job_id, statement)));

    results
}

/// Exact sum of every discrepancy magnitude, zero when there are none.
///
/// # Errors
/// Returns `ReportError` if the sum no longer fits in a `Decimal`.
pub fn total_discrepancy(output: &ReconciliationOutput) -> Result<Decimal, ReportError> {
    output.discrepancies.iter()
        .enumerate()
        .try_fold(Decimal::ZERO, |total, (position, pair)| {
            total.checked_add(pair.discrepancy)
                .ok_or(ReportError::DiscrepancyOverflow { discrepancies: position + 1 })
        })
}

fn matched_row(job_id: &str, pair: &MatchedPair) -> ReconciliationResult {
    ReconciliationResult {
        job_id: job_id.to_string(),
        match_status: MatchStatus::Matched,
        trx_id: Some(pair.transaction.id.clone()),
        trx_ref_id: Some(pair.statement.reference_id.clone()),
        system_amount: Some(pair.transaction.amount),
        bank_amount: Some(pair.statement.amount),
        discrepancy: Some(Decimal::ZERO),
        bank_source: Some(pair.statement.source.clone()),
        transaction_date: Some(pair.transaction.transaction_time)
    }
}

fn discrepancy_row(job_id: &str, pair: &DiscrepancyPair) -> ReconciliationResult {
    ReconciliationResult {
        job_id: job_id.to_string(),
        match_status: MatchStatus::Discrepancy,
        trx_id: Some(pair.transaction.id.clone()),
        trx_ref_id: Some(pair.statement.reference_id.clone()),
        system_amount: Some(pair.transaction.amount),
        bank_amount: Some(pair.statement.amount),
        discrepancy: Some(pair.discrepancy),
        bank_source: Some(pair.statement.source.clone()),
        transaction_date: Some(pair.transaction.transaction_time)
    }
}

fn unmatched_system_row(job_id: &str, transaction: &Transaction) -> ReconciliationResult {
    ReconciliationResult {
        job_id: job_id.to_string(),
        match_status: MatchStatus::UnmatchedSystem,
        trx_id: Some(transaction.id.clone()),
        trx_ref_id: None,
        system_amount: Some(transaction.amount),
        bank_amount: None,
        discrepancy: None,
        bank_source: None,
        transaction_date: Some(transaction.transaction_time)
    }
}

fn unmatched_bank_row(job_id: &str, statement: &BankStatement) -> ReconciliationResult {
    ReconciliationResult {
        job_id: job_id.to_string(),
        match_status: MatchStatus::UnmatchedBank,
        trx_id: None,
        trx_ref_id: Some(statement.reference_id.clone()),
        system_amount: None,
        bank_amount: Some(statement.amount),
        discrepancy: None,
        bank_source: Some(statement.source.clone()),
        transaction_date: Some(statement.date)
    }
}
