use crate::engine::index::StatementIndex;
use crate::engine::{DiscrepancyPair, MatchedPair, ReconciliationOutput, ValidationError};
use crate::matching::MatchingStrategy;
use crate::models::{BankStatement, Transaction};
use crate::types::Timestamp;
use tracing::info;

/// Two-phase hash join of system transactions against bank statements.
///
/// The engine holds nothing but its matching strategy, so a single instance can be copied or
/// shared between threads and every call is independent of the ones before it.
#[derive(Debug, Clone, Copy, Default)]
pub struct ReconciliationEngine {
    strategy: MatchingStrategy
}

impl ReconciliationEngine {
    pub fn new(strategy: MatchingStrategy) -> Self {
        Self { strategy }
    }

    pub fn validate_window(window_start: Timestamp, window_end: Timestamp) -> Result<(), ValidationError> {
        if window_start > window_end {
            return Err(ValidationError::InvalidWindow { start: window_start, end: window_end });
        }

        Ok(())
    }

    /// Reconciles a complete set of transactions against `statements`.
    ///
    /// # Errors
    /// Returns `ValidationError` if:
    /// - `window_start` is after `window_end`, in which case no work is done.
    /// - A matched pair's amounts are too far apart for their difference to be represented.
    pub fn reconcile<I>(
        &self,
        transactions: I,
        statements: &[BankStatement],
        window_start: Timestamp,
        window_end: Timestamp
    ) -> Result<ReconciliationOutput, ValidationError>
    where
        I: IntoIterator<Item = Transaction>
    {
        let mut reconciler = self.begin(statements, window_start, window_end)?;
        reconciler.push_all(transactions)?;

        Ok(reconciler.finish())
    }

    /// Indexes `statements` and returns a [`Reconciler`] that accepts transactions incrementally.
    ///
    /// This is the streaming form of [`ReconciliationEngine::reconcile`]: only the bank side has to be
    /// held in memory, transactions can arrive batch by batch straight from a parser.
    pub fn begin<'a>(
        &self,
        statements: &'a [BankStatement],
        window_start: Timestamp,
        window_end: Timestamp
    ) -> Result<Reconciler<'a>, ValidationError> {
        Self::validate_window(window_start, window_end)?;

        info!(bank_count = statements.len(), %window_start, %window_end, strategy = ?self.strategy, "Starting reconciliation");

        Ok(Reconciler {
            strategy: self.strategy,
            index: StatementIndex::build(statements),
            output: ReconciliationOutput::default(),
            processed: 0
        })
    }
}

/// An in-progress reconciliation over a fixed set of bank statements.
pub struct Reconciler<'a> {
    strategy: MatchingStrategy,
    index: StatementIndex<'a>,
    output: ReconciliationOutput,
    processed: usize
}

impl Reconciler<'_> {
    /// Classifies one transaction as matched, discrepant or unmatched-system.
    pub fn push(&mut self, transaction: Transaction) -> Result<(), ValidationError> {
        self.processed += 1;

        let Some(statement) = self.index.claim(&transaction, self.strategy) else {
            self.output.unmatched_system.push(transaction);
            return Ok(());
        };

        let discrepancy = transaction.normalized_amount()
            .checked_sub(statement.amount)
            .ok_or_else(|| ValidationError::amount_overflow(&transaction, statement))?
            .abs();
        let statement = statement.clone();

        if discrepancy.is_zero() {
            self.output.matched.push(MatchedPair { transaction, statement });
        } else {
            self.output.discrepancies.push(DiscrepancyPair { transaction, statement, discrepancy });
        }

        Ok(())
    }

    /// Pushes every transaction in order, stopping at the first one that cannot be classified.
    pub fn push_all<I>(&mut self, transactions: I) -> Result<(), ValidationError>
    where
        I: IntoIterator<Item = Transaction>
    {
        for transaction in transactions {
            self.push(transaction)?;
        }

        Ok(())
    }

    /// Number of transactions pushed so far.
    pub fn processed(&self) -> usize {
        self.processed
    }

    /// Collects the unclaimed statements and returns the finished output.
    pub fn finish(self) -> ReconciliationOutput {
        let mut output = self.output;
        output.unmatched_bank = self.index.unclaimed();

        info!(
            processed = self.processed,
            matched = output.matched.len(),
            discrepancies = output.discrepancies.len(),
            unmatched_system = output.unmatched_system.len(),
            unmatched_bank = output.unmatched_bank.len(),
            "Reconciliation completed"
        );

        output
    }
}
