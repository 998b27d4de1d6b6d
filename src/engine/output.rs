use crate::models::{BankStatement, Transaction};
use rust_decimal::Decimal;

/// A transaction and statement sharing a key with equal normalized amounts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchedPair {
    pub transaction: Transaction,
    pub statement: BankStatement
}

/// A transaction and statement sharing a key whose normalized amounts disagree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiscrepancyPair {
    pub transaction: Transaction,
    pub statement: BankStatement,
    /// Absolute difference between the normalized transaction amount and the bank amount.
    pub discrepancy: Decimal
}

/// The four disjoint outcomes of one reconciliation run. Every collection is always present, possibly empty.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReconciliationOutput {
    pub matched: Vec<MatchedPair>,
    pub discrepancies: Vec<DiscrepancyPair>,
    pub unmatched_system: Vec<Transaction>,
    pub unmatched_bank: Vec<BankStatement>
}

impl ReconciliationOutput {
    pub fn total_unmatched(&self) -> usize {
        self.unmatched_system.len() + self.unmatched_bank.len()
    }

    /// Number of report rows this output flattens into.
    pub fn len(&self) -> usize {
        self.matched.len() + self.discrepancies.len() + self.total_unmatched()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
