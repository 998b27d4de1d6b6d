#[cfg(test)]
mod tests;

use crate::models::{BankStatement, Transaction};
use std::fmt::{self, Debug, Formatter};

pub type MatchPredicate = fn(&Transaction, &BankStatement) -> bool;

/// Decides whether a transaction and a bank statement describe the same event.
///
/// `Exact` lets the engine use its hash index. A `Predicate` is checked against every indexed
/// statement in first-seen order until one matches, which costs a scan per transaction.
#[derive(Clone, Copy, Default)]
pub enum MatchingStrategy {
    #[default]
    Exact,
    Predicate(MatchPredicate)
}

impl MatchingStrategy {
    pub fn matches(&self, transaction: &Transaction, statement: &BankStatement) -> bool {
        match self {
            MatchingStrategy::Exact => transaction.id == statement.reference_id,
            MatchingStrategy::Predicate(predicate) => predicate(transaction, statement)
        }
    }
}

impl Debug for MatchingStrategy {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> fmt::Result {
        match self {
            MatchingStrategy::Exact => formatter.write_str("Exact"),
            MatchingStrategy::Predicate(_) => formatter.write_str("Predicate(..)")
        }
    }
}
