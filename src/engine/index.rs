use crate::matching::MatchingStrategy;
use crate::models::{BankStatement, Transaction};
use std::collections::hash_map::Entry;
use std::collections::HashMap;
use tracing::debug;

/// Bank statements keyed by reference id, first occurrence wins.
///
/// Claiming a key consumes it for the rest of the run. Later statements repeating a claimed key
/// are hidden from the unmatched report along with it.
pub(crate) struct StatementIndex<'a> {
    statements: &'a [BankStatement],
    first_seen: HashMap<&'a str, usize>,
    entries: Vec<usize>,
    consumed: Vec<bool>
}

impl<'a> StatementIndex<'a> {
    pub fn build(statements: &'a [BankStatement]) -> Self {
        let mut first_seen = HashMap::with_capacity(statements.len());
        let mut entries = Vec::with_capacity(statements.len());

        for (position, statement) in statements.iter().enumerate() {
            match first_seen.entry(statement.reference_id.as_str()) {
                Entry::Vacant(slot) => {
                    slot.insert(position);
                    entries.push(position);
                }
                Entry::Occupied(_) => {
                    debug!(reference_id = %statement.reference_id, source = %statement.source, "Duplicate bank reference superseded by its first occurrence");
                }
            }
        }

        Self {
            statements,
            first_seen,
            entries,
            consumed: vec![false; statements.len()]
        }
    }

    /// Finds the statement `transaction` belongs to and marks its key as consumed.
    pub fn claim(&mut self, transaction: &Transaction, strategy: MatchingStrategy) -> Option<&'a BankStatement> {
        let statements = self.statements;

        let position = match strategy {
            MatchingStrategy::Exact => self.first_seen.get(transaction.id.as_str()).copied(),
            MatchingStrategy::Predicate(_) => self.entries.iter()
                .copied()
                .find(|&position| strategy.matches(transaction, &statements[position]))
        }?;

        self.consumed[position] = true;

        Some(&statements[position])
    }

    /// Every statement whose key was never claimed, duplicates included, in input order.
    pub fn unclaimed(&self) -> Vec<BankStatement> {
        self.statements.iter()
            .filter(|statement| {
                !self.first_seen.get(statement.reference_id.as_str())
                    .is_some_and(|&position| self.consumed[position])
            })
            .cloned()
            .collect()
    }
}
