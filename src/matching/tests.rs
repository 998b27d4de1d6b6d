use super::MatchingStrategy;
use crate::models::{BankStatement, Transaction, TransactionType};
use anyhow::Result;
use chrono::{TimeZone, Utc};
use rust_decimal::Decimal;
use std::str::FromStr;

fn create_pair(id: &str, reference_id: &str) -> Result<(Transaction, BankStatement)> {
    let time = Utc.with_ymd_and_hms(2024, 1, 15, 0, 0, 0).unwrap();

    let transaction = Transaction {
        id: id.to_string(),
        amount: Decimal::from_str("10.00")?,
        transaction_type: TransactionType::Credit,
        transaction_time: time
    };

    let statement = BankStatement {
        reference_id: reference_id.to_string(),
        amount: Decimal::from_str("10.00")?,
        date: time,
        source: "bank_a.csv".to_string()
    };

    Ok((transaction, statement))
}

fn same_key_ignoring_case(transaction: &Transaction, statement: &BankStatement) -> bool {
    transaction.id.eq_ignore_ascii_case(&statement.reference_id)
}

#[test]
fn test_exact_strategy_requires_identical_keys() -> Result<()> {
    let strategy = MatchingStrategy::default();

    let (transaction, statement) = create_pair("TX001", "TX001")?;
    assert!(strategy.matches(&transaction, &statement));

    let (transaction, statement) = create_pair("TX001", "tx001")?;
    assert!(!strategy.matches(&transaction, &statement));

    let (transaction, statement) = create_pair("TX001", "TX001 ")?;
    assert!(!strategy.matches(&transaction, &statement));

    Ok(())
}

#[test]
fn test_predicate_strategy_delegates_to_function() -> Result<()> {
    let strategy = MatchingStrategy::Predicate(same_key_ignoring_case);
    let (transaction, statement) = create_pair("TX001", "tx001")?;

    assert!(strategy.matches(&transaction, &statement));
    assert_eq!(format!("{strategy:?}"), "Predicate(..)");

    Ok(())
}
