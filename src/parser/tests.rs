use super::{CsvParser, ParseError, RecordError, StatementDecoder, TransactionDecoder};
use crate::models::{BankStatement, Transaction, TransactionType};
use anyhow::Result;
use chrono::{TimeZone, Utc};
use rust_decimal::Decimal;
use std::io::Write;
use std::str::FromStr;
use tempfile::NamedTempFile;

fn create_temporary_csv(content: &str) -> Result<NamedTempFile> {
    let mut file = NamedTempFile::new()?;
    write!(file, "{content}")?;

    Ok(file)
}

fn collect_statements(content: &str, batch_size: usize) -> Result<Vec<BankStatement>, ParseError> {
    let parser = CsvParser::new(StatementDecoder::new("TestBank"));
    let mut statements = Vec::new();

    parser.parse_reader("inline", content.as_bytes(), batch_size, |batch| {
        statements.extend(batch);
        Ok(())
    })?;

    Ok(statements)
}

fn collect_transactions(content: &str) -> Result<Vec<Transaction>, ParseError> {
    let parser = CsvParser::new(TransactionDecoder);
    let mut transactions = Vec::new();

    parser.parse_reader("inline", content.as_bytes(), 100, |batch| {
        transactions.extend(batch);
        Ok(())
    })?;

    Ok(transactions)
}

#[test]
fn test_bank_statements_parse_from_file() -> Result<()> {
    let file = create_temporary_csv("trx_ref_id,amount,date\nTX001,100.50,2024-01-15\nTX002,-200.75,2024-01-16\nTX003,300.00,2024-01-17\n")?;
    let parser = CsvParser::new(StatementDecoder::new("TestBank"));
    let mut statements = Vec::new();

    parser.parse(file.path(), 100, |batch| {
        statements.extend(batch);
        Ok(())
    })?;

    assert_eq!(statements.len(), 3);
    assert_eq!(statements[0].reference_id, "TX001");
    assert_eq!(statements[0].source, "TestBank");
    assert_eq!(statements[1].amount, Decimal::from_str("-200.75")?);
    assert_eq!(statements[2].date, Utc.with_ymd_and_hms(2024, 1, 17, 0, 0, 0).unwrap());

    Ok(())
}

#[test]
fn test_transactions_parse_with_direction_and_time() -> Result<()> {
    let transactions = collect_transactions(
        "trx_id,amount,type,transaction_time\nTX001,100.00,DEBIT,2024-01-15T10:00:00Z\nTX002,200.00,credit,2024-01-16 11:00:00\n"
    )?;

    assert_eq!(transactions.len(), 2);
    assert_eq!(transactions[0].id, "TX001");
    assert_eq!(transactions[0].transaction_type, TransactionType::Debit);
    assert_eq!(transactions[0].transaction_time, Utc.with_ymd_and_hms(2024, 1, 15, 10, 0, 0).unwrap());
    assert_eq!(transactions[1].transaction_type, TransactionType::Credit);
    assert_eq!(transactions[1].amount, Decimal::from_str("200.00")?);

    Ok(())
}

#[test]
fn test_header_is_normalized_and_extra_columns_are_ignored() -> Result<()> {
    let statements = collect_statements(" Date , NOTES, Amount ,TRX_REF_ID\n2024/01/15, rent , -50.00 , TX010 \n", 10)?;

    assert_eq!(statements.len(), 1);
    assert_eq!(statements[0].reference_id, "TX010");
    assert_eq!(statements[0].amount, Decimal::from_str("-50.00")?);

    Ok(())
}

#[test]
fn test_missing_required_column_fails_before_any_batch() {
    let parser = CsvParser::new(StatementDecoder::new("TestBank"));
    let mut calls = 0;

    let result = parser.parse_reader("inline", "id,value\n1,100\n".as_bytes(), 1, |_| {
        calls += 1;
        Ok(())
    });

    match result {
        Err(ParseError::Schema { missing, .. }) => assert_eq!(missing, vec!["trx_ref_id", "amount", "date"]),
        other => panic!("expected a schema error, got {other:?}")
    }

    assert_eq!(calls, 0);
}

#[test]
fn test_transaction_schema_requires_type_column() {
    let result = collect_transactions("trx_id,amount,transaction_time\nTX001,1.00,2024-01-15\n");

    assert!(matches!(result, Err(ParseError::Schema { ref missing, .. }) if missing == &vec!["type".to_string()]));
}

#[test]
fn test_empty_source_is_a_schema_error() {
    assert!(matches!(collect_statements("", 10), Err(ParseError::Schema { .. })));
}

#[test]
fn test_missing_file_fails_to_open() {
    let parser = CsvParser::new(TransactionDecoder);
    let result = parser.parse("definitely/not/here.csv", 10, |_| Ok(()));

    assert!(matches!(result, Err(ParseError::Open { .. })));
}

#[test]
fn test_malformed_transaction_rows_are_skipped() -> Result<()> {
    let transactions = collect_transactions(concat!(
        "trx_id,amount,type,transaction_time\n",
        "TX001,100.00,DEBIT,2024-01-15T10:00:00Z\n",
        "TX002,invalid,CREDIT,2024-01-16T11:00:00Z\n",
        "TX003,300.00,INVALID_TYPE,2024-01-17T12:00:00Z\n",
        "TX004,400.00,CREDIT,2024-01-18T13:00:00Z\n",
        "TX005,-5.00,CREDIT,2024-01-18T13:00:00Z\n",
        "TX006,6.00,DEBIT,not-a-date\n",
        ",7.00,DEBIT,2024-01-18\n",
        "TX008,8.00\n"
    ))?;

    let ids: Vec<&str> = transactions.iter().map(|transaction| transaction.id.as_str()).collect();

    assert_eq!(ids, vec!["TX001", "TX004"]);

    Ok(())
}

#[test]
fn test_malformed_bank_rows_are_skipped() -> Result<()> {
    let statements = collect_statements(concat!(
        "trx_ref_id,amount,date\n",
        "TX001,invalid_amount,2024-01-15\n",
        "TX002,10.00,2024-13-45\n",
        "TX003,,2024-01-15\n",
        "   ,10.00,2024-01-15\n",
        "TX005,12.34,15/01/2024\n"
    ), 10)?;

    assert_eq!(statements.len(), 1);
    assert_eq!(statements[0].reference_id, "TX005");

    Ok(())
}

#[test]
fn test_records_report_row_errors_with_line_numbers() -> Result<()> {
    let parser = CsvParser::new(StatementDecoder::new("TestBank"));
    let content = "trx_ref_id,amount,date\nTX001,1.00,2024-01-15\nTX002,abc,2024-01-15\nTX003,3.00,someday\n";

    let results: Vec<_> = parser.records("inline", content.as_bytes())?.collect();

    assert_eq!(results.len(), 3);
    assert!(results[0].is_ok());
    assert!(matches!(results[1], Err(RecordError::InvalidAmount { line: 3, .. })));
    assert!(matches!(results[2], Err(RecordError::InvalidTimestamp { line: 4, column: "date", .. })));

    Ok(())
}

#[test]
fn test_batches_are_full_except_the_last() -> Result<()> {
    let parser = CsvParser::new(StatementDecoder::new("TestBank"));
    let content = "trx_ref_id,amount,date\nA,1,2024-01-01\nB,2,2024-01-01\nC,3,2024-01-01\nD,4,2024-01-01\nE,5,2024-01-01\n";
    let mut sizes = Vec::new();

    parser.parse_reader("inline", content.as_bytes(), 2, |batch| {
        sizes.push(batch.len());
        Ok(())
    })?;

    assert_eq!(sizes, vec![2, 2, 1]);

    Ok(())
}

#[test]
fn test_zero_batch_size_behaves_like_one() -> Result<()> {
    let parser = CsvParser::new(StatementDecoder::new("TestBank"));
    let content = "trx_ref_id,amount,date\nA,1,2024-01-01\nB,2,2024-01-01\n";
    let mut sizes = Vec::new();

    parser.parse_reader("inline", content.as_bytes(), 0, |batch| {
        sizes.push(batch.len());
        Ok(())
    })?;

    assert_eq!(sizes, vec![1, 1]);

    Ok(())
}

#[test]
fn test_no_callback_when_every_row_is_malformed() -> Result<()> {
    let parser = CsvParser::new(StatementDecoder::new("TestBank"));
    let mut calls = 0;

    parser.parse_reader("inline", "trx_ref_id,amount,date\nA,x,2024-01-01\n".as_bytes(), 10, |_| {
        calls += 1;
        Ok(())
    })?;

    assert_eq!(calls, 0);

    Ok(())
}

#[test]
fn test_callback_failure_stops_parsing_immediately() {
    let parser = CsvParser::new(StatementDecoder::new("TestBank"));
    let content = "trx_ref_id,amount,date\nA,1,2024-01-01\nB,2,2024-01-01\nC,3,2024-01-01\nD,4,2024-01-01\n";
    let mut calls = 0;

    let result = parser.parse_reader("inline", content.as_bytes(), 2, |_| {
        calls += 1;
        Err("storage unavailable".into())
    });

    match result {
        Err(ParseError::Callback { origin, line, error }) => {
            assert_eq!(origin, "inline");
            assert_eq!(line, 3);
            assert_eq!(error.to_string(), "storage unavailable");
        }
        other => panic!("expected a callback error, got {other:?}")
    }

    assert_eq!(calls, 1);
}

#[test]
fn test_zero_transaction_amount_is_rejected() -> Result<()> {
    let parser = CsvParser::new(TransactionDecoder);
    let content = "trx_id,amount,type,transaction_time\nTX001,0.00,DEBIT,2024-01-15\nTX002,-0,CREDIT,2024-01-15\nTX003,0.01,CREDIT,2024-01-15\n";

    let results: Vec<_> = parser.records("inline", content.as_bytes())?.collect();

    assert!(matches!(results[0], Err(RecordError::ZeroAmount { line: 2 })));
    assert!(matches!(results[1], Err(RecordError::ZeroAmount { line: 3 })));
    assert!(results[2].is_ok());

    Ok(())
}

#[test]
fn test_amounts_beyond_the_limit_are_rejected_on_both_sides() -> Result<()> {
    let transactions = CsvParser::new(TransactionDecoder);
    let content = "trx_id,amount,type,transaction_time\nTX001,79228162514264337593543950335,CREDIT,2024-01-15\nTX002,39614081257132168796771975167,CREDIT,2024-01-15\n";

    let results: Vec<_> = transactions.records("inline", content.as_bytes())?.collect();

    assert!(matches!(results[0], Err(RecordError::AmountOutOfRange { line: 2, .. })));
    assert!(results[1].is_ok());

    let statements = collect_statements(concat!(
        "trx_ref_id,amount,date\n",
        "TX001,-79228162514264337593543950335,2024-01-15\n",
        "TX002,-39614081257132168796771975167,2024-01-15\n"
    ), 10)?;

    assert_eq!(statements.len(), 1);
    assert_eq!(statements[0].reference_id, "TX002");

    Ok(())
}
