use anyhow::{anyhow, Result};
use rust_decimal::Decimal;
use serde_json::Value;
use std::collections::HashMap;
use std::path::Path;
use std::process::{Command, Output};
use std::str::FromStr;

fn run_sample(extra_args: &[&str]) -> Result<Output> {
    let binary_path = env!("CARGO_BIN_EXE_recon-engine");
    let samples = Path::new("samples");

    let output = Command::new(binary_path)
        .args(["--from", "2024-01-01", "--to", "2024-01-31"])
        .arg("--transactions")
        .arg(samples.join("transactions.csv"))
        .arg(samples.join("bank_alpha.csv"))
        .arg(samples.join("bank_beta.csv"))
        .args(extra_args)
        .env_remove("BATCH_SIZE")
        .env_remove("CHANNEL_CAPACITY")
        .env("LOG_LEVEL", "error")
        .output()?;

    Ok(output)
}

#[test]
fn test_cli_writes_result_rows_as_csv() -> Result<()> {
    let output = run_sample(&[])?;

    assert!(output.status.success());

    let stdout = String::from_utf8(output.stdout)?;
    let mut lines = stdout.lines();

    assert_eq!(
        lines.next(),
        Some("match_status,trx_id,trx_ref_id,system_amount,bank_amount,discrepancy,bank_source,transaction_date")
    );

    let mut statuses: HashMap<String, usize> = HashMap::new();

    for line in lines {
        let fields: Vec<&str> = line.split(',').collect();

        assert_eq!(fields.len(), 8);
        *statuses.entry(fields[0].to_string()).or_default() += 1;
    }

    assert_eq!(statuses.get("MATCHED"), Some(&4));
    assert_eq!(statuses.get("DISCREPANCY"), Some(&1));
    assert_eq!(statuses.get("UNMATCHED_SYSTEM"), Some(&2));
    assert_eq!(statuses.get("UNMATCHED_BANK"), Some(&2));

    Ok(())
}

#[test]
fn test_cli_discrepancy_row_carries_both_sides() -> Result<()> {
    let output = run_sample(&["--batch-size", "2", "--channel-capacity", "1"])?;

    assert!(output.status.success());

    let stdout = String::from_utf8(output.stdout)?;
    let row = stdout.lines()
        .find(|line| line.starts_with("DISCREPANCY"))
        .ok_or_else(|| anyhow!("discrepancy row missing from output"))?;
    let fields: Vec<&str> = row.split(',').collect();

    assert_eq!(fields[1], "TRX00000004");
    assert_eq!(fields[2], "TRX00000004");
    assert_eq!(Decimal::from_str(fields[3])?, Decimal::from_str("1200.50")?);
    assert_eq!(Decimal::from_str(fields[4])?, Decimal::from_str("1250.50")?);
    assert_eq!(Decimal::from_str(fields[5])?, Decimal::from(50));
    assert_eq!(fields[6], "bank_alpha.csv");

    Ok(())
}

#[test]
fn test_cli_json_summary_reports_totals() -> Result<()> {
    let output = run_sample(&["--format", "json"])?;

    assert!(output.status.success());

    let summary: Value = serde_json::from_slice(&output.stdout)?;

    assert_eq!(summary["total_processed"], 14);
    assert_eq!(summary["total_matched"], 4);
    assert_eq!(summary["total_unmatched"], 4);

    let total_discrepancies = summary["total_discrepancies"].as_str()
        .ok_or_else(|| anyhow!("total_discrepancies is not a string"))?;
    assert_eq!(Decimal::from_str(total_discrepancies)?, Decimal::from(50));

    let unmatched_bank = summary["unmatched_bank"].as_object()
        .ok_or_else(|| anyhow!("unmatched_bank is not an object"))?;
    let mut sources: Vec<&String> = unmatched_bank.keys().collect();
    sources.sort();

    assert_eq!(sources, vec!["bank_alpha.csv", "bank_beta.csv"]);

    Ok(())
}

#[test]
fn test_cli_rejects_inverted_window() -> Result<()> {
    let binary_path = env!("CARGO_BIN_EXE_recon-engine");
    let samples = Path::new("samples");

    let output = Command::new(binary_path)
        .args(["--from", "2024-02-01", "--to", "2024-01-01"])
        .arg("--transactions")
        .arg(samples.join("transactions.csv"))
        .arg(samples.join("bank_alpha.csv"))
        .output()?;

    assert!(!output.status.success());
    assert!(output.stdout.is_empty());

    Ok(())
}

#[test]
fn test_cli_requires_a_bank_file() -> Result<()> {
    let binary_path = env!("CARGO_BIN_EXE_recon-engine");

    let output = Command::new(binary_path)
        .args(["--from", "2024-01-01", "--to", "2024-01-31", "--transactions", "samples/transactions.csv"])
        .output()?;

    assert!(!output.status.success());

    Ok(())
}

#[test]
fn test_cli_imported_transactions_give_the_same_totals() -> Result<()> {
    let binary_path = env!("CARGO_BIN_EXE_recon-engine");
    let samples = Path::new("samples");

    let output = Command::new(binary_path)
        .args(["--from", "2024-01-01", "--to", "2024-01-31", "--format", "json"])
        .arg("--import")
        .arg(samples.join("transactions.csv"))
        .arg(samples.join("bank_alpha.csv"))
        .arg(samples.join("bank_beta.csv"))
        .env("LOG_LEVEL", "error")
        .output()?;

    assert!(output.status.success());

    let summary: Value = serde_json::from_slice(&output.stdout)?;

    assert_eq!(summary["total_processed"], 14);
    assert_eq!(summary["total_matched"], 4);
    assert_eq!(summary["total_unmatched"], 4);

    Ok(())
}
