use std::io::{stderr, stdout, BufWriter, Write};
use std::sync::Arc;
use std::time::Instant;

use anyhow::Result;
use clap::Parser;
use tracing::info;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, Layer};

use recon_engine::cli::{Cli, OutputFormat};
use recon_engine::config::AppConfig;
use recon_engine::models::ReconciliationSummary;
use recon_engine::service::{ReconcileRequest, ReconciliationService, TransactionService};
use recon_engine::storage::{JobStore, MemoryJobStore, MemoryTransactionStore};
use recon_engine::types::{end_of_day, start_of_day};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = AppConfig::from(&cli);

    setup_logging(config.log_level);

    let jobs = Arc::new(MemoryJobStore::new());
    let transactions = Arc::new(MemoryTransactionStore::new());
    let timer = Instant::now();

    let importer = TransactionService::new(transactions.clone(), &config);
    for path in &cli.imports {
        importer.import(path.clone()).await?;
    }

    let service = ReconciliationService::new(jobs.clone(), transactions, &config);

    let request = ReconcileRequest {
        transactions: cli.transactions.clone(),
        bank_files: cli.bank_files.clone(),
        window_start: start_of_day(cli.from),
        window_end: end_of_day(cli.to)
    };

    let summary = service.reconcile(request).await?;
    let duration = timer.elapsed();

    info!(job_id = %summary.job_id, "Reconciled in: {duration:?}");

    match cli.format {
        OutputFormat::Csv => write_results_to_stdout(jobs.as_ref(), &summary.job_id)?,
        OutputFormat::Json => write_summary_to_stdout(&summary)?
    }

    Ok(())
}

fn setup_logging(level: LevelFilter) {
    //NOTE: Results go to stdout, so logging has to stay on stderr
    let terminal_log = fmt::layer()
        .with_target(false)
        .with_writer(stderr)
        .with_filter(level);

    tracing_subscriber::registry()
        .with(terminal_log)
        .init();
}

fn write_results_to_stdout(jobs: &impl JobStore, job_id: &str) -> Result<()> {
    let mut output = csv::Writer::from_writer(stdout().lock());

    output.write_record(["match_status", "trx_id", "trx_ref_id", "system_amount", "bank_amount", "discrepancy", "bank_source", "transaction_date"])?;

    for result in jobs.results(job_id, None)? {
        output.write_record([
            result.match_status.to_string(),
            result.trx_id.unwrap_or_default(),
            result.trx_ref_id.unwrap_or_default(),
            result.system_amount.map(|amount| amount.to_string()).unwrap_or_default(),
            result.bank_amount.map(|amount| amount.to_string()).unwrap_or_default(),
            result.discrepancy.map(|amount| amount.to_string()).unwrap_or_default(),
            result.bank_source.unwrap_or_default(),
            result.transaction_date.map(|date| date.to_rfc3339()).unwrap_or_default()
        ])?;
    }

    output.flush()?;

    Ok(())
}

fn write_summary_to_stdout(summary: &ReconciliationSummary) -> Result<()> {
    let mut output = BufWriter::new(stdout().lock());

    serde_json::to_writer_pretty(&mut output, summary)?;
    writeln!(output)?;
    output.flush()?;

    Ok(())
}
