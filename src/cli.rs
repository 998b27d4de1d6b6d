use chrono::NaiveDate;
use clap::{Parser, ValueEnum};
use std::num::NonZeroUsize;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "recon-engine", version, about = "Reconciles system transactions against bank statements")]
pub struct Cli {
    #[arg(long, help = "First day of the reconciliation window (YYYY-MM-DD)")]
    pub from: NaiveDate,
    #[arg(long, help = "Last day of the reconciliation window, included in full (YYYY-MM-DD)")]
    pub to: NaiveDate,
    #[arg(
        long,
        conflicts_with = "imports",
        required_unless_present = "imports",
        help = "System transaction CSV (trx_id,amount,type,transaction_time), streamed straight into the engine"
    )]
    pub transactions: Option<PathBuf>,
    #[arg(
        long = "import",
        value_name = "FILE",
        help = "System transaction CSV imported into the transaction store before reconciling; may be repeated"
    )]
    pub imports: Vec<PathBuf>,
    #[arg(required = true, num_args = 1.., help = "Bank statement CSVs (trx_ref_id,amount,date)")]
    pub bank_files: Vec<PathBuf>,
    #[arg(long, value_enum, default_value_t = OutputFormat::Csv)]
    pub format: OutputFormat,
    #[arg(long, env = "BATCH_SIZE", default_value = "10000")]
    pub batch_size: NonZeroUsize,
    #[arg(long, env = "CHANNEL_CAPACITY", default_value = "256")]
    pub channel_capacity: NonZeroUsize,
    #[arg(long, env = "LOG_LEVEL", value_enum, default_value_t = LogLevel::Info)]
    pub log_level: LogLevel
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Every result row as CSV
    Csv,
    /// The job summary as pretty-printed JSON
    Json
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace
}
