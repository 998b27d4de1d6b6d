
use crate::cli::{Cli, LogLevel};
use std::num::NonZeroUsize;
use tracing::level_filters::LevelFilter;

const DEFAULT_BATCH_SIZE: usize = 10_000;
const DEFAULT_CHANNEL_CAPACITY: usize = 256;

/// Runtime settings, resolved once at startup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AppConfig {
    /// Records handed over per parser callback.
    pub batch_size: NonZeroUsize,
    /// Transaction batches that may queue between the parser and the engine.
    pub channel_capacity: NonZeroUsize,
    pub log_level: LevelFilter
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            batch_size: NonZeroUsize::new(DEFAULT_BATCH_SIZE).unwrap_or(NonZeroUsize::MIN),
            channel_capacity: NonZeroUsize::new(DEFAULT_CHANNEL_CAPACITY).unwrap_or(NonZeroUsize::MIN),
            log_level: LevelFilter::INFO
        }
    }
}

impl From<&Cli> for AppConfig {
    fn from(cli: &Cli) -> Self {
        Self {
            batch_size: cli.batch_size,
            channel_capacity: cli.channel_capacity,
            log_level: cli.log_level.into()
        }
    }
}

impl From<LogLevel> for LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Error => LevelFilter::ERROR,
            LogLevel::Warn => LevelFilter::WARN,
            LogLevel::Info => LevelFilter::INFO,
            LogLevel::Debug => LevelFilter::DEBUG,
            LogLevel::Trace => LevelFilter::TRACE
        }
    }
}
