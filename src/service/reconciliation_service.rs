use crate::config::AppConfig;
use crate::engine::{ReconciliationEngine, Reconciler};
use crate::models::{BankStatement, JobStatus, MatchStatus, ReconciliationJob, ReconciliationResult, ReconciliationSummary, Transaction};
use crate::parser::{BatchError, CsvParser, ParseError, StatementDecoder, TransactionDecoder};
use crate::report::{build_results, summarize, total_discrepancy};
use crate::service::ServiceError;
use crate::storage::{JobStore, TransactionSource};
use crate::types::Timestamp;
use futures::future::join_all;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::sync::mpsc;
use tokio::task::spawn_blocking;
use tracing::{error, info, warn};
use uuid::Uuid;

/// Inputs of one reconciliation run.
#[derive(Debug, Clone)]
pub struct ReconcileRequest {
    /// System transaction CSV. When absent the transactions come from the service's [`TransactionSource`].
    pub transactions: Option<PathBuf>,
    pub bank_files: Vec<PathBuf>,
    pub window_start: Timestamp,
    pub window_end: Timestamp
}

/// Runs reconciliation jobs end to end: load, match, persist and summarize.
pub struct ReconciliationService<J, T> {
    jobs: Arc<J>,
    transactions: Arc<T>,
    engine: ReconciliationEngine,
    batch_size: usize,
    channel_capacity: usize
}

impl<J: JobStore, T: TransactionSource> ReconciliationService<J, T> {
    pub fn new(jobs: Arc<J>, transactions: Arc<T>, config: &AppConfig) -> Self {
        Self {
            jobs,
            transactions,
            engine: ReconciliationEngine::default(),
            batch_size: config.batch_size.get(),
            channel_capacity: config.channel_capacity.get()
        }
    }

    pub fn with_engine(mut self, engine: ReconciliationEngine) -> Self {
        self.engine = engine;
        self
    }

    /// Creates a job for `request`, reconciles it and returns the job summary.
    ///
    /// # Errors
    /// Returns `ServiceError` if:
    /// - The window is inverted. No job is created in that case.
    /// - No bank statement could be loaded from any of the bank files.
    /// - The transaction file cannot be read, or a store or blocking task fails.
    ///
    /// Every failure after the job was created leaves it `FAILED` with the error message.
    pub async fn reconcile(&self, request: ReconcileRequest) -> Result<ReconciliationSummary, ServiceError> {
        ReconciliationEngine::validate_window(request.window_start, request.window_end)?;

        let mut job = ReconciliationJob::new(Uuid::new_v4().to_string(), request.window_start, request.window_end);
        self.jobs.create_job(job.clone())?;

        info!(job_id = %job.job_id, bank_files = request.bank_files.len(), "Starting reconciliation job");

        match self.run(&mut job, &request).await {
            Ok(results) => {
                info!(job_id = %job.job_id, "Reconciliation job completed");
                Ok(summarize(&job, &results))
            }
            Err(error) => {
                self.fail_job(job, &error);
                Err(error)
            }
        }
    }

    pub fn job_status(&self, job_id: &str) -> Result<ReconciliationJob, ServiceError> {
        Ok(self.jobs.job(job_id)?)
    }

    /// Rebuilds the summary of a finished job from the stored rows.
    pub fn job_summary(&self, job_id: &str) -> Result<ReconciliationSummary, ServiceError> {
        let job = self.jobs.job(job_id)?;
        let mut results = Vec::new();

        for status in [MatchStatus::Discrepancy, MatchStatus::UnmatchedSystem, MatchStatus::UnmatchedBank] {
            results.extend(self.jobs.results(job_id, Some(status))?);
        }

        Ok(summarize(&job, &results))
    }

    async fn run(&self, job: &mut ReconciliationJob, request: &ReconcileRequest) -> Result<Vec<ReconciliationResult>, ServiceError> {
        job.transition(JobStatus::Processing);
        self.jobs.update_job(job.clone())?;

        let (start, end) = (request.window_start, request.window_end);

        let statements: Vec<BankStatement> = self.load_statements(&request.bank_files).await?
            .into_iter()
            .filter(|statement| statement.occurred_within(start, end))
            .collect();

        let mut reconciler = self.engine.begin(&statements, start, end)?;

        match &request.transactions {
            Some(path) => self.stream_transactions(path.clone(), start, end, &mut reconciler).await?,
            None => reconciler.push_all(self.transactions.by_date_range(start, end)?)?
        }

        let processed = reconciler.processed() + statements.len();
        let output = reconciler.finish();
        let discrepancy_total = total_discrepancy(&output)?;
        let results = build_results(&job.job_id, &output);

        if let Err(error) = self.jobs.save_results(&job.job_id, results.clone()) {
            error!(job_id = %job.job_id, "Failed to save reconciliation results: {error}");
        }

        job.total_processed = processed;
        job.total_matched = output.matched.len();
        job.total_unmatched = output.total_unmatched();
        job.total_discrepancies = discrepancy_total;
        job.transition(JobStatus::Completed);

        if let Err(error) = self.jobs.update_job(job.clone()) {
            error!(job_id = %job.job_id, "Failed to update job: {error}");
        }

        Ok(results)
    }

    /// Parses every bank file on its own blocking task. A file that fails is logged and left out.
    async fn load_statements(&self, bank_files: &[PathBuf]) -> Result<Vec<BankStatement>, ServiceError> {
        let loads = bank_files.iter().cloned().map(|path| {
            let batch_size = self.batch_size;
            spawn_blocking(move || load_bank_file(&path, batch_size))
        });

        let mut statements = Vec::new();

        for (path, loaded) in bank_files.iter().zip(join_all(loads).await) {
            match loaded? {
                Ok(file_statements) => statements.extend(file_statements),
                Err(error) => warn!(file = %path.display(), "Failed to load bank statements: {error}")
            }
        }

        if statements.is_empty() {
            return Err(ServiceError::NoBankStatements { files: bank_files.len() });
        }

        Ok(statements)
    }

    /// Feeds the transaction file into `reconciler` batch by batch, keeping only rows inside the window.
    async fn stream_transactions(
        &self,
        path: PathBuf,
        start: Timestamp,
        end: Timestamp,
        reconciler: &mut Reconciler<'_>
    ) -> Result<(), ServiceError> {
        let (sender, mut receiver) = mpsc::channel::<Vec<Transaction>>(self.channel_capacity);
        let batch_size = self.batch_size;

        let parse_handle = spawn_blocking(move || {
            CsvParser::new(TransactionDecoder).parse(&path, batch_size, |batch| {
                sender.blocking_send(batch)
                    .map_err(|_| BatchError::from("transaction receiver closed"))
            })
        });

        while let Some(batch) = receiver.recv().await {
            reconciler.push_all(batch.into_iter().filter(|transaction| transaction.occurred_within(start, end)))?;
        }

        parse_handle.await??;

        Ok(())
    }

    fn fail_job(&self, mut job: ReconciliationJob, cause: &ServiceError) {
        error!(job_id = %job.job_id, "Reconciliation job failed: {cause}");

        job.error_message = Some(cause.to_string());
        job.transition(JobStatus::Failed);

        if let Err(error) = self.jobs.update_job(job) {
            error!("Failed to mark job as failed: {error}");
        }
    }
}

/// Bank feeds are labelled with the file name they were read from.
fn source_label(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

fn load_bank_file(path: &Path, batch_size: usize) -> Result<Vec<BankStatement>, ParseError> {
    let mut statements = Vec::new();

    CsvParser::new(StatementDecoder::new(source_label(path))).parse(path, batch_size, |batch| {
        statements.extend(batch);
        Ok(())
    })?;

    Ok(statements)
}
