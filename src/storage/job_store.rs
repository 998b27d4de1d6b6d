use crate::models::{MatchStatus, ReconciliationJob, ReconciliationResult};
use crate::storage::{JobStore, StorageError};
use crate::types::JobId;
use dashmap::DashMap;
use dashmap::mapref::entry::Entry;

pub struct MemoryJobStore {
    jobs: DashMap<JobId, ReconciliationJob>,
    results: DashMap<JobId, Vec<ReconciliationResult>>
}

impl MemoryJobStore {
    pub fn new() -> Self {
        Self {
            jobs: DashMap::new(),
            results: DashMap::new()
        }
    }

    /// Snapshot of every stored job, oldest first.
    pub fn jobs(&self) -> Vec<ReconciliationJob> {
        let mut jobs: Vec<ReconciliationJob> = self.jobs.iter().map(|job| job.value().clone()).collect();
        jobs.sort_by(|left, right| left.created_at.cmp(&right.created_at).then_with(|| left.job_id.cmp(&right.job_id)));

        jobs
    }

    pub fn len(&self) -> usize {
        self.jobs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.jobs.is_empty()
    }

    fn ensure_exists(&self, job_id: &str) -> Result<(), StorageError> {
        if !self.jobs.contains_key(job_id) {
            return Err(StorageError::JobNotFound(job_id.to_string()));
        }

        Ok(())
    }
}

impl Default for MemoryJobStore {
    fn default() -> Self {
        Self::new()
    }
}

impl JobStore for MemoryJobStore {
    fn create_job(&self, job: ReconciliationJob) -> Result<(), StorageError> {
        match self.jobs.entry(job.job_id.clone()) {
            Entry::Occupied(_) => Err(StorageError::DuplicateJob(job.job_id)),
            Entry::Vacant(slot) => {
                slot.insert(job);
                Ok(())
            }
        }
    }

    fn update_job(&self, job: ReconciliationJob) -> Result<(), StorageError> {
        let mut stored = self.jobs.get_mut(&job.job_id)
            .ok_or_else(|| StorageError::JobNotFound(job.job_id.clone()))?;

        *stored = job;

        Ok(())
    }

    fn job(&self, job_id: &str) -> Result<ReconciliationJob, StorageError> {
        self.jobs.get(job_id)
            .map(|job| job.value().clone())
            .ok_or_else(|| StorageError::JobNotFound(job_id.to_string()))
    }

    fn save_results(&self, job_id: &str, results: Vec<ReconciliationResult>) -> Result<(), StorageError> {
        self.ensure_exists(job_id)?;
        self.results.entry(job_id.to_string()).or_default().extend(results);

        Ok(())
    }

    fn results(&self, job_id: &str, status: Option<MatchStatus>) -> Result<Vec<ReconciliationResult>, StorageError> {
        self.ensure_exists(job_id)?;

        let Some(rows) = self.results.get(job_id) else {
            return Ok(Vec::new());
        };

        Ok(rows.iter()
            .filter(|result| status.is_none_or(|status| result.match_status == status))
            .cloned()
            .collect())
    }
}
