//! Registry of discovery job records.
//!
//! Each job gets its own lock so a worker mutating one record never blocks
//! readers of another; the outer map is only locked for insert and lookup.
//! Readers always receive cloned snapshots.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};
use uuid::Uuid;

use crate::types::job::DiscoveryJob;

/// Shared store of job records keyed by job id.
pub struct JobRegistry {
    jobs: RwLock<HashMap<Uuid, Arc<RwLock<DiscoveryJob>>>>,
}

impl Default for JobRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl JobRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self {
            jobs: RwLock::new(HashMap::new()),
        }
    }

    /// Insert a job and return its record handle.
    pub fn insert(&self, job: DiscoveryJob) -> Arc<RwLock<DiscoveryJob>> {
        let record = Arc::new(RwLock::new(job));
        let id = record.read().unwrap().id;
        self.jobs.write().unwrap().insert(id, Arc::clone(&record));
        record
    }

    /// The live record for a job, if known.
    pub fn record(&self, job_id: Uuid) -> Option<Arc<RwLock<DiscoveryJob>>> {
        self.jobs.read().unwrap().get(&job_id).cloned()
    }

    /// A point-in-time snapshot of one job.
    pub fn snapshot(&self, job_id: Uuid) -> Option<DiscoveryJob> {
        self.record(job_id).map(|r| r.read().unwrap().clone())
    }

    /// Snapshots of all known jobs.
    pub fn snapshots(&self) -> Vec<DiscoveryJob> {
        self.jobs
            .read()
            .unwrap()
            .values()
            .map(|r| r.read().unwrap().clone())
            .collect()
    }

    /// Number of tracked jobs.
    pub fn len(&self) -> usize {
        self.jobs.read().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.jobs.read().unwrap().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::job::{DiscoveryRequest, JobStatus};

    #[test]
    fn snapshot_reflects_record_mutations() {
        let registry = JobRegistry::new();
        let record = registry.insert(DiscoveryJob::new(&DiscoveryRequest::new(["yc"])));
        let job_id = record.read().unwrap().id;

        assert_eq!(
            registry.snapshot(job_id).unwrap().status,
            JobStatus::Pending
        );

        record.write().unwrap().mark_running();

        assert_eq!(
            registry.snapshot(job_id).unwrap().status,
            JobStatus::Running
        );
    }

    #[test]
    fn unknown_job_has_no_snapshot() {
        let registry = JobRegistry::new();
        assert!(registry.snapshot(Uuid::new_v4()).is_none());
        assert!(registry.is_empty());
    }

    #[test]
    fn snapshots_are_detached_clones() {
        let registry = JobRegistry::new();
        let record = registry.insert(DiscoveryJob::new(&DiscoveryRequest::new(["yc"])));
        let job_id = record.read().unwrap().id;

        let snapshot = registry.snapshot(job_id).unwrap();
        record.write().unwrap().mark_running();

        assert_eq!(snapshot.status, JobStatus::Pending);
        assert_eq!(registry.len(), 1);
    }
}
