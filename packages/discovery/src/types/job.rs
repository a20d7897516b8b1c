//! Discovery job records and their state machine.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::types::thesis::ThesisFilter;

/// Job lifecycle: Pending -> Running -> {Completed, Failed}.
///
/// Terminal states never transition further.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum JobStatus {
    #[default]
    Pending,
    Running,
    Completed,
    Failed,
}

impl JobStatus {
    /// Whether the job can no longer change.
    pub fn is_terminal(&self) -> bool {
        matches!(self, JobStatus::Completed | JobStatus::Failed)
    }
}

/// Parameters for a discovery run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DiscoveryRequest {
    /// Source identifiers in fetch order ("yc", "crunchbase", "angellist",
    /// "registry")
    pub sources: Vec<String>,

    /// Optional thesis-derived sector list
    pub sectors: Option<Vec<String>>,

    /// Optional thesis-derived stage list
    pub stages: Option<Vec<String>>,

    /// Maximum candidates fetched per source
    pub limit_per_source: usize,
}

impl Default for DiscoveryRequest {
    fn default() -> Self {
        Self {
            sources: vec!["yc".to_string()],
            sectors: None,
            stages: None,
            limit_per_source: 20,
        }
    }
}

impl DiscoveryRequest {
    pub fn new(sources: impl IntoIterator<Item = impl Into<String>>) -> Self {
        Self {
            sources: sources.into_iter().map(|s| s.into()).collect(),
            ..Default::default()
        }
    }

    pub fn with_sectors(mut self, sectors: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.sectors = Some(sectors.into_iter().map(|s| s.into()).collect());
        self
    }

    pub fn with_stages(mut self, stages: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.stages = Some(stages.into_iter().map(|s| s.into()).collect());
        self
    }

    pub fn with_limit_per_source(mut self, limit: usize) -> Self {
        self.limit_per_source = limit;
        self
    }

    /// Collapse the optional sector/stage lists into a filter, or None if
    /// neither was requested.
    pub fn filter(&self) -> Option<ThesisFilter> {
        if self.sectors.is_none() && self.stages.is_none() {
            return None;
        }
        Some(ThesisFilter {
            sectors: self.sectors.clone().unwrap_or_default(),
            stages: self.stages.clone().unwrap_or_default(),
            ..Default::default()
        })
    }
}

/// One discovery run, mutated exclusively by its own worker.
///
/// Readers receive cloned snapshots; `progress` is monotone non-decreasing
/// and reaches 100 exactly when the job turns terminal.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DiscoveryJob {
    pub id: Uuid,
    pub status: JobStatus,

    /// Requested source list, verbatim
    pub sources: Vec<String>,

    /// Filter in effect for this run
    pub filter: Option<ThesisFilter>,

    pub limit_per_source: usize,

    /// 0 to 100
    pub progress: u8,

    /// Source currently being fetched
    pub current_source: Option<String>,

    /// Candidates returned by connectors
    pub candidates_found: usize,

    /// Results actually persisted
    pub candidates_added: usize,

    /// Candidates skipped as duplicates
    pub candidates_skipped: usize,

    /// Cumulative, ordered error log; never cleared mid-job
    pub errors: Vec<String>,

    /// False iff the requested filter excluded every candidate and an
    /// unfiltered fallback set was substituted
    pub filters_matched: bool,

    pub created_at: DateTime<Utc>,
    pub started_at: Option<DateTime<Utc>>,
    pub completed_at: Option<DateTime<Utc>>,

    /// Wall-clock seconds from start to completion
    pub execution_time: Option<f64>,
}

impl DiscoveryJob {
    /// Create a new Pending job for a request.
    pub fn new(request: &DiscoveryRequest) -> Self {
        Self {
            id: Uuid::new_v4(),
            status: JobStatus::Pending,
            sources: request.sources.clone(),
            filter: request.filter(),
            limit_per_source: request.limit_per_source,
            progress: 0,
            current_source: None,
            candidates_found: 0,
            candidates_added: 0,
            candidates_skipped: 0,
            errors: Vec::new(),
            filters_matched: true,
            created_at: Utc::now(),
            started_at: None,
            completed_at: None,
            execution_time: None,
        }
    }

    /// Raise progress, never lowering it.
    pub fn advance_progress(&mut self, progress: u8) {
        self.progress = self.progress.max(progress.min(100));
    }

    /// Transition to Running.
    pub fn mark_running(&mut self) {
        self.status = JobStatus::Running;
        self.started_at = Some(Utc::now());
    }

    /// Transition to Completed with progress 100.
    pub fn mark_completed(&mut self) {
        self.status = JobStatus::Completed;
        self.progress = 100;
        self.finish();
    }

    /// Transition to Failed with progress 100, recording the error.
    pub fn mark_failed(&mut self, error: impl Into<String>) {
        self.status = JobStatus::Failed;
        self.progress = 100;
        self.errors.push(error.into());
        self.finish();
    }

    fn finish(&mut self) {
        let completed = Utc::now();
        self.completed_at = Some(completed);
        self.current_source = None;
        if let Some(started) = self.started_at {
            self.execution_time = Some((completed - started).num_milliseconds() as f64 / 1000.0);
        }
    }
}
