//! Job manager and background worker.
//!
//! `start` allocates a job record and spawns a worker task, returning
//! immediately; pollers follow along via `status` and `results`. The worker
//! contains failures at two levels: a source that errors is logged on the
//! job and skipped, and a candidate that fails to process is logged and
//! skipped, so one bad upstream never sinks the run. Cancellation (per job
//! or via `shutdown`) marks the job Failed, and a panic escaping the worker
//! is supervised into the same terminal state.

use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock};
use std::time::Duration;

use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::error::{DiscoveryError, Result};
use crate::filter;
use crate::jobs::registry::JobRegistry;
use crate::normalize::{normalize_sector, normalize_stage};
use crate::scoring::ScoringEngine;
use crate::traits::connector::{SourceConnector, SourceId};
use crate::traits::insight::InsightProvider;
use crate::traits::store::{ResultStore, ThesisProvider};
use crate::types::job::{DiscoveryJob, DiscoveryRequest, JobStatus};
use crate::types::result::DiscoveryResult;
use crate::types::thesis::ThesisFilter;

/// Per-call ceiling for best-effort insight generation.
const INSIGHT_TIMEOUT: Duration = Duration::from_secs(30);

/// Handle returned by [`JobManager::start`].
#[derive(Debug)]
pub struct JobHandle {
    pub job_id: Uuid,
    task: JoinHandle<()>,
}

impl JobHandle {
    /// Wait for the worker to finish. Useful in tests and shutdown paths;
    /// pollers normally use [`JobManager::status`] instead.
    pub async fn wait(self) -> Uuid {
        // The supervisor converts a worker panic into a Failed job, so the
        // record is always terminal once this returns.
        let _ = self.task.await;
        self.job_id
    }
}

/// Orchestrates discovery runs across the configured sources.
pub struct JobManager {
    registry: Arc<JobRegistry>,
    store: Arc<dyn ResultStore>,
    connectors: Arc<HashMap<SourceId, Arc<dyn SourceConnector>>>,
    scoring: Arc<ScoringEngine>,
    insights: Option<Arc<dyn InsightProvider>>,
    thesis: Option<Arc<dyn ThesisProvider>>,
    shutdown: CancellationToken,
    tokens: Arc<RwLock<HashMap<Uuid, CancellationToken>>>,
}

impl JobManager {
    /// Create a manager over a result store and a connector set.
    pub fn new(
        store: Arc<dyn ResultStore>,
        connectors: HashMap<SourceId, Arc<dyn SourceConnector>>,
    ) -> Self {
        Self {
            registry: Arc::new(JobRegistry::new()),
            store,
            connectors: Arc::new(connectors),
            scoring: Arc::new(ScoringEngine::default()),
            insights: None,
            thesis: None,
            shutdown: CancellationToken::new(),
            tokens: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Replace the default scoring engine.
    pub fn with_scoring(mut self, scoring: ScoringEngine) -> Self {
        self.scoring = Arc::new(scoring);
        self
    }

    /// Attach a best-effort insight provider.
    pub fn with_insights(mut self, insights: Arc<dyn InsightProvider>) -> Self {
        self.insights = Some(insights);
        self
    }

    /// Attach a thesis provider consulted when a request carries no
    /// explicit sector/stage lists.
    pub fn with_thesis_provider(mut self, thesis: Arc<dyn ThesisProvider>) -> Self {
        self.thesis = Some(thesis);
        self
    }

    /// The job registry (for listing or inspecting jobs directly).
    pub fn registry(&self) -> &JobRegistry {
        &self.registry
    }

    /// Start a discovery run. Returns as soon as the job record exists;
    /// the fetch/score/persist pipeline runs on a spawned worker.
    pub async fn start(&self, request: DiscoveryRequest) -> Result<JobHandle> {
        if self.shutdown.is_cancelled() {
            return Err(DiscoveryError::Cancelled);
        }

        let mut job = DiscoveryJob::new(&request);

        // Requests without explicit lists inherit the investor's thesis.
        if job.filter.is_none() {
            if let Some(provider) = &self.thesis {
                match provider.thesis().await {
                    Ok(thesis) => job.filter = thesis.filter(|f| !f.is_empty()),
                    Err(error) => {
                        warn!(error = %error, "thesis lookup failed, running unfiltered");
                    }
                }
            }
        }

        let job_id = job.id;
        info!(job_id = %job_id, sources = ?job.sources, "starting discovery job");

        let record = self.registry.insert(job);
        let token = self.shutdown.child_token();
        self.tokens
            .write()
            .unwrap()
            .insert(job_id, token.clone());

        let worker = Worker {
            record: Arc::clone(&record),
            store: Arc::clone(&self.store),
            connectors: Arc::clone(&self.connectors),
            scoring: Arc::clone(&self.scoring),
            insights: self.insights.clone(),
            tokens: Arc::clone(&self.tokens),
            token,
        };

        // Supervise the worker so a panic escaping it (a buggy connector or
        // store impl, a poisoned lock) still lands the job in Failed instead
        // of stranding it in Running.
        let tokens = Arc::clone(&self.tokens);
        let task = tokio::spawn(async move {
            if let Err(error) = tokio::spawn(worker.run()).await {
                warn!(job_id = %job_id, error = %error, "discovery worker panicked");
                let mut job = record.write().unwrap_or_else(PoisonError::into_inner);
                if !job.status.is_terminal() {
                    job.mark_failed(format!("worker panicked: {error}"));
                }
                drop(job);
                tokens
                    .write()
                    .unwrap_or_else(PoisonError::into_inner)
                    .remove(&job_id);
            }
        });

        Ok(JobHandle { job_id, task })
    }

    /// A snapshot of one job's state.
    pub fn status(&self, job_id: Uuid) -> Result<DiscoveryJob> {
        self.registry
            .snapshot(job_id)
            .ok_or(DiscoveryError::JobNotFound { job_id })
    }

    /// Paginated results for a job, best scores first.
    ///
    /// Valid once the job is past Pending; a Failed job still exposes the
    /// partial results it persisted before failing.
    pub async fn results(
        &self,
        job_id: Uuid,
        skip: usize,
        limit: usize,
    ) -> Result<Vec<DiscoveryResult>> {
        let job = self.status(job_id)?;
        if job.status == JobStatus::Pending {
            return Err(DiscoveryError::InvalidState {
                job_id,
                status: job.status,
            });
        }

        self.store.for_job(job_id, skip, limit).await
    }

    /// Cancel one running job. The worker notices at its next checkpoint
    /// and marks the job Failed; cancelling an already-finished job is a
    /// no-op.
    pub fn cancel(&self, job_id: Uuid) -> Result<()> {
        let token = self.tokens.read().unwrap().get(&job_id).cloned();
        match token {
            Some(token) => {
                info!(job_id = %job_id, "cancelling discovery job");
                token.cancel();
                Ok(())
            }
            // Terminal jobs have dropped their token but are still known.
            None if self.registry.snapshot(job_id).is_some() => Ok(()),
            None => Err(DiscoveryError::JobNotFound { job_id }),
        }
    }

    /// Cancel every in-flight job and refuse new submissions.
    pub fn shutdown(&self) {
        info!("shutting down discovery job manager");
        self.shutdown.cancel();
    }
}

/// One spawned discovery run.
struct Worker {
    record: Arc<RwLock<DiscoveryJob>>,
    store: Arc<dyn ResultStore>,
    connectors: Arc<HashMap<SourceId, Arc<dyn SourceConnector>>>,
    scoring: Arc<ScoringEngine>,
    insights: Option<Arc<dyn InsightProvider>>,
    tokens: Arc<RwLock<HashMap<Uuid, CancellationToken>>>,
    token: CancellationToken,
}

impl Worker {
    async fn run(self) {
        let (job_id, sources, thesis, limit) = {
            let mut job = self.record.write().unwrap();
            job.mark_running();
            (
                job.id,
                job.sources.clone(),
                job.filter.clone(),
                job.limit_per_source,
            )
        };

        let total = sources.len().max(1);
        for (index, source_name) in sources.iter().enumerate() {
            if self.token.is_cancelled() {
                self.fail(job_id, "job cancelled");
                return;
            }

            {
                let mut job = self.record.write().unwrap();
                job.current_source = Some(source_name.clone());
                job.advance_progress(((index as f64 / total as f64) * 100.0).round() as u8);
            }

            let source_id = match source_name.parse::<SourceId>() {
                Ok(id) => id,
                Err(error) => {
                    warn!(job_id = %job_id, source = %source_name, "unknown source requested");
                    self.log_error(error.to_string());
                    continue;
                }
            };

            let Some(connector) = self.connectors.get(&source_id) else {
                warn!(job_id = %job_id, source = %source_id, "no connector registered");
                self.log_error(format!("no connector registered for {source_id}"));
                continue;
            };

            let outcome = tokio::select! {
                _ = self.token.cancelled() => {
                    self.fail(job_id, "job cancelled");
                    return;
                }
                outcome = connector.fetch(limit, thesis.as_ref()) => outcome,
            };

            let outcome = match outcome {
                Ok(outcome) => outcome,
                Err(error) => {
                    warn!(job_id = %job_id, source = %source_id, error = %error, "source fetch failed");
                    self.log_error(format!("error fetching from {source_id}: {error}"));
                    continue;
                }
            };

            debug!(
                job_id = %job_id,
                source = %source_id,
                count = outcome.candidates.len(),
                filters_matched = outcome.filters_matched,
                "source fetch finished"
            );

            {
                let mut job = self.record.write().unwrap();
                job.candidates_found += outcome.candidates.len();
                if !outcome.filters_matched {
                    // Progressive signal; the final value is recomputed
                    // from persisted results at completion.
                    job.filters_matched = false;
                }
            }

            for mut candidate in outcome.candidates {
                candidate.sector = normalize_sector(&candidate.sector);
                candidate.stage = normalize_stage(&candidate.stage);
                let dedup_key = candidate.dedup_key();

                match self.store.exists_for_job(job_id, &dedup_key).await {
                    Ok(true) => {
                        self.record.write().unwrap().candidates_skipped += 1;
                        continue;
                    }
                    Ok(false) => {}
                    Err(error) => {
                        self.log_error(format!(
                            "dedup lookup failed for {}: {error}",
                            candidate.name
                        ));
                        continue;
                    }
                }

                let score = self.scoring.score(&candidate, thesis.as_ref());
                let mut result = DiscoveryResult::from_candidate(job_id, &candidate, score);

                if let Some(provider) = &self.insights {
                    // Best-effort and bounded: a slow provider times out and
                    // cancellation interrupts the wait.
                    let insights = tokio::select! {
                        _ = self.token.cancelled() => {
                            self.fail(job_id, "job cancelled");
                            return;
                        }
                        insights = tokio::time::timeout(
                            INSIGHT_TIMEOUT,
                            provider.insights(&candidate),
                        ) => insights,
                    };
                    match insights {
                        Ok(Ok(insights)) => result.insights = insights,
                        Ok(Err(error)) => {
                            debug!(name = %candidate.name, error = %error, "insight generation failed");
                        }
                        Err(_) => {
                            debug!(name = %candidate.name, "insight generation timed out");
                        }
                    }
                }

                match self.store.insert(result).await {
                    Ok(()) => {
                        self.record.write().unwrap().candidates_added += 1;
                    }
                    Err(error) => {
                        self.log_error(format!("save error for {}: {error}", candidate.name));
                    }
                }
            }
        }

        self.recompute_filters_matched(job_id, thesis.as_ref()).await;

        let mut job = self.record.write().unwrap();
        job.mark_completed();
        info!(
            job_id = %job_id,
            found = job.candidates_found,
            added = job.candidates_added,
            skipped = job.candidates_skipped,
            "discovery job completed"
        );
        drop(job);

        self.tokens.write().unwrap().remove(&job_id);
    }

    /// Re-derive the job-level filter flag from what was actually
    /// persisted: true iff any stored result satisfies the filter.
    async fn recompute_filters_matched(&self, job_id: Uuid, thesis: Option<&ThesisFilter>) {
        let Some(thesis) = thesis.filter(|f| !f.is_empty()) else {
            return;
        };

        let added = self.record.read().unwrap().candidates_added;
        if added == 0 {
            return;
        }

        match self.store.for_job(job_id, 0, added).await {
            Ok(results) => {
                let matched = results.iter().any(|r| {
                    filter::sector_matches(&r.sector, thesis)
                        && filter::stage_matches(&r.stage, thesis)
                });
                if !matched {
                    warn!(job_id = %job_id, "no results matched the requested filters, returning unfiltered set");
                }
                self.record.write().unwrap().filters_matched = matched;
            }
            Err(error) => {
                self.log_error(format!("filter recheck failed: {error}"));
            }
        }
    }

    fn log_error(&self, message: String) {
        self.record.write().unwrap().errors.push(message);
    }

    fn fail(&self, job_id: Uuid, message: &str) {
        warn!(job_id = %job_id, "discovery job failed: {message}");
        self.record.write().unwrap().mark_failed(message);
        self.tokens.write().unwrap().remove(&job_id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SourceResult;
    use crate::stores::memory::MemoryResultStore;
    use crate::testing::{MockConnector, MockInsight};
    use crate::traits::connector::FetchOutcome;
    use crate::types::candidate::Candidate;
    use async_trait::async_trait;

    fn manager_with(connectors: Vec<Arc<dyn SourceConnector>>) -> JobManager {
        let map = connectors.into_iter().map(|c| (c.id(), c)).collect();
        JobManager::new(Arc::new(MemoryResultStore::new()), map)
    }

    fn yc_candidates(count: usize) -> Vec<Candidate> {
        (0..count)
            .map(|i| {
                Candidate::new(format!("Company {i}"), "FinTech", "Seed", SourceId::Yc)
                    .with_source_ref(format!("company-{i}"))
            })
            .collect()
    }

    #[tokio::test]
    async fn job_runs_to_completion_and_counts_candidates() {
        let manager = manager_with(vec![Arc::new(MockConnector::new(
            SourceId::Yc,
            yc_candidates(5),
        ))]);

        let handle = manager
            .start(DiscoveryRequest::new(["yc"]).with_limit_per_source(5))
            .await
            .unwrap();
        let job_id = handle.wait().await;

        let job = manager.status(job_id).unwrap();
        assert_eq!(job.status, JobStatus::Completed);
        assert_eq!(job.progress, 100);
        assert_eq!(job.candidates_found, 5);
        assert_eq!(job.candidates_added, 5);
        assert!(job.filters_matched);
        assert!(job.errors.is_empty());
        assert!(job.execution_time.is_some());
    }

    #[tokio::test]
    async fn unknown_source_is_a_job_error_not_a_failure() {
        let manager = manager_with(vec![Arc::new(MockConnector::new(
            SourceId::Yc,
            yc_candidates(2),
        ))]);

        let handle = manager
            .start(DiscoveryRequest::new(["producthunt", "yc"]))
            .await
            .unwrap();
        let job = manager.status(handle.wait().await).unwrap();

        assert_eq!(job.status, JobStatus::Completed);
        assert_eq!(job.candidates_added, 2);
        assert_eq!(job.errors.len(), 1);
        assert!(job.errors[0].contains("unknown source"));
    }

    #[tokio::test]
    async fn duplicate_candidates_are_skipped() {
        let mut candidates = yc_candidates(3);
        candidates.push(candidates[0].clone());
        let manager = manager_with(vec![Arc::new(MockConnector::new(SourceId::Yc, candidates))]);

        let handle = manager.start(DiscoveryRequest::new(["yc"])).await.unwrap();
        let job = manager.status(handle.wait().await).unwrap();

        assert_eq!(job.candidates_found, 4);
        assert_eq!(job.candidates_added, 3);
        assert_eq!(job.candidates_skipped, 1);
    }

    #[tokio::test]
    async fn results_of_pending_job_are_invalid_state() {
        let manager = manager_with(vec![]);
        let job = DiscoveryJob::new(&DiscoveryRequest::new(["yc"]));
        let job_id = job.id;
        manager.registry.insert(job);

        let error = manager.results(job_id, 0, 10).await.unwrap_err();
        assert!(matches!(
            error,
            DiscoveryError::InvalidState {
                status: JobStatus::Pending,
                ..
            }
        ));
    }

    #[tokio::test]
    async fn status_of_unknown_job_is_not_found() {
        let manager = manager_with(vec![]);
        let error = manager.status(Uuid::new_v4()).unwrap_err();
        assert!(matches!(error, DiscoveryError::JobNotFound { .. }));
    }

    struct PanickingConnector;

    #[async_trait]
    impl SourceConnector for PanickingConnector {
        fn id(&self) -> SourceId {
            SourceId::Yc
        }

        async fn fetch(
            &self,
            _limit: usize,
            _thesis: Option<&ThesisFilter>,
        ) -> SourceResult<FetchOutcome> {
            panic!("connector bug")
        }
    }

    #[tokio::test]
    async fn worker_panic_marks_the_job_failed() {
        let manager = manager_with(vec![Arc::new(PanickingConnector)]);

        let handle = manager.start(DiscoveryRequest::new(["yc"])).await.unwrap();
        let job = manager.status(handle.wait().await).unwrap();

        assert_eq!(job.status, JobStatus::Failed);
        assert_eq!(job.progress, 100);
        assert!(job.errors.iter().any(|e| e.contains("panicked")));
        assert!(job.completed_at.is_some());
    }

    #[tokio::test]
    async fn cancel_interrupts_insight_generation() {
        let manager = manager_with(vec![Arc::new(MockConnector::new(
            SourceId::Yc,
            yc_candidates(1),
        ))])
        .with_insights(Arc::new(
            MockInsight::new().with_delay(Duration::from_secs(30)),
        ));

        let handle = manager.start(DiscoveryRequest::new(["yc"])).await.unwrap();
        tokio::time::sleep(Duration::from_millis(20)).await;
        manager.cancel(handle.job_id).unwrap();

        let job = manager.status(handle.wait().await).unwrap();
        assert_eq!(job.status, JobStatus::Failed);
        assert!(job.errors.iter().any(|e| e.contains("cancelled")));
    }

    #[tokio::test]
    async fn shutdown_refuses_new_jobs() {
        let manager = manager_with(vec![]);
        manager.shutdown();

        let error = manager.start(DiscoveryRequest::new(["yc"])).await.unwrap_err();
        assert!(matches!(error, DiscoveryError::Cancelled));
    }
}
