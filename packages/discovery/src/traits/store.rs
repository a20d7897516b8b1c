//! Persistence traits for discovery results and investor theses.

use async_trait::async_trait;
use uuid::Uuid;

use crate::error::Result;
use crate::types::result::DiscoveryResult;
use crate::types::thesis::ThesisFilter;

/// Storage for discovery results.
///
/// Results are insert-once: the engine never deletes them, and only the
/// save/pass actions mutate them after creation. Both mark operations are
/// idempotent.
#[async_trait]
pub trait ResultStore: Send + Sync {
    /// Persist a new result.
    async fn insert(&self, result: DiscoveryResult) -> Result<()>;

    /// Fetch one result by id.
    async fn get(&self, result_id: Uuid) -> Result<Option<DiscoveryResult>>;

    /// Results for a job, ordered by descending overall score, paginated.
    async fn for_job(&self, job_id: Uuid, skip: usize, limit: usize)
        -> Result<Vec<DiscoveryResult>>;

    /// Total result count for a job.
    async fn count_for_job(&self, job_id: Uuid) -> Result<usize>;

    /// Whether a result with this dedup key already exists within the job.
    async fn exists_for_job(&self, job_id: Uuid, dedup_key: &str) -> Result<bool>;

    /// Mark a result saved to the pipeline. Returns the updated result, or
    /// None if the id is unknown.
    async fn mark_saved(&self, result_id: Uuid) -> Result<Option<DiscoveryResult>>;

    /// Mark a result passed. Returns the updated result, or None if the id
    /// is unknown.
    async fn mark_passed(&self, result_id: Uuid) -> Result<Option<DiscoveryResult>>;

    /// All saved results, newest first.
    async fn saved(&self) -> Result<Vec<DiscoveryResult>>;

    /// All passed results, newest first.
    async fn passed(&self) -> Result<Vec<DiscoveryResult>>;
}

/// Supplies the investor's thesis when a request doesn't carry explicit
/// sector/stage lists.
#[async_trait]
pub trait ThesisProvider: Send + Sync {
    /// The active thesis, or None when the investor hasn't set one.
    async fn thesis(&self) -> Result<Option<ThesisFilter>>;
}
