//! Insight provider trait.

use async_trait::async_trait;

use crate::error::Result;
use crate::types::candidate::Candidate;
use crate::types::result::Insight;

/// Generates qualitative insights for a candidate.
///
/// Insight generation is strictly best-effort: the job worker logs
/// provider failures and continues, so an implementation erroring on
/// every call degrades discovery to "no insights", never to a failed job.
#[async_trait]
pub trait InsightProvider: Send + Sync {
    async fn insights(&self, candidate: &Candidate) -> Result<Vec<Insight>>;
}
