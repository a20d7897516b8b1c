//! Testing utilities including mock implementations.
//!
//! These are useful for testing applications that use the discovery library
//! without making real AI or network calls.

use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::RwLock;
use std::time::Duration;

use crate::error::{DiscoveryError, Result, SourceError, SourceResult};
use crate::filter;
use crate::traits::connector::{FetchOutcome, SourceConnector, SourceId};
use crate::traits::insight::InsightProvider;
use crate::traits::store::ThesisProvider;
use crate::types::candidate::Candidate;
use crate::types::result::Insight;
use crate::types::thesis::ThesisFilter;

/// A mock source connector serving a fixed candidate pool.
///
/// Applies the same filter-with-fallback selection as real connectors,
/// tracks fetch calls, and can be configured to fail or stall.
pub struct MockConnector {
    id: SourceId,
    candidates: Vec<Candidate>,
    failure: Option<String>,
    delay: Option<Duration>,
    calls: AtomicUsize,
    last_limit: RwLock<Option<usize>>,
}

impl MockConnector {
    /// Create a connector serving the given candidates.
    pub fn new(id: SourceId, candidates: Vec<Candidate>) -> Self {
        Self {
            id,
            candidates,
            failure: None,
            delay: None,
            calls: AtomicUsize::new(0),
            last_limit: RwLock::new(None),
        }
    }

    /// Create a connector whose every fetch fails with the given reason.
    pub fn failing(id: SourceId, reason: impl Into<String>) -> Self {
        Self {
            failure: Some(reason.into()),
            ..Self::new(id, Vec::new())
        }
    }

    /// Stall each fetch for `delay` (for cancellation tests).
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Number of fetch calls made so far.
    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// The limit passed to the most recent fetch.
    pub fn last_limit(&self) -> Option<usize> {
        *self.last_limit.read().unwrap()
    }
}

#[async_trait]
impl SourceConnector for MockConnector {
    fn id(&self) -> SourceId {
        self.id
    }

    async fn fetch(
        &self,
        limit: usize,
        thesis: Option<&ThesisFilter>,
    ) -> SourceResult<FetchOutcome> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self.last_limit.write().unwrap() = Some(limit);

        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }

        if let Some(ref reason) = self.failure {
            return Err(SourceError::MalformedPayload {
                connector: self.id.as_str().to_string(),
                reason: reason.clone(),
            });
        }

        let selection = filter::select(self.candidates.clone(), thesis, limit);
        Ok(FetchOutcome::new(
            selection.candidates,
            selection.matched_any,
        ))
    }
}

/// A mock insight provider returning fixed insights.
#[derive(Default)]
pub struct MockInsight {
    insights: Vec<Insight>,
    fail: bool,
    delay: Option<Duration>,
    calls: AtomicUsize,
}

impl MockInsight {
    /// Create a provider that returns no insights.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a provider returning the given insights for every candidate.
    pub fn with_insights(insights: Vec<Insight>) -> Self {
        Self {
            insights,
            ..Self::default()
        }
    }

    /// Create a provider whose every call fails.
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    /// Stall each call for `delay` (for timeout and cancellation tests).
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Number of insight calls made so far.
    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl InsightProvider for MockInsight {
    async fn insights(&self, _candidate: &Candidate) -> Result<Vec<Insight>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        if self.fail {
            return Err(DiscoveryError::Insight("mock insight failure".into()));
        }
        Ok(self.insights.clone())
    }
}

/// A mock thesis provider returning a fixed thesis.
#[derive(Default)]
pub struct MockThesisProvider {
    thesis: Option<ThesisFilter>,
}

impl MockThesisProvider {
    /// A provider with no thesis configured.
    pub fn none() -> Self {
        Self::default()
    }

    /// A provider returning the given thesis.
    pub fn with_thesis(thesis: ThesisFilter) -> Self {
        Self {
            thesis: Some(thesis),
        }
    }
}

#[async_trait]
impl ThesisProvider for MockThesisProvider {
    async fn thesis(&self) -> Result<Option<ThesisFilter>> {
        Ok(self.thesis.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn mock_connector_tracks_calls_and_applies_filters() {
        let connector = MockConnector::new(
            SourceId::Yc,
            vec![
                Candidate::new("a", "FinTech", "Seed", SourceId::Yc),
                Candidate::new("b", "EdTech", "Seed", SourceId::Yc),
            ],
        );

        let thesis = ThesisFilter::new().with_sectors(["FinTech"]);
        let outcome = connector.fetch(10, Some(&thesis)).await.unwrap();

        assert_eq!(outcome.candidates.len(), 1);
        assert_eq!(connector.call_count(), 1);
        assert_eq!(connector.last_limit(), Some(10));
    }

    #[tokio::test]
    async fn failing_connector_returns_the_configured_error() {
        let connector = MockConnector::failing(SourceId::Crunchbase, "boom");
        let error = connector.fetch(5, None).await.unwrap_err();
        assert!(matches!(error, SourceError::MalformedPayload { .. }));
    }

    #[tokio::test]
    async fn failing_insight_provider_errors() {
        let provider = MockInsight::failing();
        let candidate = Candidate::new("a", "FinTech", "Seed", SourceId::Yc);

        assert!(provider.insights(&candidate).await.is_err());
        assert_eq!(provider.call_count(), 1);
    }
}
