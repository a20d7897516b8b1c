//! AngelList connector.
//!
//! AngelList has no public API, so this connector always serves the
//! curated dataset of companies from its public pages.

use async_trait::async_trait;
use tracing::debug;

use crate::connectors::curated;
use crate::error::SourceResult;
use crate::filter;
use crate::traits::connector::{FetchOutcome, SourceConnector, SourceId};
use crate::types::thesis::ThesisFilter;

/// Connector over curated AngelList public data.
#[derive(Debug, Clone, Copy, Default)]
pub struct AngelListConnector;

impl AngelListConnector {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl SourceConnector for AngelListConnector {
    fn id(&self) -> SourceId {
        SourceId::AngelList
    }

    async fn fetch(
        &self,
        limit: usize,
        thesis: Option<&ThesisFilter>,
    ) -> SourceResult<FetchOutcome> {
        debug!("serving curated AngelList dataset");
        let selection = filter::select(curated::angellist_companies(), thesis, limit);
        Ok(FetchOutcome::new(
            selection.candidates,
            selection.matched_any,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn serves_curated_companies_up_to_the_limit() {
        let connector = AngelListConnector::new();
        let outcome = connector.fetch(3, None).await.unwrap();

        assert_eq!(outcome.candidates.len(), 3);
        assert!(outcome
            .candidates
            .iter()
            .all(|c| c.source == SourceId::AngelList));
    }

    #[tokio::test]
    async fn unmatched_filter_falls_back_with_flag_lowered() {
        let connector = AngelListConnector::new();
        let thesis = ThesisFilter::new().with_stages(["Pre-Seed"]);

        let outcome = connector.fetch(10, Some(&thesis)).await.unwrap();
        assert!(!outcome.filters_matched);
        assert!(!outcome.candidates.is_empty());
    }
}
