//! Source connector trait and source identifiers.

use std::fmt;
use std::str::FromStr;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::{SourceError, SourceResult};
use crate::types::candidate::Candidate;
use crate::types::thesis::ThesisFilter;

/// The discovery sources the engine knows how to fetch from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceId {
    Yc,
    Crunchbase,
    #[serde(rename = "angellist")]
    AngelList,
    Registry,
}

impl SourceId {
    pub fn as_str(&self) -> &'static str {
        match self {
            SourceId::Yc => "yc",
            SourceId::Crunchbase => "crunchbase",
            SourceId::AngelList => "angellist",
            SourceId::Registry => "registry",
        }
    }
}

impl fmt::Display for SourceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SourceId {
    type Err = SourceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "yc" | "ycombinator" => Ok(SourceId::Yc),
            "crunchbase" => Ok(SourceId::Crunchbase),
            "angellist" => Ok(SourceId::AngelList),
            "registry" | "mca" => Ok(SourceId::Registry),
            other => Err(SourceError::UnknownSource {
                name: other.to_string(),
            }),
        }
    }
}

/// What a single connector fetch produced.
#[derive(Debug, Clone)]
pub struct FetchOutcome {
    /// Candidates selected for this source, already limited
    pub candidates: Vec<Candidate>,

    /// False iff the filter matched nothing and the connector substituted
    /// its unfiltered set
    pub filters_matched: bool,
}

impl FetchOutcome {
    pub fn new(candidates: Vec<Candidate>, filters_matched: bool) -> Self {
        Self {
            candidates,
            filters_matched,
        }
    }
}

/// A pluggable candidate source.
///
/// Connectors are responsible for applying the thesis filter themselves
/// (via [`crate::filter::select`]) so that the fallback-to-unfiltered
/// policy is evaluated per source, against that source's own candidate
/// pool. Implementations must be infallible-by-preference: a connector
/// with an embedded fallback dataset should degrade to it rather than
/// return an error for transient upstream failures.
#[async_trait]
pub trait SourceConnector: Send + Sync {
    /// Which source this connector serves.
    fn id(&self) -> SourceId;

    /// Fetch up to `limit` candidates satisfying `filter`.
    async fn fetch(&self, limit: usize, filter: Option<&ThesisFilter>)
        -> SourceResult<FetchOutcome>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn source_ids_round_trip_through_strings() {
        for id in [
            SourceId::Yc,
            SourceId::Crunchbase,
            SourceId::AngelList,
            SourceId::Registry,
        ] {
            assert_eq!(id.as_str().parse::<SourceId>().ok(), Some(id));
        }
    }

    #[test]
    fn source_id_parsing_accepts_aliases() {
        assert_eq!("YCombinator".parse::<SourceId>().ok(), Some(SourceId::Yc));
        assert_eq!("mca".parse::<SourceId>().ok(), Some(SourceId::Registry));
    }

    #[test]
    fn unknown_source_name_is_an_error() {
        let err = "producthunt".parse::<SourceId>().unwrap_err();
        assert!(matches!(err, SourceError::UnknownSource { name } if name == "producthunt"));
    }

    #[test]
    fn source_id_serializes_lowercase() {
        let json = serde_json::to_string(&SourceId::AngelList).unwrap();
        assert_eq!(json, "\"angellist\"");
    }
}
