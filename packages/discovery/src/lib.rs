//! Startup Discovery & Scoring Library
//!
//! Discovers candidate companies from multiple external data sources,
//! normalizes and filters them against an investment thesis, scores each
//! one with a multi-factor heuristic model, and tracks the whole run
//! through an asynchronous job lifecycle.
//!
//! # Design Philosophy
//!
//! - Non-blocking: submitting a run returns a job id immediately; pollers
//!   watch progress, counters, and errors evolve
//! - Degrade, don't die: every source has a curated fallback dataset, and
//!   failures are contained per source and per candidate
//! - Show something: when a thesis filter excludes everything a source
//!   has, the unfiltered set is returned with `filters_matched == false`
//! - Library handles mechanics, app handles persistence (via `ResultStore`)
//!
//! # Usage
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use discovery::{connectors, DiscoveryRequest, JobManager, MemoryResultStore};
//!
//! let store = Arc::new(MemoryResultStore::new());
//! let manager = JobManager::new(store, connectors::default_connectors());
//!
//! let request = DiscoveryRequest::new(["yc", "crunchbase"])
//!     .with_sectors(["FinTech"])
//!     .with_limit_per_source(10);
//! let handle = manager.start(request).await?;
//!
//! let job = manager.status(handle.job_id)?;
//! let results = manager.results(handle.job_id, 0, 20).await?;
//! ```
//!
//! # Modules
//!
//! - [`traits`] - Core trait abstractions (SourceConnector, ResultStore, InsightProvider)
//! - [`types`] - Candidates, results, theses, and job records
//! - [`connectors`] - Source connectors with curated fallbacks
//! - [`normalize`] - Sector/stage canonicalization
//! - [`filter`] - Thesis filtering with fallback-to-unfiltered
//! - [`scoring`] - Multi-factor scoring engine
//! - [`jobs`] - Job registry, manager, and background worker
//! - [`stores`] - Storage implementations (MemoryResultStore)
//! - [`ai`] - OpenAI-backed insight provider
//! - [`testing`] - Mock implementations for testing

pub mod ai;
pub mod connectors;
pub mod error;
pub mod filter;
pub mod jobs;
pub mod normalize;
pub mod scoring;
pub mod stores;
pub mod testing;
pub mod traits;
pub mod types;

// Re-export core types at crate root
pub use error::{DiscoveryError, Result, SourceError};
pub use traits::{
    connector::{FetchOutcome, SourceConnector, SourceId},
    insight::InsightProvider,
    store::{ResultStore, ThesisProvider},
};
pub use types::{
    candidate::{Candidate, Founder, Metrics},
    job::{DiscoveryJob, DiscoveryRequest, JobStatus},
    result::{DiscoveryResult, Insight, Provenance},
    thesis::{ThesisFilter, SECTOR_AGNOSTIC},
};

// Re-export the pipeline pieces
pub use filter::{candidate_matches, select, Selection};
pub use jobs::{JobHandle, JobManager, JobRegistry};
pub use normalize::{normalize_sector, normalize_stage};
pub use scoring::{Score, ScoreBreakdown, ScoringConfig, ScoringEngine};

// Re-export connectors and stores
pub use connectors::{AngelListConnector, CrunchbaseConnector, RegistryConnector, YcConnector};
pub use stores::MemoryResultStore;

// Re-export the OpenAI insight provider
pub use ai::OpenAiInsights;
