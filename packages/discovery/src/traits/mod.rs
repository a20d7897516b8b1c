//! Trait definitions for the discovery seams.
//!
//! Implementations live in sibling modules (`connectors/`, `stores/`,
//! `ai/`); test doubles live in [`crate::testing`].

pub mod connector;
pub mod insight;
pub mod store;

pub use connector::{FetchOutcome, SourceConnector, SourceId};
pub use insight::InsightProvider;
pub use store::{ResultStore, ThesisProvider};
