//! Typed errors for the discovery library.
//!
//! Uses `thiserror` for library errors (not `anyhow`) to provide
//! strongly-typed, composable error handling.

use thiserror::Error;
use uuid::Uuid;

use crate::types::job::JobStatus;

/// Errors that can occur during discovery operations.
#[derive(Debug, Error)]
pub enum DiscoveryError {
    /// A source fetch failed (already contained per source; recorded in the
    /// job error log rather than aborting the run).
    #[error("source error: {0}")]
    Source(#[from] SourceError),

    /// Storage operation failed
    #[error("storage error: {0}")]
    Storage(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// Insight provider unavailable or failed (best-effort, never fatal)
    #[error("insight provider error: {0}")]
    Insight(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// Job lookup failed
    #[error("job not found: {job_id}")]
    JobNotFound { job_id: Uuid },

    /// Operation not valid for the job's current status
    #[error("job {job_id} is {status:?}, operation not permitted")]
    InvalidState { job_id: Uuid, status: JobStatus },

    /// Job was cancelled
    #[error("job cancelled")]
    Cancelled,

    /// Configuration error
    #[error("config error: {0}")]
    Config(String),

    /// JSON parsing error
    #[error("JSON parse error: {0}")]
    JsonParse(#[from] serde_json::Error),
}

/// Errors that can occur while fetching from one data source.
///
/// All of these are non-fatal to a discovery job: the connector falls back
/// to its embedded dataset, or the worker logs the error and moves on to
/// the next source.
#[derive(Debug, Error)]
pub enum SourceError {
    /// API credentials not configured for this source
    #[error("missing credentials for {connector}")]
    MissingCredentials { connector: String },

    /// HTTP request failed or returned a non-2xx status
    #[error("HTTP error from {connector}: {cause}")]
    Http {
        connector: String,
        #[source]
        cause: Box<dyn std::error::Error + Send + Sync>,
    },

    /// Request exceeded the source timeout
    #[error("timeout fetching from {connector}")]
    Timeout { connector: String },

    /// Response body could not be interpreted
    #[error("malformed payload from {connector}: {reason}")]
    MalformedPayload { connector: String, reason: String },

    /// Requested source identifier is not recognized
    #[error("unknown source: {name}")]
    UnknownSource { name: String },
}

impl SourceError {
    /// Classify a reqwest failure for one connector, separating timeouts
    /// from other transport errors.
    pub fn from_reqwest(connector: &str, error: reqwest::Error) -> Self {
        if error.is_timeout() {
            SourceError::Timeout {
                connector: connector.to_string(),
            }
        } else {
            SourceError::Http {
                connector: connector.to_string(),
                cause: Box::new(error),
            }
        }
    }
}

/// Result type alias for discovery operations.
pub type Result<T> = std::result::Result<T, DiscoveryError>;

/// Result type alias for source fetch operations.
pub type SourceResult<T> = std::result::Result<T, SourceError>;
