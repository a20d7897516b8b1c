//! Asynchronous discovery job lifecycle.

pub mod manager;
pub mod registry;

pub use manager::{JobHandle, JobManager};
pub use registry::JobRegistry;
