//! Domain types for discovery.

pub mod candidate;
pub mod job;
pub mod result;
pub mod thesis;
