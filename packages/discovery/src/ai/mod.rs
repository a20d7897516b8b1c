//! AI-backed insight providers.

pub mod openai;

pub use openai::OpenAiInsights;
