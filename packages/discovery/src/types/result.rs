//! Normalized, scored discovery results.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::scoring::{Score, ScoreBreakdown};
use crate::types::candidate::Candidate;

/// Where a result was discovered.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Provenance {
    /// Source name ("yc", "crunchbase", ...)
    pub name: String,

    /// URL at the source, if known
    pub url: Option<String>,

    /// Relevance weight assigned by the source (0.0 to 1.0)
    pub relevance: f64,

    pub discovered_at: DateTime<Utc>,
}

impl Provenance {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            url: None,
            relevance: 0.8,
            discovered_at: Utc::now(),
        }
    }

    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = Some(url.into());
        self
    }

    pub fn with_relevance(mut self, relevance: f64) -> Self {
        self.relevance = relevance;
        self
    }
}

/// An insight attached to a result by the (optional) insight provider.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Insight {
    /// Kind of insight ("market_size", "growth_potential", "team_quality", ...)
    pub insight_type: String,

    pub content: String,

    /// Provider confidence (0.0 to 1.0)
    pub confidence: f64,

    pub generated_at: DateTime<Utc>,
}

impl Insight {
    pub fn new(insight_type: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            insight_type: insight_type.into(),
            content: content.into(),
            confidence: 0.5,
            generated_at: Utc::now(),
        }
    }

    pub fn with_confidence(mut self, confidence: f64) -> Self {
        self.confidence = confidence.clamp(0.0, 1.0);
        self
    }
}

/// A normalized, scored company produced by a discovery job.
///
/// Created once per candidate per job. The core never deletes results;
/// only the explicit save/pass actions mutate them afterwards.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DiscoveryResult {
    pub id: Uuid,
    pub job_id: Uuid,

    pub name: String,
    pub tagline: Option<String>,

    /// Canonical sector (post-normalization)
    pub sector: String,

    /// Canonical stage (post-normalization)
    pub stage: String,

    pub location: Option<String>,
    pub website: Option<String>,
    pub description: Option<String>,

    /// One or more provenance records
    pub sources: Vec<Provenance>,

    /// Key used to dedup this result within the job
    pub dedup_key: String,

    /// Source-assigned baseline relevance (0 to 100), distinct from the
    /// composite score below
    pub discovery_score: f64,

    /// Composite weighted score (0 to 100), one decimal
    pub overall_score: f64,

    pub breakdown: ScoreBreakdown,

    /// Heuristic break-out probability (0 to 99)
    pub breakout_probability: f64,

    /// Thesis fit score (0 to 100), when a thesis was in play
    pub fit_score: Option<f64>,

    /// Human-readable fit explanation
    pub fit_explanation: String,

    /// Best-effort insights; empty when no provider is configured
    #[serde(default)]
    pub insights: Vec<Insight>,

    pub is_saved: bool,
    pub is_passed: bool,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl DiscoveryResult {
    /// Assemble a result from a normalized candidate and its score.
    pub fn from_candidate(job_id: Uuid, candidate: &Candidate, score: Score) -> Self {
        let now = Utc::now();
        let mut provenance = Provenance::new(candidate.source.as_str());
        if let Some(ref website) = candidate.website {
            provenance = provenance.with_url(website.clone());
        }

        Self {
            id: Uuid::new_v4(),
            job_id,
            name: candidate.name.clone(),
            tagline: candidate.tagline.clone(),
            sector: candidate.sector.clone(),
            stage: candidate.stage.clone(),
            location: candidate.location.clone(),
            website: candidate.website.clone(),
            description: candidate
                .description
                .clone()
                .or_else(|| candidate.tagline.clone()),
            sources: vec![provenance],
            dedup_key: candidate.dedup_key(),
            discovery_score: 75.0,
            overall_score: score.overall,
            breakdown: score.breakdown,
            breakout_probability: score.breakout_probability,
            fit_score: score.fit_score,
            fit_explanation: score.fit_explanation,
            insights: Vec::new(),
            is_saved: false,
            is_passed: false,
            created_at: now,
            updated_at: now,
        }
    }
}
