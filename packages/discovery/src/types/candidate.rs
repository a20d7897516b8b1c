//! Raw candidate companies as produced by source connectors.

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::traits::connector::SourceId;

/// A founder attached to a candidate.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Founder {
    pub name: String,

    /// Role title (e.g. "CEO", "CTO")
    pub role: String,

    /// Professional profile link, if known
    pub linkedin: Option<String>,

    /// Free-text background blurb ("ex-Google, Stanford PhD, ...")
    pub background: Option<String>,
}

impl Founder {
    pub fn new(name: impl Into<String>, role: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            role: role.into(),
            linkedin: None,
            background: None,
        }
    }

    pub fn with_linkedin(mut self, url: impl Into<String>) -> Self {
        self.linkedin = Some(url.into());
        self
    }

    pub fn with_background(mut self, background: impl Into<String>) -> Self {
        self.background = Some(background.into());
        self
    }
}

/// Traction metrics as reported by the source, kept as free-text strings
/// like "$12M ARR" or "150% YoY" and parsed by the scoring engine.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Metrics {
    pub revenue: Option<String>,
    pub growth: Option<String>,
    pub users: Option<String>,
    pub funding: Option<String>,
}

impl Metrics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_revenue(mut self, revenue: impl Into<String>) -> Self {
        self.revenue = Some(revenue.into());
        self
    }

    pub fn with_growth(mut self, growth: impl Into<String>) -> Self {
        self.growth = Some(growth.into());
        self
    }

    pub fn with_users(mut self, users: impl Into<String>) -> Self {
        self.users = Some(users.into());
        self
    }

    pub fn with_funding(mut self, funding: impl Into<String>) -> Self {
        self.funding = Some(funding.into());
        self
    }
}

/// A raw, pre-normalization company record produced by one source during
/// a discovery run.
///
/// `sector` and `stage` are the source's free-text values; the worker
/// normalizes them before filtering and scoring.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Candidate {
    pub name: String,

    /// Short one-liner
    pub tagline: Option<String>,

    /// Free-text sector as reported by the source
    pub sector: String,

    /// Free-text funding stage as reported by the source
    pub stage: String,

    pub location: Option<String>,
    pub website: Option<String>,
    pub description: Option<String>,

    /// Founding team, when the source exposes it
    #[serde(default)]
    pub founders: Vec<Founder>,

    /// Traction metrics, when the source exposes them
    pub metrics: Option<Metrics>,

    /// Qualitative signals ("Featured in TechCrunch", "Partnership with X")
    #[serde(default)]
    pub signals: Vec<String>,

    /// Accelerator batch tag (e.g. "W17")
    pub batch: Option<String>,

    /// Which connector produced this candidate
    pub source: SourceId,

    /// Source-specific identifier (registry number, API slug) used for
    /// dedup against previously known entities
    pub source_ref: Option<String>,
}

impl Candidate {
    /// Create a candidate with the minimum fields every source provides.
    pub fn new(
        name: impl Into<String>,
        sector: impl Into<String>,
        stage: impl Into<String>,
        source: SourceId,
    ) -> Self {
        Self {
            name: name.into(),
            tagline: None,
            sector: sector.into(),
            stage: stage.into(),
            location: None,
            website: None,
            description: None,
            founders: Vec::new(),
            metrics: None,
            signals: Vec::new(),
            batch: None,
            source,
            source_ref: None,
        }
    }

    pub fn with_tagline(mut self, tagline: impl Into<String>) -> Self {
        self.tagline = Some(tagline.into());
        self
    }

    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.location = Some(location.into());
        self
    }

    pub fn with_website(mut self, website: impl Into<String>) -> Self {
        self.website = Some(website.into());
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_founder(mut self, founder: Founder) -> Self {
        self.founders.push(founder);
        self
    }

    pub fn with_founders(mut self, founders: impl IntoIterator<Item = Founder>) -> Self {
        self.founders.extend(founders);
        self
    }

    pub fn with_metrics(mut self, metrics: Metrics) -> Self {
        self.metrics = Some(metrics);
        self
    }

    pub fn with_signal(mut self, signal: impl Into<String>) -> Self {
        self.signals.push(signal.into());
        self
    }

    pub fn with_signals(mut self, signals: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.signals.extend(signals.into_iter().map(|s| s.into()));
        self
    }

    pub fn with_batch(mut self, batch: impl Into<String>) -> Self {
        self.batch = Some(batch.into());
        self
    }

    pub fn with_source_ref(mut self, source_ref: impl Into<String>) -> Self {
        self.source_ref = Some(source_ref.into());
        self
    }

    /// Deterministic key used to dedup this candidate within a job.
    ///
    /// Prefers the source-specific identifier; otherwise hashes the
    /// lowercased name and website so the same company seen twice from one
    /// source collapses to one result.
    pub fn dedup_key(&self) -> String {
        if let Some(ref source_ref) = self.source_ref {
            return format!("{}:{}", self.source.as_str(), source_ref);
        }

        let mut hasher = Sha256::new();
        hasher.update(self.name.to_lowercase().as_bytes());
        if let Some(ref website) = self.website {
            hasher.update(website.to_lowercase().as_bytes());
        }
        format!("{}:{:x}", self.source.as_str(), hasher.finalize())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dedup_key_prefers_source_ref() {
        let candidate = Candidate::new("Acme", "FinTech", "Seed", SourceId::Registry)
            .with_source_ref("U74999KA2016PTC093609");

        assert_eq!(candidate.dedup_key(), "registry:U74999KA2016PTC093609");
    }

    #[test]
    fn dedup_key_is_stable_without_source_ref() {
        let a = Candidate::new("Acme", "FinTech", "Seed", SourceId::Yc)
            .with_website("https://acme.com");
        let b = Candidate::new("ACME", "FinTech", "Seed", SourceId::Yc)
            .with_website("HTTPS://ACME.COM");

        assert_eq!(a.dedup_key(), b.dedup_key());
    }

    #[test]
    fn dedup_key_differs_across_sources() {
        let a = Candidate::new("Acme", "FinTech", "Seed", SourceId::Yc);
        let b = Candidate::new("Acme", "FinTech", "Seed", SourceId::Crunchbase);

        assert_ne!(a.dedup_key(), b.dedup_key());
    }
}
