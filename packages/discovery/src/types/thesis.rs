//! Investment thesis filter.
//!
//! The canonical filter shape consumed by the filter and scoring engines.
//! Historical field-name aliases (camelCase vs snake_case thesis payloads)
//! are reconciled at the boundary layer, not here.

use serde::{Deserialize, Serialize};

/// Marker in the sector list that disables sector filtering entirely.
pub const SECTOR_AGNOSTIC: &str = "Sector Agnostic";

/// Sector/stage/geography preferences used to filter and score candidates.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ThesisFilter {
    /// Sectors of interest; may contain [`SECTOR_AGNOSTIC`]
    #[serde(default)]
    pub sectors: Vec<String>,

    /// Funding stages of interest
    #[serde(default)]
    pub stages: Vec<String>,

    /// Geographies of interest (fit scoring only, not filtering)
    #[serde(default)]
    pub geographies: Vec<String>,

    /// Sectors the investor will not touch
    #[serde(default)]
    pub anti_portfolio: Vec<String>,
}

impl ThesisFilter {
    /// Create an empty filter (matches everything).
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_sectors(mut self, sectors: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.sectors = sectors.into_iter().map(|s| s.into()).collect();
        self
    }

    pub fn with_stages(mut self, stages: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.stages = stages.into_iter().map(|s| s.into()).collect();
        self
    }

    pub fn with_geographies(
        mut self,
        geographies: impl IntoIterator<Item = impl Into<String>>,
    ) -> Self {
        self.geographies = geographies.into_iter().map(|g| g.into()).collect();
        self
    }

    pub fn with_anti_portfolio(
        mut self,
        sectors: impl IntoIterator<Item = impl Into<String>>,
    ) -> Self {
        self.anti_portfolio = sectors.into_iter().map(|s| s.into()).collect();
        self
    }

    /// Whether the sector-agnostic wildcard is present.
    pub fn is_sector_agnostic(&self) -> bool {
        self.sectors.iter().any(|s| s == SECTOR_AGNOSTIC)
    }

    /// Whether this filter constrains anything at all.
    pub fn is_empty(&self) -> bool {
        self.sectors.is_empty() && self.stages.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_filter_is_empty() {
        assert!(ThesisFilter::new().is_empty());
        assert!(!ThesisFilter::new().is_sector_agnostic());
    }

    #[test]
    fn wildcard_detected() {
        let filter = ThesisFilter::new().with_sectors(["FinTech", SECTOR_AGNOSTIC]);
        assert!(filter.is_sector_agnostic());
        assert!(!filter.is_empty());
    }
}
