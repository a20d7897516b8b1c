//! Y Combinator connector.
//!
//! Fetches from the public YC companies API and degrades to the curated
//! dataset on any upstream failure. The API needs no credentials.

use async_trait::async_trait;
use serde_json::Value;
use tracing::{debug, warn};

use crate::connectors::curated;
use crate::error::{SourceError, SourceResult};
use crate::filter;
use crate::normalize::{normalize_sector, normalize_stage};
use crate::traits::connector::{FetchOutcome, SourceConnector, SourceId};
use crate::types::candidate::Candidate;
use crate::types::thesis::ThesisFilter;

const DEFAULT_BASE_URL: &str = "https://api.ycombinator.com/v0.1";

/// Connector for the public Y Combinator companies API.
pub struct YcConnector {
    client: reqwest::Client,
    base_url: String,
    offline: bool,
}

impl Default for YcConnector {
    fn default() -> Self {
        Self::new()
    }
}

impl YcConnector {
    /// Create a connector against the public API.
    pub fn new() -> Self {
        Self {
            client: reqwest::Client::builder()
                .timeout(std::time::Duration::from_secs(30))
                .build()
                .expect("Failed to create HTTP client"),
            base_url: DEFAULT_BASE_URL.to_string(),
            offline: false,
        }
    }

    /// Create a connector that serves only the curated dataset, never
    /// touching the network.
    pub fn offline() -> Self {
        Self {
            offline: true,
            ..Self::new()
        }
    }

    /// Point the connector at a different API root (used in tests).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    async fn fetch_live(&self, limit: usize) -> SourceResult<Vec<Candidate>> {
        let url = format!("{}/companies", self.base_url);
        debug!(url = %url, "fetching YC companies");

        let response = self
            .client
            .get(&url)
            .header("Accept", "application/json")
            .send()
            .await
            .map_err(|e| SourceError::from_reqwest("yc", e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(SourceError::MalformedPayload {
                connector: "yc".to_string(),
                reason: format!("HTTP {status}"),
            });
        }

        let body: Value = response
            .json()
            .await
            .map_err(|e| SourceError::from_reqwest("yc", e))?;

        // The API has shipped both a bare array and wrapped objects.
        let companies = match &body {
            Value::Array(items) => items.as_slice(),
            Value::Object(map) => map
                .get("companies")
                .or_else(|| map.get("results"))
                .and_then(Value::as_array)
                .map(Vec::as_slice)
                .unwrap_or_default(),
            _ => {
                return Err(SourceError::MalformedPayload {
                    connector: "yc".to_string(),
                    reason: "expected array or object body".to_string(),
                })
            }
        };

        debug!(count = companies.len(), "YC API returned companies");

        // Over-fetch so the filter has a pool to select from.
        Ok(companies
            .iter()
            .take(limit * 3)
            .filter_map(parse_company)
            .collect())
    }
}

/// Map one YC API company object (camelCase, with older snake_case
/// fallbacks) onto a candidate. Entries without a name are dropped.
fn parse_company(company: &Value) -> Option<Candidate> {
    let name = str_field(company, &["name"])?;

    let sector = company
        .get("industries")
        .and_then(Value::as_array)
        .and_then(|a| a.first())
        .and_then(Value::as_str)
        .unwrap_or("Technology");
    let stage = str_field(company, &["stage"]).unwrap_or_else(|| "Seed".to_string());

    let location = company
        .get("locations")
        .and_then(Value::as_array)
        .and_then(|a| a.first())
        .and_then(Value::as_str)
        .map(str::to_string)
        .or_else(|| str_field(company, &["location"]))
        .unwrap_or_else(|| "San Francisco, CA".to_string());

    let tagline = str_field(company, &["oneLiner", "one_liner"]);
    let description =
        str_field(company, &["longDescription", "long_description"]).or_else(|| tagline.clone());

    let mut candidate = Candidate::new(
        name,
        normalize_sector(sector),
        normalize_stage(&stage),
        SourceId::Yc,
    )
    .with_location(location);

    if let Some(tagline) = tagline {
        candidate = candidate.with_tagline(tagline);
    }
    if let Some(description) = description {
        candidate = candidate.with_description(description);
    }
    if let Some(website) = str_field(company, &["website"]) {
        candidate = candidate.with_website(website);
    }
    if let Some(batch) = str_field(company, &["batch"]) {
        candidate = candidate.with_batch(batch);
    }
    if let Some(slug) = str_field(company, &["slug"]) {
        candidate = candidate.with_source_ref(slug);
    }

    Some(candidate)
}

fn str_field(value: &Value, keys: &[&str]) -> Option<String> {
    keys.iter()
        .find_map(|k| value.get(k))
        .and_then(Value::as_str)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

#[async_trait]
impl SourceConnector for YcConnector {
    fn id(&self) -> SourceId {
        SourceId::Yc
    }

    async fn fetch(
        &self,
        limit: usize,
        thesis: Option<&ThesisFilter>,
    ) -> SourceResult<FetchOutcome> {
        let pool = if self.offline {
            curated::yc_companies()
        } else {
            match self.fetch_live(limit).await {
                Ok(candidates) if !candidates.is_empty() => candidates,
                Ok(_) => {
                    warn!("YC API returned no companies, using curated dataset");
                    curated::yc_companies()
                }
                Err(error) => {
                    warn!(error = %error, "YC fetch failed, using curated dataset");
                    curated::yc_companies()
                }
            }
        };

        let selection = filter::select(pool, thesis, limit);
        Ok(FetchOutcome::new(
            selection.candidates,
            selection.matched_any,
        ))
    }
}
