//! Crunchbase connector.
//!
//! Talks to the paid Crunchbase v4 search API when a key is configured,
//! otherwise serves the curated dataset. Live failures also degrade to the
//! curated dataset rather than failing the source.

use async_trait::async_trait;
use secrecy::{ExposeSecret, SecretString};
use serde_json::{json, Value};
use tracing::{debug, warn};

use crate::connectors::curated;
use crate::error::{SourceError, SourceResult};
use crate::filter;
use crate::normalize::{normalize_sector, normalize_stage};
use crate::traits::connector::{FetchOutcome, SourceConnector, SourceId};
use crate::types::candidate::Candidate;
use crate::types::thesis::ThesisFilter;

const DEFAULT_BASE_URL: &str = "https://api.crunchbase.com/api/v4";

/// Connector for the Crunchbase organization search API.
pub struct CrunchbaseConnector {
    client: reqwest::Client,
    base_url: String,
    api_key: Option<SecretString>,
}

impl CrunchbaseConnector {
    /// Create a connector with an API key.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: Some(SecretString::from(api_key.into())),
            ..Self::offline()
        }
    }

    /// Read the API key from `CRUNCHBASE_API_KEY`. Without it the
    /// connector serves curated data only.
    pub fn from_env() -> Self {
        Self {
            api_key: std::env::var("CRUNCHBASE_API_KEY")
                .ok()
                .filter(|k| !k.is_empty())
                .map(SecretString::from),
            ..Self::offline()
        }
    }

    /// Create a connector without credentials; it serves only the curated
    /// dataset and never touches the network.
    pub fn offline() -> Self {
        Self {
            client: reqwest::Client::builder()
                .timeout(std::time::Duration::from_secs(30))
                .build()
                .expect("Failed to create HTTP client"),
            base_url: DEFAULT_BASE_URL.to_string(),
            api_key: None,
        }
    }

    /// Point the connector at a different API root (used in tests).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    async fn fetch_live(&self, limit: usize) -> SourceResult<Vec<Candidate>> {
        let api_key = self
            .api_key
            .as_ref()
            .ok_or_else(|| SourceError::MissingCredentials {
                connector: "crunchbase".to_string(),
            })?;

        let url = format!("{}/searches/organizations", self.base_url);
        debug!(url = %url, "searching Crunchbase organizations");

        let query = json!({
            "field_ids": [
                "identifier",
                "short_description",
                "categories",
                "location_identifiers",
                "funding_total",
                "last_funding_type",
                "founded_on",
                "website_url"
            ],
            "limit": limit,
            "order": [{"field_id": "rank_org", "sort": "asc"}]
        });

        let response = self
            .client
            .post(&url)
            .header("X-cb-user-key", api_key.expose_secret())
            .json(&query)
            .send()
            .await
            .map_err(|e| SourceError::from_reqwest("crunchbase", e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(SourceError::MalformedPayload {
                connector: "crunchbase".to_string(),
                reason: format!("HTTP {status}"),
            });
        }

        let body: Value = response
            .json()
            .await
            .map_err(|e| SourceError::from_reqwest("crunchbase", e))?;

        let entities = body
            .get("entities")
            .and_then(Value::as_array)
            .map(Vec::as_slice)
            .unwrap_or_default();

        Ok(entities.iter().filter_map(parse_entity).collect())
    }
}

/// Map one search entity onto a candidate. Entities without an identifier
/// are dropped.
fn parse_entity(entity: &Value) -> Option<Candidate> {
    let props = entity.get("properties")?;

    let name = props
        .get("identifier")
        .and_then(|i| i.get("value"))
        .and_then(Value::as_str)
        .filter(|s| !s.is_empty())?;

    let sector = props
        .get("categories")
        .and_then(Value::as_array)
        .and_then(|a| a.first())
        .and_then(|c| c.get("value"))
        .and_then(Value::as_str)
        .unwrap_or("Technology");
    let stage = props
        .get("last_funding_type")
        .and_then(Value::as_str)
        .unwrap_or("Seed");

    let mut candidate = Candidate::new(
        name,
        normalize_sector(sector),
        normalize_stage(&stage.replace('_', " ")),
        SourceId::Crunchbase,
    );

    if let Some(tagline) = props.get("short_description").and_then(Value::as_str) {
        candidate = candidate.with_tagline(tagline);
    }
    if let Some(location) = props
        .get("location_identifiers")
        .and_then(Value::as_array)
        .and_then(|a| a.first())
        .and_then(|l| l.get("value"))
        .and_then(Value::as_str)
    {
        candidate = candidate.with_location(location);
    }
    if let Some(website) = props.get("website_url").and_then(Value::as_str) {
        candidate = candidate.with_website(website);
    }
    if let Some(permalink) = props
        .get("identifier")
        .and_then(|i| i.get("permalink"))
        .and_then(Value::as_str)
    {
        candidate = candidate.with_source_ref(permalink);
    }

    Some(candidate)
}

#[async_trait]
impl SourceConnector for CrunchbaseConnector {
    fn id(&self) -> SourceId {
        SourceId::Crunchbase
    }

    async fn fetch(
        &self,
        limit: usize,
        thesis: Option<&ThesisFilter>,
    ) -> SourceResult<FetchOutcome> {
        let pool = match self.fetch_live(limit).await {
            Ok(candidates) if !candidates.is_empty() => candidates,
            Ok(_) => {
                warn!("Crunchbase search returned nothing, using curated dataset");
                curated::crunchbase_companies()
            }
            Err(SourceError::MissingCredentials { .. }) => {
                debug!("Crunchbase API key not configured, using curated dataset");
                curated::crunchbase_companies()
            }
            Err(error) => {
                warn!(error = %error, "Crunchbase fetch failed, using curated dataset");
                curated::crunchbase_companies()
            }
        };

        let selection = filter::select(pool, thesis, limit);
        Ok(FetchOutcome::new(
            selection.candidates,
            selection.matched_any,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn keyless_connector_serves_curated_data() {
        let connector = CrunchbaseConnector::offline();
        let outcome = connector.fetch(4, None).await.unwrap();

        assert_eq!(outcome.candidates.len(), 4);
        assert!(outcome
            .candidates
            .iter()
            .all(|c| c.source == SourceId::Crunchbase));
    }

    #[test]
    fn parse_entity_maps_search_properties() {
        let entity = json!({
            "properties": {
                "identifier": {"value": "Acme", "permalink": "acme-inc"},
                "short_description": "Robotic accountants",
                "categories": [{"value": "Financial Services"}],
                "last_funding_type": "series_a",
                "location_identifiers": [{"value": "Berlin, Germany"}],
                "website_url": "https://acme.dev"
            }
        });

        let candidate = parse_entity(&entity).unwrap();
        assert_eq!(candidate.name, "Acme");
        assert_eq!(candidate.sector, "FinTech");
        assert_eq!(candidate.stage, "Series A");
        assert_eq!(candidate.source_ref.as_deref(), Some("acme-inc"));
    }

    #[test]
    fn parse_entity_requires_an_identifier() {
        assert!(parse_entity(&json!({"properties": {}})).is_none());
    }

    #[tokio::test]
    async fn live_fetch_without_key_reports_missing_credentials() {
        let connector = CrunchbaseConnector::offline();
        let error = connector.fetch_live(5).await.unwrap_err();
        assert!(matches!(error, SourceError::MissingCredentials { .. }));
    }
}
