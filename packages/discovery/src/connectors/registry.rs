//! Corporate registry connector (Indian MCA data via a licensed provider).
//!
//! The registry exposes company master data keyed by CIN (Corporate
//! Identification Number). A licensed provider key unlocks live per-CIN
//! lookups that enrich the curated entries with the registered company
//! name, address, and status; without a key, or when lookups fail, the
//! curated entries are served as-is.

use async_trait::async_trait;
use secrecy::{ExposeSecret, SecretString};
use serde_json::{json, Value};
use tracing::{debug, warn};

use crate::connectors::curated;
use crate::error::{SourceError, SourceResult};
use crate::filter;
use crate::traits::connector::{FetchOutcome, SourceConnector, SourceId};
use crate::types::candidate::Candidate;
use crate::types::thesis::ThesisFilter;

const DEFAULT_BASE_URL: &str = "https://api.signzy.app/api/v3";

/// Connector for licensed corporate-registry lookups.
pub struct RegistryConnector {
    client: reqwest::Client,
    base_url: String,
    api_key: Option<SecretString>,
}

impl RegistryConnector {
    /// Create a connector with a provider API key.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: Some(SecretString::from(api_key.into())),
            ..Self::offline()
        }
    }

    /// Read the provider key from `REGISTRY_API_KEY`. Without it the
    /// connector serves curated data only.
    pub fn from_env() -> Self {
        Self {
            api_key: std::env::var("REGISTRY_API_KEY")
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

    /// Point the connector at a different provider root (used in tests).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Look up company master data for one CIN.
    async fn lookup_cin(&self, api_key: &SecretString, cin: &str) -> SourceResult<Option<Value>> {
        let url = format!("{}/mca/company", self.base_url);
        debug!(cin = %cin, "registry lookup");

        let response = self
            .client
            .post(&url)
            .header("Authorization", api_key.expose_secret())
            .json(&json!({"cin": cin}))
            .send()
            .await
            .map_err(|e| SourceError::from_reqwest("registry", e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(SourceError::MalformedPayload {
                connector: "registry".to_string(),
                reason: format!("HTTP {status} for CIN {cin}"),
            });
        }

        let body: Value = response
            .json()
            .await
            .map_err(|e| SourceError::from_reqwest("registry", e))?;

        Ok(body
            .get("result")
            .and_then(|r| r.get("companyMasterData"))
            .cloned())
    }

    /// Enrich the curated entries with live master data. Per-CIN failures
    /// are logged and skipped; an empty harvest means the caller should
    /// fall back to the curated data unenriched.
    async fn fetch_live(&self, limit: usize) -> SourceResult<Vec<Candidate>> {
        let api_key = self
            .api_key
            .as_ref()
            .ok_or_else(|| SourceError::MissingCredentials {
                connector: "registry".to_string(),
            })?;

        let mut enriched = Vec::new();

        for candidate in curated::registry_companies().into_iter().take(limit * 2) {
            let Some(ref cin) = candidate.source_ref else {
                continue;
            };

            match self.lookup_cin(api_key, cin).await {
                Ok(Some(master)) => {
                    enriched.push(apply_master_data(candidate, &master));
                }
                Ok(None) => {
                    warn!(cin = %cin, "registry returned no master data");
                }
                Err(error) => {
                    warn!(cin = %cin, error = %error, "registry lookup failed");
                }
            }

            if enriched.len() >= limit {
                break;
            }
        }

        Ok(enriched)
    }
}

/// Overlay registry master data onto a curated entry.
fn apply_master_data(mut candidate: Candidate, master: &Value) -> Candidate {
    if let Some(name) = master
        .get("company_name")
        .and_then(Value::as_str)
        .filter(|s| !s.is_empty())
    {
        candidate.name = name.to_string();
    }
    if let Some(address) = master
        .get("registered_office_address")
        .and_then(Value::as_str)
        .filter(|s| !s.is_empty())
    {
        candidate.location = Some(address.to_string());
    }
    candidate
}

#[async_trait]
impl SourceConnector for RegistryConnector {
    fn id(&self) -> SourceId {
        SourceId::Registry
    }

    async fn fetch(
        &self,
        limit: usize,
        thesis: Option<&ThesisFilter>,
    ) -> SourceResult<FetchOutcome> {
        let pool = match self.fetch_live(limit).await {
            Ok(enriched) if !enriched.is_empty() => enriched,
            Ok(_) => {
                warn!("no registry lookups succeeded, using curated dataset");
                curated::registry_companies()
            }
            Err(SourceError::MissingCredentials { .. }) => {
                debug!("registry API key not configured, using curated dataset");
                curated::registry_companies()
            }
            Err(error) => {
                warn!(error = %error, "registry fetch failed, using curated dataset");
                curated::registry_companies()
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
        let connector = RegistryConnector::offline();
        let outcome = connector.fetch(6, None).await.unwrap();

        assert_eq!(outcome.candidates.len(), 6);
        assert!(outcome
            .candidates
            .iter()
            .all(|c| c.source == SourceId::Registry && c.source_ref.is_some()));
    }

    #[test]
    fn master_data_overrides_name_and_address() {
        let candidate = curated::registry_companies().remove(0);
        let master = json!({
            "company_name": "RAZORPAY SOFTWARE PRIVATE LIMITED",
            "registered_office_address": "Bangalore, Karnataka"
        });

        let enriched = apply_master_data(candidate, &master);
        assert_eq!(enriched.name, "RAZORPAY SOFTWARE PRIVATE LIMITED");
        assert_eq!(enriched.location.as_deref(), Some("Bangalore, Karnataka"));
    }

    #[tokio::test]
    async fn live_fetch_without_key_reports_missing_credentials() {
        let connector = RegistryConnector::offline();
        let error = connector.fetch_live(5).await.unwrap_err();
        assert!(matches!(error, SourceError::MissingCredentials { .. }));
    }

    #[test]
    fn empty_master_fields_keep_curated_values() {
        let candidate = curated::registry_companies().remove(0);
        let original_name = candidate.name.clone();

        let enriched = apply_master_data(candidate, &json!({"company_name": ""}));
        assert_eq!(enriched.name, original_name);
    }
}
