//! OpenAI implementation of the insight provider.
//!
//! Asks a chat model for qualitative insights about a candidate. Strictly
//! best-effort: the job worker drops insight failures, so this provider
//! never blocks a discovery run.

use async_trait::async_trait;
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};

use crate::error::{DiscoveryError, Result};
use crate::traits::insight::InsightProvider;
use crate::types::candidate::Candidate;
use crate::types::result::Insight;

/// OpenAI-backed insight provider.
#[derive(Clone)]
pub struct OpenAiInsights {
    client: reqwest::Client,
    api_key: SecretString,
    model: String,
    base_url: String,
}

impl OpenAiInsights {
    /// Create a provider with the given API key.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::builder()
                .timeout(std::time::Duration::from_secs(30))
                .build()
                .expect("Failed to create HTTP client"),
            api_key: SecretString::from(api_key.into()),
            model: "gpt-4o-mini".to_string(),
            base_url: "https://api.openai.com/v1".to_string(),
        }
    }

    /// Create from environment variable `OPENAI_API_KEY`.
    pub fn from_env() -> Result<Self> {
        let api_key = std::env::var("OPENAI_API_KEY")
            .map_err(|_| DiscoveryError::Config("OPENAI_API_KEY not set".into()))?;
        Ok(Self::new(api_key))
    }

    /// Set the chat model (default: gpt-4o-mini).
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Set a custom base URL (for Azure, proxies, etc.).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    async fn chat(&self, system: &str, user: &str) -> Result<String> {
        let request = ChatRequest {
            model: self.model.clone(),
            messages: vec![
                ChatMessage {
                    role: "system".to_string(),
                    content: system.to_string(),
                },
                ChatMessage {
                    role: "user".to_string(),
                    content: user.to_string(),
                },
            ],
            temperature: Some(0.3),
            max_tokens: Some(1024),
        };

        let response = self
            .client
            .post(format!("{}/chat/completions", self.base_url))
            .header(
                "Authorization",
                format!("Bearer {}", self.api_key.expose_secret()),
            )
            .header("Content-Type", "application/json")
            .json(&request)
            .send()
            .await
            .map_err(|e| DiscoveryError::Insight(Box::new(e)))?;

        if !response.status().is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(DiscoveryError::Insight(
                format!("OpenAI API error: {error_text}").into(),
            ));
        }

        let chat_response: ChatResponse = response
            .json()
            .await
            .map_err(|e| DiscoveryError::Insight(Box::new(e)))?;

        chat_response
            .choices
            .into_iter()
            .next()
            .map(|c| c.message.content)
            .ok_or_else(|| DiscoveryError::Insight("No response from OpenAI".into()))
    }
}

#[async_trait]
impl InsightProvider for OpenAiInsights {
    async fn insights(&self, candidate: &Candidate) -> Result<Vec<Insight>> {
        let system = r#"You are a VC analyst. Given a startup, produce up to 3 insights as JSON:
[
  {"insight_type": "market_size" | "growth_potential" | "team_quality" | "risk", "content": "one sentence", "confidence": 0.0-1.0}
]

Be factual. Only use the provided data."#;

        let user = format!(
            "Name: {}\nSector: {}\nStage: {}\nTagline: {}\nDescription: {}\nSignals: {:?}",
            candidate.name,
            candidate.sector,
            candidate.stage,
            candidate.tagline.as_deref().unwrap_or("Unknown"),
            candidate.description.as_deref().unwrap_or("Unknown"),
            candidate.signals,
        );

        let response = self.chat(system, &user).await?;
        let parsed: Vec<InsightJson> = serde_json::from_str(&response)
            .or_else(|_| {
                // Try to extract JSON from a markdown code block
                let json_str = response
                    .trim()
                    .trim_start_matches("```json")
                    .trim_start_matches("```")
                    .trim_end_matches("```")
                    .trim();
                serde_json::from_str(json_str)
            })
            .map_err(|e| {
                DiscoveryError::Insight(format!("Failed to parse insights: {e}").into())
            })?;

        Ok(parsed
            .into_iter()
            .map(|i| Insight::new(i.insight_type, i.content).with_confidence(i.confidence))
            .collect())
    }
}

// Request/Response types

#[derive(Serialize)]
struct ChatRequest {
    model: String,
    messages: Vec<ChatMessage>,
    temperature: Option<f32>,
    max_tokens: Option<u32>,
}

#[derive(Serialize)]
struct ChatMessage {
    role: String,
    content: String,
}

#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChatResponseMessage,
}

#[derive(Deserialize)]
struct ChatResponseMessage {
    content: String,
}

#[derive(Deserialize)]
struct InsightJson {
    insight_type: String,
    content: String,
    #[serde(default = "default_confidence")]
    confidence: f64,
}

fn default_confidence() -> f64 {
    0.5
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_overrides_model_and_base_url() {
        let provider = OpenAiInsights::new("sk-test")
            .with_model("gpt-4o")
            .with_base_url("https://custom.api.com");

        assert_eq!(provider.model, "gpt-4o");
        assert_eq!(provider.base_url, "https://custom.api.com");
    }
}
