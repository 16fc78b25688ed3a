//! Ollama insight provider.
//!
//! Implements [`InsightProvider`] against a local Ollama server
//! (<https://ollama.com/>), for fully offline LLM insight generation.

use crate::error::{Result, TriageError};
use crate::insights::prompt::{build_insight_prompt, parse_insights_response};
use crate::insights::{InsightContext, InsightProvider, Insights};
use reqwest::blocking::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::debug;

/// Default Ollama server address.
const DEFAULT_BASE_URL: &str = "http://localhost:11434";

/// Default local model.
pub const DEFAULT_MODEL: &str = "llama3.2";

/// Local generation can be slow on CPU.
const DEFAULT_TIMEOUT_SECS: u64 = 120;

#[derive(Debug, Serialize)]
struct GenerateRequest {
    model: String,
    prompt: String,
    stream: bool,
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    response: String,
}

/// Ollama-backed insight provider.
pub struct OllamaProvider {
    base_url: String,
    model: String,
    client: Client,
}

impl OllamaProvider {
    /// Create a provider against the default local server.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be created.
    pub fn new(model: impl Into<String>) -> Result<Self> {
        Self::with_base_url(model, DEFAULT_BASE_URL)
    }

    /// Create a provider against a custom server address.
    pub fn with_base_url(model: impl Into<String>, base_url: impl Into<String>) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(DEFAULT_TIMEOUT_SECS))
            .build()?;

        Ok(Self {
            base_url: base_url.into(),
            model: model.into(),
            client,
        })
    }

    /// Check whether the Ollama server answers at all.
    pub fn is_available(&self) -> bool {
        self.client
            .get(format!("{}/api/tags", self.base_url))
            .send()
            .map(|r| r.status().is_success())
            .unwrap_or(false)
    }

    fn call_api(&self, prompt: &str) -> Result<String> {
        let request = GenerateRequest {
            model: self.model.clone(),
            prompt: prompt.to_string(),
            stream: false,
        };

        let response = self
            .client
            .post(format!("{}/api/generate", self.base_url))
            .json(&request)
            .send()?;

        if !response.status().is_success() {
            return Err(TriageError::InsightError(format!(
                "Ollama error {}: {}",
                response.status(),
                response.text().unwrap_or_default()
            )));
        }

        let parsed: GenerateResponse = response.json()?;
        Ok(parsed.response)
    }
}

impl InsightProvider for OllamaProvider {
    fn generate_insights(&self, context: &InsightContext<'_>) -> Result<Insights> {
        let prompt = build_insight_prompt(context);
        debug!(model = %self.model, "requesting insights from Ollama");
        let response = self.call_api(&prompt)?;
        parse_insights_response(&response)
    }

    fn name(&self) -> &str {
        "Ollama"
    }

    fn model(&self) -> Option<&str> {
        Some(&self.model)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_provider_identity() {
        let provider = OllamaProvider::new("llama3.2").unwrap();
        assert_eq!(provider.name(), "Ollama");
        assert_eq!(provider.model(), Some("llama3.2"));
    }

    #[test]
    fn test_custom_base_url() {
        let provider = OllamaProvider::with_base_url("mistral", "http://10.0.0.2:11434").unwrap();
        assert_eq!(provider.base_url, "http://10.0.0.2:11434");
    }
}
