//! OpenRouter insight provider.
//!
//! Implements [`InsightProvider`] over the OpenRouter API
//! (<https://openrouter.ai/>), which fronts many models through one
//! chat-completions endpoint.

use crate::error::{Result, TriageError};
use crate::insights::prompt::{build_insight_prompt, parse_insights_response};
use crate::insights::{InsightContext, InsightProvider, Insights};
use reqwest::blocking::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::debug;

/// Default OpenRouter API endpoint.
const DEFAULT_BASE_URL: &str = "https://openrouter.ai/api/v1/chat/completions";

/// Default model for insight generation.
const DEFAULT_MODEL: &str = "deepseek/deepseek-chat";

/// Default timeout for API requests in seconds.
const DEFAULT_TIMEOUT_SECS: u64 = 60;

/// Default temperature (low for stable, parseable output).
const DEFAULT_TEMPERATURE: f32 = 0.3;

/// Default max tokens for responses.
const DEFAULT_MAX_TOKENS: u32 = 1500;

#[derive(Debug, Serialize)]
struct ChatRequest {
    model: String,
    messages: Vec<Message>,
    temperature: f32,
    max_tokens: u32,
}

#[derive(Debug, Serialize, Deserialize)]
struct Message {
    role: String,
    content: String,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Option<Vec<Choice>>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: Option<Message>,
}

/// Configuration for the OpenRouter provider.
#[derive(Debug, Clone)]
pub struct OpenRouterConfig {
    /// The model to use (e.g., "deepseek/deepseek-chat", "openai/gpt-4o").
    pub model: String,
    /// Temperature for response generation (0.0 - 2.0).
    pub temperature: f32,
    /// Maximum tokens in the response.
    pub max_tokens: u32,
    /// Request timeout in seconds.
    pub timeout_secs: u64,
    /// Base URL for the API (useful for proxies or custom endpoints).
    pub base_url: String,
}

impl Default for OpenRouterConfig {
    fn default() -> Self {
        Self {
            model: DEFAULT_MODEL.to_string(),
            temperature: DEFAULT_TEMPERATURE,
            max_tokens: DEFAULT_MAX_TOKENS,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }
}

impl OpenRouterConfig {
    /// Create a new configuration builder.
    pub fn builder() -> OpenRouterConfigBuilder {
        OpenRouterConfigBuilder::default()
    }
}

/// Builder for [`OpenRouterConfig`].
#[derive(Default)]
pub struct OpenRouterConfigBuilder {
    model: Option<String>,
    temperature: Option<f32>,
    max_tokens: Option<u32>,
    timeout_secs: Option<u64>,
    base_url: Option<String>,
}

impl OpenRouterConfigBuilder {
    /// Set the model to use.
    pub fn model(mut self, model: impl Into<String>) -> Self {
        self.model = Some(model.into());
        self
    }

    /// Set the temperature (0.0 - 2.0).
    pub fn temperature(mut self, temperature: f32) -> Self {
        self.temperature = Some(temperature);
        self
    }

    /// Set the maximum tokens.
    pub fn max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = Some(max_tokens);
        self
    }

    /// Set the request timeout in seconds.
    pub fn timeout_secs(mut self, timeout_secs: u64) -> Self {
        self.timeout_secs = Some(timeout_secs);
        self
    }

    /// Set a custom base URL.
    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    /// Build the configuration.
    pub fn build(self) -> OpenRouterConfig {
        OpenRouterConfig {
            model: self.model.unwrap_or_else(|| DEFAULT_MODEL.to_string()),
            temperature: self.temperature.unwrap_or(DEFAULT_TEMPERATURE),
            max_tokens: self.max_tokens.unwrap_or(DEFAULT_MAX_TOKENS),
            timeout_secs: self.timeout_secs.unwrap_or(DEFAULT_TIMEOUT_SECS),
            base_url: self.base_url.unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
        }
    }
}

/// OpenRouter-backed insight provider.
///
/// # Example
///
/// ```rust,ignore
/// use data_triage::insights::{OpenRouterConfig, OpenRouterProvider};
///
/// let provider = OpenRouterProvider::new("your-api-key")?;
///
/// let config = OpenRouterConfig::builder()
///     .model("openai/gpt-4o")
///     .temperature(0.2)
///     .build();
/// let provider = OpenRouterProvider::with_config("your-api-key", config)?;
/// ```
pub struct OpenRouterProvider {
    api_key: String,
    config: OpenRouterConfig,
    client: Client,
}

impl OpenRouterProvider {
    /// Create a new provider with default configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be created.
    pub fn new(api_key: impl Into<String>) -> Result<Self> {
        Self::with_config(api_key, OpenRouterConfig::default())
    }

    /// Create a new provider with custom configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be created.
    pub fn with_config(api_key: impl Into<String>, config: OpenRouterConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            api_key: api_key.into(),
            config,
            client,
        })
    }

    fn call_api(&self, prompt: &str) -> Result<String> {
        let request = ChatRequest {
            model: self.config.model.clone(),
            messages: vec![Message {
                role: "user".to_string(),
                content: prompt.to_string(),
            }],
            temperature: self.config.temperature,
            max_tokens: self.config.max_tokens,
        };

        let response = self
            .client
            .post(&self.config.base_url)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .header("Content-Type", "application/json")
            .json(&request)
            .send()?;

        if !response.status().is_success() {
            return Err(TriageError::InsightError(format!(
                "OpenRouter API error {}: {}",
                response.status(),
                response.text().unwrap_or_default()
            )));
        }

        let parsed: ChatResponse = response.json()?;
        parsed
            .choices
            .and_then(|mut choices| choices.pop())
            .and_then(|choice| choice.message)
            .map(|message| message.content)
            .ok_or_else(|| {
                TriageError::InsightError("OpenRouter response contained no choices".to_string())
            })
    }
}

impl InsightProvider for OpenRouterProvider {
    fn generate_insights(&self, context: &InsightContext<'_>) -> Result<Insights> {
        let prompt = build_insight_prompt(context);
        debug!(model = %self.config.model, "requesting insights from OpenRouter");
        let response = self.call_api(&prompt)?;
        parse_insights_response(&response)
    }

    fn name(&self) -> &str {
        "OpenRouter"
    }

    fn model(&self) -> Option<&str> {
        Some(&self.config.model)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_defaults() {
        let config = OpenRouterConfig::default();
        assert_eq!(config.model, DEFAULT_MODEL);
        assert_eq!(config.timeout_secs, DEFAULT_TIMEOUT_SECS);
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
    }

    #[test]
    fn test_config_builder() {
        let config = OpenRouterConfig::builder()
            .model("openai/gpt-4o")
            .temperature(0.1)
            .max_tokens(800)
            .timeout_secs(20)
            .base_url("http://localhost:9999/v1/chat/completions")
            .build();

        assert_eq!(config.model, "openai/gpt-4o");
        assert_eq!(config.temperature, 0.1);
        assert_eq!(config.max_tokens, 800);
        assert_eq!(config.timeout_secs, 20);
        assert!(config.base_url.starts_with("http://localhost"));
    }

    #[test]
    fn test_provider_identity() {
        let provider = OpenRouterProvider::new("test-key").unwrap();
        assert_eq!(provider.name(), "OpenRouter");
        assert_eq!(provider.model(), Some(DEFAULT_MODEL));
    }
}
