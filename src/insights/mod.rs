//! Natural-language insight generation.
//!
//! Providers implement [`InsightProvider`] and turn a profiler analysis
//! plus anomaly report into a structured [`Insights`] value. Two LLM-backed
//! providers exist behind the `ai` feature (OpenRouter and Ollama); the
//! rule-based provider works offline and is the fallback whenever an LLM
//! call fails.

pub mod prompt;
pub mod provider;
pub mod rule_based;

#[cfg(feature = "ai")]
pub mod local;
#[cfg(feature = "ai")]
pub mod remote;

pub use provider::{InsightContext, InsightProvider};
pub use rule_based::RuleBasedProvider;

#[cfg(feature = "ai")]
pub use local::OllamaProvider;
#[cfg(feature = "ai")]
pub use remote::{OpenRouterConfig, OpenRouterProvider};

use serde::{Deserialize, Serialize};

/// One titled insight.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Insight {
    pub title: String,
    pub description: String,
}

/// One actionable recommendation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recommendation {
    pub action: String,
    pub justification: String,
}

/// Structured insight output, identical in shape for every provider.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Insights {
    pub executive_summary: String,
    #[serde(default)]
    pub main_trends: Vec<String>,
    #[serde(default)]
    pub insights: Vec<Insight>,
    #[serde(default)]
    pub anomalies: Vec<String>,
    #[serde(default)]
    pub recommendations: Vec<Recommendation>,
    #[serde(default)]
    pub conclusion: String,
}
