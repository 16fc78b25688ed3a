//! Insight provider trait for abstracting LLM interactions.
//!
//! This module defines the [`InsightProvider`] trait that enables support
//! for multiple backends (OpenRouter, Ollama, rule-based) without changing
//! the reporting pipeline.
//!
//! # Implementing a New Provider
//!
//! 1. Create a new file in `src/insights/` (e.g., `openai.rs`)
//! 2. Implement the [`InsightProvider`] trait for your provider struct
//! 3. Export the provider in `src/insights/mod.rs`

use crate::error::Result;
use crate::insights::Insights;
use crate::profiler::DatasetAnalysis;
use crate::types::AnomalyReport;

/// Everything a provider may draw on when generating insights.
///
/// Both fields come from the same analysis session, so the counts embedded
/// in a prompt can never disagree with what the UI reports.
pub struct InsightContext<'a> {
    pub analysis: &'a DatasetAnalysis,
    pub anomaly_report: &'a AnomalyReport,
}

/// Trait for backends that generate dataset insights.
///
/// # Thread Safety
///
/// Implementations must be `Send + Sync` to allow usage across threads.
///
/// # Error Handling
///
/// Implementations should return meaningful errors; the caller falls back
/// to the rule-based provider when an LLM-backed one fails.
pub trait InsightProvider: Send + Sync {
    /// Generate structured insights for the given context.
    fn generate_insights(&self, context: &InsightContext<'_>) -> Result<Insights>;

    /// Provider name for logging and debugging.
    fn name(&self) -> &str;

    /// The model being used, if the provider exposes one.
    fn model(&self) -> Option<&str> {
        None
    }
}
