//! Configuration types for the triage pipeline.
//!
//! This module provides configuration options using the builder pattern
//! for flexible and ergonomic pipeline setup.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Configuration for the triage pipeline.
///
/// Use [`TriageConfig::builder()`] to create a new configuration
/// with fluent API.
///
/// # Example
///
/// ```rust,ignore
/// use data_triage::config::TriageConfig;
///
/// let config = TriageConfig::builder()
///     .quasi_empty_threshold(0.9)
///     .use_ai_insights(false)
///     .build();
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TriageConfig {
    /// Missing-value fraction at or above which a column is considered
    /// quasi-empty (0.0 - 1.0, exclusive of fully empty).
    /// Default: 0.9 (90%)
    pub quasi_empty_threshold: f64,

    /// Missing-value fraction above which a column is flagged as having
    /// high missing values (0.0 - 1.0).
    /// Default: 0.5 (50%)
    pub high_missing_threshold: f64,

    /// Fraction of non-null cells in a string column that must parse as
    /// numbers for the column to be converted to Float64.
    /// Default: 0.5 (50%, strictly greater than)
    pub numeric_conversion_threshold: f64,

    /// Output directory for generated reports.
    /// Default: "output"
    pub output_dir: PathBuf,

    /// Custom output file name (without extension).
    /// If None, uses "triage_report".
    /// Default: None
    pub output_name: Option<String>,

    /// Whether to query an LLM provider for insights.
    /// If false or no provider is configured, rule-based insights are used.
    /// Default: true
    pub use_ai_insights: bool,

    /// Whether to write the report to disk.
    /// When false, results are kept in memory only (useful for GUI apps).
    /// Default: true
    pub save_to_disk: bool,
}

impl Default for TriageConfig {
    fn default() -> Self {
        Self {
            quasi_empty_threshold: 0.9,
            high_missing_threshold: 0.5,
            numeric_conversion_threshold: 0.5,
            output_dir: PathBuf::from("output"),
            output_name: None,
            use_ai_insights: true,
            save_to_disk: true,
        }
    }
}

impl TriageConfig {
    /// Create a new configuration builder.
    pub fn builder() -> TriageConfigBuilder {
        TriageConfigBuilder::default()
    }

    /// Validate the configuration and return errors if invalid.
    pub fn validate(&self) -> Result<(), ConfigValidationError> {
        for (field, value) in [
            ("quasi_empty_threshold", self.quasi_empty_threshold),
            ("high_missing_threshold", self.high_missing_threshold),
            (
                "numeric_conversion_threshold",
                self.numeric_conversion_threshold,
            ),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(ConfigValidationError::InvalidThreshold {
                    field: field.to_string(),
                    value,
                });
            }
        }

        Ok(())
    }
}

/// Errors that can occur during configuration validation.
#[derive(Debug, thiserror::Error)]
pub enum ConfigValidationError {
    #[error("Invalid threshold for '{field}': {value} (must be between 0.0 and 1.0)")]
    InvalidThreshold { field: String, value: f64 },
}

/// Builder for [`TriageConfig`] with fluent API.
#[derive(Debug, Default)]
pub struct TriageConfigBuilder {
    quasi_empty_threshold: Option<f64>,
    high_missing_threshold: Option<f64>,
    numeric_conversion_threshold: Option<f64>,
    output_dir: Option<PathBuf>,
    output_name: Option<String>,
    use_ai_insights: Option<bool>,
    save_to_disk: Option<bool>,
}

impl TriageConfigBuilder {
    /// Set the quasi-empty threshold.
    ///
    /// # Arguments
    /// * `threshold` - Value between 0.0 and 1.0 (e.g., 0.9 = 90%)
    pub fn quasi_empty_threshold(mut self, threshold: f64) -> Self {
        self.quasi_empty_threshold = Some(threshold);
        self
    }

    /// Set the high-missing threshold.
    ///
    /// # Arguments
    /// * `threshold` - Value between 0.0 and 1.0 (e.g., 0.5 = 50%)
    pub fn high_missing_threshold(mut self, threshold: f64) -> Self {
        self.high_missing_threshold = Some(threshold);
        self
    }

    /// Set the numeric conversion threshold.
    ///
    /// String columns whose fraction of parseable non-null cells strictly
    /// exceeds this value are converted to Float64.
    pub fn numeric_conversion_threshold(mut self, threshold: f64) -> Self {
        self.numeric_conversion_threshold = Some(threshold);
        self
    }

    /// Set the output directory for reports.
    pub fn output_dir(mut self, path: impl Into<PathBuf>) -> Self {
        self.output_dir = Some(path.into());
        self
    }

    /// Set a custom output file name (without extension).
    pub fn output_name(mut self, name: impl Into<String>) -> Self {
        self.output_name = Some(name.into());
        self
    }

    /// Enable or disable LLM-backed insight generation.
    ///
    /// If disabled, the rule-based fallback is used instead.
    pub fn use_ai_insights(mut self, use_ai: bool) -> Self {
        self.use_ai_insights = Some(use_ai);
        self
    }

    /// Enable or disable writing the report to disk.
    pub fn save_to_disk(mut self, save: bool) -> Self {
        self.save_to_disk = Some(save);
        self
    }

    /// Build the configuration.
    ///
    /// Returns a validated `TriageConfig` or an error if validation fails.
    pub fn build(self) -> Result<TriageConfig, ConfigValidationError> {
        let config = TriageConfig {
            quasi_empty_threshold: self.quasi_empty_threshold.unwrap_or(0.9),
            high_missing_threshold: self.high_missing_threshold.unwrap_or(0.5),
            numeric_conversion_threshold: self.numeric_conversion_threshold.unwrap_or(0.5),
            output_dir: self.output_dir.unwrap_or_else(|| PathBuf::from("output")),
            output_name: self.output_name,
            use_ai_insights: self.use_ai_insights.unwrap_or(true),
            save_to_disk: self.save_to_disk.unwrap_or(true),
        };

        config.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = TriageConfig::default();
        assert_eq!(config.quasi_empty_threshold, 0.9);
        assert_eq!(config.high_missing_threshold, 0.5);
        assert_eq!(config.numeric_conversion_threshold, 0.5);
        assert!(config.use_ai_insights);
        assert!(config.save_to_disk);
    }

    #[test]
    fn test_builder_defaults() {
        let config = TriageConfig::builder().build().unwrap();
        assert_eq!(config.quasi_empty_threshold, 0.9);
        assert_eq!(config.high_missing_threshold, 0.5);
    }

    #[test]
    fn test_builder_custom_values() {
        let config = TriageConfig::builder()
            .quasi_empty_threshold(0.95)
            .high_missing_threshold(0.6)
            .numeric_conversion_threshold(0.75)
            .use_ai_insights(false)
            .output_dir("reports")
            .build()
            .unwrap();

        assert_eq!(config.quasi_empty_threshold, 0.95);
        assert_eq!(config.high_missing_threshold, 0.6);
        assert_eq!(config.numeric_conversion_threshold, 0.75);
        assert!(!config.use_ai_insights);
        assert_eq!(config.output_dir.to_str().unwrap(), "reports");
    }

    #[test]
    fn test_validation_invalid_threshold() {
        let result = TriageConfig::builder().quasi_empty_threshold(1.5).build();

        assert!(result.is_err());
        assert!(matches!(
            result.unwrap_err(),
            ConfigValidationError::InvalidThreshold { .. }
        ));
    }

    #[test]
    fn test_config_serialization() {
        let config = TriageConfig::default();
        let json = serde_json::to_string(&config).unwrap();
        let deserialized: TriageConfig = serde_json::from_str(&json).unwrap();

        assert_eq!(
            config.quasi_empty_threshold,
            deserialized.quasi_empty_threshold
        );
        assert_eq!(config.output_dir, deserialized.output_dir);
    }

    #[test]
    fn test_config_from_json() {
        let json = r#"{
            "quasi_empty_threshold": 0.85,
            "high_missing_threshold": 0.4,
            "numeric_conversion_threshold": 0.6,
            "output_dir": "custom_output",
            "output_name": "my_report",
            "use_ai_insights": false,
            "save_to_disk": false
        }"#;

        let config: TriageConfig = serde_json::from_str(json).expect("Should deserialize");

        assert_eq!(config.quasi_empty_threshold, 0.85);
        assert_eq!(config.high_missing_threshold, 0.4);
        assert_eq!(config.output_name, Some("my_report".to_string()));
        assert!(!config.use_ai_insights);
        assert!(!config.save_to_disk);
    }
}
