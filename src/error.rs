//! Custom error types for the data triage pipeline.
//!
//! This module provides an error hierarchy using `thiserror` for better
//! error handling and context throughout the pipeline.
//!
//! Errors are serializable so they can be forwarded to a frontend or
//! embedded in JSON output as `{code, message}` pairs.

use serde::Serialize;
use serde::ser::SerializeStruct;
use thiserror::Error;

/// The main error type for the triage pipeline.
#[derive(Error, Debug)]
pub enum TriageError {
    /// Column was not found in the dataset.
    #[error("Column '{0}' not found in dataset")]
    ColumnNotFound(String),

    /// Invalid configuration provided.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// The file format is not supported by the loader.
    #[error("Unsupported file format: {0}")]
    UnsupportedFormat(String),

    /// Dataset loading failed.
    #[error("Failed to load dataset: {0}")]
    LoadFailed(String),

    /// Insight provider (LLM or fallback) error.
    #[error("Insight provider error: {0}")]
    InsightError(String),

    /// Report generation failed.
    #[error("Failed to generate report: {0}")]
    ReportGenerationFailed(String),

    /// No data loaded in the application.
    #[error("No data loaded")]
    NoDataLoaded,

    /// Internal error.
    #[error("Internal error: {0}")]
    Internal(String),

    /// IO error wrapper.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Polars error wrapper.
    #[error("Polars error: {0}")]
    Polars(#[from] polars::error::PolarsError),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// HTTP request error (for insight providers, only with "ai" feature).
    #[cfg(feature = "ai")]
    #[error("HTTP request error: {0}")]
    HttpRequest(#[from] reqwest::Error),

    /// Generic error with context.
    #[error("{context}: {source}")]
    WithContext {
        context: String,
        #[source]
        source: Box<TriageError>,
    },
}

impl TriageError {
    /// Add context to an error.
    pub fn with_context(self, context: impl Into<String>) -> Self {
        TriageError::WithContext {
            context: context.into(),
            source: Box::new(self),
        }
    }

    /// Get error code for frontend handling.
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::ColumnNotFound(_) => "COLUMN_NOT_FOUND",
            Self::InvalidConfig(_) => "INVALID_CONFIG",
            Self::UnsupportedFormat(_) => "UNSUPPORTED_FORMAT",
            Self::LoadFailed(_) => "LOAD_FAILED",
            Self::InsightError(_) => "INSIGHT_ERROR",
            Self::ReportGenerationFailed(_) => "REPORT_GENERATION_FAILED",
            Self::NoDataLoaded => "NO_DATA_LOADED",
            Self::Internal(_) => "INTERNAL_ERROR",
            Self::Io(_) => "IO_ERROR",
            Self::Polars(_) => "POLARS_ERROR",
            Self::Json(_) => "JSON_ERROR",
            #[cfg(feature = "ai")]
            Self::HttpRequest(_) => "HTTP_REQUEST_ERROR",
            Self::WithContext { source, .. } => source.error_code(),
        }
    }

    /// Check if this error is recoverable (i.e., not a fundamental failure).
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            Self::NoDataLoaded | Self::InvalidConfig(_) | Self::InsightError(_)
        )
    }
}

/// Serialize implementation for IPC/JSON compatibility.
///
/// Errors are serialized as a struct with `code` and `message` fields.
impl Serialize for TriageError {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        let mut state = serializer.serialize_struct("TriageError", 2)?;
        state.serialize_field("code", &self.error_code())?;
        state.serialize_field("message", &self.to_string())?;
        state.end()
    }
}

/// Result type alias for triage operations.
pub type Result<T> = std::result::Result<T, TriageError>;

/// Extension trait for adding context to Results.
pub trait ResultExt<T> {
    /// Add context to an error result.
    fn context(self, context: impl Into<String>) -> Result<T>;
}

impl<T> ResultExt<T> for Result<T> {
    fn context(self, context: impl Into<String>) -> Result<T> {
        self.map_err(|e| e.with_context(context))
    }
}

impl<T> ResultExt<T> for std::result::Result<T, polars::error::PolarsError> {
    fn context(self, context: impl Into<String>) -> Result<T> {
        self.map_err(|e| TriageError::Polars(e).with_context(context))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_code() {
        assert_eq!(TriageError::NoDataLoaded.error_code(), "NO_DATA_LOADED");
        assert_eq!(
            TriageError::ColumnNotFound("test".to_string()).error_code(),
            "COLUMN_NOT_FOUND"
        );
    }

    #[test]
    fn test_is_recoverable() {
        assert!(TriageError::NoDataLoaded.is_recoverable());
        assert!(TriageError::InsightError("timeout".to_string()).is_recoverable());
        assert!(!TriageError::Internal("bug".to_string()).is_recoverable());
    }

    #[test]
    fn test_error_serialization() {
        let error = TriageError::ColumnNotFound("Age".to_string());
        let json = serde_json::to_string(&error).unwrap();
        assert!(json.contains("COLUMN_NOT_FOUND"));
        assert!(json.contains("Age"));
    }

    #[test]
    fn test_with_context() {
        let error =
            TriageError::ColumnNotFound("test".to_string()).with_context("During profiling");
        assert!(error.to_string().contains("During profiling"));
        assert_eq!(error.error_code(), "COLUMN_NOT_FOUND"); // Preserves original code
    }
}
