//! # data-triage
//!
//! Data-quality triage and anomaly reporting for tabular datasets.
//!
//! The pipeline inspects a raw table, classifies columns and rows by
//! quality defect (empty, quasi-empty, high-missing, low-variance,
//! duplicates), converts mostly-numeric text columns, computes a single
//! 0-100 quality score, and produces a structured anomaly report consumed
//! identically by the UI, the visualization filter and the LLM prompt
//! builder. A statistical profiler and optional LLM-backed insight
//! generation round out the report.
//!
//! # Example
//!
//! ```rust,ignore
//! use data_triage::{AnalysisSession, TriageConfig};
//! use polars::prelude::*;
//!
//! let df = CsvReader::from_path("data.csv")?.finish()?;
//! let config = TriageConfig::default();
//!
//! let session = AnalysisSession::load(df, &config)?;
//! println!("quality score: {:.1}", session.quality_score());
//! for anomaly in &session.anomaly_report().high_missing_values {
//!     println!("{} is {:.1}% missing", anomaly.column, anomaly.percentage);
//! }
//! ```
//!
//! # Modules
//!
//! - [`quality`] — classifier, scorer, anomaly report builder, viz filter
//! - [`profiler`] — descriptive statistics over the cleaned table
//! - [`insights`] — rule-based and LLM-backed insight providers
//! - [`reporting`] — JSON triage report assembly
//! - [`session`] — per-load immutable snapshot tying it all together

pub mod config;
pub mod error;
pub mod insights;
pub mod loader;
pub mod profiler;
pub mod quality;
pub mod reporting;
pub mod session;
pub mod types;
pub mod utils;

pub use config::{TriageConfig, TriageConfigBuilder};
pub use error::{Result, TriageError};
pub use profiler::{DataProfiler, DatasetAnalysis};
pub use quality::{
    AnomalyReportBuilder, QualityClassifier, columns_to_exclude, quality_score, quality_tier,
};
pub use reporting::{ReportGenerator, TriageReport};
pub use session::AnalysisSession;
pub use types::{AnomalyReport, CleaningReport, ColumnDefect, DefectKind, QualityTier, Severity};
