//! Per-load analysis session.
//!
//! [`AnalysisSession`] is an immutable snapshot built once per table load:
//! the original table, the cleaned table, the cleaning report, and the
//! profiler analysis. Scores, anomaly reports and the exclusion set are
//! pure derivations recomputed on demand. Loading a new table constructs a
//! whole new session, so no consumer can ever observe a partially updated
//! state.

use crate::config::TriageConfig;
use crate::error::Result;
use crate::profiler::{DataProfiler, DatasetAnalysis};
use crate::quality::{AnomalyReportBuilder, QualityClassifier, columns_to_exclude, quality_score};
use crate::types::{AnomalyReport, CleaningReport, QualityTier};
use polars::prelude::DataFrame;
use std::collections::BTreeSet;

pub struct AnalysisSession {
    original: DataFrame,
    cleaned: DataFrame,
    cleaning_report: CleaningReport,
    analysis: DatasetAnalysis,
}

impl AnalysisSession {
    /// Run the full pipeline over a freshly loaded table.
    pub fn load(df: DataFrame, config: &TriageConfig) -> Result<Self> {
        let (cleaned, cleaning_report) = QualityClassifier::classify(&df, config)?;
        let analysis = DataProfiler::analyze(&cleaned)?;

        Ok(Self {
            original: df,
            cleaned,
            cleaning_report,
            analysis,
        })
    }

    /// The table as loaded, kept for before/after comparison.
    pub fn original(&self) -> &DataFrame {
        &self.original
    }

    /// The cleaned table consumed by the profiler and visualization.
    pub fn cleaned(&self) -> &DataFrame {
        &self.cleaned
    }

    pub fn cleaning_report(&self) -> &CleaningReport {
        &self.cleaning_report
    }

    pub fn analysis(&self) -> &DatasetAnalysis {
        &self.analysis
    }

    /// Quality score, recomputed from the cleaning report.
    pub fn quality_score(&self) -> f64 {
        quality_score(&self.cleaning_report)
    }

    pub fn quality_tier(&self) -> QualityTier {
        QualityTier::from_score(self.quality_score())
    }

    /// Anomaly report, recomputed from the cleaning report and score.
    pub fn anomaly_report(&self) -> AnomalyReport {
        AnomalyReportBuilder::build(&self.cleaning_report, self.quality_score())
    }

    /// Columns to exclude from chart-producing consumers.
    pub fn excluded_columns(&self) -> BTreeSet<String> {
        columns_to_exclude(&self.cleaning_report)
    }
}
