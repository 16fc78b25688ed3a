//! JSON triage report generation.
//!
//! Assembles every derived view of one analysis session into a single
//! [`TriageReport`] and optionally writes it to the output directory.
//! Everything in the report comes from the same session snapshot, so its
//! sections can never disagree with each other.

use crate::config::TriageConfig;
use crate::error::{Result, ResultExt};
use crate::insights::Insights;
use crate::profiler::DatasetAnalysis;
use crate::session::AnalysisSession;
use crate::types::{AnomalyReport, CleaningReport, QualityTier};
use chrono::Local;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

/// Full triage output for one table load.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TriageReport {
    pub generated_at: String,
    pub source: Option<String>,
    pub original_shape: (usize, usize),
    pub cleaned_shape: (usize, usize),
    pub quality_score: f64,
    pub quality_tier: QualityTier,
    pub cleaning_report: CleaningReport,
    pub anomaly_report: AnomalyReport,
    pub excluded_columns: Vec<String>,
    pub analysis: DatasetAnalysis,
    pub recommendations: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub insights: Option<Insights>,
}

/// Builds and writes [`TriageReport`]s.
pub struct ReportGenerator {
    output_dir: PathBuf,
    output_name: String,
}

impl ReportGenerator {
    pub fn new(config: &TriageConfig) -> Self {
        Self {
            output_dir: config.output_dir.clone(),
            output_name: config
                .output_name
                .clone()
                .unwrap_or_else(|| "triage_report".to_string()),
        }
    }

    /// Assemble the report for a session.
    pub fn build_report(
        &self,
        session: &AnalysisSession,
        source: Option<&Path>,
        insights: Option<Insights>,
    ) -> TriageReport {
        let score = session.quality_score();
        let mut recommendations = session.cleaning_report().recommendations.clone();
        recommendations.extend(crate::profiler::column_recommendations(session.analysis()));

        TriageReport {
            generated_at: Local::now().format("%Y-%m-%d %H:%M:%S").to_string(),
            source: source.map(|p| p.display().to_string()),
            original_shape: session.cleaning_report().original_shape,
            cleaned_shape: session.cleaning_report().cleaned_shape,
            quality_score: score,
            quality_tier: QualityTier::from_score(score),
            cleaning_report: session.cleaning_report().clone(),
            anomaly_report: session.anomaly_report(),
            excluded_columns: session.excluded_columns().into_iter().collect(),
            analysis: session.analysis().clone(),
            recommendations,
            insights,
        }
    }

    /// Write a report to `<output_dir>/<output_name>_<timestamp>.json`.
    ///
    /// Creates the output directory if needed and returns the written path.
    pub fn write_report(&self, report: &TriageReport) -> Result<PathBuf> {
        fs::create_dir_all(&self.output_dir)
            .map_err(crate::error::TriageError::from)
            .context("Creating report output directory")?;

        let timestamp = Local::now().format("%Y%m%d_%H%M%S");
        let path = self
            .output_dir
            .join(format!("{}_{}.json", self.output_name, timestamp));

        let json = serde_json::to_string_pretty(report)?;
        fs::write(&path, json)
            .map_err(crate::error::TriageError::from)
            .context("Writing triage report")?;

        info!(path = %path.display(), "triage report written");
        Ok(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use polars::prelude::*;

    fn session() -> AnalysisSession {
        let df = df![
            "id" => [1, 2, 3, 4],
            "void" => [None::<i32>, None, None, None],
        ]
        .unwrap();
        AnalysisSession::load(df, &TriageConfig::default()).unwrap()
    }

    #[test]
    fn test_build_report_is_internally_consistent() {
        let config = TriageConfig::default();
        let generator = ReportGenerator::new(&config);
        let session = session();

        let report = generator.build_report(&session, None, None);

        assert_eq!(report.quality_score, report.anomaly_report.summary.quality_score);
        assert_eq!(report.quality_tier, QualityTier::from_score(report.quality_score));
        assert_eq!(
            report.excluded_columns,
            vec!["void".to_string()],
        );
        assert!(report.insights.is_none());
        assert!(!report.generated_at.is_empty());
    }

    #[test]
    fn test_report_serializes_to_json() {
        let config = TriageConfig::default();
        let generator = ReportGenerator::new(&config);
        let report = generator.build_report(&session(), None, None);

        let json = serde_json::to_string(&report).unwrap();
        assert!(json.contains("quality_score"));
        assert!(json.contains("anomaly_report"));
        // insights omitted entirely when absent
        assert!(!json.contains("\"insights\""));
    }

    #[test]
    fn test_write_report_creates_file() {
        let dir = std::env::temp_dir().join("triage_report_test");
        let config = TriageConfig::builder()
            .output_dir(&dir)
            .output_name("unit_test")
            .build()
            .unwrap();
        let generator = ReportGenerator::new(&config);
        let report = generator.build_report(&session(), None, None);

        let path = generator.write_report(&report).unwrap();

        assert!(path.exists());
        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.contains("quality_tier"));
        std::fs::remove_dir_all(&dir).ok();
    }
}
