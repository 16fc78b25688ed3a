//! Anomaly report assembly.
//!
//! Flattens a [`CleaningReport`] plus its score into the consumer-agnostic
//! [`AnomalyReport`] shape shared by the UI anomaly panel, the
//! visualization filter and the LLM prompt builder. Pure and deterministic;
//! `high_missing_values` is recomputed from `missing_by_column` here so the
//! report stays self-consistent even when built standalone.

use crate::types::{
    AnomalyReport, AnomalySummary, CleaningReport, ColumnGroup, DuplicateStats, HighMissingEntry,
};

/// Missing percentage above which a column is listed in
/// `high_missing_values`.
const HIGH_MISSING_PCT: f64 = 50.0;

pub struct AnomalyReportBuilder;

impl AnomalyReportBuilder {
    /// Build the anomaly report for a cleaning report and its score.
    pub fn build(report: &CleaningReport, quality_score: f64) -> AnomalyReport {
        let rows = report.original_shape.0;
        let duplicate_percentage = if rows > 0 {
            report.duplicate_row_count as f64 / rows as f64 * 100.0
        } else {
            0.0
        };

        let mut high_missing_values: Vec<HighMissingEntry> = report
            .missing_by_column
            .iter()
            .filter(|(_, stats)| stats.percentage > HIGH_MISSING_PCT)
            .map(|(column, stats)| HighMissingEntry {
                column: column.clone(),
                percentage: stats.percentage,
            })
            .collect();
        high_missing_values.sort_by(|a, b| {
            b.percentage
                .partial_cmp(&a.percentage)
                .unwrap_or(std::cmp::Ordering::Equal)
        });

        // One per defect *category* present, not per defective column.
        let total_anomalies = [
            !report.empty_columns.is_empty(),
            !report.quasi_empty_columns.is_empty(),
            report.duplicate_row_count > 0,
            !high_missing_values.is_empty(),
        ]
        .iter()
        .filter(|present| **present)
        .count();

        AnomalyReport {
            summary: AnomalySummary {
                total_anomalies,
                warnings_count: report.warnings.len(),
                quality_score,
            },
            empty_columns: ColumnGroup {
                count: report.empty_columns.len(),
                columns: report.empty_columns.clone(),
            },
            quasi_empty_columns: ColumnGroup {
                count: report.quasi_empty_columns.len(),
                columns: report.quasi_empty_columns.clone(),
            },
            duplicates: DuplicateStats {
                count: report.duplicate_row_count,
                percentage: duplicate_percentage,
            },
            high_missing_values,
        }
    }
}
