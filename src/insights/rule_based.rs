//! Rule-based insight generation.
//!
//! Derives [`Insights`] directly from the profiler analysis and anomaly
//! report without any network access. Used as the default provider and as
//! the fallback when an LLM-backed provider fails.

use crate::error::Result;
use crate::insights::{Insight, InsightContext, InsightProvider, Insights, Recommendation};
use crate::types::QualityTier;
use tracing::debug;

#[derive(Debug, Default)]
pub struct RuleBasedProvider;

impl RuleBasedProvider {
    pub fn new() -> Self {
        Self
    }
}

impl InsightProvider for RuleBasedProvider {
    fn generate_insights(&self, context: &InsightContext<'_>) -> Result<Insights> {
        let analysis = context.analysis;
        let report = context.anomaly_report;
        let meta = &analysis.metadata;
        let score = report.summary.quality_score;

        debug!(score, "generating rule-based insights");

        let quality_phrase = match QualityTier::from_score(score) {
            QualityTier::Good => "good overall quality",
            QualityTier::NeedsImprovement => "quality that needs improvement",
            QualityTier::Poor => "poor quality requiring attention before analysis",
        };

        let executive_summary = format!(
            "The dataset holds {} rows and {} columns ({} numeric, {} categorical) with {}. \
            The quality score is {:.1}/100 across {} anomaly categor{}.",
            meta.total_rows,
            meta.total_columns,
            meta.numeric_columns_count,
            meta.categorical_columns_count,
            quality_phrase,
            score,
            report.summary.total_anomalies,
            if report.summary.total_anomalies == 1 {
                "y"
            } else {
                "ies"
            },
        );

        let mut main_trends = Vec::new();
        for pair in analysis.top_correlations.iter().take(3) {
            let direction = if pair.correlation > 0.0 {
                "positively"
            } else {
                "negatively"
            };
            main_trends.push(format!(
                "'{}' and '{}' are strongly {} related (r = {:.2})",
                pair.column_a, pair.column_b, direction, pair.correlation
            ));
        }
        if meta.missing_values_percentage > 10.0 {
            main_trends.push(format!(
                "{:.1}% of all cells are missing",
                meta.missing_values_percentage
            ));
        }

        let mut insights = Vec::new();
        for (name, summary) in analysis.numeric_summary.iter().take(3) {
            if summary.skewness.abs() > 1.0 {
                insights.push(Insight {
                    title: format!("Skewed distribution in '{name}'"),
                    description: format!(
                        "'{}' is {} skewed (skewness {:.2}); the median {:.2} is more \
                        representative than the mean {:.2}",
                        name,
                        if summary.skewness > 0.0 { "right" } else { "left" },
                        summary.skewness,
                        summary.median,
                        summary.mean
                    ),
                });
            }
        }
        for (name, info) in analysis.outliers.iter().take(3) {
            insights.push(Insight {
                title: format!("Outliers in '{name}'"),
                description: format!(
                    "{} value(s) ({:.1}%) fall outside [{:.2}, {:.2}]",
                    info.count, info.percentage, info.lower_bound, info.upper_bound
                ),
            });
        }

        let mut anomalies = Vec::new();
        if report.empty_columns.count > 0 {
            anomalies.push(format!(
                "{} completely empty column(s)",
                report.empty_columns.count
            ));
        }
        if report.quasi_empty_columns.count > 0 {
            anomalies.push(format!(
                "{} quasi-empty column(s) excluded from visualization",
                report.quasi_empty_columns.count
            ));
        }
        if report.duplicates.count > 0 {
            anomalies.push(format!(
                "{} duplicate row(s) ({:.1}% of the table)",
                report.duplicates.count, report.duplicates.percentage
            ));
        }
        for entry in report.high_missing_values.iter().take(3) {
            anomalies.push(format!(
                "'{}' is {:.1}% missing",
                entry.column, entry.percentage
            ));
        }

        let mut recommendations = Vec::new();
        if report.empty_columns.count > 0 {
            recommendations.push(Recommendation {
                action: "Drop the empty columns".to_string(),
                justification: "They contain no data and add noise to exports".to_string(),
            });
        }
        if report.duplicates.count > 0 {
            recommendations.push(Recommendation {
                action: "Deduplicate rows before aggregation".to_string(),
                justification: "Duplicate rows inflate counts and averages".to_string(),
            });
        }
        if !report.high_missing_values.is_empty() {
            recommendations.push(Recommendation {
                action: "Review collection for columns with heavy missingness".to_string(),
                justification: "More than half the values are absent in these columns"
                    .to_string(),
            });
        }
        let constant_count = analysis
            .column_uniqueness
            .values()
            .filter(|info| info.is_constant)
            .count();
        if constant_count > 0 {
            recommendations.push(Recommendation {
                action: format!("Drop the {constant_count} constant column(s)"),
                justification: "A single repeated value carries no analytical signal".to_string(),
            });
        }
        if recommendations.is_empty() {
            recommendations.push(Recommendation {
                action: "Proceed with analysis".to_string(),
                justification: "No blocking quality issues were found".to_string(),
            });
        }

        let conclusion = if report.has_anomalies() {
            format!(
                "Address the {} flagged categor{} before drawing conclusions from this data.",
                report.summary.total_anomalies,
                if report.summary.total_anomalies == 1 {
                    "y"
                } else {
                    "ies"
                }
            )
        } else {
            "The dataset is ready for analysis as-is.".to_string()
        };

        Ok(Insights {
            executive_summary,
            main_trends,
            insights,
            anomalies,
            recommendations,
            conclusion,
        })
    }

    fn name(&self) -> &str {
        "RuleBased"
    }
}
