//! Prompt assembly and response parsing for LLM-backed providers.
//!
//! The anomaly report is embedded as structured context: counts and
//! percentages straight from the report, column lists truncated after five
//! entries. Providers ask for a fixed JSON shape and [`parse_insights_response`]
//! tolerates markdown code fences around it.

use crate::error::{Result, TriageError};
use crate::insights::{InsightContext, Insights};
use crate::utils::format_column_list;

/// Render the anomaly report as plain-text prompt context.
pub fn anomaly_context(context: &InsightContext<'_>) -> String {
    let report = context.anomaly_report;
    let mut lines = Vec::new();

    lines.push(format!(
        "Quality score: {:.1}/100 ({} anomaly categories, {} warnings)",
        report.summary.quality_score, report.summary.total_anomalies, report.summary.warnings_count
    ));

    if report.empty_columns.count > 0 {
        lines.push(format!(
            "Empty columns ({}): {}",
            report.empty_columns.count,
            format_column_list(&report.empty_columns.columns, 5)
        ));
    }
    if report.quasi_empty_columns.count > 0 {
        lines.push(format!(
            "Quasi-empty columns ({}): {}",
            report.quasi_empty_columns.count,
            format_column_list(&report.quasi_empty_columns.columns, 5)
        ));
    }
    if report.duplicates.count > 0 {
        lines.push(format!(
            "Duplicate rows: {} ({:.1}% of the table)",
            report.duplicates.count, report.duplicates.percentage
        ));
    }
    if !report.high_missing_values.is_empty() {
        let top = report
            .high_missing_values
            .iter()
            .take(3)
            .map(|e| format!("{} ({:.1}%)", e.column, e.percentage))
            .collect::<Vec<_>>()
            .join(", ");
        lines.push(format!(
            "Columns with >50% missing values ({}): {}",
            report.high_missing_values.len(),
            top
        ));
    }

    if lines.len() == 1 {
        lines.push("No anomalies detected".to_string());
    }

    lines.join("\n")
}

/// Build the full insight prompt for an LLM provider.
pub fn build_insight_prompt(context: &InsightContext<'_>) -> String {
    let analysis = context.analysis;
    let meta = &analysis.metadata;

    let mut prompt = format!(
        "You are a data analyst. Analyze this dataset summary and produce insights.\n\n\
        DATASET: {} rows x {} columns ({} numeric, {} categorical, {} boolean), \
        {:.1}% missing cells overall.\n\n\
        DATA QUALITY:\n{}\n",
        meta.total_rows,
        meta.total_columns,
        meta.numeric_columns_count,
        meta.categorical_columns_count,
        meta.boolean_columns_count,
        meta.missing_values_percentage,
        anomaly_context(context)
    );

    if !analysis.numeric_summary.is_empty() {
        prompt.push_str("\nNUMERIC COLUMNS:\n");
        for (name, s) in analysis.numeric_summary.iter().take(10) {
            prompt.push_str(&format!(
                "- {}: mean {:.2}, median {:.2}, std {:.2}, range [{:.2}, {:.2}]\n",
                name, s.mean, s.median, s.std, s.min, s.max
            ));
        }
    }

    if !analysis.top_correlations.is_empty() {
        prompt.push_str("\nTOP CORRELATIONS:\n");
        for pair in analysis.top_correlations.iter().take(5) {
            prompt.push_str(&format!(
                "- {} / {}: r = {:.2}\n",
                pair.column_a, pair.column_b, pair.correlation
            ));
        }
    }

    prompt.push_str(
        "\nRespond with ONLY a JSON object, no prose before or after, in this exact shape:\n\
        {\n\
          \"executive_summary\": \"two or three sentences\",\n\
          \"main_trends\": [\"trend\"],\n\
          \"insights\": [{\"title\": \"...\", \"description\": \"...\"}],\n\
          \"anomalies\": [\"observed anomaly\"],\n\
          \"recommendations\": [{\"action\": \"...\", \"justification\": \"...\"}],\n\
          \"conclusion\": \"one sentence\"\n\
        }\n",
    );

    prompt
}

/// Parse a provider response into [`Insights`].
///
/// Tolerates surrounding whitespace and markdown code fences.
pub fn parse_insights_response(response: &str) -> Result<Insights> {
    let mut text = response.trim();

    if let Some(stripped) = text.strip_prefix("```json") {
        text = stripped;
    } else if let Some(stripped) = text.strip_prefix("```") {
        text = stripped;
    }
    if let Some(stripped) = text.strip_suffix("```") {
        text = stripped;
    }
    let text = text.trim();

    serde_json::from_str(text)
        .map_err(|e| TriageError::InsightError(format!("Malformed insight response: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::profiler::DataProfiler;
    use crate::quality::AnomalyReportBuilder;
    use crate::types::CleaningReport;
    use polars::prelude::*;

    fn context_for(
        report: &CleaningReport,
        analysis: &crate::profiler::DatasetAnalysis,
        score: f64,
    ) -> crate::types::AnomalyReport {
        let _ = analysis;
        AnomalyReportBuilder::build(report, score)
    }

    #[test]
    fn test_anomaly_context_clean_dataset() {
        let df = df!["a" => [1, 2, 3]].unwrap();
        let analysis = DataProfiler::analyze(&df).unwrap();
        let report = CleaningReport::empty((3, 1));
        let anomaly = context_for(&report, &analysis, 100.0);

        let ctx = InsightContext {
            analysis: &analysis,
            anomaly_report: &anomaly,
        };
        let text = anomaly_context(&ctx);

        assert!(text.contains("100.0/100"));
        assert!(text.contains("No anomalies detected"));
    }

    #[test]
    fn test_anomaly_context_truncates_column_lists() {
        let df = df!["a" => [1, 2, 3]].unwrap();
        let analysis = DataProfiler::analyze(&df).unwrap();
        let mut report = CleaningReport::empty((3, 8));
        for i in 0..7 {
            report.empty_columns.push(format!("void{i}"));
        }
        let anomaly = context_for(&report, &analysis, 70.0);

        let ctx = InsightContext {
            analysis: &analysis,
            anomaly_report: &anomaly,
        };
        let text = anomaly_context(&ctx);

        assert!(text.contains("Empty columns (7)"));
        assert!(text.contains("+2 more"));
    }

    #[test]
    fn test_prompt_demands_json_shape() {
        let df = df![
            "x" => [1.0, 2.0, 3.0],
            "y" => [2.0, 4.0, 6.0],
        ]
        .unwrap();
        let analysis = DataProfiler::analyze(&df).unwrap();
        let report = CleaningReport::empty((3, 2));
        let anomaly = context_for(&report, &analysis, 100.0);

        let ctx = InsightContext {
            analysis: &analysis,
            anomaly_report: &anomaly,
        };
        let prompt = build_insight_prompt(&ctx);

        assert!(prompt.contains("executive_summary"));
        assert!(prompt.contains("NUMERIC COLUMNS"));
        assert!(prompt.contains("TOP CORRELATIONS"));
    }

    #[test]
    fn test_parse_plain_json() {
        let response = r#"{
            "executive_summary": "Looks fine.",
            "main_trends": ["stable"],
            "insights": [{"title": "t", "description": "d"}],
            "anomalies": [],
            "recommendations": [{"action": "a", "justification": "j"}],
            "conclusion": "Done."
        }"#;

        let insights = parse_insights_response(response).unwrap();
        assert_eq!(insights.executive_summary, "Looks fine.");
        assert_eq!(insights.insights.len(), 1);
    }

    #[test]
    fn test_parse_fenced_json() {
        let response = "```json\n{\"executive_summary\": \"ok\", \"conclusion\": \"end\"}\n```";

        let insights = parse_insights_response(response).unwrap();
        assert_eq!(insights.executive_summary, "ok");
        assert!(insights.main_trends.is_empty());
    }

    #[test]
    fn test_parse_garbage_is_error() {
        let err = parse_insights_response("not json at all").unwrap_err();
        assert_eq!(err.error_code(), "INSIGHT_ERROR");
    }
}
