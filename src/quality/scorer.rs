//! Quality score aggregation.
//!
//! The score starts at 100 and subtracts four capped, additive penalties.
//! It is a pure, total function of a [`CleaningReport`]: recomputed on
//! demand, never cached separately from its source report.

use crate::types::{CleaningReport, QualityTier};

/// Compute the 0-100 quality score for a cleaning report.
///
/// Penalties:
/// - empty columns: min(count x 10, 30)
/// - quasi-empty columns: min(count x 5, 20)
/// - duplicate rows: min(duplicate percentage, 15); 0 for a 0-row table
/// - missing values: min(mean missing percentage / 2, 25), averaged over
///   columns in `missing_by_column`; 0 when none have missing cells
pub fn quality_score(report: &CleaningReport) -> f64 {
    let mut score = 100.0;

    score -= (report.empty_columns.len() as f64 * 10.0).min(30.0);
    score -= (report.quasi_empty_columns.len() as f64 * 5.0).min(20.0);

    let rows = report.original_shape.0;
    if rows > 0 {
        let dup_pct = report.duplicate_row_count as f64 / rows as f64 * 100.0;
        score -= dup_pct.min(15.0);
    }

    if !report.missing_by_column.is_empty() {
        let mean_missing_pct = report
            .missing_by_column
            .values()
            .map(|stats| stats.percentage)
            .sum::<f64>()
            / report.missing_by_column.len() as f64;
        score -= (mean_missing_pct / 2.0).min(25.0);
    }

    score.clamp(0.0, 100.0)
}

/// Band a score into its quality tier.
pub fn quality_tier(score: f64) -> QualityTier {
    QualityTier::from_score(score)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::MissingStats;

    #[test]
    fn test_clean_report_scores_100() {
        let report = CleaningReport::empty((10, 5));
        assert_eq!(quality_score(&report), 100.0);
        assert_eq!(quality_tier(100.0), QualityTier::Good);
    }

    #[test]
    fn test_single_empty_column_scores_90() {
        let mut report = CleaningReport::empty((10, 5));
        report.empty_columns.push("void".to_string());

        assert_eq!(quality_score(&report), 90.0);
    }

    #[test]
    fn test_empty_column_penalty_capped_at_30() {
        let mut report = CleaningReport::empty((10, 10));
        for i in 0..7 {
            report.empty_columns.push(format!("void{i}"));
        }

        assert_eq!(quality_score(&report), 70.0);
    }

    #[test]
    fn test_quasi_empty_penalty_capped_at_20() {
        let mut report = CleaningReport::empty((100, 10));
        for i in 0..6 {
            report.quasi_empty_columns.push(format!("sparse{i}"));
        }

        assert_eq!(quality_score(&report), 80.0);
    }

    #[test]
    fn test_duplicate_penalty_capped_at_15() {
        let mut report = CleaningReport::empty((100, 5));
        report.duplicate_row_count = 95;

        // 95% duplicates, capped at 15
        assert_eq!(quality_score(&report), 85.0);
    }

    #[test]
    fn test_duplicate_penalty_zero_for_empty_table() {
        let mut report = CleaningReport::empty((0, 0));
        report.duplicate_row_count = 0;

        assert_eq!(quality_score(&report), 100.0);
    }

    #[test]
    fn test_missing_penalty_uses_mean_over_affected_columns() {
        let mut report = CleaningReport::empty((100, 4));
        report.missing_by_column.insert(
            "a".to_string(),
            MissingStats {
                count: 20,
                percentage: 20.0,
            },
        );
        report.missing_by_column.insert(
            "b".to_string(),
            MissingStats {
                count: 40,
                percentage: 40.0,
            },
        );

        // mean 30% / 2 = 15 penalty
        assert_eq!(quality_score(&report), 85.0);
    }

    #[test]
    fn test_missing_penalty_capped_at_25() {
        let mut report = CleaningReport::empty((100, 2));
        report.missing_by_column.insert(
            "a".to_string(),
            MissingStats {
                count: 90,
                percentage: 90.0,
            },
        );

        assert_eq!(quality_score(&report), 75.0);
    }

    #[test]
    fn test_score_never_below_zero() {
        let mut report = CleaningReport::empty((100, 20));
        for i in 0..10 {
            report.empty_columns.push(format!("e{i}"));
            report.quasi_empty_columns.push(format!("q{i}"));
            report.missing_by_column.insert(
                format!("m{i}"),
                MissingStats {
                    count: 80,
                    percentage: 80.0,
                },
            );
        }
        report.duplicate_row_count = 100;

        let score = quality_score(&report);
        assert!((0.0..=100.0).contains(&score));
        // 30 + 20 + 15 + 25 = 90 in penalties
        assert_eq!(score, 10.0);
    }

    #[test]
    fn test_tier_boundaries() {
        assert_eq!(quality_tier(80.0), QualityTier::Good);
        assert_eq!(quality_tier(79.99), QualityTier::NeedsImprovement);
        assert_eq!(quality_tier(60.0), QualityTier::NeedsImprovement);
        assert_eq!(quality_tier(59.99), QualityTier::Poor);
    }
}
