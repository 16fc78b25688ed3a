//! Statistical dataset profiler.
//!
//! Runs over the cleaned table and produces a [`DatasetAnalysis`]: per-column
//! numeric and categorical summaries, top correlations, IQR outlier bounds,
//! uniqueness metrics and dataset metadata. Purely descriptive; the quality
//! verdicts live in [`crate::quality`].

pub mod statistics;

use crate::error::Result;
use crate::utils::{DtypeCategory, series_dtype_category};
use polars::prelude::*;
use serde::{Deserialize, Serialize};
use statistics::{
    calculate_kurtosis, calculate_median, calculate_quartiles, calculate_skewness, calculate_std,
    outlier_bounds_and_count, pearson_correlation, value_frequencies,
};
use std::collections::BTreeMap;
use tracing::{debug, info};

/// Categorical columns profiled at most, in table order.
const MAX_CATEGORICAL_PROFILES: usize = 10;
/// Columns checked for uniqueness at most, in table order.
const MAX_UNIQUENESS_PROFILES: usize = 30;
/// Correlation pairs kept, strongest first.
const MAX_CORRELATIONS: usize = 10;
/// Top values listed per categorical column.
const MAX_TOP_VALUES: usize = 5;

/// Descriptive statistics for one numeric column, over non-null values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NumericSummary {
    pub count: usize,
    pub mean: f64,
    pub median: f64,
    pub std: f64,
    pub min: f64,
    pub max: f64,
    pub q1: f64,
    pub q3: f64,
    pub skewness: f64,
    pub kurtosis: f64,
    pub missing: usize,
    pub missing_pct: f64,
}

/// Summary of one categorical (string) column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoricalSummary {
    pub unique_count: usize,
    pub most_common: Option<String>,
    pub most_common_freq: usize,
    pub top_values: Vec<(String, usize)>,
    pub missing: usize,
    pub missing_pct: f64,
}

/// One correlated column pair.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CorrelationPair {
    pub column_a: String,
    pub column_b: String,
    pub correlation: f64,
}

/// IQR outlier information for one numeric column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutlierInfo {
    pub lower_bound: f64,
    pub upper_bound: f64,
    pub count: usize,
    pub percentage: f64,
}

/// Uniqueness metrics for one column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UniquenessInfo {
    pub unique_count: usize,
    pub uniqueness_ratio: f64,
    pub is_unique: bool,
    pub is_constant: bool,
}

/// Dataset-level metadata.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DatasetMetadata {
    pub total_rows: usize,
    pub total_columns: usize,
    pub numeric_columns_count: usize,
    pub categorical_columns_count: usize,
    pub boolean_columns_count: usize,
    pub total_missing_values: usize,
    pub missing_values_percentage: f64,
}

/// Full profiler output for one table.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatasetAnalysis {
    pub shape: (usize, usize),
    pub numeric_columns: Vec<String>,
    pub categorical_columns: Vec<String>,
    pub boolean_columns: Vec<String>,
    pub numeric_summary: BTreeMap<String, NumericSummary>,
    pub categorical_summary: BTreeMap<String, CategoricalSummary>,
    pub top_correlations: Vec<CorrelationPair>,
    pub outliers: BTreeMap<String, OutlierInfo>,
    pub column_uniqueness: BTreeMap<String, UniquenessInfo>,
    pub metadata: DatasetMetadata,
}

pub struct DataProfiler;

impl DataProfiler {
    /// Profile a table.
    pub fn analyze(df: &DataFrame) -> Result<DatasetAnalysis> {
        let shape = df.shape();
        let (height, width) = shape;

        let mut numeric_columns = Vec::new();
        let mut categorical_columns = Vec::new();
        let mut boolean_columns = Vec::new();
        for column in df.get_columns() {
            let name = column.name().to_string();
            match series_dtype_category(column.as_materialized_series()) {
                DtypeCategory::Numeric => numeric_columns.push(name),
                DtypeCategory::String => categorical_columns.push(name),
                DtypeCategory::Boolean => boolean_columns.push(name),
                _ => {}
            }
        }

        let numeric_summary = Self::numeric_summaries(df, &numeric_columns)?;
        let categorical_summary = Self::categorical_summaries(df, &categorical_columns)?;
        let top_correlations = Self::top_correlations(df, &numeric_columns)?;
        let outliers = Self::outliers(df, &numeric_columns)?;
        let column_uniqueness = Self::column_uniqueness(df)?;

        let total_missing_values: usize = df.get_columns().iter().map(|c| c.null_count()).sum();
        let total_cells = height * width;
        let metadata = DatasetMetadata {
            total_rows: height,
            total_columns: width,
            numeric_columns_count: numeric_columns.len(),
            categorical_columns_count: categorical_columns.len(),
            boolean_columns_count: boolean_columns.len(),
            total_missing_values,
            missing_values_percentage: if total_cells > 0 {
                total_missing_values as f64 / total_cells as f64 * 100.0
            } else {
                0.0
            },
        };

        info!(
            rows = height,
            cols = width,
            numeric = numeric_columns.len(),
            categorical = categorical_columns.len(),
            correlations = top_correlations.len(),
            "profiling complete"
        );

        Ok(DatasetAnalysis {
            shape,
            numeric_columns,
            categorical_columns,
            boolean_columns,
            numeric_summary,
            categorical_summary,
            top_correlations,
            outliers,
            column_uniqueness,
            metadata,
        })
    }

    fn numeric_summaries(
        df: &DataFrame,
        numeric_columns: &[String],
    ) -> Result<BTreeMap<String, NumericSummary>> {
        let height = df.height();
        let mut summaries = BTreeMap::new();

        for name in numeric_columns {
            let column = df.column(name)?;
            let missing = column.null_count();
            let data = column
                .as_materialized_series()
                .drop_nulls()
                .cast(&DataType::Float64)?;
            if data.is_empty() {
                continue;
            }

            let (q1, q3) = calculate_quartiles(&data)?;
            summaries.insert(
                name.clone(),
                NumericSummary {
                    count: data.len(),
                    mean: data.mean().unwrap_or(0.0),
                    median: calculate_median(&data)?,
                    std: calculate_std(&data)?,
                    min: data.min::<f64>()?.unwrap_or(0.0),
                    max: data.max::<f64>()?.unwrap_or(0.0),
                    q1,
                    q3,
                    skewness: calculate_skewness(&data)?,
                    kurtosis: calculate_kurtosis(&data)?,
                    missing,
                    missing_pct: if height > 0 {
                        missing as f64 / height as f64 * 100.0
                    } else {
                        0.0
                    },
                },
            );
        }

        Ok(summaries)
    }

    fn categorical_summaries(
        df: &DataFrame,
        categorical_columns: &[String],
    ) -> Result<BTreeMap<String, CategoricalSummary>> {
        let height = df.height();
        let mut summaries = BTreeMap::new();

        for name in categorical_columns.iter().take(MAX_CATEGORICAL_PROFILES) {
            let column = df.column(name)?;
            let series = column.as_materialized_series();
            let missing = series.null_count();
            let frequencies = value_frequencies(series);

            let (most_common, most_common_freq) = frequencies
                .first()
                .map(|(v, c)| (Some(v.clone()), *c))
                .unwrap_or((None, 0));

            summaries.insert(
                name.clone(),
                CategoricalSummary {
                    unique_count: frequencies.len(),
                    most_common,
                    most_common_freq,
                    top_values: frequencies.into_iter().take(MAX_TOP_VALUES).collect(),
                    missing,
                    missing_pct: if height > 0 {
                        missing as f64 / height as f64 * 100.0
                    } else {
                        0.0
                    },
                },
            );
        }

        Ok(summaries)
    }

    fn top_correlations(
        df: &DataFrame,
        numeric_columns: &[String],
    ) -> Result<Vec<CorrelationPair>> {
        if numeric_columns.len() < 2 {
            return Ok(Vec::new());
        }

        let mut pairs = Vec::new();
        for (i, a) in numeric_columns.iter().enumerate() {
            let series_a = df
                .column(a)?
                .as_materialized_series()
                .cast(&DataType::Float64)?;
            for b in &numeric_columns[i + 1..] {
                let series_b = df
                    .column(b)?
                    .as_materialized_series()
                    .cast(&DataType::Float64)?;
                if let Some(r) = pearson_correlation(&series_a, &series_b)? {
                    pairs.push(CorrelationPair {
                        column_a: a.clone(),
                        column_b: b.clone(),
                        correlation: r,
                    });
                }
            }
        }

        pairs.sort_by(|a, b| {
            b.correlation
                .abs()
                .partial_cmp(&a.correlation.abs())
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        pairs.truncate(MAX_CORRELATIONS);
        Ok(pairs)
    }

    fn outliers(
        df: &DataFrame,
        numeric_columns: &[String],
    ) -> Result<BTreeMap<String, OutlierInfo>> {
        let height = df.height();
        let mut outliers = BTreeMap::new();

        for name in numeric_columns {
            let data = df
                .column(name)?
                .as_materialized_series()
                .drop_nulls()
                .cast(&DataType::Float64)?;
            if data.is_empty() {
                continue;
            }

            let (lower_bound, upper_bound, count) = outlier_bounds_and_count(&data)?;
            if count > 0 {
                debug!(column = %name, count, "outliers found");
                outliers.insert(
                    name.clone(),
                    OutlierInfo {
                        lower_bound,
                        upper_bound,
                        count,
                        percentage: count as f64 / height as f64 * 100.0,
                    },
                );
            }
        }

        Ok(outliers)
    }

    fn column_uniqueness(df: &DataFrame) -> Result<BTreeMap<String, UniquenessInfo>> {
        let height = df.height();
        let mut uniqueness = BTreeMap::new();

        for column in df.get_columns().iter().take(MAX_UNIQUENESS_PROFILES) {
            let series = column.as_materialized_series();
            let unique_count = series.drop_nulls().n_unique()?;

            uniqueness.insert(
                column.name().to_string(),
                UniquenessInfo {
                    unique_count,
                    uniqueness_ratio: if height > 0 {
                        unique_count as f64 / height as f64
                    } else {
                        0.0
                    },
                    is_unique: unique_count == height,
                    is_constant: unique_count == 1,
                },
            );
        }

        Ok(uniqueness)
    }
}

/// Structural recommendations derived from a [`DatasetAnalysis`].
pub fn column_recommendations(analysis: &DatasetAnalysis) -> Vec<String> {
    let mut recommendations = Vec::new();

    let constant: Vec<&str> = analysis
        .column_uniqueness
        .iter()
        .filter(|(_, info)| info.is_constant)
        .map(|(name, _)| name.as_str())
        .collect();
    if !constant.is_empty() {
        recommendations.push(format!(
            "{} constant column(s) detected: {}. They carry no signal and can be dropped",
            constant.len(),
            constant[..constant.len().min(3)].join(", ")
        ));
    }

    let high_missing: Vec<String> = analysis
        .numeric_summary
        .iter()
        .map(|(name, s)| (name, s.missing_pct))
        .chain(
            analysis
                .categorical_summary
                .iter()
                .map(|(name, s)| (name, s.missing_pct)),
        )
        .filter(|(_, pct)| *pct > 50.0)
        .map(|(name, _)| name.clone())
        .collect();
    if !high_missing.is_empty() {
        recommendations.push(format!(
            "{} column(s) with more than 50% missing values: {}",
            high_missing.len(),
            high_missing[..high_missing.len().min(3)].join(", ")
        ));
    }

    let high_outliers: Vec<&str> = analysis
        .outliers
        .iter()
        .filter(|(_, info)| info.percentage > 5.0)
        .map(|(name, _)| name.as_str())
        .collect();
    if !high_outliers.is_empty() {
        recommendations.push(format!(
            "{} column(s) with more than 5% outliers: {}",
            high_outliers.len(),
            high_outliers[..high_outliers.len().min(3)].join(", ")
        ));
    }

    let strong: Vec<&CorrelationPair> = analysis
        .top_correlations
        .iter()
        .filter(|p| p.correlation.abs() > 0.9)
        .collect();
    if !strong.is_empty() {
        recommendations.push(format!(
            "{} strongly correlated column pair(s) (|r| > 0.9); consider keeping one of each",
            strong.len()
        ));
    }

    let high_cardinality: Vec<String> = analysis
        .categorical_summary
        .iter()
        .filter(|(_, s)| s.unique_count as f64 > analysis.shape.0 as f64 * 0.9)
        .map(|(name, _)| name.clone())
        .collect();
    if !high_cardinality.is_empty() {
        recommendations.push(format!(
            "{} categorical column(s) with very high cardinality: {}",
            high_cardinality.len(),
            high_cardinality[..high_cardinality.len().min(3)].join(", ")
        ));
    }

    if recommendations.is_empty() {
        recommendations.push("No major structural issues detected".to_string());
    }

    recommendations
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_analyze_partitions_columns_by_type() {
        let df = df![
            "n" => [1.0, 2.0, 3.0],
            "c" => ["a", "b", "c"],
            "b" => [true, false, true],
        ]
        .unwrap();

        let analysis = DataProfiler::analyze(&df).unwrap();

        assert_eq!(analysis.numeric_columns, vec!["n".to_string()]);
        assert_eq!(analysis.categorical_columns, vec!["c".to_string()]);
        assert_eq!(analysis.boolean_columns, vec!["b".to_string()]);
        assert_eq!(analysis.metadata.numeric_columns_count, 1);
    }

    #[test]
    fn test_numeric_summary_values() {
        let df = df!["v" => [Some(1.0), Some(2.0), Some(3.0), Some(4.0), None]].unwrap();

        let analysis = DataProfiler::analyze(&df).unwrap();
        let summary = &analysis.numeric_summary["v"];

        assert_eq!(summary.count, 4);
        assert_eq!(summary.mean, 2.5);
        assert_eq!(summary.median, 2.5);
        assert_eq!(summary.min, 1.0);
        assert_eq!(summary.max, 4.0);
        assert_eq!(summary.missing, 1);
        assert_eq!(summary.missing_pct, 20.0);
    }

    #[test]
    fn test_categorical_summary_mode_and_top_values() {
        let df = df!["cat" => [Some("x"), Some("x"), Some("y"), None]].unwrap();

        let analysis = DataProfiler::analyze(&df).unwrap();
        let summary = &analysis.categorical_summary["cat"];

        assert_eq!(summary.unique_count, 2);
        assert_eq!(summary.most_common.as_deref(), Some("x"));
        assert_eq!(summary.most_common_freq, 2);
        assert_eq!(summary.missing, 1);
        assert_eq!(summary.top_values[0], ("x".to_string(), 2));
    }

    #[test]
    fn test_correlations_sorted_by_strength() {
        let df = df![
            "a" => [1.0, 2.0, 3.0, 4.0],
            "b" => [2.0, 4.0, 6.0, 8.0],
            "c" => [4.0, 1.0, 3.0, 2.0],
        ]
        .unwrap();

        let analysis = DataProfiler::analyze(&df).unwrap();

        assert!(!analysis.top_correlations.is_empty());
        let strongest = &analysis.top_correlations[0];
        assert_eq!(strongest.column_a, "a");
        assert_eq!(strongest.column_b, "b");
        assert!((strongest.correlation - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_outliers_recorded_only_when_present() {
        let df = df![
            "spiky" => [1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0, 9.0, 100.0],
            "flat" => [1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0, 9.0, 10.0],
        ]
        .unwrap();

        let analysis = DataProfiler::analyze(&df).unwrap();

        assert!(analysis.outliers.contains_key("spiky"));
        assert!(!analysis.outliers.contains_key("flat"));
        assert_eq!(analysis.outliers["spiky"].count, 1);
    }

    #[test]
    fn test_uniqueness_flags() {
        let df = df![
            "id" => [1, 2, 3, 4],
            "constant" => [9, 9, 9, 9],
        ]
        .unwrap();

        let analysis = DataProfiler::analyze(&df).unwrap();

        assert!(analysis.column_uniqueness["id"].is_unique);
        assert!(!analysis.column_uniqueness["id"].is_constant);
        assert!(analysis.column_uniqueness["constant"].is_constant);
    }

    #[test]
    fn test_metadata_missing_percentage() {
        let df = df![
            "a" => [Some(1), None],
            "b" => [Some(2), Some(3)],
        ]
        .unwrap();

        let analysis = DataProfiler::analyze(&df).unwrap();

        assert_eq!(analysis.metadata.total_missing_values, 1);
        assert_eq!(analysis.metadata.missing_values_percentage, 25.0);
    }

    #[test]
    fn test_recommendations_constant_and_clean() {
        let df = df![
            "constant" => [1, 1, 1],
            "ok" => [1, 2, 3],
        ]
        .unwrap();
        let analysis = DataProfiler::analyze(&df).unwrap();
        let recs = column_recommendations(&analysis);
        assert!(recs.iter().any(|r| r.contains("constant")));

        let clean = df!["ok" => [1, 2, 3]].unwrap();
        let analysis = DataProfiler::analyze(&clean).unwrap();
        let recs = column_recommendations(&analysis);
        assert_eq!(recs.len(), 1);
        assert!(recs[0].contains("No major"));
    }

    #[test]
    fn test_degenerate_frame() {
        let df = DataFrame::empty();
        let analysis = DataProfiler::analyze(&df).unwrap();

        assert_eq!(analysis.shape, (0, 0));
        assert!(analysis.numeric_summary.is_empty());
        assert_eq!(analysis.metadata.missing_values_percentage, 0.0);
    }
}
