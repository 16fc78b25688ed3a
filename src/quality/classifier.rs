//! Column/row quality classification.
//!
//! [`QualityClassifier::classify`] runs a single pass over a raw table and
//! produces a cleaned table plus a [`CleaningReport`]. Classification is
//! deterministic and never fails for well-formed frames: degenerate input
//! (zero rows or zero columns) yields a report with all counts at zero.
//!
//! Ordering matters in exactly one place: Empty/QuasiEmpty/HighMissing are
//! computed against the missingness of the table as loaded, before the
//! numeric coercion pass runs. Nulls introduced by coercion show up in
//! `missing_by_column` but never in the defect tags.

use crate::config::TriageConfig;
use crate::error::Result;
use crate::quality::coercion::coerce_numeric_columns;
use crate::types::{CleaningReport, ColumnDefect, DefectKind, MissingStats, Severity};
use crate::utils::format_column_list;
use polars::prelude::*;
use std::collections::HashMap;
use tracing::{debug, info, warn};

/// Number of column names shown in a diagnostic message before truncation.
const MAX_COLUMNS_IN_MESSAGE: usize = 5;

pub struct QualityClassifier;

impl QualityClassifier {
    /// Classify a table and return the cleaned table plus its report.
    ///
    /// The input frame is not modified; callers keep it for before/after
    /// comparison.
    pub fn classify(df: &DataFrame, config: &TriageConfig) -> Result<(DataFrame, CleaningReport)> {
        let mut warnings = Vec::new();
        let mut cleaned = Self::normalize_column_names(df, &mut warnings)?;

        let (height, width) = cleaned.shape();
        let mut report = CleaningReport::empty((height, width));
        report.warnings = warnings;

        if height == 0 || width == 0 {
            debug!(rows = height, cols = width, "degenerate table, no checks run");
            return Ok((cleaned, report));
        }

        Self::classify_columns(&cleaned, config, &mut report);
        report.empty_row_count = Self::count_empty_rows(&cleaned)?;
        report.duplicate_row_count = Self::count_duplicate_rows(&cleaned)?;

        if report.empty_row_count > 0 {
            debug!(count = report.empty_row_count, "empty rows found");
        }
        if report.duplicate_row_count > 0 {
            let pct = report.duplicate_row_count as f64 / height as f64 * 100.0;
            report.warnings.push(format!(
                "Found {} duplicate rows ({:.1}% of the table)",
                report.duplicate_row_count, pct
            ));
        }

        report.converted_to_numeric =
            coerce_numeric_columns(&mut cleaned, config.numeric_conversion_threshold)?;
        if !report.converted_to_numeric.is_empty() {
            report.recommendations.push(format!(
                "Converted {} text column(s) to numeric: {}",
                report.converted_to_numeric.len(),
                format_column_list(&report.converted_to_numeric, MAX_COLUMNS_IN_MESSAGE)
            ));
        }

        Self::trim_string_cells(&mut cleaned)?;

        report.missing_by_column = Self::missing_stats(&cleaned);
        if !report.missing_by_column.is_empty() {
            let mut top: Vec<(&String, &MissingStats)> = report.missing_by_column.iter().collect();
            top.sort_by(|a, b| {
                b.1.percentage
                    .partial_cmp(&a.1.percentage)
                    .unwrap_or(std::cmp::Ordering::Equal)
            });
            let summary = top
                .iter()
                .take(3)
                .map(|(name, stats)| format!("{} ({:.1}%)", name, stats.percentage))
                .collect::<Vec<_>>()
                .join(", ");
            report
                .recommendations
                .push(format!("Columns with most missing values: {summary}"));
        }

        report.cleaned_shape = cleaned.shape();
        info!(
            rows = height,
            cols = width,
            empty_columns = report.empty_columns.len(),
            quasi_empty_columns = report.quasi_empty_columns.len(),
            duplicates = report.duplicate_row_count,
            converted = report.converted_to_numeric.len(),
            "classification complete"
        );

        Ok((cleaned, report))
    }

    /// Strip surrounding whitespace from column names.
    ///
    /// Two names that collapse to the same trimmed identity collide; the
    /// last occurrence wins and a warning records the collision.
    fn normalize_column_names(df: &DataFrame, warnings: &mut Vec<String>) -> Result<DataFrame> {
        let mut kept: Vec<Column> = Vec::with_capacity(df.width());
        let mut index_by_name: HashMap<String, usize> = HashMap::new();

        for column in df.get_columns() {
            let original = column.name().to_string();
            let trimmed = original.trim().to_string();

            let mut column = column.clone();
            if trimmed != original {
                column.rename(trimmed.as_str().into());
            }

            if let Some(&idx) = index_by_name.get(&trimmed) {
                warn!(column = %trimmed, "column name collision after trimming");
                warnings.push(format!(
                    "Column name '{trimmed}' appears more than once after whitespace trimming; keeping the last occurrence"
                ));
                kept[idx] = column;
            } else {
                index_by_name.insert(trimmed, kept.len());
                kept.push(column);
            }
        }

        Ok(DataFrame::new(kept)?)
    }

    /// Tag per-column defects from the missingness of the table as loaded.
    fn classify_columns(df: &DataFrame, config: &TriageConfig, report: &mut CleaningReport) {
        let height = df.height();

        for column in df.get_columns() {
            let name = column.name().to_string();
            let null_count = column.null_count();
            let missing_fraction = null_count as f64 / height as f64;

            if null_count == height {
                report.empty_columns.push(name.clone());
                report.column_defects.push(ColumnDefect::new(
                    &name,
                    DefectKind::Empty,
                    Severity::Warning,
                ));
            } else if missing_fraction >= config.quasi_empty_threshold {
                report.quasi_empty_columns.push(name.clone());
                report.column_defects.push(ColumnDefect::new(
                    &name,
                    DefectKind::QuasiEmpty,
                    Severity::Warning,
                ));
            }

            // Independent axis: overlaps with quasi-empty are expected.
            if missing_fraction > config.high_missing_threshold {
                report.column_defects.push(ColumnDefect::new(
                    &name,
                    DefectKind::HighMissing,
                    Severity::Warning,
                ));
            }

            if null_count < height {
                let series = column.as_materialized_series();
                let distinct = series.drop_nulls().n_unique().unwrap_or(0);
                if distinct == 1 {
                    report.column_defects.push(ColumnDefect::new(
                        &name,
                        DefectKind::LowVariance,
                        Severity::Info,
                    ));
                }
            }
        }

        if !report.empty_columns.is_empty() {
            report.warnings.push(format!(
                "Found {} empty column(s): {}",
                report.empty_columns.len(),
                format_column_list(&report.empty_columns, MAX_COLUMNS_IN_MESSAGE)
            ));
        }
        if !report.quasi_empty_columns.is_empty() {
            report.warnings.push(format!(
                "Found {} quasi-empty column(s) (>= {:.0}% missing): {}",
                report.quasi_empty_columns.len(),
                config.quasi_empty_threshold * 100.0,
                format_column_list(&report.quasi_empty_columns, MAX_COLUMNS_IN_MESSAGE)
            ));
        }

        let high_missing: Vec<String> = report
            .column_defects
            .iter()
            .filter(|d| d.kind == DefectKind::HighMissing)
            .map(|d| d.column_name.clone())
            .collect();
        if !high_missing.is_empty() {
            report.warnings.push(format!(
                "{} column(s) with more than {:.0}% missing values: {}",
                high_missing.len(),
                config.high_missing_threshold * 100.0,
                format_column_list(&high_missing, MAX_COLUMNS_IN_MESSAGE)
            ));
        }

        let constant: Vec<String> = report
            .column_defects
            .iter()
            .filter(|d| d.kind == DefectKind::LowVariance)
            .map(|d| d.column_name.clone())
            .collect();
        if !constant.is_empty() {
            report.recommendations.push(format!(
                "{} column(s) hold a single constant value: {}",
                constant.len(),
                format_column_list(&constant, MAX_COLUMNS_IN_MESSAGE)
            ));
        }
    }

    /// Count rows where every cell is null.
    fn count_empty_rows(df: &DataFrame) -> Result<usize> {
        let mut all_null = BooleanChunked::full("all_null".into(), true, df.height());
        for column in df.get_columns() {
            let is_null = column.as_materialized_series().is_null();
            all_null = &all_null & &is_null;
        }
        Ok(all_null.sum().unwrap_or(0) as usize)
    }

    /// Count rows beyond the first occurrence of each distinct full row.
    fn count_duplicate_rows(df: &DataFrame) -> Result<usize> {
        let distinct = df.unique::<&str, &str>(None, UniqueKeepStrategy::First, None)?;
        Ok(df.height() - distinct.height())
    }

    /// Strip surrounding whitespace from every cell of string columns.
    ///
    /// Pure normalization: an all-whitespace cell becomes the empty
    /// string, not null.
    fn trim_string_cells(df: &mut DataFrame) -> Result<()> {
        let names: Vec<String> = df
            .get_column_names()
            .iter()
            .map(|n| n.to_string())
            .collect();

        for name in names {
            let series = df.column(&name)?.as_materialized_series().clone();
            if series.dtype() != &DataType::String {
                continue;
            }

            let ca = series.str()?;
            let trimmed: Vec<Option<String>> = ca
                .into_iter()
                .map(|opt| opt.map(|v| v.trim().to_string()))
                .collect();

            df.replace(&name, Series::new(name.as_str().into(), trimmed))?;
        }

        Ok(())
    }

    /// Per-column missing statistics on the cleaned table.
    ///
    /// Fully empty columns are excluded: they carry no data at all and are
    /// reported through their own category rather than the missing-value
    /// channel (keeps the score penalty for empties from counting twice).
    fn missing_stats(df: &DataFrame) -> std::collections::BTreeMap<String, MissingStats> {
        let height = df.height();
        let mut stats = std::collections::BTreeMap::new();

        for column in df.get_columns() {
            let null_count = column.null_count();
            if null_count > 0 && null_count < height {
                stats.insert(
                    column.name().to_string(),
                    MissingStats {
                        count: null_count,
                        percentage: null_count as f64 / height as f64 * 100.0,
                    },
                );
            }
        }

        stats
    }
}
