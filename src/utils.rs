//! Shared utilities for the triage pipeline.
//!
//! This module contains common helper functions used across multiple modules
//! to reduce code duplication and ensure consistency.

use polars::prelude::*;

// =============================================================================
// Data Type Utilities
// =============================================================================

/// Category of a data type for profiling purposes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DtypeCategory {
    /// Integer or floating point numbers
    Numeric,
    /// Date or datetime types
    Datetime,
    /// Boolean type
    Boolean,
    /// String/text type
    String,
    /// Other/unknown types
    Other,
}

/// Check if a DataType is numeric (integer or float).
#[inline]
pub fn is_numeric_dtype(dtype: &DataType) -> bool {
    matches!(
        dtype,
        DataType::Int8
            | DataType::Int16
            | DataType::Int32
            | DataType::Int64
            | DataType::UInt8
            | DataType::UInt16
            | DataType::UInt32
            | DataType::UInt64
            | DataType::Float32
            | DataType::Float64
    )
}

/// Check if a DataType is a datetime type.
#[inline]
pub fn is_datetime_dtype(dtype: &DataType) -> bool {
    matches!(
        dtype,
        DataType::Datetime(_, _) | DataType::Date | DataType::Time
    )
}

/// Get the category of a DataType.
pub fn get_dtype_category(dtype: &DataType) -> DtypeCategory {
    if is_numeric_dtype(dtype) {
        DtypeCategory::Numeric
    } else if is_datetime_dtype(dtype) {
        DtypeCategory::Datetime
    } else if matches!(dtype, DataType::Boolean) {
        DtypeCategory::Boolean
    } else if matches!(dtype, DataType::String | DataType::Categorical(_, _)) {
        DtypeCategory::String
    } else {
        DtypeCategory::Other
    }
}

/// Get the dtype category of a Series.
pub fn series_dtype_category(series: &Series) -> DtypeCategory {
    get_dtype_category(series.dtype())
}

// =============================================================================
// String Parsing Utilities
// =============================================================================

/// Characters commonly used in numeric formatting that should be stripped.
pub const NUMERIC_FORMAT_CHARS: [char; 6] = [',', '$', '%', '€', '£', ' '];

/// Clean a string for numeric parsing by removing formatting characters.
///
/// # Example
///
/// ```rust,ignore
/// use data_triage::utils::clean_numeric_string;
///
/// assert_eq!(clean_numeric_string("$1,234.56"), "1234.56");
/// assert_eq!(clean_numeric_string("  42%  "), "42");
/// ```
pub fn clean_numeric_string(s: &str) -> String {
    let mut result = s.trim().to_string();
    for c in NUMERIC_FORMAT_CHARS {
        result = result.replace(c, "");
    }
    result
}

/// Try to parse a string as a numeric value (f64).
///
/// Handles common formatting like currency symbols, percentages, and thousands separators.
pub fn parse_numeric_string(s: &str) -> Option<f64> {
    let cleaned = clean_numeric_string(s);
    if cleaned.is_empty() {
        return None;
    }
    cleaned.parse::<f64>().ok()
}

/// Check if a string can be parsed as a numeric value.
pub fn is_numeric_string(s: &str) -> bool {
    parse_numeric_string(s).is_some()
}

// =============================================================================
// Series Statistics Utilities
// =============================================================================

/// Count values in a string Series that can be parsed as numeric.
///
/// Returns `(numeric_count, non_null_count)`. Non-string series yield (0, 0).
pub fn count_numeric_values(series: &Series) -> (usize, usize) {
    let mut numeric_count = 0;
    let mut total_count = 0;

    if let Ok(str_series) = series.str() {
        for val in str_series.into_iter().flatten() {
            total_count += 1;
            if is_numeric_string(val) {
                numeric_count += 1;
            }
        }
    }

    (numeric_count, total_count)
}

/// Get the ratio of numeric-parseable values among non-null cells of a
/// string Series.
pub fn numeric_ratio(series: &Series) -> f64 {
    let (numeric_count, total_count) = count_numeric_values(series);
    if total_count == 0 {
        0.0
    } else {
        numeric_count as f64 / total_count as f64
    }
}

/// Format a column list for a diagnostic message, truncating after
/// `max_shown` entries with a "+N more" suffix.
pub fn format_column_list(columns: &[String], max_shown: usize) -> String {
    if columns.len() <= max_shown {
        columns.join(", ")
    } else {
        format!(
            "{} (+{} more)",
            columns[..max_shown].join(", "),
            columns.len() - max_shown
        )
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_numeric_dtype() {
        assert!(is_numeric_dtype(&DataType::Int64));
        assert!(is_numeric_dtype(&DataType::Float64));
        assert!(!is_numeric_dtype(&DataType::String));
        assert!(!is_numeric_dtype(&DataType::Boolean));
    }

    #[test]
    fn test_clean_numeric_string() {
        assert_eq!(clean_numeric_string("$1,234.56"), "1234.56");
        assert_eq!(clean_numeric_string("  42%  "), "42");
        assert_eq!(clean_numeric_string("€100"), "100");
        assert_eq!(clean_numeric_string("1 000"), "1000");
    }

    #[test]
    fn test_parse_numeric_string() {
        assert_eq!(parse_numeric_string("42"), Some(42.0));
        assert_eq!(parse_numeric_string("$1,234.56"), Some(1234.56));
        assert_eq!(parse_numeric_string("-100"), Some(-100.0));
        assert_eq!(parse_numeric_string(""), None);
        assert_eq!(parse_numeric_string("hello"), None);
    }

    #[test]
    fn test_numeric_ratio() {
        let series = Series::new("test".into(), &[Some("1"), Some("x"), Some("3"), None]);
        // 2 parseable out of 3 non-null cells
        assert!((numeric_ratio(&series) - 2.0 / 3.0).abs() < 1e-12);

        let all_null = Series::new("empty".into(), &[None::<&str>, None]);
        assert_eq!(numeric_ratio(&all_null), 0.0);
    }

    #[test]
    fn test_dtype_category() {
        assert_eq!(get_dtype_category(&DataType::Int64), DtypeCategory::Numeric);
        assert_eq!(get_dtype_category(&DataType::Date), DtypeCategory::Datetime);
        assert_eq!(
            get_dtype_category(&DataType::Boolean),
            DtypeCategory::Boolean
        );
        assert_eq!(get_dtype_category(&DataType::String), DtypeCategory::String);
    }

    #[test]
    fn test_format_column_list() {
        let cols: Vec<String> = ["a", "b", "c"].iter().map(|s| s.to_string()).collect();
        assert_eq!(format_column_list(&cols, 5), "a, b, c");

        let many: Vec<String> = (0..8).map(|i| format!("col{i}")).collect();
        assert_eq!(
            format_column_list(&many, 5),
            "col0, col1, col2, col3, col4 (+3 more)"
        );
    }
}
