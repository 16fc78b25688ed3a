//! Statistical helpers for the dataset profiler.

use crate::error::Result;
use polars::prelude::*;
use std::collections::HashMap;

/// Calculate sample standard deviation (n - 1 denominator) of a series.
pub(crate) fn calculate_std(series: &Series) -> Result<f64> {
    let mean = series.mean().unwrap_or(0.0);
    let n = series.len() as f64;

    if n <= 1.0 {
        return Ok(0.0);
    }

    let float_series = series.f64()?;
    let variance: f64 = float_series
        .into_iter()
        .filter_map(|v| v.map(|val| (val - mean).powi(2)))
        .sum::<f64>()
        / (n - 1.0);

    Ok(variance.sqrt())
}

/// Calculate skewness of a series.
pub(crate) fn calculate_skewness(series: &Series) -> Result<f64> {
    let mean = series.mean().unwrap_or(0.0);
    let std = calculate_std(series)?;

    if std == 0.0 {
        return Ok(0.0);
    }

    let n = series.len() as f64;
    let float_series = series.f64()?;

    let skew_sum: f64 = float_series
        .into_iter()
        .filter_map(|v| v.map(|val| ((val - mean) / std).powi(3)))
        .sum();

    Ok(skew_sum / n)
}

/// Calculate excess kurtosis of a series (0 for a normal distribution).
pub(crate) fn calculate_kurtosis(series: &Series) -> Result<f64> {
    let mean = series.mean().unwrap_or(0.0);
    let n = series.len() as f64;

    if n == 0.0 {
        return Ok(0.0);
    }

    let float_series = series.f64()?;
    let m2: f64 = float_series
        .into_iter()
        .filter_map(|v| v.map(|val| (val - mean).powi(2)))
        .sum::<f64>()
        / n;

    if m2 == 0.0 {
        return Ok(0.0);
    }

    let m4: f64 = float_series
        .into_iter()
        .filter_map(|v| v.map(|val| (val - mean).powi(4)))
        .sum::<f64>()
        / n;

    Ok(m4 / m2.powi(2) - 3.0)
}

/// Median of a sorted-on-demand series.
pub(crate) fn calculate_median(series: &Series) -> Result<f64> {
    let sorted = series.sort(SortOptions::default())?;
    let n = sorted.len();
    if n == 0 {
        return Ok(0.0);
    }

    let get = |idx: usize| -> f64 {
        sorted
            .get(idx)
            .ok()
            .and_then(|v| v.try_extract::<f64>().ok())
            .unwrap_or(0.0)
    };

    if n % 2 == 1 {
        Ok(get(n / 2))
    } else {
        Ok((get(n / 2 - 1) + get(n / 2)) / 2.0)
    }
}

/// First and third quartile via index positions on the sorted series.
pub(crate) fn calculate_quartiles(series: &Series) -> Result<(f64, f64)> {
    let sorted = series.sort(SortOptions::default())?;
    let n = sorted.len();
    if n == 0 {
        return Ok((0.0, 0.0));
    }

    let q1_idx = ((n as f64 * 0.25) as usize).min(n - 1);
    let q3_idx = ((n as f64 * 0.75) as usize).min(n - 1);

    let q1 = sorted.get(q1_idx)?.try_extract::<f64>().unwrap_or(0.0);
    let q3 = sorted.get(q3_idx)?.try_extract::<f64>().unwrap_or(0.0);

    Ok((q1, q3))
}

/// IQR outlier bounds (1.5 x IQR beyond the quartiles) and the count of
/// values outside them.
pub(crate) fn outlier_bounds_and_count(series: &Series) -> Result<(f64, f64, usize)> {
    let (q1, q3) = calculate_quartiles(series)?;
    let iqr = q3 - q1;
    let lower = q1 - 1.5 * iqr;
    let upper = q3 + 1.5 * iqr;

    let float_series = series.f64()?;
    let count = float_series
        .into_iter()
        .flatten()
        .filter(|&val| val < lower || val > upper)
        .count();

    Ok((lower, upper, count))
}

/// Pearson correlation over pairwise-complete observations.
///
/// Returns `None` when fewer than two complete pairs exist or either
/// side has zero variance.
pub(crate) fn pearson_correlation(a: &Series, b: &Series) -> Result<Option<f64>> {
    let a = a.f64()?;
    let b = b.f64()?;

    let pairs: Vec<(f64, f64)> = a
        .into_iter()
        .zip(b)
        .filter_map(|(x, y)| Some((x?, y?)))
        .collect();

    let n = pairs.len() as f64;
    if n < 2.0 {
        return Ok(None);
    }

    let mean_x = pairs.iter().map(|(x, _)| x).sum::<f64>() / n;
    let mean_y = pairs.iter().map(|(_, y)| y).sum::<f64>() / n;

    let mut cov = 0.0;
    let mut var_x = 0.0;
    let mut var_y = 0.0;
    for (x, y) in &pairs {
        let dx = x - mean_x;
        let dy = y - mean_y;
        cov += dx * dy;
        var_x += dx * dx;
        var_y += dy * dy;
    }

    if var_x == 0.0 || var_y == 0.0 {
        return Ok(None);
    }

    Ok(Some(cov / (var_x.sqrt() * var_y.sqrt())))
}

/// Value frequencies of a string series, most frequent first.
///
/// Ties break on the value itself so the ordering is deterministic.
pub(crate) fn value_frequencies(series: &Series) -> Vec<(String, usize)> {
    let mut counts: HashMap<String, usize> = HashMap::new();

    if let Ok(ca) = series.str() {
        for val in ca.into_iter().flatten() {
            *counts.entry(val.to_string()).or_insert(0) += 1;
        }
    }

    let mut entries: Vec<(String, usize)> = counts.into_iter().collect();
    entries.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    entries
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_calculate_std_basic() {
        // Mean = 3, variance = 10/4 = 2.5, std ~ 1.58
        let series = Series::new("val".into(), &[1.0f64, 2.0, 3.0, 4.0, 5.0]);
        let std = calculate_std(&series).unwrap();
        assert!((std - 2.5f64.sqrt()).abs() < 1e-9);
    }

    #[test]
    fn test_calculate_std_degenerate() {
        let single = Series::new("val".into(), &[5.0f64]);
        assert_eq!(calculate_std(&single).unwrap(), 0.0);

        let constant = Series::new("val".into(), &[5.0f64, 5.0, 5.0]);
        assert_eq!(calculate_std(&constant).unwrap(), 0.0);
    }

    #[test]
    fn test_calculate_skewness_symmetric() {
        let series = Series::new("val".into(), &[1.0f64, 2.0, 3.0, 4.0, 5.0]);
        assert!(calculate_skewness(&series).unwrap().abs() < 0.1);
    }

    #[test]
    fn test_calculate_skewness_positive() {
        let series = Series::new("val".into(), &[1.0f64, 1.0, 1.0, 1.0, 10.0]);
        assert!(calculate_skewness(&series).unwrap() > 0.0);
    }

    #[test]
    fn test_calculate_kurtosis_constant_is_zero() {
        let series = Series::new("val".into(), &[5.0f64, 5.0, 5.0]);
        assert_eq!(calculate_kurtosis(&series).unwrap(), 0.0);
    }

    #[test]
    fn test_calculate_kurtosis_heavy_tail() {
        let series = Series::new("val".into(), &[1.0f64, 1.0, 1.0, 1.0, 1.0, 1.0, 1.0, 50.0]);
        assert!(calculate_kurtosis(&series).unwrap() > 0.0);
    }

    #[test]
    fn test_calculate_median_odd_and_even() {
        let odd = Series::new("val".into(), &[3.0f64, 1.0, 2.0]);
        assert_eq!(calculate_median(&odd).unwrap(), 2.0);

        let even = Series::new("val".into(), &[4.0f64, 1.0, 3.0, 2.0]);
        assert_eq!(calculate_median(&even).unwrap(), 2.5);
    }

    #[test]
    fn test_quartiles() {
        let series = Series::new("val".into(), &(1..=8).map(|v| v as f64).collect::<Vec<_>>());
        let (q1, q3) = calculate_quartiles(&series).unwrap();
        assert_eq!(q1, 3.0);
        assert_eq!(q3, 7.0);
    }

    #[test]
    fn test_outlier_bounds_and_count() {
        let series = Series::new(
            "val".into(),
            &[1.0f64, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0, 9.0, 100.0],
        );
        let (_, upper, count) = outlier_bounds_and_count(&series).unwrap();
        assert!(upper < 100.0);
        assert_eq!(count, 1);
    }

    #[test]
    fn test_pearson_correlation_perfect() {
        let a = Series::new("a".into(), &[1.0f64, 2.0, 3.0, 4.0]);
        let b = Series::new("b".into(), &[2.0f64, 4.0, 6.0, 8.0]);
        let r = pearson_correlation(&a, &b).unwrap().unwrap();
        assert!((r - 1.0).abs() < 1e-9);

        let c = Series::new("c".into(), &[8.0f64, 6.0, 4.0, 2.0]);
        let r = pearson_correlation(&a, &c).unwrap().unwrap();
        assert!((r + 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_pearson_correlation_skips_incomplete_pairs() {
        let a = Series::new("a".into(), &[Some(1.0f64), Some(2.0), None, Some(4.0)]);
        let b = Series::new("b".into(), &[Some(2.0f64), None, Some(6.0), Some(8.0)]);
        // Only rows 0 and 3 are complete
        let r = pearson_correlation(&a, &b).unwrap().unwrap();
        assert!((r - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_pearson_correlation_zero_variance_is_none() {
        let a = Series::new("a".into(), &[1.0f64, 1.0, 1.0]);
        let b = Series::new("b".into(), &[2.0f64, 4.0, 6.0]);
        assert!(pearson_correlation(&a, &b).unwrap().is_none());
    }

    #[test]
    fn test_value_frequencies_deterministic_ties() {
        let series = Series::new("cat".into(), &["b", "a", "a", "c", "b"]);
        let freqs = value_frequencies(&series);
        assert_eq!(freqs[0], ("a".to_string(), 2));
        assert_eq!(freqs[1], ("b".to_string(), 2));
        assert_eq!(freqs[2], ("c".to_string(), 1));
    }
}
