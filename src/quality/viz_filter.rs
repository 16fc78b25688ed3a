//! Visualization column filter.
//!
//! Chart-producing consumers receive this exclusion set instead of
//! re-deriving quality logic, so the columns omitted from charts can never
//! diverge from the columns the anomaly panel reports.

use crate::types::CleaningReport;
use std::collections::BTreeSet;

/// Columns to exclude from any chart: empty and quasi-empty columns,
/// deduplicated.
pub fn columns_to_exclude(report: &CleaningReport) -> BTreeSet<String> {
    report
        .empty_columns
        .iter()
        .chain(report.quasi_empty_columns.iter())
        .cloned()
        .collect()
}
