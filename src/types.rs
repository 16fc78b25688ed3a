//! Core data model for the triage pipeline.
//!
//! All report structures are plain, serde-serializable records with named,
//! typed fields. They carry counts, column lists and percentages only --
//! no translated strings -- so the UI, the visualization filter and the
//! insight prompt builder all consume the exact same values.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Quality defect axes a column can be tagged with.
///
/// The axes are independent: a column can carry several tags at once
/// (e.g. both `QuasiEmpty` and `HighMissing`). The only exclusion is
/// between `Empty` and `QuasiEmpty`, which partition the missingness
/// range at the 100% boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DefectKind {
    /// 100% of cells are missing.
    Empty,
    /// Missing fraction in [90%, 100%).
    QuasiEmpty,
    /// Missing fraction above 50% (independent of quasi-empty).
    HighMissing,
    /// Exactly one distinct non-null value.
    LowVariance,
}

/// Severity of a detected defect.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Info,
    Warning,
}

/// A single defect tag attached to a column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnDefect {
    pub column_name: String,
    pub kind: DefectKind,
    pub severity: Severity,
}

impl ColumnDefect {
    pub fn new(column_name: impl Into<String>, kind: DefectKind, severity: Severity) -> Self {
        Self {
            column_name: column_name.into(),
            kind,
            severity,
        }
    }
}

/// Missing-value statistics for one column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MissingStats {
    pub count: usize,
    pub percentage: f64,
}

/// Canonical output of the classification pass for one table load.
///
/// Created once per load and never mutated afterwards; a new upload
/// replaces the whole report (and everything derived from it) atomically.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CleaningReport {
    /// Shape of the table as loaded (rows, columns).
    pub original_shape: (usize, usize),
    /// Shape after cleaning. Nothing is dropped, so this matches
    /// `original_shape`; kept separate for before/after display.
    pub cleaned_shape: (usize, usize),
    /// Columns with 100% missing values.
    pub empty_columns: Vec<String>,
    /// Columns with missing fraction in [90%, 100%).
    pub quasi_empty_columns: Vec<String>,
    /// Rows beyond the first occurrence of each distinct row.
    pub duplicate_row_count: usize,
    /// Rows where every cell is missing.
    pub empty_row_count: usize,
    /// Per-column missing statistics on the cleaned table (only columns
    /// that have at least one missing cell).
    pub missing_by_column: BTreeMap<String, MissingStats>,
    /// Text columns converted to numeric by the coercion pass.
    pub converted_to_numeric: Vec<String>,
    /// Defect tags per column, one entry per (column, axis) pair.
    pub column_defects: Vec<ColumnDefect>,
    /// Diagnostic messages for defects found.
    pub warnings: Vec<String>,
    /// Non-defect suggestions (conversions, top missing columns, ...).
    pub recommendations: Vec<String>,
}

impl CleaningReport {
    /// An empty report for a table of the given shape (no defects found).
    pub fn empty(shape: (usize, usize)) -> Self {
        Self {
            original_shape: shape,
            cleaned_shape: shape,
            empty_columns: Vec::new(),
            quasi_empty_columns: Vec::new(),
            duplicate_row_count: 0,
            empty_row_count: 0,
            missing_by_column: BTreeMap::new(),
            converted_to_numeric: Vec::new(),
            column_defects: Vec::new(),
            warnings: Vec::new(),
            recommendations: Vec::new(),
        }
    }

    /// Columns whose missing percentage exceeds the given threshold,
    /// derived from `missing_by_column`.
    pub fn high_missing_columns(&self, threshold_pct: f64) -> Vec<(&str, f64)> {
        self.missing_by_column
            .iter()
            .filter(|(_, stats)| stats.percentage > threshold_pct)
            .map(|(name, stats)| (name.as_str(), stats.percentage))
            .collect()
    }

    /// Whether a column carries a given defect tag.
    pub fn has_defect(&self, column: &str, kind: DefectKind) -> bool {
        self.column_defects
            .iter()
            .any(|d| d.column_name == column && d.kind == kind)
    }
}

/// Quality banding derived from the 0-100 score.
///
/// Boundaries are inclusive/exclusive exactly as the UI expects:
/// score >= 80 is `Good`, [60, 80) is `NeedsImprovement`, below 60 is `Poor`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QualityTier {
    Good,
    NeedsImprovement,
    Poor,
}

impl QualityTier {
    pub fn from_score(score: f64) -> Self {
        if score >= 80.0 {
            Self::Good
        } else if score >= 60.0 {
            Self::NeedsImprovement
        } else {
            Self::Poor
        }
    }
}

/// Top-level counters of the anomaly report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnomalySummary {
    /// Number of defect *categories* present (empty columns, quasi-empty
    /// columns, duplicates, high-missing), each counted once regardless
    /// of how many columns fall in it.
    pub total_anomalies: usize,
    /// Number of individual warning messages emitted by the classifier.
    /// Distinct from `total_anomalies`; UI logic branches on each.
    pub warnings_count: usize,
    pub quality_score: f64,
}

/// A group of flagged columns.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnGroup {
    pub count: usize,
    pub columns: Vec<String>,
}

/// Duplicate-row statistics.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DuplicateStats {
    pub count: usize,
    pub percentage: f64,
}

/// One column with more than 50% missing values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HighMissingEntry {
    pub column: String,
    pub percentage: f64,
}

/// Normalized, consumer-agnostic projection of a [`CleaningReport`].
///
/// Shaped identically for every caller (UI anomaly panel, visualization
/// filter, LLM prompt builder); recomputed on demand, never persisted
/// separately from its source report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnomalyReport {
    pub summary: AnomalySummary,
    pub empty_columns: ColumnGroup,
    pub quasi_empty_columns: ColumnGroup,
    pub duplicates: DuplicateStats,
    pub high_missing_values: Vec<HighMissingEntry>,
}

impl AnomalyReport {
    /// Whether any anomaly category is present.
    pub fn has_anomalies(&self) -> bool {
        self.summary.total_anomalies > 0
    }
}
