//! Data-quality triage: classification, scoring, anomaly reporting and
//! visualization filtering.
//!
//! The entry point is [`QualityClassifier::classify`], which produces a
//! cleaned `DataFrame` plus a [`CleaningReport`](crate::types::CleaningReport).
//! Everything else in this module is a pure derivation from that report.

pub mod anomaly;
pub mod classifier;
pub mod coercion;
pub mod scorer;
pub mod viz_filter;

pub use anomaly::AnomalyReportBuilder;
pub use classifier::QualityClassifier;
pub use coercion::coerce_numeric_columns;
pub use scorer::{quality_score, quality_tier};
pub use viz_filter::columns_to_exclude;
