//! Triage report assembly and JSON output.

pub mod generator;

pub use generator::{ReportGenerator, TriageReport};
