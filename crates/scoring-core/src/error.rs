//! Error types for the scoring engine.
//!
//! Scoring itself is total and never fails. These errors only arise at the
//! string boundary (parsing labels that arrive as text) and when validating
//! raw metric records at ingestion.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    #[error("Unknown section key: {0}")]
    UnknownSection(String),

    #[error("Unknown grade: {0}")]
    UnknownGrade(String),

    #[error("Unknown status label: {0}")]
    UnknownStatus(String),

    #[error("Unknown driver impact: {0} (expected \"+\" or \"-\")")]
    UnknownImpact(String),

    #[error("Metric {metric} out of range: {value} not in [{min}, {max}]")]
    OutOfRange {
        metric: &'static str,
        value: f64,
        min: f64,
        max: f64,
    },
}

pub type Result<T> = std::result::Result<T, Error>;
