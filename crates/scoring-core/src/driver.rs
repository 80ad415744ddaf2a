//! Score drivers: named factors shown alongside a section score.
//!
//! Drivers are curated data stored next to a score. Nothing here derives them
//! from metrics, and their weights are display values that need not sum to 1.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::Error;

/// Notes attached to an explanation when none are configured.
pub const DEFAULT_EXPLANATION_NOTES: &str =
    "Score is calculated using a weighted average of all domain metrics.";

/// Direction in which a driver moves the score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Impact {
    #[serde(rename = "+")]
    Positive,
    #[serde(rename = "-")]
    Negative,
}

impl Impact {
    pub fn as_str(&self) -> &'static str {
        match self {
            Impact::Positive => "+",
            Impact::Negative => "-",
        }
    }
}

impl fmt::Display for Impact {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Impact {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "+" => Ok(Impact::Positive),
            "-" => Ok(Impact::Negative),
            other => Err(Error::UnknownImpact(other.to_string())),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreDriver {
    pub metric_name: String,
    pub impact: Impact,
    /// Display weight in [0, 1].
    pub weight: f64,
}

impl ScoreDriver {
    pub fn new(metric_name: impl Into<String>, impact: Impact, weight: f64) -> Self {
        Self {
            metric_name: metric_name.into(),
            impact,
            weight,
        }
    }
}

/// Drivers plus free-text notes for the score explanation view.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreExplanation {
    pub drivers: Vec<ScoreDriver>,
    pub notes: String,
}

/// Fallback drivers used when a score has none on file.
pub fn default_drivers() -> Vec<ScoreDriver> {
    vec![
        ScoreDriver::new("vo2max", Impact::Positive, 0.20),
        ScoreDriver::new("recovery", Impact::Positive, 0.15),
        ScoreDriver::new("fatigueLevel", Impact::Negative, 0.15),
        ScoreDriver::new("bodyComposition", Impact::Positive, 0.20),
        ScoreDriver::new("supplementAdherence", Impact::Positive, 0.10),
        ScoreDriver::new("strength", Impact::Positive, 0.20),
    ]
}
