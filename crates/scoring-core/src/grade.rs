//! Grading of scores and per-metric status labels.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::Error;

/// Score at or above which a grade is `Good`.
pub const GOOD_THRESHOLD: f64 = 80.0;

/// Score at or above which a grade is at least `Warning`.
pub const WARNING_THRESHOLD: f64 = 60.0;

/// Three-level ordinal grade attached to section and overall scores.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Grade {
    Good,
    Warning,
    Bad,
}

impl Grade {
    pub fn as_str(&self) -> &'static str {
        match self {
            Grade::Good => "good",
            Grade::Warning => "warning",
            Grade::Bad => "bad",
        }
    }
}

impl fmt::Display for Grade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Grade {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "good" => Ok(Grade::Good),
            "warning" => Ok(Grade::Warning),
            "bad" => Ok(Grade::Bad),
            other => Err(Error::UnknownGrade(other.to_string())),
        }
    }
}

/// Status chip shown next to an individual metric.
///
/// Shares its three values with [`Grade`] but is derived from metric-specific
/// thresholds rather than the fixed 80/60 grading scale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StatusLabel {
    Good,
    #[default]
    Warning,
    Bad,
}

impl StatusLabel {
    pub fn as_str(&self) -> &'static str {
        match self {
            StatusLabel::Good => "good",
            StatusLabel::Warning => "warning",
            StatusLabel::Bad => "bad",
        }
    }
}

impl fmt::Display for StatusLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for StatusLabel {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "good" => Ok(StatusLabel::Good),
            "warning" => Ok(StatusLabel::Warning),
            "bad" => Ok(StatusLabel::Bad),
            other => Err(Error::UnknownStatus(other.to_string())),
        }
    }
}

/// Grade a 0-100 score.
///
/// Boundaries are closed below: 80 is good, 60 is warning. NaN never passes a
/// comparison and therefore grades as bad.
pub fn grade(score: f64) -> Grade {
    if score >= GOOD_THRESHOLD {
        Grade::Good
    } else if score >= WARNING_THRESHOLD {
        Grade::Warning
    } else {
        Grade::Bad
    }
}

/// Status label for a single metric against its own thresholds.
pub fn status_label(value: f64, good_threshold: f64, warning_threshold: f64) -> StatusLabel {
    if value >= good_threshold {
        StatusLabel::Good
    } else if value >= warning_threshold {
        StatusLabel::Warning
    } else {
        StatusLabel::Bad
    }
}
