//! Metric normalization onto a common 0-100 "goodness" scale.
//!
//! Every raw metric goes through one of two curves:
//! - target deviation: `max(0, 100 - |value - ideal| * penalty_per_unit)`
//! - ratio to ceiling: `min(100, value / reference_max * 100)`
//!
//! The curve constants below are domain-tuned values for wrestlers. They are
//! kept as named constants so they can be reviewed and retuned in one place.

use serde::{Deserialize, Serialize};

/// Upper end of the normalized scale.
pub const MAX_SCORE: f64 = 100.0;

/// Normalization curve together with its parameters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "pattern", rename_all = "snake_case")]
pub enum Normalization {
    /// Symmetric penalty for distance from an ideal value.
    TargetDeviation { ideal: f64, penalty_per_unit: f64 },
    /// Linear ramp from 0 that saturates at `reference_max`.
    RatioToCeiling { reference_max: f64 },
}

impl Normalization {
    pub const fn deviation(ideal: f64, penalty_per_unit: f64) -> Self {
        Self::TargetDeviation {
            ideal,
            penalty_per_unit,
        }
    }

    pub const fn ratio(reference_max: f64) -> Self {
        Self::RatioToCeiling { reference_max }
    }

    /// Apply this curve to a raw value.
    pub fn apply(&self, value: f64) -> f64 {
        match *self {
            Self::TargetDeviation {
                ideal,
                penalty_per_unit,
            } => target_deviation(value, ideal, penalty_per_unit),
            Self::RatioToCeiling { reference_max } => ratio_to_ceiling(value, reference_max),
        }
    }
}

// Body composition: optimal body fat 8-12 %, power-to-weight 1.8-2.2.
pub const BODY_FAT: Normalization = Normalization::deviation(10.0, 5.0);
pub const POWER_TO_WEIGHT: Normalization = Normalization::deviation(2.0, 30.0);

// Bloodwork: hemoglobin 14-18 g/dL, hematocrit 42-50 %, testosterone 600-900 ng/dL.
pub const HEMOGLOBIN: Normalization = Normalization::deviation(16.0, 8.0);
pub const HEMATOCRIT: Normalization = Normalization::deviation(46.0, 5.0);
pub const TESTOSTERONE: Normalization = Normalization::deviation(750.0, 0.1);

// Strength lifts in lbs, elite reference levels.
pub const BENCH_MAX: Normalization = Normalization::ratio(400.0);
pub const SQUAT_MAX: Normalization = Normalization::ratio(500.0);
pub const DEADLIFT_MAX: Normalization = Normalization::ratio(600.0);

// Performance context: VO2max 50-60 is a good athlete, body fat 10-15 %.
pub const PERFORMANCE_VO2MAX: Normalization = Normalization::ratio(60.0);
pub const PERFORMANCE_BODY_FAT: Normalization = Normalization::deviation(12.5, 4.0);

// Rescales of metrics recorded on non-percentage scales.
pub const ANAEROBIC_POWER_INDEX: Normalization = Normalization::ratio(1000.0);
pub const BODY_OPTIMIZATION_SCORE: Normalization = Normalization::ratio(10.0);
pub const HRV_SCORE: Normalization = Normalization::ratio(200.0);

/// Apply a normalization curve to `value`.
pub fn normalize_metric(value: f64, normalization: &Normalization) -> f64 {
    normalization.apply(value)
}

/// Target-deviation curve. Exactly 100 at the ideal, never below 0.
pub fn target_deviation(value: f64, ideal: f64, penalty_per_unit: f64) -> f64 {
    (MAX_SCORE - (value - ideal).abs() * penalty_per_unit).max(0.0)
}

/// Ratio-to-ceiling curve. Saturates at 100; a non-positive ceiling yields 0.
pub fn ratio_to_ceiling(value: f64, reference_max: f64) -> f64 {
    if reference_max <= 0.0 {
        return 0.0;
    }
    (value / reference_max * MAX_SCORE).clamp(0.0, MAX_SCORE)
}

/// Muscle mass as a percentage of body weight, capped at 100.
///
/// A zero body weight scores 0 instead of dividing by zero.
pub fn muscle_mass_ratio(muscle_mass: f64, weight: f64) -> f64 {
    if weight > 0.0 {
        ratio_to_ceiling(muscle_mass, weight)
    } else {
        0.0
    }
}

/// Flip a "lower is better" 0-100 metric such as fatigue.
pub fn inverted(value: f64) -> f64 {
    MAX_SCORE - value
}

/// Map a correlation coefficient in [-1, 1] onto [0, 100].
pub fn correlation_to_score(correlation: f64) -> f64 {
    (correlation + 1.0) * 50.0
}

/// Round to one decimal place.
///
/// Rounds the exact binary value, ties to even, so `0.15` (stored just below
/// the tie) gives `0.1` and `72.25` gives `72.2`. Non-finite input is
/// returned unchanged.
pub fn round1(value: f64) -> f64 {
    if !value.is_finite() {
        return value;
    }
    format!("{:.1}", value).parse().unwrap_or(value)
}
