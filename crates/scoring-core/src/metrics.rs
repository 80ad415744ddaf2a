//! Raw metric records, one per dashboard section.
//!
//! These are read-only inputs to scoring. Range checks live in `validate()`
//! and are meant for the ingestion boundary; the scorers never call them and
//! stay total over any input.

use serde::{Deserialize, Serialize};

use crate::section::SectionKey;
use crate::{Error, Result};

fn check_range(metric: &'static str, value: f64, min: f64, max: f64) -> Result<()> {
    if (min..=max).contains(&value) {
        Ok(())
    } else {
        Err(Error::OutOfRange {
            metric,
            value,
            min,
            max,
        })
    }
}

fn check_optional(metric: &'static str, value: Option<f64>, min: f64, max: f64) -> Result<()> {
    match value {
        Some(v) => check_range(metric, v, min, max),
        None => Ok(()),
    }
}

/// Headline athletic indices shown on the overview page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OverviewMetrics {
    pub overall_score: f64,
    /// Muscle Strength Index (0-100).
    pub msi: f64,
    /// Muscle Endurance Score (0-100).
    pub mes: f64,
    /// Anaerobic Power Index (0-1000).
    pub api: f64,
    pub vo2max: f64,
    /// Fatigue Recovery Rate (0-100).
    pub frr: f64,
    /// Athletic Conditioning Score (0-100).
    pub acs: f64,
    /// Body Optimization Score (0-10).
    pub bos: f64,
}

impl OverviewMetrics {
    pub fn validate(&self) -> Result<()> {
        check_range("overall_score", self.overall_score, 0.0, 100.0)?;
        check_range("msi", self.msi, 0.0, 100.0)?;
        check_range("mes", self.mes, 0.0, 100.0)?;
        check_range("api", self.api, 0.0, 1000.0)?;
        check_range("vo2max", self.vo2max, 0.0, 100.0)?;
        check_range("frr", self.frr, 0.0, 100.0)?;
        check_range("acs", self.acs, 0.0, 100.0)?;
        check_range("bos", self.bos, 0.0, 10.0)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BodyCompositionMetrics {
    /// Body weight in kg.
    pub weight: f64,
    pub body_fat_percent: f64,
    /// Muscle mass in kg.
    pub muscle_mass: f64,
    /// Basal metabolic rate in kcal/day. Recorded but not scored.
    pub bmr: f64,
    pub power_to_weight: f64,
    #[serde(default)]
    pub intracellular_water: Option<f64>,
    #[serde(default)]
    pub extracellular_water: Option<f64>,
    #[serde(default)]
    pub visceral_fat_level: Option<f64>,
    #[serde(default)]
    pub phase_angle: Option<f64>,
}

impl BodyCompositionMetrics {
    pub fn validate(&self) -> Result<()> {
        check_range("weight", self.weight, 30.0, 200.0)?;
        check_range("body_fat_percent", self.body_fat_percent, 0.0, 50.0)?;
        check_range("muscle_mass", self.muscle_mass, 20.0, 150.0)?;
        check_range("bmr", self.bmr, 1000.0, 5000.0)?;
        check_range("power_to_weight", self.power_to_weight, 0.0, 5.0)?;
        check_optional("intracellular_water", self.intracellular_water, 0.0, 100.0)?;
        check_optional("extracellular_water", self.extracellular_water, 0.0, 100.0)?;
        check_optional("visceral_fat_level", self.visceral_fat_level, 0.0, 30.0)?;
        check_optional("phase_angle", self.phase_angle, 0.0, 15.0)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BloodworkMetrics {
    /// g/dL
    pub hemoglobin: f64,
    /// Percent of blood volume.
    pub hematocrit: f64,
    /// ng/dL
    pub testosterone: f64,
}

impl BloodworkMetrics {
    pub fn validate(&self) -> Result<()> {
        check_range("hemoglobin", self.hemoglobin, 8.0, 25.0)?;
        check_range("hematocrit", self.hematocrit, 20.0, 70.0)?;
        check_range("testosterone", self.testosterone, 100.0, 1500.0)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecoveryMetrics {
    pub sleep_quality: f64,
    /// HRV score on a 0-200 scale.
    pub hrv_score: f64,
    /// Lower is better.
    pub fatigue_level: f64,
    pub hydration_level: f64,
    pub readiness_score: f64,
}

impl RecoveryMetrics {
    pub fn validate(&self) -> Result<()> {
        check_range("sleep_quality", self.sleep_quality, 0.0, 100.0)?;
        check_range("hrv_score", self.hrv_score, 0.0, 200.0)?;
        check_range("fatigue_level", self.fatigue_level, 0.0, 100.0)?;
        check_range("hydration_level", self.hydration_level, 0.0, 100.0)?;
        check_range("readiness_score", self.readiness_score, 0.0, 100.0)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SupplementsMetrics {
    pub adherence_rate: f64,
    /// Correlation between supplement intake and performance, -1 to 1.
    pub performance_corr: f64,
}

impl SupplementsMetrics {
    pub fn validate(&self) -> Result<()> {
        check_range("adherence_rate", self.adherence_rate, 0.0, 100.0)?;
        check_range("performance_corr", self.performance_corr, -1.0, 1.0)
    }
}

/// Strength and conditioning results. Lifts are in lbs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PerformanceMetrics {
    pub bench_max: f64,
    pub squat_max: f64,
    pub deadlift_max: f64,
    pub vo2max: f64,
    pub body_fat_percent: f64,
}

impl PerformanceMetrics {
    pub fn validate(&self) -> Result<()> {
        check_range("bench_max", self.bench_max, 0.0, 1000.0)?;
        check_range("squat_max", self.squat_max, 0.0, 1000.0)?;
        check_range("deadlift_max", self.deadlift_max, 0.0, 1000.0)?;
        check_range("vo2max", self.vo2max, 0.0, 100.0)?;
        check_range("body_fat_percent", self.body_fat_percent, 0.0, 50.0)
    }
}

/// A snapshot of one section's raw metrics.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "section", rename_all = "snake_case")]
pub enum RawMetricSet {
    Overview(OverviewMetrics),
    BodyComposition(BodyCompositionMetrics),
    Bloodwork(BloodworkMetrics),
    Recovery(RecoveryMetrics),
    Supplements(SupplementsMetrics),
    BodybuildingPerformance(PerformanceMetrics),
}

impl RawMetricSet {
    /// The section this snapshot belongs to.
    pub fn section_key(&self) -> SectionKey {
        match self {
            RawMetricSet::Overview(_) => SectionKey::Overview,
            RawMetricSet::BodyComposition(_) => SectionKey::BodyComposition,
            RawMetricSet::Bloodwork(_) => SectionKey::Bloodwork,
            RawMetricSet::Recovery(_) => SectionKey::Recovery,
            RawMetricSet::Supplements(_) => SectionKey::Supplements,
            RawMetricSet::BodybuildingPerformance(_) => SectionKey::BodybuildingPerformance,
        }
    }

    pub fn validate(&self) -> Result<()> {
        match self {
            RawMetricSet::Overview(m) => m.validate(),
            RawMetricSet::BodyComposition(m) => m.validate(),
            RawMetricSet::Bloodwork(m) => m.validate(),
            RawMetricSet::Recovery(m) => m.validate(),
            RawMetricSet::Supplements(m) => m.validate(),
            RawMetricSet::BodybuildingPerformance(m) => m.validate(),
        }
    }
}

impl From<OverviewMetrics> for RawMetricSet {
    fn from(m: OverviewMetrics) -> Self {
        RawMetricSet::Overview(m)
    }
}

impl From<BodyCompositionMetrics> for RawMetricSet {
    fn from(m: BodyCompositionMetrics) -> Self {
        RawMetricSet::BodyComposition(m)
    }
}

impl From<BloodworkMetrics> for RawMetricSet {
    fn from(m: BloodworkMetrics) -> Self {
        RawMetricSet::Bloodwork(m)
    }
}

impl From<RecoveryMetrics> for RawMetricSet {
    fn from(m: RecoveryMetrics) -> Self {
        RawMetricSet::Recovery(m)
    }
}

impl From<SupplementsMetrics> for RawMetricSet {
    fn from(m: SupplementsMetrics) -> Self {
        RawMetricSet::Supplements(m)
    }
}

impl From<PerformanceMetrics> for RawMetricSet {
    fn from(m: PerformanceMetrics) -> Self {
        RawMetricSet::BodybuildingPerformance(m)
    }
}
