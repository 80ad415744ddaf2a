//! Section scoring.
//!
//! Each of the six dashboard sections combines its normalized metrics with a
//! fixed weighted average. Weights in every table sum to 1.0, so with inputs
//! inside their documented ranges the result lies in [0, 100].

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::grade::{grade, Grade};
use crate::metrics::{
    BloodworkMetrics, BodyCompositionMetrics, OverviewMetrics, PerformanceMetrics,
    RawMetricSet, RecoveryMetrics, SupplementsMetrics,
};
use crate::normalize::{self, round1};
use crate::Error;

/// One of the six fixed dashboard sections.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SectionKey {
    Overview,
    BodyComposition,
    Bloodwork,
    Recovery,
    Supplements,
    BodybuildingPerformance,
}

impl SectionKey {
    /// All sections in canonical display order.
    pub const ALL: [SectionKey; 6] = [
        SectionKey::Overview,
        SectionKey::BodyComposition,
        SectionKey::Bloodwork,
        SectionKey::Recovery,
        SectionKey::Supplements,
        SectionKey::BodybuildingPerformance,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SectionKey::Overview => "overview",
            SectionKey::BodyComposition => "body_composition",
            SectionKey::Bloodwork => "bloodwork",
            SectionKey::Recovery => "recovery",
            SectionKey::Supplements => "supplements",
            SectionKey::BodybuildingPerformance => "bodybuilding_performance",
        }
    }
}

impl fmt::Display for SectionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SectionKey {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SectionKey::ALL
            .into_iter()
            .find(|key| key.as_str() == s)
            .ok_or_else(|| Error::UnknownSection(s.to_string()))
    }
}

/// Graded score for one section at one point in time.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SectionScore {
    pub section_key: SectionKey,
    pub score: f64,
    pub grade: Grade,
}

impl SectionScore {
    /// Round a raw weighted score to one decimal and grade the rounded value.
    pub fn from_weighted(section_key: SectionKey, weighted: f64) -> Self {
        let score = round1(weighted);
        Self {
            section_key,
            score,
            grade: grade(score),
        }
    }
}

/// Overview weights. `api` and `bos` are rescaled to 0-100 first.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OverviewWeights {
    pub overall_score: f64,
    pub msi: f64,
    pub mes: f64,
    pub api: f64,
    pub vo2max: f64,
    pub frr: f64,
    pub acs: f64,
    pub bos: f64,
}

impl OverviewWeights {
    pub const DEFAULT: Self = Self {
        overall_score: 0.20,
        msi: 0.15,
        mes: 0.15,
        api: 0.10,
        vo2max: 0.15,
        frr: 0.10,
        acs: 0.10,
        bos: 0.05,
    };

    pub fn total(&self) -> f64 {
        self.overall_score
            + self.msi
            + self.mes
            + self.api
            + self.vo2max
            + self.frr
            + self.acs
            + self.bos
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BodyCompositionWeights {
    pub body_fat: f64,
    pub muscle_ratio: f64,
    pub power_to_weight: f64,
}

impl BodyCompositionWeights {
    pub const DEFAULT: Self = Self {
        body_fat: 0.35,
        muscle_ratio: 0.40,
        power_to_weight: 0.25,
    };

    pub fn total(&self) -> f64 {
        self.body_fat + self.muscle_ratio + self.power_to_weight
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BloodworkWeights {
    pub hemoglobin: f64,
    pub hematocrit: f64,
    pub testosterone: f64,
}

impl BloodworkWeights {
    pub const DEFAULT: Self = Self {
        hemoglobin: 0.35,
        hematocrit: 0.30,
        testosterone: 0.35,
    };

    pub fn total(&self) -> f64 {
        self.hemoglobin + self.hematocrit + self.testosterone
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RecoveryWeights {
    pub sleep_quality: f64,
    pub hrv: f64,
    pub fatigue: f64,
    pub hydration: f64,
    pub readiness: f64,
}

impl RecoveryWeights {
    pub const DEFAULT: Self = Self {
        sleep_quality: 0.25,
        hrv: 0.20,
        fatigue: 0.20,
        hydration: 0.15,
        readiness: 0.20,
    };

    pub fn total(&self) -> f64 {
        self.sleep_quality + self.hrv + self.fatigue + self.hydration + self.readiness
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SupplementsWeights {
    pub adherence: f64,
    pub correlation: f64,
}

impl SupplementsWeights {
    pub const DEFAULT: Self = Self {
        adherence: 0.60,
        correlation: 0.40,
    };

    pub fn total(&self) -> f64 {
        self.adherence + self.correlation
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PerformanceWeights {
    pub bench: f64,
    pub squat: f64,
    pub deadlift: f64,
    pub vo2max: f64,
    pub body_fat: f64,
}

impl PerformanceWeights {
    pub const DEFAULT: Self = Self {
        bench: 0.15,
        squat: 0.20,
        deadlift: 0.20,
        vo2max: 0.25,
        body_fat: 0.20,
    };

    pub fn total(&self) -> f64 {
        self.bench + self.squat + self.deadlift + self.vo2max + self.body_fat
    }
}

pub fn compute_overview_score(m: &OverviewMetrics) -> SectionScore {
    let w = OverviewWeights::DEFAULT;
    let api = normalize::ANAEROBIC_POWER_INDEX.apply(m.api);
    let bos = normalize::BODY_OPTIMIZATION_SCORE.apply(m.bos);

    let weighted = m.overall_score * w.overall_score
        + m.msi * w.msi
        + m.mes * w.mes
        + api * w.api
        + m.vo2max * w.vo2max
        + m.frr * w.frr
        + m.acs * w.acs
        + bos * w.bos;

    SectionScore::from_weighted(SectionKey::Overview, weighted)
}

pub fn compute_body_composition_score(m: &BodyCompositionMetrics) -> SectionScore {
    let w = BodyCompositionWeights::DEFAULT;
    let body_fat = normalize::BODY_FAT.apply(m.body_fat_percent);
    let muscle_ratio = normalize::muscle_mass_ratio(m.muscle_mass, m.weight);
    let power_to_weight = normalize::POWER_TO_WEIGHT.apply(m.power_to_weight);

    let weighted = body_fat * w.body_fat
        + muscle_ratio * w.muscle_ratio
        + power_to_weight * w.power_to_weight;

    SectionScore::from_weighted(SectionKey::BodyComposition, weighted)
}

pub fn compute_bloodwork_score(m: &BloodworkMetrics) -> SectionScore {
    let w = BloodworkWeights::DEFAULT;
    let weighted = normalize::HEMOGLOBIN.apply(m.hemoglobin) * w.hemoglobin
        + normalize::HEMATOCRIT.apply(m.hematocrit) * w.hematocrit
        + normalize::TESTOSTERONE.apply(m.testosterone) * w.testosterone;

    SectionScore::from_weighted(SectionKey::Bloodwork, weighted)
}

pub fn compute_recovery_score(m: &RecoveryMetrics) -> SectionScore {
    let w = RecoveryWeights::DEFAULT;
    let weighted = m.sleep_quality * w.sleep_quality
        + normalize::HRV_SCORE.apply(m.hrv_score) * w.hrv
        + normalize::inverted(m.fatigue_level) * w.fatigue
        + m.hydration_level * w.hydration
        + m.readiness_score * w.readiness;

    SectionScore::from_weighted(SectionKey::Recovery, weighted)
}

pub fn compute_supplements_score(m: &SupplementsMetrics) -> SectionScore {
    let w = SupplementsWeights::DEFAULT;
    let weighted = m.adherence_rate * w.adherence
        + normalize::correlation_to_score(m.performance_corr) * w.correlation;

    SectionScore::from_weighted(SectionKey::Supplements, weighted)
}

pub fn compute_performance_score(m: &PerformanceMetrics) -> SectionScore {
    let w = PerformanceWeights::DEFAULT;
    let weighted = normalize::BENCH_MAX.apply(m.bench_max) * w.bench
        + normalize::SQUAT_MAX.apply(m.squat_max) * w.squat
        + normalize::DEADLIFT_MAX.apply(m.deadlift_max) * w.deadlift
        + normalize::PERFORMANCE_VO2MAX.apply(m.vo2max) * w.vo2max
        + normalize::PERFORMANCE_BODY_FAT.apply(m.body_fat_percent) * w.body_fat;

    SectionScore::from_weighted(SectionKey::BodybuildingPerformance, weighted)
}

/// Score any section snapshot. The section key is taken from the snapshot.
pub fn score_section(metrics: &RawMetricSet) -> SectionScore {
    let result = match metrics {
        RawMetricSet::Overview(m) => compute_overview_score(m),
        RawMetricSet::BodyComposition(m) => compute_body_composition_score(m),
        RawMetricSet::Bloodwork(m) => compute_bloodwork_score(m),
        RawMetricSet::Recovery(m) => compute_recovery_score(m),
        RawMetricSet::Supplements(m) => compute_supplements_score(m),
        RawMetricSet::BodybuildingPerformance(m) => compute_performance_score(m),
    };

    debug!(
        section = %result.section_key,
        score = result.score,
        grade = %result.grade,
        "Scored section"
    );

    result
}
