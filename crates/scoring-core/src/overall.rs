//! Overall score aggregation across sections.
//!
//! Sections without data are skipped and the remaining base weights are
//! rescaled to sum to 1.0, so a wrestler with no bloodwork on file is not
//! dragged toward zero.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::grade::{grade, Grade};
use crate::normalize::round1;
use crate::section::{SectionKey, SectionScore};

/// Base weights used when every section is present.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OverallWeights {
    pub overview: f64,
    pub body_composition: f64,
    pub bloodwork: f64,
    pub recovery: f64,
    pub supplements: f64,
    pub bodybuilding_performance: f64,
}

impl OverallWeights {
    pub const DEFAULT: Self = Self {
        overview: 0.15,
        body_composition: 0.20,
        bloodwork: 0.15,
        recovery: 0.20,
        supplements: 0.10,
        bodybuilding_performance: 0.20,
    };

    pub fn for_section(&self, key: SectionKey) -> f64 {
        match key {
            SectionKey::Overview => self.overview,
            SectionKey::BodyComposition => self.body_composition,
            SectionKey::Bloodwork => self.bloodwork,
            SectionKey::Recovery => self.recovery,
            SectionKey::Supplements => self.supplements,
            SectionKey::BodybuildingPerformance => self.bodybuilding_performance,
        }
    }

    pub fn total(&self) -> f64 {
        SectionKey::ALL.iter().map(|k| self.for_section(*k)).sum()
    }
}

/// Latest score per section, `None` where the section has no data.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct SectionScores {
    pub overview: Option<f64>,
    pub body_composition: Option<f64>,
    pub bloodwork: Option<f64>,
    pub recovery: Option<f64>,
    pub supplements: Option<f64>,
    pub bodybuilding_performance: Option<f64>,
}

impl SectionScores {
    pub fn get(&self, key: SectionKey) -> Option<f64> {
        match key {
            SectionKey::Overview => self.overview,
            SectionKey::BodyComposition => self.body_composition,
            SectionKey::Bloodwork => self.bloodwork,
            SectionKey::Recovery => self.recovery,
            SectionKey::Supplements => self.supplements,
            SectionKey::BodybuildingPerformance => self.bodybuilding_performance,
        }
    }

    pub fn set(&mut self, key: SectionKey, score: Option<f64>) {
        let slot = match key {
            SectionKey::Overview => &mut self.overview,
            SectionKey::BodyComposition => &mut self.body_composition,
            SectionKey::Bloodwork => &mut self.bloodwork,
            SectionKey::Recovery => &mut self.recovery,
            SectionKey::Supplements => &mut self.supplements,
            SectionKey::BodybuildingPerformance => &mut self.bodybuilding_performance,
        };
        *slot = score;
    }

    /// Present sections with their scores, in canonical order.
    pub fn present(&self) -> impl Iterator<Item = (SectionKey, f64)> + '_ {
        SectionKey::ALL
            .into_iter()
            .filter_map(|key| self.get(key).map(|score| (key, score)))
    }

    pub fn is_empty(&self) -> bool {
        self.present().next().is_none()
    }
}

impl FromIterator<SectionScore> for SectionScores {
    fn from_iter<I: IntoIterator<Item = SectionScore>>(iter: I) -> Self {
        let mut scores = SectionScores::default();
        for s in iter {
            scores.set(s.section_key, Some(s.score));
        }
        scores
    }
}

/// Overall score and grade. Always derived, never stored.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OverallScore {
    pub score: f64,
    pub grade: Grade,
}

impl OverallScore {
    /// Result when no section has data.
    pub const EMPTY: Self = Self {
        score: 0.0,
        grade: Grade::Bad,
    };
}

/// Combine whichever section scores are present into an overall score.
pub fn compute_overall_score(scores: &SectionScores) -> OverallScore {
    compute_overall_score_with(scores, &OverallWeights::DEFAULT)
}

/// Same as [`compute_overall_score`] with explicit base weights.
pub fn compute_overall_score_with(scores: &SectionScores, weights: &OverallWeights) -> OverallScore {
    let total_weight: f64 = scores
        .present()
        .map(|(key, _)| weights.for_section(key))
        .sum();

    if total_weight <= 0.0 {
        return OverallScore::EMPTY;
    }

    let weighted: f64 = scores
        .present()
        .map(|(key, score)| score * (weights.for_section(key) / total_weight))
        .sum();

    let score = round1(weighted);
    debug!(
        sections = scores.present().count(),
        score,
        "Computed overall score"
    );

    OverallScore {
        score,
        grade: grade(score),
    }
}
