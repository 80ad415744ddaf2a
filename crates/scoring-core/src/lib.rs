//! Scoring Core
//!
//! Deterministic normalization, section scoring and grading for wrestler
//! performance metrics. Every function is pure and total, so it can be called
//! from any number of request handlers without coordination.

pub mod driver;
pub mod error;
pub mod grade;
pub mod metrics;
pub mod normalize;
pub mod overall;
pub mod section;
pub mod status;

pub use driver::{default_drivers, Impact, ScoreDriver, ScoreExplanation};
pub use error::{Error, Result};
pub use grade::{grade, status_label, Grade, StatusLabel};
pub use metrics::{
    BloodworkMetrics, BodyCompositionMetrics, OverviewMetrics, PerformanceMetrics,
    RawMetricSet, RecoveryMetrics, SupplementsMetrics,
};
pub use normalize::{normalize_metric, Normalization};
pub use overall::{compute_overall_score, OverallScore, OverallWeights, SectionScores};
pub use section::{
    compute_bloodwork_score, compute_body_composition_score, compute_overview_score,
    compute_performance_score, compute_recovery_score, compute_supplements_score,
    score_section, SectionKey, SectionScore,
};
pub use status::OverviewStatusLabels;
