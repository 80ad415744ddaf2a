//! Athlete Dashboard: scoring backend for wrestler performance tracking.
//!
//! This is the root crate that provides benchmark and integration-test access
//! to the workspace crates. For actual functionality, use them directly:
//!
//! - `scoring-core`: metric normalization, section scoring, grading, overall aggregation
//! - `dashboard-service`: storage seam, access checks, score orchestration, team views

pub use dashboard_service as service;
pub use scoring_core as scoring;
