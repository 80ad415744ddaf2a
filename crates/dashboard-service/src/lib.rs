//! Dashboard Service
//!
//! Storage seams, access checks and orchestration around the scoring engine:
//! ingesting metric snapshots, recording section scores, and deriving overall
//! scores, explanations and team views on demand.

pub mod access;
pub mod config;
pub mod error;
pub mod logging;
pub mod seed;
pub mod service;
pub mod store;
pub mod team;
pub mod types;

pub use config::ServiceConfig;
pub use error::{Error, Result};
pub use service::{DomainScores, OverallReport, ScoringService, TrendPoint};
pub use store::{MemoryMetricStore, MetricStore};
pub use team::{AthleteCard, TeamStats};
pub use types::{Role, Team, Viewer, Wrestler, WrestlerStatus};
