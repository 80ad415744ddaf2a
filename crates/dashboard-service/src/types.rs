//! Domain records owned by the service layer.

use chrono::{DateTime, Utc};
use scoring_core::{RawMetricSet, SectionScore};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    Coach,
    Athlete,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WrestlerStatus {
    CompetitionReady,
    #[default]
    Normal,
    Attention,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Team {
    pub id: Uuid,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Wrestler {
    pub id: Uuid,
    pub team_id: Option<Uuid>,
    pub name_en: String,
    pub name_fa: String,
    /// Competition weight class in kg.
    pub weight_class: u32,
    pub status: WrestlerStatus,
}

/// The caller on whose behalf data is read or written.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Viewer {
    pub role: Role,
    pub team_id: Option<Uuid>,
    pub wrestler_id: Option<Uuid>,
}

impl Viewer {
    pub fn admin() -> Self {
        Self {
            role: Role::Admin,
            team_id: None,
            wrestler_id: None,
        }
    }

    pub fn coach(team_id: Uuid) -> Self {
        Self {
            role: Role::Coach,
            team_id: Some(team_id),
            wrestler_id: None,
        }
    }

    pub fn athlete(wrestler_id: Uuid) -> Self {
        Self {
            role: Role::Athlete,
            team_id: None,
            wrestler_id: Some(wrestler_id),
        }
    }
}

/// A raw metric snapshot as stored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricSnapshot {
    pub id: Uuid,
    pub wrestler_id: Uuid,
    pub metrics: RawMetricSet,
    pub recorded_at: DateTime<Utc>,
}

/// A computed section score as stored, with its timestamp.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredSectionScore {
    pub id: Uuid,
    pub wrestler_id: Uuid,
    pub score: SectionScore,
    pub recorded_at: DateTime<Utc>,
}
