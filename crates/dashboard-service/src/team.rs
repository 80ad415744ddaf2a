//! Team statistics and roster cards for coaches and admins.

use scoring_core::SectionKey;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::access::ensure_team_access;
use crate::service::ScoringService;
use crate::types::{Team, Viewer, WrestlerStatus};
use crate::{Error, Result};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TeamStats {
    pub total_athletes: usize,
    /// Mean of the latest overview score of each scored athlete.
    pub average_score: f64,
    pub competition_ready: usize,
    pub needs_attention: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InsightKind {
    Success,
    Warning,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AthleteInsight {
    pub label: String,
    #[serde(rename = "type")]
    pub kind: InsightKind,
}

impl AthleteInsight {
    fn for_status(status: WrestlerStatus) -> Option<Self> {
        let (label, kind) = match status {
            WrestlerStatus::CompetitionReady => ("Competition Ready", InsightKind::Success),
            WrestlerStatus::Attention => ("Needs Attention", InsightKind::Warning),
            WrestlerStatus::Normal => return None,
        };
        Some(Self {
            label: label.to_string(),
            kind,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AthleteCard {
    pub id: Uuid,
    pub name_fa: String,
    pub weight_class: u32,
    /// Latest overview score, 0 when none is recorded.
    pub overall_score: f64,
    pub insights: Vec<AthleteInsight>,
}

impl ScoringService {
    async fn visible_team(&self, viewer: &Viewer, team_id: Uuid) -> Result<Team> {
        let team = self
            .store()
            .team(team_id)
            .await?
            .ok_or_else(|| Error::not_found("Team", team_id))?;
        ensure_team_access(viewer, team_id)?;
        Ok(team)
    }

    pub async fn team_stats(&self, viewer: &Viewer, team_id: Uuid) -> Result<TeamStats> {
        self.visible_team(viewer, team_id).await?;
        let wrestlers = self.store().team_wrestlers(team_id).await?;

        let mut overview_scores = Vec::with_capacity(wrestlers.len());
        for w in &wrestlers {
            if let Some(stored) = self
                .store()
                .latest_section_score(w.id, SectionKey::Overview)
                .await?
            {
                overview_scores.push(stored.score.score);
            }
        }

        let average_score = if overview_scores.is_empty() {
            0.0
        } else {
            let mean = overview_scores.iter().sum::<f64>() / overview_scores.len() as f64;
            scoring_core::normalize::round1(mean)
        };

        Ok(TeamStats {
            total_athletes: wrestlers.len(),
            average_score,
            competition_ready: wrestlers
                .iter()
                .filter(|w| w.status == WrestlerStatus::CompetitionReady)
                .count(),
            needs_attention: wrestlers
                .iter()
                .filter(|w| w.status == WrestlerStatus::Attention)
                .count(),
        })
    }

    /// One page of roster cards. `limit` is clamped to the configured maximum.
    pub async fn team_roster(
        &self,
        viewer: &Viewer,
        team_id: Uuid,
        limit: Option<usize>,
        offset: usize,
    ) -> Result<Vec<AthleteCard>> {
        self.visible_team(viewer, team_id).await?;

        let roster = &self.config().roster;
        let limit = limit
            .unwrap_or(roster.default_limit)
            .clamp(1, roster.max_limit);

        let wrestlers = self.store().team_wrestlers(team_id).await?;
        let mut cards = Vec::new();
        for w in wrestlers.into_iter().skip(offset).take(limit) {
            let overall_score = self
                .store()
                .latest_section_score(w.id, SectionKey::Overview)
                .await?
                .map(|s| s.score.score)
                .unwrap_or(0.0);

            cards.push(AthleteCard {
                id: w.id,
                name_fa: w.name_fa,
                weight_class: w.weight_class,
                overall_score,
                insights: AthleteInsight::for_status(w.status).into_iter().collect(),
            });
        }

        Ok(cards)
    }
}
