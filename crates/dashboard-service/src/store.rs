//! Storage seam for wrestlers, metric snapshots and section scores.
//!
//! The service only talks to [`MetricStore`]. A database-backed implementation
//! lives outside this crate; [`MemoryMetricStore`] backs the demo binary and
//! tests.

use chrono::{DateTime, Utc};
use dashmap::DashMap;
use scoring_core::{RawMetricSet, ScoreDriver, SectionKey, SectionScore};
use uuid::Uuid;

use crate::types::{MetricSnapshot, StoredSectionScore, Team, Wrestler};
use crate::Result;

#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait MetricStore: Send + Sync {
    async fn team(&self, team_id: Uuid) -> Result<Option<Team>>;

    async fn wrestler(&self, wrestler_id: Uuid) -> Result<Option<Wrestler>>;

    /// Wrestlers on a team, in roster order.
    async fn team_wrestlers(&self, team_id: Uuid) -> Result<Vec<Wrestler>>;

    async fn record_metrics(
        &self,
        wrestler_id: Uuid,
        metrics: RawMetricSet,
        recorded_at: DateTime<Utc>,
    ) -> Result<MetricSnapshot>;

    /// Most recent snapshot for one section.
    async fn latest_metrics(
        &self,
        wrestler_id: Uuid,
        section: SectionKey,
    ) -> Result<Option<MetricSnapshot>>;

    /// Up to `limit` most recent snapshots for one section, oldest first.
    async fn metric_history(
        &self,
        wrestler_id: Uuid,
        section: SectionKey,
        limit: usize,
    ) -> Result<Vec<MetricSnapshot>>;

    async fn record_section_score(
        &self,
        wrestler_id: Uuid,
        score: SectionScore,
        drivers: Vec<ScoreDriver>,
        recorded_at: DateTime<Utc>,
    ) -> Result<StoredSectionScore>;

    /// Most recent score for one section.
    async fn latest_section_score(
        &self,
        wrestler_id: Uuid,
        section: SectionKey,
    ) -> Result<Option<StoredSectionScore>>;

    async fn drivers_for(&self, score_id: Uuid) -> Result<Vec<ScoreDriver>>;
}

/// In-memory store keyed by (wrestler, section).
#[derive(Default)]
pub struct MemoryMetricStore {
    teams: DashMap<Uuid, Team>,
    wrestlers: DashMap<Uuid, Wrestler>,
    roster: DashMap<Uuid, Vec<Uuid>>,
    snapshots: DashMap<(Uuid, SectionKey), Vec<MetricSnapshot>>,
    scores: DashMap<(Uuid, SectionKey), Vec<StoredSectionScore>>,
    drivers: DashMap<Uuid, Vec<ScoreDriver>>,
}

impl MemoryMetricStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert_team(&self, team: Team) {
        self.teams.insert(team.id, team);
    }

    pub fn insert_wrestler(&self, wrestler: Wrestler) {
        if let Some(team_id) = wrestler.team_id {
            self.roster.entry(team_id).or_default().push(wrestler.id);
        }
        self.wrestlers.insert(wrestler.id, wrestler);
    }
}

/// Latest entry by timestamp; on ties the one inserted last wins.
fn latest_by<T: Clone>(items: &[T], recorded_at: impl Fn(&T) -> DateTime<Utc>) -> Option<T> {
    items.iter().max_by_key(|item| recorded_at(item)).cloned()
}

#[async_trait::async_trait]
impl MetricStore for MemoryMetricStore {
    async fn team(&self, team_id: Uuid) -> Result<Option<Team>> {
        Ok(self.teams.get(&team_id).map(|t| t.clone()))
    }

    async fn wrestler(&self, wrestler_id: Uuid) -> Result<Option<Wrestler>> {
        Ok(self.wrestlers.get(&wrestler_id).map(|w| w.clone()))
    }

    async fn team_wrestlers(&self, team_id: Uuid) -> Result<Vec<Wrestler>> {
        let ids = self
            .roster
            .get(&team_id)
            .map(|ids| ids.clone())
            .unwrap_or_default();

        Ok(ids
            .iter()
            .filter_map(|id| self.wrestlers.get(id).map(|w| w.clone()))
            .collect())
    }

    async fn record_metrics(
        &self,
        wrestler_id: Uuid,
        metrics: RawMetricSet,
        recorded_at: DateTime<Utc>,
    ) -> Result<MetricSnapshot> {
        let snapshot = MetricSnapshot {
            id: Uuid::new_v4(),
            wrestler_id,
            metrics,
            recorded_at,
        };

        self.snapshots
            .entry((wrestler_id, snapshot.metrics.section_key()))
            .or_default()
            .push(snapshot.clone());

        Ok(snapshot)
    }

    async fn latest_metrics(
        &self,
        wrestler_id: Uuid,
        section: SectionKey,
    ) -> Result<Option<MetricSnapshot>> {
        Ok(self
            .snapshots
            .get(&(wrestler_id, section))
            .and_then(|items| latest_by(&items, |s| s.recorded_at)))
    }

    async fn metric_history(
        &self,
        wrestler_id: Uuid,
        section: SectionKey,
        limit: usize,
    ) -> Result<Vec<MetricSnapshot>> {
        let mut items = self
            .snapshots
            .get(&(wrestler_id, section))
            .map(|items| items.clone())
            .unwrap_or_default();

        // Stable sort keeps insertion order among equal timestamps
        items.sort_by_key(|s| s.recorded_at);
        let skip = items.len().saturating_sub(limit);
        Ok(items.split_off(skip))
    }

    async fn record_section_score(
        &self,
        wrestler_id: Uuid,
        score: SectionScore,
        drivers: Vec<ScoreDriver>,
        recorded_at: DateTime<Utc>,
    ) -> Result<StoredSectionScore> {
        let stored = StoredSectionScore {
            id: Uuid::new_v4(),
            wrestler_id,
            score,
            recorded_at,
        };

        if !drivers.is_empty() {
            self.drivers.insert(stored.id, drivers);
        }
        self.scores
            .entry((wrestler_id, score.section_key))
            .or_default()
            .push(stored.clone());

        Ok(stored)
    }

    async fn latest_section_score(
        &self,
        wrestler_id: Uuid,
        section: SectionKey,
    ) -> Result<Option<StoredSectionScore>> {
        Ok(self
            .scores
            .get(&(wrestler_id, section))
            .and_then(|items| latest_by(&items, |s| s.recorded_at)))
    }

    async fn drivers_for(&self, score_id: Uuid) -> Result<Vec<ScoreDriver>> {
        Ok(self
            .drivers
            .get(&score_id)
            .map(|d| d.clone())
            .unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use scoring_core::{Impact, SupplementsMetrics};

    use crate::types::WrestlerStatus;

    fn supplements(adherence_rate: f64) -> RawMetricSet {
        SupplementsMetrics {
            adherence_rate,
            performance_corr: 0.5,
        }
        .into()
    }

    #[tokio::test]
    async fn test_latest_metrics_by_timestamp() {
        let store = MemoryMetricStore::new();
        let wrestler_id = Uuid::new_v4();
        let now = Utc::now();

        store
            .record_metrics(wrestler_id, supplements(90.0), now)
            .await
            .unwrap();
        // Backfilled older snapshot must not shadow the newer one
        store
            .record_metrics(wrestler_id, supplements(40.0), now - Duration::days(3))
            .await
            .unwrap();

        let latest = store
            .latest_metrics(wrestler_id, SectionKey::Supplements)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(latest.metrics, supplements(90.0));

        assert!(store
            .latest_metrics(wrestler_id, SectionKey::Recovery)
            .await
            .unwrap()
            .is_none());
    }

    #[tokio::test]
    async fn test_section_scores_and_drivers() {
        let store = MemoryMetricStore::new();
        let wrestler_id = Uuid::new_v4();
        let score = SectionScore::from_weighted(SectionKey::Overview, 86.0);
        let drivers = vec![ScoreDriver::new("vo2max", Impact::Positive, 0.3)];

        let stored = store
            .record_section_score(wrestler_id, score, drivers.clone(), Utc::now())
            .await
            .unwrap();

        let latest = store
            .latest_section_score(wrestler_id, SectionKey::Overview)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(latest.id, stored.id);
        assert_eq!(store.drivers_for(stored.id).await.unwrap(), drivers);
        assert!(store.drivers_for(Uuid::new_v4()).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_metric_history_chronological_and_limited() {
        let store = MemoryMetricStore::new();
        let wrestler_id = Uuid::new_v4();
        let now = Utc::now();

        // Recorded out of order on purpose
        for (days_ago, adherence) in [(1, 80.0), (5, 40.0), (3, 60.0), (0, 90.0)] {
            store
                .record_metrics(
                    wrestler_id,
                    supplements(adherence),
                    now - Duration::days(days_ago),
                )
                .await
                .unwrap();
        }

        let all = store
            .metric_history(wrestler_id, SectionKey::Supplements, 30)
            .await
            .unwrap();
        let values: Vec<_> = all.iter().map(|s| s.metrics.clone()).collect();
        assert_eq!(
            values,
            vec![
                supplements(40.0),
                supplements(60.0),
                supplements(80.0),
                supplements(90.0)
            ]
        );

        let recent = store
            .metric_history(wrestler_id, SectionKey::Supplements, 2)
            .await
            .unwrap();
        assert_eq!(recent.len(), 2);
        assert_eq!(recent[0].metrics, supplements(80.0));
        assert_eq!(recent[1].metrics, supplements(90.0));

        assert!(store
            .metric_history(wrestler_id, SectionKey::Supplements, 0)
            .await
            .unwrap()
            .is_empty());
        assert!(store
            .metric_history(wrestler_id, SectionKey::Recovery, 30)
            .await
            .unwrap()
            .is_empty());
    }

    #[test]
    fn test_unknown_ids_are_none() {
        let store = MemoryMetricStore::new();
        assert!(tokio_test::block_on(store.wrestler(Uuid::new_v4()))
            .unwrap()
            .is_none());
        assert!(tokio_test::block_on(store.team(Uuid::new_v4()))
            .unwrap()
            .is_none());
    }

    #[tokio::test]
    async fn test_team_roster_order() {
        let store = MemoryMetricStore::new();
        let team_id = Uuid::new_v4();
        store.insert_team(Team {
            id: team_id,
            name: "National Team".to_string(),
        });

        let mut ids = Vec::new();
        for (name, weight_class) in [("A", 65), ("B", 86), ("C", 125)] {
            let wrestler = Wrestler {
                id: Uuid::new_v4(),
                team_id: Some(team_id),
                name_en: name.to_string(),
                name_fa: name.to_string(),
                weight_class,
                status: WrestlerStatus::Normal,
            };
            ids.push(wrestler.id);
            store.insert_wrestler(wrestler);
        }

        let roster = store.team_wrestlers(team_id).await.unwrap();
        let roster_ids: Vec<_> = roster.iter().map(|w| w.id).collect();
        assert_eq!(roster_ids, ids);
        assert!(store.team(team_id).await.unwrap().is_some());
        assert!(store.team_wrestlers(Uuid::new_v4()).await.unwrap().is_empty());
    }
}
