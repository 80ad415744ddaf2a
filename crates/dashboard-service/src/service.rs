//! Score orchestration on top of a [`MetricStore`].
//!
//! Section scores are computed when a snapshot is ingested and stored with a
//! timestamp. The overall score is never stored; it is re-derived from the
//! latest section scores on every request.

use std::sync::Arc;

use chrono::{DateTime, NaiveDate, Utc};
use scoring_core::{
    compute_overall_score, default_drivers, score_section, Grade, OverviewStatusLabels,
    RawMetricSet, ScoreDriver, ScoreExplanation, SectionKey, SectionScore, SectionScores,
};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::access::{ensure_can_record, ensure_wrestler_access};
use crate::config::ServiceConfig;
use crate::store::MetricStore;
use crate::types::{MetricSnapshot, StoredSectionScore, Viewer, Wrestler};
use crate::{Error, Result};

/// Overall score with the date of the newest contributing section.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OverallReport {
    pub score: f64,
    pub grade: Grade,
    /// 1970-01-01 when no section has been scored.
    pub last_updated: NaiveDate,
}

/// Latest score per dashboard domain, 0 where nothing is recorded.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DomainScores {
    pub strength: f64,
    pub endurance: f64,
    pub recovery: f64,
    pub body_composition: f64,
    pub bloodwork: f64,
    pub supplements: f64,
}

impl From<&SectionScores> for DomainScores {
    fn from(scores: &SectionScores) -> Self {
        Self {
            strength: scores.bodybuilding_performance.unwrap_or(0.0),
            // The overview score stands in for endurance
            endurance: scores.overview.unwrap_or(0.0),
            recovery: scores.recovery.unwrap_or(0.0),
            body_composition: scores.body_composition.unwrap_or(0.0),
            bloodwork: scores.bloodwork.unwrap_or(0.0),
            supplements: scores.supplements.unwrap_or(0.0),
        }
    }
}

/// One dated value of a section trend.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TrendPoint {
    pub date: NaiveDate,
    pub value: f64,
}

pub struct ScoringService {
    store: Arc<dyn MetricStore>,
    config: ServiceConfig,
}

impl ScoringService {
    pub fn new(store: Arc<dyn MetricStore>, config: ServiceConfig) -> Self {
        Self { store, config }
    }

    pub fn config(&self) -> &ServiceConfig {
        &self.config
    }

    pub(crate) fn store(&self) -> &dyn MetricStore {
        self.store.as_ref()
    }

    /// Load a wrestler the viewer is allowed to see.
    async fn visible_wrestler(&self, viewer: &Viewer, wrestler_id: Uuid) -> Result<Wrestler> {
        let wrestler = self
            .store
            .wrestler(wrestler_id)
            .await?
            .ok_or_else(|| Error::not_found("Wrestler", wrestler_id))?;
        ensure_wrestler_access(viewer, &wrestler)?;
        Ok(wrestler)
    }

    /// Validate, store and score a new metric snapshot.
    ///
    /// `drivers` are stored alongside the resulting score as-is.
    pub async fn ingest(
        &self,
        viewer: &Viewer,
        wrestler_id: Uuid,
        metrics: RawMetricSet,
        drivers: Vec<ScoreDriver>,
    ) -> Result<StoredSectionScore> {
        ensure_can_record(viewer)?;
        self.visible_wrestler(viewer, wrestler_id).await?;
        self.ingest_at(wrestler_id, metrics, drivers, Utc::now())
            .await
    }

    /// Ingest with an explicit timestamp, bypassing access checks.
    ///
    /// Used for backfills and seeding.
    pub async fn ingest_at(
        &self,
        wrestler_id: Uuid,
        metrics: RawMetricSet,
        drivers: Vec<ScoreDriver>,
        recorded_at: DateTime<Utc>,
    ) -> Result<StoredSectionScore> {
        let section = metrics.section_key();
        if let Err(e) = metrics.validate() {
            warn!(%wrestler_id, %section, error = %e, "Rejected metric snapshot");
            return Err(e.into());
        }

        let score = score_section(&metrics);
        // Snapshot first: if the score write fails, rescore_latest can recover it
        self.store
            .record_metrics(wrestler_id, metrics, recorded_at)
            .await?;
        let stored = self
            .store
            .record_section_score(wrestler_id, score, drivers, recorded_at)
            .await?;

        info!(
            %wrestler_id,
            %section,
            score = score.score,
            grade = %score.grade,
            "Recorded section score"
        );
        Ok(stored)
    }

    /// Re-score the latest stored snapshot of a section.
    ///
    /// The new score keeps the snapshot's timestamp and the drivers of the
    /// score it supersedes. Returns `None` when the section has no snapshot yet.
    pub async fn rescore_latest(
        &self,
        wrestler_id: Uuid,
        section: SectionKey,
    ) -> Result<Option<StoredSectionScore>> {
        let Some(snapshot) = self.store.latest_metrics(wrestler_id, section).await? else {
            debug!(%wrestler_id, %section, "No snapshot to rescore");
            return Ok(None);
        };

        let drivers = match self.store.latest_section_score(wrestler_id, section).await? {
            Some(previous) => self.store.drivers_for(previous.id).await?,
            None => Vec::new(),
        };

        let score = score_section(&snapshot.metrics);
        let stored = self
            .store
            .record_section_score(wrestler_id, score, drivers, snapshot.recorded_at)
            .await?;
        debug!(%wrestler_id, %section, score = score.score, "Rescored latest snapshot");
        Ok(Some(stored))
    }

    /// Latest stored score for one section.
    pub async fn section_score(
        &self,
        viewer: &Viewer,
        wrestler_id: Uuid,
        section: SectionKey,
    ) -> Result<Option<SectionScore>> {
        self.visible_wrestler(viewer, wrestler_id).await?;
        Ok(self
            .store
            .latest_section_score(wrestler_id, section)
            .await?
            .map(|s| s.score))
    }

    /// Stored snapshots of one section, oldest first.
    ///
    /// `limit` defaults to `history.default_limit` and keeps the most recent
    /// snapshots.
    pub async fn metric_history(
        &self,
        viewer: &Viewer,
        wrestler_id: Uuid,
        section: SectionKey,
        limit: Option<usize>,
    ) -> Result<Vec<MetricSnapshot>> {
        self.visible_wrestler(viewer, wrestler_id).await?;
        let limit = limit.unwrap_or(self.config.history.default_limit);
        self.store.metric_history(wrestler_id, section, limit).await
    }

    /// Section score of each stored snapshot, oldest first.
    pub async fn section_trend(
        &self,
        viewer: &Viewer,
        wrestler_id: Uuid,
        section: SectionKey,
        limit: Option<usize>,
    ) -> Result<Vec<TrendPoint>> {
        let history = self
            .metric_history(viewer, wrestler_id, section, limit)
            .await?;

        Ok(history
            .iter()
            .map(|snapshot| TrendPoint {
                date: snapshot.recorded_at.date_naive(),
                value: score_section(&snapshot.metrics).score,
            })
            .collect())
    }

    /// Latest score of every section plus the newest timestamp among them.
    pub(crate) async fn latest_scores(
        &self,
        wrestler_id: Uuid,
    ) -> Result<(SectionScores, Option<DateTime<Utc>>)> {
        let mut scores = SectionScores::default();
        let mut newest: Option<DateTime<Utc>> = None;

        for section in SectionKey::ALL {
            if let Some(stored) = self.store.latest_section_score(wrestler_id, section).await? {
                scores.set(section, Some(stored.score.score));
                newest = newest.max(Some(stored.recorded_at));
            }
        }

        Ok((scores, newest))
    }

    pub async fn overall(&self, viewer: &Viewer, wrestler_id: Uuid) -> Result<OverallReport> {
        self.visible_wrestler(viewer, wrestler_id).await?;
        let (scores, newest) = self.latest_scores(wrestler_id).await?;
        let overall = compute_overall_score(&scores);

        Ok(OverallReport {
            score: overall.score,
            grade: overall.grade,
            last_updated: newest
                .map(|t| t.date_naive())
                .unwrap_or(DateTime::<Utc>::UNIX_EPOCH.date_naive()),
        })
    }

    pub async fn domain_scores(&self, viewer: &Viewer, wrestler_id: Uuid) -> Result<DomainScores> {
        self.visible_wrestler(viewer, wrestler_id).await?;
        let (scores, _) = self.latest_scores(wrestler_id).await?;
        Ok(DomainScores::from(&scores))
    }

    /// Drivers of the latest overview score, with configured fallbacks.
    pub async fn explanation(
        &self,
        viewer: &Viewer,
        wrestler_id: Uuid,
    ) -> Result<ScoreExplanation> {
        self.visible_wrestler(viewer, wrestler_id).await?;

        let mut drivers = match self
            .store
            .latest_section_score(wrestler_id, SectionKey::Overview)
            .await?
        {
            Some(stored) => self.store.drivers_for(stored.id).await?,
            None => Vec::new(),
        };

        if drivers.is_empty() && self.config.explanation.default_drivers {
            drivers = default_drivers();
        }

        Ok(ScoreExplanation {
            drivers,
            notes: self.config.explanation.notes.clone(),
        })
    }

    /// Status chips for the latest overview metrics.
    pub async fn overview_status(
        &self,
        viewer: &Viewer,
        wrestler_id: Uuid,
    ) -> Result<OverviewStatusLabels> {
        self.visible_wrestler(viewer, wrestler_id).await?;

        let labels = match self
            .store
            .latest_metrics(wrestler_id, SectionKey::Overview)
            .await?
        {
            Some(snapshot) => match &snapshot.metrics {
                RawMetricSet::Overview(m) => OverviewStatusLabels::from_metrics(m),
                other => {
                    return Err(Error::Storage {
                        message: format!(
                            "overview lookup returned a {} snapshot",
                            other.section_key()
                        ),
                    })
                }
            },
            None => OverviewStatusLabels::default(),
        };

        Ok(labels)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::{MemoryMetricStore, MockMetricStore};
    use crate::types::WrestlerStatus;
    use chrono::Duration;
    use scoring_core::{
        BloodworkMetrics, Impact, OverviewMetrics, RecoveryMetrics, StatusLabel,
    };

    fn wrestler(team_id: Option<Uuid>) -> Wrestler {
        Wrestler {
            id: Uuid::new_v4(),
            team_id,
            name_en: "Rahman Amouzad".to_string(),
            name_fa: "رحمان عموزاد".to_string(),
            weight_class: 65,
            status: WrestlerStatus::Attention,
        }
    }

    fn setup() -> (ScoringService, Arc<MemoryMetricStore>, Wrestler) {
        let store = Arc::new(MemoryMetricStore::new());
        let w = wrestler(Some(Uuid::new_v4()));
        store.insert_wrestler(w.clone());
        let service = ScoringService::new(store.clone(), ServiceConfig::default());
        (service, store, w)
    }

    fn bloodwork_ideal() -> RawMetricSet {
        BloodworkMetrics {
            hemoglobin: 16.0,
            hematocrit: 46.0,
            testosterone: 750.0,
        }
        .into()
    }

    fn recovery() -> RawMetricSet {
        RecoveryMetrics {
            sleep_quality: 90.0,
            hrv_score: 120.0,
            fatigue_level: 10.0,
            hydration_level: 90.0,
            readiness_score: 90.0,
        }
        .into()
    }

    fn overview() -> OverviewMetrics {
        OverviewMetrics {
            overall_score: 86.0,
            msi: 92.0,
            mes: 78.0,
            api: 420.0,
            vo2max: 55.0,
            frr: 84.0,
            acs: 72.0,
            bos: 4.0,
        }
    }

    #[tokio::test]
    async fn test_ingest_scores_and_stores() {
        let (service, _, w) = setup();
        let admin = Viewer::admin();

        let stored = service
            .ingest(&admin, w.id, bloodwork_ideal(), Vec::new())
            .await
            .unwrap();
        assert_eq!(stored.score.section_key, SectionKey::Bloodwork);
        assert_eq!(stored.score.score, 100.0);
        assert_eq!(stored.score.grade, Grade::Good);

        let fetched = service
            .section_score(&admin, w.id, SectionKey::Bloodwork)
            .await
            .unwrap();
        assert_eq!(fetched, Some(stored.score));
    }

    #[tokio::test]
    async fn test_ingest_rejects_out_of_range() {
        let (service, store, w) = setup();
        let bad: RawMetricSet = BloodworkMetrics {
            hemoglobin: 40.0,
            hematocrit: 46.0,
            testosterone: 750.0,
        }
        .into();

        let result = service.ingest(&Viewer::admin(), w.id, bad, Vec::new()).await;
        assert!(matches!(
            result,
            Err(Error::Scoring(scoring_core::Error::OutOfRange {
                metric: "hemoglobin",
                ..
            }))
        ));
        assert!(store
            .latest_metrics(w.id, SectionKey::Bloodwork)
            .await
            .unwrap()
            .is_none());
    }

    #[tokio::test]
    async fn test_athlete_cannot_ingest() {
        let (service, _, w) = setup();
        let result = service
            .ingest(&Viewer::athlete(w.id), w.id, recovery(), Vec::new())
            .await;
        assert!(matches!(result, Err(Error::AccessDenied { .. })));
    }

    #[tokio::test]
    async fn test_unknown_wrestler() {
        let (service, _, _) = setup();
        let result = service.overall(&Viewer::admin(), Uuid::new_v4()).await;
        assert!(matches!(result, Err(Error::NotFound { entity: "Wrestler", .. })));
    }

    #[tokio::test]
    async fn test_overall_without_scores() {
        let (service, _, w) = setup();
        let report = service.overall(&Viewer::athlete(w.id), w.id).await.unwrap();
        assert_eq!(report.score, 0.0);
        assert_eq!(report.grade, Grade::Bad);
        assert_eq!(report.last_updated, NaiveDate::from_ymd_opt(1970, 1, 1).unwrap());
    }

    #[tokio::test]
    async fn test_overall_uses_latest_and_newest_date() {
        let (service, _, w) = setup();
        let day1 = Utc::now() - Duration::days(10);
        let day2 = Utc::now() - Duration::days(2);

        service
            .ingest_at(w.id, bloodwork_ideal(), Vec::new(), day1)
            .await
            .unwrap();
        service
            .ingest_at(w.id, recovery(), Vec::new(), day2)
            .await
            .unwrap();

        let report = service.overall(&Viewer::admin(), w.id).await.unwrap();
        // bloodwork 100 (w .15) and recovery 84 (w .20) -> 90.857
        assert_eq!(report.score, 90.9);
        assert_eq!(report.grade, Grade::Good);
        assert_eq!(report.last_updated, day2.date_naive());
    }

    #[tokio::test]
    async fn test_domain_scores_default_to_zero() {
        let (service, _, w) = setup();
        service
            .ingest_at(w.id, recovery(), Vec::new(), Utc::now())
            .await
            .unwrap();

        let domains = service.domain_scores(&Viewer::admin(), w.id).await.unwrap();
        assert_eq!(domains.recovery, 84.0);
        assert_eq!(domains.strength, 0.0);
        assert_eq!(domains.endurance, 0.0);

        let json = serde_json::to_value(domains).unwrap();
        assert_eq!(json["bodyComposition"], 0.0);
    }

    #[tokio::test]
    async fn test_explanation_prefers_stored_drivers() {
        let (service, _, w) = setup();
        let drivers = vec![
            ScoreDriver::new("msi", Impact::Positive, 0.4),
            ScoreDriver::new("fatigueLevel", Impact::Negative, 0.1),
        ];
        service
            .ingest_at(w.id, overview().into(), drivers.clone(), Utc::now())
            .await
            .unwrap();

        let explanation = service.explanation(&Viewer::admin(), w.id).await.unwrap();
        assert_eq!(explanation.drivers, drivers);
        assert_eq!(
            explanation.notes,
            scoring_core::driver::DEFAULT_EXPLANATION_NOTES
        );
    }

    #[tokio::test]
    async fn test_explanation_fallback() {
        let (service, _, w) = setup();
        let explanation = service.explanation(&Viewer::admin(), w.id).await.unwrap();
        assert_eq!(explanation.drivers, default_drivers());

        let store = Arc::new(MemoryMetricStore::new());
        store.insert_wrestler(w.clone());
        let mut config = ServiceConfig::default();
        config.explanation.default_drivers = false;
        let strict = ScoringService::new(store, config);
        let explanation = strict.explanation(&Viewer::admin(), w.id).await.unwrap();
        assert!(explanation.drivers.is_empty());
    }

    #[tokio::test]
    async fn test_overview_status() {
        let (service, _, w) = setup();
        let empty = service.overview_status(&Viewer::admin(), w.id).await.unwrap();
        assert_eq!(empty, OverviewStatusLabels::default());

        service
            .ingest_at(w.id, overview().into(), Vec::new(), Utc::now())
            .await
            .unwrap();
        let labels = service.overview_status(&Viewer::admin(), w.id).await.unwrap();
        assert_eq!(labels.msi, StatusLabel::Good);
        assert_eq!(labels.api, StatusLabel::Bad);
    }

    #[tokio::test]
    async fn test_rescore_latest() {
        let (service, _, w) = setup();
        assert!(service
            .rescore_latest(w.id, SectionKey::Recovery)
            .await
            .unwrap()
            .is_none());

        service
            .ingest_at(w.id, recovery(), Vec::new(), Utc::now() - Duration::hours(1))
            .await
            .unwrap();
        let rescored = service
            .rescore_latest(w.id, SectionKey::Recovery)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(rescored.score.score, 84.0);
    }

    #[tokio::test]
    async fn test_rescore_keeps_drivers_and_timestamp() {
        let (service, _, w) = setup();
        let admin = Viewer::admin();
        let recorded_at = Utc::now() - Duration::days(30);
        let drivers = vec![ScoreDriver::new("msi", Impact::Positive, 0.4)];

        service
            .ingest_at(w.id, overview().into(), drivers.clone(), recorded_at)
            .await
            .unwrap();
        let before = service.overall(&admin, w.id).await.unwrap();

        let rescored = service
            .rescore_latest(w.id, SectionKey::Overview)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(rescored.recorded_at, recorded_at);

        let explanation = service.explanation(&admin, w.id).await.unwrap();
        assert_eq!(explanation.drivers, drivers);

        let after = service.overall(&admin, w.id).await.unwrap();
        assert_eq!(after.last_updated, before.last_updated);
        assert_eq!(after.last_updated, recorded_at.date_naive());
    }

    #[tokio::test]
    async fn test_metric_history_and_trend() {
        let (service, _, w) = setup();
        let now = Utc::now();

        for (days_ago, fatigue_level) in [(2, 35.0), (6, 10.0), (0, 60.0)] {
            let metrics = RecoveryMetrics {
                sleep_quality: 90.0,
                hrv_score: 120.0,
                fatigue_level,
                hydration_level: 90.0,
                readiness_score: 90.0,
            };
            service
                .ingest_at(w.id, metrics.into(), Vec::new(), now - Duration::days(days_ago))
                .await
                .unwrap();
        }

        let athlete = Viewer::athlete(w.id);
        let history = service
            .metric_history(&athlete, w.id, SectionKey::Recovery, None)
            .await
            .unwrap();
        assert_eq!(history.len(), 3);
        assert!(history
            .windows(2)
            .all(|pair| pair[0].recorded_at <= pair[1].recorded_at));

        let trend = service
            .section_trend(&athlete, w.id, SectionKey::Recovery, Some(2))
            .await
            .unwrap();
        let values: Vec<_> = trend.iter().map(|p| p.value).collect();
        assert_eq!(values, vec![79.0, 74.0]);
        assert_eq!(trend[1].date, now.date_naive());

        let stranger = Viewer::athlete(Uuid::new_v4());
        assert!(matches!(
            service
                .metric_history(&stranger, w.id, SectionKey::Recovery, None)
                .await,
            Err(Error::AccessDenied { .. })
        ));
    }

    #[tokio::test]
    async fn test_store_errors_propagate() {
        let w = wrestler(None);
        let mut store = MockMetricStore::new();
        let returned = w.clone();
        store
            .expect_wrestler()
            .returning(move |_| Ok(Some(returned.clone())));
        store.expect_latest_section_score().returning(|_, _| {
            Err(Error::Storage {
                message: "connection reset".to_string(),
            })
        });

        let service = ScoringService::new(Arc::new(store), ServiceConfig::default());
        let result = service.overall(&Viewer::admin(), w.id).await;
        assert!(matches!(result, Err(Error::Storage { .. })));
    }

    #[tokio::test]
    async fn test_mismatched_overview_snapshot_is_storage_error() {
        let w = wrestler(None);
        let mut store = MockMetricStore::new();
        let returned = w.clone();
        store
            .expect_wrestler()
            .returning(move |_| Ok(Some(returned.clone())));
        let wrestler_id = w.id;
        store.expect_latest_metrics().returning(move |_, _| {
            Ok(Some(crate::types::MetricSnapshot {
                id: Uuid::new_v4(),
                wrestler_id,
                metrics: recovery(),
                recorded_at: Utc::now(),
            }))
        });

        let service = ScoringService::new(Arc::new(store), ServiceConfig::default());
        let result = service.overview_status(&Viewer::admin(), w.id).await;
        assert!(matches!(result, Err(Error::Storage { .. })));
    }
}
