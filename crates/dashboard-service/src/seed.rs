//! Demo data: one team, three wrestlers, one snapshot per section each.

use chrono::{DateTime, Duration, Utc};
use scoring_core::{
    BloodworkMetrics, BodyCompositionMetrics, Impact, OverviewMetrics, PerformanceMetrics,
    RawMetricSet, RecoveryMetrics, ScoreDriver, SupplementsMetrics,
};
use tracing::info;
use uuid::Uuid;

use crate::service::ScoringService;
use crate::store::MemoryMetricStore;
use crate::types::{Team, Wrestler, WrestlerStatus};
use crate::Result;

#[derive(Debug, Clone)]
pub struct SeededTeam {
    pub team: Team,
    pub wrestlers: Vec<Wrestler>,
}

fn demo_wrestlers(team_id: Uuid) -> Vec<Wrestler> {
    [
        ("Hassan Yazdani", "حسن یزدانی", 86, WrestlerStatus::CompetitionReady),
        ("Amirhossein Zare", "امیرحسین زارع", 125, WrestlerStatus::Normal),
        ("Rahman Amouzad", "رحمان عموزاد", 65, WrestlerStatus::Attention),
    ]
    .into_iter()
    .map(|(name_en, name_fa, weight_class, status)| Wrestler {
        id: Uuid::new_v4(),
        team_id: Some(team_id),
        name_en: name_en.to_string(),
        name_fa: name_fa.to_string(),
        weight_class,
        status,
    })
    .collect()
}

/// Snapshots for one wrestler. Body weight follows the weight class.
pub fn demo_snapshots(weight_class: u32) -> Vec<RawMetricSet> {
    vec![
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
        .into(),
        BodyCompositionMetrics {
            weight: f64::from(weight_class),
            body_fat_percent: 8.5,
            muscle_mass: 76.2,
            bmr: 2150.0,
            power_to_weight: 1.92,
            intracellular_water: Some(28.2),
            extracellular_water: Some(14.1),
            visceral_fat_level: Some(7.8),
            phase_angle: Some(7.2),
        }
        .into(),
        BloodworkMetrics {
            hemoglobin: 16.2,
            hematocrit: 47.5,
            testosterone: 720.0,
        }
        .into(),
        RecoveryMetrics {
            sleep_quality: 88.0,
            hrv_score: 72.0,
            fatigue_level: 22.0,
            hydration_level: 85.0,
            readiness_score: 87.0,
        }
        .into(),
        SupplementsMetrics {
            adherence_rate: 92.0,
            performance_corr: 0.85,
        }
        .into(),
        PerformanceMetrics {
            bench_max: 330.0,
            squat_max: 460.0,
            deadlift_max: 520.0,
            vo2max: 53.7,
            body_fat_percent: 13.5,
        }
        .into(),
    ]
}

fn overview_drivers() -> Vec<ScoreDriver> {
    vec![
        ScoreDriver::new("msi", Impact::Positive, 0.25),
        ScoreDriver::new("vo2max", Impact::Positive, 0.20),
        ScoreDriver::new("api", Impact::Negative, 0.10),
    ]
}

/// Populate `store` and score every snapshot through `service`.
///
/// `service` must be backed by the same store.
pub async fn seed_demo(
    store: &MemoryMetricStore,
    service: &ScoringService,
    now: DateTime<Utc>,
) -> Result<SeededTeam> {
    let team = Team {
        id: Uuid::new_v4(),
        name: "Iranian National Wrestling Team".to_string(),
    };
    store.insert_team(team.clone());

    let wrestlers = demo_wrestlers(team.id);
    for w in &wrestlers {
        store.insert_wrestler(w.clone());

        for (i, snapshot) in demo_snapshots(w.weight_class).into_iter().enumerate() {
            let drivers = match snapshot {
                RawMetricSet::Overview(_) => overview_drivers(),
                _ => Vec::new(),
            };
            // Stagger timestamps so "latest" is well defined
            let recorded_at = now - Duration::minutes(i as i64);
            service.ingest_at(w.id, snapshot, drivers, recorded_at).await?;
        }
    }

    info!(
        team = %team.name,
        wrestlers = wrestlers.len(),
        "Seeded demo data"
    );

    Ok(SeededTeam { team, wrestlers })
}
