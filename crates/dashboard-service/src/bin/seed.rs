//! Demo seeding binary.
//!
//! Seeds an in-memory store with a sample team, scores every snapshot and
//! prints the resulting dashboard views as JSON.
//!
//! Usage: `dashboard-seed [config-file]`

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;
use chrono::Utc;
use dashboard_service::logging::init_tracing;
use dashboard_service::seed::seed_demo;
use dashboard_service::{MemoryMetricStore, ScoringService, ServiceConfig, Viewer};
use scoring_core::SectionKey;
use serde_json::json;
use tracing::{info, warn};

#[tokio::main]
async fn main() -> Result<()> {
    let config = match std::env::args().nth(1).map(PathBuf::from) {
        Some(path) => ServiceConfig::load(Some(&path))?,
        None => ServiceConfig::from_env()?,
    };

    init_tracing(&config.log)?;
    info!(
        app_env = %config.app_env,
        production = config.is_production(),
        "Starting dashboard seed"
    );
    if config.is_production() && !config.log.json {
        warn!("Plain-text logging in production; set DASHBOARD__LOG__JSON=true");
    }

    let store = Arc::new(MemoryMetricStore::new());
    let service = ScoringService::new(store.clone(), config);
    let seeded = seed_demo(&store, &service, Utc::now()).await?;

    let coach = Viewer::coach(seeded.team.id);
    let mut athletes = Vec::with_capacity(seeded.wrestlers.len());
    for w in &seeded.wrestlers {
        let overall = service.overall(&coach, w.id).await?;
        info!(
            wrestler = %w.name_en,
            score = overall.score,
            grade = %overall.grade,
            "Overall score"
        );

        athletes.push(json!({
            "id": w.id,
            "name": w.name_en,
            "overall": overall,
            "domains": service.domain_scores(&coach, w.id).await?,
            "statusLabels": service.overview_status(&coach, w.id).await?,
            "explanation": service.explanation(&coach, w.id).await?,
            "recoveryTrend": service
                .section_trend(&coach, w.id, SectionKey::Recovery, None)
                .await?,
        }));
    }

    let report = json!({
        "team": seeded.team,
        "stats": service.team_stats(&coach, seeded.team.id).await?,
        "roster": service.team_roster(&coach, seeded.team.id, None, 0).await?,
        "athletes": athletes,
    });
    println!("{}", serde_json::to_string_pretty(&report)?);

    Ok(())
}
