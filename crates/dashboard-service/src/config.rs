//! Service configuration.
//!
//! Layered as defaults, then an optional file, then `DASHBOARD__*` environment
//! variables (`DASHBOARD__ROSTER__MAX_LIMIT=200`). Built once at startup and
//! passed to the service explicitly.

use std::path::Path;

use serde::Deserialize;

use crate::{Error, Result};

pub const DEFAULT_LOG_FILTER: &str = "dashboard_service=info,scoring_core=info";

#[derive(Debug, Clone, Deserialize)]
pub struct ServiceConfig {
    pub app_env: String,
    pub log: LogConfig,
    pub roster: RosterConfig,
    pub history: HistoryConfig,
    pub explanation: ExplanationConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LogConfig {
    /// `EnvFilter` directives used when `RUST_LOG` is unset.
    pub filter: String,
    pub json: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RosterConfig {
    pub default_limit: usize,
    pub max_limit: usize,
}

#[derive(Debug, Clone, Deserialize)]
pub struct HistoryConfig {
    /// Points returned by history queries when no limit is given.
    pub default_limit: usize,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ExplanationConfig {
    /// Fall back to the stock driver list when a score has none on file.
    pub default_drivers: bool,
    pub notes: String,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            app_env: "development".to_string(),
            log: LogConfig {
                filter: DEFAULT_LOG_FILTER.to_string(),
                json: false,
            },
            roster: RosterConfig {
                default_limit: 50,
                max_limit: 100,
            },
            history: HistoryConfig { default_limit: 30 },
            explanation: ExplanationConfig {
                default_drivers: true,
                notes: scoring_core::driver::DEFAULT_EXPLANATION_NOTES.to_string(),
            },
        }
    }
}

impl ServiceConfig {
    /// Load configuration from environment variables (and `.env`).
    pub fn from_env() -> Result<Self> {
        Self::load(None)
    }

    /// Load configuration, optionally layering a config file under the
    /// environment.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        dotenvy::dotenv().ok();

        let defaults = Self::default();
        let mut builder = config::Config::builder()
            .set_default("app_env", defaults.app_env)?
            .set_default("log.filter", defaults.log.filter)?
            .set_default("log.json", defaults.log.json)?
            .set_default("roster.default_limit", defaults.roster.default_limit as i64)?
            .set_default("roster.max_limit", defaults.roster.max_limit as i64)?
            .set_default("history.default_limit", defaults.history.default_limit as i64)?
            .set_default("explanation.default_drivers", defaults.explanation.default_drivers)?
            .set_default("explanation.notes", defaults.explanation.notes)?;

        if let Some(path) = path {
            builder = builder.add_source(config::File::from(path));
        }

        let config: Self = builder
            .add_source(
                config::Environment::with_prefix("DASHBOARD")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()?;

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.roster.default_limit == 0 {
            return Err(Error::Config {
                message: "roster.default_limit must be at least 1".to_string(),
            });
        }
        if self.roster.default_limit > self.roster.max_limit {
            return Err(Error::Config {
                message: format!(
                    "roster.default_limit ({}) exceeds roster.max_limit ({})",
                    self.roster.default_limit, self.roster.max_limit
                ),
            });
        }
        if self.history.default_limit == 0 {
            return Err(Error::Config {
                message: "history.default_limit must be at least 1".to_string(),
            });
        }
        Ok(())
    }

    pub fn is_production(&self) -> bool {
        self.app_env == "production"
    }
}
