//! Error types for the dashboard service.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Scoring error: {0}")]
    Scoring(#[from] scoring_core::Error),

    #[error("Configuration file error: {0}")]
    ConfigFile(#[from] config::ConfigError),

    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Logging setup error: {message}")]
    Logging { message: String },

    #[error("{entity} not found: {id}")]
    NotFound { entity: &'static str, id: String },

    #[error("Access denied: {message}")]
    AccessDenied { message: String },

    #[error("Storage error: {message}")]
    Storage { message: String },
}

impl Error {
    pub fn not_found(entity: &'static str, id: impl ToString) -> Self {
        Error::NotFound {
            entity,
            id: id.to_string(),
        }
    }

    pub fn access_denied(message: impl Into<String>) -> Self {
        Error::AccessDenied {
            message: message.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
