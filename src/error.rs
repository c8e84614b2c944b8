//! Error types for the persistence edges of the game
//!
//! Nothing in the simulation itself can fail; only file I/O and config parsing do.

use std::path::PathBuf;

use thiserror::Error;

/// Failure reading or writing the best-times record
#[derive(Debug, Error)]
pub enum PersistenceError {
    #[error("failed to read best times from {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write best times to {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Failure loading or saving settings
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("settings I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed settings JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid game config: {0}")]
    InvalidConfig(String),
}
