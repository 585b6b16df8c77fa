//! Error types
//!
//! The simulation itself is infallible apart from obstacle placement;
//! everything else here belongs to the file-backed glue.

use std::path::PathBuf;

use thiserror::Error;

use crate::sim::Position;

/// Obstacle field errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FieldError {
    /// The open-position search ran out of attempts
    #[error("no open position in ({min}) - ({max}) after {attempts} attempts")]
    PlacementFailed {
        attempts: u32,
        min: Position,
        max: Position,
    },
}

/// Best score persistence errors
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("failed to access score file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed score file {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Settings load/save errors
#[derive(Error, Debug)]
pub enum SettingsError {
    #[error("failed to access settings file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed settings file {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}
