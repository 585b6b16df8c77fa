//! Best score persistence
//!
//! The session only needs "what is the best so far" and "record a new
//! best". Where it lives is up to the store.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::StoreError;

/// Best score storage
pub trait ScoreStore {
    /// Stored best (0 if nothing has been recorded)
    fn best_score(&self) -> i64;

    fn set_best_score(&mut self, score: i64);
}

impl<T: ScoreStore + ?Sized> ScoreStore for Box<T> {
    fn best_score(&self) -> i64 {
        (**self).best_score()
    }

    fn set_best_score(&mut self, score: i64) {
        (**self).set_best_score(score);
    }
}

/// In-memory store (tests, throwaway sessions)
#[derive(Debug, Clone, Default)]
pub struct MemoryScoreStore {
    best: i64,
    writes: u32,
}

impl MemoryScoreStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of times a new best was recorded
    pub fn writes(&self) -> u32 {
        self.writes
    }
}

impl ScoreStore for MemoryScoreStore {
    fn best_score(&self) -> i64 {
        self.best
    }

    fn set_best_score(&mut self, score: i64) {
        self.best = score;
        self.writes += 1;
    }
}

/// On-disk record
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
struct BestScoreFile {
    best_score: i64,
}

/// JSON file store. Reads once on open, writes through on every new best.
#[derive(Debug, Clone)]
pub struct JsonScoreStore {
    path: PathBuf,
    best: i64,
}

impl JsonScoreStore {
    /// Open (or start) a score file. A missing file means no best yet.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let path = path.into();
        let best = match fs::read_to_string(&path) {
            Ok(json) => {
                let record: BestScoreFile =
                    serde_json::from_str(&json).map_err(|source| StoreError::Json {
                        path: path.clone(),
                        source,
                    })?;
                log::info!("Loaded best score {} from {}", record.best_score, path.display());
                record.best_score
            }
            Err(err) if err.kind() == ErrorKind::NotFound => {
                log::info!("No best score at {}, starting fresh", path.display());
                0
            }
            Err(source) => return Err(StoreError::Io { path, source }),
        };
        Ok(Self { path, best })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Write the current best to disk
    pub fn save(&self) -> Result<(), StoreError> {
        let record = BestScoreFile {
            best_score: self.best,
        };
        let json = serde_json::to_string(&record).map_err(|source| StoreError::Json {
            path: self.path.clone(),
            source,
        })?;
        fs::write(&self.path, json).map_err(|source| StoreError::Io {
            path: self.path.clone(),
            source,
        })
    }
}

impl ScoreStore for JsonScoreStore {
    fn best_score(&self) -> i64 {
        self.best
    }

    fn set_best_score(&mut self, score: i64) {
        self.best = score;
        if let Err(err) = self.save() {
            log::warn!("Best score not persisted: {}", err);
        }
    }
}
