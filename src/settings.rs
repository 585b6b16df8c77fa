//! Game settings and tunables
//!
//! Persisted as JSON. Missing fields fall back to their defaults so old
//! files keep loading as new tunables appear.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::SettingsError;
use crate::sprites::SpriteCatalog;

/// Game settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Viewport ===
    pub viewport_width: u32,
    pub viewport_height: u32,

    // === Skier ===
    pub skier_speed: i32,
    pub diagonal_factor: f64,

    // === Obstacles ===
    /// Half-gap kept between obstacle placement points
    pub exclusion_radius: i32,
    /// One reactive spawn per this many skier events
    pub spawn_odds: i32,
    pub max_placement_attempts: u32,
    pub sprites: SpriteCatalog,

    // === Scoring ===
    pub crash_penalty: i64,

    /// RNG seed; `None` picks one at startup
    pub seed: Option<u64>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            viewport_width: REFERENCE_WIDTH,
            viewport_height: REFERENCE_HEIGHT,

            skier_speed: SKIER_SPEED,
            diagonal_factor: DIAGONAL_FACTOR,

            exclusion_radius: EXCLUSION_RADIUS,
            spawn_odds: SPAWN_ODDS,
            max_placement_attempts: MAX_PLACEMENT_ATTEMPTS,
            sprites: SpriteCatalog::default(),

            crash_penalty: CRASH_PENALTY,

            seed: None,
        }
    }
}

impl Settings {
    /// Read settings from a JSON file
    pub fn load(path: &Path) -> Result<Self, SettingsError> {
        let json = fs::read_to_string(path).map_err(|source| SettingsError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let settings = serde_json::from_str(&json).map_err(|source| SettingsError::Json {
            path: path.to_path_buf(),
            source,
        })?;
        log::info!("Loaded settings from {}", path.display());
        Ok(settings)
    }

    /// Like `load`, but logs and falls back to defaults on any failure
    pub fn load_or_default(path: &Path) -> Self {
        match Self::load(path) {
            Ok(settings) => settings,
            Err(err) => {
                log::warn!("{}; using default settings", err);
                Self::default()
            }
        }
    }

    /// Write settings as pretty JSON
    pub fn save(&self, path: &Path) -> Result<(), SettingsError> {
        let json = serde_json::to_string_pretty(self).map_err(|source| SettingsError::Json {
            path: path.to_path_buf(),
            source,
        })?;
        fs::write(path, json).map_err(|source| SettingsError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        log::info!("Settings saved to {}", path.display());
        Ok(())
    }
}
