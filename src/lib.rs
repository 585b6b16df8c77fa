//! Skeeboi - An endless downhill skiing arcade game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (skier, obstacle field, session scoring)
//! - `random`: Injectable randomness (seeded PCG or scripted sequences)
//! - `sprites`: Footprint lookup for obstacle kinds and skier poses
//! - `input`: Key code to command mapping
//! - `highscores`: Best score persistence
//! - `settings`: Data-driven tunables

pub mod error;
pub mod highscores;
pub mod input;
pub mod random;
pub mod settings;
pub mod sim;
pub mod sprites;

pub use error::{FieldError, SettingsError, StoreError};
pub use highscores::{JsonScoreStore, MemoryScoreStore, ScoreStore};
pub use input::Command;
pub use random::{RandomSource, ScriptedRandom, SeededRandom};
pub use settings::Settings;
pub use sprites::{Footprint, SpriteCatalog};

/// Game configuration constants
pub mod consts {
    /// Viewport the initial scatter density is calibrated against
    pub const REFERENCE_WIDTH: u32 = 800;
    pub const REFERENCE_HEIGHT: u32 = 500;
    /// Larger viewport settings are clamped to this
    pub const MAX_VIEWPORT_DIMENSION: u32 = 16_384;

    /// Skier defaults
    pub const SKIER_SPEED: i32 = 8;
    /// Divisor applied to speed on diagonals (~speed/sqrt(2))
    pub const DIAGONAL_FACTOR: f64 = 1.1412;

    /// Minimum half-gap between obstacle placement points
    pub const EXCLUSION_RADIUS: i32 = 50;
    /// Only the bottom strip of a sprite collides
    pub const COLLISION_STRIP: f32 = 5.0;

    /// Reactive spawns fire on one event in this many
    pub const SPAWN_ODDS: i32 = 8;
    /// Cap on the open-position search
    pub const MAX_PLACEMENT_ATTEMPTS: u32 = 1000;

    /// Points lost when the skier hits something
    pub const CRASH_PENALTY: i64 = 150;

    /// Initial scatter draws between these many obstacles (before scaling)
    pub const SCATTER_MIN: i32 = 5;
    pub const SCATTER_MAX: i32 = 7;
    /// Initial scatter starts this far below the vertical center
    pub const SCATTER_TOP_MARGIN: i32 = 100;
}
