//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Randomness only through an injected `RandomSource`
//! - One logical step per frame, no I/O
//! - No rendering or platform dependencies

pub mod geometry;
pub mod obstacles;
pub mod session;
pub mod skier;

pub use geometry::{Position, Rect};
pub use obstacles::{Drawable, Location, Obstacle, ObstacleField, ObstacleKind};
pub use session::Session;
pub use skier::{Control, ControlEvent, Listeners, MoveEvent, Skier, SkierState};
