//! World coordinates and collision rectangles
//!
//! World space is integral with y increasing downhill. Collision and screen
//! math happen in `f32` because sprite centers can land on half units.

use glam::{IVec2, Vec2};
use serde::{Deserialize, Serialize};

use crate::consts::COLLISION_STRIP;
use crate::sprites::Footprint;

/// World position (origin arbitrary, y grows downhill)
pub type Position = IVec2;

/// Closed axis-aligned rectangle
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub left: f32,
    pub right: f32,
    pub top: f32,
    pub bottom: f32,
}

impl Rect {
    /// Bottom strip of a sprite whose top-left corner sits at `origin`.
    ///
    /// Only the last `COLLISION_STRIP` units of height (the feet / base)
    /// take part in collisions.
    pub fn feet(origin: Vec2, footprint: Footprint) -> Self {
        let width = footprint.width as f32;
        let height = footprint.height as f32;
        Self {
            left: origin.x,
            right: origin.x + width,
            top: origin.y + height - COLLISION_STRIP,
            bottom: origin.y + height,
        }
    }

    /// Overlap test; touching edges count as overlap
    pub fn intersects(&self, other: &Rect) -> bool {
        !(other.left > self.right
            || other.right < self.left
            || other.top > self.bottom
            || other.bottom < self.top)
    }
}
