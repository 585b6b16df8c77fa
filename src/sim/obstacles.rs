//! Obstacle field: scattering, reactive spawning, culling and collision
//!
//! Obstacles never move. The field grows at the edge of the viewport the
//! skier is heading toward and shrinks as obstacles drift out of the visible
//! band. Every random decision goes through the injected `RandomSource`.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::geometry::{Position, Rect};
use super::skier::{Control, ControlEvent, MoveEvent, SkierState};
use crate::consts::{
    MAX_VIEWPORT_DIMENSION, REFERENCE_HEIGHT, REFERENCE_WIDTH, SCATTER_MAX, SCATTER_MIN,
    SCATTER_TOP_MARGIN,
};
use crate::error::FieldError;
use crate::random::RandomSource;
use crate::settings::Settings;
use crate::sprites::{Footprint, SpriteCatalog};

/// Obstacle catalog
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ObstacleKind {
    Tree,
    TreeCluster,
    Rock1,
    Rock2,
}

impl ObstacleKind {
    pub const ALL: [ObstacleKind; 4] = [
        ObstacleKind::Tree,
        ObstacleKind::TreeCluster,
        ObstacleKind::Rock1,
        ObstacleKind::Rock2,
    ];
}

/// A placed obstacle (immutable once placed)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Obstacle {
    pub kind: ObstacleKind,
    pub position: Position,
    pub footprint: Footprint,
}

impl Obstacle {
    /// Bottom edge, used for back-to-front draw order
    pub fn base_y(&self) -> i32 {
        self.position.y + self.footprint.height as i32
    }

    /// Collision strip in world space
    pub fn collision_rect(&self) -> Rect {
        Rect::feet(self.position.as_vec2(), self.footprint)
    }
}

/// Where a reactive spawn lands relative to the viewport
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Location {
    Left,
    LeftDown,
    Down,
    RightDown,
    Right,
    Up,
}

impl Location {
    /// Spawn side matching a skier pose (none while crashed)
    pub fn from_state(state: SkierState) -> Option<Self> {
        match state {
            SkierState::FacingLeft => Some(Location::Left),
            SkierState::DiagonalLeftDown => Some(Location::LeftDown),
            SkierState::StraightDown => Some(Location::Down),
            SkierState::DiagonalRightDown => Some(Location::RightDown),
            SkierState::FacingRight => Some(Location::Right),
            SkierState::Crashed => None,
        }
    }
}

/// An obstacle still on screen, in screen coordinates
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Drawable {
    pub kind: ObstacleKind,
    pub screen: Vec2,
    pub footprint: Footprint,
}

/// Viewport size as a world distance, capped so edge math cannot overflow
fn viewport_dimension(size: u32) -> i32 {
    size.min(MAX_VIEWPORT_DIMENSION) as i32
}

/// Owning collection of obstacles plus the rules that grow and shrink it
#[derive(Debug)]
pub struct ObstacleField<R: RandomSource> {
    obstacles: Vec<Obstacle>,
    rng: R,
    sprites: SpriteCatalog,
    viewport_width: i32,
    viewport_height: i32,
    exclusion_radius: i32,
    spawn_odds: i32,
    max_attempts: u32,
}

impl<R: RandomSource> ObstacleField<R> {
    pub fn new(settings: &Settings, rng: R) -> Self {
        Self {
            obstacles: Vec::new(),
            rng,
            sprites: settings.sprites.clone(),
            viewport_width: viewport_dimension(settings.viewport_width),
            viewport_height: viewport_dimension(settings.viewport_height),
            exclusion_radius: settings.exclusion_radius,
            spawn_odds: settings.spawn_odds,
            max_attempts: settings.max_placement_attempts,
        }
    }

    pub fn obstacles(&self) -> &[Obstacle] {
        &self.obstacles
    }

    pub fn len(&self) -> usize {
        self.obstacles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.obstacles.is_empty()
    }

    pub fn rng_mut(&mut self) -> &mut R {
        &mut self.rng
    }

    /// Drop every obstacle
    pub fn clear(&mut self) {
        self.obstacles.clear();
    }

    /// Insert an obstacle unconditionally (no exclusion check)
    pub fn insert(&mut self, kind: ObstacleKind, position: Position) {
        let footprint = self.sprites.obstacle(kind);
        self.obstacles.push(Obstacle {
            kind,
            position,
            footprint,
        });
    }

    /// Populate the field below the skier at session start.
    ///
    /// Density scales with viewport area. Placements that run out of
    /// attempts are logged and skipped. Returns the number placed.
    pub fn scatter_initial(&mut self, origin: Position) -> usize {
        let width_ratio = f64::from(self.viewport_width) / f64::from(REFERENCE_WIDTH);
        let height_ratio = f64::from(self.viewport_height) / f64::from(REFERENCE_HEIGHT);
        let base = self.rng.random_int(SCATTER_MIN, SCATTER_MAX);
        let count = (f64::from(base) * width_ratio * height_ratio).ceil() as usize;

        let r = self.exclusion_radius;
        let top = (self.viewport_height + 1) / 2 + SCATTER_TOP_MARGIN;
        let min = origin + Position::new(-r, top);
        let max = origin + Position::new(self.viewport_width + r, self.viewport_height + r);

        let mut placed = 0;
        for _ in 0..count {
            match self.place_random_obstacle(min, max) {
                Ok(_) => placed += 1,
                Err(err) => log::warn!("Initial scatter: {}", err),
            }
        }

        self.sort_for_drawing();
        log::info!("Scattered {}/{} initial obstacles", placed, count);
        placed
    }

    /// Order back to front by bottom edge
    pub fn sort_for_drawing(&mut self) {
        self.obstacles.sort_by_key(Obstacle::base_y);
    }

    /// Draw a random kind and place it at an open position inside
    /// `[min, max]` (inclusive)
    pub fn place_random_obstacle(
        &mut self,
        min: Position,
        max: Position,
    ) -> Result<Obstacle, FieldError> {
        let index = self.rng.random_int(0, ObstacleKind::ALL.len() as i32 - 1);
        let kind = ObstacleKind::ALL[index.clamp(0, ObstacleKind::ALL.len() as i32 - 1) as usize];
        let position = self.place_at_random_open_position(kind, min, max)?;
        Ok(Obstacle {
            kind,
            position,
            footprint: self.sprites.obstacle(kind),
        })
    }

    /// Sample positions inside `[min, max]` until one clears every existing
    /// obstacle's exclusion square, then insert `kind` there.
    ///
    /// Gives up after `max_placement_attempts` samples.
    pub fn place_at_random_open_position(
        &mut self,
        kind: ObstacleKind,
        min: Position,
        max: Position,
    ) -> Result<Position, FieldError> {
        for _ in 0..self.max_attempts {
            let candidate = Position::new(
                self.rng.random_int(min.x, max.x),
                self.rng.random_int(min.y, max.y),
            );
            if self.is_open(candidate) {
                self.insert(kind, candidate);
                return Ok(candidate);
            }
        }

        Err(FieldError::PlacementFailed {
            attempts: self.max_attempts,
            min,
            max,
        })
    }

    /// True when `candidate` lies outside every obstacle's exclusion square
    pub fn is_open(&self, candidate: Position) -> bool {
        let r = self.exclusion_radius;
        !self.obstacles.iter().any(|o| {
            let d = (candidate - o.position).abs();
            d.x < r && d.y < r
        })
    }

    /// Move listener: descending poses may spawn ahead of the skier
    pub fn react_to_move(&mut self, event: &MoveEvent) -> usize {
        if !event.state.is_descending() {
            return 0;
        }
        match Location::from_state(event.state) {
            Some(location) => self.maybe_spawn(location, event.position),
            None => 0,
        }
    }

    /// Control listener: sidestepping or climbing may spawn at that edge
    pub fn react_to_control(&mut self, event: &ControlEvent) -> usize {
        let steering = matches!(
            event.control,
            Control::SteerLeft | Control::SteerRight | Control::SteerUp
        );
        if !steering || !event.state.is_facing() {
            return 0;
        }

        let location = if event.control == Control::SteerUp {
            Some(Location::Up)
        } else {
            Location::from_state(event.state)
        };
        match location {
            Some(location) => self.maybe_spawn(location, event.position),
            None => 0,
        }
    }

    /// Roll the spawn odds and, on a hit, place obstacles just outside the
    /// viewport edge(s) named by `location`. Each region is tried on its
    /// own; a region with no open position is logged and skipped. Returns
    /// the number placed.
    pub fn maybe_spawn(&mut self, location: Location, actor: Position) -> usize {
        if self.rng.random_int(1, self.spawn_odds) != self.spawn_odds {
            return 0;
        }

        let offset = self.exclusion_radius;
        let left = actor.x;
        let right = left + self.viewport_width;
        let top = actor.y;
        let bottom = top + self.viewport_height;

        let left_strip = (Position::new(left - offset, top), Position::new(left, bottom));
        let right_strip = (Position::new(right, top), Position::new(right + offset, bottom));
        let below = (Position::new(left, bottom), Position::new(right, bottom + offset));
        let above = (Position::new(left, top - offset), Position::new(right, top));

        let regions = match location {
            Location::Left => vec![left_strip],
            Location::LeftDown => vec![left_strip, below],
            Location::Down => vec![below],
            Location::RightDown => vec![right_strip, below],
            Location::Right => vec![right_strip],
            Location::Up => vec![above],
        };

        let mut placed = 0;
        for (min, max) in regions {
            match self.place_random_obstacle(min, max) {
                Ok(obstacle) => {
                    placed += 1;
                    log::debug!(
                        "Spawned {:?} at {} ({:?})",
                        obstacle.kind,
                        obstacle.position,
                        location
                    );
                }
                Err(err) => log::warn!("Spawn {:?} skipped: {}", location, err),
            }
        }
        placed
    }

    /// Screen-space drawables for everything in the visible band.
    ///
    /// Obstacles outside the band are removed for good.
    pub fn cull_and_collect(&mut self, actor: Position) -> Vec<Drawable> {
        let margin = self.exclusion_radius as f32;
        let min = -2.0 * margin;
        let max_x = self.viewport_width as f32 + margin;
        let max_y = self.viewport_height as f32 + margin;
        let actor = actor.as_vec2();

        let before = self.obstacles.len();
        let mut drawables = Vec::with_capacity(before);
        self.obstacles.retain(|o| {
            let half = Vec2::new(o.footprint.width as f32, o.footprint.height as f32) / 2.0;
            let screen = o.position.as_vec2() - actor - half;
            let visible = screen.x >= min && screen.x <= max_x && screen.y >= min && screen.y <= max_y;
            if visible {
                drawables.push(Drawable {
                    kind: o.kind,
                    screen,
                    footprint: o.footprint,
                });
            }
            visible
        });

        let culled = before - self.obstacles.len();
        if culled > 0 {
            log::debug!("Culled {} obstacles, {} remain", culled, self.obstacles.len());
        }
        drawables
    }

    /// Skier collision strip; the skier is drawn at the viewport center
    pub fn actor_rect(&self, state: SkierState, position: Position) -> Rect {
        let center = Vec2::new(
            self.viewport_width as f32 / 2.0,
            self.viewport_height as f32 / 2.0,
        );
        Rect::feet(position.as_vec2() + center, self.sprites.skier(state))
    }

    /// True if the skier's feet overlap any obstacle's base
    pub fn collides(&self, state: SkierState, position: Position) -> bool {
        let actor = self.actor_rect(state, position);
        self.obstacles
            .iter()
            .any(|o| actor.intersects(&o.collision_rect()))
    }

    /// Debug view: the skier rectangle first, then every obstacle's
    pub fn collision_rects(&self, state: SkierState, position: Position) -> Vec<Rect> {
        std::iter::once(self.actor_rect(state, position))
            .chain(self.obstacles.iter().map(Obstacle::collision_rect))
            .collect()
    }
}
