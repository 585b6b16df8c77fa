//! The skier: directional state machine plus movement events
//!
//! Turning walks one pose at a time across the slope
//! (left, left-down, down, right-down, right). The two facing poses
//! sidestep instead of turning further, and a crash recovers asymmetrically:
//! steering left stands the skier up facing left, steering right jumps
//! straight to facing right.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::geometry::Position;
use crate::consts::{DIAGONAL_FACTOR, SKIER_SPEED};

/// Skier pose
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SkierState {
    Crashed,
    FacingLeft,
    DiagonalLeftDown,
    StraightDown,
    DiagonalRightDown,
    FacingRight,
}

impl SkierState {
    /// Pose after one step of left turn. `FacingLeft` is the end stop;
    /// a crashed skier gets back up facing left.
    pub fn turned_left(self) -> Self {
        match self {
            SkierState::Crashed | SkierState::FacingLeft | SkierState::DiagonalLeftDown => {
                SkierState::FacingLeft
            }
            SkierState::StraightDown => SkierState::DiagonalLeftDown,
            SkierState::DiagonalRightDown => SkierState::StraightDown,
            SkierState::FacingRight => SkierState::DiagonalRightDown,
        }
    }

    /// Pose after one step of right turn. `FacingRight` is the end stop;
    /// a crashed skier gets back up facing right.
    pub fn turned_right(self) -> Self {
        match self {
            SkierState::Crashed | SkierState::FacingRight | SkierState::DiagonalRightDown => {
                SkierState::FacingRight
            }
            SkierState::StraightDown => SkierState::DiagonalRightDown,
            SkierState::DiagonalLeftDown => SkierState::StraightDown,
            SkierState::FacingLeft => SkierState::DiagonalLeftDown,
        }
    }

    /// Standing sideways across the slope
    pub fn is_facing(self) -> bool {
        matches!(self, SkierState::FacingLeft | SkierState::FacingRight)
    }

    /// Moving downhill on every advance
    pub fn is_descending(self) -> bool {
        matches!(
            self,
            SkierState::DiagonalLeftDown | SkierState::StraightDown | SkierState::DiagonalRightDown
        )
    }
}

/// Player steering input
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Control {
    SteerLeft,
    SteerRight,
    SteerUp,
    ForceDown,
}

/// Emitted after every `advance`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MoveEvent {
    pub state: SkierState,
    pub position: Position,
}

/// Emitted after every `control`; `state` is the pose after the input applied
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ControlEvent {
    pub control: Control,
    pub state: SkierState,
    pub position: Position,
}

/// Subscriber list for one event kind, notified in registration order
pub struct Listeners<E> {
    callbacks: Vec<Box<dyn FnMut(&E)>>,
}

impl<E> Listeners<E> {
    pub fn new() -> Self {
        Self {
            callbacks: Vec::new(),
        }
    }

    pub fn subscribe(&mut self, callback: impl FnMut(&E) + 'static) {
        self.callbacks.push(Box::new(callback));
    }

    pub fn emit(&mut self, event: &E) {
        for callback in &mut self.callbacks {
            callback(event);
        }
    }
}

impl<E> Default for Listeners<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E> fmt::Debug for Listeners<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Listeners")
            .field("subscribers", &self.callbacks.len())
            .finish()
    }
}

/// The player-controlled skier
#[derive(Debug)]
pub struct Skier {
    pub state: SkierState,
    pub position: Position,
    /// Units per advance on the straight line
    speed: i32,
    /// Divisor applied to speed on diagonals
    diagonal_factor: f64,
    on_move: Listeners<MoveEvent>,
    on_control: Listeners<ControlEvent>,
}

impl Default for Skier {
    fn default() -> Self {
        Self::new(SKIER_SPEED, DIAGONAL_FACTOR)
    }
}

impl Skier {
    pub fn new(speed: i32, diagonal_factor: f64) -> Self {
        Self {
            state: SkierState::FacingRight,
            position: Position::ZERO,
            speed,
            diagonal_factor,
            on_move: Listeners::new(),
            on_control: Listeners::new(),
        }
    }

    /// Per-axis displacement on a diagonal
    pub fn diagonal_step(&self) -> i32 {
        (f64::from(self.speed) / self.diagonal_factor).round() as i32
    }

    /// Register a callback for move events
    pub fn on_move(&mut self, callback: impl FnMut(&MoveEvent) + 'static) {
        self.on_move.subscribe(callback);
    }

    /// Register a callback for control events
    pub fn on_control(&mut self, callback: impl FnMut(&ControlEvent) + 'static) {
        self.on_control.subscribe(callback);
    }

    /// Back to the starting pose and origin. Listeners stay registered.
    pub fn reset(&mut self) {
        self.state = SkierState::FacingRight;
        self.position = Position::ZERO;
    }

    /// Move one step according to the current pose, then notify move listeners
    pub fn advance(&mut self) {
        let diagonal = self.diagonal_step();
        let delta = match self.state {
            SkierState::DiagonalLeftDown => Position::new(-diagonal, diagonal),
            SkierState::StraightDown => Position::new(0, self.speed),
            SkierState::DiagonalRightDown => Position::new(diagonal, diagonal),
            SkierState::Crashed | SkierState::FacingLeft | SkierState::FacingRight => {
                Position::ZERO
            }
        };
        self.position += delta;

        let event = MoveEvent {
            state: self.state,
            position: self.position,
        };
        self.on_move.emit(&event);
    }

    /// Apply a steering input, then notify control listeners
    pub fn control(&mut self, control: Control) {
        match control {
            Control::SteerLeft => {
                if self.state == SkierState::Crashed {
                    self.state = self.state.turned_left();
                }
                if self.state == SkierState::FacingLeft {
                    self.position.x -= self.speed;
                } else {
                    self.state = self.state.turned_left();
                }
            }
            Control::SteerRight => {
                if self.state == SkierState::Crashed {
                    self.state = self.state.turned_right();
                }
                if self.state == SkierState::FacingRight {
                    self.position.x += self.speed;
                } else {
                    self.state = self.state.turned_right();
                }
            }
            Control::SteerUp => {
                if self.state.is_facing() {
                    self.position.y -= self.speed;
                }
            }
            Control::ForceDown => {
                self.state = SkierState::StraightDown;
            }
        }

        let event = ControlEvent {
            control,
            state: self.state,
            position: self.position,
        };
        self.on_control.emit(&event);
    }
}
