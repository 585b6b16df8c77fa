//! Key code mapping
//!
//! Browser-style key codes in, game commands out. Steering goes to the
//! skier; restart and pause are session commands.

use serde::{Deserialize, Serialize};

use crate::sim::Control;

pub const KEY_LEFT: u32 = 37;
pub const KEY_UP: u32 = 38;
pub const KEY_RIGHT: u32 = 39;
pub const KEY_DOWN: u32 = 40;
/// F2
pub const KEY_RESTART: u32 = 113;
/// F3
pub const KEY_PAUSE: u32 = 114;

/// A mapped key press
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Command {
    Steer(Control),
    Restart,
    TogglePause,
}

impl Command {
    /// Map a key code; unknown keys map to `None`
    pub fn from_key(code: u32) -> Option<Self> {
        match code {
            KEY_LEFT => Some(Command::Steer(Control::SteerLeft)),
            KEY_UP => Some(Command::Steer(Control::SteerUp)),
            KEY_RIGHT => Some(Command::Steer(Control::SteerRight)),
            KEY_DOWN => Some(Command::Steer(Control::ForceDown)),
            KEY_RESTART => Some(Command::Restart),
            KEY_PAUSE => Some(Command::TogglePause),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_arrow_keys_steer() {
        assert_eq!(Command::from_key(37), Some(Command::Steer(Control::SteerLeft)));
        assert_eq!(Command::from_key(38), Some(Command::Steer(Control::SteerUp)));
        assert_eq!(Command::from_key(39), Some(Command::Steer(Control::SteerRight)));
        assert_eq!(Command::from_key(40), Some(Command::Steer(Control::ForceDown)));
    }

    #[test]
    fn test_session_keys() {
        assert_eq!(Command::from_key(113), Some(Command::Restart));
        assert_eq!(Command::from_key(114), Some(Command::TogglePause));
        assert_eq!(Command::from_key(32), None);
    }
}
