//! Directional command mapping
//!
//! Keyboard arrows and the on-screen control buttons resolve to the same
//! four commands; both input paths feed the identical `move_player`
//! contract with the configured speed on exactly one axis.

use glam::Vec2;

/// A single directional command
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// Map a `KeyboardEvent::key` value; arrow keys only
    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "ArrowUp" => Some(Self::Up),
            "ArrowDown" => Some(Self::Down),
            "ArrowLeft" => Some(Self::Left),
            "ArrowRight" => Some(Self::Right),
            _ => None,
        }
    }

    /// Map a control button's `data-direction` attribute
    pub fn from_attr(value: &str) -> Option<Self> {
        match value {
            "up" => Some(Self::Up),
            "down" => Some(Self::Down),
            "left" => Some(Self::Left),
            "right" => Some(Self::Right),
            _ => None,
        }
    }

    /// Displacement for one command: full speed along a single axis
    /// (screen coordinates, y grows downward)
    pub fn delta(self, speed: f32) -> Vec2 {
        match self {
            Self::Up => Vec2::new(0.0, -speed),
            Self::Down => Vec2::new(0.0, speed),
            Self::Left => Vec2::new(-speed, 0.0),
            Self::Right => Vec2::new(speed, 0.0),
        }
    }
}
