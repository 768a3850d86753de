//! Positions on the normalized 0-100 map

use serde::{Deserialize, Serialize};

/// A point on the map, both axes in map units
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub x: f32,
    pub y: f32,
}

impl Position {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to another point
    pub fn distance_to(&self, other: &Position) -> f32 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }

    /// Translate by one step in `direction`, keeping both axes within `[min, max]`
    pub fn stepped(&self, direction: Direction, step: f32, min: f32, max: f32) -> Self {
        let (dx, dy) = direction.offset();
        Self {
            x: (self.x + dx * step).clamp(min, max),
            y: (self.y + dy * step).clamp(min, max),
        }
    }
}

/// Discrete movement intent; screen coordinates, so `Up` decreases `y`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    fn offset(&self) -> (f32, f32) {
        match self {
            Direction::Up => (0.0, -1.0),
            Direction::Down => (0.0, 1.0),
            Direction::Left => (-1.0, 0.0),
            Direction::Right => (1.0, 0.0),
        }
    }
}
