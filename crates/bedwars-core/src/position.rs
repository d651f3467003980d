//! World positions and their textual form in instructions.

use serde::{Deserialize, Serialize};

/// A point in the host world.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Vector3 {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Vector3 {
    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// The same position shifted vertically by `dy`.
    pub fn above(self, dy: f64) -> Self {
        Self {
            y: self.y + dy,
            ..self
        }
    }
}

/// Format as an absolute coordinate triple, e.g. `0 64 0` or `0.5 64 -3.25`.
pub fn format_position(position: &Vector3) -> String {
    format!("{} {} {}", position.x, position.y, position.z)
}
