//! Timestamped input primitives submitted to the host executor.

use serde::{Deserialize, Serialize};

use crate::geometry::Point;

/// Kind of a pointer primitive
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PointerKind {
    /// Finger/pointer down
    Down,
    /// Pointer move
    Move,
    /// Finger/pointer up
    Up,
}

/// A single timestamped pointer event destined for the host input pipeline
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PointerPrimitive {
    /// Milliseconds since the Unix epoch
    pub timestamp_ms: u64,
    /// Down / Move / Up
    pub kind: PointerKind,
    /// X coordinate in device pixels
    pub x: f32,
    /// Y coordinate in device pixels
    pub y: f32,
}

impl PointerPrimitive {
    /// Create a pointer primitive at a point
    #[must_use]
    pub const fn at(timestamp_ms: u64, kind: PointerKind, point: Point) -> Self {
        Self {
            timestamp_ms,
            kind,
            x: point.x,
            y: point.y,
        }
    }

    /// The location of this primitive
    #[must_use]
    pub const fn point(&self) -> Point {
        Point::new(self.x, self.y)
    }
}

/// Key press direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum KeyAction {
    /// Key down
    Down,
    /// Key up
    Up,
}
