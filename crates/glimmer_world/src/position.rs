//! Map position type.
//!
//! A [`Position`] is an absolute map coordinate: `x`/`y` across the grid and
//! `z` for the floor. Coordinates are unsigned and match the wire widths used
//! by the protocol layer (`u16`, `u16`, `u8`).

use serde::{Deserialize, Serialize};

/// An absolute map coordinate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Position {
    /// East-west coordinate.
    pub x: u16,
    /// North-south coordinate.
    pub y: u16,
    /// Floor index (0 = top floor).
    pub z: u8,
}

impl Position {
    /// Create a position from its coordinates.
    #[must_use]
    pub const fn new(x: u16, y: u16, z: u8) -> Self {
        Self { x, y, z }
    }

    /// Absolute distance to `other` along the x axis.
    #[must_use]
    pub const fn distance_x(self, other: Self) -> u16 {
        self.x.abs_diff(other.x)
    }

    /// Absolute distance to `other` along the y axis.
    #[must_use]
    pub const fn distance_y(self, other: Self) -> u16 {
        self.y.abs_diff(other.y)
    }

    /// Returns `true` if both positions are on the same floor.
    #[must_use]
    pub const fn same_floor(self, other: Self) -> bool {
        self.z == other.z
    }

    /// Returns `true` if `other` lies within the given rectangular range of
    /// this position, on the same floor.
    #[must_use]
    pub const fn in_range(self, other: Self, range_x: u16, range_y: u16) -> bool {
        self.same_floor(other)
            && self.distance_x(other) <= range_x
            && self.distance_y(other) <= range_y
    }
}

impl std::fmt::Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {}, {})", self.x, self.y, self.z)
    }
}
