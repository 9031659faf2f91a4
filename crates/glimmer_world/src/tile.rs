//! Map tile representation.

use crate::effect::AttachedEffects;
use crate::position::Position;

/// A loaded map tile: its position and the effects attached to it.
///
/// Tiles only exist for the part of the map a process currently holds; the
/// tile owns its [`AttachedEffects`] and releases them when it is unloaded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tile {
    /// The tile's absolute position.
    pub position: Position,
    /// Effects currently attached to this tile.
    pub effects: AttachedEffects,
}

impl Tile {
    /// Create an empty tile at the given position.
    #[must_use]
    pub fn new(position: Position) -> Self {
        Self {
            position,
            effects: AttachedEffects::new(),
        }
    }
}
