//! Creature identity and runtime representation.
//!
//! A [`CreatureId`] is the `u32` identifier creatures are addressed by on the
//! wire. [`Creature`] is the in-memory representation that owns the
//! creature's position and attached effects.

use serde::{Deserialize, Serialize};

use crate::effect::AttachedEffects;
use crate::position::Position;

/// A unique creature identifier.
///
/// IDs are assigned by the game when a creature enters the world and are the
/// only way creatures are addressed across the network.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CreatureId(pub u32);

impl CreatureId {
    /// Create a creature ID from its raw `u32` value.
    #[must_use]
    pub const fn from_raw(id: u32) -> Self {
        Self(id)
    }

    /// Returns the raw `u32` identifier.
    #[must_use]
    pub const fn id(self) -> u32 {
        self.0
    }
}

impl std::fmt::Display for CreatureId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Creature({})", self.0)
    }
}

/// A live creature: identity, current position, and attached effects.
///
/// The creature owns its [`AttachedEffects`]; when the creature leaves the
/// world its effect set goes with it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Creature {
    /// The creature's wire identity.
    pub id: CreatureId,
    /// Current map position.
    pub position: Position,
    /// Effects currently attached to this creature.
    pub effects: AttachedEffects,
}

impl Creature {
    /// Create a creature at the given position with no attached effects.
    #[must_use]
    pub fn new(id: CreatureId, position: Position) -> Self {
        Self {
            id,
            position,
            effects: AttachedEffects::new(),
        }
    }
}
