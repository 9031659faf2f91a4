//! Effect targets.
//!
//! An effect is attached either to a creature (addressed by id, may appear
//! and disappear) or to a map position (static, resolves to a tile).

use serde::{Deserialize, Serialize};

use crate::creature::CreatureId;
use crate::position::Position;

/// The target of an attach or detach operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EffectTarget {
    /// A creature, addressed by its wire identity.
    Creature(CreatureId),
    /// A map tile, addressed by its absolute position.
    Position(Position),
}

impl From<CreatureId> for EffectTarget {
    fn from(id: CreatureId) -> Self {
        Self::Creature(id)
    }
}

impl From<Position> for EffectTarget {
    fn from(position: Position) -> Self {
        Self::Position(position)
    }
}

impl std::fmt::Display for EffectTarget {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Creature(id) => write!(f, "{id}"),
            Self::Position(position) => write!(f, "tile {position}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_conversions() {
        let t: EffectTarget = CreatureId(7).into();
        assert_eq!(t, EffectTarget::Creature(CreatureId(7)));
        let t: EffectTarget = Position::new(1, 2, 3).into();
        assert_eq!(t, EffectTarget::Position(Position::new(1, 2, 3)));
    }

    #[test]
    fn test_display_names_the_target_kind() {
        assert_eq!(EffectTarget::Creature(CreatureId(9)).to_string(), "Creature(9)");
        assert_eq!(
            EffectTarget::Position(Position::new(1, 2, 3)).to_string(),
            "tile (1, 2, 3)"
        );
    }
}
