//! World state: the creature table and the loaded tile grid.
//!
//! [`WorldState`] is the single owner of creatures and tiles for one process.
//! The server holds the authoritative instance; each client holds its own
//! mirror covering what it currently observes. Attach/detach resolve their
//! target here and mutate the owning creature's or tile's effect set.

use std::collections::HashMap;

use thiserror::Error;

use crate::creature::{Creature, CreatureId};
use crate::effect::EffectName;
use crate::position::Position;
use crate::target::EffectTarget;
use crate::tile::Tile;

/// Errors from target resolution.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum WorldError {
    /// No creature with the given id is currently in the world.
    #[error("{0} not found")]
    CreatureNotFound(CreatureId),
    /// No tile is loaded at the given position.
    #[error("no tile loaded at {0}")]
    TileNotFound(Position),
}

/// Creature table and tile grid for one process.
#[derive(Debug, Default)]
pub struct WorldState {
    creatures: HashMap<CreatureId, Creature>,
    tiles: HashMap<Position, Tile>,
}

impl WorldState {
    /// Create an empty world.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    // -- Creature lifecycle --

    /// Add a creature at the given position. A creature with the same id is
    /// replaced, effects included.
    pub fn add_creature(&mut self, id: CreatureId, position: Position) {
        self.creatures.insert(id, Creature::new(id, position));
    }

    /// Remove a creature, releasing its attached effects with it.
    pub fn remove_creature(&mut self, id: CreatureId) -> Option<Creature> {
        self.creatures.remove(&id)
    }

    /// Look up a creature by id.
    #[must_use]
    pub fn creature(&self, id: CreatureId) -> Option<&Creature> {
        self.creatures.get(&id)
    }

    /// A creature's current position, if it is in the world.
    #[must_use]
    pub fn creature_position(&self, id: CreatureId) -> Option<Position> {
        self.creatures.get(&id).map(|c| c.position)
    }

    /// Move a creature to a new position.
    ///
    /// # Errors
    ///
    /// Returns [`WorldError::CreatureNotFound`] if the creature is not in the
    /// world.
    pub fn move_creature(&mut self, id: CreatureId, position: Position) -> Result<(), WorldError> {
        let creature = self
            .creatures
            .get_mut(&id)
            .ok_or(WorldError::CreatureNotFound(id))?;
        creature.position = position;
        Ok(())
    }

    /// Number of creatures currently in the world.
    #[must_use]
    pub fn creature_count(&self) -> usize {
        self.creatures.len()
    }

    /// Iterate over all creatures, in no particular order.
    pub fn creatures(&self) -> impl Iterator<Item = &Creature> {
        self.creatures.values()
    }

    // -- Tile lifecycle --

    /// Load an empty tile at the given position. Loading an already loaded
    /// tile keeps the existing one, effects included.
    pub fn load_tile(&mut self, position: Position) {
        self.tiles
            .entry(position)
            .or_insert_with(|| Tile::new(position));
    }

    /// Unload a tile, releasing its attached effects with it.
    pub fn unload_tile(&mut self, position: Position) -> Option<Tile> {
        self.tiles.remove(&position)
    }

    /// Look up a loaded tile by position.
    #[must_use]
    pub fn tile(&self, position: Position) -> Option<&Tile> {
        self.tiles.get(&position)
    }

    /// Number of loaded tiles.
    #[must_use]
    pub fn tile_count(&self) -> usize {
        self.tiles.len()
    }

    /// Iterate over all loaded tiles, in no particular order.
    pub fn tiles(&self) -> impl Iterator<Item = &Tile> {
        self.tiles.values()
    }

    // -- Effect registry --

    /// Attach `name` to the target's effect set.
    ///
    /// Attachment is additive: repeated attaches of the same name stack.
    ///
    /// # Errors
    ///
    /// Returns [`WorldError::CreatureNotFound`] or [`WorldError::TileNotFound`]
    /// if the target does not resolve; the world is left unchanged.
    pub fn attach_effect(&mut self, target: EffectTarget, name: &str) -> Result<(), WorldError> {
        self.effects_mut(target)?.attach(EffectName::from(name));
        Ok(())
    }

    /// Detach one occurrence of `name` from the target's effect set.
    ///
    /// Returns `Ok(true)` if an occurrence was removed and `Ok(false)` if the
    /// name was not attached (a no-op, not an error).
    ///
    /// # Errors
    ///
    /// Returns [`WorldError::CreatureNotFound`] or [`WorldError::TileNotFound`]
    /// if the target does not resolve; the world is left unchanged.
    pub fn detach_effect(&mut self, target: EffectTarget, name: &str) -> Result<bool, WorldError> {
        Ok(self.effects_mut(target)?.detach(name))
    }

    /// Number of occurrences of `name` attached to the target, or `None` if
    /// the target does not resolve.
    #[must_use]
    pub fn attached_count(&self, target: EffectTarget, name: &str) -> Option<usize> {
        match target {
            EffectTarget::Creature(id) => self.creatures.get(&id).map(|c| c.effects.count_of(name)),
            EffectTarget::Position(position) => {
                self.tiles.get(&position).map(|t| t.effects.count_of(name))
            }
        }
    }

    fn effects_mut(
        &mut self,
        target: EffectTarget,
    ) -> Result<&mut crate::effect::AttachedEffects, WorldError> {
        match target {
            EffectTarget::Creature(id) => self
                .creatures
                .get_mut(&id)
                .map(|c| &mut c.effects)
                .ok_or(WorldError::CreatureNotFound(id)),
            EffectTarget::Position(position) => self
                .tiles
                .get_mut(&position)
                .map(|t| &mut t.effects)
                .ok_or(WorldError::TileNotFound(position)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_world() -> WorldState {
        let mut world = WorldState::new();
        world.add_creature(CreatureId(42), Position::new(100, 100, 7));
        world.load_tile(Position::new(100, 200, 7));
        world
    }

    #[test]
    fn test_attach_detach_on_creature() {
        let mut world = make_world();
        let target = EffectTarget::Creature(CreatureId(42));
        world.attach_effect(target, "fire").unwrap();
        assert_eq!(world.attached_count(target, "fire"), Some(1));
        assert!(world.detach_effect(target, "fire").unwrap());
        assert_eq!(world.attached_count(target, "fire"), Some(0));
    }

    #[test]
    fn test_attach_detach_on_tile() {
        let mut world = make_world();
        let target = EffectTarget::Position(Position::new(100, 200, 7));
        world.attach_effect(target, "spark").unwrap();
        assert_eq!(world.attached_count(target, "spark"), Some(1));
        assert!(world.detach_effect(target, "spark").unwrap());
        assert_eq!(world.attached_count(target, "spark"), Some(0));
    }

    #[test]
    fn test_attach_unknown_creature_fails_without_mutation() {
        let mut world = make_world();
        let target = EffectTarget::Creature(CreatureId(999));
        let result = world.attach_effect(target, "fire");
        assert_eq!(result, Err(WorldError::CreatureNotFound(CreatureId(999))));
        assert_eq!(world.attached_count(target, "fire"), None);
    }

    #[test]
    fn test_attach_unloaded_tile_fails() {
        let mut world = make_world();
        let target = EffectTarget::Position(Position::new(1, 1, 0));
        let result = world.attach_effect(target, "spark");
        assert_eq!(
            result,
            Err(WorldError::TileNotFound(Position::new(1, 1, 0)))
        );
    }

    #[test]
    fn test_detach_absent_is_ok_false() {
        let mut world = make_world();
        let target = EffectTarget::Creature(CreatureId(42));
        assert_eq!(world.detach_effect(target, "ghost"), Ok(false));
    }

    #[test]
    fn test_remove_creature_releases_effects() {
        let mut world = make_world();
        let target = EffectTarget::Creature(CreatureId(42));
        world.attach_effect(target, "aura").unwrap();
        let removed = world.remove_creature(CreatureId(42)).unwrap();
        assert_eq!(removed.effects.count_of("aura"), 1);
        assert_eq!(world.attached_count(target, "aura"), None);
    }

    #[test]
    fn test_unload_tile_releases_effects() {
        let mut world = make_world();
        let position = Position::new(100, 200, 7);
        let target = EffectTarget::Position(position);
        world.attach_effect(target, "mist").unwrap();
        world.unload_tile(position);
        assert_eq!(world.attached_count(target, "mist"), None);
    }

    #[test]
    fn test_reload_tile_keeps_existing_effects() {
        let mut world = make_world();
        let position = Position::new(100, 200, 7);
        let target = EffectTarget::Position(position);
        world.attach_effect(target, "mist").unwrap();
        world.load_tile(position);
        assert_eq!(world.attached_count(target, "mist"), Some(1));
    }

    #[test]
    fn test_move_creature_updates_position() {
        let mut world = make_world();
        world
            .move_creature(CreatureId(42), Position::new(50, 60, 5))
            .unwrap();
        assert_eq!(
            world.creature_position(CreatureId(42)),
            Some(Position::new(50, 60, 5))
        );
        assert_eq!(
            world.move_creature(CreatureId(7), Position::new(1, 1, 1)),
            Err(WorldError::CreatureNotFound(CreatureId(7)))
        );
    }

    #[test]
    fn test_replacing_creature_clears_effects() {
        let mut world = make_world();
        let target = EffectTarget::Creature(CreatureId(42));
        world.attach_effect(target, "aura").unwrap();
        world.add_creature(CreatureId(42), Position::new(100, 100, 7));
        assert_eq!(world.attached_count(target, "aura"), Some(0));
    }
}
