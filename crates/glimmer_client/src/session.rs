//! Client-side message handling.
//!
//! A [`ClientSession`] owns the client's world mirror and applies decoded
//! effect events to it. A message whose target is not in the mirror (the
//! creature left view, the tile was unloaded) is trace-logged and dropped;
//! that race is expected and never tears down the connection.

use glimmer_proto::{EffectMessage, ProtoError, WireReader};
use glimmer_world::{EffectName, EffectTarget, WorldState};
use tracing::trace;

/// One client's view of the world and the inbound effect path into it.
#[derive(Debug, Default)]
pub struct ClientSession {
    world: WorldState,
}

impl ClientSession {
    /// Create a session with an empty world mirror.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a session over an already populated world mirror.
    #[must_use]
    pub fn with_world(world: WorldState) -> Self {
        Self { world }
    }

    /// The client's world mirror.
    #[must_use]
    pub fn world(&self) -> &WorldState {
        &self.world
    }

    /// Mutable access to the world mirror, for creature and tile lifecycle
    /// driven by the rest of the client.
    pub fn world_mut(&mut self) -> &mut WorldState {
        &mut self.world
    }

    /// Decode one effect message from `reader` and apply it.
    ///
    /// # Errors
    ///
    /// Returns [`ProtoError::UnknownOpcode`] with the reader untouched if the
    /// next opcode is not an effect opcode (the enclosing dispatch owns it),
    /// and [`ProtoError::Malformed`] if the message cannot be decoded. A
    /// message whose target is missing is not an error: it is logged and
    /// dropped here.
    pub fn handle_frame(&mut self, reader: &mut WireReader<'_>) -> Result<(), ProtoError> {
        let message = EffectMessage::decode(reader)?;
        self.apply(message);
        Ok(())
    }

    /// Apply one decoded effect message to the world mirror.
    pub fn apply(&mut self, message: EffectMessage) {
        match message {
            EffectMessage::AttachCreature { creature, name } => {
                self.attach(EffectTarget::Creature(creature), &name);
            }
            EffectMessage::DetachCreature { creature, name } => {
                self.detach(EffectTarget::Creature(creature), &name);
            }
            EffectMessage::AttachPosition { name, position } => {
                self.attach(EffectTarget::Position(position), &name);
            }
            EffectMessage::DetachPosition { name, position } => {
                self.detach(EffectTarget::Position(position), &name);
            }
        }
    }

    fn attach(&mut self, target: EffectTarget, name: &EffectName) {
        if let Err(error) = self.world.attach_effect(target, name.as_str()) {
            trace!(%error, effect = %name, "attach event dropped");
        }
    }

    fn detach(&mut self, target: EffectTarget, name: &EffectName) {
        if let Err(error) = self.world.detach_effect(target, name.as_str()) {
            trace!(%error, effect = %name, "detach event dropped");
        }
    }
}

#[cfg(test)]
mod tests {
    use glimmer_world::{CreatureId, Position};

    use super::*;

    fn session_with_creature(id: u32, position: Position) -> ClientSession {
        let mut world = WorldState::new();
        world.add_creature(CreatureId(id), position);
        ClientSession::with_world(world)
    }

    fn frame(message: &EffectMessage) -> bytes::Bytes {
        message.encode().unwrap()
    }

    #[test]
    fn test_attach_applies_to_the_mirror() {
        let mut session = session_with_creature(42, Position::new(100, 100, 7));
        let bytes = frame(&EffectMessage::AttachCreature {
            creature: CreatureId(42),
            name: EffectName::from("smoke"),
        });
        let mut reader = WireReader::new(&bytes);
        session.handle_frame(&mut reader).unwrap();
        assert_eq!(
            session
                .world()
                .attached_count(EffectTarget::Creature(CreatureId(42)), "smoke"),
            Some(1)
        );
    }

    #[test]
    fn test_events_apply_in_arrival_order() {
        let mut session = session_with_creature(42, Position::new(100, 100, 7));
        let target = EffectTarget::Creature(CreatureId(42));
        let messages = [
            EffectMessage::AttachCreature {
                creature: CreatureId(42),
                name: EffectName::from("fire"),
            },
            EffectMessage::AttachCreature {
                creature: CreatureId(42),
                name: EffectName::from("fire"),
            },
            EffectMessage::DetachCreature {
                creature: CreatureId(42),
                name: EffectName::from("fire"),
            },
        ];
        for message in messages {
            session.apply(message);
        }
        assert_eq!(session.world().attached_count(target, "fire"), Some(1));
    }

    #[test]
    fn test_tile_events_apply_to_loaded_tiles() {
        let spot = Position::new(100, 200, 7);
        let mut world = WorldState::new();
        world.load_tile(spot);
        let mut session = ClientSession::with_world(world);

        session.apply(EffectMessage::AttachPosition {
            name: EffectName::from("spark"),
            position: spot,
        });
        assert_eq!(
            session
                .world()
                .attached_count(EffectTarget::Position(spot), "spark"),
            Some(1)
        );

        session.apply(EffectMessage::DetachPosition {
            name: EffectName::from("spark"),
            position: spot,
        });
        assert_eq!(
            session
                .world()
                .attached_count(EffectTarget::Position(spot), "spark"),
            Some(0)
        );
    }

    #[test]
    fn test_missing_target_is_dropped_and_others_untouched() {
        let mut session = session_with_creature(7, Position::new(100, 100, 7));
        session.apply(EffectMessage::AttachCreature {
            creature: CreatureId(7),
            name: EffectName::from("aura"),
        });

        let bytes = frame(&EffectMessage::AttachCreature {
            creature: CreatureId(42),
            name: EffectName::from("smoke"),
        });
        let mut reader = WireReader::new(&bytes);
        session.handle_frame(&mut reader).unwrap();

        assert_eq!(
            session
                .world()
                .attached_count(EffectTarget::Creature(CreatureId(42)), "smoke"),
            None
        );
        assert_eq!(
            session
                .world()
                .attached_count(EffectTarget::Creature(CreatureId(7)), "aura"),
            Some(1)
        );
    }

    #[test]
    fn test_unloaded_tile_event_is_dropped() {
        let mut session = ClientSession::new();
        session.apply(EffectMessage::AttachPosition {
            name: EffectName::from("spark"),
            position: Position::new(1, 2, 3),
        });
        assert_eq!(session.world().tile_count(), 0);
    }

    #[test]
    fn test_unknown_opcode_is_left_for_the_enclosing_dispatch() {
        let mut session = ClientSession::new();
        let bytes = [0x64, 0x01, 0x02];
        let mut reader = WireReader::new(&bytes);
        assert_eq!(
            session.handle_frame(&mut reader),
            Err(ProtoError::UnknownOpcode(0x64))
        );
        assert_eq!(reader.position(), 0);
    }

    #[test]
    fn test_truncated_frame_is_malformed() {
        let mut session = session_with_creature(42, Position::new(100, 100, 7));
        let bytes = frame(&EffectMessage::AttachCreature {
            creature: CreatureId(42),
            name: EffectName::from("smoke"),
        });
        let mut reader = WireReader::new(&bytes[..3]);
        assert_eq!(
            session.handle_frame(&mut reader),
            Err(ProtoError::Malformed("buffer exhausted"))
        );
    }
}
