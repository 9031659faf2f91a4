//! The game-facing binding surface.
//!
//! [`GameServer`] owns the authoritative world state and the connection
//! roster, and exposes the four operations scripted game logic calls to
//! trigger effect broadcasts. Each call resolves the target position, mirrors
//! the mutation into the server's own world, then fans the message out to
//! every capable spectator.

use bytes::Bytes;
use glimmer_proto::{EffectMessage, MAX_STRING_LEN};
use glimmer_world::{CreatureId, EffectName, EffectTarget, Position, WorldState};
use tokio::sync::mpsc;
use tracing::{debug, info};

use crate::connection::{Capabilities, ConnectionHandle, ConnectionId};
use crate::dispatch::broadcast_effect;
use crate::spectator::ConnectionRoster;

/// Authoritative server state and the entry points game logic calls.
#[derive(Debug, Default)]
pub struct GameServer {
    world: WorldState,
    roster: ConnectionRoster,
}

impl GameServer {
    /// Create a server with an empty world and no connections.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a server over an already populated world.
    #[must_use]
    pub fn with_world(world: WorldState) -> Self {
        Self {
            world,
            roster: ConnectionRoster::new(),
        }
    }

    /// The authoritative world state.
    #[must_use]
    pub fn world(&self) -> &WorldState {
        &self.world
    }

    /// Mutable access to the authoritative world state.
    pub fn world_mut(&mut self) -> &mut WorldState {
        &mut self.world
    }

    /// The connection roster.
    #[must_use]
    pub fn roster(&self) -> &ConnectionRoster {
        &self.roster
    }

    /// Mutable access to the connection roster.
    pub fn roster_mut(&mut self) -> &mut ConnectionRoster {
        &mut self.roster
    }

    // ── Connection lifecycle ────────────────────────────────────────────────

    /// Register a new client connection observing from `position`.
    ///
    /// Returns the connection id and the receiving end of its outbound frame
    /// queue, which the connection's pump drains.
    pub fn connect(
        &mut self,
        position: Position,
        capabilities: Capabilities,
    ) -> (ConnectionId, mpsc::UnboundedReceiver<Bytes>) {
        let (handle, receiver) = ConnectionHandle::open(capabilities);
        let id = self.roster.register(handle, position);
        info!(
            connection = %id,
            %position,
            attached_effects = capabilities.attached_effects,
            "connection registered"
        );
        (id, receiver)
    }

    /// Remove a client connection.
    ///
    /// Returns `true` if the connection was registered.
    pub fn disconnect(&mut self, id: ConnectionId) -> bool {
        let removed = self.roster.unregister(id);
        if removed {
            info!(connection = %id, "connection removed");
        }
        removed
    }

    // ── Binding surface ─────────────────────────────────────────────────────

    /// Attach `name` to a creature and broadcast the event to its spectators.
    ///
    /// Returns `false` without sending anything if the creature is not in the
    /// world (a stale handle is the caller's mistake, not a protocol fault) or
    /// if `name` does not fit the wire's `u16` string length prefix.
    pub fn attach_particle_effect(&mut self, creature: CreatureId, name: &str) -> bool {
        if name.len() > MAX_STRING_LEN {
            debug!(%creature, name_len = name.len(), "attach rejected, name too long for the wire");
            return false;
        }
        let Some(position) = self.world.creature_position(creature) else {
            debug!(%creature, effect = name, "attach requested for a creature not in the world");
            return false;
        };
        self.mirror_attach(EffectTarget::Creature(creature), name);
        let message = EffectMessage::AttachCreature {
            creature,
            name: EffectName::from(name),
        };
        let delivered = broadcast_effect(&self.roster, position, &message);
        debug!(%creature, effect = name, delivered, "attached effect to creature");
        true
    }

    /// Detach one occurrence of `name` from a creature and broadcast the
    /// event to its spectators.
    ///
    /// The broadcast is sent even if the effect was never attached
    /// server-side; clients treat a detach of an absent effect as a no-op.
    /// Returns `false` only if the creature is not in the world or `name`
    /// does not fit the wire's `u16` string length prefix.
    pub fn detach_particle_effect(&mut self, creature: CreatureId, name: &str) -> bool {
        if name.len() > MAX_STRING_LEN {
            debug!(%creature, name_len = name.len(), "detach rejected, name too long for the wire");
            return false;
        }
        let Some(position) = self.world.creature_position(creature) else {
            debug!(%creature, effect = name, "detach requested for a creature not in the world");
            return false;
        };
        self.mirror_detach(EffectTarget::Creature(creature), name);
        let message = EffectMessage::DetachCreature {
            creature,
            name: EffectName::from(name),
        };
        let delivered = broadcast_effect(&self.roster, position, &message);
        debug!(%creature, effect = name, delivered, "detached effect from creature");
        true
    }

    /// Attach `name` to the tile at `position` and broadcast the event.
    ///
    /// Position targets always resolve: the tile entry is created on first
    /// attach. Returns `false` only if `name` does not fit the wire's `u16`
    /// string length prefix; no tile is created in that case.
    pub fn send_attach_particle_effect(&mut self, name: &str, position: Position) -> bool {
        if name.len() > MAX_STRING_LEN {
            debug!(%position, name_len = name.len(), "attach rejected, name too long for the wire");
            return false;
        }
        self.world.load_tile(position);
        self.mirror_attach(EffectTarget::Position(position), name);
        let message = EffectMessage::AttachPosition {
            name: EffectName::from(name),
            position,
        };
        let delivered = broadcast_effect(&self.roster, position, &message);
        debug!(%position, effect = name, delivered, "attached effect to tile");
        true
    }

    /// Detach one occurrence of `name` from the tile at `position` and
    /// broadcast the event.
    ///
    /// Returns `false` only if `name` does not fit the wire's `u16` string
    /// length prefix.
    pub fn send_detach_particle_effect(&mut self, name: &str, position: Position) -> bool {
        if name.len() > MAX_STRING_LEN {
            debug!(%position, name_len = name.len(), "detach rejected, name too long for the wire");
            return false;
        }
        self.mirror_detach(EffectTarget::Position(position), name);
        let message = EffectMessage::DetachPosition {
            name: EffectName::from(name),
            position,
        };
        let delivered = broadcast_effect(&self.roster, position, &message);
        debug!(%position, effect = name, delivered, "detached effect from tile");
        true
    }

    // ── Server-side mirror ──────────────────────────────────────────────────

    fn mirror_attach(&mut self, target: EffectTarget, name: &str) {
        if let Err(error) = self.world.attach_effect(target, name) {
            debug!(%error, "server-side mirror attach skipped");
        }
    }

    fn mirror_detach(&mut self, target: EffectTarget, name: &str) {
        if let Err(error) = self.world.detach_effect(target, name) {
            debug!(%error, "server-side mirror detach skipped");
        }
    }
}
