//! Loopback wiring between the demo server and in-process clients.
//!
//! Each [`ClientPeer`] pairs a [`ClientSession`] with the receiving end of
//! its connection's outbound queue, standing in for a socket. Frames travel
//! exactly as they would on the wire: encoded per connection by the server,
//! decoded one message at a time by the session.

#![allow(dead_code)]

use bytes::Bytes;
use glimmer_client::ClientSession;
use glimmer_proto::WireReader;
use glimmer_server::{Capabilities, ConnectionId, GameServer};
use glimmer_world::{EffectName, Position, WorldState};
use tokio::sync::mpsc;
use tracing::{info, warn};

/// An in-process client: session, inbound frame queue, and a display name.
#[derive(Debug)]
pub struct ClientPeer {
    name: String,
    id: ConnectionId,
    session: ClientSession,
    inbound: mpsc::UnboundedReceiver<Bytes>,
}

impl ClientPeer {
    /// Open a connection on `server` and wire its outbound queue to a fresh
    /// session over `world`.
    pub fn connect(
        server: &mut GameServer,
        name: impl Into<String>,
        position: Position,
        capabilities: Capabilities,
        world: WorldState,
    ) -> Self {
        let (id, inbound) = server.connect(position, capabilities);
        Self {
            name: name.into(),
            id,
            session: ClientSession::with_world(world),
            inbound,
        }
    }

    /// The peer's display name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The peer's connection id on the server.
    #[must_use]
    pub fn id(&self) -> ConnectionId {
        self.id
    }

    /// The peer's client session.
    #[must_use]
    pub fn session(&self) -> &ClientSession {
        &self.session
    }

    /// Apply every frame currently queued. Returns the number of frames
    /// handled.
    pub fn pump_pending(&mut self) -> usize {
        let mut handled = 0;
        while let Ok(frame) = self.inbound.try_recv() {
            self.apply_frame(&frame);
            handled += 1;
        }
        handled
    }

    /// Pump frames until the server closes the connection, then return the
    /// peer for inspection.
    pub async fn run(mut self) -> Self {
        while let Some(frame) = self.inbound.recv().await {
            self.apply_frame(&frame);
        }
        self
    }

    fn apply_frame(&mut self, frame: &Bytes) {
        let mut reader = WireReader::new(frame);
        if let Err(error) = self.session.handle_frame(&mut reader) {
            warn!(peer = %self.name, %error, "frame dropped");
        }
    }

    /// Log every effect this peer's mirror currently shows.
    pub fn report(&self) {
        for creature in self.session.world().creatures() {
            let effects: Vec<&str> = creature.effects.iter().map(EffectName::as_str).collect();
            info!(peer = %self.name, creature = %creature.id, ?effects, "creature state");
        }
        for tile in self.session.world().tiles() {
            let effects: Vec<&str> = tile.effects.iter().map(EffectName::as_str).collect();
            info!(peer = %self.name, tile = %tile.position, ?effects, "tile state");
        }
    }
}
