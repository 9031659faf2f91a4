//! Spectator resolution.
//!
//! The broadcast path asks one question of the map layer: which connections
//! currently observe a given position? [`SpectatorResolver`] is that
//! interface, and [`ConnectionRoster`] is the shipped implementation: a
//! registry of connections keyed by id, each with the position its viewport
//! is centred on.

use std::collections::HashMap;

use glimmer_world::Position;

use crate::connection::{ConnectionHandle, ConnectionId};

/// Horizontal viewport awareness range, in tiles, either side of centre.
pub const VIEWPORT_RANGE_X: u16 = 8;

/// Vertical viewport awareness range, in tiles, either side of centre.
pub const VIEWPORT_RANGE_Y: u16 = 6;

/// Resolves the connections observing a map position.
pub trait SpectatorResolver {
    /// Connections whose viewport covers `position`.
    ///
    /// `include_invisible` and `include_offline` widen the result to
    /// observers that are currently invisible or logged out but still
    /// connected; the effect broadcast path always passes `true` for both.
    fn spectators_of(
        &self,
        position: Position,
        include_invisible: bool,
        include_offline: bool,
    ) -> Vec<ConnectionHandle>;
}

#[derive(Debug)]
struct Observer {
    handle: ConnectionHandle,
    position: Position,
    invisible: bool,
    offline: bool,
}

/// Registry of connected observers and their viewport positions.
#[derive(Debug, Default)]
pub struct ConnectionRoster {
    observers: HashMap<ConnectionId, Observer>,
}

impl ConnectionRoster {
    /// Create an empty roster.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a connection observing from `position`.
    ///
    /// Returns the connection's id for later roster updates.
    pub fn register(&mut self, handle: ConnectionHandle, position: Position) -> ConnectionId {
        let id = handle.id();
        self.observers.insert(
            id,
            Observer {
                handle,
                position,
                invisible: false,
                offline: false,
            },
        );
        id
    }

    /// Remove a connection from the roster.
    ///
    /// Returns `true` if the connection was registered.
    pub fn unregister(&mut self, id: ConnectionId) -> bool {
        self.observers.remove(&id).is_some()
    }

    /// Move a connection's viewport centre.
    ///
    /// Returns `false` if the connection is not registered.
    pub fn set_position(&mut self, id: ConnectionId, position: Position) -> bool {
        match self.observers.get_mut(&id) {
            Some(observer) => {
                observer.position = position;
                true
            }
            None => false,
        }
    }

    /// Mark a connection's observer as invisible (e.g. a hidden game master).
    ///
    /// Returns `false` if the connection is not registered.
    pub fn set_invisible(&mut self, id: ConnectionId, invisible: bool) -> bool {
        match self.observers.get_mut(&id) {
            Some(observer) => {
                observer.invisible = invisible;
                true
            }
            None => false,
        }
    }

    /// Mark a connection as offline while its session lingers.
    ///
    /// Returns `false` if the connection is not registered.
    pub fn set_offline(&mut self, id: ConnectionId, offline: bool) -> bool {
        match self.observers.get_mut(&id) {
            Some(observer) => {
                observer.offline = offline;
                true
            }
            None => false,
        }
    }

    /// Number of registered connections.
    #[must_use]
    pub fn len(&self) -> usize {
        self.observers.len()
    }

    /// Returns `true` if no connections are registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.observers.is_empty()
    }
}

impl SpectatorResolver for ConnectionRoster {
    fn spectators_of(
        &self,
        position: Position,
        include_invisible: bool,
        include_offline: bool,
    ) -> Vec<ConnectionHandle> {
        self.observers
            .values()
            .filter(|observer| {
                observer
                    .position
                    .in_range(position, VIEWPORT_RANGE_X, VIEWPORT_RANGE_Y)
                    && (include_invisible || !observer.invisible)
                    && (include_offline || !observer.offline)
            })
            .map(|observer| observer.handle.clone())
            .collect()
    }
}
