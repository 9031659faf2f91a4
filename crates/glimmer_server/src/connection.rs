//! Per-client connection handles.
//!
//! A [`ConnectionHandle`] is the server's view of one client: its identity,
//! the capabilities negotiated at handshake, and the outbound frame queue.
//! The queue is an unbounded channel; the receiving end is pumped by the
//! connection's own task, so enqueueing never blocks the game logic.

use bytes::Bytes;
use tokio::sync::mpsc;
use uuid::Uuid;

/// A unique connection identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ConnectionId(Uuid);

impl ConnectionId {
    /// Allocate a fresh connection id.
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for ConnectionId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for ConnectionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Protocol capabilities negotiated during the connection handshake.
///
/// Extensions are opt-in: a client that never announced support for one must
/// not be sent its messages.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Capabilities {
    /// The client understands the attached-effects opcodes.
    pub attached_effects: bool,
}

/// The server-side handle for one client connection.
///
/// Handles are cheap to clone; clones share the same outbound queue.
#[derive(Debug, Clone)]
pub struct ConnectionHandle {
    id: ConnectionId,
    capabilities: Capabilities,
    outbound: mpsc::UnboundedSender<Bytes>,
}

impl ConnectionHandle {
    /// Open a new connection with the given capabilities.
    ///
    /// Returns the handle and the receiving end of its outbound queue. The
    /// receiver is what the connection's pump drains onto the socket; in
    /// tests and the loopback demo it is handed straight to a client session.
    #[must_use]
    pub fn open(capabilities: Capabilities) -> (Self, mpsc::UnboundedReceiver<Bytes>) {
        let (outbound, receiver) = mpsc::unbounded_channel();
        let handle = Self {
            id: ConnectionId::new(),
            capabilities,
            outbound,
        };
        (handle, receiver)
    }

    /// This connection's identity.
    #[must_use]
    pub fn id(&self) -> ConnectionId {
        self.id
    }

    /// The capabilities negotiated for this connection.
    #[must_use]
    pub fn capabilities(&self) -> Capabilities {
        self.capabilities
    }

    /// Enqueue a frame for delivery.
    ///
    /// Returns `false` if the connection's pump has gone away (the client
    /// disconnected); the frame is dropped in that case.
    pub fn send(&self, frame: Bytes) -> bool {
        self.outbound.send(frame).is_ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_send_reaches_the_receiver() {
        let (handle, mut receiver) = ConnectionHandle::open(Capabilities::default());
        assert!(handle.send(Bytes::from_static(b"frame")));
        assert_eq!(receiver.try_recv().unwrap(), Bytes::from_static(b"frame"));
    }

    #[test]
    fn test_send_after_disconnect_reports_failure() {
        let (handle, receiver) = ConnectionHandle::open(Capabilities::default());
        drop(receiver);
        assert!(!handle.send(Bytes::from_static(b"frame")));
    }

    #[test]
    fn test_clones_share_the_queue() {
        let (handle, mut receiver) = ConnectionHandle::open(Capabilities::default());
        let clone = handle.clone();
        assert_eq!(clone.id(), handle.id());
        assert!(clone.send(Bytes::from_static(b"a")));
        assert!(handle.send(Bytes::from_static(b"b")));
        assert_eq!(receiver.try_recv().unwrap(), Bytes::from_static(b"a"));
        assert_eq!(receiver.try_recv().unwrap(), Bytes::from_static(b"b"));
    }

    #[test]
    fn test_connection_ids_are_unique() {
        let (a, _ra) = ConnectionHandle::open(Capabilities::default());
        let (b, _rb) = ConnectionHandle::open(Capabilities::default());
        assert_ne!(a.id(), b.id());
    }
}
