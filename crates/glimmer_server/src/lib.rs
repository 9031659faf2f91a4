//! # glimmer_server
//!
//! Server half of the attached-effects protocol.
//!
//! This crate provides:
//!
//! - [`connection`] — Per-client handles, capabilities, and outbound queues.
//! - [`spectator`] — The spectator-resolution interface and the connection
//!   roster implementing it.
//! - [`dispatch`] — The capability-gated broadcast path.
//! - [`game`] — [`GameServer`], the binding surface game logic calls.
//!
//! The server never waits on clients: every operation resolves spectators,
//! encodes per connection, enqueues, and returns.

pub mod connection;
pub mod dispatch;
pub mod game;
pub mod spectator;

pub use connection::{Capabilities, ConnectionHandle, ConnectionId};
pub use dispatch::broadcast_effect;
pub use game::GameServer;
pub use spectator::{ConnectionRoster, SpectatorResolver};
