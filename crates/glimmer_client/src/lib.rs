//! # glimmer_client
//!
//! Client half of the attached-effects protocol.
//!
//! This crate provides:
//!
//! - [`session`] — [`ClientSession`], which decodes effect events and applies
//!   them to the client's world mirror.
//!
//! The session handles exactly the four effect opcodes; anything else is
//! returned to the enclosing protocol dispatch untouched.

pub mod session;

pub use session::ClientSession;
