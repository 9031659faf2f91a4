//! # glimmer_proto
//!
//! Wire codec for the attached-effects protocol extension.
//!
//! This crate provides:
//!
//! - [`opcode`] — The four wire opcodes and membership test.
//! - [`wire`] — Little-endian field readers and writers over framed buffers.
//! - [`message`] — [`EffectMessage`] and its encode/decode.
//! - [`error`] — Protocol-layer error types.
//!
//! The opcode values and field layouts are a persisted contract with deployed
//! clients; see [`opcode`] before changing anything here.

pub mod error;
pub mod message;
pub mod opcode;
pub mod wire;

pub use error::ProtoError;
pub use message::EffectMessage;
pub use wire::{MAX_STRING_LEN, WireReader, WireWriter};
