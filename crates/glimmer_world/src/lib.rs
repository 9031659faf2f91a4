//! # glimmer_world
//!
//! Shared world model for the attached-effects protocol.
//!
//! This crate provides:
//!
//! - [`position`] — Absolute map coordinates.
//! - [`effect`] — Effect names and per-target attachment bookkeeping.
//! - [`creature`] — Creature identity and runtime representation.
//! - [`tile`] — Map tile representation.
//! - [`target`] — The creature-or-position target union.
//! - [`state`] — The creature table and tile grid owning all effect sets.
//!
//! Both server and client hold a [`WorldState`]; the protocol only ever
//! transmits attach/detach events, never the state itself.

pub mod creature;
pub mod effect;
pub mod position;
pub mod state;
pub mod target;
pub mod tile;

pub use creature::{Creature, CreatureId};
pub use effect::{AttachedEffects, EffectName};
pub use position::Position;
pub use state::{WorldError, WorldState};
pub use target::EffectTarget;
pub use tile::Tile;
