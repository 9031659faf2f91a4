//! Scenario files.
//!
//! A scenario is a JSON description of a small world (creatures, tiles,
//! observers) and a sequence of attach/detach steps to drive through the
//! binding surface. The demo runs one scenario and reports what each client
//! ended up with.

use std::path::Path;

use anyhow::Context;
use glimmer_world::Position;
use serde::Deserialize;

/// A complete demo scenario.
#[derive(Debug, Deserialize)]
pub struct Scenario {
    /// Creatures present in the world when the scenario starts.
    #[serde(default)]
    pub creatures: Vec<CreatureSpawn>,
    /// Tiles loaded when the scenario starts.
    #[serde(default)]
    pub tiles: Vec<Position>,
    /// Client connections to open before the first step.
    pub observers: Vec<ObserverSpec>,
    /// The steps to run, in order.
    pub steps: Vec<Step>,
}

/// A creature placed into the world at startup.
#[derive(Debug, Deserialize)]
pub struct CreatureSpawn {
    /// The creature's wire id.
    pub id: u32,
    /// Where the creature stands.
    pub position: Position,
}

/// One client connection in the scenario.
#[derive(Debug, Deserialize)]
pub struct ObserverSpec {
    /// Name used in the demo output.
    pub name: String,
    /// Where the observer's viewport is centred.
    pub position: Position,
    /// Whether this client negotiated the attached-effects capability.
    pub attached_effects: bool,
}

/// One scripted call into the binding surface.
#[derive(Debug, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum Step {
    /// Attach an effect to a creature.
    AttachCreature {
        /// The target creature's id.
        creature: u32,
        /// The effect name.
        effect: String,
    },
    /// Detach an effect from a creature.
    DetachCreature {
        /// The target creature's id.
        creature: u32,
        /// The effect name.
        effect: String,
    },
    /// Attach an effect to a tile.
    AttachPosition {
        /// The effect name.
        effect: String,
        /// The target tile.
        position: Position,
    },
    /// Detach an effect from a tile.
    DetachPosition {
        /// The effect name.
        effect: String,
        /// The target tile.
        position: Position,
    },
    /// Move a creature, changing who its later broadcasts reach.
    MoveCreature {
        /// The creature to move.
        creature: u32,
        /// The destination.
        position: Position,
    },
}

/// Load a scenario from a JSON file.
///
/// # Errors
///
/// Fails if the file cannot be read or does not parse as a scenario.
pub fn load(path: &Path) -> anyhow::Result<Scenario> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("reading scenario file {}", path.display()))?;
    let scenario: Scenario = serde_json::from_str(&text)
        .with_context(|| format!("parsing scenario file {}", path.display()))?;
    Ok(scenario)
}
