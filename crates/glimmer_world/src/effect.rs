//! Effect names and per-target attachment bookkeeping.
//!
//! An [`EffectName`] is an opaque token naming a particle-effect resource; the
//! world layer never interprets it. [`AttachedEffects`] is the ordered
//! collection of names currently attached to one creature or tile.

use serde::{Deserialize, Serialize};

/// An opaque particle-effect resource name.
///
/// The name is passed through the protocol unchanged; whether it resolves to
/// an actual effect resource is the renderer's concern.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EffectName(String);

impl EffectName {
    /// Create an effect name from any string-like value.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// Returns the name as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for EffectName {
    fn from(name: &str) -> Self {
        Self(name.to_string())
    }
}

impl From<String> for EffectName {
    fn from(name: String) -> Self {
        Self(name)
    }
}

impl std::fmt::Display for EffectName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// The ordered set of effects attached to a single target.
///
/// Attachment is additive: attaching the same name twice stores it twice, and
/// one detach removes exactly one occurrence. The collection keeps insertion
/// order; detach scans from the front and removes the first value-equal match.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AttachedEffects {
    effects: Vec<EffectName>,
}

impl AttachedEffects {
    /// Create an empty collection.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append `name` to the collection. Duplicates are kept.
    pub fn attach(&mut self, name: EffectName) {
        self.effects.push(name);
    }

    /// Remove the first occurrence of `name`, scanning in insertion order.
    ///
    /// Returns `true` if an occurrence was removed. Detaching a name that is
    /// not attached is a no-op, not an error.
    pub fn detach(&mut self, name: &str) -> bool {
        match self.effects.iter().position(|e| e.as_str() == name) {
            Some(index) => {
                self.effects.remove(index);
                true
            }
            None => false,
        }
    }

    /// Returns `true` if nothing is attached.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.effects.is_empty()
    }

    /// Number of attached effects, counting duplicates.
    #[must_use]
    pub fn len(&self) -> usize {
        self.effects.len()
    }

    /// Number of occurrences of `name`.
    #[must_use]
    pub fn count_of(&self, name: &str) -> usize {
        self.effects.iter().filter(|e| e.as_str() == name).count()
    }

    /// Iterate over the attached names in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &EffectName> {
        self.effects.iter()
    }
}
