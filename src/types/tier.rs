//! Tier types for the roll engine

use serde::{Deserialize, Serialize};

/// Mutually exclusive roll outcome, picked with probability `1 / weight`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RarityTier {
    pub name: String,
    pub weight: u64,
    #[serde(default)]
    pub glyph: String,
}

impl RarityTier {
    /// Create a new rarity tier
    pub fn new(name: impl Into<String>, weight: u64, glyph: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            weight,
            glyph: glyph.into(),
        }
    }

    /// Probability threshold a draw must fall under to select this tier
    pub fn threshold(&self) -> f64 {
        1.0 / self.weight as f64
    }
}

/// Independently triggered bonus that multiplies the rarity score
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModifierTier {
    pub name: String,
    pub weight: u64,
    #[serde(default)]
    pub glyph: String,
}

impl ModifierTier {
    /// Create a new modifier tier
    pub fn new(name: impl Into<String>, weight: u64, glyph: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            weight,
            glyph: glyph.into(),
        }
    }

    /// The weight-1 modifier is the identity and is never drawn
    pub fn is_baseline(&self) -> bool {
        self.weight == 1
    }

    /// Chance that this modifier triggers on a single roll
    pub fn probability(&self) -> f64 {
        1.0 / self.weight as f64
    }
}
