//! Validated, ordered tier tables
//!
//! Tables are built once at startup and never mutated afterwards.

use thiserror::Error;

use crate::types::{ModifierTier, RarityTier};

/// Errors raised while building a tier table
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TableError {
    #[error("tier table is empty")]
    Empty,
    #[error("tier '{0}' has weight 0")]
    ZeroWeight(String),
    #[error("tiers '{0}' and '{1}' share weight {2}")]
    DuplicateWeight(String, String, u64),
}

/// Rarity tiers sorted by weight, rarest first
#[derive(Debug, Clone)]
pub struct RarityTable {
    tiers: Vec<RarityTier>,
    /// Lowest-weight tier, also the last entry of `tiers`
    common: RarityTier,
}

impl RarityTable {
    /// Build a table, rejecting zero and duplicate weights
    pub fn new(mut tiers: Vec<RarityTier>) -> Result<Self, TableError> {
        if let Some(t) = tiers.iter().find(|t| t.weight == 0) {
            return Err(TableError::ZeroWeight(t.name.clone()));
        }

        tiers.sort_by(|a, b| b.weight.cmp(&a.weight));

        if let Some(pair) = tiers.windows(2).find(|w| w[0].weight == w[1].weight) {
            return Err(TableError::DuplicateWeight(
                pair[0].name.clone(),
                pair[1].name.clone(),
                pair[0].weight,
            ));
        }

        let common = tiers.last().cloned().ok_or(TableError::Empty)?;
        Ok(Self { tiers, common })
    }

    /// The built-in rarity ladder. The weight-2 floor covers every draw below 0.5.
    pub fn standard() -> Self {
        let common = RarityTier::new("Common", 2, "⚪");
        Self {
            tiers: vec![
                RarityTier::new("Divine", 100_000, "🌟"),
                RarityTier::new("Mythic", 10_000, "🔴"),
                RarityTier::new("Legendary", 1_000, "🟠"),
                RarityTier::new("Epic", 100, "🟣"),
                RarityTier::new("Rare", 20, "🔵"),
                RarityTier::new("Uncommon", 5, "🟢"),
                common.clone(),
            ],
            common,
        }
    }

    /// Tiers in descending weight order
    pub fn tiers(&self) -> &[RarityTier] {
        &self.tiers
    }

    /// Lowest-weight tier, used when no threshold matches
    pub fn common(&self) -> &RarityTier {
        &self.common
    }

    pub fn len(&self) -> usize {
        self.tiers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tiers.is_empty()
    }
}

/// Modifier tiers in evaluation order
#[derive(Debug, Clone)]
pub struct ModifierTable {
    modifiers: Vec<ModifierTier>,
}

impl ModifierTable {
    /// Build a table, rejecting zero weights. Order is kept as given.
    pub fn new(modifiers: Vec<ModifierTier>) -> Result<Self, TableError> {
        if modifiers.is_empty() {
            return Err(TableError::Empty);
        }
        if let Some(m) = modifiers.iter().find(|m| m.weight == 0) {
            return Err(TableError::ZeroWeight(m.name.clone()));
        }
        Ok(Self { modifiers })
    }

    /// The built-in modifiers, baseline first
    pub fn standard() -> Self {
        Self {
            modifiers: vec![
                ModifierTier::new("Normal", 1, ""),
                ModifierTier::new("Shiny", 10, "✨"),
                ModifierTier::new("Golden", 50, "🪙"),
                ModifierTier::new("Cursed", 250, "💀"),
                ModifierTier::new("Cosmic", 2_000, "🌌"),
            ],
        }
    }

    /// Only a baseline modifier: every roll scores exactly its tier weight
    pub fn baseline_only() -> Self {
        Self {
            modifiers: vec![ModifierTier::new("Normal", 1, "")],
        }
    }

    /// All modifiers, including the baseline
    pub fn modifiers(&self) -> &[ModifierTier] {
        &self.modifiers
    }

    /// Modifiers that are actually drawn on each roll
    pub fn drawable(&self) -> impl Iterator<Item = &ModifierTier> {
        self.modifiers.iter().filter(|m| !m.is_baseline())
    }
}
