//! Roll engine
//!
//! Weighted probability engine: one draw picks a rarity tier, then every
//! non-baseline modifier is an independent Bernoulli trial.
//!
//! - `tables`: validated rarity and modifier tables
//! - `random`: the injectable `RandomSource` and a scripted source for tests
//! - `roll`: `RollEngine` and `RollOutcome`

pub mod random;
pub mod roll;
pub mod tables;

pub use random::{RandomSource, SequenceSource};
#[cfg(test)]
pub(crate) use random::draw_for_weight;
pub use roll::{RollEngine, RollOutcome};
pub use tables::{ModifierTable, RarityTable, TableError};
