//! Roll record type stored on the leaderboard

use serde::{Deserialize, Serialize};

/// One persisted roll. Immutable once created.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RollRecord {
    /// Display label of the roll (glyphs + names)
    pub name: String,
    /// Rarity score: tier weight times the modifier multiplier
    pub rarity: f64,
    pub user: String,
    pub user_id: u64,
    /// Guild name, or the direct-message label
    pub server: String,
    /// Unix seconds
    pub timestamp: i64,
    pub roll_number: u64,
}
