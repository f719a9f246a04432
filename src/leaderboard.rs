//! Bounded top-10 leaderboard
//!
//! Kept sorted by rarity, highest first.

use crate::types::RollRecord;

/// Maximum number of records kept on the leaderboard
pub const LEADERBOARD_SIZE: usize = 10;

/// Insert a record and return its 1-based rank, or `None` if it was evicted.
///
/// The sort is stable, so a new record that ties existing ones lands after
/// them. The record is tracked by position, never by value equality.
pub fn update(list: &mut Vec<RollRecord>, record: RollRecord) -> Option<usize> {
    let new_index = list.len();
    let mut indexed: Vec<(usize, RollRecord)> = list.drain(..).enumerate().collect();
    indexed.push((new_index, record));

    indexed.sort_by(|(_, a), (_, b)| b.rarity.total_cmp(&a.rarity));
    indexed.truncate(LEADERBOARD_SIZE);

    let rank = indexed
        .iter()
        .position(|(i, _)| *i == new_index)
        .map(|pos| pos + 1);

    list.extend(indexed.into_iter().map(|(_, r)| r));
    rank
}
