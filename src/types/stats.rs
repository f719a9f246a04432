//! Stats document persisted in the remote content store

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::RollRecord;
use crate::leaderboard;

/// Roll counter and leaderboard.
///
/// Top-level fields this crate does not own are kept in `extra` so a save
/// never drops data written by another tool.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct StatsDocument {
    #[serde(default)]
    pub total_rolls: u64,
    #[serde(default)]
    pub leaderboard: Vec<RollRecord>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl StatsDocument {
    /// Count one roll and place it on the leaderboard.
    ///
    /// Stamps the record with its roll number and returns it with its
    /// 1-based rank. A conflicting save replays this on the fresh document,
    /// so rolls written by others are kept.
    pub fn record_roll(&mut self, mut record: RollRecord) -> (RollRecord, Option<usize>) {
        self.total_rolls += 1;
        record.roll_number = self.total_rolls;
        let rank = leaderboard::update(&mut self.leaderboard, record.clone());
        (record, rank)
    }

    /// Commit message used when this document is written
    pub fn commit_message(&self) -> String {
        format!("Update stats - total rolls {}", self.total_rolls)
    }
}
