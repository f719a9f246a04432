//! Guild to channel mapping document

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Maps guild ids (as JSON object keys) to the designated roll channel.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ChannelMap {
    entries: BTreeMap<String, u64>,
}

impl ChannelMap {
    /// Create an empty channel map
    pub fn new() -> Self {
        Self::default()
    }

    /// Channel registered for a guild
    pub fn get(&self, guild_id: u64) -> Option<u64> {
        self.entries.get(&guild_id.to_string()).copied()
    }

    /// Set (or replace) the channel for a guild
    pub fn set(&mut self, guild_id: u64, channel_id: u64) -> Option<u64> {
        self.entries.insert(guild_id.to_string(), channel_id)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
