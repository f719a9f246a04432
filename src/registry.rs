//! Guild to roll-channel registry backed by a document store

use std::sync::Arc;

use tokio::sync::Mutex;

use crate::store::{ContentBackend, DocumentStore, StoreResult, DEFAULT_MAX_RETRIES};
use crate::types::ChannelMap;

/// Designated roll channel per guild
pub struct ChannelRegistry {
    store: DocumentStore<ChannelMap>,
    lock: Mutex<()>,
    max_retries: u32,
}

impl ChannelRegistry {
    pub fn new(backend: Arc<dyn ContentBackend>, path: impl Into<String>) -> Self {
        Self::from_store(DocumentStore::new(backend, path))
    }

    pub fn from_store(store: DocumentStore<ChannelMap>) -> Self {
        Self {
            store,
            lock: Mutex::new(()),
            max_retries: DEFAULT_MAX_RETRIES,
        }
    }

    pub fn with_max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = max_retries;
        self
    }

    /// Bind a guild to a channel. Returns false if the save failed.
    pub async fn set_channel(&self, guild_id: u64, channel_id: u64) -> StoreResult<bool> {
        let _guard = self.lock.lock().await;

        let mut map = self.store.load_checked().await?;
        map.document.set(guild_id, channel_id);

        let message = format!("Update channel registry - guild {}", guild_id);
        let saved = self
            .store
            .save(&mut map, self.max_retries, &message, |fresh, _ours| {
                fresh.set(guild_id, channel_id);
            })
            .await;

        if saved {
            log::info!("guild {} now rolls in channel {}", guild_id, channel_id);
        }
        Ok(saved)
    }

    /// Channel registered for a guild
    pub async fn get_channel(&self, guild_id: u64) -> StoreResult<Option<u64>> {
        let map = self.store.load_checked().await?;
        Ok(map.document.get(guild_id))
    }
}
