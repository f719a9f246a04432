//! Shared state handed to every command
//!
//! Replaces ambient globals: the engine, both document stores, one lock per
//! document, the cooldown table and the random source all live here.

use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::Serialize;

use super::cooldown::CooldownTable;
use super::error::{CommandError, CommandResult};
use crate::config::BotConfig;
use crate::engine::{RandomSource, RollEngine, RollOutcome};
use crate::registry::ChannelRegistry;
use crate::store::{ContentBackend, DocumentStore};
use crate::types::{Invocation, RollRecord, StatsDocument};

/// What a successful roll produced
#[derive(Debug, Clone, Serialize)]
pub struct RollReport {
    pub outcome: RollOutcome,
    pub record: RollRecord,
    /// 1-based leaderboard position, if the roll made it
    pub rank: Option<usize>,
    pub total_rolls: u64,
}

/// Read-only leaderboard snapshot
#[derive(Debug, Clone, Serialize)]
pub struct LeaderboardView {
    pub total_rolls: u64,
    pub entries: Vec<RollRecord>,
}

/// Context object shared by all commands
pub struct BotState {
    engine: RollEngine,
    stats: DocumentStore<StatsDocument>,
    stats_lock: tokio::sync::Mutex<()>,
    channels: ChannelRegistry,
    cooldowns: CooldownTable,
    rng: Mutex<Box<dyn RandomSource + Send>>,
    instance_id: String,
    max_retries: u32,
}

impl BotState {
    /// Build state from configuration and a backend
    pub fn new(config: &BotConfig, backend: Arc<dyn ContentBackend>) -> Self {
        let stats = DocumentStore::new(backend.clone(), config.stats_path.clone())
            .with_mode(config.load_mode)
            .with_retry_backoff(config.retry_backoff);
        let channel_store = DocumentStore::new(backend, config.channels_path.clone())
            .with_mode(config.load_mode)
            .with_retry_backoff(config.retry_backoff);

        Self {
            engine: RollEngine::default(),
            stats,
            stats_lock: tokio::sync::Mutex::new(()),
            channels: ChannelRegistry::from_store(channel_store)
                .with_max_retries(config.max_retries),
            cooldowns: CooldownTable::new(config.cooldown),
            rng: Mutex::new(Box::new(StdRng::from_os_rng())),
            instance_id: generate_instance_id(),
            max_retries: config.max_retries,
        }
    }

    /// State over a backend with default settings
    pub fn with_backend(backend: Arc<dyn ContentBackend>) -> Self {
        Self::new(&BotConfig::default(), backend)
    }

    pub fn with_engine(mut self, engine: RollEngine) -> Self {
        self.engine = engine;
        self
    }

    /// Replace the random source (scripted sources make rolls deterministic)
    pub fn with_random_source(self, source: impl RandomSource + Send + 'static) -> Self {
        *self.rng.lock() = Box::new(source);
        self
    }

    pub fn with_cooldown(mut self, window: Duration) -> Self {
        self.cooldowns = CooldownTable::new(window);
        self
    }

    pub fn channels(&self) -> &ChannelRegistry {
        &self.channels
    }

    pub fn cooldowns(&self) -> &CooldownTable {
        &self.cooldowns
    }

    pub fn instance_id(&self) -> &str {
        &self.instance_id
    }

    /// Enforce the guild roll-channel rule. Direct messages may always roll.
    pub async fn check_roll_channel(&self, ctx: &Invocation) -> CommandResult<()> {
        let Some(guild_id) = ctx.guild_id else {
            return Ok(());
        };
        let registered = self
            .channels
            .get_channel(guild_id)
            .await
            .map_err(CommandError::LoadFailed)?;

        match registered {
            None => Err(CommandError::NoChannelConfigured),
            Some(expected) if expected != ctx.channel_id => {
                Err(CommandError::WrongChannel { expected })
            }
            Some(_) => Ok(()),
        }
    }

    /// Roll once and record it.
    ///
    /// Holds the stats lock for the whole load, roll, save cycle. If the save
    /// fails the roll is discarded.
    pub async fn roll(&self, ctx: &Invocation) -> CommandResult<RollReport> {
        self.check_roll_channel(ctx).await?;

        let _guard = self.stats_lock.lock().await;

        let mut stats = self
            .stats
            .load_checked()
            .await
            .map_err(CommandError::LoadFailed)?;

        let outcome = {
            let mut rng = self.rng.lock();
            self.engine.roll(&mut **rng)
        };

        let draft = RollRecord {
            name: outcome.label.clone(),
            rarity: outcome.rarity_score,
            user: ctx.user_name.clone(),
            user_id: ctx.user_id,
            server: ctx.server_label(),
            timestamp: chrono::Utc::now().timestamp(),
            roll_number: 0,
        };
        let placed = Mutex::new(stats.document.record_roll(draft.clone()));

        // A conflict means our base was stale (or a collapsed default), so the
        // roll is replayed on the fresh document rather than copied over it.
        let message = stats.document.commit_message();
        let saved = self
            .stats
            .save(&mut stats, self.max_retries, &message, |fresh, _ours| {
                *placed.lock() = fresh.record_roll(draft.clone());
            })
            .await;
        if !saved {
            return Err(CommandError::SaveFailed);
        }
        let (record, rank) = placed.into_inner();

        log::info!(
            "roll #{} by {}: {} ({})",
            record.roll_number,
            record.user,
            record.name,
            record.rarity
        );

        Ok(RollReport {
            outcome,
            record,
            rank,
            total_rolls: stats.document.total_rolls,
        })
    }

    /// Current leaderboard, without taking the stats lock
    pub async fn leaderboard(&self) -> CommandResult<LeaderboardView> {
        let stats = self
            .stats
            .load_checked()
            .await
            .map_err(CommandError::LoadFailed)?;
        Ok(LeaderboardView {
            total_rolls: stats.document.total_rolls,
            entries: stats.document.leaderboard,
        })
    }

    /// Bind the invoking channel to the invoking guild
    pub async fn setup(&self, ctx: &Invocation) -> CommandResult<u64> {
        let guild_id = ctx.guild_id.ok_or(CommandError::NotInGuild)?;
        let saved = self
            .channels
            .set_channel(guild_id, ctx.channel_id)
            .await
            .map_err(CommandError::LoadFailed)?;
        if saved {
            Ok(ctx.channel_id)
        } else {
            Err(CommandError::SaveFailed)
        }
    }
}

/// Process instance id, distinct per start
fn generate_instance_id() -> String {
    use std::time::{SystemTime, UNIX_EPOCH};
    let timestamp = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos())
        .unwrap_or_default();
    format!("inst_{:x}_{}", timestamp, std::process::id())
}

impl Default for BotState {
    fn default() -> Self {
        Self::with_backend(Arc::new(crate::store::MemoryBackend::new()))
    }
}
