//! Chat commands
//!
//! This module contains the 4 commands exposed to the chat gateway:
//! - `roll` (default): roll once and record it
//! - `leaderboard`: read-only top 10
//! - `setup`: bind the current channel to the current guild
//! - `debug`: report the process instance id

mod debug;
mod leaderboard;
mod roll;
mod router;
mod setup;

use std::sync::Arc;

use async_trait::async_trait;
use serde::Serialize;
use serde_json::Value;

use crate::bot::{BotState, CommandResult};
use crate::types::Invocation;

pub use debug::DebugCommand;
pub use leaderboard::LeaderboardCommand;
pub use roll::RollCommand;
pub use router::CommandRouter;
pub use setup::SetupCommand;

/// Command run when the invocation names none
pub const DEFAULT_COMMAND: &str = "roll";

/// Command definition
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct CommandInfo {
    pub name: String,
    pub description: String,
    /// Subject to the per-user cooldown
    pub rate_limited: bool,
}

impl CommandInfo {
    pub fn new(name: &str, description: &str, rate_limited: bool) -> Self {
        Self {
            name: name.to_string(),
            description: description.to_string(),
            rate_limited,
        }
    }
}

/// Reply handed back to the chat gateway
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct Reply {
    /// One-line plain text summary
    pub text: String,
    /// Structured payload for the gateway to format
    pub data: Value,
}

impl Reply {
    pub fn new(text: impl Into<String>, data: Value) -> Self {
        Self {
            text: text.into(),
            data,
        }
    }
}

/// Trait for chat commands
///
/// All commands must implement this trait to be registered with the router.
#[async_trait]
pub trait Command: Send + Sync {
    /// Get the command definition
    fn definition(&self) -> CommandInfo;

    /// Execute the command for one invocation
    async fn execute(&self, ctx: &Invocation) -> CommandResult<Reply>;

    /// Get the command name (convenience method)
    fn name(&self) -> String {
        self.definition().name
    }
}

/// Register all commands with the router
pub fn register_all_commands(router: &mut CommandRouter, state: Arc<BotState>) {
    router.register_command(Box::new(RollCommand::new(state.clone())));
    router.register_command(Box::new(LeaderboardCommand::new(state.clone())));
    router.register_command(Box::new(SetupCommand::new(state.clone())));
    router.register_command(Box::new(DebugCommand::new(state)));
}
