//! Command registry and dispatch

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Instant;

use super::{register_all_commands, Command, CommandInfo, Reply, DEFAULT_COMMAND};
use crate::bot::{BotState, CommandError, CommandResult};
use crate::types::Invocation;

/// Prune expired cooldowns once the table grows past this
const COOLDOWN_PRUNE_THRESHOLD: usize = 1024;

/// Routes invocations to registered commands
pub struct CommandRouter {
    state: Arc<BotState>,
    commands: HashMap<String, Box<dyn Command>>,
}

impl CommandRouter {
    /// Create an empty router
    pub fn new(state: Arc<BotState>) -> Self {
        Self {
            state,
            commands: HashMap::new(),
        }
    }

    /// Create a router with every built-in command registered
    pub fn with_all_commands(state: Arc<BotState>) -> Self {
        let mut router = Self::new(state.clone());
        register_all_commands(&mut router, state);
        router
    }

    /// Register a command with the router
    pub fn register_command(&mut self, command: Box<dyn Command>) -> &mut Self {
        let name = command.definition().name;
        self.commands.insert(name, command);
        self
    }

    /// Get the number of registered commands
    pub fn command_count(&self) -> usize {
        self.commands.len()
    }

    /// Definitions of all registered commands, sorted by name
    pub fn definitions(&self) -> Vec<CommandInfo> {
        let mut defs: Vec<CommandInfo> = self.commands.values().map(|c| c.definition()).collect();
        defs.sort_by(|a, b| a.name.cmp(&b.name));
        defs
    }

    pub fn state(&self) -> &Arc<BotState> {
        &self.state
    }

    /// Run one invocation, enforcing the cooldown on rate-limited commands
    pub async fn dispatch(&self, ctx: &Invocation) -> CommandResult<Reply> {
        let requested = ctx.command.trim().to_lowercase();
        let name = if requested.is_empty() {
            DEFAULT_COMMAND
        } else {
            requested.as_str()
        };

        let command = self
            .commands
            .get(name)
            .ok_or_else(|| CommandError::UnknownCommand(name.to_string()))?;

        if command.definition().rate_limited {
            let cooldowns = self.state.cooldowns();
            if cooldowns.len() > COOLDOWN_PRUNE_THRESHOLD {
                cooldowns.prune(Instant::now());
            }
            cooldowns
                .try_acquire(ctx.user_id)
                .map_err(|remaining| CommandError::Cooldown { remaining })?;
        }

        log::debug!("dispatching {} for user {}", name, ctx.user_id);
        command.execute(ctx).await
    }
}
