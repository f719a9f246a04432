//! Setup command

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::json;

use super::{Command, CommandInfo, Reply};
use crate::bot::{BotState, CommandResult};
use crate::types::Invocation;

/// Make the invoking channel the guild's roll channel
pub struct SetupCommand {
    state: Arc<BotState>,
}

impl SetupCommand {
    pub fn new(state: Arc<BotState>) -> Self {
        Self { state }
    }
}

#[async_trait]
impl Command for SetupCommand {
    fn definition(&self) -> CommandInfo {
        CommandInfo::new("setup", "Use this channel for rolls on this server", false)
    }

    async fn execute(&self, ctx: &Invocation) -> CommandResult<Reply> {
        let channel_id = self.state.setup(ctx).await?;
        Ok(Reply::new(
            format!("Rolls on this server now happen in <#{}>.", channel_id),
            json!({
                "guild_id": ctx.guild_id,
                "channel_id": channel_id,
            }),
        ))
    }
}
