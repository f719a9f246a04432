//! Debug command

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::json;

use super::{Command, CommandInfo, Reply};
use crate::bot::{BotState, CommandResult};
use crate::types::Invocation;

/// Report which process answered
pub struct DebugCommand {
    state: Arc<BotState>,
}

impl DebugCommand {
    pub fn new(state: Arc<BotState>) -> Self {
        Self { state }
    }
}

#[async_trait]
impl Command for DebugCommand {
    fn definition(&self) -> CommandInfo {
        CommandInfo::new("debug", "Show the process instance id", false)
    }

    async fn execute(&self, _ctx: &Invocation) -> CommandResult<Reply> {
        let instance_id = self.state.instance_id();
        Ok(Reply::new(
            format!("Instance: {}", instance_id),
            json!({
                "instance_id": instance_id,
                "version": crate::VERSION,
            }),
        ))
    }
}
