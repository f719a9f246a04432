//! Leaderboard command

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::json;

use super::{Command, CommandInfo, Reply};
use crate::bot::{BotState, CommandResult};
use crate::types::Invocation;

/// Show the top rolls
pub struct LeaderboardCommand {
    state: Arc<BotState>,
}

impl LeaderboardCommand {
    pub fn new(state: Arc<BotState>) -> Self {
        Self { state }
    }
}

#[async_trait]
impl Command for LeaderboardCommand {
    fn definition(&self) -> CommandInfo {
        CommandInfo::new("leaderboard", "Show the rarest rolls so far", true)
    }

    async fn execute(&self, _ctx: &Invocation) -> CommandResult<Reply> {
        let view = self.state.leaderboard().await?;

        let text = if view.entries.is_empty() {
            "No rolls yet.".to_string()
        } else {
            let lines: Vec<String> = view
                .entries
                .iter()
                .enumerate()
                .map(|(i, r)| {
                    format!(
                        "{}. {} - 1 in {:.0} ({}, {})",
                        i + 1,
                        r.name,
                        r.rarity,
                        r.user,
                        r.server
                    )
                })
                .collect();
            format!("Total rolls: {}\n{}", view.total_rolls, lines.join("\n"))
        };

        Ok(Reply::new(
            text,
            json!({
                "total_rolls": view.total_rolls,
                "leaderboard": view.entries,
            }),
        ))
    }
}
