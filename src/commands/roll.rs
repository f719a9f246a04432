//! Roll command

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::json;

use super::{Command, CommandInfo, Reply};
use crate::bot::{BotState, CommandResult};
use crate::types::Invocation;

/// Roll once and record the result
pub struct RollCommand {
    state: Arc<BotState>,
}

impl RollCommand {
    pub fn new(state: Arc<BotState>) -> Self {
        Self { state }
    }
}

#[async_trait]
impl Command for RollCommand {
    fn definition(&self) -> CommandInfo {
        CommandInfo::new("roll", "Roll for a random rarity", true)
    }

    async fn execute(&self, ctx: &Invocation) -> CommandResult<Reply> {
        let report = self.state.roll(ctx).await?;

        let mut text = format!(
            "{} rolled {} (1 in {:.0}) - roll #{}",
            report.record.user,
            report.outcome.label,
            report.outcome.rarity_score,
            report.total_rolls
        );
        if let Some(rank) = report.rank {
            text.push_str(&format!(", leaderboard #{}", rank));
        }

        Ok(Reply::new(
            text,
            json!({
                "label": report.outcome.label,
                "rarity": report.outcome.rarity_score,
                "tier": report.outcome.tier,
                "modifiers": report.outcome.modifiers,
                "roll_number": report.record.roll_number,
                "total_rolls": report.total_rolls,
                "rank": report.rank,
            }),
        ))
    }
}
