//! Command invocation as delivered by the chat gateway

use serde::{Deserialize, Serialize};

/// Label used as the server name for rolls outside a guild
pub const DIRECT_MESSAGE_LABEL: &str = "Direct Message";

/// Who invoked which command, and where
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Invocation {
    /// Command name; empty means the default command
    #[serde(default)]
    pub command: String,
    pub user_id: u64,
    pub user_name: String,
    #[serde(default)]
    pub guild_id: Option<u64>,
    #[serde(default)]
    pub guild_name: Option<String>,
    pub channel_id: u64,
}

impl Invocation {
    /// Invocation in a guild channel
    pub fn in_guild(
        command: impl Into<String>,
        user_id: u64,
        user_name: impl Into<String>,
        guild_id: u64,
        guild_name: impl Into<String>,
        channel_id: u64,
    ) -> Self {
        Self {
            command: command.into(),
            user_id,
            user_name: user_name.into(),
            guild_id: Some(guild_id),
            guild_name: Some(guild_name.into()),
            channel_id,
        }
    }

    /// Invocation in a direct-message channel
    pub fn direct(
        command: impl Into<String>,
        user_id: u64,
        user_name: impl Into<String>,
        channel_id: u64,
    ) -> Self {
        Self {
            command: command.into(),
            user_id,
            user_name: user_name.into(),
            guild_id: None,
            guild_name: None,
            channel_id,
        }
    }

    /// Server label stored on roll records
    pub fn server_label(&self) -> String {
        match (&self.guild_name, self.guild_id) {
            (Some(name), _) => name.clone(),
            (None, Some(id)) => format!("Guild {}", id),
            (None, None) => DIRECT_MESSAGE_LABEL.to_string(),
        }
    }
}
