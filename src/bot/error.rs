//! Errors surfaced to whoever invoked a command

use std::time::Duration;

use thiserror::Error;

use crate::store::StoreError;

/// Result type for command execution
pub type CommandResult<T> = Result<T, CommandError>;

/// User-visible command failures. None of them are fatal to the process.
#[derive(Debug, Error)]
pub enum CommandError {
    #[error("This command can only be used in a server.")]
    NotInGuild,

    #[error("No roll channel is set up for this server. Run setup in the channel to use.")]
    NoChannelConfigured,

    #[error("Rolls happen in <#{expected}> on this server.")]
    WrongChannel { expected: u64 },

    #[error("Slow down! Try again in {:.1}s.", .remaining.as_secs_f64())]
    Cooldown { remaining: Duration },

    #[error("Unknown command '{0}'.")]
    UnknownCommand(String),

    #[error("Failed to load game data: {0}")]
    LoadFailed(#[source] StoreError),

    #[error("Failed to save, your roll was not recorded.")]
    SaveFailed,
}

impl CommandError {
    /// Stable machine-readable kind for the bridge protocol
    pub fn kind(&self) -> &'static str {
        match self {
            CommandError::NotInGuild => "not_in_guild",
            CommandError::NoChannelConfigured => "no_channel_configured",
            CommandError::WrongChannel { .. } => "wrong_channel",
            CommandError::Cooldown { .. } => "cooldown",
            CommandError::UnknownCommand(_) => "unknown_command",
            CommandError::LoadFailed(_) => "load_failed",
            CommandError::SaveFailed => "save_failed",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cooldown_message() {
        let err = CommandError::Cooldown {
            remaining: Duration::from_millis(1500),
        };
        assert_eq!(err.to_string(), "Slow down! Try again in 1.5s.");
        assert_eq!(err.kind(), "cooldown");
    }

    #[test]
    fn test_wrong_channel_mentions_channel() {
        let err = CommandError::WrongChannel { expected: 42 };
        assert_eq!(err.to_string(), "Rolls happen in <#42> on this server.");
    }
}
