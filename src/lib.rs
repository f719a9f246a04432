//! Rollkeeper
//!
//! A chat roll game: every roll draws a weighted rarity tier plus stacked
//! modifiers, bumps a global counter and may enter a top-10 leaderboard. Game
//! state lives in JSON documents on a remote versioned content API and is
//! written with compare-and-swap plus a bounded retry.
//!
//! # Modules
//!
//! - `types`: tiers, roll records and the persisted documents
//! - `engine`: tier tables, random sources and the roll engine
//! - `leaderboard`: bounded top-10 insertion
//! - `store`: optimistic document store over a `ContentBackend`
//! - `registry`: guild to roll-channel mapping
//! - `bot`: shared state, cooldowns and command errors
//! - `commands`: the chat commands and their router
//! - `server`: JSON-lines bridge for the chat gateway
//! - `api`: keep-alive HTTP endpoint
//! - `config`: environment configuration
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use rollkeeper::{BotState, BridgeServer, CommandRouter};
//!
//! #[tokio::main]
//! async fn main() {
//!     let state = Arc::new(BotState::default());
//!     let server = BridgeServer::new(CommandRouter::with_all_commands(state));
//!     let stdin = tokio::io::BufReader::new(tokio::io::stdin());
//!     server.run(stdin, tokio::io::stdout()).await.unwrap();
//! }
//! ```

pub mod api;
pub mod bot;
pub mod commands;
pub mod config;
pub mod engine;
pub mod leaderboard;
pub mod registry;
pub mod server;
pub mod store;
pub mod types;

// Re-export commonly used items at crate root
pub use bot::{BotState, CommandError};
pub use commands::{Command, CommandRouter, Reply};
pub use config::BotConfig;
pub use engine::{RollEngine, RollOutcome};
pub use registry::ChannelRegistry;
pub use server::BridgeServer;
pub use store::{ContentBackend, DocumentStore, StoreError, Versioned};
pub use types::{BotResult, ChannelMap, Invocation, RollRecord, StatsDocument};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");
