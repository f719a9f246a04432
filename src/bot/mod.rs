//! Bot state and game operations
//!
//! `BotState` is the context every command runs against. It serialises
//! stats updates inside the process; the document store's CAS protocol
//! handles everyone else.

mod cooldown;
mod error;
mod state;

pub use cooldown::CooldownTable;
pub use error::{CommandError, CommandResult};
pub use state::{BotState, LeaderboardView, RollReport};
