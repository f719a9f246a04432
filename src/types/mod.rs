//! Data types for the roll game
//!
//! This module contains the tier definitions, the persisted documents and the
//! invocation a command runs on.

mod channels;
mod invocation;
mod record;
mod stats;
mod tier;

pub use channels::ChannelMap;
pub use invocation::{Invocation, DIRECT_MESSAGE_LABEL};
pub use record::RollRecord;
pub use stats::StatsDocument;
pub use tier::{ModifierTier, RarityTier};

/// Result type for the binary and the bridge loop
pub type BotResult<T> = Result<T, Box<dyn std::error::Error + Send + Sync>>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stats_document_defaults_missing_fields() {
        let doc: StatsDocument = serde_json::from_str("{}").unwrap();
        assert_eq!(doc.total_rolls, 0);
        assert!(doc.leaderboard.is_empty());
        assert!(doc.extra.is_empty());
    }

    #[test]
    fn test_stats_document_keeps_unknown_fields() {
        let raw = r#"{"total_rolls": 3, "leaderboard": [], "season": "winter"}"#;
        let doc: StatsDocument = serde_json::from_str(raw).unwrap();
        assert_eq!(doc.total_rolls, 3);
        assert_eq!(doc.extra.get("season").and_then(|v| v.as_str()), Some("winter"));

        let back = serde_json::to_value(&doc).unwrap();
        assert_eq!(back["season"], "winter");
        assert_eq!(back["total_rolls"], 3);
    }

    #[test]
    fn test_roll_record_wire_format() {
        let record = RollRecord {
            name: "✨ Shiny Rare".to_string(),
            rarity: 200.0,
            user: "alice".to_string(),
            user_id: 123456789012345678,
            server: "Guild".to_string(),
            timestamp: 1_700_000_000,
            roll_number: 12,
        };
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["user_id"], 123456789012345678u64);
        assert_eq!(json["roll_number"], 12);
        assert_eq!(json["rarity"], 200.0);
    }

    #[test]
    fn test_invocation_server_label() {
        let dm = Invocation::direct("roll", 1, "alice", 10);
        assert_eq!(dm.server_label(), DIRECT_MESSAGE_LABEL);

        let guild = Invocation::in_guild("roll", 1, "alice", 5, "Dice Hall", 10);
        assert_eq!(guild.server_label(), "Dice Hall");

        let unnamed = Invocation {
            guild_name: None,
            ..guild
        };
        assert_eq!(unnamed.server_label(), "Guild 5");
    }

    #[test]
    fn test_invocation_optional_fields() {
        let raw = r#"{"user_id": 1, "user_name": "bob", "channel_id": 3}"#;
        let inv: Invocation = serde_json::from_str(raw).unwrap();
        assert!(inv.command.is_empty());
        assert_eq!(inv.guild_id, None);
    }

    fn record(rarity: f64) -> RollRecord {
        RollRecord {
            name: "🔵 Rare".to_string(),
            rarity,
            user: "alice".to_string(),
            user_id: 1,
            server: "Guild".to_string(),
            timestamp: 1_700_000_000,
            roll_number: 0,
        }
    }

    #[test]
    fn test_record_roll_counts_and_ranks() {
        let mut fresh: StatsDocument =
            serde_json::from_str(r#"{"total_rolls": 5, "motd": "hi"}"#).unwrap();

        let (placed, rank) = fresh.record_roll(record(20.0));
        assert_eq!(placed.roll_number, 6);
        assert_eq!(rank, Some(1));
        assert_eq!(fresh.total_rolls, 6);
        assert_eq!(fresh.leaderboard, vec![placed]);
        assert_eq!(fresh.extra.get("motd").and_then(|v| v.as_str()), Some("hi"));
    }

    #[test]
    fn test_record_roll_keeps_existing_entries() {
        let mut doc = StatsDocument::default();
        doc.record_roll(record(100.0));
        let (placed, rank) = doc.record_roll(record(20.0));
        assert_eq!(placed.roll_number, 2);
        assert_eq!(rank, Some(2));
        assert_eq!(doc.leaderboard.len(), 2);
    }
}
