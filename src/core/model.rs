// EHR Log Analyzer - core/model.rs
//
// Core data model types. Pure data definitions with no I/O, no UI,
// no platform dependencies.
//
// These types are the shared vocabulary across all layers. Serialised
// field names are camelCase so exported CSV headers read
// `friendCode`, `hashedPuid`, `rpcType`, `fullText`, etc.

use serde::{Deserialize, Serialize};

// =============================================================================
// Log Entry (output of segmentation, input of extraction)
// =============================================================================

/// One rendered log line from the source document.
///
/// Ephemeral: entries exist only for the duration of a single parse and are
/// never kept in the result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogEntry {
    /// Full text content of the line, as rendered.
    pub text: String,

    /// Classification carried by the line's markup.
    pub severity: EntrySeverity,
}

impl LogEntry {
    pub fn new(text: impl Into<String>, severity: EntrySeverity) -> Self {
        Self {
            text: text.into(),
            severity,
        }
    }
}

/// Severity classification of a log entry, recovered from markup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntrySeverity {
    #[default]
    Normal,
    Error,
    Fatal,
}

// =============================================================================
// Extracted records
// =============================================================================

/// A player identity seen in a `[Session]` line.
///
/// Keyed by `client_id`; the first sighting of a client id is authoritative.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Player {
    /// Display name with `joined the lobby` / `Hosted room` suffixes removed.
    pub name: String,
    pub friend_code: String,
    pub hashed_puid: String,
    /// `"Unknown"` when the session line carried no platform.
    pub platform: String,
    pub client_id: String,
}

/// Count of received RPCs for one (player id, player name, RPC type) key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RpcEvent {
    pub player_id: String,
    pub player_name: String,
    pub rpc_type: String,
    pub count: u64,
}

/// A single received chat line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatMessage {
    /// `HH:MM:SS` as written in the log.
    pub timestamp: String,
    pub sender: String,
    pub message: String,
}

/// Severity of an anti-cheat report, taken from the entry classification
/// rather than from the report text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ReportSeverity {
    Fatal,
    Error,
}

impl ReportSeverity {
    /// Returns all variants in display order (most severe first).
    pub fn all() -> &'static [ReportSeverity] {
        &[ReportSeverity::Fatal, ReportSeverity::Error]
    }

    /// Human-readable label for display.
    pub fn label(&self) -> &'static str {
        match self {
            ReportSeverity::Fatal => "Fatal",
            ReportSeverity::Error => "Error",
        }
    }
}

impl std::fmt::Display for ReportSeverity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// An Easy Anti-Cheat report found in an error or fatal entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EacReport {
    /// `HH:MM:SS`, or `"Unknown"` when the entry had no timestamp.
    pub timestamp: String,
    /// Extracted report body.
    pub report: String,
    pub severity: ReportSeverity,
    /// The original entry text, kept for display and free-text search.
    pub full_text: String,
}

// =============================================================================
// Parse result
// =============================================================================

/// Everything extracted from one document.
///
/// The four collections are independent views over the same source; none
/// refers to another.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParseResult {
    /// Unique players, in first-seen order.
    pub players: Vec<Player>,
    /// RPC aggregates, in first-seen key order.
    pub rpcs: Vec<RpcEvent>,
    /// Chat lines, in document order.
    pub chats: Vec<ChatMessage>,
    /// Anti-cheat reports, in document order.
    pub eac_reports: Vec<EacReport>,
}

impl ParseResult {
    /// Sum of all RPC counts (not the number of distinct keys).
    pub fn total_rpc_events(&self) -> u64 {
        self.rpcs.iter().map(|r| r.count).sum()
    }

    /// True when nothing at all was extracted.
    pub fn is_empty(&self) -> bool {
        self.players.is_empty()
            && self.rpcs.is_empty()
            && self.chats.is_empty()
            && self.eac_reports.is_empty()
    }

    /// Number of records in the given category.
    pub fn len_of(&self, category: Category) -> usize {
        match category {
            Category::Players => self.players.len(),
            Category::Rpcs => self.rpcs.len(),
            Category::Chats => self.chats.len(),
            Category::EacReports => self.eac_reports.len(),
        }
    }
}

// =============================================================================
// Category
// =============================================================================

/// The four extracted collections, as presented in tabs and exports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    #[default]
    Players,
    Rpcs,
    Chats,
    EacReports,
}

impl Category {
    /// Returns all variants in tab order.
    pub fn all() -> &'static [Category] {
        &[
            Category::Players,
            Category::Rpcs,
            Category::Chats,
            Category::EacReports,
        ]
    }

    /// Tab label.
    pub fn label(&self) -> &'static str {
        match self {
            Category::Players => "Player Sessions",
            Category::Rpcs => "RPC Events",
            Category::Chats => "Chat Transcript",
            Category::EacReports => "EAC Reports",
        }
    }

    /// Default export file stem.
    pub fn export_stem(&self) -> &'static str {
        use crate::util::constants;
        match self {
            Category::Players => constants::PLAYERS_EXPORT_NAME,
            Category::Rpcs => constants::RPCS_EXPORT_NAME,
            Category::Chats => constants::CHATS_EXPORT_NAME,
            Category::EacReports => constants::EAC_EXPORT_NAME,
        }
    }

    /// Whether this category offers a categorical filter dropdown.
    pub fn has_category_filter(&self) -> bool {
        matches!(self, Category::Rpcs | Category::EacReports)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_total_rpc_events_sums_counts() {
        let result = ParseResult {
            rpcs: vec![
                RpcEvent {
                    player_id: "1".to_string(),
                    player_name: "A".to_string(),
                    rpc_type: "Move".to_string(),
                    count: 3,
                },
                RpcEvent {
                    player_id: "2".to_string(),
                    player_name: "B".to_string(),
                    rpc_type: "Move".to_string(),
                    count: 4,
                },
            ],
            ..Default::default()
        };
        assert_eq!(result.total_rpc_events(), 7);
        assert_eq!(result.len_of(Category::Rpcs), 2);
        assert!(!result.is_empty());
    }

    #[test]
    fn test_only_rpc_and_eac_tabs_have_category_filter() {
        let with_filter: Vec<_> = Category::all()
            .iter()
            .filter(|c| c.has_category_filter())
            .collect();
        assert_eq!(with_filter, vec![&Category::Rpcs, &Category::EacReports]);
        assert!(ParseResult::default().is_empty());
    }

    #[test]
    fn test_player_serialises_camel_case() {
        let p = Player {
            name: "Alice".to_string(),
            friend_code: "AL-123".to_string(),
            hashed_puid: "abc".to_string(),
            platform: "Unknown".to_string(),
            client_id: "7".to_string(),
        };
        let json = serde_json::to_string(&p).unwrap();
        assert!(json.contains("\"friendCode\":\"AL-123\""));
        assert!(json.contains("\"hashedPuid\""));
        assert!(json.contains("\"clientId\":\"7\""));
    }
}
