// EHR Log Analyzer - core/parser.rs
//
// Single-pass extraction engine. Each entry is offered to four independent
// extractors (session, RPC, chat, EAC report); matches are accumulated into
// the four collections of a ParseResult.
//
// Core layer: pure, synchronous, no I/O. The only state carried across
// entries is the player set (first sighting of a client id wins) and the
// RPC tally (counts per exact composite key).

use crate::core::document;
use crate::core::model::{
    ChatMessage, EacReport, EntrySeverity, LogEntry, ParseResult, Player, ReportSeverity,
    RpcEvent,
};
use crate::util::constants::UNKNOWN;
use crate::util::error::ParseError;
use regex::Regex;
use std::collections::HashMap;
use std::sync::OnceLock;

/// Compiled extraction patterns, built once per process.
struct Patterns {
    session: Regex,
    name_joined: Regex,
    name_hosted: Regex,
    rpc: Regex,
    chat: Regex,
    eac_marker: Regex,
    clock: Regex,
    eac_report_colon: Regex,
    eac_bracket: Regex,
}

fn patterns() -> &'static Patterns {
    static PATTERNS: OnceLock<Patterns> = OnceLock::new();

    PATTERNS.get_or_init(|| {
        // Patterns are fixed literals exercised by the unit tests below, so a
        // mistake shows up as a failing test rather than a runtime panic.
        fn re(pat: &str) -> Regex {
            Regex::new(pat).expect("extraction pattern: invalid regex")
        }

        Patterns {
            session: re(concat!(
                r"(?i)\[Session\](.*?)\s*\(ClientID:\s*([0-9]+)\s*/\s*FriendCode:\s*(.*?)\s*/\s*",
                r"(?:HashPuid|Hashed PUID):\s*([a-f0-9]+)\s*(?:/\s*Platform:\s*(.*?))?\)",
            )),
            name_joined: re(r"\s*joined the lobby.*"),
            name_hosted: re(r"\s*Hosted room.*"),
            rpc: re(r"\[ReceiveRPC\]From ID:\s*([0-9]+)\s*\((.*?)\)\s*:\s*[0-9]+\s*\((.*?)\)"),
            chat: re(r"\[([0-9]{2}:[0-9]{2}:[0-9]{2})\]\[ReceiveChat\](.*?):(.*)"),
            eac_marker: re(r"(?i)\[EAC"),
            clock: re(r"\[([0-9]{2}:[0-9]{2}:[0-9]{2})\]"),
            eac_report_colon: re(r"(?i)EAC report:(.*)"),
            eac_bracket: re(r"(?i)\[EAC.*?\](.*)"),
        }
    })
}

// =============================================================================
// Entry points
// =============================================================================

/// Parse a complete HTML client log.
///
/// Fails only when the text is not a document at all; in that case no
/// partial result is returned. A document with no recognisable lines yields
/// an empty (but valid) result.
pub fn parse_document(content: &str) -> Result<ParseResult, ParseError> {
    let entries = document::segment_html(content)?;
    Ok(extract_entries(&entries))
}

/// Run all four extractors over pre-segmented entries, in order.
pub fn extract_entries(entries: &[LogEntry]) -> ParseResult {
    let mut players = PlayerSet::default();
    let mut rpcs = RpcTally::default();
    let mut chats = Vec::new();
    let mut eac_reports = Vec::new();

    for entry in entries {
        if let Some(player) = match_session(&entry.text) {
            players.insert(player);
        }
        if let Some((player_id, player_name, rpc_type)) = match_rpc(&entry.text) {
            rpcs.record(player_id, player_name, rpc_type);
        }
        if let Some(chat) = match_chat(&entry.text) {
            chats.push(chat);
        }
        if let Some(report) = match_eac_report(entry) {
            tracing::trace!(
                severity = %report.severity,
                line = crate::util::logging::preview(&entry.text),
                "EAC report extracted"
            );
            eac_reports.push(report);
        }
    }

    let result = ParseResult {
        players: players.into_vec(),
        rpcs: rpcs.into_vec(),
        chats,
        eac_reports,
    };

    tracing::debug!(
        entries = entries.len(),
        players = result.players.len(),
        rpc_keys = result.rpcs.len(),
        chats = result.chats.len(),
        eac_reports = result.eac_reports.len(),
        "Extraction complete"
    );

    result
}

// =============================================================================
// Extractors
// =============================================================================

/// Match a `[Session]` line and build the player it announces.
pub fn match_session(text: &str) -> Option<Player> {
    let p = patterns();
    let caps = p.session.captures(text)?;

    let raw_name = caps.get(1).map_or("", |m| m.as_str()).trim();
    let name = p.name_joined.replace(raw_name, "");
    let name = p.name_hosted.replace(&name, "");

    let field = |i: usize| caps.get(i).map_or("", |m| m.as_str()).trim().to_string();

    Some(Player {
        name: name.trim().to_string(),
        friend_code: field(3),
        hashed_puid: field(4),
        platform: caps
            .get(5)
            .map(|m| m.as_str().trim().to_string())
            .unwrap_or_else(|| UNKNOWN.to_string()),
        client_id: field(2),
    })
}

/// Match a `[ReceiveRPC]` line, returning (player id, player name, RPC type).
pub fn match_rpc(text: &str) -> Option<(&str, &str, &str)> {
    let caps = patterns().rpc.captures(text)?;
    Some((
        caps.get(1)?.as_str(),
        caps.get(2)?.as_str(),
        caps.get(3)?.as_str(),
    ))
}

/// Match a `[HH:MM:SS][ReceiveChat]sender:message` line.
///
/// The sender ends at the first colon; the message may contain further
/// colons.
pub fn match_chat(text: &str) -> Option<ChatMessage> {
    let caps = patterns().chat.captures(text)?;
    Some(ChatMessage {
        timestamp: caps.get(1)?.as_str().to_string(),
        sender: caps.get(2)?.as_str().trim().to_string(),
        message: caps.get(3)?.as_str().trim().to_string(),
    })
}

/// Build an EAC report from an error or fatal entry mentioning `[EAC`.
///
/// Entries tagged normal never produce a report, whatever their text.
/// The report body is taken from the first branch that matches, in this
/// fixed order:
///   1. `EAC report:<rest of line>`
///   2. `[EAC...]<rest of line>`
///   3. the whole text with its first `[HH:MM:SS]` removed
pub fn match_eac_report(entry: &LogEntry) -> Option<EacReport> {
    let severity = match entry.severity {
        EntrySeverity::Fatal => ReportSeverity::Fatal,
        EntrySeverity::Error => ReportSeverity::Error,
        EntrySeverity::Normal => return None,
    };

    let p = patterns();
    let text = entry.text.as_str();
    if !p.eac_marker.is_match(text) {
        return None;
    }

    let timestamp = p
        .clock
        .captures(text)
        .and_then(|c| c.get(1))
        .map_or_else(|| UNKNOWN.to_string(), |m| m.as_str().to_string());

    let report = p
        .eac_report_colon
        .captures(text)
        .or_else(|| p.eac_bracket.captures(text))
        .and_then(|c| c.get(1))
        .map(|m| m.as_str().trim().to_string())
        .unwrap_or_else(|| p.clock.replace(text, "").trim().to_string());

    Some(EacReport {
        timestamp,
        report,
        severity,
        full_text: text.trim().to_string(),
    })
}

// =============================================================================
// Ordered accumulators
// =============================================================================

/// Players keyed by client id, in first-seen order. Later sightings of the
/// same client id are ignored.
#[derive(Default)]
struct PlayerSet {
    seen: HashMap<String, usize>,
    players: Vec<Player>,
}

impl PlayerSet {
    fn insert(&mut self, player: Player) {
        if self.seen.contains_key(&player.client_id) {
            return;
        }
        self.seen
            .insert(player.client_id.clone(), self.players.len());
        self.players.push(player);
    }

    fn into_vec(self) -> Vec<Player> {
        self.players
    }
}

/// RPC counts keyed by the exact (id, name, type) triple, in first-seen
/// key order.
#[derive(Default)]
struct RpcTally {
    index: HashMap<(String, String, String), usize>,
    events: Vec<RpcEvent>,
}

impl RpcTally {
    fn record(&mut self, player_id: &str, player_name: &str, rpc_type: &str) {
        let key = (
            player_id.to_string(),
            player_name.to_string(),
            rpc_type.to_string(),
        );
        if let Some(&idx) = self.index.get(&key) {
            self.events[idx].count += 1;
            return;
        }
        self.index.insert(key, self.events.len());
        self.events.push(RpcEvent {
            player_id: player_id.to_string(),
            player_name: player_name.to_string(),
            rpc_type: rpc_type.to_string(),
            count: 1,
        });
    }

    fn into_vec(self) -> Vec<RpcEvent> {
        self.events
    }
}
