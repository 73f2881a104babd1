// EHR Log Analyzer - core/filter.rs
//
// Search and categorical filters over the four extracted collections.
// Text search and the category filter are AND-combined.
// Core layer: pure logic, no I/O or UI dependencies.

use crate::core::model::{
    Category, ChatMessage, EacReport, ParseResult, Player, ReportSeverity, RpcEvent,
};
use crate::util::error::FilterError;
use regex::Regex;

/// Complete filter state for the active tab.
#[derive(Debug, Clone, Default)]
pub struct FilterState {
    /// Substring text search (case-insensitive). Empty = no filter.
    pub text_search: String,

    /// Compiled regex search. None = no regex filter.
    pub regex_search: Option<Regex>,

    /// RPC type to keep (None = all types). Applies to the RPC tab only.
    pub rpc_type: Option<String>,

    /// Report severity to keep (None = all). Applies to the EAC tab only.
    pub report_severity: Option<ReportSeverity>,
}

impl FilterState {
    /// Returns true if no filters are active.
    pub fn is_empty(&self) -> bool {
        self.text_search.is_empty()
            && self.regex_search.is_none()
            && self.rpc_type.is_none()
            && self.report_severity.is_none()
    }

    /// Set the regex search pattern, compiling it.
    /// Returns an error if the pattern is invalid.
    pub fn set_regex(&mut self, pattern: &str) -> Result<(), FilterError> {
        if pattern.is_empty() {
            self.regex_search = None;
            return Ok(());
        }
        let regex = Regex::new(pattern).map_err(|e| FilterError::InvalidRegex {
            pattern: pattern.to_string(),
            source: e,
        })?;
        self.regex_search = Some(regex);
        Ok(())
    }

    /// Drop the categorical filters (used when switching tabs).
    pub fn clear_category(&mut self) {
        self.rpc_type = None;
        self.report_severity = None;
    }

    /// True when any of `fields` satisfies the text and regex searches.
    fn matches_text(&self, text_lower: &str, fields: &[&str]) -> bool {
        let text_ok = text_lower.is_empty()
            || fields.iter().any(|f| f.to_lowercase().contains(text_lower));
        let regex_ok = self
            .regex_search
            .as_ref()
            .map_or(true, |re| fields.iter().any(|f| re.is_match(f)));
        text_ok && regex_ok
    }
}

/// Indices of the rows visible in `category` under `filter`.
///
/// Indices point into the matching collection of `result`. The RPC view is
/// ordered by count, highest first (ties keep first-seen order); all other
/// views keep document order.
pub fn apply_filters(
    result: &ParseResult,
    category: Category,
    filter: &FilterState,
) -> Vec<usize> {
    match category {
        Category::Players => filter_players(&result.players, filter),
        Category::Rpcs => filter_rpcs(&result.rpcs, filter),
        Category::Chats => filter_chats(&result.chats, filter),
        Category::EacReports => filter_eac_reports(&result.eac_reports, filter),
    }
}

/// Search over name, friend code and hashed PUID.
pub fn filter_players(players: &[Player], filter: &FilterState) -> Vec<usize> {
    let text_lower = filter.text_search.to_lowercase();
    players
        .iter()
        .enumerate()
        .filter(|(_, p)| {
            filter.matches_text(
                &text_lower,
                &[
                    p.name.as_str(),
                    p.friend_code.as_str(),
                    p.hashed_puid.as_str(),
                ],
            )
        })
        .map(|(idx, _)| idx)
        .collect()
}

/// RPC type filter, then search over player name and RPC type; sorted by
/// count descending.
pub fn filter_rpcs(rpcs: &[RpcEvent], filter: &FilterState) -> Vec<usize> {
    let text_lower = filter.text_search.to_lowercase();
    let mut indices: Vec<usize> = rpcs
        .iter()
        .enumerate()
        .filter(|(_, r)| {
            filter
                .rpc_type
                .as_deref()
                .map_or(true, |t| r.rpc_type == t)
        })
        .filter(|(_, r)| {
            filter.matches_text(&text_lower, &[r.player_name.as_str(), r.rpc_type.as_str()])
        })
        .map(|(idx, _)| idx)
        .collect();
    indices.sort_by(|&a, &b| rpcs[b].count.cmp(&rpcs[a].count));
    indices
}

/// Search over sender and message.
pub fn filter_chats(chats: &[ChatMessage], filter: &FilterState) -> Vec<usize> {
    let text_lower = filter.text_search.to_lowercase();
    chats
        .iter()
        .enumerate()
        .filter(|(_, c)| {
            filter.matches_text(&text_lower, &[c.sender.as_str(), c.message.as_str()])
        })
        .map(|(idx, _)| idx)
        .collect()
}

/// Severity filter, then search over report body and full text.
pub fn filter_eac_reports(reports: &[EacReport], filter: &FilterState) -> Vec<usize> {
    let text_lower = filter.text_search.to_lowercase();
    reports
        .iter()
        .enumerate()
        .filter(|(_, r)| filter.report_severity.map_or(true, |s| r.severity == s))
        .filter(|(_, r)| {
            filter.matches_text(&text_lower, &[r.report.as_str(), r.full_text.as_str()])
        })
        .map(|(idx, _)| idx)
        .collect()
}

/// Distinct RPC types, sorted, for the type filter dropdown.
pub fn rpc_types(rpcs: &[RpcEvent]) -> Vec<String> {
    let mut types: Vec<String> = rpcs.iter().map(|r| r.rpc_type.clone()).collect();
    types.sort();
    types.dedup();
    types
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rpc(id: &str, name: &str, kind: &str, count: u64) -> RpcEvent {
        RpcEvent {
            player_id: id.to_string(),
            player_name: name.to_string(),
            rpc_type: kind.to_string(),
            count,
        }
    }

    fn report(severity: ReportSeverity, body: &str) -> EacReport {
        EacReport {
            timestamp: "Unknown".to_string(),
            report: body.to_string(),
            severity,
            full_text: format!("[EAC] {body}"),
        }
    }

    #[test]
    fn test_empty_filter_returns_all() {
        let chats = vec![
            ChatMessage {
                timestamp: "10:00:00".to_string(),
                sender: "A".to_string(),
                message: "hi".to_string(),
            },
            ChatMessage {
                timestamp: "10:00:01".to_string(),
                sender: "B".to_string(),
                message: "yo".to_string(),
            },
        ];
        assert!(FilterState::default().is_empty());
        assert_eq!(filter_chats(&chats, &FilterState::default()), vec![0, 1]);
    }

    #[test]
    fn test_player_search_is_case_insensitive_across_fields() {
        let players = vec![
            Player {
                name: "Alice".to_string(),
                friend_code: "ally#1".to_string(),
                hashed_puid: "aa".to_string(),
                platform: "Unknown".to_string(),
                client_id: "1".to_string(),
            },
            Player {
                name: "Bob".to_string(),
                friend_code: "bob#2".to_string(),
                hashed_puid: "FFEE".to_string(),
                platform: "Unknown".to_string(),
                client_id: "2".to_string(),
            },
        ];
        let by_name = FilterState {
            text_search: "ALI".to_string(),
            ..Default::default()
        };
        assert_eq!(filter_players(&players, &by_name), vec![0]);

        let by_puid = FilterState {
            text_search: "ffe".to_string(),
            ..Default::default()
        };
        assert_eq!(filter_players(&players, &by_puid), vec![1]);
    }

    #[test]
    fn test_rpc_sorted_by_count_desc_with_stable_ties() {
        let rpcs = vec![
            rpc("1", "A", "Move", 2),
            rpc("2", "B", "Chat", 9),
            rpc("3", "C", "Move", 2),
            rpc("4", "D", "Kill", 5),
        ];
        assert_eq!(filter_rpcs(&rpcs, &FilterState::default()), vec![1, 3, 0, 2]);
    }

    #[test]
    fn test_rpc_type_filter_is_exact() {
        let rpcs = vec![rpc("1", "A", "Move", 2), rpc("1", "A", "move", 7)];
        let filter = FilterState {
            rpc_type: Some("Move".to_string()),
            ..Default::default()
        };
        assert_eq!(filter_rpcs(&rpcs, &filter), vec![0]);
        assert_eq!(rpc_types(&rpcs), vec!["Move".to_string(), "move".to_string()]);
    }

    #[test]
    fn test_eac_severity_and_text_combined() {
        let reports = vec![
            report(ReportSeverity::Fatal, "speed hack"),
            report(ReportSeverity::Error, "speed hack"),
            report(ReportSeverity::Fatal, "timeout"),
        ];
        let filter = FilterState {
            text_search: "SPEED".to_string(),
            report_severity: Some(ReportSeverity::Fatal),
            ..Default::default()
        };
        assert_eq!(filter_eac_reports(&reports, &filter), vec![0]);
    }

    #[test]
    fn test_regex_filter() {
        let rpcs = vec![
            rpc("1", "A", "SetName", 1),
            rpc("2", "B", "SetColor", 1),
            rpc("3", "C", "Move", 1),
        ];
        let mut filter = FilterState::default();
        filter.set_regex(r"^Set").unwrap();
        let mut got = filter_rpcs(&rpcs, &filter);
        got.sort();
        assert_eq!(got, vec![0, 1]);
    }

    #[test]
    fn test_invalid_regex() {
        let mut filter = FilterState::default();
        assert!(filter.set_regex("[invalid").is_err());
    }

    #[test]
    fn test_clear_category_keeps_search() {
        let mut filter = FilterState {
            text_search: "x".to_string(),
            rpc_type: Some("Move".to_string()),
            report_severity: Some(ReportSeverity::Error),
            ..Default::default()
        };
        filter.clear_category();
        assert_eq!(filter.text_search, "x");
        assert!(filter.rpc_type.is_none());
        assert!(filter.report_severity.is_none());
    }
}
