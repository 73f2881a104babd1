// EHR Log Analyzer - core/summary.rs
//
// Headline metrics for the stat cards and the summary window. Derived
// purely from a ParseResult.

use crate::core::model::{ParseResult, ReportSeverity};
use chrono::NaiveTime;
use std::collections::HashMap;

/// Metrics shown above the tables and in the summary window.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Metrics {
    /// Number of unique players.
    pub total_players: usize,

    /// Sum of all RPC counts.
    pub total_rpc_events: u64,

    /// Number of chat lines.
    pub chat_messages: usize,

    /// Number of EAC reports.
    pub eac_reports: usize,

    /// EAC reports raised from fatal entries.
    pub fatal_reports: usize,

    /// Earliest and latest chat timestamps, when any parse as `HH:MM:SS`.
    pub chat_span: Option<(NaiveTime, NaiveTime)>,

    /// RPC types by total count, highest first (ties alphabetical).
    pub top_rpc_types: Vec<(String, u64)>,
}

impl Metrics {
    /// Compute metrics for `result`.
    pub fn from_result(result: &ParseResult) -> Self {
        let chat_times = result
            .chats
            .iter()
            .filter_map(|c| NaiveTime::parse_from_str(&c.timestamp, "%H:%M:%S").ok());
        let chat_span = chat_times.fold(None, |span: Option<(NaiveTime, NaiveTime)>, t| {
            Some(match span {
                Some((lo, hi)) => (lo.min(t), hi.max(t)),
                None => (t, t),
            })
        });

        let mut by_type: HashMap<&str, u64> = HashMap::new();
        for rpc in &result.rpcs {
            *by_type.entry(rpc.rpc_type.as_str()).or_insert(0) += rpc.count;
        }
        let mut top_rpc_types: Vec<(String, u64)> = by_type
            .into_iter()
            .map(|(t, n)| (t.to_string(), n))
            .collect();
        top_rpc_types.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));

        Self {
            total_players: result.players.len(),
            total_rpc_events: result.total_rpc_events(),
            chat_messages: result.chats.len(),
            eac_reports: result.eac_reports.len(),
            fatal_reports: result
                .eac_reports
                .iter()
                .filter(|r| r.severity == ReportSeverity::Fatal)
                .count(),
            chat_span,
            top_rpc_types,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::model::{ChatMessage, EacReport, RpcEvent};

    fn chat(ts: &str) -> ChatMessage {
        ChatMessage {
            timestamp: ts.to_string(),
            sender: "x".to_string(),
            message: "y".to_string(),
        }
    }

    #[test]
    fn test_empty_result_metrics() {
        let m = Metrics::from_result(&ParseResult::default());
        assert_eq!(m, Metrics::default());
    }

    #[test]
    fn test_metrics_counts_and_span() {
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
                    count: 1,
                },
                RpcEvent {
                    player_id: "2".to_string(),
                    player_name: "B".to_string(),
                    rpc_type: "Kill".to_string(),
                    count: 6,
                },
            ],
            chats: vec![chat("14:22:05"), chat("09:00:00"), chat("99:99:99")],
            eac_reports: vec![EacReport {
                timestamp: "Unknown".to_string(),
                report: "r".to_string(),
                severity: ReportSeverity::Fatal,
                full_text: "r".to_string(),
            }],
            ..Default::default()
        };
        let m = Metrics::from_result(&result);
        assert_eq!(m.total_rpc_events, 10);
        assert_eq!(m.chat_messages, 3);
        assert_eq!(m.fatal_reports, 1);
        assert_eq!(
            m.chat_span,
            Some((
                NaiveTime::from_hms_opt(9, 0, 0).unwrap(),
                NaiveTime::from_hms_opt(14, 22, 5).unwrap()
            ))
        );
        assert_eq!(
            m.top_rpc_types,
            vec![("Kill".to_string(), 6), ("Move".to_string(), 4)]
        );
    }
}
