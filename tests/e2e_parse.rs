// EHR Log Analyzer - tests/e2e_parse.rs
//
// End-to-end tests for the intake, parsing, filtering and export pipeline.
//
// These tests exercise the real filesystem, real HTML segmentation and the
// real extraction patterns, with no mocks or stubs. They cover the full
// path from a saved HTML client log on disk to exported CSV rows.

use ehr_log_analyzer::app::headless::{self, HeadlessOutput};
use ehr_log_analyzer::core::export::{self, ExportFormat};
use ehr_log_analyzer::core::filter::{self, FilterState};
use ehr_log_analyzer::core::intake;
use ehr_log_analyzer::core::model::{Category, ParseResult, ReportSeverity};
use ehr_log_analyzer::core::parser;
use ehr_log_analyzer::platform::fs::{candidate_file, read_log_file};
use ehr_log_analyzer::util::error::{AnalyzerError, IntakeError, ParseError};
use std::fs;
use std::path::PathBuf;

// =============================================================================
// Helpers
// =============================================================================

const MAX_SIZE: u64 = 4 * 1024 * 1024;

/// Absolute path to an on-disk fixture file.
fn fixture(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

/// Read and parse the sample log through the same path the GUI uses.
fn parse_sample() -> ParseResult {
    let path = fixture("ehr_sample.html");
    let candidate = candidate_file(&path);
    intake::validate_selection(std::slice::from_ref(&candidate), MAX_SIZE)
        .expect("sample fixture should pass intake");
    let content = read_log_file(&path, MAX_SIZE).expect("sample fixture should be readable");
    parser::parse_document(&content).expect("sample fixture should parse")
}

// =============================================================================
// Extraction E2E
// =============================================================================

#[test]
fn e2e_sample_players_deduplicated_and_cleaned() {
    let result = parse_sample();

    assert_eq!(result.players.len(), 2, "players: {:?}", result.players);

    let alice = &result.players[0];
    assert_eq!(alice.name, "Alice");
    assert_eq!(alice.client_id, "1");
    assert_eq!(alice.friend_code, "alice#1234");
    assert_eq!(alice.hashed_puid, "0a1b2c3d");
    // The reconnect line reports Android; the first sighting wins.
    assert_eq!(alice.platform, "StandaloneSteamPC");

    let bob = &result.players[1];
    assert_eq!(bob.name, "Bob");
    assert_eq!(bob.hashed_puid, "deadbeef");
    assert_eq!(bob.platform, "Unknown");
}

#[test]
fn e2e_sample_rpcs_tallied_in_first_seen_order() {
    let result = parse_sample();

    let rows: Vec<_> = result
        .rpcs
        .iter()
        .map(|r| {
            (
                r.player_id.as_str(),
                r.player_name.as_str(),
                r.rpc_type.as_str(),
                r.count,
            )
        })
        .collect();
    assert_eq!(
        rows,
        vec![("1", "Alice", "CheckMurder", 3), ("2", "Bob", "SyncSettings", 1)]
    );
    assert_eq!(result.total_rpc_events(), 4);
}

#[test]
fn e2e_sample_chat_keeps_colons_in_message() {
    let result = parse_sample();

    assert_eq!(result.chats.len(), 2);
    assert_eq!(result.chats[0].timestamp, "19:04:00");
    assert_eq!(result.chats[0].sender, "Alice");
    assert_eq!(result.chats[0].message, "where was the body?");
    assert_eq!(result.chats[1].sender, "Bob");
    assert_eq!(result.chats[1].message, "electrical: near the panel");
}

#[test]
fn e2e_sample_eac_reports_gated_by_entry_severity() {
    let result = parse_sample();

    let rows: Vec<_> = result
        .eac_reports
        .iter()
        .map(|r| (r.timestamp.as_str(), r.report.as_str(), r.severity))
        .collect();
    assert_eq!(
        rows,
        vec![
            (
                "19:05:30",
                "Integrity violation detected for client 2",
                ReportSeverity::Error
            ),
            ("19:06:45", "Client kicked", ReportSeverity::Fatal),
            ("Unknown", "disconnect", ReportSeverity::Error),
        ]
    );
    assert!(result.eac_reports[1].full_text.contains("[EAC Violation]"));
}

// =============================================================================
// Filtering and export E2E
// =============================================================================

#[test]
fn e2e_filters_over_parsed_sample() {
    let result = parse_sample();

    let search = FilterState {
        text_search: "ALICE".to_string(),
        ..Default::default()
    };
    assert_eq!(filter::apply_filters(&result, Category::Players, &search), vec![0]);

    let by_type = FilterState {
        rpc_type: Some("SyncSettings".to_string()),
        ..Default::default()
    };
    assert_eq!(filter::apply_filters(&result, Category::Rpcs, &by_type), vec![1]);

    let fatal_only = FilterState {
        report_severity: Some(ReportSeverity::Fatal),
        ..Default::default()
    };
    assert_eq!(
        filter::apply_filters(&result, Category::EacReports, &fatal_only),
        vec![1]
    );

    assert_eq!(
        filter::rpc_types(&result.rpcs),
        vec!["CheckMurder".to_string(), "SyncSettings".to_string()]
    );
}

#[test]
fn e2e_export_filtered_players_to_csv() {
    let result = parse_sample();
    let dir = tempfile::tempdir().unwrap();
    let dest = dir.path().join("players.csv");

    let search = FilterState {
        text_search: "bob".to_string(),
        ..Default::default()
    };
    let indices = filter::apply_filters(&result, Category::Players, &search);
    let file = fs::File::create(&dest).unwrap();
    let n = export::export_category(
        &result,
        Category::Players,
        &indices,
        ExportFormat::Csv,
        file,
        &dest,
    )
    .unwrap();
    assert_eq!(n, 1);

    let written = fs::read_to_string(&dest).unwrap();
    let lines: Vec<&str> = written.lines().collect();
    assert_eq!(lines[0], "name,friendCode,hashedPuid,platform,clientId");
    assert_eq!(lines[1], "Bob,bob#5678,deadbeef,Unknown,2");
    assert_eq!(lines.len(), 2);
}

#[test]
fn e2e_headless_export_writes_all_categories() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("out");
    let output = HeadlessOutput::ExportDir {
        dir: out.clone(),
        format: ExportFormat::Csv,
    };

    let result = headless::run(&fixture("ehr_sample.html"), &output, MAX_SIZE).unwrap();
    assert_eq!(result.eac_reports.len(), 3);

    let rpcs = fs::read_to_string(out.join("rpc_events.csv")).unwrap();
    assert!(rpcs.starts_with("playerId,playerName,rpcType,count"));
    assert!(rpcs.contains("1,Alice,CheckMurder,3"));

    let chats = fs::read_to_string(out.join("chat_transcript.csv")).unwrap();
    assert!(chats.contains("19:04:09,Bob,electrical: near the panel"));

    assert!(out.join("players.csv").exists());
    assert!(out.join("eac_reports.csv").exists());
}

// =============================================================================
// Rejection E2E
// =============================================================================

#[test]
fn e2e_plain_text_file_fails_whole_parse() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("not_a_log.html");
    fs::write(&path, "this is just a text file\nwith no markup\n").unwrap();

    let content = read_log_file(&path, MAX_SIZE).unwrap();
    assert!(matches!(
        parser::parse_document(&content),
        Err(ParseError::NoMarkup)
    ));
}

#[test]
fn e2e_non_html_and_multiple_files_rejected_at_intake() {
    let txt = candidate_file(&fixture("ehr_sample.html").with_extension("txt"));
    assert!(matches!(
        intake::validate_selection(std::slice::from_ref(&txt), MAX_SIZE),
        Err(IntakeError::UnsupportedType { .. })
    ));

    let sample = candidate_file(&fixture("ehr_sample.html"));
    let two = vec![sample.clone(), sample];
    assert!(matches!(
        intake::validate_selection(&two, MAX_SIZE),
        Err(IntakeError::MultipleFiles { count: 2 })
    ));
}

#[test]
fn e2e_oversized_file_rejected_before_parsing() {
    let err = read_log_file(&fixture("ehr_sample.html"), 64).unwrap_err();
    assert!(matches!(
        err,
        AnalyzerError::Intake(IntakeError::FileTooLarge { .. })
    ));
}
