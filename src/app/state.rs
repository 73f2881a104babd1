// EHR Log Analyzer - app/state.rs
//
// Application state management. Holds the current parse result, the
// active tab, filter state, and the visible-row indices.
// Owned by the eframe::App implementation.

use crate::core::export::{self, ExportFormat};
use crate::core::filter::{self, FilterState};
use crate::core::intake::{self, CandidateFile};
use crate::core::model::{Category, ParseResult};
use crate::core::summary::Metrics;
use crate::platform::config::AppConfig;
use crate::util::constants;
use crate::util::error::{AnalyzerError, ExportError};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Top-level application state.
#[derive(Debug)]
pub struct AppState {
    /// Validated configuration.
    pub config: AppConfig,

    /// Result of the most recent successful parse (None = upload screen).
    pub result: Option<ParseResult>,

    /// Metrics derived from `result`.
    pub metrics: Option<Metrics>,

    /// Name of the file `result` came from.
    pub loaded_file: Option<String>,

    /// How long the last parse took.
    pub load_duration: Option<Duration>,

    /// Whether a load is currently in progress.
    pub loading: bool,

    /// Tab currently shown.
    pub active_tab: Category,

    /// Current search and category filter.
    pub filter_state: FilterState,

    /// Raw text of the regex search box (compiled into `filter_state`).
    pub regex_input: String,

    /// Error from compiling `regex_input`, shown under the search bar.
    pub regex_error: Option<String>,

    /// Indices of visible rows in the active tab's collection.
    pub filtered_indices: Vec<usize>,

    /// Sorted distinct RPC types for the type filter dropdown.
    pub rpc_types: Vec<String>,

    /// User-facing intake or parse error, shown on the upload screen and
    /// above the results while a previous log stays loaded.
    pub upload_error: Option<String>,

    /// Status message for the status bar.
    pub status_message: String,

    /// Whether a file is being dragged over the window.
    pub drag_hover: bool,

    /// File picked in a dialog or named on the command line, consumed by gui.rs.
    pub pending_path: Option<PathBuf>,

    /// Whether to show the summary window.
    pub show_summary: bool,

    /// Whether to show the About dialog.
    pub show_about: bool,

    /// Whether debug mode is enabled.
    pub debug_mode: bool,
}

impl AppState {
    /// Create initial state from validated configuration.
    pub fn new(config: AppConfig, debug_mode: bool) -> Self {
        Self {
            config,
            result: None,
            metrics: None,
            loaded_file: None,
            load_duration: None,
            loading: false,
            active_tab: Category::default(),
            filter_state: FilterState::default(),
            regex_input: String::new(),
            regex_error: None,
            filtered_indices: Vec::new(),
            rpc_types: Vec::new(),
            upload_error: None,
            status_message: "Ready. Open or drop an EHR log file to begin.".to_string(),
            drag_hover: false,
            pending_path: None,
            show_summary: false,
            show_about: false,
            debug_mode,
        }
    }

    /// Validate a selection or drop against the intake rules.
    ///
    /// On rejection the user-facing message is stored and `None` returned.
    pub fn accept_selection(&mut self, files: &[CandidateFile]) -> Option<CandidateFile> {
        match intake::validate_selection(files, self.config.max_file_size) {
            Ok(file) => {
                self.upload_error = None;
                Some(file.clone())
            }
            Err(e) => {
                tracing::info!(error = %e, "Selection rejected");
                let message = e.user_message();
                self.status_message = message.clone();
                self.upload_error = Some(message);
                None
            }
        }
    }

    /// Mark a load as started.
    pub fn begin_load(&mut self, name: &str) {
        self.loading = true;
        self.upload_error = None;
        self.status_message = format!("Parsing {name}...");
    }

    /// Replace everything with a fresh parse result.
    pub fn set_result(&mut self, name: String, result: ParseResult, duration: Duration) {
        self.metrics = Some(Metrics::from_result(&result));
        self.rpc_types = filter::rpc_types(&result.rpcs);
        self.status_message = if result.is_empty() {
            format!("Loaded {name}: no EHR events found.")
        } else {
            format!(
                "Loaded {name}: {} players, {} RPC events, {} chat messages, {} EAC reports.",
                result.players.len(),
                result.total_rpc_events(),
                result.chats.len(),
                result.eac_reports.len()
            )
        };
        self.upload_error = None;
        self.result = Some(result);
        self.loaded_file = Some(name);
        self.load_duration = Some(duration);
        self.loading = false;
        self.active_tab = Category::default();
        self.filter_state = FilterState::default();
        self.regex_input.clear();
        self.regex_error = None;
        self.apply_filters();
    }

    /// Record a failed load.
    ///
    /// A previously loaded result stays on screen with its tab and filters;
    /// only when nothing was loaded does the upload screen come back.
    pub fn fail_load(&mut self, name: &str, error: &AnalyzerError) {
        if self.result.is_some() {
            self.loading = false;
        } else {
            self.clear();
        }
        self.upload_error = Some(match error {
            AnalyzerError::Intake(e) => e.user_message(),
            _ => constants::INVALID_LOG_MESSAGE.to_string(),
        });
        self.status_message = format!("Could not load {name}: {error}");
    }

    /// Switch tabs. The search text carries over; categorical filters reset.
    pub fn set_tab(&mut self, tab: Category) {
        if self.active_tab == tab {
            return;
        }
        self.active_tab = tab;
        self.filter_state.clear_category();
        self.apply_filters();
    }

    /// Compile the regex search box into the filter state.
    pub fn update_regex(&mut self) {
        let pattern = self.regex_input.clone();
        match self.filter_state.set_regex(&pattern) {
            Ok(()) => self.regex_error = None,
            Err(e) => {
                self.filter_state.regex_search = None;
                self.regex_error = Some(e.to_string());
            }
        }
        self.apply_filters();
    }

    /// Recompute visible rows for the active tab.
    pub fn apply_filters(&mut self) {
        self.filtered_indices = match self.result {
            Some(ref result) => {
                filter::apply_filters(result, self.active_tab, &self.filter_state)
            }
            None => Vec::new(),
        };
    }

    /// Number of rows visible in the active tab.
    pub fn visible_count(&self) -> usize {
        self.filtered_indices.len()
    }

    /// Export the visible rows of the active tab to `dest`.
    pub fn export_visible(
        &self,
        dest: &Path,
        format: ExportFormat,
    ) -> Result<usize, AnalyzerError> {
        let Some(ref result) = self.result else {
            return Ok(0);
        };
        let file = std::fs::File::create(dest).map_err(|e| ExportError::Io {
            path: dest.to_path_buf(),
            source: e,
        })?;
        let count = export::export_category(
            result,
            self.active_tab,
            &self.filtered_indices,
            format,
            file,
            dest,
        )?;
        Ok(count)
    }

    /// Clear all results and return to the upload screen.
    pub fn clear(&mut self) {
        self.result = None;
        self.metrics = None;
        self.loaded_file = None;
        self.load_duration = None;
        self.loading = false;
        self.active_tab = Category::default();
        self.filter_state = FilterState::default();
        self.regex_input.clear();
        self.regex_error = None;
        self.filtered_indices.clear();
        self.rpc_types.clear();
        self.upload_error = None;
        self.show_summary = false;
        self.status_message = "Ready.".to_string();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::model::{ReportSeverity, RpcEvent};
    use crate::util::error::ParseError;

    fn rpc(name: &str, kind: &str, count: u64) -> RpcEvent {
        RpcEvent {
            player_id: "1".to_string(),
            player_name: name.to_string(),
            rpc_type: kind.to_string(),
            count,
        }
    }

    fn loaded() -> AppState {
        let mut state = AppState::new(AppConfig::default(), false);
        let result = ParseResult {
            rpcs: vec![rpc("A", "Move", 1), rpc("B", "Kill", 4), rpc("C", "Move", 2)],
            ..Default::default()
        };
        state.set_result("log.html".to_string(), result, Duration::from_millis(3));
        state
    }

    #[test]
    fn test_set_result_populates_views() {
        let mut state = loaded();
        assert_eq!(state.rpc_types, vec!["Kill".to_string(), "Move".to_string()]);
        assert_eq!(state.metrics.as_ref().unwrap().total_rpc_events, 7);

        state.set_tab(Category::Rpcs);
        assert_eq!(state.filtered_indices, vec![1, 2, 0]);
    }

    #[test]
    fn test_switching_tabs_resets_category_filter_only() {
        let mut state = loaded();
        state.set_tab(Category::Rpcs);
        state.filter_state.text_search = "a".to_string();
        state.filter_state.rpc_type = Some("Move".to_string());
        state.apply_filters();
        assert_eq!(state.visible_count(), 1);

        state.set_tab(Category::EacReports);
        state.filter_state.report_severity = Some(ReportSeverity::Fatal);
        state.set_tab(Category::Rpcs);
        assert!(state.filter_state.rpc_type.is_none());
        assert!(state.filter_state.report_severity.is_none());
        assert_eq!(state.filter_state.text_search, "a");
    }

    #[test]
    fn test_invalid_regex_reported_not_applied() {
        let mut state = loaded();
        state.set_tab(Category::Rpcs);
        state.regex_input = "[".to_string();
        state.update_regex();
        assert!(state.regex_error.is_some());
        assert_eq!(state.visible_count(), 3);
    }

    #[test]
    fn test_failed_load_returns_to_upload_screen() {
        let mut state = loaded();
        state.fail_load("bad.html", &AnalyzerError::Parse(ParseError::NoMarkup));
        assert!(state.result.is_none());
        assert_eq!(
            state.upload_error.as_deref(),
            Some(constants::INVALID_LOG_MESSAGE)
        );
    }

    #[test]
    fn test_failed_reload_keeps_previous_result() {
        let mut state = loaded();
        state.set_tab(Category::Rpcs);
        state.filter_state.rpc_type = Some("Move".to_string());
        state.apply_filters();

        state.begin_load("broken.html");
        state.fail_load("broken.html", &AnalyzerError::Parse(ParseError::NoMarkup));

        assert!(!state.loading);
        assert_eq!(state.loaded_file.as_deref(), Some("log.html"));
        assert_eq!(state.result.as_ref().unwrap().rpcs.len(), 3);
        assert!(state.metrics.is_some());
        assert_eq!(state.active_tab, Category::Rpcs);
        assert_eq!(state.filter_state.rpc_type.as_deref(), Some("Move"));
        assert_eq!(state.filtered_indices, vec![2, 0]);
        assert_eq!(
            state.upload_error.as_deref(),
            Some(constants::INVALID_LOG_MESSAGE)
        );
        assert!(state.status_message.contains("broken.html"));
    }

    #[test]
    fn test_rejected_selection_while_loaded_keeps_result_and_reports() {
        let mut state = loaded();
        let files = vec![CandidateFile {
            name: "notes.txt".to_string(),
            media_type: Some("text/plain".to_string()),
            ..Default::default()
        }];
        assert!(state.accept_selection(&files).is_none());
        assert!(state.result.is_some());
        assert_eq!(
            state.upload_error.as_deref(),
            Some(constants::UNSUPPORTED_TYPE_MESSAGE)
        );
        assert_eq!(state.status_message, constants::UNSUPPORTED_TYPE_MESSAGE);

        state.set_result("next.html".to_string(), ParseResult::default(), Duration::ZERO);
        assert!(state.upload_error.is_none());
        assert_eq!(state.status_message, "Loaded next.html: no EHR events found.");
    }

    #[test]
    fn test_accept_selection_rejects_multiple() {
        let mut state = AppState::new(AppConfig::default(), false);
        let files = vec![
            CandidateFile {
                name: "a.html".to_string(),
                ..Default::default()
            },
            CandidateFile {
                name: "b.html".to_string(),
                ..Default::default()
            },
        ];
        assert!(state.accept_selection(&files).is_none());
        assert_eq!(
            state.upload_error.as_deref(),
            Some(constants::MULTIPLE_FILES_MESSAGE)
        );
    }

    #[test]
    fn test_export_visible_writes_filtered_rows() {
        let mut state = loaded();
        state.set_tab(Category::Rpcs);
        state.filter_state.rpc_type = Some("Move".to_string());
        state.apply_filters();

        let dir = tempfile::tempdir().unwrap();
        let dest = dir.path().join("rpc_events.csv");
        let n = state.export_visible(&dest, ExportFormat::Csv).unwrap();
        assert_eq!(n, 2);
        let written = std::fs::read_to_string(&dest).unwrap();
        assert!(written.contains("C,Move,2"));
        assert!(!written.contains("Kill"));
    }
}
