// EHR Log Analyzer - app/load.rs
//
// Load lifecycle management. Reads and parses one log document on a
// background thread, sending progress messages to the UI thread via an
// mpsc channel.
//
// Architecture:
//   - `LoadManager` lives on the UI thread; `run_load` runs on a background thread.
//   - Starting a new load drops the previous receiver; a stale thread's
//     final send fails and it exits quietly.
//   - The parse itself is synchronous and all-or-nothing: the UI receives
//     either a complete ParseResult or a failure, never a partial result.

use crate::core::model::ParseResult;
use crate::core::parser;
use crate::platform::fs;
use crate::util::error::AnalyzerError;
use std::path::PathBuf;
use std::sync::mpsc;
use std::time::{Duration, Instant};

/// Where the document text comes from.
#[derive(Debug, Clone)]
pub enum LoadSource {
    /// A file on disk; read on the background thread.
    Path(PathBuf),

    /// Bytes already in memory (e.g. a drop without a filesystem path).
    Bytes { name: String, bytes: std::sync::Arc<[u8]> },
}

impl LoadSource {
    /// Display name for status messages.
    pub fn name(&self) -> String {
        match self {
            LoadSource::Path(path) => fs::display_name(path),
            LoadSource::Bytes { name, .. } => name.clone(),
        }
    }
}

/// Messages sent from the load thread to the UI thread.
#[derive(Debug)]
pub enum LoadProgress {
    /// The document is being read and parsed.
    Started { name: String },

    /// Parsing succeeded.
    Completed {
        name: String,
        result: ParseResult,
        duration: Duration,
    },

    /// Reading or parsing failed; nothing was extracted.
    Failed { name: String, error: AnalyzerError },
}

/// Manages a load operation on a background thread.
pub struct LoadManager {
    /// Channel receiver for the UI to poll progress messages.
    progress_rx: Option<mpsc::Receiver<LoadProgress>>,
}

impl LoadManager {
    pub fn new() -> Self {
        Self { progress_rx: None }
    }

    /// Start loading `source`. Any load already running is abandoned.
    pub fn start_load(&mut self, source: LoadSource, max_size: u64) {
        let (tx, rx) = mpsc::channel();
        self.progress_rx = Some(rx);

        let name = source.name();
        std::thread::spawn(move || {
            run_load(source, max_size, tx);
        });

        tracing::info!(file = %name, "Load started");
    }

    /// Whether a load has been started and not yet drained.
    pub fn is_active(&self) -> bool {
        self.progress_rx.is_some()
    }

    /// Poll for progress messages without blocking. Returns at most `max`
    /// pending messages. The receiver is released once a terminal message
    /// has been delivered.
    pub fn poll_progress(&mut self, max: usize) -> Vec<LoadProgress> {
        let mut messages = Vec::new();
        let mut finished = false;
        if let Some(ref rx) = self.progress_rx {
            while messages.len() < max {
                match rx.try_recv() {
                    Ok(msg) => {
                        finished |= matches!(
                            msg,
                            LoadProgress::Completed { .. } | LoadProgress::Failed { .. }
                        );
                        messages.push(msg);
                    }
                    Err(mpsc::TryRecvError::Empty) => break,
                    Err(mpsc::TryRecvError::Disconnected) => {
                        finished = true;
                        break;
                    }
                }
            }
        }
        if finished {
            self.progress_rx = None;
        }
        messages
    }
}

impl Default for LoadManager {
    fn default() -> Self {
        Self::new()
    }
}

/// Read and parse one document, synchronously. Shared by the background
/// loader and the headless CLI.
pub fn load_document(
    source: &LoadSource,
    max_size: u64,
) -> Result<ParseResult, AnalyzerError> {
    let content = match source {
        LoadSource::Path(path) => fs::read_log_file(path, max_size)?,
        LoadSource::Bytes { bytes, .. } => fs::decode_bytes(bytes),
    };
    Ok(parser::parse_document(&content)?)
}

/// Background load pipeline: read, parse, deliver.
fn run_load(source: LoadSource, max_size: u64, tx: mpsc::Sender<LoadProgress>) {
    let name = source.name();
    if tx.send(LoadProgress::Started { name: name.clone() }).is_err() {
        return; // Receiver dropped (newer load or UI closed); exit quietly.
    }

    let start = Instant::now();
    let msg = match load_document(&source, max_size) {
        Ok(result) => {
            let duration = start.elapsed();
            tracing::info!(
                file = %name,
                players = result.players.len(),
                rpc_events = result.total_rpc_events(),
                chats = result.chats.len(),
                eac_reports = result.eac_reports.len(),
                elapsed_ms = duration.as_millis() as u64,
                "Load complete"
            );
            LoadProgress::Completed {
                name,
                result,
                duration,
            }
        }
        Err(error) => {
            tracing::warn!(file = %name, error = %error, "Load failed");
            LoadProgress::Failed { name, error }
        }
    };

    let _ = tx.send(msg);
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    fn bytes(name: &str, content: &str) -> LoadSource {
        LoadSource::Bytes {
            name: name.to_string(),
            bytes: Arc::from(content.as_bytes()),
        }
    }

    fn wait_for_terminal(manager: &mut LoadManager) -> Vec<LoadProgress> {
        let mut all = Vec::new();
        let deadline = Instant::now() + Duration::from_secs(10);
        while manager.is_active() && Instant::now() < deadline {
            all.extend(manager.poll_progress(16));
            std::thread::sleep(Duration::from_millis(5));
        }
        all
    }

    #[test]
    fn test_background_load_completes() {
        let mut manager = LoadManager::new();
        manager.start_load(
            bytes(
                "log.html",
                r#"<div class="log-entry">[10:00:00][ReceiveChat]A: hi</div>"#,
            ),
            1024,
        );
        let messages = wait_for_terminal(&mut manager);
        assert!(matches!(messages.first(), Some(LoadProgress::Started { .. })));
        match messages.last() {
            Some(LoadProgress::Completed { result, .. }) => assert_eq!(result.chats.len(), 1),
            other => panic!("expected Completed, got {other:?}"),
        }
        assert!(!manager.is_active());
    }

    #[test]
    fn test_background_load_fails_whole() {
        let mut manager = LoadManager::new();
        manager.start_load(bytes("log.html", "plain text"), 1024);
        let messages = wait_for_terminal(&mut manager);
        assert!(matches!(messages.last(), Some(LoadProgress::Failed { .. })));
    }
}
