// EHR Log Analyzer - app/headless.rs
//
// Command-line mode: parse one log file and write the four collections
// without starting the GUI. Applies the same intake rules as the file
// picker so a CLI run accepts exactly what the GUI accepts.

use crate::app::load::{self, LoadSource};
use crate::core::export::{self, ExportFormat};
use crate::core::intake;
use crate::core::model::{Category, ParseResult};
use crate::util::error::{AnalyzerError, ExportError, Result};
use std::io::Write;
use std::path::{Path, PathBuf};

/// What to do with the parse result.
#[derive(Debug, Clone)]
pub enum HeadlessOutput {
    /// Write one file per category into this directory.
    ExportDir { dir: PathBuf, format: ExportFormat },

    /// Print the whole result as JSON on stdout.
    JsonStdout,
}

/// Parse `path` and emit the result as requested.
///
/// Returns the parse result so callers (and tests) can report on it.
pub fn run(
    path: &Path,
    output: &HeadlessOutput,
    max_size: u64,
) -> Result<ParseResult> {
    let candidate = crate::platform::fs::candidate_file(path);
    intake::validate_file(&candidate, max_size)?;

    let result = load::load_document(&LoadSource::Path(path.to_path_buf()), max_size)?;

    match output {
        HeadlessOutput::ExportDir { dir, format } => export_all(&result, dir, *format)?,
        HeadlessOutput::JsonStdout => {
            let stdout = std::io::stdout();
            let mut lock = stdout.lock();
            serde_json::to_writer_pretty(&mut lock, &result).map_err(|e| ExportError::Json {
                path: PathBuf::from("<stdout>"),
                source: e,
            })?;
            writeln!(lock).map_err(|e| ExportError::Io {
                path: PathBuf::from("<stdout>"),
                source: e,
            })?;
        }
    }

    Ok(result)
}

/// Write every category, unfiltered, into `dir` using the default names.
pub fn export_all(
    result: &ParseResult,
    dir: &Path,
    format: ExportFormat,
) -> Result<()> {
    std::fs::create_dir_all(dir).map_err(|e| AnalyzerError::Io {
        path: dir.to_path_buf(),
        operation: "create export directory",
        source: e,
    })?;

    for &category in Category::all() {
        let dest = dir.join(format.default_file_name(category));
        let indices: Vec<usize> = (0..result.len_of(category)).collect();
        let file = std::fs::File::create(&dest).map_err(|e| ExportError::Io {
            path: dest.clone(),
            source: e,
        })?;
        export::export_category(result, category, &indices, format, file, &dest)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_run_rejects_non_html_name() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("log.txt");
        std::fs::write(&path, "<div class=\"log-entry\">x</div>").unwrap();
        let output = HeadlessOutput::ExportDir {
            dir: dir.path().join("out"),
            format: ExportFormat::Csv,
        };
        assert!(matches!(
            run(&path, &output, 1024),
            Err(AnalyzerError::Intake(_))
        ));
    }

    #[test]
    fn test_export_all_writes_four_files() {
        let dir = tempfile::tempdir().unwrap();
        export_all(&ParseResult::default(), dir.path(), ExportFormat::Json).unwrap();
        for name in [
            "players.json",
            "rpc_events.json",
            "chat_transcript.json",
            "eac_reports.json",
        ] {
            let content = std::fs::read_to_string(dir.path().join(name)).unwrap();
            assert_eq!(content.trim(), "[]");
        }
    }
}
