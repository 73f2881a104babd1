// EHR Log Analyzer - platform/fs.rs
//
// Filesystem access for log documents. Reading happens here so the core
// parser never touches the filesystem.

use crate::core::intake::CandidateFile;
use crate::util::error::{AnalyzerError, IntakeError, ParseError};
use std::io;
use std::path::Path;

/// Intake candidate for a file on disk. The size comes from its metadata
/// and stays unknown when that cannot be read.
pub fn candidate_file(path: &Path) -> CandidateFile {
    let size = match std::fs::metadata(path) {
        Ok(m) => Some(m.len()),
        Err(e) => {
            tracing::debug!(path = %path.display(), error = %e, "No metadata for candidate");
            None
        }
    };
    CandidateFile {
        name: path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or_default()
            .to_string(),
        media_type: None,
        path: Some(path.to_path_buf()),
        size,
    }
}

/// Read a log document from disk, enforcing the size cap first.
///
/// Invalid UTF-8 sequences are replaced rather than rejected, matching how
/// browsers decode a saved page.
pub fn read_log_file(path: &Path, max_size: u64) -> Result<String, AnalyzerError> {
    let metadata = std::fs::metadata(path).map_err(|e| ParseError::Io {
        file: path.to_path_buf(),
        source: e,
    })?;

    if metadata.len() > max_size {
        return Err(IntakeError::FileTooLarge {
            name: display_name(path),
            size: metadata.len(),
            max_size,
        }
        .into());
    }

    let content = read_file_lossy(path).map_err(|e| ParseError::Io {
        file: path.to_path_buf(),
        source: e,
    })?;

    tracing::debug!(
        path = %path.display(),
        bytes = metadata.len(),
        "Log file read"
    );
    Ok(content)
}

/// Decode dropped bytes the same way as a file on disk.
pub fn decode_bytes(bytes: &[u8]) -> String {
    String::from_utf8_lossy(bytes).into_owned()
}

/// Read the full content of a file as a string.
///
/// For files with invalid UTF-8, uses lossy conversion.
pub fn read_file_lossy(path: &Path) -> io::Result<String> {
    let bytes = std::fs::read(path)?;
    Ok(decode_bytes(&bytes))
}

/// File name for messages, falling back to the full path.
pub fn display_name(path: &Path) -> String {
    path.file_name()
        .and_then(|n| n.to_str())
        .map(str::to_string)
        .unwrap_or_else(|| path.display().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_candidate_file_takes_name_and_size() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.html");
        std::fs::write(&path, [b'x'; 42]).unwrap();

        let candidate = candidate_file(&path);
        assert_eq!(candidate.name, "session.html");
        assert_eq!(candidate.size, Some(42));
        assert_eq!(candidate.path.as_deref(), Some(path.as_path()));
        assert!(candidate.media_type.is_none());

        let missing = candidate_file(&dir.path().join("gone.htm"));
        assert_eq!(missing.name, "gone.htm");
        assert!(missing.size.is_none());
    }

    #[test]
    fn test_read_log_file_lossy() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"<div class=\"log-entry\">caf\xe9</div>").unwrap();
        let content = read_log_file(file.path(), 1024).unwrap();
        assert!(content.starts_with("<div"));
        assert!(content.contains('\u{FFFD}'));
    }

    #[test]
    fn test_read_log_file_too_large() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(&[b'x'; 64]).unwrap();
        let err = read_log_file(file.path(), 16).unwrap_err();
        assert!(matches!(
            err,
            AnalyzerError::Intake(IntakeError::FileTooLarge { size: 64, .. })
        ));
    }

    #[test]
    fn test_read_log_file_missing() {
        let err = read_log_file(Path::new("/nonexistent/ehr-log.html"), 1024).unwrap_err();
        assert!(matches!(err, AnalyzerError::Parse(ParseError::Io { .. })));
    }
}
