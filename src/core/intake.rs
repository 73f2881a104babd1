// EHR Log Analyzer - core/intake.rs
//
// Gatekeeping for file selection and drag-and-drop. Runs before anything
// is read: exactly one file, HTML by name or by media type, within the
// size cap. Pure logic over candidate metadata; the platform layer does
// the actual reading.

use crate::util::constants;
use crate::util::error::IntakeError;
use std::path::PathBuf;

/// Metadata of a file offered by the picker or a drop.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CandidateFile {
    /// Display name (file name only).
    pub name: String,

    /// Media type reported by the host, if any (empty strings are ignored).
    pub media_type: Option<String>,

    /// Location on disk, when the host exposes one.
    pub path: Option<PathBuf>,

    /// Size in bytes, when known up front.
    pub size: Option<u64>,
}

/// True when the name ends in `.html` or `.htm` (any case).
///
/// Everything after the last dot counts as the extension, so a bare
/// `.html` is accepted.
pub fn has_html_extension(name: &str) -> bool {
    name.rsplit_once('.')
        .map(|(_, ext)| ext.to_ascii_lowercase())
        .is_some_and(|ext| constants::HTML_EXTENSIONS.contains(&ext.as_str()))
}

/// True when the host-reported media type is an HTML type.
pub fn has_html_media_type(media_type: Option<&str>) -> bool {
    media_type
        .map(|m| m.trim().to_ascii_lowercase())
        .is_some_and(|m| constants::HTML_MEDIA_TYPES.contains(&m.as_str()))
}

/// Validate one candidate against type and size rules.
pub fn validate_file(file: &CandidateFile, max_size: u64) -> Result<(), IntakeError> {
    let media_type = file.media_type.as_deref().filter(|m| !m.is_empty());

    if !has_html_extension(&file.name) && !has_html_media_type(media_type) {
        tracing::info!(
            name = %file.name,
            media_type = media_type.unwrap_or("-"),
            "Rejected non-HTML file"
        );
        return Err(IntakeError::UnsupportedType {
            name: file.name.clone(),
            media_type: media_type.map(str::to_string),
        });
    }

    if let Some(size) = file.size {
        if size > max_size {
            return Err(IntakeError::FileTooLarge {
                name: file.name.clone(),
                size,
                max_size,
            });
        }
    }

    Ok(())
}

/// Validate a whole selection or drop: exactly one acceptable file.
pub fn validate_selection(
    files: &[CandidateFile],
    max_size: u64,
) -> Result<&CandidateFile, IntakeError> {
    match files {
        [] => Err(IntakeError::NoFile),
        [file] => {
            validate_file(file, max_size)?;
            Ok(file)
        }
        many => {
            tracing::info!(count = many.len(), "Rejected multi-file drop");
            Err(IntakeError::MultipleFiles { count: many.len() })
        }
    }
}
