// EHR Log Analyzer - util/error.rs
//
// Typed error hierarchy with context-preserving error chains.
// No string-based error propagation; every error keeps its source so the
// full chain reaches the diagnostic log.

use std::fmt;
use std::io;
use std::path::PathBuf;

/// Top-level error type for all analyzer operations.
/// Errors are categorised by the subsystem that produced them.
#[derive(Debug)]
pub enum AnalyzerError {
    /// File selection was rejected before parsing.
    Intake(IntakeError),

    /// The log document could not be parsed.
    Parse(ParseError),

    /// Export operation failed.
    Export(ExportError),

    /// I/O error with path context.
    Io {
        path: PathBuf,
        operation: &'static str,
        source: io::Error,
    },
}

impl fmt::Display for AnalyzerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Intake(e) => write!(f, "File rejected: {e}"),
            Self::Parse(e) => write!(f, "Parse error: {e}"),
            Self::Export(e) => write!(f, "Export error: {e}"),
            Self::Io {
                path,
                operation,
                source,
            } => write!(
                f,
                "I/O error during {operation} on '{}': {source}",
                path.display()
            ),
        }
    }
}

impl std::error::Error for AnalyzerError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Intake(e) => Some(e),
            Self::Parse(e) => Some(e),
            Self::Export(e) => Some(e),
            Self::Io { source, .. } => Some(source),
        }
    }
}

// ---------------------------------------------------------------------------
// Intake errors
// ---------------------------------------------------------------------------

/// Errors raised while validating a file selection or drop.
#[derive(Debug)]
pub enum IntakeError {
    /// Nothing was selected.
    NoFile,

    /// More than one file was dropped at once.
    MultipleFiles { count: usize },

    /// The file is neither named `.html`/`.htm` nor typed as HTML.
    UnsupportedType {
        name: String,
        media_type: Option<String>,
    },

    /// The file exceeds the configured size cap.
    FileTooLarge { name: String, size: u64, max_size: u64 },
}

impl IntakeError {
    /// The single user-facing sentence shown under the drop zone.
    pub fn user_message(&self) -> String {
        use crate::util::constants;
        match self {
            Self::NoFile => "No file selected".to_string(),
            Self::MultipleFiles { .. } => constants::MULTIPLE_FILES_MESSAGE.to_string(),
            Self::UnsupportedType { .. } => constants::UNSUPPORTED_TYPE_MESSAGE.to_string(),
            Self::FileTooLarge { max_size, .. } => format!(
                "File is too large (maximum {} MB)",
                max_size / constants::BYTES_PER_MB
            ),
        }
    }
}

impl fmt::Display for IntakeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoFile => write!(f, "no file was selected"),
            Self::MultipleFiles { count } => {
                write!(f, "{count} files dropped, only one may be loaded at a time")
            }
            Self::UnsupportedType { name, media_type } => match media_type {
                Some(mt) => write!(f, "'{name}' ({mt}) is not an HTML file"),
                None => write!(f, "'{name}' is not an HTML file"),
            },
            Self::FileTooLarge {
                name,
                size,
                max_size,
            } => write!(
                f,
                "'{name}' is {size} bytes, exceeds maximum of {max_size} bytes"
            ),
        }
    }
}

impl std::error::Error for IntakeError {}

impl From<IntakeError> for AnalyzerError {
    fn from(e: IntakeError) -> Self {
        Self::Intake(e)
    }
}

// ---------------------------------------------------------------------------
// Parse errors
// ---------------------------------------------------------------------------

/// Errors that abort a whole parse. A line that simply does not match an
/// extractor is never an error.
#[derive(Debug)]
pub enum ParseError {
    /// The document is empty or whitespace only.
    EmptyDocument,

    /// The document contains NUL bytes and is not text.
    BinaryContent { offset: usize },

    /// The document contains no markup element at all.
    NoMarkup,

    /// I/O error while reading a log file.
    Io { file: PathBuf, source: io::Error },
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyDocument => write!(f, "document is empty"),
            Self::BinaryContent { offset } => {
                write!(f, "document contains binary data (NUL byte at offset {offset})")
            }
            Self::NoMarkup => write!(f, "document contains no markup elements"),
            Self::Io { file, source } => {
                write!(f, "'{}': I/O error: {source}", file.display())
            }
        }
    }
}

impl std::error::Error for ParseError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            _ => None,
        }
    }
}

impl From<ParseError> for AnalyzerError {
    fn from(e: ParseError) -> Self {
        Self::Parse(e)
    }
}

// ---------------------------------------------------------------------------
// Filter errors
// ---------------------------------------------------------------------------

/// Errors related to filter operations.
#[derive(Debug)]
pub enum FilterError {
    /// User-provided regex is invalid.
    InvalidRegex {
        pattern: String,
        source: regex::Error,
    },
}

impl fmt::Display for FilterError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidRegex { pattern, source } => {
                write!(f, "Invalid filter regex '{pattern}': {source}")
            }
        }
    }
}

impl std::error::Error for FilterError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::InvalidRegex { source, .. } => Some(source),
        }
    }
}


// ---------------------------------------------------------------------------
// Export errors
// ---------------------------------------------------------------------------

/// Errors related to export operations.
#[derive(Debug)]
pub enum ExportError {
    /// I/O error writing the export file.
    Io { path: PathBuf, source: io::Error },

    /// CSV serialisation error.
    Csv { path: PathBuf, source: csv::Error },

    /// JSON serialisation error.
    Json {
        path: PathBuf,
        source: serde_json::Error,
    },

    /// Export would exceed maximum row count.
    TooManyEntries { count: usize, max: usize },
}

impl fmt::Display for ExportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io { path, source } => {
                write!(f, "Export I/O error '{}': {source}", path.display())
            }
            Self::Csv { path, source } => {
                write!(f, "CSV export error '{}': {source}", path.display())
            }
            Self::Json { path, source } => {
                write!(f, "JSON export error '{}': {source}", path.display())
            }
            Self::TooManyEntries { count, max } => write!(
                f,
                "Export of {count} rows exceeds maximum of {max}. \
                 Apply a search or filter to reduce the result set."
            ),
        }
    }
}

impl std::error::Error for ExportError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Csv { source, .. } => Some(source),
            Self::Json { source, .. } => Some(source),
            _ => None,
        }
    }
}

impl From<ExportError> for AnalyzerError {
    fn from(e: ExportError) -> Self {
        Self::Export(e)
    }
}

// ---------------------------------------------------------------------------
// Config errors
// ---------------------------------------------------------------------------

/// Errors related to configuration loading.
#[derive(Debug)]
pub enum ConfigError {
    /// TOML parsing failed.
    TomlParse {
        path: PathBuf,
        source: toml::de::Error,
    },

    /// A config value is out of the allowed range.
    ValueOutOfRange {
        field: String,
        value: String,
        expected: String,
    },

    /// I/O error reading config file.
    Io { path: PathBuf, source: io::Error },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TomlParse { path, source } => {
                write!(f, "Config parse error '{}': {source}", path.display())
            }
            Self::ValueOutOfRange {
                field,
                value,
                expected,
            } => write!(
                f,
                "Config '{field}' = '{value}' is out of range. Expected: {expected}"
            ),
            Self::Io { path, source } => {
                write!(f, "Config I/O error '{}': {source}", path.display())
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::TomlParse { source, .. } => Some(source),
            Self::Io { source, .. } => Some(source),
            _ => None,
        }
    }
}

/// Convenience type alias for analyzer results.
pub type Result<T> = std::result::Result<T, AnalyzerError>;
