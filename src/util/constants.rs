// EHR Log Analyzer - util/constants.rs
//
// Single source of truth for all named constants, limits, and defaults.

// =============================================================================
// Application metadata
// =============================================================================

/// Application display name.
pub const APP_NAME: &str = "EHR Log Analyzer";

/// Application identifier used for config/data directories.
pub const APP_ID: &str = "EhrLogAnalyzer";

/// Current application version (updated by release script).
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

// =============================================================================
// Extraction
// =============================================================================

/// Sentinel stored when an optional field (platform, report timestamp) is
/// absent from the source line.
pub const UNKNOWN: &str = "Unknown";

/// CSS class marking one rendered log line in the saved HTML document.
pub const LOG_ENTRY_CLASS: &str = "log-entry";

/// CSS class marking an entry as an error.
pub const ERROR_CLASS: &str = "error";

/// CSS class marking an entry as fatal.
pub const FATAL_CLASS: &str = "fatal";

// =============================================================================
// File intake
// =============================================================================

/// Accepted file name extensions (compared case-insensitively, without dot).
pub const HTML_EXTENSIONS: &[&str] = &["html", "htm"];

/// Accepted media types when the host reports one.
pub const HTML_MEDIA_TYPES: &[&str] = &["text/html", "text/htm", "application/xhtml+xml"];

/// Default maximum size of a log file accepted for parsing, in MiB.
pub const DEFAULT_MAX_FILE_SIZE_MB: u64 = 256;

/// Minimum user-configurable file size cap, in MiB.
pub const MIN_MAX_FILE_SIZE_MB: u64 = 1;

/// Hard upper bound on the file size cap, in MiB. The whole document is held
/// in memory during a parse, so this bounds peak usage.
pub const ABSOLUTE_MAX_FILE_SIZE_MB: u64 = 2_048;

/// Bytes per MiB.
pub const BYTES_PER_MB: u64 = 1_024 * 1_024;

// =============================================================================
// User-facing messages
// =============================================================================

/// Shown when the document could not be parsed at all.
pub const INVALID_LOG_MESSAGE: &str =
    "Error parsing log file. Please ensure it's a valid EHR log file.";

/// Shown when more than one file is dropped at once.
pub const MULTIPLE_FILES_MESSAGE: &str = "Please upload only one file at a time";

/// Shown when the selected file is not HTML.
pub const UNSUPPORTED_TYPE_MESSAGE: &str = "Please upload an HTML file only (.html or .htm)";

// =============================================================================
// UI defaults
// =============================================================================

/// Default UI body font size in points.
pub const DEFAULT_FONT_SIZE: f32 = 14.5;

/// Minimum user-configurable UI font size (points).
pub const MIN_FONT_SIZE: f32 = 10.0;

/// Maximum user-configurable UI font size (points).
pub const MAX_FONT_SIZE: f32 = 24.0;

/// Maximum number of loader messages processed per UI frame.
pub const MAX_LOAD_MESSAGES_PER_FRAME: usize = 16;

// =============================================================================
// Logging
// =============================================================================

/// Default log level.
pub const DEFAULT_LOG_LEVEL: &str = "info";

/// Maximum length of a log line included in debug output.
/// Prevents accidental exposure of chat content or PUIDs in long lines.
pub const DEBUG_MAX_LINE_PREVIEW: usize = 200;

// =============================================================================
// Export
// =============================================================================

/// Maximum number of rows that can be exported in a single operation.
pub const MAX_EXPORT_ENTRIES: usize = 5_000_000;

/// Default file names offered by the export dialog, per category.
pub const PLAYERS_EXPORT_NAME: &str = "players";
pub const RPCS_EXPORT_NAME: &str = "rpc_events";
pub const CHATS_EXPORT_NAME: &str = "chat_transcript";
pub const EAC_EXPORT_NAME: &str = "eac_reports";

// =============================================================================
// Configuration
// =============================================================================

/// Configuration file name.
pub const CONFIG_FILE_NAME: &str = "config.toml";
