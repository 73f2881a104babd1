// EHR Log Analyzer - core/export.rs
//
// CSV and JSON export of the currently visible rows of one collection.
// Core layer: writes to any Write trait object.

use crate::core::model::{Category, ParseResult};
use crate::util::constants;
use crate::util::error::ExportError;
use serde::Serialize;
use std::io::Write;
use std::path::Path;

/// Output format for an export.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExportFormat {
    #[default]
    Csv,
    Json,
}

impl ExportFormat {
    /// File extension without the dot.
    pub fn extension(&self) -> &'static str {
        match self {
            ExportFormat::Csv => "csv",
            ExportFormat::Json => "json",
        }
    }

    /// Default file name for exporting `category` in this format.
    pub fn default_file_name(&self, category: Category) -> String {
        format!("{}.{}", category.export_stem(), self.extension())
    }
}

/// Export rows to CSV. The header row comes from the record's serialised
/// field names (`name,friendCode,hashedPuid,...`).
pub fn export_csv<T: Serialize, W: Write>(
    rows: &[&T],
    writer: W,
    export_path: &Path,
) -> Result<usize, ExportError> {
    check_limit(rows.len())?;

    let mut csv_writer = csv::Writer::from_writer(writer);
    for row in rows {
        csv_writer
            .serialize(row)
            .map_err(|e| ExportError::Csv {
                path: export_path.to_path_buf(),
                source: e,
            })?;
    }

    csv_writer.flush().map_err(|e| ExportError::Io {
        path: export_path.to_path_buf(),
        source: e,
    })?;

    Ok(rows.len())
}

/// Export rows to JSON format (array of objects).
pub fn export_json<T: Serialize, W: Write>(
    rows: &[&T],
    writer: W,
    export_path: &Path,
) -> Result<usize, ExportError> {
    check_limit(rows.len())?;

    serde_json::to_writer_pretty(writer, rows).map_err(|e| ExportError::Json {
        path: export_path.to_path_buf(),
        source: e,
    })?;
    Ok(rows.len())
}

/// Export the rows of `category` selected by `indices` (as produced by
/// `core::filter::apply_filters`), in index order.
pub fn export_category<W: Write>(
    result: &ParseResult,
    category: Category,
    indices: &[usize],
    format: ExportFormat,
    writer: W,
    export_path: &Path,
) -> Result<usize, ExportError> {
    fn pick<'a, T>(items: &'a [T], indices: &[usize]) -> Vec<&'a T> {
        indices.iter().filter_map(|&i| items.get(i)).collect()
    }

    fn write<T: Serialize, W: Write>(
        rows: &[&T],
        format: ExportFormat,
        writer: W,
        path: &Path,
    ) -> Result<usize, ExportError> {
        match format {
            ExportFormat::Csv => export_csv(rows, writer, path),
            ExportFormat::Json => export_json(rows, writer, path),
        }
    }

    let count = match category {
        Category::Players => write(&pick(&result.players, indices), format, writer, export_path),
        Category::Rpcs => write(&pick(&result.rpcs, indices), format, writer, export_path),
        Category::Chats => write(&pick(&result.chats, indices), format, writer, export_path),
        Category::EacReports => write(
            &pick(&result.eac_reports, indices),
            format,
            writer,
            export_path,
        ),
    }?;

    tracing::info!(
        category = category.label(),
        format = format.extension(),
        rows = count,
        path = %export_path.display(),
        "Export complete"
    );
    Ok(count)
}

fn check_limit(count: usize) -> Result<(), ExportError> {
    if count > constants::MAX_EXPORT_ENTRIES {
        return Err(ExportError::TooManyEntries {
            count,
            max: constants::MAX_EXPORT_ENTRIES,
        });
    }
    Ok(())
}
