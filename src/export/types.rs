//! Export types and options.

use std::path::PathBuf;

/// Export format options.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ExportFormat {
    /// CSV format (one row per record, flat columns)
    Csv,
    /// JSONL format (one JSON object per record)
    Jsonl,
}

/// Options for exporting data.
#[derive(Clone, Debug)]
pub struct ExportOptions {
    /// Database path
    pub db_path: PathBuf,
    /// Output file path (or stdout if None)
    pub output: Option<PathBuf>,
    /// Export format
    pub format: ExportFormat,
    /// Table holding the domain's records
    pub table: String,
    /// Only export alive records
    pub alive_only: bool,
}
