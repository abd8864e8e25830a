//! Export functionality for stored resolve results.
//!
//! This module provides functions to export a domain's table from the SQLite
//! database into CSV or JSONL.

mod csv;
mod jsonl;
mod types;
mod writer;

use anyhow::Result;

pub use csv::{export_csv, CSV_COLUMNS};
pub use jsonl::export_jsonl;
pub use types::{ExportFormat, ExportOptions};

/// Exports in whichever format `opts` selects.
pub async fn export(opts: &ExportOptions) -> Result<usize> {
    match opts.format {
        ExportFormat::Csv => export_csv(opts).await,
        ExportFormat::Jsonl => export_jsonl(opts).await,
    }
}
