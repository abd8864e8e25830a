//! JSONL export functionality.
//!
//! Each line is one stored record as a JSON object, ready for `jq` or for
//! feeding back into `subresolve --input`.

use anyhow::{Context, Result};
use std::io::Write;

use crate::storage::{init_db_pool_with_path, load_records};

use super::writer::open_output;
use super::ExportOptions;

/// Exports a domain's stored records to JSON Lines.
///
/// # Returns
///
/// Returns the number of records exported, or an error if export fails.
pub async fn export_jsonl(opts: &ExportOptions) -> Result<usize> {
    let pool = init_db_pool_with_path(&opts.db_path)
        .await
        .context("Failed to initialize database pool")?;
    let records = load_records(&pool, &opts.table, opts.alive_only)
        .await
        .with_context(|| format!("Failed to load records from {}", opts.table))?;

    let mut writer = open_output(opts.output.as_ref())?;
    for record in &records {
        serde_json::to_writer(&mut writer, record)?;
        writer.write_all(b"\n")?;
    }
    writer.flush()?;

    log::info!("Exported {} records to JSONL", records.len());
    Ok(records.len())
}
