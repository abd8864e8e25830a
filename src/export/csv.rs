//! CSV export functionality.
//!
//! One row per stored record, columns in record field order.

use anyhow::{Context, Result};
use csv::WriterBuilder;

use crate::storage::{init_db_pool_with_path, load_records};

use super::writer::open_output;
use super::ExportOptions;

/// CSV header, in the order `Record` serializes its fields.
pub const CSV_COLUMNS: [&str; 13] = [
    "subdomain", "url", "port", "level", "ip", "cname", "ttl", "resolve", "reason", "resolver",
    "alive", "module", "source",
];

/// Exports a domain's stored records to CSV.
///
/// The header row is always written, even for an empty table.
///
/// # Returns
///
/// Returns the number of records exported, or an error if export fails.
pub async fn export_csv(opts: &ExportOptions) -> Result<usize> {
    let pool = init_db_pool_with_path(&opts.db_path)
        .await
        .context("Failed to initialize database pool")?;
    let records = load_records(&pool, &opts.table, opts.alive_only)
        .await
        .with_context(|| format!("Failed to load records from {}", opts.table))?;

    let mut writer = WriterBuilder::new()
        .has_headers(false)
        .from_writer(open_output(opts.output.as_ref())?);
    writer.write_record(CSV_COLUMNS)?;
    for record in &records {
        writer.serialize(record)?;
    }
    writer.flush()?;

    log::info!("Exported {} records to CSV", records.len());
    Ok(records.len())
}
