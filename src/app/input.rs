//! Collected-record input.
//!
//! Records arrive as JSON Lines, one `Record` per line. Blank lines and lines
//! starting with `#` are ignored, the same as URL lists elsewhere.

use std::path::Path;

use anyhow::{Context, Result};
use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader};

use crate::models::Record;

/// Reads records from `path`, or from stdin when `path` is `-`.
pub async fn read_records(path: &Path) -> Result<Vec<Record>> {
    if path.as_os_str() == "-" {
        log::info!("Reading records from stdin");
        return parse_records(BufReader::new(tokio::io::stdin())).await;
    }
    let file = tokio::fs::File::open(path)
        .await
        .with_context(|| format!("Failed to open input file: {}", path.display()))?;
    let records = parse_records(BufReader::new(file)).await?;
    log::info!("Read {} records from {}", records.len(), path.display());
    Ok(records)
}

/// Parses JSON Lines records from any buffered reader.
///
/// # Errors
///
/// Fails on the first line that is not a valid record, naming its line number.
pub async fn parse_records<R: AsyncBufRead + Unpin>(reader: R) -> Result<Vec<Record>> {
    let mut lines = reader.lines();
    let mut records = Vec::new();
    let mut line_no = 0usize;
    while let Some(line) = lines.next_line().await.context("Failed to read input")? {
        line_no += 1;
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }
        let record: Record = serde_json::from_str(trimmed)
            .with_context(|| format!("Invalid record on line {line_no}"))?;
        records.push(record);
    }
    Ok(records)
}
