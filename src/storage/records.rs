//! Per-domain record tables.
//!
//! Each target domain gets its own table (`example.com` → `example_com`) that is
//! replaced wholesale on every save.

use std::str::FromStr;

use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqlitePool};

use crate::error_handling::DatabaseError;
use crate::models::{Reason, Record, ResolveState};

const COLUMNS: &str =
    "subdomain, url, port, level, ip, cname, ttl, resolve, reason, resolver, alive, module, source";

/// Table name for a domain's records.
///
/// # Errors
///
/// Returns `DatabaseError::InvalidTableName` for anything that is not a plain
/// hostname, since the name is interpolated into SQL.
pub fn table_name(domain: &str) -> Result<String, DatabaseError> {
    let name = domain.replace('.', "_");
    validate_table_name(&name)?;
    Ok(name)
}

fn validate_table_name(name: &str) -> Result<(), DatabaseError> {
    let valid = !name.is_empty()
        && name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');
    if valid {
        Ok(())
    } else {
        Err(DatabaseError::InvalidTableName(name.to_string()))
    }
}

fn create_table_sql(table: &str) -> String {
    format!(
        "CREATE TABLE \"{table}\" (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            subdomain TEXT NOT NULL,
            url TEXT,
            port INTEGER,
            level INTEGER,
            ip TEXT NOT NULL DEFAULT '',
            cname TEXT NOT NULL DEFAULT '',
            ttl TEXT NOT NULL DEFAULT '',
            resolve INTEGER,
            reason TEXT,
            resolver TEXT,
            alive INTEGER,
            module TEXT,
            source TEXT
        )"
    )
}

/// Saves `records` as the complete content of `table`, preserving order.
///
/// Any previous content of the table is dropped. Runs in one transaction, so a
/// failed save leaves the old table in place.
pub async fn save_records(
    pool: &SqlitePool,
    table: &str,
    records: &[Record],
) -> Result<(), DatabaseError> {
    validate_table_name(table)?;
    log::info!("Saving {} resolved results to {table}", records.len());

    let mut tx = pool.begin().await?;
    sqlx::query(&format!("DROP TABLE IF EXISTS \"{table}\""))
        .execute(&mut *tx)
        .await?;
    sqlx::query(&create_table_sql(table))
        .execute(&mut *tx)
        .await?;

    let insert = format!(
        "INSERT INTO \"{table}\" ({COLUMNS}) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)"
    );
    for record in records {
        sqlx::query(&insert)
            .bind(record.subdomain.as_str())
            .bind(record.url.as_deref())
            .bind(record.port.map(i64::from))
            .bind(record.level.map(i64::from))
            .bind(record.ip.as_str())
            .bind(record.cname.as_str())
            .bind(record.ttl.as_str())
            .bind(record.resolve.as_flag().map(i64::from))
            .bind(record.reason.map(|r| r.to_string()))
            .bind(record.resolver.as_deref())
            .bind(record.alive)
            .bind(record.module.as_deref())
            .bind(record.source.as_deref())
            .execute(&mut *tx)
            .await?;
    }

    tx.commit().await?;
    Ok(())
}

fn record_from_row(row: &SqliteRow) -> Result<Record, sqlx::Error> {
    let reason: Option<String> = row.try_get("reason")?;
    let reason = reason.and_then(|r| {
        Reason::from_str(&r)
            .inspect_err(|_| log::warn!("Unknown reason {r:?} in stored record"))
            .ok()
    });
    let port: Option<i64> = row.try_get("port")?;
    let level: Option<i64> = row.try_get("level")?;

    Ok(Record {
        subdomain: row.try_get("subdomain")?,
        url: row.try_get("url")?,
        port: port.and_then(|p| u16::try_from(p).ok()),
        level: level.and_then(|l| u32::try_from(l).ok()),
        ip: row.try_get("ip")?,
        cname: row.try_get("cname")?,
        ttl: row.try_get("ttl")?,
        resolve: ResolveState::from_flag(row.try_get("resolve")?),
        reason,
        resolver: row.try_get("resolver")?,
        alive: row.try_get("alive")?,
        module: row.try_get("module")?,
        source: row.try_get("source")?,
    })
}

/// Loads the records of `table` in the order they were saved.
///
/// With `alive_only`, keeps rows marked alive, or rows with no alive flag that
/// resolved successfully.
pub async fn load_records(
    pool: &SqlitePool,
    table: &str,
    alive_only: bool,
) -> Result<Vec<Record>, DatabaseError> {
    validate_table_name(table)?;
    let mut sql = format!("SELECT {COLUMNS} FROM \"{table}\"");
    if alive_only {
        sql.push_str(" WHERE alive = 1 OR (alive IS NULL AND resolve = 1)");
    }
    sql.push_str(" ORDER BY id");

    let rows = sqlx::query(&sql).fetch_all(pool).await?;
    rows.iter()
        .map(|row| record_from_row(row).map_err(DatabaseError::from))
        .collect()
}
