//! Reconciliation of classifications into the record set.

use crate::error_handling::{OutcomeType, ResolveStats};
use crate::models::{Record, ResolveState};

use super::classify::{Classification, Classifications};

/// Copies one classification into a record.
pub fn apply_classification(record: &mut Record, classification: &Classification) {
    record.reason = Some(classification.reason());
    record.resolver = classification.resolver().map(str::to_string);
    match classification {
        Classification::Ok { answers, .. } => {
            record.ip = answers.ip().join(",");
            record.cname = answers.cname().join(",");
            record.ttl = answers.ttl().join(",");
            record.resolve = ResolveState::Success;
        }
        Classification::NoAnswer { .. } | Classification::NoARecord { .. } => {
            record.resolve = ResolveState::Failure;
            record.alive = Some(false);
        }
    }
}

/// Merges `classifications` into `records`, preserving input order.
///
/// - records that already carry an `ip` pass through unchanged
/// - unresolved records with a classification are updated in place
/// - unresolved records without one are dropped
///
/// Exception: if `classifications` is empty the input is returned untouched
/// rather than emptied of every unresolved record.
pub fn merge_classifications(
    records: Vec<Record>,
    classifications: &Classifications,
    stats: &ResolveStats,
) -> Vec<Record> {
    log::debug!("Updating resolved results");
    if classifications.is_empty() {
        log::warn!("No valid resolved result");
        stats.increment(OutcomeType::EmptyClassificationMap);
        return records;
    }

    let mut merged = Vec::with_capacity(records.len());
    for mut record in records {
        if record.has_ip() {
            stats.increment(OutcomeType::Passthrough);
            merged.push(record);
            continue;
        }
        match classifications.get(&record.subdomain) {
            Some(classification) => {
                apply_classification(&mut record, classification);
                stats.increment(classification.outcome());
                merged.push(record);
            }
            None => {
                log::debug!("{} resolution has no result", record.subdomain);
                stats.increment(OutcomeType::Dropped);
            }
        }
    }
    merged
}
