//! Candidate selection.

use crate::models::Record;

/// Returns the subdomains of all records that have no resolved address yet.
///
/// Input order is preserved so the candidate artifact is deterministic. Records
/// without a subdomain cannot be resolved and are skipped.
pub fn filter_candidates(records: &[Record]) -> Vec<String> {
    log::debug!("Filtering subdomains to be resolved");
    records
        .iter()
        .filter(|r| !r.has_ip() && !r.subdomain.is_empty())
        .map(|r| r.subdomain.clone())
        .collect()
}
