//! Bulk subdomain resolution.
//!
//! This module runs a strictly sequential pipeline once per target domain:
//! - Candidate selection (records without an address)
//! - massdns invocation over a newline-delimited candidate file
//! - Classification of massdns JSON output per hostname
//! - Reconciliation of classifications into the record set
//!
//! Each stage finishes before the next starts. Invocation failures abort the run
//! before any record is touched; malformed output lines are skipped.

mod classify;
mod filter;
mod invoker;
mod merge;

// Re-export public API
pub use classify::{
    classify_line, classify_lines, classify_output, normalize_name, AddressAnswers,
    Classification, Classifications, LineOutcome,
};
pub use filter::filter_candidates;
pub use invoker::{invoke_resolver, write_candidates, BulkResolver, MassDns, ResolveJob};
pub use merge::{apply_classification, merge_classifications};

use crate::error_handling::{OutcomeType, ResolveError, ResolveStats};
use crate::models::Record;

/// Counts describing one domain's resolve run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResolveSummary {
    /// Hostnames handed to the resolver
    pub candidates: usize,
    /// Whether the resolver was run at all
    pub resolver_invoked: bool,
    /// Candidates that got at least one A record
    pub ok: usize,
    /// Candidates answered without an answer section
    pub no_answer: usize,
    /// Candidates answered with aliases but no A record
    pub no_a_record: usize,
    /// Already-resolved records passed through unchanged
    pub passthrough: usize,
    /// Unresolved records removed for lack of a result
    pub dropped: usize,
    /// Output lines that were not valid JSON
    pub malformed_lines: usize,
    /// Output lines with a status other than NOERROR
    pub skipped_status: usize,
    /// Resolver produced no usable output, so the input was returned as-is
    pub empty_output: bool,
}

impl ResolveSummary {
    fn from_stats(candidates: usize, stats: &ResolveStats) -> Self {
        ResolveSummary {
            candidates,
            resolver_invoked: true,
            ok: stats.get(OutcomeType::Ok),
            no_answer: stats.get(OutcomeType::NoAnswer),
            no_a_record: stats.get(OutcomeType::NoARecord),
            passthrough: stats.get(OutcomeType::Passthrough),
            dropped: stats.get(OutcomeType::Dropped),
            malformed_lines: stats.get(OutcomeType::MalformedLine),
            skipped_status: stats.get(OutcomeType::SkippedStatus),
            empty_output: stats.get(OutcomeType::EmptyClassificationMap) > 0,
        }
    }
}

/// Resolves every record of `domain` that lacks an address, in place.
///
/// If no record needs resolving, `resolver` is never invoked and `records` is
/// left unchanged.
///
/// # Errors
///
/// Any [`ResolveError`] from writing the candidate file, running the resolver
/// or reading its output. In that case `records` has not been modified; retrying
/// the whole domain is up to the caller.
pub async fn run_resolve<R: BulkResolver>(
    domain: &str,
    records: &mut Vec<Record>,
    resolver: &R,
    job: &ResolveJob,
) -> Result<ResolveSummary, ResolveError> {
    log::info!("Start resolving subdomains of {domain}");
    let candidates = filter_candidates(records);
    if candidates.is_empty() {
        log::info!("No subdomains of {domain} need resolving");
        return Ok(ResolveSummary {
            passthrough: records.len(),
            ..Default::default()
        });
    }
    let candidate_count = candidates.len();

    let output = invoke_resolver(resolver, job, &candidates)
        .await
        .inspect_err(|e| log::error!("Resolving subdomains of {domain} aborted: {e}"))?;
    drop(candidates);

    let classifications = classify_output(&output)
        .inspect_err(|e| log::error!("Resolving subdomains of {domain} aborted: {e}"))?;

    let stats = ResolveStats::new();
    stats.absorb(classifications.stats());
    *records = merge_classifications(std::mem::take(records), &classifications, &stats);
    stats.log_summary(domain);
    log::info!(
        "Updated {} of {candidate_count} candidate subdomains of {domain}",
        stats.total_classified()
    );

    log::info!("Finished resolve subdomains of {domain}");
    Ok(ResolveSummary::from_stats(candidate_count, &stats))
}

#[cfg(test)]
mod tests;
