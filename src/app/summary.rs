//! End-of-run summary for the CLI.

use crate::resolve::ResolveSummary;

/// One-line summary of a domain's resolve run.
pub fn summary_line(domain: &str, summary: &ResolveSummary) -> String {
    if !summary.resolver_invoked {
        return format!(
            "{domain}: nothing to resolve ({} record{} already resolved)",
            summary.passthrough,
            plural(summary.passthrough)
        );
    }
    let mut line = format!(
        "{domain}: resolved {} candidate{} ({} ok, {} no answer, {} no A record, {} dropped, {} kept)",
        summary.candidates,
        plural(summary.candidates),
        summary.ok,
        summary.no_answer,
        summary.no_a_record,
        summary.dropped,
        summary.passthrough,
    );
    if summary.empty_output {
        line.push_str(" - resolver returned no usable results, records left unchanged");
    }
    line
}

fn plural(n: usize) -> &'static str {
    if n == 1 {
        ""
    } else {
        "s"
    }
}

/// Prints the summary and where the results were saved.
///
/// Goes to stderr so stdout stays clean for `--export -`.
pub fn print_summary(domain: &str, summary: &ResolveSummary, table: &str, db_path: &std::path::Path) {
    eprintln!("{}", summary_line(domain, summary));
    eprintln!("Results saved in {} (table {table})", db_path.display());
}
