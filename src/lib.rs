//! subresolve library: bulk subdomain resolution with massdns
//!
//! This library takes the subdomain records collected for one target domain,
//! resolves the ones that have no address yet with a single massdns run, and
//! reconciles the results back into the record set before it is persisted.
//!
//! # Example
//!
//! ```no_run
//! use subresolve::{run_resolve, MassDns, MassDnsConfig, Record, ResolveJob};
//! use std::path::Path;
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let mut records = vec![Record::new("www.example.com")];
//! let job = ResolveJob::timestamped(Path::new("./results/temp"), Path::new("./results"), "example.com");
//! let resolver = MassDns::new(MassDnsConfig::default());
//!
//! let summary = run_resolve("example.com", &mut records, &resolver, &job).await?;
//! println!("{} ok, {} dropped", summary.ok, summary.dropped);
//! # Ok(())
//! # }
//! ```
//!
//! # Requirements
//!
//! This library requires a Tokio runtime. Use `#[tokio::main]` in your application
//! or ensure you're calling library functions within an async context.

#![warn(missing_docs)]

mod app;
pub mod config;
mod error_handling;
pub mod export;
pub mod initialization;
mod models;
mod resolve;
mod storage;

// Re-export public API
pub use app::{parse_records, print_summary, read_records, summary_line};
pub use config::{LogFormat, LogLevel, MassDnsConfig, Opt};
pub use error_handling::{
    DatabaseError, InitializationError, OutcomeType, ResolveError, ResolveStats,
};
pub use models::{Reason, Record, ResolveState};
pub use resolve::{
    apply_classification, classify_line, classify_lines, classify_output, filter_candidates,
    invoke_resolver, merge_classifications, normalize_name, run_resolve, write_candidates,
    AddressAnswers, BulkResolver, Classification, Classifications, LineOutcome, MassDns,
    ResolveJob, ResolveSummary,
};
pub use run::{run_domain, run_domain_with, RunReport};
pub use storage::{init_db_pool_with_path, load_records, save_records, table_name};

// Internal run module (one domain from input file to stored table)
mod run {
    use anyhow::{Context, Result};
    use log::info;
    use std::path::PathBuf;

    use crate::app::read_records;
    use crate::config::Opt;
    use crate::export::export;
    use crate::resolve::{run_resolve, BulkResolver, MassDns, ResolveJob, ResolveSummary};
    use crate::storage::{init_db_pool_with_path, save_records, table_name};

    /// Results of one domain's run.
    #[derive(Debug, Clone)]
    pub struct RunReport {
        /// Target domain
        pub domain: String,
        /// Table the records were saved to
        pub table: String,
        /// Number of records saved
        pub saved: usize,
        /// Resolve counts
        pub summary: ResolveSummary,
        /// Path to the SQLite database containing results
        pub db_path: PathBuf,
        /// Number of records exported, if an export was requested
        pub exported: Option<usize>,
    }

    /// Runs one domain with massdns as the resolver.
    ///
    /// # Errors
    ///
    /// See [`run_domain_with`].
    pub async fn run_domain(opt: &Opt) -> Result<RunReport> {
        let resolver = MassDns::new(opt.massdns_config());
        run_domain_with(opt, &resolver).await
    }

    /// Reads the domain's records, resolves them with `resolver`, saves the
    /// result and optionally exports it.
    ///
    /// # Errors
    ///
    /// This function will return an error if:
    /// - The input file cannot be read or holds an invalid record
    /// - The domain does not map to a valid table name
    /// - The resolver cannot be run or its output cannot be read
    /// - Database initialization or the save fails
    /// - The requested export fails
    pub async fn run_domain_with<R: BulkResolver>(opt: &Opt, resolver: &R) -> Result<RunReport> {
        // Validate the table name before spending a resolver run on the domain
        let table = table_name(&opt.domain).context("Invalid target domain")?;

        let mut records = read_records(&opt.input).await?;
        let job = ResolveJob::timestamped(&opt.temp_dir(), &opt.result_dir, &opt.domain);
        let summary = run_resolve(&opt.domain, &mut records, resolver, &job)
            .await
            .with_context(|| format!("Failed to resolve subdomains of {}", opt.domain))?;

        let pool = init_db_pool_with_path(&opt.db_path)
            .await
            .context("Failed to initialize database pool")?;
        save_records(&pool, &table, &records)
            .await
            .with_context(|| format!("Failed to save results to {table}"))?;
        pool.close().await;
        info!("Saved {} records of {} to {table}", records.len(), opt.domain);

        let exported = match opt.export_options(&table) {
            Some(export_opts) => Some(export(&export_opts).await.context("Export failed")?),
            None => None,
        };

        Ok(RunReport {
            domain: opt.domain.clone(),
            table,
            saved: records.len(),
            summary,
            db_path: opt.db_path.clone(),
            exported,
        })
    }
}
