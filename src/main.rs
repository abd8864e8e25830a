//! Main application entry point (CLI binary).
//!
//! This is a thin wrapper around the `subresolve` library that handles:
//! - Command-line argument parsing
//! - Environment variable loading (.env file)
//! - Logger initialization
//! - User-facing output formatting
//!
//! All core functionality is implemented in the library crate.

use anyhow::{Context, Result};
use clap::Parser;
use std::process;

use subresolve::initialization::init_logger_with;
use subresolve::{print_summary, run_domain, Opt};

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables from .env file (if it exists), e.g. RUST_LOG
    if dotenvy::dotenv().is_err() {
        if let Ok(exe_path) = std::env::current_exe() {
            if let Some(exe_dir) = exe_path.parent() {
                let env_path = exe_dir.join(".env");
                if env_path.exists() {
                    let _ = dotenvy::from_path(&env_path);
                }
            }
        }
    }

    let opt = Opt::parse();

    init_logger_with(opt.log_level.clone().into(), opt.log_format.clone())
        .context("Failed to initialize logger")?;

    match run_domain(&opt).await {
        Ok(report) => {
            print_summary(&report.domain, &report.summary, &report.table, &report.db_path);
            if let Some(count) = report.exported {
                eprintln!("Exported {count} record{}", if count == 1 { "" } else { "s" });
            }
            Ok(())
        }
        Err(e) => {
            eprintln!("subresolve error: {:#}", e);
            process::exit(1);
        }
    }
}
