//! Configuration types and CLI options.
//!
//! This module defines enums and structs used for command-line argument parsing
//! and library configuration.

use std::path::PathBuf;

use clap::{Parser, ValueEnum};

use crate::config::constants::{
    DB_PATH, DEFAULT_HASHMAP_SIZE, DEFAULT_PROCESSES, DEFAULT_RESOLVERS_PATH,
    DEFAULT_RESOLVE_COUNT, DEFAULT_RESULT_DIR, DEFAULT_SOCKET_COUNT, TEMP_DIR_NAME,
};
use crate::export::{ExportFormat, ExportOptions};

/// Logging level for the application.
///
/// Controls the verbosity of log output, from most restrictive (Error) to most
/// verbose (Trace).
#[derive(Clone, Debug, ValueEnum)]
pub enum LogLevel {
    /// Only error messages
    Error,
    /// Error and warning messages
    Warn,
    /// Error, warning, and informational messages
    Info,
    /// All messages except trace
    Debug,
    /// All messages including trace
    Trace,
}

impl From<LogLevel> for log::LevelFilter {
    fn from(l: LogLevel) -> Self {
        match l {
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

/// Log output format.
///
/// Controls how log messages are formatted:
/// - `Plain`: Human-readable format with colors (default)
/// - `Json`: Structured JSON format for machine parsing
#[derive(Clone, Debug, ValueEnum)]
pub enum LogFormat {
    /// Human-readable format with colors (default)
    Plain,
    /// Structured JSON format for machine parsing
    Json,
}

/// Export format selectable from the command line.
#[derive(Clone, Debug, ValueEnum)]
pub enum ExportFormatArg {
    /// Comma-separated values with a header row
    Csv,
    /// One JSON object per line
    Jsonl,
}

impl From<ExportFormatArg> for ExportFormat {
    fn from(f: ExportFormatArg) -> Self {
        match f {
            ExportFormatArg::Csv => ExportFormat::Csv,
            ExportFormatArg::Jsonl => ExportFormat::Jsonl,
        }
    }
}

/// massdns invocation settings (no CLI dependencies).
///
/// # Examples
///
/// ```no_run
/// use subresolve::MassDnsConfig;
/// use std::path::PathBuf;
///
/// let config = MassDnsConfig {
///     binary: Some(PathBuf::from("/opt/massdns/bin/massdns")),
///     processes: 4,
///     ..Default::default()
/// };
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MassDnsConfig {
    /// Explicit binary path; `None` searches `PATH`
    pub binary: Option<PathBuf>,
    /// Resolver list file (`address:port` per line)
    pub resolvers: PathBuf,
    /// Worker process count
    pub processes: u32,
    /// Socket count per process
    pub socket_count: u32,
    /// Internal hash table sizing hint
    pub hashmap_size: u32,
    /// Per-name retry budget
    pub resolve_count: u32,
}

impl Default for MassDnsConfig {
    fn default() -> Self {
        Self {
            binary: None,
            resolvers: PathBuf::from(DEFAULT_RESOLVERS_PATH),
            processes: DEFAULT_PROCESSES,
            socket_count: DEFAULT_SOCKET_COUNT,
            hashmap_size: DEFAULT_HASHMAP_SIZE,
            resolve_count: DEFAULT_RESOLVE_COUNT,
        }
    }
}

/// Command-line options.
///
/// # Examples
///
/// ```bash
/// # Resolve the collected records of one domain
/// subresolve example.com --input collected.jsonl
///
/// # More massdns workers and a CSV export
/// subresolve example.com --input collected.jsonl --processes 4 --export ./example.csv
/// ```
#[derive(Debug, Parser)]
#[command(
    name = "subresolve",
    about = "Bulk-resolves collected subdomains with massdns and stores the reconciled records."
)]
pub struct Opt {
    /// Target (apex) domain the records belong to
    pub domain: String,

    /// JSON Lines file of collected records ("-" reads stdin)
    #[arg(long, value_parser)]
    pub input: PathBuf,

    /// Resolver list file (one address:port per line)
    #[arg(long, value_parser, default_value = DEFAULT_RESOLVERS_PATH)]
    pub resolvers: PathBuf,

    /// massdns binary path (searched on PATH when omitted)
    #[arg(long, value_parser)]
    pub massdns: Option<PathBuf>,

    /// Result directory; per-run artifacts are written to its temp/ subdirectory
    #[arg(long, value_parser, default_value = DEFAULT_RESULT_DIR)]
    pub result_dir: PathBuf,

    /// massdns worker process count
    #[arg(long, default_value_t = DEFAULT_PROCESSES)]
    pub processes: u32,

    /// massdns socket count per process
    #[arg(long, default_value_t = DEFAULT_SOCKET_COUNT)]
    pub socket_count: u32,

    /// massdns hash table size hint
    #[arg(long, default_value_t = DEFAULT_HASHMAP_SIZE)]
    pub hashmap_size: u32,

    /// massdns per-name retry budget
    #[arg(long, default_value_t = DEFAULT_RESOLVE_COUNT)]
    pub resolve_count: u32,

    /// Database path (SQLite file)
    #[arg(long, value_parser, default_value = DB_PATH)]
    pub db_path: PathBuf,

    /// Export the stored table to this path after resolving ("-" writes stdout)
    #[arg(long, value_parser)]
    pub export: Option<PathBuf>,

    /// Export format: csv|jsonl
    #[arg(long, value_enum, default_value_t = ExportFormatArg::Csv)]
    pub export_format: ExportFormatArg,

    /// Only export alive records
    #[arg(long)]
    pub alive_only: bool,

    /// Log level: error|warn|info|debug|trace
    #[arg(long, value_enum, default_value_t = LogLevel::Info)]
    pub log_level: LogLevel,

    /// Log format: plain|json
    #[arg(long, value_enum, default_value_t = LogFormat::Plain)]
    pub log_format: LogFormat,
}

impl Opt {
    /// massdns settings taken from the command line.
    pub fn massdns_config(&self) -> MassDnsConfig {
        MassDnsConfig {
            binary: self.massdns.clone(),
            resolvers: self.resolvers.clone(),
            processes: self.processes,
            socket_count: self.socket_count,
            hashmap_size: self.hashmap_size,
            resolve_count: self.resolve_count,
        }
    }

    /// Directory for candidate and raw output files.
    pub fn temp_dir(&self) -> PathBuf {
        self.result_dir.join(TEMP_DIR_NAME)
    }

    /// Export options for `table`, or `None` when no export was requested.
    pub fn export_options(&self, table: &str) -> Option<ExportOptions> {
        let output = self.export.as_ref()?;
        Some(ExportOptions {
            db_path: self.db_path.clone(),
            output: (output.as_os_str() != "-").then(|| output.clone()),
            format: self.export_format.clone().into(),
            table: table.to_string(),
            alive_only: self.alive_only,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_level_conversion() {
        assert_eq!(log::LevelFilter::from(LogLevel::Error), log::LevelFilter::Error);
        assert_eq!(log::LevelFilter::from(LogLevel::Warn), log::LevelFilter::Warn);
        assert_eq!(log::LevelFilter::from(LogLevel::Info), log::LevelFilter::Info);
        assert_eq!(log::LevelFilter::from(LogLevel::Debug), log::LevelFilter::Debug);
        assert_eq!(log::LevelFilter::from(LogLevel::Trace), log::LevelFilter::Trace);
    }

    #[test]
    fn test_massdns_config_defaults() {
        let config = MassDnsConfig::default();
        assert_eq!(config.binary, None);
        assert_eq!(config.processes, 1);
        assert_eq!(config.socket_count, 1);
        assert_eq!(config.hashmap_size, 10_000);
        assert_eq!(config.resolve_count, 15);
        assert_eq!(config.resolvers, PathBuf::from("./data/nameservers.txt"));
    }

    #[test]
    fn test_opt_defaults() {
        let opt = Opt::parse_from(["subresolve", "example.com", "--input", "in.jsonl"]);
        assert_eq!(opt.domain, "example.com");
        assert_eq!(opt.massdns_config(), MassDnsConfig::default());
        assert_eq!(opt.temp_dir(), PathBuf::from("./results").join("temp"));
        assert!(opt.export_options("example_com").is_none());
    }

    #[test]
    fn test_opt_export_options() {
        let opt = Opt::parse_from([
            "subresolve",
            "example.com",
            "--input",
            "in.jsonl",
            "--export",
            "-",
            "--export-format",
            "jsonl",
            "--alive-only",
        ]);
        let export = opt.export_options("example_com").unwrap();
        assert_eq!(export.output, None);
        assert_eq!(export.format, ExportFormat::Jsonl);
        assert_eq!(export.table, "example_com");
        assert!(export.alive_only);
    }

    #[test]
    fn test_opt_massdns_overrides() {
        let opt = Opt::parse_from([
            "subresolve",
            "example.com",
            "--input",
            "in.jsonl",
            "--massdns",
            "/opt/massdns",
            "--processes",
            "4",
            "--socket-count",
            "2",
        ]);
        let config = opt.massdns_config();
        assert_eq!(config.binary, Some(PathBuf::from("/opt/massdns")));
        assert_eq!(config.processes, 4);
        assert_eq!(config.socket_count, 2);
    }
}
