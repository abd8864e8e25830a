//! Error type definitions.
//!
//! This module defines the fatal error types of the resolve pipeline and its
//! collaborators, plus the non-fatal outcome types tallied during a run.

use std::path::PathBuf;
use std::process::ExitStatus;

use log::SetLoggerError;
use strum_macros::EnumIter as EnumIterMacro;
use thiserror::Error;

/// Error types for initialization failures.
#[derive(Error, Debug)]
#[allow(clippy::enum_variant_names)] // All variants end with "Error" by convention
pub enum InitializationError {
    /// Error initializing the logger.
    #[error("Logger initialization error: {0}")]
    LoggerError(#[from] SetLoggerError),
}

/// Fatal errors of one domain's resolution attempt.
///
/// Any of these aborts the pipeline before a single record is updated.
#[derive(Error, Debug)]
pub enum ResolveError {
    /// The bulk resolver binary could not be located.
    #[error("Resolver binary not found: {}", .0.display())]
    ResolverBinaryMissing(PathBuf),

    /// The bulk resolver process could not be started.
    #[error("Failed to start resolver {}: {source}", .binary.display())]
    InvocationFailed {
        /// Binary that was spawned
        binary: PathBuf,
        /// Spawn error
        #[source]
        source: std::io::Error,
    },

    /// The bulk resolver ran but exited unsuccessfully.
    #[error("Resolver {} exited with {status}", .binary.display())]
    ResolverExited {
        /// Binary that was run
        binary: PathBuf,
        /// Its exit status
        status: ExitStatus,
    },

    /// The candidate artifact could not be written.
    #[error("Failed to write candidate file {}: {source}", .path.display())]
    ArtifactWrite {
        /// Artifact being written
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// The resolver output artifact could not be opened or read.
    #[error("Failed to read resolver output {}: {source}", .path.display())]
    OutputRead {
        /// Output artifact
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },
}

/// Error types for database operations.
#[derive(Error, Debug)]
pub enum DatabaseError {
    /// Error creating the database file.
    #[error("Database file creation error: {0}")]
    FileCreationError(String),

    /// SQL execution error.
    #[error("SQL error: {0}")]
    SqlError(#[from] sqlx::Error),

    /// Table names are interpolated into SQL, so only `[A-Za-z0-9_-]` is accepted.
    #[error("Invalid table name: {0:?}")]
    InvalidTableName(String),
}

/// Per-hostname and per-line outcomes observed while resolving one domain.
///
/// None of these abort the pipeline; they are counted so a run can be summarized.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIterMacro)]
pub enum OutcomeType {
    // Classification outcomes
    /// Candidate updated with A records
    Ok,
    /// Candidate answered without an answer section
    NoAnswer,
    /// Candidate answered without A records
    NoARecord,
    // Parse-level faults and skipped lines
    /// Output line that failed to parse
    MalformedLine,
    /// Output line with a non-NOERROR status
    SkippedStatus,
    // Merge outcomes
    /// Already-resolved record kept as-is
    Passthrough,
    /// Unresolved record with no result, removed
    Dropped,
    /// Resolver produced nothing usable
    EmptyClassificationMap,
}

impl std::fmt::Display for OutcomeType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl OutcomeType {
    /// Human-readable label used in logs.
    pub fn as_str(&self) -> &'static str {
        match self {
            OutcomeType::Ok => "Resolved (OK)",
            OutcomeType::NoAnswer => "No answer section",
            OutcomeType::NoARecord => "No A record",
            OutcomeType::MalformedLine => "Malformed resolver output line",
            OutcomeType::SkippedStatus => "Non-NOERROR status",
            OutcomeType::Passthrough => "Already resolved (passed through)",
            OutcomeType::Dropped => "Dropped (no result)",
            OutcomeType::EmptyClassificationMap => "No usable resolver output",
        }
    }
}
