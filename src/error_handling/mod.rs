//! Error handling and resolution statistics.
//!
//! This module provides:
//! - Fatal error types for the resolve pipeline, storage and initialization
//! - Non-fatal outcome types and a per-run outcome tracker
//!
//! Parse-level faults (malformed resolver lines) are never errors here: they are
//! recovered locally and counted as [`OutcomeType::MalformedLine`].

mod stats;
mod types;

// Re-export public API
pub use stats::ResolveStats;
pub use types::{DatabaseError, InitializationError, OutcomeType, ResolveError};
