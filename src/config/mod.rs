//! Application configuration and constants.
//!
//! This module provides:
//! - Configuration constants (massdns defaults, paths, DNS codes)
//! - Library configuration for the massdns invocation
//! - CLI option types and parsing

mod constants;
mod types;

// Re-export all constants
pub use constants::*;
pub use types::{ExportFormatArg, LogFormat, LogLevel, MassDnsConfig, Opt};
