//! Main application modules.
//!
//! Input loading and the end-of-run summary used by the binary.

pub mod input;
pub mod summary;

// Re-export public API
pub use input::{parse_records, read_records};
pub use summary::{print_summary, summary_line};
