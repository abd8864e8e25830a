//! Application initialization.
//!
//! This module provides the process-level setup the binary performs before a run:
//! - Logger installation behind the `log` facade
//! - Database connection pool (re-exported from storage)

mod logger;

// Re-export public API
pub use logger::init_logger_with;
pub use crate::storage::init_db_pool_with_path;
