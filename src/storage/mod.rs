// storage/mod.rs
// Database operations module

pub mod pool;
pub mod records;
#[cfg(test)]
pub mod test_helpers;

// Re-export commonly used items
pub use pool::init_db_pool_with_path;
pub use records::{load_records, save_records, table_name};
