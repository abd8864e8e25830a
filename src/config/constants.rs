//! Configuration constants.

/// Name of the bulk resolver binary searched on `PATH` when no explicit path is given.
pub const MASSDNS_BINARY: &str = "massdns";

/// Default massdns worker process count.
pub const DEFAULT_PROCESSES: u32 = 1;
/// Default massdns socket count per process.
pub const DEFAULT_SOCKET_COUNT: u32 = 1;
/// Hash table sizing hint, roughly the number of names massdns keeps in flight.
pub const DEFAULT_HASHMAP_SIZE: u32 = 10_000;
/// Per-name retry budget inside massdns.
pub const DEFAULT_RESOLVE_COUNT: u32 = 15;

/// Default resolver list (one `address:port` per line).
pub const DEFAULT_RESOLVERS_PATH: &str = "./data/nameservers.txt";
/// Default directory for results; transient artifacts go under `temp/` inside it.
pub const DEFAULT_RESULT_DIR: &str = "./results";
/// Subdirectory of the result directory that holds per-run artifacts.
pub const TEMP_DIR_NAME: &str = "temp";
/// Default SQLite database path.
pub const DB_PATH: &str = "./results/result.sqlite3";

/// Timestamp format used to qualify per-run artifact names.
pub const ARTIFACT_TIMESTAMP_FORMAT: &str = "%Y%m%d_%H%M%S";

/// DNS response code meaning the query itself succeeded.
pub const DNS_STATUS_NOERROR: &str = "NOERROR";
/// Answer type that carries an IPv4 address.
pub const ADDRESS_RECORD_TYPE: &str = "A";
