//! Advisory persistent cache for the decoded command set.
//!
//! Persists one snapshot under a fixed store directory and record file,
//! wrapped in a versioned envelope. The cache never blocks ingestion: every
//! load failure degrades to "absent" and every save failure is logged and
//! swallowed, since the caller already holds the data in memory.

mod error;
mod snapshot_cache;

pub use error::{CacheError, Result};
pub use snapshot_cache::{DEFAULT_EXPIRY, STORE_DIR_NAME, SnapshotCache};
