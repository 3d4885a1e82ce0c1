use crate::error::{CacheError, Result};
use log::{debug, warn};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::{Duration, SystemTime};
use tldrkit_protocol::{CachedSnapshot, CommandRecord, CommandStore};
use tokio::fs;

/// Store directory created under the configured cache root.
pub const STORE_DIR_NAME: &str = "tldr-cache";

/// Snapshots older than this are considered stale. Freshness is the sole
/// invalidation policy; there is no per-entry expiry.
pub const DEFAULT_EXPIRY: Duration = Duration::from_secs(24 * 60 * 60);

const SNAPSHOT_FILENAME: &str = "commands.json";
const CURRENT_VERSION: u32 = 1;

/// On-disk envelope. The version gates schema evolution; a mismatched file
/// is treated as absent rather than migrated.
#[derive(Debug, Serialize, Deserialize)]
struct SnapshotEnvelope {
    version: u32,
    entries: Vec<(String, CommandRecord)>,
    timestamp: SystemTime,
}

/// File-backed snapshot cache.
///
/// Writes go to a temp file first and are renamed into place, so a reader
/// never observes a partially written snapshot.
#[derive(Debug, Clone)]
pub struct SnapshotCache {
    store_dir: PathBuf,
    expiry: Duration,
}

impl SnapshotCache {
    /// Create a cache rooted at `cache_root/`[`STORE_DIR_NAME`].
    pub fn new(cache_root: impl AsRef<Path>) -> Self {
        Self {
            store_dir: cache_root.as_ref().join(STORE_DIR_NAME),
            expiry: DEFAULT_EXPIRY,
        }
    }

    pub fn with_expiry(mut self, expiry: Duration) -> Self {
        self.expiry = expiry;
        self
    }

    /// Read the persisted snapshot, if any. Missing files, unreadable JSON,
    /// and version mismatches all resolve to `None`; the cache is advisory.
    pub async fn load(&self) -> Option<CachedSnapshot> {
        match self.try_load().await {
            Ok(snapshot) => {
                debug!("loaded snapshot with {} entries", snapshot.entries.len());
                Some(snapshot)
            }
            Err(error) => {
                debug!("snapshot cache unavailable: {error}");
                None
            }
        }
    }

    /// Persist the full store with its fetch timestamp. Failures are logged
    /// and swallowed; ingestion already holds the data in memory.
    pub async fn save(&self, store: &CommandStore, timestamp: SystemTime) {
        match self.try_save(store, timestamp).await {
            Ok(()) => debug!("persisted snapshot with {} entries", store.len()),
            Err(error) => warn!("failed to persist command snapshot: {error}"),
        }
    }

    /// Whether a snapshot taken at `timestamp` is still within the expiry
    /// window.
    pub fn is_fresh(&self, timestamp: SystemTime) -> bool {
        match timestamp.elapsed() {
            Ok(age) => age < self.expiry,
            // A timestamp in the future can only be clock skew; within the
            // window by definition.
            Err(_) => true,
        }
    }

    async fn try_load(&self) -> Result<CachedSnapshot> {
        let bytes = fs::read(self.record_path()).await?;
        let envelope: SnapshotEnvelope = serde_json::from_slice(&bytes)?;
        if envelope.version != CURRENT_VERSION {
            return Err(CacheError::Version {
                found: envelope.version,
                expected: CURRENT_VERSION,
            });
        }
        Ok(CachedSnapshot {
            entries: envelope.entries,
            timestamp: envelope.timestamp,
        })
    }

    async fn try_save(&self, store: &CommandStore, timestamp: SystemTime) -> Result<()> {
        fs::create_dir_all(&self.store_dir).await?;

        let snapshot = CachedSnapshot::from_store(store, timestamp);
        let envelope = SnapshotEnvelope {
            version: CURRENT_VERSION,
            entries: snapshot.entries,
            timestamp: snapshot.timestamp,
        };
        let bytes = serde_json::to_vec(&envelope)?;

        let staging_path = self.store_dir.join(format!("{SNAPSHOT_FILENAME}.tmp"));
        fs::write(&staging_path, &bytes).await?;
        fs::rename(&staging_path, self.record_path()).await?;
        Ok(())
    }

    fn record_path(&self) -> PathBuf {
        self.store_dir.join(SNAPSHOT_FILENAME)
    }
}
