use crate::record::{CommandRecord, CommandStore};
use serde::{Deserialize, Serialize};
use std::time::SystemTime;
use thiserror::Error;

/// Why a persisted snapshot could not be turned back into a store.
#[derive(Error, Debug)]
pub enum SnapshotError {
    #[error("duplicate snapshot key: {0}")]
    DuplicateKey(String),

    #[error("snapshot key {key} does not match its record key {actual}")]
    KeyMismatch { key: String, actual: String },
}

/// The persisted representation of a fully decoded command set.
///
/// Written once per successful ingestion cycle and read once at startup.
/// The entry list must reconstruct a [`CommandStore`] without key
/// collisions; a snapshot that cannot is treated as absent by the cache.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CachedSnapshot {
    /// `(composite key, record)` pairs in store order.
    pub entries: Vec<(String, CommandRecord)>,

    /// When the snapshot's data was fetched.
    pub timestamp: SystemTime,
}

impl CachedSnapshot {
    /// Capture the full store for persistence.
    pub fn from_store(store: &CommandStore, timestamp: SystemTime) -> Self {
        Self {
            entries: store
                .iter()
                .map(|(key, record)| (key.clone(), record.clone()))
                .collect(),
            timestamp,
        }
    }

    /// Rebuild the store, rejecting snapshots whose entries collide or
    /// whose keys disagree with their records.
    pub fn into_store(self) -> Result<CommandStore, SnapshotError> {
        let mut store = CommandStore::new();
        for (key, record) in self.entries {
            let actual = record.composite_key();
            if actual != key {
                return Err(SnapshotError::KeyMismatch { key, actual });
            }
            if store.insert(record).is_some() {
                return Err(SnapshotError::DuplicateKey(key));
            }
        }
        Ok(store)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::Platform;
    use pretty_assertions::assert_eq;

    fn record(platform: Platform, command: &str) -> CommandRecord {
        CommandRecord {
            command: command.to_string(),
            platform,
            raw_text: format!("# {command}"),
            description: format!("{command} summary"),
            examples: Vec::new(),
        }
    }

    #[test]
    fn test_round_trip_preserves_keys_and_fields() {
        let mut store = CommandStore::new();
        store.insert(record(Platform::Common, "ls"));
        store.insert(record(Platform::Linux, "grep"));

        let snapshot = CachedSnapshot::from_store(&store, SystemTime::UNIX_EPOCH);
        let rebuilt = snapshot.into_store().expect("snapshot reconstructs");
        assert_eq!(rebuilt, store);
    }

    #[test]
    fn test_duplicate_keys_are_rejected() {
        let snapshot = CachedSnapshot {
            entries: vec![
                ("common-ls".to_string(), record(Platform::Common, "ls")),
                ("common-ls".to_string(), record(Platform::Common, "ls")),
            ],
            timestamp: SystemTime::UNIX_EPOCH,
        };
        assert!(matches!(
            snapshot.into_store(),
            Err(SnapshotError::DuplicateKey(_))
        ));
    }

    #[test]
    fn test_mismatched_key_is_rejected() {
        let snapshot = CachedSnapshot {
            entries: vec![("linux-ls".to_string(), record(Platform::Common, "ls"))],
            timestamp: SystemTime::UNIX_EPOCH,
        };
        assert!(matches!(
            snapshot.into_store(),
            Err(SnapshotError::KeyMismatch { .. })
        ));
    }

    #[test]
    fn test_snapshot_serializes_with_serde() {
        let mut store = CommandStore::new();
        store.insert(record(Platform::Common, "ls"));
        let snapshot = CachedSnapshot::from_store(&store, SystemTime::UNIX_EPOCH);

        let json = serde_json::to_string(&snapshot).expect("serializes");
        let back: CachedSnapshot = serde_json::from_str(&json).expect("deserializes");
        assert_eq!(back, snapshot);
    }
}
