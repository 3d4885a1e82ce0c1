use crate::platform::Platform;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// One usage example extracted from a command page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageExample {
    /// What the invocation does, taken from the page's `- ` line.
    pub description: String,

    /// The invocation itself, taken from the page's backtick line. May be
    /// empty when the page never supplied one.
    pub invocation: String,
}

/// One documented command on one platform.
///
/// Uniquely identified by `(platform, command)`; immutable after creation
/// and only ever replaced wholesale by a new ingestion cycle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommandRecord {
    /// Command name, e.g. `tar`.
    pub command: String,

    /// Platform the page was published under.
    pub platform: Platform,

    /// Original page text, retained verbatim so the page can be re-rendered
    /// under a different option-display mode.
    pub raw_text: String,

    /// Short summary from the page's `> ` line. May be empty.
    pub description: String,

    /// Ordered usage examples. May be empty.
    pub examples: Vec<PageExample>,
}

impl CommandRecord {
    /// The canonical `"{platform}-{command}"` lookup key for this record.
    pub fn composite_key(&self) -> String {
        composite_key(self.platform, &self.command)
    }
}

/// Build the canonical `"{platform}-{command}"` lookup key.
pub fn composite_key(platform: Platform, command: &str) -> String {
    format!("{platform}-{command}")
}

/// The authoritative mapping from composite key to [`CommandRecord`].
///
/// Backed by an insertion-ordered map so that every structure derived from
/// the store (the search index in particular) iterates records in a
/// reproducible order. Replaced wholesale on reload, never partially mutated.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CommandStore {
    records: IndexMap<String, CommandRecord>,
}

impl CommandStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a record under its composite key, returning any record the key
    /// previously mapped to.
    pub fn insert(&mut self, record: CommandRecord) -> Option<CommandRecord> {
        self.records.insert(record.composite_key(), record)
    }

    pub fn get(&self, key: &str) -> Option<&CommandRecord> {
        self.records.get(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.records.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Iterate `(key, record)` pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&String, &CommandRecord)> {
        self.records.iter()
    }

    /// Iterate records in insertion order.
    pub fn records(&self) -> impl Iterator<Item = &CommandRecord> {
        self.records.values()
    }
}
