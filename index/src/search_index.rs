use log::{debug, info};
use tldrkit_protocol::{
    Category, CommandRecord, CommandStore, Platform, PlatformSelection, composite_key,
};

/// Default result cap for live search suggestions.
pub const SUGGESTION_LIMIT: usize = 8;

/// Default result cap for a full search.
pub const SEARCH_LIMIT: usize = 20;

/// Lightweight, query-optimized projection of one [`CommandRecord`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchEntry {
    pub command: String,
    pub platform: Platform,
    pub description: String,
    pub key: String,
}

/// Immutable search structure over one generation of the command set.
///
/// Owns the store it was built from; both are replaced together, atomically
/// from a reader's point of view, when a new ingestion cycle completes.
#[derive(Debug, Clone, Default)]
pub struct SearchIndex {
    store: CommandStore,
    entries: Vec<SearchEntry>,
}

impl SearchIndex {
    /// Derive the flattened entry sequence, one entry per record in store
    /// iteration order.
    pub fn build(store: CommandStore) -> Self {
        let entries: Vec<SearchEntry> = store
            .records()
            .map(|record| SearchEntry {
                command: record.command.clone(),
                platform: record.platform,
                description: record.description.clone(),
                key: record.composite_key(),
            })
            .collect();
        info!("built search index with {} entries", entries.len());
        Self { store, entries }
    }

    pub fn store(&self) -> &CommandStore {
        &self.store
    }

    pub fn entries(&self) -> &[SearchEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Ranked substring search.
    ///
    /// Filters to the selected platforms, then to entries whose command
    /// name or description contains the query (case-insensitive). Exact
    /// command-name matches sort first, then prefix matches, then the rest
    /// in lexicographic command order; the sort is stable, so entries the
    /// ranking does not distinguish keep index order across calls. A blank
    /// query returns nothing without scanning.
    pub fn search(
        &self,
        query: &str,
        selection: &PlatformSelection,
        limit: usize,
    ) -> Vec<SearchEntry> {
        let query = query.trim().to_lowercase();
        if query.is_empty() {
            return Vec::new();
        }

        let mut matches: Vec<&SearchEntry> = self
            .entries
            .iter()
            .filter(|entry| selection.contains(entry.platform))
            .filter(|entry| {
                entry.command.to_lowercase().contains(&query)
                    || entry.description.to_lowercase().contains(&query)
            })
            .collect();

        matches.sort_by_cached_key(|entry| {
            let command = entry.command.to_lowercase();
            let rank = if command == query {
                0u8
            } else if command.starts_with(&query) {
                1
            } else {
                2
            };
            (rank, entry.command.clone())
        });

        debug!("query '{query}' matched {} entries", matches.len());
        matches.into_iter().take(limit).cloned().collect()
    }

    /// Resolve a command name against the selection, trying each selected
    /// platform in order and then the fixed fallback platform once.
    pub fn resolve(
        &self,
        command: &str,
        selection: &PlatformSelection,
    ) -> Option<&CommandRecord> {
        for platform in selection.iter() {
            if let Some(record) = self.store.get(&composite_key(platform, command)) {
                return Some(record);
            }
        }
        self.store.get(&composite_key(Platform::FALLBACK, command))
    }

    /// Single-key lookup with no fallback, for callers that already know
    /// the platform.
    pub fn resolve_exact(&self, command: &str, platform: Platform) -> Option<&CommandRecord> {
        self.store.get(&composite_key(platform, command))
    }

    /// The subset of a category's commands available under the current
    /// selection. Unlike [`SearchIndex::resolve`], no fallback platform is
    /// consulted; availability reflects the selection alone.
    pub fn available_in_category(
        &self,
        category: &Category,
        selection: &PlatformSelection,
    ) -> Vec<String> {
        category
            .commands
            .iter()
            .copied()
            .filter(|command| {
                selection
                    .iter()
                    .any(|platform| self.store.contains_key(&composite_key(platform, command)))
            })
            .map(str::to_string)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn record(platform: Platform, command: &str, description: &str) -> CommandRecord {
        CommandRecord {
            command: command.to_string(),
            platform,
            raw_text: format!("# {command}\n\n> {description}\n"),
            description: description.to_string(),
            examples: Vec::new(),
        }
    }

    fn sample_index() -> SearchIndex {
        let mut store = CommandStore::new();
        store.insert(record(Platform::Common, "ls", "List directory contents."));
        store.insert(record(Platform::Linux, "lsblk", "List block devices."));
        store.insert(record(Platform::Linux, "als", "Archive listing helper."));
        store.insert(record(Platform::Windows, "dir", "List directory contents."));
        store.insert(record(Platform::Osx, "brew", "Package manager for macOS."));
        SearchIndex::build(store)
    }

    fn commands(entries: &[SearchEntry]) -> Vec<&str> {
        entries.iter().map(|entry| entry.command.as_str()).collect()
    }

    #[test]
    fn test_build_preserves_store_order() {
        let index = sample_index();
        assert_eq!(index.len(), 5);
        assert_eq!(
            commands(index.entries()),
            vec!["ls", "lsblk", "als", "dir", "brew"]
        );
        assert_eq!(index.entries()[0].key, "common-ls");
    }

    #[test]
    fn test_exact_then_prefix_then_alphabetical() {
        let index = sample_index();
        let selection = PlatformSelection::default();
        let results = index.search("ls", &selection, SEARCH_LIMIT);
        assert_eq!(commands(&results), vec!["ls", "lsblk", "als"]);
    }

    #[test]
    fn test_blank_query_returns_nothing() {
        let index = sample_index();
        let selection = PlatformSelection::default();
        assert!(index.search("", &selection, SEARCH_LIMIT).is_empty());
        assert!(index.search("   ", &selection, SEARCH_LIMIT).is_empty());
    }

    #[test]
    fn test_search_matches_descriptions_too() {
        let index = sample_index();
        let selection = PlatformSelection::default();
        let results = index.search("directory", &selection, SEARCH_LIMIT);
        assert_eq!(commands(&results), vec!["dir", "ls"]);
    }

    #[test]
    fn test_search_is_case_insensitive() {
        let index = sample_index();
        let selection = PlatformSelection::default();
        let results = index.search("LS", &selection, SEARCH_LIMIT);
        assert_eq!(commands(&results), vec!["ls", "lsblk", "als"]);
    }

    #[test]
    fn test_search_respects_platform_selection() {
        let index = sample_index();
        let linux_only = PlatformSelection::new([Platform::Linux]);
        let results = index.search("ls", &linux_only, SEARCH_LIMIT);
        assert_eq!(commands(&results), vec!["lsblk", "als"]);
        assert!(results.iter().all(|entry| entry.platform == Platform::Linux));
    }

    #[test]
    fn test_search_truncates_to_limit() {
        let index = sample_index();
        let selection = PlatformSelection::default();
        let results = index.search("ls", &selection, 1);
        assert_eq!(commands(&results), vec!["ls"]);
    }

    #[test]
    fn test_search_is_stable_across_calls() {
        let index = sample_index();
        let selection = PlatformSelection::default();
        let first = index.search("l", &selection, SEARCH_LIMIT);
        for _ in 0..5 {
            assert_eq!(index.search("l", &selection, SEARCH_LIMIT), first);
        }
    }

    #[test]
    fn test_resolve_follows_selection_order() {
        let mut store = CommandStore::new();
        store.insert(record(Platform::Common, "tar", "Common page."));
        store.insert(record(Platform::Linux, "tar", "Linux page."));
        let index = SearchIndex::build(store);

        let linux_first = PlatformSelection::new([Platform::Linux, Platform::Common]);
        let found = index.resolve("tar", &linux_first).expect("record present");
        assert_eq!(found.platform, Platform::Linux);

        let common_first = PlatformSelection::new([Platform::Common, Platform::Linux]);
        let found = index.resolve("tar", &common_first).expect("record present");
        assert_eq!(found.platform, Platform::Common);
    }

    #[test]
    fn test_resolve_falls_back_to_common() {
        let index = sample_index();
        // "ls" only exists under common; a windows-only selection still
        // finds it through the fallback retry.
        let windows_only = PlatformSelection::new([Platform::Windows]);
        let found = index.resolve("ls", &windows_only).expect("record present");
        assert_eq!(found.platform, Platform::Common);
    }

    #[test]
    fn test_resolve_absent_command() {
        let index = sample_index();
        let selection = PlatformSelection::default();
        assert!(index.resolve("xyzzy", &selection).is_none());
    }

    #[test]
    fn test_resolve_exact_has_no_fallback() {
        let index = sample_index();
        assert!(index.resolve_exact("ls", Platform::Common).is_some());
        assert!(index.resolve_exact("ls", Platform::Windows).is_none());
    }

    #[test]
    fn test_category_availability_respects_selection() {
        let index = sample_index();
        let file_system = Category::by_slug("filesystem").expect("known category");

        let default_selection = PlatformSelection::default();
        assert_eq!(
            index.available_in_category(file_system, &default_selection),
            vec!["ls".to_string()]
        );

        // "ls" lives under common only; without common selected it is not
        // counted as available.
        let windows_only = PlatformSelection::new([Platform::Windows]);
        assert!(
            index
                .available_in_category(file_system, &windows_only)
                .is_empty()
        );
    }
}
