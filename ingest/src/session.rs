use crate::ingestor::IngestOutcome;
use crate::nav::NavRequest;
use tldrkit_index::{SUGGESTION_LIMIT, SearchEntry, SearchIndex};
use tldrkit_protocol::{
    CATEGORIES, Category, CommandRecord, OptionsMode, PageExample, Platform, PlatformSelection,
    expand_placeholders,
};

/// Render-ready projection of one command page: all option placeholders
/// already expanded under the session's display mode, so the renderer never
/// sees raw placeholder syntax.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandView {
    pub command: String,
    pub platform: Platform,
    pub description: String,
    pub examples: Vec<PageExample>,
}

/// What a navigation request resolves to. Handed to the rendering
/// collaborator as-is.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum View {
    Home,
    Command(CommandView),
    Category {
        category: &'static Category,
        commands: Vec<String>,
    },
    NotFound {
        query: String,
    },
}

/// Application context for one loaded data generation.
///
/// Owns the platform selection and option-display mode that were ambient
/// globals in earlier designs; every read path (search, resolution,
/// navigation, category browsing) goes through here. The index inside is
/// immutable; a new ingestion cycle produces a whole new session.
#[derive(Debug, Clone)]
pub struct Session {
    index: SearchIndex,
    platforms: PlatformSelection,
    options_mode: OptionsMode,
    degraded: bool,
}

impl Session {
    pub fn new(outcome: IngestOutcome) -> Self {
        Self {
            degraded: outcome.is_degraded(),
            index: outcome.index,
            platforms: PlatformSelection::default(),
            options_mode: OptionsMode::default(),
        }
    }

    pub fn with_platforms(mut self, platforms: PlatformSelection) -> Self {
        self.platforms = platforms;
        self
    }

    pub fn with_options_mode(mut self, mode: OptionsMode) -> Self {
        self.options_mode = mode;
        self
    }

    pub fn index(&self) -> &SearchIndex {
        &self.index
    }

    pub fn platforms(&self) -> &PlatformSelection {
        &self.platforms
    }

    pub fn options_mode(&self) -> OptionsMode {
        self.options_mode
    }

    /// Whether only fallback data is loaded.
    pub fn is_degraded(&self) -> bool {
        self.degraded
    }

    pub fn set_options_mode(&mut self, mode: OptionsMode) {
        self.options_mode = mode;
    }

    pub fn select_platform(&mut self, platform: Platform) {
        self.platforms.select(platform);
    }

    pub fn deselect_platform(&mut self, platform: Platform) {
        self.platforms.deselect(platform);
    }

    /// Ranked live suggestions, capped at [`SUGGESTION_LIMIT`].
    pub fn suggest(&self, query: &str) -> Vec<SearchEntry> {
        self.index.search(query, &self.platforms, SUGGESTION_LIMIT)
    }

    /// Ranked search, capped at `limit`; [`tldrkit_index::SEARCH_LIMIT`] is
    /// the usual cap.
    pub fn search(&self, query: &str, limit: usize) -> Vec<SearchEntry> {
        self.index.search(query, &self.platforms, limit)
    }

    pub fn resolve(&self, command: &str) -> Option<&CommandRecord> {
        self.index.resolve(command, &self.platforms)
    }

    pub fn resolve_exact(&self, command: &str, platform: Platform) -> Option<&CommandRecord> {
        self.index.resolve_exact(command, platform)
    }

    /// Categories that have at least one command available under the
    /// current selection, with their available commands.
    pub fn categories_with_commands(&self) -> Vec<(&'static Category, Vec<String>)> {
        CATEGORIES
            .iter()
            .map(|category| {
                (
                    category,
                    self.index.available_in_category(category, &self.platforms),
                )
            })
            .filter(|(_, commands)| !commands.is_empty())
            .collect()
    }

    /// Map a navigation request to the view the renderer should display.
    pub fn resolve_nav(&self, request: &NavRequest) -> View {
        match request {
            NavRequest::Home => View::Home,
            NavRequest::Command {
                name,
                platform: Some(platform),
            } => match self.resolve_exact(name, *platform) {
                Some(record) => View::Command(self.command_view(record)),
                None => View::NotFound {
                    query: name.clone(),
                },
            },
            NavRequest::Command {
                name,
                platform: None,
            } => match self.resolve(name) {
                Some(record) => View::Command(self.command_view(record)),
                None => View::NotFound {
                    query: name.clone(),
                },
            },
            NavRequest::Category { slug } => match Category::by_slug(slug) {
                Some(category) => View::Category {
                    category,
                    commands: self.index.available_in_category(category, &self.platforms),
                },
                // Unknown addresses route home rather than erroring.
                None => View::Home,
            },
        }
    }

    fn command_view(&self, record: &CommandRecord) -> CommandView {
        CommandView {
            command: record.command.clone(),
            platform: record.platform,
            description: expand_placeholders(&record.description, self.options_mode),
            examples: record
                .examples
                .iter()
                .map(|example| PageExample {
                    description: expand_placeholders(&example.description, self.options_mode),
                    invocation: expand_placeholders(&example.invocation, self.options_mode),
                })
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ingestor::{DataSource, IngestPhase};
    use pretty_assertions::assert_eq;
    use std::time::SystemTime;
    use tldrkit_protocol::CommandStore;

    fn record(platform: Platform, command: &str, raw_text: &str) -> CommandRecord {
        let parsed = tldrkit_archive::parse_page(raw_text);
        CommandRecord {
            command: command.to_string(),
            platform,
            raw_text: raw_text.to_string(),
            description: parsed.description,
            examples: parsed.examples,
        }
    }

    fn sample_session() -> Session {
        let mut store = CommandStore::new();
        store.insert(record(
            Platform::Common,
            "ls",
            "# ls\n\n> List directory contents.\n\n- List all entries:\n\n`ls {{-a|--all}}`",
        ));
        store.insert(record(
            Platform::Linux,
            "grep",
            "# grep\n\n> Search text patterns.\n\n- Case-insensitive search:\n\n`grep {{-i|--ignore-case}} pattern`",
        ));
        let outcome = IngestOutcome {
            index: SearchIndex::build(store),
            source: DataSource::Network,
            phase: IngestPhase::Ready,
            timestamp: SystemTime::now(),
        };
        Session::new(outcome)
    }

    #[test]
    fn test_command_view_expands_placeholders() {
        let session = sample_session().with_options_mode(OptionsMode::Long);
        let view = session.resolve_nav(&NavRequest::Command {
            name: "ls".to_string(),
            platform: None,
        });

        let View::Command(command) = view else {
            panic!("expected command view");
        };
        assert_eq!(command.command, "ls");
        assert_eq!(command.platform, Platform::Common);
        assert_eq!(command.examples[0].invocation, "ls --all");
    }

    #[test]
    fn test_mode_switch_rerenders_from_raw_record() {
        let mut session = sample_session();
        let short = session.resolve_nav(&NavRequest::Command {
            name: "grep".to_string(),
            platform: Some(Platform::Linux),
        });
        let View::Command(short) = short else {
            panic!("expected command view");
        };
        assert_eq!(short.examples[0].invocation, "grep -i pattern");

        session.set_options_mode(OptionsMode::Both);
        let both = session.resolve_nav(&NavRequest::Command {
            name: "grep".to_string(),
            platform: Some(Platform::Linux),
        });
        let View::Command(both) = both else {
            panic!("expected command view");
        };
        assert_eq!(both.examples[0].invocation, "grep -i / --ignore-case pattern");
    }

    #[test]
    fn test_nav_with_platform_has_no_fallback() {
        let session = sample_session();
        let view = session.resolve_nav(&NavRequest::Command {
            name: "ls".to_string(),
            platform: Some(Platform::Linux),
        });
        assert_eq!(
            view,
            View::NotFound {
                query: "ls".to_string(),
            }
        );
    }

    #[test]
    fn test_nav_category_and_unknown_slug() {
        let session = sample_session();

        let view = session.resolve_nav(&NavRequest::Category {
            slug: "textprocessing".to_string(),
        });
        let View::Category { category, commands } = view else {
            panic!("expected category view");
        };
        assert_eq!(category.name, "Text Processing");
        assert_eq!(commands, vec!["grep".to_string()]);

        let unknown = session.resolve_nav(&NavRequest::Category {
            slug: "cooking".to_string(),
        });
        assert_eq!(unknown, View::Home);
    }

    #[test]
    fn test_deselecting_all_platforms_reinserts_common() {
        let mut session = sample_session().with_platforms(PlatformSelection::new([
            Platform::Linux,
        ]));
        session.deselect_platform(Platform::Linux);
        assert!(session.platforms().contains(Platform::Common));
        assert!(session.resolve("ls").is_some());
    }

    #[test]
    fn test_suggest_uses_selection() {
        let session =
            sample_session().with_platforms(PlatformSelection::new([Platform::Linux]));
        let suggestions = session.suggest("e");
        assert_eq!(suggestions.len(), 1);
        assert_eq!(suggestions[0].command, "grep");
    }

    #[test]
    fn test_degraded_flag_carries_over() {
        let outcome = IngestOutcome {
            index: SearchIndex::build(crate::fallback::fallback_store()),
            source: DataSource::Fallback,
            phase: IngestPhase::Degraded,
            timestamp: SystemTime::now(),
        };
        assert!(Session::new(outcome).is_degraded());
    }
}
