use tldrkit_archive::parse_page;
use tldrkit_protocol::{CommandRecord, CommandStore, Platform};

/// Built-in pages served when the archive can neither be fetched nor
/// decoded. Small on purpose: enough to keep lookups working, not a
/// substitute for the real dataset.
const FALLBACK_PAGES: &[(&str, &str)] = &[
    (
        "ls",
        "# ls\n\n> List directory contents.\n\n- List files and directories:\n\n`ls`\n\n- List with detailed information:\n\n`ls -la`",
    ),
    (
        "grep",
        "# grep\n\n> Search text patterns in files.\n\n- Search for a pattern:\n\n`grep \"pattern\" filename`",
    ),
];

/// Build the fallback command set, all records under the common platform.
pub fn fallback_store() -> CommandStore {
    let mut store = CommandStore::new();
    for (command, text) in FALLBACK_PAGES {
        let parsed = parse_page(text);
        store.insert(CommandRecord {
            command: (*command).to_string(),
            platform: Platform::Common,
            raw_text: (*text).to_string(),
            description: parsed.description,
            examples: parsed.examples,
        });
    }
    store
}
