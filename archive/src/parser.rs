use tldrkit_protocol::PageExample;

/// The structured pieces of one command page.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedPage {
    /// Short summary from the `> ` line; empty if the page has none.
    pub description: String,

    /// Ordered `(explanation, invocation)` pairs.
    pub examples: Vec<PageExample>,
}

/// Parse raw page text into a description and example list.
///
/// Processes non-empty lines in order: a `# ` title line is ignored, `> `
/// sets the description (last one wins), `- ` opens a new example and
/// finalizes the previous one, and a line wrapped in single backticks sets
/// the open example's invocation, overwriting an earlier value. Anything
/// else is ignored; malformed input degrades to empty fields, never an
/// error.
pub fn parse_page(text: &str) -> ParsedPage {
    let mut description = String::new();
    let mut examples = Vec::new();
    let mut current: Option<PageExample> = None;

    for line in text.lines().filter(|line| !line.trim().is_empty()) {
        if line.starts_with("# ") {
            continue;
        } else if let Some(rest) = line.strip_prefix("> ") {
            description = rest.trim().to_string();
        } else if let Some(rest) = line.strip_prefix("- ") {
            if let Some(example) = current.take() {
                examples.push(example);
            }
            current = Some(PageExample {
                description: rest.trim().to_string(),
                invocation: String::new(),
            });
        } else if let Some(invocation) = line
            .strip_prefix('`')
            .and_then(|rest| rest.strip_suffix('`'))
        {
            if let Some(example) = current.as_mut() {
                example.invocation = invocation.to_string();
            }
        }
    }

    if let Some(example) = current {
        examples.push(example);
    }

    ParsedPage {
        description,
        examples,
    }
}
