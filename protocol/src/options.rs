use once_cell::sync::Lazy;
use regex_lite::Regex;
use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumString};

/// How inline `{{short|long}}` option placeholders are expanded before page
/// text reaches a renderer.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    Display,
    EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum OptionsMode {
    /// First alternative, e.g. `-a`.
    #[default]
    Short,
    /// Second alternative, e.g. `--all`.
    Long,
    /// Both alternatives joined, e.g. `-a / --all`.
    Both,
}

static PLACEHOLDER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\{\{(.*?)\}\}").expect("placeholder pattern is valid"));

/// Expand every `{{...}}` placeholder in `text` according to `mode`.
///
/// A placeholder containing a `|` separator is an option alternative pair;
/// each alternative is trimmed and stripped of one surrounding bracket pair
/// before selection. A placeholder without a separator yields its own
/// trimmed content unchanged.
pub fn expand_placeholders(text: &str, mode: OptionsMode) -> String {
    let mut out = String::with_capacity(text.len());
    let mut last = 0;
    for captures in PLACEHOLDER.captures_iter(text) {
        let Some(whole) = captures.get(0) else {
            continue;
        };
        let token = captures.get(1).map(|m| m.as_str()).unwrap_or_default();
        out.push_str(&text[last..whole.start()]);
        out.push_str(&expand_token(token, mode));
        last = whole.end();
    }
    out.push_str(&text[last..]);
    out
}

fn expand_token(token: &str, mode: OptionsMode) -> String {
    if !token.contains('|') {
        return token.trim().to_string();
    }
    let mut alternatives = token.split('|').map(|part| strip_brackets(part.trim()));
    let short = alternatives.next().unwrap_or_default();
    let long = alternatives.next().unwrap_or_default();
    match mode {
        OptionsMode::Short => short.to_string(),
        OptionsMode::Long => long.to_string(),
        OptionsMode::Both => format!("{short} / {long}"),
    }
}

fn strip_brackets(part: &str) -> &str {
    let part = part.strip_prefix('[').unwrap_or(part);
    part.strip_suffix(']').unwrap_or(part)
}
