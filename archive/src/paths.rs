use once_cell::sync::Lazy;
use regex_lite::Regex;

/// Accepted entry-path shapes, tried in order; the first match wins. Every
/// rule captures `(platform, command)`. Extend the list to accept further
/// archive layouts without touching call sites.
static PATH_RULES: Lazy<Vec<Regex>> = Lazy::new(|| {
    [
        r"^pages\.en/([^/]+)/([^/]+)\.md$",
        r"^([^/]+)/([^/]+)\.md$",
        r"^pages/([^/]+)/([^/]+)\.md$",
    ]
    .iter()
    .map(|pattern| Regex::new(pattern).expect("path rule pattern is valid"))
    .collect()
});

/// Reduce an archive entry path to its raw `(platform, command)` pair.
///
/// Returns `None` for paths no rule accepts. The platform segment is
/// returned verbatim; callers decide whether it names a supported platform.
pub fn classify_entry(name: &str) -> Option<(String, String)> {
    for rule in PATH_RULES.iter() {
        if let Some(captures) = rule.captures(name) {
            let platform = captures.get(1)?.as_str().to_string();
            let command = captures.get(2)?.as_str().to_string();
            return Some((platform, command));
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_namespaced_form() {
        assert_eq!(
            classify_entry("pages.en/linux/ls.md"),
            Some(("linux".to_string(), "ls".to_string()))
        );
    }

    #[test]
    fn test_bare_two_segment_form() {
        assert_eq!(
            classify_entry("osx/brew.md"),
            Some(("osx".to_string(), "brew".to_string()))
        );
    }

    #[test]
    fn test_alternate_namespaced_form() {
        assert_eq!(
            classify_entry("pages/common/tar.md"),
            Some(("common".to_string(), "tar".to_string()))
        );
    }

    #[test]
    fn test_first_match_wins() {
        // A two-segment path under pages/ is consumed by the earlier bare
        // rule, yielding "pages" as the (unsupported) platform.
        assert_eq!(
            classify_entry("pages/common.md"),
            Some(("pages".to_string(), "common".to_string()))
        );
    }

    #[test]
    fn test_unmatched_paths_are_ignored() {
        assert_eq!(classify_entry("README.md"), None);
        assert_eq!(classify_entry("pages.en/linux/nested/ls.md"), None);
        assert_eq!(classify_entry("linux/ls.txt"), None);
        assert_eq!(classify_entry("linux/"), None);
    }
}
