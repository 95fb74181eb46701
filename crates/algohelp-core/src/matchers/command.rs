//! Exact command lookup: queries naming a known `algokit` command get its
//! summary and docs link.

use crate::catalog::CatalogStore;
use crate::keywords::contains_word;
use std::sync::Arc;

/// Scans the query for known command names. The first catalog hit wins;
/// this matcher never ranks, so a query naming two commands resolves to
/// whichever the catalog iterates first.
pub struct CommandMatcher {
    catalogs: Arc<CatalogStore>,
}

impl CommandMatcher {
    pub fn new(catalogs: Arc<CatalogStore>) -> Self {
        Self { catalogs }
    }

    /// Returns formatted help for the first known command the query names,
    /// or None when no command is recognized.
    ///
    /// A command name counts as named when it appears as a whole word, or
    /// directly after the literal "algokit " or "command ".
    pub fn matches(&self, query: &str) -> Option<String> {
        let commands = self.catalogs.commands();
        if commands.is_empty() {
            tracing::debug!(target: "algohelp::matcher", "command catalog empty; cannot provide help");
            return None;
        }

        let query_lower = query.to_lowercase();
        for (name, entry) in commands.iter() {
            let named = contains_word(&query_lower, name)
                || query_lower.contains(&format!("algokit {}", name))
                || query_lower.contains(&format!("command {}", name));
            if named {
                tracing::debug!(target: "algohelp::matcher", command = %name, "command matched");
                // Angle brackets around the URL suppress link previews in
                // the consuming chat transcript.
                return Some(format!(
                    "**`algokit {}`**: {}\nDocs: <{}>",
                    name, entry.summary, entry.url
                ));
            }
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn matcher_with(commands_json: &str) -> (TempDir, CommandMatcher) {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("algokit_commands.json"), commands_json).unwrap();
        let store = Arc::new(CatalogStore::with_paths(
            dir.path().join("algokit_commands.json"),
            dir.path().join("doc_links.json"),
            dir.path().join("knowledge_base.txt"),
        ));
        (dir, CommandMatcher::new(store))
    }

    const DEPLOY_ONLY: &str =
        r#"{"deploy": {"summary": "Deploys smart contracts.", "url": "https://example.com/deploy"}}"#;

    #[test]
    fn matches_algokit_name_pattern() {
        let (_dir, matcher) = matcher_with(DEPLOY_ONLY);
        let reply = matcher.matches("Tell me about algokit deploy").unwrap();
        assert_eq!(
            reply,
            "**`algokit deploy`**: Deploys smart contracts.\nDocs: <https://example.com/deploy>"
        );
    }

    #[test]
    fn matches_command_name_pattern() {
        let (_dir, matcher) = matcher_with(DEPLOY_ONLY);
        assert!(matcher.matches("how to use command deploy").is_some());
    }

    #[test]
    fn matches_standalone_word_even_with_punctuation() {
        let (_dir, matcher) = matcher_with(DEPLOY_ONLY);
        assert!(matcher.matches("what is deploy?").is_some());
    }

    #[test]
    fn does_not_match_name_inside_longer_word() {
        let (_dir, matcher) = matcher_with(DEPLOY_ONLY);
        assert!(matcher.matches("my deployment failed").is_none());
    }

    #[test]
    fn unknown_name_defers_to_next_priority() {
        let (_dir, matcher) = matcher_with(DEPLOY_ONLY);
        // "algokit" alone is not a resolvable command
        assert!(matcher.matches("algokit bootstrap").is_none());
        assert!(matcher.matches("what is algokit").is_none());
    }

    #[test]
    fn empty_catalog_never_matches() {
        let (_dir, matcher) = matcher_with("{}");
        assert!(matcher.matches("algokit deploy").is_none());
    }

    #[test]
    fn removing_the_entry_removes_the_match() {
        let (dir, matcher) = matcher_with(DEPLOY_ONLY);
        assert!(matcher.matches("algokit deploy").is_some());

        fs::write(dir.path().join("algokit_commands.json"), "{}").unwrap();
        matcher.catalogs.reload_all();
        assert!(matcher.matches("algokit deploy").is_none());
    }
}
