//! Knowledge-base fallback: whole-word keyword scoring over the corpus
//! lines.

use crate::catalog::CatalogStore;
use crate::keywords;
use std::sync::Arc;

/// Maximum characters of a matched line included in the reply.
const MAX_SNIPPET_CHARS: usize = 1000;

/// Scores every corpus line by how many distinct query keywords it contains
/// as whole words, and answers with the best line when it clears the
/// configured threshold. Strict `>` comparison keeps the lowest-index line
/// on ties.
pub struct KnowledgeBaseMatcher {
    catalogs: Arc<CatalogStore>,
    score_threshold: usize,
}

impl KnowledgeBaseMatcher {
    pub fn new(catalogs: Arc<CatalogStore>, score_threshold: usize) -> Self {
        Self {
            catalogs,
            score_threshold,
        }
    }

    /// Returns the best-scoring corpus line as a formatted snippet, or None
    /// when nothing clears the threshold.
    ///
    /// A keyword hit requires a whole-word occurrence ("arc" never scores
    /// against "architecture"), and each keyword counts at most once per
    /// line no matter how often it appears.
    pub fn matches(&self, query: &str) -> Option<String> {
        let corpus = self.catalogs.corpus();
        if corpus.is_empty() {
            tracing::debug!(target: "algohelp::matcher", "knowledge base empty; cannot answer");
            return None;
        }

        let query_keywords = keywords::extract_filtered(query);
        if query_keywords.is_empty() {
            tracing::debug!(target: "algohelp::matcher", query, "no useful keywords in query");
            return None;
        }

        let mut best_score = 0usize;
        let mut best_index: Option<usize> = None;
        for (i, line) in corpus.iter().enumerate() {
            let line_lower = line.to_lowercase();
            let score = query_keywords
                .iter()
                .filter(|k| keywords::contains_word(&line_lower, k))
                .count();
            if score > best_score {
                best_score = score;
                best_index = Some(i);
            }
        }

        let index = best_index?;
        tracing::debug!(
            target: "algohelp::matcher",
            best_score,
            line_index = index,
            threshold = self.score_threshold,
            "knowledge base scored"
        );
        if best_score < self.score_threshold {
            return None;
        }

        let line = &corpus[index];
        let text = if line.chars().count() > MAX_SNIPPET_CHARS {
            let truncated: String = line.chars().take(MAX_SNIPPET_CHARS).collect();
            format!("{}...", truncated)
        } else {
            line.clone()
        };
        Some(format!("Based on the knowledge base:\n>>> {}", text))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn matcher_over(corpus: &str, threshold: usize) -> (TempDir, KnowledgeBaseMatcher) {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("knowledge_base.txt"), corpus).unwrap();
        let store = Arc::new(CatalogStore::with_paths(
            dir.path().join("algokit_commands.json"),
            dir.path().join("doc_links.json"),
            dir.path().join("knowledge_base.txt"),
        ));
        (dir, KnowledgeBaseMatcher::new(store, threshold))
    }

    #[test]
    fn best_line_wins_when_it_clears_the_threshold() {
        let (_dir, matcher) = matcher_over(
            "Algorand Standard Assets represent tokens on chain.\n\
             Algorand Standard Assets can be created with asset config transactions and managed on chain.\n",
            3,
        );
        let reply = matcher
            .matches("how can I create an Algorand Standard Asset transaction")
            .unwrap();
        assert!(reply.starts_with("Based on the knowledge base:\n>>> "));
        assert!(reply.contains("asset config transactions"));
    }

    #[test]
    fn threshold_boundary_is_exact() {
        // The line contains exactly two of the query keywords.
        let (_dir, matcher) = matcher_over("smart contracts run on the avm\n", 3);
        assert!(matcher.matches("explain smart contracts").is_none());

        let (_dir2, matcher2) = matcher_over("smart contracts run on the avm\n", 2);
        assert!(matcher2.matches("explain smart contracts").is_some());
    }

    #[test]
    fn keywords_never_match_inside_longer_words() {
        // "arc" appears only inside "architecture"; even with threshold 1
        // the line must not score.
        let (_dir, matcher) = matcher_over("the architecture of the protocol\n", 1);
        assert!(matcher.matches("arc arc arc standards").is_none());
    }

    #[test]
    fn repeated_occurrences_of_one_keyword_count_once() {
        // "asset asset asset" holds a single distinct keyword, so the score
        // is 1 and a threshold of 2 rejects it.
        let (_dir, matcher) = matcher_over("asset asset asset\n", 2);
        assert!(matcher.matches("asset details").is_none());
    }

    #[test]
    fn lowest_index_line_wins_ties() {
        let (_dir, matcher) = matcher_over(
            "first: asset creation guide\nsecond: asset creation guide\n",
            2,
        );
        let reply = matcher.matches("asset creation").unwrap();
        assert!(reply.contains("first:"));
    }

    #[test]
    fn long_lines_truncate_to_snippet_length() {
        let long_line = format!("asset creation guide {}", "x".repeat(1500));
        let (_dir, matcher) = matcher_over(&format!("{}\n", long_line), 3);
        let reply = matcher.matches("asset creation guide").unwrap();
        let snippet = reply.strip_prefix("Based on the knowledge base:\n>>> ").unwrap();
        assert!(snippet.ends_with("..."));
        assert_eq!(snippet.chars().count(), 1000 + 3);
    }

    #[test]
    fn stop_word_only_query_short_circuits() {
        let (_dir, matcher) = matcher_over("anything at all\n", 1);
        assert!(matcher.matches("what can you tell me about the").is_none());
    }

    #[test]
    fn empty_corpus_never_matches() {
        let dir = TempDir::new().unwrap();
        let store = Arc::new(CatalogStore::with_paths(
            dir.path().join("algokit_commands.json"),
            dir.path().join("doc_links.json"),
            dir.path().join("knowledge_base.txt"),
        ));
        let matcher = KnowledgeBaseMatcher::new(store, 1);
        assert!(matcher.matches("asset creation").is_none());
    }

    #[test]
    fn matching_is_idempotent() {
        let (_dir, matcher) = matcher_over("asset creation guide for algorand\n", 3);
        let first = matcher.matches("algorand asset creation");
        let second = matcher.matches("algorand asset creation");
        assert_eq!(first, second);
        assert!(first.is_some());
    }
}
