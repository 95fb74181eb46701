//! Documentation linker: keyword-overlap scoring against the doc-link
//! catalog.

use crate::catalog::{CatalogStore, DocEntry};
use crate::keywords;
use std::sync::Arc;

/// Minimum keyword overlap for a doc link to be offered at all.
const MIN_SCORE: usize = 1;

/// Scores every catalog entry by keyword overlap with the query and keeps
/// the single best. Strict `>` comparison means the first candidate seen
/// wins ties.
pub struct DocLinkMatcher {
    catalogs: Arc<CatalogStore>,
}

impl DocLinkMatcher {
    pub fn new(catalogs: Arc<CatalogStore>) -> Self {
        Self { catalogs }
    }

    /// Returns a formatted link for the best-overlapping entry, or None.
    ///
    /// A winning entry with a missing topic or URL is a total non-match:
    /// the matcher does not fall back to the second-best candidate, so a
    /// broken entry is never referenced in a reply.
    pub fn matches(&self, query: &str) -> Option<String> {
        let doc_links = self.catalogs.doc_links();
        if doc_links.is_empty() {
            tracing::debug!(target: "algohelp::matcher", "doc-link catalog empty; cannot find link");
            return None;
        }

        let query_keywords = keywords::extract(query);
        if query_keywords.is_empty() {
            tracing::debug!(target: "algohelp::matcher", query, "no useful keywords in query");
            return None;
        }

        let mut best: Option<(&String, &DocEntry)> = None;
        let mut highest = 0usize;
        for (key, entry) in doc_links.iter() {
            let entry_keywords = keywords::extract(key);
            let score = entry_keywords.intersection(&query_keywords).count();
            if score > highest {
                highest = score;
                best = Some((key, entry));
            }
        }

        if highest < MIN_SCORE {
            return None;
        }
        let (key, entry) = best?;

        let topic = entry.topic.as_deref().filter(|s| !s.is_empty());
        let url = entry.url.as_deref().filter(|s| !s.is_empty());
        match (topic, url) {
            (Some(topic), Some(url)) => {
                tracing::debug!(
                    target: "algohelp::matcher",
                    key = %key,
                    score = highest,
                    "doc link matched"
                );
                Some(format!(
                    "Here's the documentation for **{}**: <{}>",
                    topic, url
                ))
            }
            _ => {
                tracing::warn!(
                    target: "algohelp::matcher",
                    key = %key,
                    "matched doc entry is missing topic or url; treating as no match"
                );
                None
            }
        }
    }
}
