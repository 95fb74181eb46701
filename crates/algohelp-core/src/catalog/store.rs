//! Catalog store: lazily loaded, cache-once views of the three data files.
//!
//! A load failure (missing file, unreadable, malformed JSON) is logged and
//! cached as an **empty catalog**: callers treat empty as "unavailable"
//! and degrade to no-match for the process lifetime, until an explicit
//! [`CatalogStore::reload_all`]. Concurrent first loads may race; the last
//! writer wins with an equivalent value, and every reader only ever sees a
//! complete immutable catalog behind its `Arc`.

use crate::shared::CoreConfig;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::{Arc, RwLock};

/// One entry of the command catalog. Immutable once loaded.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommandEntry {
    /// One-line description shown to the user.
    pub summary: String,
    /// Documentation URL for the command.
    pub url: String,
    /// Extra lookup keywords. Present in the file for future use; matching
    /// only consults the key name.
    #[serde(default)]
    pub keywords: Vec<String>,
}

/// One entry of the doc-link catalog. An entry missing `topic` or `url` is
/// never surfaced to the user.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocEntry {
    #[serde(default)]
    pub topic: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
}

/// Result of a single load attempt, before normalization to the cached view.
#[derive(Debug)]
pub enum CatalogLoadOutcome {
    /// File read and parsed; this many entries (or corpus lines) retained.
    Loaded(usize),
    /// No file at the configured path.
    NotFound,
    /// File present but unusable: unreadable, invalid JSON, or not a
    /// JSON object.
    Malformed(String),
}

/// Loaded/entry-count view of one catalog, for status reporting.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogStatus {
    pub name: String,
    /// False when the last load attempt failed and the empty catalog is
    /// standing in.
    pub loaded: bool,
    pub entry_count: usize,
}

/// Cache state for one catalog. `Failed` still holds the (empty) value so
/// lookups after a bad load never re-probe the filesystem.
enum CacheSlot<T> {
    Unloaded,
    Loaded(Arc<T>),
    Failed(Arc<T>),
}

impl<T> CacheSlot<T> {
    fn value(&self) -> Option<Arc<T>> {
        match self {
            CacheSlot::Unloaded => None,
            CacheSlot::Loaded(v) | CacheSlot::Failed(v) => Some(Arc::clone(v)),
        }
    }

    fn is_loaded(&self) -> bool {
        matches!(self, CacheSlot::Loaded(_))
    }
}

/// Store holding the three catalogs the matchers consult. All catalogs use
/// the same cache-once policy; `reload_all` is the only way to observe a
/// changed file after the first load.
pub struct CatalogStore {
    commands_path: PathBuf,
    doc_links_path: PathBuf,
    corpus_path: PathBuf,
    commands: RwLock<CacheSlot<HashMap<String, CommandEntry>>>,
    doc_links: RwLock<CacheSlot<HashMap<String, DocEntry>>>,
    corpus: RwLock<CacheSlot<Vec<String>>>,
}

impl CatalogStore {
    /// Builds a store over the data files named by `config.data_path`.
    pub fn from_config(config: &CoreConfig) -> Self {
        Self::with_paths(
            config.commands_file(),
            config.doc_links_file(),
            config.knowledge_base_file(),
        )
    }

    /// Builds a store over explicit file paths. Nothing is read until the
    /// first lookup (or a preload via [`CatalogStore::status`]).
    pub fn with_paths(
        commands_path: PathBuf,
        doc_links_path: PathBuf,
        corpus_path: PathBuf,
    ) -> Self {
        Self {
            commands_path,
            doc_links_path,
            corpus_path,
            commands: RwLock::new(CacheSlot::Unloaded),
            doc_links: RwLock::new(CacheSlot::Unloaded),
            corpus: RwLock::new(CacheSlot::Unloaded),
        }
    }

    /// Returns the command catalog, loading it on first access. Empty means
    /// unavailable (missing or malformed file), not "no entries defined".
    pub fn commands(&self) -> Arc<HashMap<String, CommandEntry>> {
        if let Ok(guard) = self.commands.read() {
            if let Some(value) = guard.value() {
                return value;
            }
        }
        let (value, outcome) = load_json_catalog::<CommandEntry>(&self.commands_path, "commands");
        store_slot(&self.commands, &value, &outcome);
        value
    }

    /// Returns the doc-link catalog, loading it on first access. Same
    /// cache-once policy as the other catalogs.
    pub fn doc_links(&self) -> Arc<HashMap<String, DocEntry>> {
        if let Ok(guard) = self.doc_links.read() {
            if let Some(value) = guard.value() {
                return value;
            }
        }
        let (value, outcome) = load_json_catalog::<DocEntry>(&self.doc_links_path, "doc_links");
        store_slot(&self.doc_links, &value, &outcome);
        value
    }

    /// Returns the knowledge-base corpus lines in file order, loading them
    /// on first access.
    pub fn corpus(&self) -> Arc<Vec<String>> {
        if let Ok(guard) = self.corpus.read() {
            if let Some(value) = guard.value() {
                return value;
            }
        }
        let (value, outcome) = load_corpus(&self.corpus_path);
        store_slot(&self.corpus, &value, &outcome);
        value
    }

    /// Drops every cached catalog; the next access reloads from disk.
    pub fn reload_all(&self) {
        reset_slot(&self.commands);
        reset_slot(&self.doc_links);
        reset_slot(&self.corpus);
        tracing::info!(target: "algohelp::catalog", "catalog caches dropped; next access reloads");
    }

    /// Loads (if needed) and reports all three catalogs. Used by the
    /// gateway for startup preload and the status endpoint.
    pub fn status(&self) -> Vec<CatalogStatus> {
        let commands = self.commands();
        let doc_links = self.doc_links();
        let corpus = self.corpus();
        vec![
            CatalogStatus {
                name: "commands".to_string(),
                loaded: self.commands.read().map(|g| g.is_loaded()).unwrap_or(false),
                entry_count: commands.len(),
            },
            CatalogStatus {
                name: "doc_links".to_string(),
                loaded: self.doc_links.read().map(|g| g.is_loaded()).unwrap_or(false),
                entry_count: doc_links.len(),
            },
            CatalogStatus {
                name: "knowledge_base".to_string(),
                loaded: self.corpus.read().map(|g| g.is_loaded()).unwrap_or(false),
                entry_count: corpus.len(),
            },
        ]
    }
}

/// Writes a freshly loaded value into its slot. Loaded vs Failed follows
/// the load outcome so status reporting can tell the two empties apart.
fn store_slot<T>(slot: &RwLock<CacheSlot<T>>, value: &Arc<T>, outcome: &CatalogLoadOutcome) {
    let next = match outcome {
        CatalogLoadOutcome::Loaded(_) => CacheSlot::Loaded(Arc::clone(value)),
        CatalogLoadOutcome::NotFound | CatalogLoadOutcome::Malformed(_) => {
            CacheSlot::Failed(Arc::clone(value))
        }
    };
    if let Ok(mut guard) = slot.write() {
        *guard = next;
    }
}

fn reset_slot<T>(slot: &RwLock<CacheSlot<T>>) {
    if let Ok(mut guard) = slot.write() {
        *guard = CacheSlot::Unloaded;
    }
}

/// Reads and parses a keyed JSON catalog. Failures come back as the empty
/// map plus the outcome that names them; nothing here ever raises.
fn load_json_catalog<T: DeserializeOwned>(
    path: &Path,
    kind: &'static str,
) -> (Arc<HashMap<String, T>>, CatalogLoadOutcome) {
    let raw = match std::fs::read_to_string(path) {
        Ok(raw) => raw,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            tracing::warn!(
                target: "algohelp::catalog",
                catalog = kind,
                path = %path.display(),
                "catalog file not found; matcher degrades to no-match"
            );
            return (Arc::new(HashMap::new()), CatalogLoadOutcome::NotFound);
        }
        Err(e) => {
            tracing::warn!(
                target: "algohelp::catalog",
                catalog = kind,
                path = %path.display(),
                error = %e,
                "catalog file unreadable; matcher degrades to no-match"
            );
            return (
                Arc::new(HashMap::new()),
                CatalogLoadOutcome::Malformed(e.to_string()),
            );
        }
    };

    match serde_json::from_str::<HashMap<String, T>>(&raw) {
        Ok(map) => {
            tracing::info!(
                target: "algohelp::catalog",
                catalog = kind,
                path = %path.display(),
                entries = map.len(),
                "catalog loaded"
            );
            let n = map.len();
            (Arc::new(map), CatalogLoadOutcome::Loaded(n))
        }
        Err(e) => {
            tracing::warn!(
                target: "algohelp::catalog",
                catalog = kind,
                path = %path.display(),
                error = %e,
                "catalog file is not a valid JSON object; matcher degrades to no-match"
            );
            (
                Arc::new(HashMap::new()),
                CatalogLoadOutcome::Malformed(e.to_string()),
            )
        }
    }
}

/// Reads the knowledge-base corpus as non-empty, whitespace-trimmed lines.
/// Line order is preserved; the lowest-index line wins score ties later.
fn load_corpus(path: &Path) -> (Arc<Vec<String>>, CatalogLoadOutcome) {
    let raw = match std::fs::read_to_string(path) {
        Ok(raw) => raw,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            tracing::warn!(
                target: "algohelp::catalog",
                catalog = "knowledge_base",
                path = %path.display(),
                "corpus file not found; matcher degrades to no-match"
            );
            return (Arc::new(Vec::new()), CatalogLoadOutcome::NotFound);
        }
        Err(e) => {
            tracing::warn!(
                target: "algohelp::catalog",
                catalog = "knowledge_base",
                path = %path.display(),
                error = %e,
                "corpus file unreadable; matcher degrades to no-match"
            );
            return (
                Arc::new(Vec::new()),
                CatalogLoadOutcome::Malformed(e.to_string()),
            );
        }
    };

    let lines: Vec<String> = raw
        .lines()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .map(str::to_string)
        .collect();
    tracing::info!(
        target: "algohelp::catalog",
        catalog = "knowledge_base",
        path = %path.display(),
        lines = lines.len(),
        "corpus loaded"
    );
    let n = lines.len();
    (Arc::new(lines), CatalogLoadOutcome::Loaded(n))
}
