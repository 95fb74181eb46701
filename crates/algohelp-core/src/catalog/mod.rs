//! File-backed catalogs with process-lifetime caching.
//!
//! Three data sources feed the matchers:
//!
//! | Catalog   | File                  | Shape                                |
//! |-----------|-----------------------|--------------------------------------|
//! | Commands  | algokit_commands.json | name -> { summary, url, keywords }   |
//! | Doc links | doc_links.json        | key phrase -> { topic, url }         |
//! | Corpus    | knowledge_base.txt    | non-empty, whitespace-trimmed lines  |

mod store;

pub use store::{CatalogLoadOutcome, CatalogStatus, CatalogStore, CommandEntry, DocEntry};
