//! algohelp-core: intent routing and keyword-relevance retrieval.
//!
//! A free-text query enters [`QueryRouter::route`] and is tried, in fixed
//! priority order, against an exact command lookup, a keyword-overlap
//! documentation linker, a network-status branch, and a whole-word scoring
//! pass over a flat knowledge base. All three catalogs live in
//! [`CatalogStore`] behind process-lifetime caches.

mod catalog;
mod keywords;
mod matchers;
mod router;
mod shared;

// Shared configuration
pub use shared::CoreConfig;

// Catalogs
pub use catalog::{
    CatalogLoadOutcome, CatalogStatus, CatalogStore, CommandEntry, DocEntry,
};

// Keyword extraction
pub use keywords::{contains_word, extract, extract_filtered, STOP_WORDS};

// Matchers
pub use matchers::{CommandMatcher, DocLinkMatcher, KnowledgeBaseMatcher};

// Router and the network-status collaborator contract
pub use router::{
    Network, QueryRouter, RouteOutcome, RoundInfo, RoundStatusProvider, StatusError,
    FALLBACK_REPLY, GENERIC_ERROR_REPLY,
};
