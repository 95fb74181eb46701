//! The three retrieval matchers, in router priority order.
//!
//! Their match policies differ on purpose and are part of the contract:
//! [`CommandMatcher`] returns the **first** hit in catalog iteration order,
//! while [`DocLinkMatcher`] and [`KnowledgeBaseMatcher`] return the
//! **best** hit under strict `>` comparison, so the first candidate seen
//! wins ties. Each matcher returns `None` for "defer to the next
//! priority"; none of them errors.

mod command;
mod doclink;
mod knowledge;

pub use command::CommandMatcher;
pub use doclink::DocLinkMatcher;
pub use knowledge::KnowledgeBaseMatcher;
