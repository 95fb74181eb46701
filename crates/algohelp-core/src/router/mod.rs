//! Query router: fixed-priority dispatch over the matchers.
//!
//! Priority order: command lookup (most specific) -> documentation link ->
//! network status -> knowledge base (most general). An empty query produces
//! no output at all; a non-empty query nothing matched produces the
//! fallback reply. The network-status branch is the only fallible one, and
//! its failures surface as a single generic reply, never as an error to
//! the caller.

use crate::catalog::CatalogStore;
use crate::matchers::{CommandMatcher, DocLinkMatcher, KnowledgeBaseMatcher};
use std::fmt;
use std::sync::Arc;

/// Trigger phrases gating the documentation matcher.
const DOC_TRIGGERS: &[&str] = &["doc", "link for", "documentation", "url for"];

/// Trigger phrases gating the network-status branch.
const NETWORK_TRIGGERS: &[&str] = &["round", "network status", "block"];

/// Reply for a non-empty query no matcher could answer.
pub const FALLBACK_REPLY: &str = "Sorry, I couldn't find specific information for that query. \
     Try asking differently, or check the Algorand Developer Portal: https://dev.algorand.co/";

/// Reply when a handler fails unexpectedly. One message for every failure
/// kind; details go to the log, not to the user.
pub const GENERIC_ERROR_REPLY: &str =
    "An error occurred while processing your request. Please try again later.";

/// Networks the status collaborator can be asked about.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Network {
    Mainnet,
    Testnet,
}

impl Network {
    /// User-facing name used in status replies.
    pub fn display_name(&self) -> &'static str {
        match self {
            Network::Mainnet => "MainNet",
            Network::Testnet => "TestNet",
        }
    }
}

/// Current consensus round as reported by an Algod node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RoundInfo {
    pub round: u64,
}

/// Failure from the network-status collaborator.
#[derive(Debug)]
pub enum StatusError {
    /// Transport-level failure (connect, timeout, non-2xx response).
    Http(String),
    /// The node answered but the payload carried no usable round number.
    MalformedStatus,
}

impl fmt::Display for StatusError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StatusError::Http(detail) => write!(f, "status request failed: {}", detail),
            StatusError::MalformedStatus => write!(f, "status response missing round number"),
        }
    }
}

impl std::error::Error for StatusError {}

/// One status lookup against a chosen network. Implemented by
/// `algohelp-netinfo`; the router only ever sees this contract, which keeps
/// the live network call out of the matching core and mockable in tests.
#[async_trait::async_trait]
pub trait RoundStatusProvider: Send + Sync {
    async fn fetch_round_status(&self, network: Network) -> Result<RoundInfo, StatusError>;
}

/// Final routing outcome for one query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RouteOutcome {
    /// A handler produced a reply.
    Respond(String),
    /// Nothing matched a non-empty query; deliver this text.
    Fallback(String),
    /// Empty query: deliver nothing at all (distinct from Fallback).
    Silent,
}

/// Routes one query through the matchers in priority order.
pub struct QueryRouter {
    command: CommandMatcher,
    doclink: DocLinkMatcher,
    knowledge: KnowledgeBaseMatcher,
    status_provider: Arc<dyn RoundStatusProvider>,
}

impl QueryRouter {
    pub fn new(
        catalogs: Arc<CatalogStore>,
        status_provider: Arc<dyn RoundStatusProvider>,
        kb_score_threshold: usize,
    ) -> Self {
        Self {
            command: CommandMatcher::new(Arc::clone(&catalogs)),
            doclink: DocLinkMatcher::new(Arc::clone(&catalogs)),
            knowledge: KnowledgeBaseMatcher::new(catalogs, kb_score_threshold),
            status_provider,
        }
    }

    /// Routes one query (invocation prefix already stripped). Total: every
    /// internal failure is logged and folded into a reply, so the caller
    /// only ever decides whether and what to deliver.
    pub async fn route(&self, query: &str) -> RouteOutcome {
        let query = query.trim();
        if query.is_empty() {
            return RouteOutcome::Silent;
        }
        let query_lower = query.to_lowercase();

        if let Some(reply) = self.command.matches(query) {
            return RouteOutcome::Respond(reply);
        }
        // A query mentioning "algokit" without a resolvable command name
        // falls through to the remaining handlers.

        if DOC_TRIGGERS.iter().any(|t| query_lower.contains(t)) {
            if let Some(reply) = self.doclink.matches(query) {
                return RouteOutcome::Respond(reply);
            }
        }

        if NETWORK_TRIGGERS.iter().any(|t| query_lower.contains(t)) {
            let network = if query_lower.contains("testnet") {
                Network::Testnet
            } else {
                Network::Mainnet
            };
            return RouteOutcome::Respond(self.network_status_reply(network).await);
        }

        if let Some(reply) = self.knowledge.matches(query) {
            return RouteOutcome::Respond(reply);
        }

        tracing::debug!(target: "algohelp::router", query, "no handler matched; sending fallback");
        RouteOutcome::Fallback(FALLBACK_REPLY.to_string())
    }

    async fn network_status_reply(&self, network: Network) -> String {
        match self.status_provider.fetch_round_status(network).await {
            Ok(info) => format!(
                "Algorand **{}** is currently at round **{}**.",
                network.display_name(),
                info.round
            ),
            Err(e) => {
                tracing::error!(
                    target: "algohelp::router",
                    network = network.display_name(),
                    error = %e,
                    "network status lookup failed"
                );
                GENERIC_ERROR_REPLY.to_string()
            }
        }
    }
}
