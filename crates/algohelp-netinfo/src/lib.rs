//! Algod network-status collaborator: one REST call per lookup, behind the
//! [`RoundStatusProvider`] contract the router dispatches against.

use algohelp_core::{CoreConfig, Network, RoundInfo, RoundStatusProvider, StatusError};
use std::time::Duration;

/// Request timeout for status lookups. The matching core has no timeout
/// semantics of its own; this is the only network call in the system.
const STATUS_TIMEOUT: Duration = Duration::from_secs(10);

/// Thin client over public Algod REST endpoints (AlgoNode by default).
/// One reqwest client, reused across lookups for both networks.
pub struct AlgodClient {
    http: reqwest::Client,
    mainnet_url: String,
    testnet_url: String,
}

impl AlgodClient {
    /// Builds a client from the configured MainNet/TestNet base URLs.
    pub fn from_config(config: &CoreConfig) -> Self {
        Self::new(config.mainnet_url.clone(), config.testnet_url.clone())
    }

    pub fn new(mainnet_url: String, testnet_url: String) -> Self {
        let http = reqwest::Client::builder()
            .timeout(STATUS_TIMEOUT)
            .build()
            // Falls back to the default client when the builder cannot
            // apply the timeout (same TLS setup either way).
            .unwrap_or_else(|_| reqwest::Client::new());
        Self {
            http,
            mainnet_url,
            testnet_url,
        }
    }

    fn base_url(&self, network: Network) -> &str {
        match network {
            Network::Mainnet => &self.mainnet_url,
            Network::Testnet => &self.testnet_url,
        }
    }
}

/// Extracts the consensus round from an Algod `/v2/status` payload.
fn round_from_status(body: &serde_json::Value) -> Option<u64> {
    body.get("last-round").and_then(|v| v.as_u64())
}

#[async_trait::async_trait]
impl RoundStatusProvider for AlgodClient {
    async fn fetch_round_status(&self, network: Network) -> Result<RoundInfo, StatusError> {
        let url = format!("{}/v2/status", self.base_url(network));
        let response = self
            .http
            .get(&url)
            .send()
            .await
            .and_then(|r| r.error_for_status())
            .map_err(|e| StatusError::Http(e.to_string()))?;
        let body: serde_json::Value = response
            .json()
            .await
            .map_err(|e| StatusError::Http(e.to_string()))?;

        let round = round_from_status(&body).ok_or_else(|| {
            tracing::warn!(
                target: "algohelp::netinfo",
                network = network.display_name(),
                "status response missing last-round"
            );
            StatusError::MalformedStatus
        })?;
        tracing::debug!(
            target: "algohelp::netinfo",
            network = network.display_name(),
            round,
            "round status fetched"
        );
        Ok(RoundInfo { round })
    }
}
