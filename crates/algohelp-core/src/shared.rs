//! Shared configuration used across all AlgoHelp crates.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Global application configuration (gateway, catalogs, Algod endpoints).
/// Load from TOML or env.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CoreConfig {
    /// Application identity (e.g. "AlgoHelp Gateway").
    pub app_name: String,
    /// HTTP port for the gateway.
    pub port: u16,
    /// Invocation prefix a chat message must carry before the query text.
    /// Messages without it are ignored entirely.
    pub command_prefix: String,
    /// Base directory holding the three data files.
    pub data_path: String,
    /// Minimum distinct-keyword hits for a knowledge-base line to be
    /// accepted. Tuned value, not derived.
    pub kb_score_threshold: usize,
    /// Algod REST endpoint for MainNet.
    pub mainnet_url: String,
    /// Algod REST endpoint for TestNet.
    pub testnet_url: String,
}

impl CoreConfig {
    /// Path of the command catalog file under `data_path`.
    pub fn commands_file(&self) -> PathBuf {
        Path::new(&self.data_path).join("algokit_commands.json")
    }

    /// Path of the doc-link catalog file under `data_path`.
    pub fn doc_links_file(&self) -> PathBuf {
        Path::new(&self.data_path).join("doc_links.json")
    }

    /// Path of the knowledge-base corpus file under `data_path`.
    pub fn knowledge_base_file(&self) -> PathBuf {
        Path::new(&self.data_path).join("knowledge_base.txt")
    }

    /// Load config from file and environment. Precedence: env
    /// `ALGOHELP_CONFIG` path > `config/gateway.toml` > defaults.
    pub fn load() -> Result<Self, config::ConfigError> {
        let config_path =
            std::env::var("ALGOHELP_CONFIG").unwrap_or_else(|_| "config/gateway".to_string());
        let builder = config::Config::builder()
            .set_default("app_name", "AlgoHelp Gateway")?
            .set_default("port", 8010_i64)?
            .set_default("command_prefix", "!algohelp ")?
            .set_default("data_path", "./data")?
            .set_default("kb_score_threshold", 3_i64)?
            .set_default("mainnet_url", "https://mainnet-api.algonode.cloud")?
            .set_default("testnet_url", "https://testnet-api.algonode.cloud")?;

        let path = Path::new(&config_path);
        let builder = if path.exists() {
            builder.add_source(config::File::from(path))
        } else {
            builder
        };

        let built = builder
            .add_source(config::Environment::with_prefix("ALGOHELP").separator("__"))
            .build()?;

        built.try_deserialize()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_config() -> CoreConfig {
        CoreConfig {
            app_name: "Test".to_string(),
            port: 8010,
            command_prefix: "!algohelp ".to_string(),
            data_path: "./data".to_string(),
            kb_score_threshold: 3,
            mainnet_url: "https://mainnet-api.algonode.cloud".to_string(),
            testnet_url: "https://testnet-api.algonode.cloud".to_string(),
        }
    }

    #[test]
    fn data_file_paths_derive_from_data_path() {
        let config = test_config();
        assert_eq!(
            config.commands_file(),
            Path::new("./data").join("algokit_commands.json")
        );
        assert_eq!(
            config.doc_links_file(),
            Path::new("./data").join("doc_links.json")
        );
        assert_eq!(
            config.knowledge_base_file(),
            Path::new("./data").join("knowledge_base.txt")
        );
    }
}
