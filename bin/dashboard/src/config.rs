use config::{NetworkConfig, NetworkConfigBuilder, SessionConfig, TokenDescriptor};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Top-level dashboard configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Sepolia RPC endpoint url
    pub rpc_url: String,

    /// Default recipient for transfers
    #[serde(default)]
    pub target_address: String,

    /// Polling and mint tuning
    #[serde(default)]
    pub session: SessionConfig,

    /// Replaces the built-in token registry when set
    #[serde(default)]
    pub tokens: Option<Vec<TokenDescriptor>>,

    /// Port for the Prometheus exporter; no exporter when unset
    #[serde(default)]
    pub metrics_port: Option<u16>,
}

impl Config {
    pub fn from_file(path: impl AsRef<Path>) -> eyre::Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml(&contents)
    }

    pub fn from_toml(contents: &str) -> eyre::Result<Self> {
        let config: Self = toml::from_str(contents)?;
        config.session.validate()?;
        config.network_config().validate()?;

        Ok(config)
    }

    pub fn network_config(&self) -> NetworkConfig {
        match &self.tokens {
            Some(tokens) => NetworkConfigBuilder::sepolia()
                .tokens(tokens.clone())
                .build(),
            None => NetworkConfig::sepolia(),
        }
    }
}
