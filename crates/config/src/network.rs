//! Network configuration for the dashboard.
//!
//! Only one test network is supported. It carries the chain id the
//! connected wallet must be on and the registry of tokens it can manage.

use crate::{session::ConfigError, token::TokenDescriptor};
use alloy_primitives::address;
use serde::{Deserialize, Serialize};

/// Complete network configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NetworkConfig {
    /// Chain ID
    pub chain_id: u64,
    /// Human readable network name
    pub name: String,
    /// Tokens managed on this network
    pub tokens: Vec<TokenDescriptor>,
}

impl NetworkConfig {
    /// Ethereum Sepolia testnet configuration.
    pub fn sepolia() -> Self {
        Self {
            chain_id: 11155111,
            name: "Sepolia".to_string(),
            tokens: vec![
                TokenDescriptor::new(
                    // https://sepolia.etherscan.io/address/0x1D70D57ccD2798323232B2dD027B3aBcA5C00091
                    address!("0x1D70D57ccD2798323232B2dD027B3aBcA5C00091"),
                    18,
                    "DAI",
                ),
                TokenDescriptor::new(
                    // https://sepolia.etherscan.io/address/0xC891481A0AaC630F4D89744ccD2C7D2C4215FD47
                    address!("0xC891481A0AaC630F4D89744ccD2C7D2C4215FD47"),
                    6,
                    "USDC",
                ),
            ],
        }
    }

    /// Look up a token by symbol, ignoring case.
    pub fn token(&self, symbol: &str) -> Option<&TokenDescriptor> {
        self.tokens
            .iter()
            .find(|token| token.symbol.eq_ignore_ascii_case(symbol))
    }

    /// Check every registered token.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.tokens.iter().try_for_each(TokenDescriptor::validate)
    }
}

impl Default for NetworkConfig {
    fn default() -> Self {
        Self::sepolia()
    }
}

/// Builder for custom network configurations.
#[derive(Debug, Clone)]
pub struct NetworkConfigBuilder {
    config: NetworkConfig,
}

impl NetworkConfigBuilder {
    /// Start with Sepolia defaults.
    pub fn sepolia() -> Self {
        Self {
            config: NetworkConfig::sepolia(),
        }
    }

    /// Override the chain id.
    pub fn chain_id(mut self, chain_id: u64) -> Self {
        self.config.chain_id = chain_id;
        self
    }

    /// Replace the whole token registry.
    pub fn tokens(mut self, tokens: Vec<TokenDescriptor>) -> Self {
        self.config.tokens = tokens;
        self
    }

    /// Add a token, replacing any existing entry with the same symbol.
    pub fn token(mut self, token: TokenDescriptor) -> Self {
        self.config
            .tokens
            .retain(|existing| !existing.symbol.eq_ignore_ascii_case(&token.symbol));
        self.config.tokens.push(token);
        self
    }

    /// Build the network configuration.
    pub fn build(self) -> NetworkConfig {
        self.config
    }
}
