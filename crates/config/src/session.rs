//! Options recognised by a token session.

use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;

/// Default refresh period for balance and allowance reads.
pub const DEFAULT_POLL_INTERVAL_MS: u64 = 5_000;

/// Longest accepted refresh period (one day).
pub const MAX_POLL_INTERVAL_MS: u64 = 86_400_000;

/// Default quantity of whole tokens credited by one mint.
pub const DEFAULT_MINT_AMOUNT_WHOLE: u64 = 100;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("poll interval must be greater than zero")]
    ZeroPollInterval,

    #[error("poll interval must not exceed {MAX_POLL_INTERVAL_MS} ms")]
    PollIntervalTooLong,

    #[error("mint amount must be greater than zero")]
    ZeroMintAmount,

    #[error("token {symbol} has {decimals} decimals, at most {max} are supported")]
    UnsupportedDecimals { symbol: String, decimals: u8, max: u8 },
}

/// Per-session tuning.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// How often balance and allowance are refreshed, in milliseconds
    pub poll_interval_ms: u64,
    /// Whole tokens requested by each mint action
    pub mint_amount_whole: u64,
}

impl SessionConfig {
    pub const fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }

    pub const fn validate(&self) -> Result<(), ConfigError> {
        if self.poll_interval_ms == 0 {
            return Err(ConfigError::ZeroPollInterval);
        }
        if self.poll_interval_ms > MAX_POLL_INTERVAL_MS {
            return Err(ConfigError::PollIntervalTooLong);
        }
        if self.mint_amount_whole == 0 {
            return Err(ConfigError::ZeroMintAmount);
        }
        Ok(())
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            poll_interval_ms: DEFAULT_POLL_INTERVAL_MS,
            mint_amount_whole: DEFAULT_MINT_AMOUNT_WHOLE,
        }
    }
}
