use crate::session::ConfigError;
use alloy_primitives::Address;
use serde::{Deserialize, Serialize};

/// Largest decimal exponent whose `10^decimals` fits in 256 bits.
pub const MAX_DECIMALS: u8 = 77;

/// Static description of a supported token.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TokenDescriptor {
    /// Token contract address
    pub address: Address,
    /// Decimal exponent of the smallest unit
    pub decimals: u8,
    /// Display symbol
    pub symbol: String,
}

impl TokenDescriptor {
    pub fn new(address: Address, decimals: u8, symbol: impl Into<String>) -> Self {
        Self {
            address,
            decimals,
            symbol: symbol.into(),
        }
    }

    /// Reject exponents whose unit does not fit in 256 bits.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.decimals > MAX_DECIMALS {
            return Err(ConfigError::UnsupportedDecimals {
                symbol: self.symbol.clone(),
                decimals: self.decimals,
                max: MAX_DECIMALS,
            });
        }
        Ok(())
    }
}
