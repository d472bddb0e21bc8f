use alloy_primitives::{Address, U256};
use config::TokenDescriptor;
use ledger::{Gateway, ReadCall};
use serde::Serialize;
use tracing::debug;

/// Sum of the account's balances across a token registry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PortfolioTotal {
    /// Exact sum, scaled by `decimals`.
    pub raw: U256,
    /// The widest exponent in the registry.
    pub decimals: u8,
    /// Two fractional digits, rounded half up.
    pub display: String,
    /// Tokens whose balance could not be read.
    pub skipped: Vec<String>,
}

impl PortfolioTotal {
    fn new(raw: U256, decimals: u8, skipped: Vec<String>) -> Self {
        Self {
            raw,
            decimals,
            display: amount::to_fixed(raw, decimals, 2),
            skipped,
        }
    }
}

/// Read and sum every token's balance for `account`.
///
/// Failed reads are skipped. No account totals zero.
pub async fn total_balance<G: Gateway>(
    gateway: &G,
    tokens: &[TokenDescriptor],
    account: Option<Address>,
) -> PortfolioTotal {
    let decimals = tokens.iter().map(|t| t.decimals).max().unwrap_or(0);
    let Some(owner) = account else {
        return PortfolioTotal::new(U256::ZERO, decimals, Vec::new());
    };

    let mut raw = U256::ZERO;
    let mut skipped = Vec::new();
    for token in tokens {
        let balance = match gateway
            .read(token.address, ReadCall::BalanceOf { owner })
            .await
        {
            Ok(balance) => balance,
            Err(err) => {
                debug!(
                    token = %token.address,
                    symbol = %token.symbol,
                    error = %err,
                    "Skipping token in portfolio total."
                );
                skipped.push(token.symbol.clone());
                continue;
            }
        };

        match amount::rescale(balance, token.decimals, decimals) {
            Some(scaled) => raw = raw.saturating_add(scaled),
            None => {
                debug!(token = %token.address, "Balance overflows the portfolio scale.");
                skipped.push(token.symbol.clone());
            }
        }
    }

    PortfolioTotal::new(raw, decimals, skipped)
}
