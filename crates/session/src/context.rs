use alloy_primitives::Address;
use config::NetworkConfig;

/// Wallet connection as reported by the presentation layer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WalletContext {
    /// Connected account, if any
    pub account: Option<Address>,
    /// Chain the wallet is currently on
    pub chain_id: Option<u64>,
}

impl WalletContext {
    pub const fn disconnected() -> Self {
        Self {
            account: None,
            chain_id: None,
        }
    }

    pub const fn connected(account: Address, chain_id: u64) -> Self {
        Self {
            account: Some(account),
            chain_id: Some(chain_id),
        }
    }

    pub const fn is_connected(&self) -> bool {
        self.account.is_some()
    }

    /// Connected, but not on the network's chain.
    pub fn is_wrong_network(&self, network: &NetworkConfig) -> bool {
        self.is_connected() && self.chain_id != Some(network.chain_id)
    }

    /// The account a session on `network` may act for.
    ///
    /// On the wrong chain the wallet counts as disconnected.
    pub fn account_for(&self, network: &NetworkConfig) -> Option<Address> {
        if self.is_wrong_network(network) {
            return None;
        }
        self.account
    }
}
