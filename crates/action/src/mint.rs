use crate::{Action, Unready};
use alloy_primitives::Address;
use config::TokenDescriptor;
use ledger::WriteCall;
use token::ActionKind;

/// Mint a fixed number of whole tokens to the connected account.
///
/// The session's entered amount plays no part.
#[derive(Debug, Clone)]
pub struct MintAction {
    decimals: u8,
    symbol: String,
    account: Option<Address>,
    whole: u64,
}

impl MintAction {
    pub fn new(token: &TokenDescriptor, account: Option<Address>, whole: u64) -> Self {
        Self {
            decimals: token.decimals,
            symbol: token.symbol.clone(),
            account,
            whole,
        }
    }
}

impl Action for MintAction {
    fn kind(&self) -> ActionKind {
        ActionKind::Mint
    }

    fn prepare(&self) -> Result<WriteCall, Unready> {
        let to = self.account.ok_or(Unready::NoAccount)?;
        let value = amount::to_raw(&self.whole.to_string(), self.decimals)?;
        Ok(WriteCall::Mint { to, value })
    }

    fn description(&self) -> String {
        format!("Minting {} {}", self.whole, self.symbol)
    }
}
