pub mod approve;
pub mod dispatcher;
pub mod mint;
pub mod transfer;

pub use dispatcher::{Dispatcher, Outcome, Phase};

use amount::AmountError;
use ledger::WriteCall;
use thiserror::Error;
use token::ActionKind;

/// Why an action did not reach the ledger.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Unready {
    #[error("no connected account")]
    NoAccount,

    #[error("amount is empty")]
    EmptyAmount,

    #[error(transparent)]
    InvalidAmount(#[from] AmountError),

    #[error("target address is empty")]
    NoTarget,

    #[error("target address {0:?} is not a valid address")]
    InvalidTarget(String),
}

/// A write a token session can submit.
pub trait Action: Send + Sync {
    /// Which pending slot this action's hash goes into.
    fn kind(&self) -> ActionKind;

    /// Check preconditions and build the ledger call.
    ///
    /// Amounts are converted to smallest units here.
    fn prepare(&self) -> Result<WriteCall, Unready>;

    /// Whether [`Action::prepare`] would succeed.
    fn is_ready(&self) -> bool {
        self.prepare().is_ok()
    }

    /// Get a human-readable description of this action.
    fn description(&self) -> String;
}

/// Shared amount precondition for approve and transfer.
pub(crate) fn parse_amount(text: &str, decimals: u8) -> Result<alloy_primitives::U256, Unready> {
    if text.is_empty() {
        return Err(Unready::EmptyAmount);
    }
    Ok(amount::to_raw(text, decimals)?)
}
