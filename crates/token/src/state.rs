use crate::ActionKind;
use alloy_primitives::{TxHash, U256};

/// Pending transaction hash per action kind. At most one per kind.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PendingIds {
    pub approve: Option<TxHash>,
    pub transfer: Option<TxHash>,
    pub mint: Option<TxHash>,
}

impl PendingIds {
    pub const fn get(&self, kind: ActionKind) -> Option<TxHash> {
        match kind {
            ActionKind::Approve => self.approve,
            ActionKind::Transfer => self.transfer,
            ActionKind::Mint => self.mint,
        }
    }

    fn slot_mut(&mut self, kind: ActionKind) -> &mut Option<TxHash> {
        match kind {
            ActionKind::Approve => &mut self.approve,
            ActionKind::Transfer => &mut self.transfer,
            ActionKind::Mint => &mut self.mint,
        }
    }
}

/// Mutable state of one token session.
///
/// `balance` and `approved_amount` are smallest-unit values and only ever
/// replaced wholesale from a ledger read.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TokenState {
    /// Last balance read for the connected account
    pub balance: U256,
    /// Last allowance read (connected account to itself)
    pub approved_amount: U256,
    /// User-entered amount, unvalidated
    pub amount: String,
    /// Message of the last failed action
    pub error: Option<String>,
    /// Hashes of submitted writes
    pub pending: PendingIds,
}

/// Transitions accepted by [`reduce`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TokenAction {
    SetAmount(String),
    SetBalance(U256),
    SetApprovedAmount(U256),
    SetError(Option<String>),
    SetPending(ActionKind, Option<TxHash>),
}

/// Apply one action to a state, producing the next state.
pub fn reduce(mut state: TokenState, action: TokenAction) -> TokenState {
    match action {
        TokenAction::SetAmount(amount) => state.amount = amount,
        TokenAction::SetBalance(balance) => state.balance = balance,
        TokenAction::SetApprovedAmount(approved) => state.approved_amount = approved,
        TokenAction::SetError(error) => state.error = error,
        TokenAction::SetPending(kind, tx_hash) => *state.pending.slot_mut(kind) = tx_hash,
    }
    state
}

impl TokenState {
    /// Entered amount is greater than the balance. Equal is sufficient.
    pub fn has_insufficient_balance(&self, decimals: u8) -> bool {
        amount::exceeds(&self.amount, self.balance, decimals)
    }

    /// Entered amount is greater than the approved amount.
    pub fn has_insufficient_allowance(&self, decimals: u8) -> bool {
        amount::exceeds(&self.amount, self.approved_amount, decimals)
    }

    /// Entered amount is non-empty but cannot be submitted for this token.
    pub fn has_invalid_amount(&self, decimals: u8) -> bool {
        !self.amount.trim().is_empty() && amount::to_raw(&self.amount, decimals).is_err()
    }
}
