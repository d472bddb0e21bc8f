//! Token Manager facade.
//!
//! One [`TokenManager`] per (token, target address) pair. Formatted values
//! and validation flags are recomputed from the store on every call; the
//! loading flags ask the gateway about the recorded pending hashes.

use crate::{
    context::WalletContext,
    poller::{PollHandle, Poller},
};
use action::{
    approve::ApproveAction, mint::MintAction, transfer::TransferAction, Dispatcher, Outcome, Phase,
};
use alloy_primitives::{Address, TxHash};
use config::{ConfigError, NetworkConfig, SessionConfig, TokenDescriptor};
use ledger::Gateway;
use serde::Serialize;
use std::sync::Arc;
use tokio::sync::watch;
use token::{ActionKind, Store, TokenAction, TokenState};
use tracing::debug;

/// Everything the presentation layer renders for one token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TokenView {
    pub symbol: String,
    pub balance: String,
    pub approved_amount: String,
    pub amount: String,
    pub error: Option<String>,
    pub has_insufficient_balance: bool,
    pub has_insufficient_allowance: bool,
    pub has_invalid_amount: bool,
    pub pending_approve: Option<TxHash>,
    pub pending_transfer: Option<TxHash>,
    pub pending_mint: Option<TxHash>,
}

/// Whether each kind's last submission is still confirming.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct LoadingFlags {
    pub approve: bool,
    pub transfer: bool,
    pub mint: bool,
}

pub struct TokenManager<G> {
    token: TokenDescriptor,
    target: String,
    account: Option<Address>,
    config: SessionConfig,
    gateway: Arc<G>,
    store: Store,
    dispatcher: Dispatcher<G>,
    poller: Option<Poller<G>>,
    poll_handle: Option<PollHandle>,
}

impl<G> TokenManager<G>
where
    G: Gateway + 'static,
{
    /// Open a session. Polling starts right away when an account is given.
    ///
    /// Must be called from within a tokio runtime.
    pub fn new(
        gateway: Arc<G>,
        token: TokenDescriptor,
        target: impl Into<String>,
        account: Option<Address>,
        config: SessionConfig,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        token.validate()?;

        let store = Store::new();
        let dispatcher = Dispatcher::new(gateway.clone(), token.address);
        let poller = account.map(|account| {
            Poller::new(
                gateway.clone(),
                token.address,
                account,
                store.clone(),
                config.poll_interval(),
            )
        });
        let poll_handle = poller.clone().map(Poller::spawn);

        debug!(
            token = %token.address,
            symbol = %token.symbol,
            account = ?account,
            "Token session opened."
        );

        Ok(Self {
            token,
            target: target.into(),
            account,
            config,
            gateway,
            store,
            dispatcher,
            poller,
            poll_handle,
        })
    }

    /// Open a session for whatever account `wallet` may act for on `network`.
    pub fn for_wallet(
        gateway: Arc<G>,
        network: &NetworkConfig,
        token: TokenDescriptor,
        target: impl Into<String>,
        wallet: &WalletContext,
        config: SessionConfig,
    ) -> Result<Self, ConfigError> {
        Self::new(gateway, token, target, wallet.account_for(network), config)
    }

    pub const fn account(&self) -> Option<Address> {
        self.account
    }

    pub fn state(&self) -> TokenState {
        self.store.snapshot()
    }

    /// Receiver woken on every state change.
    pub fn subscribe(&self) -> watch::Receiver<TokenState> {
        self.store.subscribe()
    }

    pub fn balance(&self) -> String {
        amount::to_display(self.state().balance, self.token.decimals)
    }

    pub fn approved_amount(&self) -> String {
        amount::to_display(self.state().approved_amount, self.token.decimals)
    }

    pub fn amount(&self) -> String {
        self.state().amount
    }

    pub fn error(&self) -> Option<String> {
        self.state().error
    }

    pub fn set_amount(&self, amount: impl Into<String>) {
        self.store.dispatch(TokenAction::SetAmount(amount.into()));
    }

    pub fn has_insufficient_balance(&self) -> bool {
        self.state().has_insufficient_balance(self.token.decimals)
    }

    pub fn has_insufficient_allowance(&self) -> bool {
        self.state().has_insufficient_allowance(self.token.decimals)
    }

    pub fn has_invalid_amount(&self) -> bool {
        self.state().has_invalid_amount(self.token.decimals)
    }

    /// Snapshot of every derived value.
    pub fn view(&self) -> TokenView {
        let state = self.state();
        let decimals = self.token.decimals;
        TokenView {
            symbol: self.token.symbol.clone(),
            balance: amount::to_display(state.balance, decimals),
            approved_amount: amount::to_display(state.approved_amount, decimals),
            has_insufficient_balance: state.has_insufficient_balance(decimals),
            has_insufficient_allowance: state.has_insufficient_allowance(decimals),
            has_invalid_amount: state.has_invalid_amount(decimals),
            pending_approve: state.pending.approve,
            pending_transfer: state.pending.transfer,
            pending_mint: state.pending.mint,
            amount: state.amount,
            error: state.error,
        }
    }

    pub fn phase(&self, kind: ActionKind) -> Phase {
        self.dispatcher.phase(kind)
    }

    /// Approve the connected account to spend the entered amount.
    pub async fn approve(&self) -> Outcome {
        let action = ApproveAction::new(&self.token, self.account, self.amount());
        self.dispatcher.submit(&action, &self.store).await
    }

    /// Transfer the entered amount from the connected account to the target.
    pub async fn transfer(&self) -> Outcome {
        let action =
            TransferAction::new(&self.token, self.account, self.target.clone(), self.amount());
        self.dispatcher.submit(&action, &self.store).await
    }

    /// Mint the configured number of whole tokens to the connected account.
    pub async fn mint(&self) -> Outcome {
        let action = MintAction::new(&self.token, self.account, self.config.mint_amount_whole);
        self.dispatcher.submit(&action, &self.store).await
    }

    /// Whether the last submission of `kind` is still confirming.
    ///
    /// No recorded hash, or a failed status query, reads as not loading.
    pub async fn is_loading(&self, kind: ActionKind) -> bool {
        let Some(tx_hash) = self.state().pending.get(kind) else {
            return false;
        };
        match self.gateway.is_confirming(tx_hash).await {
            Ok(confirming) => confirming,
            Err(err) => {
                debug!(kind = %kind, tx_hash = %tx_hash, error = %err, "Confirmation query failed.");
                false
            }
        }
    }

    pub async fn is_approve_loading(&self) -> bool {
        self.is_loading(ActionKind::Approve).await
    }

    pub async fn is_transfer_loading(&self) -> bool {
        self.is_loading(ActionKind::Transfer).await
    }

    pub async fn is_mint_loading(&self) -> bool {
        self.is_loading(ActionKind::Mint).await
    }

    pub async fn loading(&self) -> LoadingFlags {
        let (approve, transfer, mint) = tokio::join!(
            self.is_approve_loading(),
            self.is_transfer_loading(),
            self.is_mint_loading(),
        );
        LoadingFlags {
            approve,
            transfer,
            mint,
        }
    }

    /// Read balance and allowance now instead of waiting for the next tick.
    pub async fn refresh(&self) {
        if let Some(poller) = &self.poller {
            poller.poll_once().await;
        }
    }

    pub fn is_polling(&self) -> bool {
        self.poll_handle.as_ref().is_some_and(PollHandle::is_running)
    }

    /// End the session, waiting for the poll loop to stop.
    pub async fn shutdown(mut self) {
        if let Some(handle) = self.poll_handle.take() {
            handle.stop().await;
        }
        debug!(token = %self.token.address, "Token session closed.");
    }
}
