use crate::{Gateway, ReadCall, WriteCall};
use alloy_primitives::{Address, TxHash, U256};
use alloy_provider::Provider;
use binding::token::{IMintableERC20, IERC20};
use eyre::Result;
use tracing::{debug, info};

/// Gateway backed by an alloy provider.
///
/// Writes need a provider with a wallet; the wallet's account becomes the
/// transaction sender.
#[derive(Debug, Clone)]
pub struct ProviderGateway<P> {
    provider: P,
}

impl<P> ProviderGateway<P>
where
    P: Provider + Clone,
{
    pub const fn new(provider: P) -> Self {
        Self { provider }
    }

    async fn query_balance(&self, token: Address, owner: Address) -> Result<U256> {
        debug!("Querying erc20 {} balance: owner={}", token, owner);

        let contract = IERC20::new(token, &self.provider);
        let amount = contract.balanceOf(owner).call().await?;
        Ok(amount)
    }

    async fn query_allowance(
        &self,
        token: Address,
        owner: Address,
        spender: Address,
    ) -> Result<U256> {
        debug!(
            "Querying erc20 {} allowance: owner={}, spender={}",
            token, owner, spender
        );

        let contract = IERC20::new(token, &self.provider);
        let amount = contract.allowance(owner, spender).call().await?;
        Ok(amount)
    }
}

impl<P> Gateway for ProviderGateway<P>
where
    P: Provider + Clone,
{
    async fn read(&self, token: Address, call: ReadCall) -> Result<U256> {
        match call {
            ReadCall::BalanceOf { owner } => self.query_balance(token, owner).await,
            ReadCall::Allowance { owner, spender } => {
                self.query_allowance(token, owner, spender).await
            }
        }
    }

    async fn write(&self, token: Address, call: WriteCall) -> Result<TxHash> {
        let pending_tx = match call {
            WriteCall::Approve { spender, value } => {
                IERC20::new(token, &self.provider)
                    .approve(spender, value)
                    .send()
                    .await?
            }
            WriteCall::TransferFrom { from, to, value } => {
                IERC20::new(token, &self.provider)
                    .transferFrom(from, to, value)
                    .send()
                    .await?
            }
            WriteCall::Mint { to, value } => {
                IMintableERC20::new(token, &self.provider)
                    .mint(to, value)
                    .send()
                    .await?
            }
        };

        let tx_hash = *pending_tx.tx_hash();
        info!(
            token = %token,
            method = call.method(),
            tx_hash = %tx_hash,
            "Transaction submitted."
        );

        Ok(tx_hash)
    }

    async fn is_confirming(&self, tx_hash: TxHash) -> Result<bool> {
        // Transaction is still pending until a receipt exists
        let receipt = self.provider.get_transaction_receipt(tx_hash).await?;
        Ok(receipt.is_none())
    }
}
