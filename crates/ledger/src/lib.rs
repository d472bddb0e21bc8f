//! Ledger Gateway: the seam between token sessions and the chain.
//!
//! A [`Gateway`] performs the two ERC20 reads a session polls, submits the
//! three writes a session can issue, and reports whether a submitted write
//! is still waiting for confirmation. [`provider::ProviderGateway`] is the
//! RPC-backed implementation.

#[cfg(any(test, feature = "test-utils"))]
pub mod memory;
pub mod provider;

use alloy_primitives::{Address, TxHash, U256};
use std::{fmt, future::Future};

/// Side-effect-free token read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReadCall {
    /// `balanceOf(owner)`
    BalanceOf { owner: Address },
    /// `allowance(owner, spender)`
    Allowance { owner: Address, spender: Address },
}

impl ReadCall {
    pub const fn method(&self) -> &'static str {
        match self {
            Self::BalanceOf { .. } => "balanceOf",
            Self::Allowance { .. } => "allowance",
        }
    }
}

/// State-changing token call. Every submission is a distinct attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WriteCall {
    /// `approve(spender, value)`
    Approve { spender: Address, value: U256 },
    /// `transferFrom(from, to, value)`
    TransferFrom {
        from: Address,
        to: Address,
        value: U256,
    },
    /// `mint(to, value)`
    Mint { to: Address, value: U256 },
}

impl WriteCall {
    pub const fn method(&self) -> &'static str {
        match self {
            Self::Approve { .. } => "approve",
            Self::TransferFrom { .. } => "transferFrom",
            Self::Mint { .. } => "mint",
        }
    }
}

impl fmt::Display for WriteCall {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Approve { spender, value } => write!(f, "approve({spender}, {value})"),
            Self::TransferFrom { from, to, value } => {
                write!(f, "transferFrom({from}, {to}, {value})")
            }
            Self::Mint { to, value } => write!(f, "mint({to}, {value})"),
        }
    }
}

/// Access to an external account-based token ledger.
pub trait Gateway: Send + Sync {
    /// Read an integer result from the token contract.
    fn read(
        &self,
        token: Address,
        call: ReadCall,
    ) -> impl Future<Output = eyre::Result<U256>> + Send;

    /// Submit a write and return its pending transaction hash.
    fn write(
        &self,
        token: Address,
        call: WriteCall,
    ) -> impl Future<Output = eyre::Result<TxHash>> + Send;

    /// Whether a previously submitted write is still awaiting confirmation.
    fn is_confirming(&self, tx_hash: TxHash) -> impl Future<Output = eyre::Result<bool>> + Send;
}
