//! In-memory ERC20 ledger.
//!
//! Writes take effect immediately and then stay "confirming" until
//! [`MemoryLedger::confirm`] is called. Reads and writes can be made to fail
//! to exercise the error paths of a session.

use crate::{Gateway, ReadCall, WriteCall};
use alloy_primitives::{keccak256, Address, TxHash, U256};
use std::{
    collections::{HashMap, HashSet},
    sync::{Mutex, MutexGuard, PoisonError},
};

/// A write accepted by the ledger.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Submission {
    pub token: Address,
    pub call: WriteCall,
    pub tx_hash: TxHash,
}

#[derive(Debug, Default)]
struct State {
    balances: HashMap<(Address, Address), U256>,
    allowances: HashMap<(Address, Address, Address), U256>,
    confirming: HashSet<TxHash>,
    submissions: Vec<Submission>,
    reads: usize,
    nonce: u64,
    fail_reads: bool,
    fail_writes: bool,
}

/// Gateway that keeps every token's books in memory.
#[derive(Debug)]
pub struct MemoryLedger {
    /// Account every write is sent from.
    sender: Address,
    state: Mutex<State>,
}

impl MemoryLedger {
    pub fn new(sender: Address) -> Self {
        Self {
            sender,
            state: Mutex::default(),
        }
    }

    fn state(&self) -> MutexGuard<'_, State> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn set_balance(&self, token: Address, owner: Address, amount: U256) {
        self.state().balances.insert((token, owner), amount);
    }

    pub fn set_allowance(&self, token: Address, owner: Address, spender: Address, amount: U256) {
        self.state()
            .allowances
            .insert((token, owner, spender), amount);
    }

    pub fn balance_of(&self, token: Address, owner: Address) -> U256 {
        self.state()
            .balances
            .get(&(token, owner))
            .copied()
            .unwrap_or_default()
    }

    pub fn allowance(&self, token: Address, owner: Address, spender: Address) -> U256 {
        self.state()
            .allowances
            .get(&(token, owner, spender))
            .copied()
            .unwrap_or_default()
    }

    /// Make every subsequent read fail (or succeed again).
    pub fn fail_reads(&self, fail: bool) {
        self.state().fail_reads = fail;
    }

    /// Make every subsequent write fail (or succeed again).
    pub fn fail_writes(&self, fail: bool) {
        self.state().fail_writes = fail;
    }

    /// Number of read calls received, failed ones included.
    pub fn read_count(&self) -> usize {
        self.state().reads
    }

    /// Accepted writes in submission order.
    pub fn submissions(&self) -> Vec<Submission> {
        self.state().submissions.clone()
    }

    /// Mark a submitted write as confirmed.
    pub fn confirm(&self, tx_hash: TxHash) {
        self.state().confirming.remove(&tx_hash);
    }

    fn apply(&self, state: &mut State, token: Address, call: WriteCall) -> eyre::Result<()> {
        match call {
            WriteCall::Approve { spender, value } => {
                state.allowances.insert((token, self.sender, spender), value);
            }
            WriteCall::TransferFrom { from, to, value } => {
                let allowance_key = (token, from, self.sender);
                let allowance = state
                    .allowances
                    .get(&allowance_key)
                    .copied()
                    .unwrap_or_default();
                if allowance < value {
                    eyre::bail!("ERC20: insufficient allowance");
                }
                let from_balance = state
                    .balances
                    .get(&(token, from))
                    .copied()
                    .unwrap_or_default();
                if from_balance < value {
                    eyre::bail!("ERC20: transfer amount exceeds balance");
                }
                state.allowances.insert(allowance_key, allowance - value);
                state.balances.insert((token, from), from_balance - value);
                let to_balance = state.balances.entry((token, to)).or_default();
                *to_balance += value;
            }
            WriteCall::Mint { to, value } => {
                let balance = state.balances.entry((token, to)).or_default();
                *balance = balance
                    .checked_add(value)
                    .ok_or_else(|| eyre::eyre!("ERC20: mint overflows balance"))?;
            }
        }
        Ok(())
    }
}

impl Gateway for MemoryLedger {
    async fn read(&self, token: Address, call: ReadCall) -> eyre::Result<U256> {
        let mut state = self.state();
        state.reads += 1;
        if state.fail_reads {
            eyre::bail!("{} read failed", call.method());
        }

        let value = match call {
            ReadCall::BalanceOf { owner } => state.balances.get(&(token, owner)),
            ReadCall::Allowance { owner, spender } => {
                state.allowances.get(&(token, owner, spender))
            }
        };
        Ok(value.copied().unwrap_or_default())
    }

    async fn write(&self, token: Address, call: WriteCall) -> eyre::Result<TxHash> {
        let mut state = self.state();
        if state.fail_writes {
            eyre::bail!("user rejected the request");
        }

        self.apply(&mut state, token, call)?;

        state.nonce += 1;
        let tx_hash = keccak256(state.nonce.to_be_bytes());
        state.confirming.insert(tx_hash);
        state.submissions.push(Submission {
            token,
            call,
            tx_hash,
        });
        Ok(tx_hash)
    }

    async fn is_confirming(&self, tx_hash: TxHash) -> eyre::Result<bool> {
        Ok(self.state().confirming.contains(&tx_hash))
    }
}
