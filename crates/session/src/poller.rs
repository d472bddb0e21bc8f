//! Periodic balance and allowance refresh.
//!
//! Reads that fail are logged and dropped; the store keeps the last good
//! value and the next tick tries again.

use alloy_primitives::{Address, U256};
use ledger::{Gateway, ReadCall};
use std::{sync::Arc, time::Duration};
use tokio::{
    task::JoinHandle,
    time::{self, MissedTickBehavior},
};
use token::{Error, Store, TokenAction};
use tracing::debug;

/// Reads one token/account pair into a store.
pub struct Poller<G> {
    gateway: Arc<G>,
    token: Address,
    account: Address,
    store: Store,
    interval: Duration,
}

impl<G> Clone for Poller<G> {
    fn clone(&self) -> Self {
        Self {
            gateway: self.gateway.clone(),
            token: self.token,
            account: self.account,
            store: self.store.clone(),
            interval: self.interval,
        }
    }
}

impl<G> Poller<G>
where
    G: Gateway + 'static,
{
    pub const fn new(
        gateway: Arc<G>,
        token: Address,
        account: Address,
        store: Store,
        interval: Duration,
    ) -> Self {
        Self {
            gateway,
            token,
            account,
            store,
            interval,
        }
    }

    /// Read balance and allowance once and apply whatever succeeded.
    pub async fn poll_once(&self) {
        let balance_call = ReadCall::BalanceOf {
            owner: self.account,
        };
        // allowance the connected account granted to itself
        let allowance_call = ReadCall::Allowance {
            owner: self.account,
            spender: self.account,
        };

        let (balance, allowance) = tokio::join!(
            self.gateway.read(self.token, balance_call),
            self.gateway.read(self.token, allowance_call),
        );

        if let Some(balance) = self.settle(balance_call, balance) {
            self.store.dispatch(TokenAction::SetBalance(balance));
        }
        if let Some(allowance) = self.settle(allowance_call, allowance) {
            self.store.dispatch(TokenAction::SetApprovedAmount(allowance));
        }
    }

    fn settle(&self, call: ReadCall, result: eyre::Result<U256>) -> Option<U256> {
        match result {
            Ok(value) => Some(value),
            Err(err) => {
                let err = Error::ReadFailed {
                    method: call.method(),
                    reason: format!("{err:#}"),
                };
                debug!(token = %self.token, account = %self.account, %err, "Poll read failed, keeping last value.");
                None
            }
        }
    }

    /// Start polling on the current runtime. The first read happens at once.
    pub fn spawn(self) -> PollHandle {
        let task = tokio::spawn(async move {
            let mut interval = time::interval(self.interval);
            interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
            debug!(
                token = %self.token,
                account = %self.account,
                interval_ms = u64::try_from(self.interval.as_millis()).unwrap_or(u64::MAX),
                "Polling started."
            );

            loop {
                interval.tick().await;
                self.poll_once().await;
            }
        });

        PollHandle { task: Some(task) }
    }
}

/// Owner of a running poll loop. Dropping it cancels the loop.
#[derive(Debug)]
pub struct PollHandle {
    task: Option<JoinHandle<()>>,
}

impl PollHandle {
    pub fn is_running(&self) -> bool {
        self.task.as_ref().is_some_and(|task| !task.is_finished())
    }

    /// Cancel the loop and wait until it has fully stopped.
    pub async fn stop(mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
            // cancellation is the expected result
            let _ = task.await;
        }
    }
}

impl Drop for PollHandle {
    fn drop(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy_primitives::address;
    use ledger::memory::MemoryLedger;

    const TOKEN: Address = address!("C891481A0AaC630F4D89744ccD2C7D2C4215FD47");
    const ACCOUNT: Address = address!("f39Fd6e51aad88F6F4ce6aB8827279cffFb92266");
    const INTERVAL: Duration = Duration::from_millis(5_000);

    fn setup() -> (Arc<MemoryLedger>, Store, Poller<MemoryLedger>) {
        let ledger = Arc::new(MemoryLedger::new(ACCOUNT));
        let store = Store::new();
        let poller = Poller::new(ledger.clone(), TOKEN, ACCOUNT, store.clone(), INTERVAL);
        (ledger, store, poller)
    }

    #[tokio::test]
    async fn test_poll_once_reads_balance_and_allowance() {
        let (ledger, store, poller) = setup();
        ledger.set_balance(TOKEN, ACCOUNT, U256::from(42));
        ledger.set_allowance(TOKEN, ACCOUNT, ACCOUNT, U256::from(7));

        poller.poll_once().await;

        let state = store.snapshot();
        assert_eq!(state.balance, U256::from(42));
        assert_eq!(state.approved_amount, U256::from(7));
        assert_eq!(ledger.read_count(), 2);
    }

    #[tokio::test]
    async fn test_failed_reads_keep_last_value() {
        let (ledger, store, poller) = setup();
        ledger.set_balance(TOKEN, ACCOUNT, U256::from(42));
        poller.poll_once().await;

        ledger.fail_reads(true);
        ledger.set_balance(TOKEN, ACCOUNT, U256::from(1));
        poller.poll_once().await;

        let state = store.snapshot();
        assert_eq!(state.balance, U256::from(42));
        assert_eq!(state.error, None);

        ledger.fail_reads(false);
        poller.poll_once().await;
        assert_eq!(store.snapshot().balance, U256::from(1));
    }

    #[tokio::test(start_paused = true)]
    async fn test_polls_every_interval() {
        let (ledger, store, poller) = setup();
        ledger.set_balance(TOKEN, ACCOUNT, U256::from(42));
        let handle = poller.spawn();

        time::sleep(Duration::from_millis(1)).await;
        assert_eq!(ledger.read_count(), 2);
        assert_eq!(store.snapshot().balance, U256::from(42));

        ledger.set_balance(TOKEN, ACCOUNT, U256::from(43));
        time::sleep(INTERVAL).await;
        assert_eq!(ledger.read_count(), 4);
        assert_eq!(store.snapshot().balance, U256::from(43));

        assert!(handle.is_running());
        handle.stop().await;
    }

    #[tokio::test(start_paused = true)]
    async fn test_no_reads_after_stop() {
        let (ledger, _store, poller) = setup();
        let handle = poller.spawn();
        time::sleep(Duration::from_millis(1)).await;

        handle.stop().await;
        let reads = ledger.read_count();

        time::sleep(INTERVAL * 10).await;
        assert_eq!(ledger.read_count(), reads);
    }

    #[tokio::test(start_paused = true)]
    async fn test_drop_cancels_polling() {
        let (ledger, _store, poller) = setup();
        let handle = poller.spawn();
        time::sleep(Duration::from_millis(1)).await;

        drop(handle);
        let reads = ledger.read_count();
        time::sleep(INTERVAL * 10).await;
        assert_eq!(ledger.read_count(), reads);
    }
}
