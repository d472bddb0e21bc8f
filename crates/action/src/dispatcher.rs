//! Submission state machine for token writes.
//!
//! Each action kind moves independently through
//! `Idle -> Submitting -> Pending | Failed`. A new submission of the same
//! kind may start from any phase; only the most recent submission of a kind
//! is recorded when it settles.

use crate::{Action, Unready};
use alloy_primitives::{Address, TxHash};
use ledger::Gateway;
use std::{
    collections::HashMap,
    sync::{Arc, Mutex, MutexGuard, PoisonError},
};
use token::{ActionKind, Error, Store, TokenAction};
use tracing::{debug, error, info};

/// Where an action kind currently stands.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Phase {
    #[default]
    Idle,
    Submitting,
    /// Submitted; confirmation is observed through the gateway
    Pending(TxHash),
    Failed,
}

/// Result of one [`Dispatcher::submit`] call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// Preconditions failed; nothing was sent and state is untouched.
    Skipped(Unready),
    Pending(TxHash),
    Failed(Error),
}

/// Latest submission attempt of one kind and its phase.
#[derive(Debug, Default)]
struct Slot {
    attempt: u64,
    phase: Phase,
}

/// Drives writes for one token against a gateway.
pub struct Dispatcher<G> {
    gateway: Arc<G>,
    token: Address,
    slots: Mutex<HashMap<ActionKind, Slot>>,
}

impl<G> Dispatcher<G>
where
    G: Gateway,
{
    pub fn new(gateway: Arc<G>, token: Address) -> Self {
        Self {
            gateway,
            token,
            slots: Mutex::default(),
        }
    }

    fn slots(&self) -> MutexGuard<'_, HashMap<ActionKind, Slot>> {
        self.slots.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn phase(&self, kind: ActionKind) -> Phase {
        self.slots()
            .get(&kind)
            .map(|slot| slot.phase)
            .unwrap_or_default()
    }

    /// Start a new attempt of `kind` and return its stamp.
    fn begin(&self, kind: ActionKind) -> u64 {
        let mut slots = self.slots();
        let slot = slots.entry(kind).or_default();
        slot.attempt += 1;
        slot.phase = Phase::Submitting;
        slot.attempt
    }

    /// Record the result of `attempt` unless a newer attempt has started.
    ///
    /// `apply` runs under the slot lock so a stale result can never
    /// overwrite the store after a newer one.
    fn settle(&self, kind: ActionKind, attempt: u64, phase: Phase, apply: impl FnOnce()) -> bool {
        let mut slots = self.slots();
        match slots.get_mut(&kind) {
            Some(slot) if slot.attempt == attempt => {
                slot.phase = phase;
                apply();
                true
            }
            _ => false,
        }
    }

    /// Validate, submit and record one action.
    ///
    /// Failures never propagate: they land in the store's `error` field.
    pub async fn submit<A: Action>(&self, action: &A, store: &Store) -> Outcome {
        let kind = action.kind();

        let call = match action.prepare() {
            Ok(call) => call,
            Err(reason) => {
                debug!(kind = %kind, token = %self.token, %reason, "Action skipped.");
                return Outcome::Skipped(reason);
            }
        };

        store.dispatch(TokenAction::SetError(None));
        let attempt = self.begin(kind);
        info!(kind = %kind, token = %self.token, call = %call, "{}", action.description());

        match self.gateway.write(self.token, call).await {
            Ok(tx_hash) => {
                let recorded = self.settle(kind, attempt, Phase::Pending(tx_hash), || {
                    store.dispatch(TokenAction::SetPending(kind, Some(tx_hash)));
                });
                if recorded {
                    info!(kind = %kind, tx_hash = %tx_hash, "Action pending.");
                } else {
                    debug!(kind = %kind, tx_hash = %tx_hash, "Superseded by a newer submission.");
                }
                Outcome::Pending(tx_hash)
            }
            Err(err) => {
                error!(kind = %kind, token = %self.token, error = %err, "{} failed", kind);
                let err = Error::ActionFailed {
                    kind,
                    reason: format!("{err:#}"),
                };
                let message = err.user_message();
                let recorded = self.settle(kind, attempt, Phase::Failed, || {
                    store.dispatch(TokenAction::SetError(message));
                });
                if !recorded {
                    debug!(kind = %kind, "Failure superseded by a newer submission.");
                }
                Outcome::Failed(err)
            }
        }
    }
}
