use crate::{reduce, TokenAction, TokenState};
use std::sync::Arc;
use tokio::sync::watch;

/// Shared handle to one session's [`TokenState`].
///
/// Every action goes through [`reduce`]. Subscribers are woken only when a
/// transition actually changes the state.
#[derive(Debug, Clone)]
pub struct Store {
    tx: Arc<watch::Sender<TokenState>>,
}

impl Store {
    pub fn new() -> Self {
        let (tx, _rx) = watch::channel(TokenState::default());
        Self { tx: Arc::new(tx) }
    }

    /// Apply an action. Returns whether the state changed.
    pub fn dispatch(&self, action: TokenAction) -> bool {
        self.tx.send_if_modified(|state| {
            let next = reduce(state.clone(), action);
            if next == *state {
                return false;
            }
            *state = next;
            true
        })
    }

    /// Copy of the current state.
    pub fn snapshot(&self) -> TokenState {
        self.tx.borrow().clone()
    }

    /// Receiver notified on every state change.
    pub fn subscribe(&self) -> watch::Receiver<TokenState> {
        self.tx.subscribe()
    }
}

impl Default for Store {
    fn default() -> Self {
        Self::new()
    }
}
