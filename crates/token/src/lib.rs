//! Per-token session state.
//!
//! This crate provides:
//! - [`TokenState`] and the pure [`reduce`] transition function
//! - Derived validation flags computed from a state snapshot
//! - [`Store`], a handle that applies actions and publishes snapshots
//! - The session error taxonomy

pub mod error;
pub mod state;
pub mod store;

pub use error::Error;
pub use state::{reduce, PendingIds, TokenAction, TokenState};
pub use store::Store;

use std::fmt;

/// The three write actions a session can issue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ActionKind {
    Approve,
    Transfer,
    Mint,
}

impl ActionKind {
    /// Lowercase action name.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Approve => "approve",
            Self::Transfer => "transfer",
            Self::Mint => "mint",
        }
    }

    /// Capitalized action name, as shown to users.
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Approve => "Approve",
            Self::Transfer => "Transfer",
            Self::Mint => "Mint",
        }
    }
}

impl fmt::Display for ActionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
