//! Token sessions.
//!
//! A [`TokenManager`] ties one token's state store, its balance/allowance
//! poller and its transaction dispatcher together for the presentation
//! layer. The wallet connection is passed in as a [`WalletContext`].

pub mod context;
pub mod manager;
pub mod poller;
pub mod portfolio;

pub use context::WalletContext;
pub use manager::{LoadingFlags, TokenManager, TokenView};
pub use poller::{PollHandle, Poller};
pub use portfolio::{total_balance, PortfolioTotal};
