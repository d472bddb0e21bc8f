//! Configuration types for the token dashboard.
//!
//! This crate provides:
//! - The supported network and its token registry
//! - Token descriptors
//! - Session tuning options with their defaults

pub mod network;
pub mod session;
pub mod token;

pub use network::{NetworkConfig, NetworkConfigBuilder};
pub use session::{ConfigError, SessionConfig};
pub use token::{TokenDescriptor, MAX_DECIMALS};
