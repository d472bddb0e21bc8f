//! Contract bindings for the token contracts the dashboard talks to.
//!
//! All bindings are generated using alloy's `sol!` macro.

pub mod token;
