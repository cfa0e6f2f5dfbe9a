//! Adapters - implementations of the ports.

pub mod auth;
pub mod store;
