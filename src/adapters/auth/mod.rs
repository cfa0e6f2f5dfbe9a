//! Auth gateway adapters.

mod memory;

pub use memory::InMemoryAuthGateway;
