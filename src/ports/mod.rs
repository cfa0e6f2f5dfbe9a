//! Ports - interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the domain and the outside world. Adapters implement these ports.
//!
//! - `ProfileStore` - the data-client capability surface for profile rows
//! - `AuthGateway` - the authentication collaborator (sessions, sign-in
//!   links, sign-out, session-change events)

mod auth_gateway;
mod profile_store;

pub use auth_gateway::{AuthGateway, SessionEvents};
pub use profile_store::{ProfileQuery, ProfileStore, StoreCapabilities, StoreError};
