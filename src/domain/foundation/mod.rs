//! Foundation layer - shared value objects for the domain.

mod auth;
mod errors;
mod ids;

pub use auth::{AuthError, Session, SessionEvent};
pub use errors::ValidationError;
pub use ids::UserId;
