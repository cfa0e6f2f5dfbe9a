//! Authentication types for the domain layer.
//!
//! These types represent the identity handed out by the auth provider.
//! They have **no provider dependencies** - any backend (Supabase Auth,
//! GoTrue, a test stand-in) can populate them via the `AuthGateway` port.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::UserId;

/// The current authenticated identity.
///
/// Derived and non-persistent: it exists only while the auth provider
/// reports a live session. Absence of a session implies absence of an
/// in-memory profile (the stored row is untouched).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    /// The unique user identifier from the auth provider.
    pub user_id: UserId,

    /// Email address attached to the session, if the provider supplies one.
    pub email: Option<String>,
}

impl Session {
    pub fn new(user_id: UserId, email: Option<String>) -> Self {
        Self { user_id, email }
    }
}

/// A change in authentication state emitted by the auth provider.
///
/// Each event replaces the current session wholesale; consumers re-derive
/// everything downstream of it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionEvent {
    SignedIn(Session),
    SignedOut,
    TokenRefreshed(Session),
}

impl SessionEvent {
    /// The session this event leaves in effect, if any.
    pub fn session(&self) -> Option<&Session> {
        match self {
            SessionEvent::SignedIn(s) | SessionEvent::TokenRefreshed(s) => Some(s),
            SessionEvent::SignedOut => None,
        }
    }
}

/// Errors reported by the authentication collaborator.
///
/// Domain-centric: these describe what went wrong from the application's
/// perspective, not the provider's.
#[derive(Debug, Clone, Error)]
pub enum AuthError {
    /// The supplied email address is empty or malformed.
    #[error("invalid email address")]
    InvalidEmail,

    /// The provider refused the operation (rate limit, unknown account, ...).
    #[error("sign-in rejected: {0}")]
    Rejected(String),

    /// The auth service is unreachable (network, config).
    #[error("auth service unavailable: {0}")]
    ServiceUnavailable(String),
}

impl AuthError {
    /// Creates a service unavailable error with a message.
    pub fn service_unavailable(message: impl Into<String>) -> Self {
        Self::ServiceUnavailable(message.into())
    }

    /// Returns true if this is a transient error that may succeed on retry.
    pub fn is_transient(&self) -> bool {
        matches!(self, AuthError::ServiceUnavailable(_))
    }
}
