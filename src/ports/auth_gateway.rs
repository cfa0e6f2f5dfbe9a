//! AuthGateway port - the authentication collaborator.
//!
//! The gateway owns session issuance: passwordless email-link sign-in,
//! sign-out, and a broadcast of session-change events. Profile data never
//! lives here; it holds only the identity (`id` + `email`).
//!
//! # Contract
//!
//! Implementations must:
//! - Report the current session (or `None`) from `current_session`
//! - Emit a [`SessionEvent`] for every sign-in, sign-out, and token refresh
//! - Stop delivering events to a [`SessionEvents`] handle once it is dropped

use async_trait::async_trait;
use tokio::sync::broadcast;

use crate::domain::foundation::{AuthError, Session, SessionEvent};

/// A live subscription to session-change events.
///
/// Dropping the handle unsubscribes; holding it across the consumer's
/// whole lifetime gives the scoped acquire/release discipline the
/// lifecycle bridge relies on.
pub struct SessionEvents {
    receiver: broadcast::Receiver<SessionEvent>,
}

impl SessionEvents {
    pub fn new(receiver: broadcast::Receiver<SessionEvent>) -> Self {
        Self { receiver }
    }

    /// The next session change, or `None` once the gateway shuts down.
    ///
    /// A slow consumer that misses intermediate events skips straight to
    /// the newer ones; only the latest session matters downstream.
    pub async fn next(&mut self) -> Option<SessionEvent> {
        loop {
            match self.receiver.recv().await {
                Ok(event) => return Some(event),
                Err(broadcast::error::RecvError::Lagged(skipped)) => {
                    tracing::debug!(skipped, "session event stream lagged");
                    continue;
                }
                Err(broadcast::error::RecvError::Closed) => return None,
            }
        }
    }
}

/// The authentication collaborator.
#[async_trait]
pub trait AuthGateway: Send + Sync {
    /// The session currently in effect, if any.
    async fn current_session(&self) -> Result<Option<Session>, AuthError>;

    /// Subscribe to session-change events.
    fn subscribe(&self) -> SessionEvents;

    /// Passwordless sign-in: send a one-time link to the given address.
    async fn send_sign_in_link(&self, email: &str) -> Result<(), AuthError>;

    /// End the current session.
    async fn sign_out(&self) -> Result<(), AuthError>;
}
