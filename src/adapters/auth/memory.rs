//! In-memory auth gateway, the stand-in for a real auth provider.
//!
//! "Sending" a sign-in link signs the account straight in: there is no
//! mailbox in a demo, and the interesting behavior downstream is the
//! session change, not the email. Known addresses keep their seeded id;
//! unknown addresses are minted a fresh one, the way a provider assigns
//! an id at first sign-up.

use std::collections::HashMap;
use std::sync::RwLock;

use async_trait::async_trait;
use tokio::sync::broadcast;
use uuid::Uuid;

use crate::domain::foundation::{AuthError, Session, SessionEvent, UserId};
use crate::ports::{AuthGateway, SessionEvents};

const EVENT_CAPACITY: usize = 16;

pub struct InMemoryAuthGateway {
    /// email -> stable user id
    directory: RwLock<HashMap<String, UserId>>,
    current: RwLock<Option<Session>>,
    events: broadcast::Sender<SessionEvent>,
}

impl InMemoryAuthGateway {
    pub fn new() -> Self {
        let (events, _) = broadcast::channel(EVENT_CAPACITY);
        Self {
            directory: RwLock::new(HashMap::new()),
            current: RwLock::new(None),
            events,
        }
    }

    /// Seeds a known account so sign-ins reuse its id.
    pub fn with_account(self, email: impl Into<String>, id: UserId) -> Self {
        self.directory.write().unwrap().insert(email.into(), id);
        self
    }

    /// Re-announces the current session as a token refresh.
    pub fn refresh_token(&self) {
        if let Some(session) = self.current.read().unwrap().clone() {
            let _ = self.events.send(SessionEvent::TokenRefreshed(session));
        }
    }

    fn emit(&self, event: SessionEvent) {
        // No receivers is fine; nobody has subscribed yet.
        let _ = self.events.send(event);
    }
}

impl Default for InMemoryAuthGateway {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl AuthGateway for InMemoryAuthGateway {
    async fn current_session(&self) -> Result<Option<Session>, AuthError> {
        Ok(self.current.read().unwrap().clone())
    }

    fn subscribe(&self) -> SessionEvents {
        SessionEvents::new(self.events.subscribe())
    }

    async fn send_sign_in_link(&self, email: &str) -> Result<(), AuthError> {
        let email = email.trim();
        if email.is_empty() || !email.contains('@') {
            return Err(AuthError::InvalidEmail);
        }

        let user_id = {
            let mut directory = self.directory.write().unwrap();
            directory
                .entry(email.to_string())
                .or_insert_with(|| {
                    UserId::new(Uuid::new_v4().to_string())
                        .expect("uuid is never empty")
                })
                .clone()
        };

        let session = Session::new(user_id, Some(email.to_string()));
        *self.current.write().unwrap() = Some(session.clone());
        self.emit(SessionEvent::SignedIn(session));
        Ok(())
    }

    async fn sign_out(&self) -> Result<(), AuthError> {
        *self.current.write().unwrap() = None;
        self.emit(SessionEvent::SignedOut);
        Ok(())
    }
}
