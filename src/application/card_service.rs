//! CardService - session lifecycle bridge and view-facing state.
//!
//! One instance owns everything the front end renders: the current
//! session, the resolved profile, the admin roster, and the inline
//! notice/error strings. All of it is re-derived from session-change
//! events; the service never blocks and never panics over a collaborator
//! failure.
//!
//! # Supersession
//!
//! Every session change bumps a generation counter before any async work
//! starts. A resolution (or roster load) launched for generation N applies
//! its result only if the counter still reads N at completion; a slow
//! lookup for a session that has since been replaced is discarded instead
//! of overwriting newer state.

use std::sync::{Arc, RwLock};

use crate::domain::foundation::{AuthError, Session, UserId};
use crate::domain::profile::{CardPayload, MembershipError, Profile, ResolutionError};
use crate::ports::{AuthGateway, ProfileStore};

use super::handlers::{
    ListRosterHandler, ResolveProfileCommand, ResolveProfileHandler, SetMembershipCommand,
    SetMembershipHandler,
};

#[derive(Default)]
struct AccountState {
    generation: u64,
    session: Option<Session>,
    profile: Option<Profile>,
    roster: Vec<Profile>,
    resolution_error: Option<String>,
    sign_in_notice: Option<String>,
    sign_in_error: Option<String>,
}

/// The membership-card application core, one per signed-in device.
#[derive(Clone)]
pub struct CardService {
    auth: Arc<dyn AuthGateway>,
    resolver: Arc<ResolveProfileHandler>,
    roster_loader: Arc<ListRosterHandler>,
    membership: Arc<SetMembershipHandler>,
    payload: CardPayload,
    state: Arc<RwLock<AccountState>>,
}

impl CardService {
    pub fn new(
        store: Arc<dyn ProfileStore>,
        auth: Arc<dyn AuthGateway>,
        payload: CardPayload,
    ) -> Self {
        Self {
            auth,
            resolver: Arc::new(ResolveProfileHandler::new(store.clone())),
            roster_loader: Arc::new(ListRosterHandler::new(store.clone())),
            membership: Arc::new(SetMembershipHandler::new(store)),
            payload,
            state: Arc::new(RwLock::new(AccountState::default())),
        }
    }

    /// Drives the session lifecycle until the auth gateway shuts down.
    ///
    /// Fetches the current session once, then applies every session-change
    /// event in order. The event subscription is dropped on return, so a
    /// defunct bridge never acts again.
    pub async fn run(&self) -> Result<(), AuthError> {
        let mut events = self.auth.subscribe();
        let initial = self.auth.current_session().await?;
        self.apply_session(initial).await;

        while let Some(event) = events.next().await {
            self.apply_session(event.session().cloned()).await;
        }
        Ok(())
    }

    /// Replaces the current session and re-derives everything from it.
    ///
    /// `None` clears the in-memory profile and roster immediately (the
    /// stored rows are untouched). `Some` resolves the profile and, for
    /// admins, reloads the roster; stale results are discarded per the
    /// generation check.
    pub async fn apply_session(&self, session: Option<Session>) {
        let generation = {
            let mut state = self.state.write().unwrap();
            state.generation = state.generation.wrapping_add(1);
            state.session = session.clone();
            if session.is_none() {
                state.profile = None;
                state.roster.clear();
                state.resolution_error = None;
            }
            state.generation
        };
        let Some(session) = session else { return };

        let result = self
            .resolver
            .handle(ResolveProfileCommand { session })
            .await;

        let resolved_admin = {
            let mut state = self.state.write().unwrap();
            if state.generation != generation {
                tracing::debug!("discarding superseded resolution result");
                return;
            }
            match result {
                Ok(profile) => {
                    let admin = profile.is_admin();
                    state.resolution_error = None;
                    state.profile = Some(profile);
                    if !admin {
                        state.roster.clear();
                    }
                    admin
                }
                Err(err) => {
                    tracing::error!(error = %err, "profile resolution failed");
                    state.profile = None;
                    state.roster.clear();
                    state.resolution_error = Some(err.to_string());
                    false
                }
            }
        };

        if resolved_admin {
            let roster = self.roster_loader.handle().await;
            let mut state = self.state.write().unwrap();
            if state.generation == generation {
                state.roster = roster;
            }
        }
    }

    /// Re-runs resolution for the current session.
    pub async fn refresh(&self) -> Result<(), ResolutionError> {
        let session = self.state.read().unwrap().session.clone();
        match session {
            None => Err(ResolutionError::NoSession),
            Some(session) => {
                self.apply_session(Some(session)).await;
                Ok(())
            }
        }
    }

    /// Sets one profile's membership flag. Admin only.
    ///
    /// Both local projections (the resolved profile when it is the target,
    /// and the roster entry) are applied under one lock, and only after
    /// the remote write acknowledged. On failure neither is touched and
    /// the error is returned for a blocking user-visible message.
    pub async fn set_membership(
        &self,
        target: &UserId,
        is_member: bool,
    ) -> Result<(), MembershipError> {
        let is_admin = self
            .state
            .read()
            .unwrap()
            .profile
            .as_ref()
            .map_or(false, Profile::is_admin);
        if !is_admin {
            return Err(MembershipError::NotAuthorized);
        }

        self.membership
            .handle(SetMembershipCommand { target: target.clone(), is_member })
            .await?;

        let mut state = self.state.write().unwrap();
        if let Some(profile) = state.profile.as_mut() {
            if profile.id == *target {
                profile.is_member = is_member;
            }
        }
        if let Some(row) = state.roster.iter_mut().find(|r| r.id == *target) {
            row.is_member = is_member;
        }
        Ok(())
    }

    /// Requests a passwordless sign-in link. The outcome lands in the
    /// inline notice/error fields for the sign-in form.
    pub async fn send_sign_in_link(&self, email: &str) -> Result<(), AuthError> {
        {
            let mut state = self.state.write().unwrap();
            state.sign_in_notice = None;
            state.sign_in_error = None;
        }
        match self.auth.send_sign_in_link(email).await {
            Ok(()) => {
                self.state.write().unwrap().sign_in_notice =
                    Some("Sign-in link sent".to_string());
                Ok(())
            }
            Err(err) => {
                self.state.write().unwrap().sign_in_error = Some(err.to_string());
                Err(err)
            }
        }
    }

    /// Ends the current session and clears all derived state.
    pub async fn sign_out(&self) -> Result<(), AuthError> {
        match self.auth.sign_out().await {
            Ok(()) => {
                self.apply_session(None).await;
                Ok(())
            }
            Err(err) => {
                self.state.write().unwrap().sign_in_error = Some(err.to_string());
                Err(err)
            }
        }
    }

    // ─── State exposed to the view layer ───

    pub fn session(&self) -> Option<Session> {
        self.state.read().unwrap().session.clone()
    }

    pub fn profile(&self) -> Option<Profile> {
        self.state.read().unwrap().profile.clone()
    }

    pub fn roster(&self) -> Vec<Profile> {
        self.state.read().unwrap().roster.clone()
    }

    pub fn is_admin(&self) -> bool {
        self.state
            .read()
            .unwrap()
            .profile
            .as_ref()
            .map_or(false, Profile::is_admin)
    }

    /// Display message from the last failed resolution, if any.
    pub fn resolution_error(&self) -> Option<String> {
        self.state.read().unwrap().resolution_error.clone()
    }

    pub fn sign_in_notice(&self) -> Option<String> {
        self.state.read().unwrap().sign_in_notice.clone()
    }

    pub fn sign_in_error(&self) -> Option<String> {
        self.state.read().unwrap().sign_in_error.clone()
    }

    /// The CRLF-joined QR payload for the resolved profile.
    pub fn card_payload(&self) -> Option<String> {
        self.state
            .read()
            .unwrap()
            .profile
            .as_ref()
            .map(|p| self.payload.render(p))
    }
}
