//! ResolveProfile - find-or-create the profile for a signed-in identity.
//!
//! The handler adapts to whatever the data client can do. A rich client
//! resolves the row with a narrowed single-row lookup; a bare client gets
//! the whole collection and is scanned; a missing row is provisioned when
//! the client can insert. Repeated resolution is idempotent: an existing
//! row is never duplicated.

use std::sync::Arc;

use crate::domain::foundation::Session;
use crate::domain::profile::{Profile, ResolutionError};
use crate::ports::{ProfileQuery, ProfileStore, StoreError};

/// Command to resolve the profile for one session.
#[derive(Debug, Clone)]
pub struct ResolveProfileCommand {
    pub session: Session,
}

/// Handler for profile resolution.
pub struct ResolveProfileHandler {
    store: Arc<dyn ProfileStore>,
}

impl ResolveProfileHandler {
    pub fn new(store: Arc<dyn ProfileStore>) -> Self {
        Self { store }
    }

    /// Resolves exactly one profile for the command's session.
    ///
    /// Capability paths, in strict order:
    /// 1. Narrowed single-row lookup when the client filters by id and
    ///    resolves single rows. "Not found" here is a failure: the query
    ///    was keyed to exactly one id, so an empty result means the row
    ///    genuinely is not visible, not "no rows yet".
    /// 2. Collection scan otherwise, narrowed by id when the client can.
    /// 3. On no match, provision the row and re-read once through the
    ///    scan path (a client need not echo the inserted row back).
    pub async fn handle(&self, cmd: ResolveProfileCommand) -> Result<Profile, ResolutionError> {
        let caps = self.store.capabilities();
        let session = &cmd.session;

        if caps.filter_eq && caps.single_row {
            return match self.store.select_single(&session.user_id).await {
                Ok(profile) => Ok(profile),
                Err(StoreError::NotFound) => Err(ResolutionError::NotFound),
                Err(err) => Err(err.into()),
            };
        }

        if let Some(profile) = self.scan_for(session).await? {
            return Ok(profile);
        }

        if !caps.insert {
            return Err(ResolutionError::InsertUnavailable);
        }
        self.store.insert(&Profile::provision(session)).await?;

        tracing::info!(user_id = %session.user_id, "provisioned profile on first sign-in");

        match self.scan_for(session).await? {
            Some(profile) => Ok(profile),
            None => Err(ResolutionError::NotCreated),
        }
    }

    /// Collection read, narrowed by id when the client supports it, then
    /// scanned for the first matching row.
    async fn scan_for(&self, session: &Session) -> Result<Option<Profile>, StoreError> {
        let mut query = ProfileQuery::all();
        if self.store.capabilities().filter_eq {
            query = query.with_filter_id(session.user_id.clone());
        }
        let rows = self.store.select(&query).await?;
        Ok(rows.into_iter().find(|row| row.id == session.user_id))
    }
}
