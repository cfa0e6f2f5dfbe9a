//! ListRoster - the ordered, capped list of every profile.
//!
//! Admin authorization is a precondition enforced by the caller; this
//! handler only knows how to read. An empty roster is a safe degraded
//! state, so any store failure is logged and swallowed rather than shown
//! to the user.

use std::sync::Arc;

use crate::domain::profile::Profile;
use crate::ports::{ProfileQuery, ProfileStore};

/// Cap on roster size when the client can limit at all.
pub const ROSTER_LIMIT: usize = 50;

/// Handler for loading the admin roster.
pub struct ListRosterHandler {
    store: Arc<dyn ProfileStore>,
}

impl ListRosterHandler {
    pub fn new(store: Arc<dyn ProfileStore>) -> Self {
        Self { store }
    }

    /// Loads all profiles, ordered by `full_name` ascending when the
    /// client can order (rows without a name sort first) and capped at
    /// [`ROSTER_LIMIT`] when it can limit. Capabilities the client lacks
    /// are skipped; without them the store's own defaults apply.
    pub async fn handle(&self) -> Vec<Profile> {
        let caps = self.store.capabilities();
        let mut query = ProfileQuery::all();
        if caps.order_by {
            query = query.with_name_order();
        }
        if caps.limit {
            query = query.with_limit(ROSTER_LIMIT);
        }

        match self.store.select(&query).await {
            Ok(rows) => rows,
            Err(err) => {
                tracing::warn!(error = %err, "roster load failed, showing empty roster");
                Vec::new()
            }
        }
    }
}
