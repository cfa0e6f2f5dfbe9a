//! In-memory profile store, the stand-in for an unconfigured backend.
//!
//! Full-capability by default; `with_capabilities` narrows the advertised
//! surface so callers can be exercised against poorer clients. Rows live
//! in a `RwLock<Vec<_>>`, plenty for a demo directory of a few dozen
//! profiles.

use std::cmp::Ordering;
use std::sync::RwLock;

use async_trait::async_trait;

use crate::domain::foundation::UserId;
use crate::domain::profile::Profile;
use crate::ports::{ProfileQuery, ProfileStore, StoreCapabilities, StoreError};

#[derive(Debug)]
pub struct InMemoryProfileStore {
    caps: StoreCapabilities,
    rows: RwLock<Vec<Profile>>,
}

impl Default for InMemoryProfileStore {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryProfileStore {
    /// Empty store with the full capability surface.
    pub fn new() -> Self {
        Self { caps: StoreCapabilities::FULL, rows: RwLock::new(Vec::new()) }
    }

    /// Full-capability store pre-loaded with rows.
    pub fn seeded(rows: Vec<Profile>) -> Self {
        Self { caps: StoreCapabilities::FULL, rows: RwLock::new(rows) }
    }

    /// Narrows (or widens) the advertised capability set.
    pub fn with_capabilities(mut self, caps: StoreCapabilities) -> Self {
        self.caps = caps;
        self
    }

    /// Adds a row directly, bypassing the insert capability gate.
    pub fn seed(&self, profile: Profile) {
        self.rows.write().unwrap().push(profile);
    }

    /// Snapshot of every stored row, in insertion order.
    pub fn snapshot(&self) -> Vec<Profile> {
        self.rows.read().unwrap().clone()
    }

    /// Ascending by name (case-insensitive), rows without a name first.
    fn name_order(a: &Profile, b: &Profile) -> Ordering {
        match (&a.full_name, &b.full_name) {
            (None, None) => Ordering::Equal,
            (None, Some(_)) => Ordering::Less,
            (Some(_), None) => Ordering::Greater,
            (Some(x), Some(y)) => x.to_lowercase().cmp(&y.to_lowercase()),
        }
    }
}

#[async_trait]
impl ProfileStore for InMemoryProfileStore {
    fn capabilities(&self) -> StoreCapabilities {
        self.caps
    }

    async fn select(&self, query: &ProfileQuery) -> Result<Vec<Profile>, StoreError> {
        let rows = self.rows.read().unwrap();
        let mut out: Vec<Profile> = rows
            .iter()
            .filter(|r| query.filter_id.as_ref().map_or(true, |id| &r.id == id))
            .cloned()
            .collect();
        if query.order_by_full_name {
            out.sort_by(Self::name_order);
        }
        if let Some(limit) = query.limit {
            out.truncate(limit);
        }
        Ok(out)
    }

    async fn select_single(&self, id: &UserId) -> Result<Profile, StoreError> {
        self.rows
            .read()
            .unwrap()
            .iter()
            .find(|r| &r.id == id)
            .cloned()
            .ok_or(StoreError::NotFound)
    }

    async fn insert(&self, profile: &Profile) -> Result<(), StoreError> {
        let mut rows = self.rows.write().unwrap();
        if rows.iter().any(|r| r.id == profile.id) {
            return Err(StoreError::remote(format!(
                "duplicate key value violates unique constraint: {}",
                profile.id
            )));
        }
        rows.push(profile.clone());
        Ok(())
    }

    async fn update_membership(&self, id: &UserId, is_member: bool) -> Result<(), StoreError> {
        let mut rows = self.rows.write().unwrap();
        match rows.iter_mut().find(|r| &r.id == id) {
            Some(row) => {
                row.is_member = is_member;
                Ok(())
            }
            None => Err(StoreError::NotFound),
        }
    }
}
