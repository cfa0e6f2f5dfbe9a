//! ProfileStore port - the data-client capability surface.
//!
//! Backing clients differ widely: a real PostgREST backend narrows by
//! equality, resolves single rows, orders and limits; a lightweight
//! stand-in may only know how to hand back every row. Rather than probing
//! object shape at runtime, each client publishes an explicit
//! [`StoreCapabilities`] descriptor and callers pick the best available
//! path from it.
//!
//! # Contract
//!
//! - `capabilities()` is constant for the lifetime of the client.
//! - Callers only set [`ProfileQuery`] fields, and only call the optional
//!   methods, that the descriptor advertises. Implementations may return
//!   `StoreError::Unsupported` for anything they did not advertise; they
//!   must never panic over it.
//! - `select` is the base operation every client supports: resolve the
//!   query to a plain row collection, empty when nothing matches.
//! - `select_single` resolves to exactly one row; an empty result is
//!   `StoreError::NotFound`, never `Ok` with a placeholder.

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::foundation::UserId;
use crate::domain::profile::Profile;

/// Errors reported by a profile data client.
#[derive(Debug, Clone, Error)]
pub enum StoreError {
    /// A single-row lookup matched nothing.
    #[error("no matching row")]
    NotFound,

    /// The requested operation is not part of this client's capability set.
    #[error("data client does not support {0}")]
    Unsupported(&'static str),

    /// The backend reported a failure (network, policy, constraint).
    #[error("store error: {0}")]
    Remote(String),
}

impl StoreError {
    /// Creates a remote error with a message.
    pub fn remote(message: impl Into<String>) -> Self {
        Self::Remote(message.into())
    }
}

/// What a profile data client can do beyond plain row resolution.
///
/// `filter_eq` narrows reads by id; `update_eq` narrows writes (a client
/// may well support one without the other, so they are tracked apart).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct StoreCapabilities {
    /// Narrow a read to rows whose id equals a key.
    pub filter_eq: bool,
    /// Resolve a query to exactly one row (or a not-found error).
    pub single_row: bool,
    /// Order rows by column.
    pub order_by: bool,
    /// Cap the number of returned rows.
    pub limit: bool,
    /// Insert a new row.
    pub insert: bool,
    /// Narrow an update to rows whose id equals a key.
    pub update_eq: bool,
}

impl StoreCapabilities {
    /// Everything: the rich-client surface.
    pub const FULL: Self = Self {
        filter_eq: true,
        single_row: true,
        order_by: true,
        limit: true,
        insert: true,
        update_eq: true,
    };

    /// Nothing beyond base row resolution.
    pub const MINIMAL: Self = Self {
        filter_eq: false,
        single_row: false,
        order_by: false,
        limit: false,
        insert: false,
        update_eq: false,
    };
}

/// A read over the profile table, built only from advertised capabilities.
#[derive(Debug, Clone, Default)]
pub struct ProfileQuery {
    /// Restrict to the row with this id (requires `filter_eq`).
    pub filter_id: Option<UserId>,
    /// Sort ascending by `full_name` (requires `order_by`).
    pub order_by_full_name: bool,
    /// Cap the row count (requires `limit`).
    pub limit: Option<usize>,
}

impl ProfileQuery {
    /// The unrestricted base query.
    pub fn all() -> Self {
        Self::default()
    }

    pub fn with_filter_id(mut self, id: UserId) -> Self {
        self.filter_id = Some(id);
        self
    }

    pub fn with_name_order(mut self) -> Self {
        self.order_by_full_name = true;
        self
    }

    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }
}

/// The profile data client, real or stand-in.
///
/// Only `capabilities` and `select` are mandatory; the optional operations
/// default to `StoreError::Unsupported` so a minimal client compiles
/// without touching them.
#[async_trait]
pub trait ProfileStore: Send + Sync {
    /// The capability descriptor for this client.
    fn capabilities(&self) -> StoreCapabilities;

    /// Base resolution: the query as a plain row collection.
    async fn select(&self, query: &ProfileQuery) -> Result<Vec<Profile>, StoreError>;

    /// Narrowed single-row resolution (requires `filter_eq` + `single_row`).
    async fn select_single(&self, _id: &UserId) -> Result<Profile, StoreError> {
        Err(StoreError::Unsupported("single-row select"))
    }

    /// Row creation (requires `insert`).
    async fn insert(&self, _profile: &Profile) -> Result<(), StoreError> {
        Err(StoreError::Unsupported("insert"))
    }

    /// Single-field membership update narrowed by id (requires `update_eq`).
    async fn update_membership(&self, _id: &UserId, _is_member: bool) -> Result<(), StoreError> {
        Err(StoreError::Unsupported("filtered update"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct BareStore;

    #[async_trait]
    impl ProfileStore for BareStore {
        fn capabilities(&self) -> StoreCapabilities {
            StoreCapabilities::MINIMAL
        }

        async fn select(&self, _query: &ProfileQuery) -> Result<Vec<Profile>, StoreError> {
            Ok(Vec::new())
        }
    }

    #[tokio::test]
    async fn optional_operations_default_to_unsupported() {
        let store = BareStore;
        let id = UserId::new("user-1").unwrap();

        assert!(matches!(
            store.select_single(&id).await,
            Err(StoreError::Unsupported(_))
        ));
        assert!(matches!(
            store.update_membership(&id, true).await,
            Err(StoreError::Unsupported(_))
        ));
    }

    #[test]
    fn query_builder_accumulates_fields() {
        let query = ProfileQuery::all()
            .with_filter_id(UserId::new("user-1").unwrap())
            .with_name_order()
            .with_limit(50);

        assert_eq!(query.filter_id.as_ref().unwrap().as_str(), "user-1");
        assert!(query.order_by_full_name);
        assert_eq!(query.limit, Some(50));
    }

    #[test]
    fn profile_store_trait_is_object_safe_and_send_sync() {
        fn _assert_trait_object(_: &dyn ProfileStore) {}
        fn _assert_arc_send_sync<T: Send + Sync + ?Sized>() {}
        _assert_arc_send_sync::<std::sync::Arc<dyn ProfileStore>>();
    }
}
