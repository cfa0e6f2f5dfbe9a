//! Error types for profile resolution and membership mutation.

use thiserror::Error;

use crate::ports::StoreError;

/// Failure to resolve exactly one profile for a signed-in identity.
///
/// Resolution failures are terminal for one attempt: the caller clears the
/// in-memory profile and records the message for display. There is no
/// automatic retry.
#[derive(Debug, Clone, Error)]
pub enum ResolutionError {
    /// Called without an active session. Expected state, not a fault.
    #[error("no active session")]
    NoSession,

    /// A narrowed single-row lookup came back empty. At that point the
    /// query was keyed to exactly one id, so "not found" is a failure
    /// signal rather than a create trigger.
    #[error("profile not found")]
    NotFound,

    /// No row exists and the data client exposes no insert capability.
    #[error("profile creation unavailable on this data client")]
    InsertUnavailable,

    /// The insert was acknowledged but the readback could not see the row.
    #[error("profile not created")]
    NotCreated,

    /// The data client reported a failure.
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Failure to apply a membership-flag update.
#[derive(Debug, Clone, Error)]
pub enum MembershipError {
    /// Caller does not hold the admin role.
    #[error("not authorized")]
    NotAuthorized,

    /// The data client cannot narrow updates by id. Refusing beats a
    /// blanket update of every row.
    #[error("membership updates require filtered updates on this data client")]
    UpdateUnsupported,

    /// The data client reported a failure; no local state was touched.
    #[error(transparent)]
    Store(#[from] StoreError),
}
