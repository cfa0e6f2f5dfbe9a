//! Use-case handlers, one per operation.

mod list_roster;
mod resolve_profile;
mod set_membership;

pub use list_roster::{ListRosterHandler, ROSTER_LIMIT};
pub use resolve_profile::{ResolveProfileCommand, ResolveProfileHandler};
pub use set_membership::{SetMembershipCommand, SetMembershipHandler};
