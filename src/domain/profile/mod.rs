//! Profile domain - the one persisted record per identity.

mod card;
mod errors;
mod record;

pub use card::{CardPayload, Season};
pub use errors::{MembershipError, ResolutionError};
pub use record::{Profile, Role};
