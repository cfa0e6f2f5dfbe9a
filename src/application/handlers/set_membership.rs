//! SetMembership - flip the membership flag on one profile.
//!
//! The one state change in the system that must fail loudly: a silent
//! failure would misrepresent who holds a valid card. The update must be
//! narrowed by id on the write path; a client that cannot narrow writes
//! gets an explicit refusal instead of a blanket update.

use std::sync::Arc;

use crate::domain::foundation::UserId;
use crate::domain::profile::MembershipError;
use crate::ports::ProfileStore;

/// Command to set one profile's membership flag.
#[derive(Debug, Clone)]
pub struct SetMembershipCommand {
    pub target: UserId,
    pub is_member: bool,
}

/// Handler for membership mutation. Admin authorization is a
/// precondition enforced by the caller.
pub struct SetMembershipHandler {
    store: Arc<dyn ProfileStore>,
}

impl SetMembershipHandler {
    pub fn new(store: Arc<dyn ProfileStore>) -> Self {
        Self { store }
    }

    pub async fn handle(&self, cmd: SetMembershipCommand) -> Result<(), MembershipError> {
        if !self.store.capabilities().update_eq {
            return Err(MembershipError::UpdateUnsupported);
        }
        self.store
            .update_membership(&cmd.target, cmd.is_member)
            .await?;

        tracing::info!(target = %cmd.target, is_member = cmd.is_member, "membership updated");
        Ok(())
    }
}
