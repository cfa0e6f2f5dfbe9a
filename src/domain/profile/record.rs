//! The membership profile record.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{Session, UserId};

/// Authorization role attached to a profile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Admin,
}

/// One persisted record per authenticated identity.
///
/// `id` is assigned by the auth provider at first sign-in and never
/// reassigned. `is_member` is the sole mutable business field; only the
/// membership mutation path changes it. Resolution may *create* a profile
/// with `is_member = false` but never flips an existing one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Profile {
    pub id: UserId,
    pub email: Option<String>,
    pub full_name: Option<String>,
    pub role: Option<Role>,
    pub is_member: bool,
}

impl Profile {
    /// The row provisioned for a first sign-in: display name defaults to
    /// the session email, role to `user`, membership off until an admin
    /// grants it.
    pub fn provision(session: &Session) -> Self {
        Self {
            id: session.user_id.clone(),
            email: session.email.clone(),
            full_name: session.email.clone(),
            role: Some(Role::User),
            is_member: false,
        }
    }

    pub fn is_admin(&self) -> bool {
        self.role == Some(Role::Admin)
    }

    /// Display name with email as fallback.
    pub fn display_name(&self) -> &str {
        self.full_name
            .as_deref()
            .or(self.email.as_deref())
            .unwrap_or("")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_session() -> Session {
        Session::new(
            UserId::new("user-1").unwrap(),
            Some("alice@example.com".to_string()),
        )
    }

    #[test]
    fn provision_defaults_name_to_email_and_membership_off() {
        let profile = Profile::provision(&test_session());

        assert_eq!(profile.id.as_str(), "user-1");
        assert_eq!(profile.email.as_deref(), Some("alice@example.com"));
        assert_eq!(profile.full_name.as_deref(), Some("alice@example.com"));
        assert_eq!(profile.role, Some(Role::User));
        assert!(!profile.is_member);
    }

    #[test]
    fn is_admin_requires_admin_role() {
        let mut profile = Profile::provision(&test_session());
        assert!(!profile.is_admin());

        profile.role = Some(Role::Admin);
        assert!(profile.is_admin());

        profile.role = None;
        assert!(!profile.is_admin());
    }

    #[test]
    fn role_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&Role::Admin).unwrap(), "\"admin\"");
        assert_eq!(serde_json::to_string(&Role::User).unwrap(), "\"user\"");
    }

    #[test]
    fn display_name_falls_back_to_email_then_empty() {
        let mut profile = Profile::provision(&test_session());
        profile.full_name = Some("Alice Martin".to_string());
        assert_eq!(profile.display_name(), "Alice Martin");

        profile.full_name = None;
        assert_eq!(profile.display_name(), "alice@example.com");

        profile.email = None;
        assert_eq!(profile.display_name(), "");
    }
}
