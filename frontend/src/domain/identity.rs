//! Authenticated identity held by the session store.

use super::RoleCode;

/// Subject id, display name and role of the authenticated user.
///
/// ## Invariants
/// - The logged-out identity has an empty `subject_id` and
///   [`RoleCode::Unset`]. Rehydration from storage never produces a value
///   where only one of the two is set.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Identity {
    subject_id: String,
    display_name: String,
    role: RoleCode,
}

impl Identity {
    /// Build an identity from its parts without validation.
    pub fn new(subject_id: impl Into<String>, display_name: impl Into<String>, role: RoleCode) -> Self {
        Self {
            subject_id: subject_id.into(),
            display_name: display_name.into(),
            role,
        }
    }

    /// The all-empty identity.
    pub fn logged_out() -> Self {
        Self::default()
    }

    /// Subject id (the citizen's CPF).
    pub fn subject_id(&self) -> &str {
        self.subject_id.as_str()
    }

    /// Name shown in the shell header.
    pub fn display_name(&self) -> &str {
        self.display_name.as_str()
    }

    /// Role granted by the backend.
    pub const fn role(&self) -> RoleCode {
        self.role
    }

    /// Whether this identity represents a logged-out session.
    pub fn is_logged_out(&self) -> bool {
        self.subject_id.is_empty() || self.role.is_unset()
    }

    pub(crate) fn set_role(&mut self, role: RoleCode) {
        self.role = role;
    }
}
