//! Client session state and its phase machine.
//!
//! A [`Session`] is a plain value: adapters own one per client and hand it to
//! [`crate::domain::SessionService`] operations. The phase is derived from
//! the stored fields rather than stored separately, so the two cannot
//! disagree.
//!
//! ```text
//! Unauthenticated --set_role--> RoleChosen --login--> OtpPending
//! OtpPending --verify (accepted)--> Authenticated
//! OtpPending --verify (rejected)--> OtpPending
//! Authenticated --logout--> Unauthenticated
//! ```

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::{ContactNumber, Role, User};

/// Where a session sits in the role selection and login flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum SessionPhase {
    /// Nothing chosen yet.
    Unauthenticated,
    /// A role is selected; no code has been requested.
    RoleChosen,
    /// A code was dispatched and awaits verification.
    OtpPending,
    /// A code verified and a user record exists.
    Authenticated,
}

/// Authentication and authorisation state of one client.
///
/// ## Invariants
/// - `current_user` is only set by a successful verification.
/// - `pending_contact` is only set while `selected_role` is set.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    #[serde(default)]
    current_user: Option<User>,
    #[serde(default)]
    selected_role: Option<Role>,
    #[serde(default)]
    pending_contact: Option<ContactNumber>,
}

impl Session {
    /// Empty session, as at process start or after logout.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Authenticated user, if verification has succeeded.
    pub fn current_user(&self) -> Option<&User> {
        self.current_user.as_ref()
    }

    /// Role chosen before login.
    pub fn selected_role(&self) -> Option<Role> {
        self.selected_role
    }

    /// Contact awaiting code verification.
    pub fn pending_contact(&self) -> Option<&ContactNumber> {
        self.pending_contact.as_ref()
    }

    /// Role that drives navigation: the user's once authenticated, the
    /// selection before that.
    pub fn effective_role(&self) -> Option<Role> {
        self.current_user
            .as_ref()
            .map(User::role)
            .or(self.selected_role)
    }

    /// Current phase derived from the stored fields.
    ///
    /// # Examples
    /// ```
    /// use homestead::domain::{Role, Session, SessionPhase};
    ///
    /// let mut session = Session::new();
    /// assert_eq!(session.phase(), SessionPhase::Unauthenticated);
    /// session.select_role(Role::Agent);
    /// assert_eq!(session.phase(), SessionPhase::RoleChosen);
    /// ```
    pub fn phase(&self) -> SessionPhase {
        if self.current_user.is_some() {
            SessionPhase::Authenticated
        } else if self.pending_contact.is_some() {
            SessionPhase::OtpPending
        } else if self.selected_role.is_some() {
            SessionPhase::RoleChosen
        } else {
            SessionPhase::Unauthenticated
        }
    }

    /// Whether a user record is present.
    pub fn is_authenticated(&self) -> bool {
        self.current_user.is_some()
    }

    /// Record the chosen role. An authenticated user's role is unaffected.
    pub fn select_role(&mut self, role: Role) {
        self.selected_role = Some(role);
    }

    /// Remember the contact a code was dispatched to.
    pub(crate) fn begin_verification(&mut self, contact: ContactNumber) {
        self.pending_contact = Some(contact);
    }

    /// Store the verified user and drop the pending contact.
    pub(crate) fn complete_verification(&mut self, user: User) {
        self.current_user = Some(user);
        self.pending_contact = None;
    }

    /// Clear every field. Idempotent.
    pub fn clear(&mut self) {
        *self = Self::default();
    }
}
