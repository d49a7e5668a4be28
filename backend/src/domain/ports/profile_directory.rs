//! Driven port that produces the user record for a verified contact.

use async_trait::async_trait;

use crate::domain::{ContactNumber, Role, User, UserDraft, UserId};

use super::define_port_error;

define_port_error! {
    /// Failures raised while resolving a profile.
    pub enum ProfileDirectoryError {
        /// The directory could not build or find the profile.
        Lookup { message: String } => "profile lookup failed: {message}",
    }
}

/// Source of user profiles keyed by contact and role.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProfileDirectory: Send + Sync {
    /// Return the profile for a contact that just verified under `role`.
    async fn profile_for(
        &self,
        contact: &ContactNumber,
        role: Role,
    ) -> Result<User, ProfileDirectoryError>;
}

/// Demo directory returning one canned profile per role.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureProfileDirectory;

impl FixtureProfileDirectory {
    const fn identity(role: Role) -> (&'static str, &'static str) {
        match role {
            Role::Homeowner => ("John Smith", "john.smith@example.com"),
            Role::Agent => ("Sarah Johnson", "sarah.johnson@example.com"),
        }
    }
}

#[async_trait]
impl ProfileDirectory for FixtureProfileDirectory {
    async fn profile_for(
        &self,
        contact: &ContactNumber,
        role: Role,
    ) -> Result<User, ProfileDirectoryError> {
        let (name, email) = Self::identity(role);
        User::try_from_draft(UserDraft {
            id: UserId::random().into(),
            name: name.to_owned(),
            email: email.to_owned(),
            phone: contact.as_ref().to_owned(),
            role,
            avatar: None,
        })
        .map_err(|err| ProfileDirectoryError::lookup(format!("invalid fixture profile: {err}")))
    }
}
