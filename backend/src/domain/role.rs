//! User roles and their route subtrees.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Which side of the product a session acts as.
///
/// The role is chosen once before login and trusted thereafter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// Property owner documenting their home.
    Homeowner,
    /// Insurance agent managing client properties.
    Agent,
}

/// Raised when a role string is neither `homeowner` nor `agent`.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown role '{0}'; expected homeowner or agent")]
pub struct UnknownRole(pub String);

impl Role {
    /// Every role, in display order.
    pub const ALL: [Role; 2] = [Role::Homeowner, Role::Agent];

    /// Wire name used in payloads and configuration.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Homeowner => "homeowner",
            Self::Agent => "agent",
        }
    }

    /// Landing screen after a successful verification.
    ///
    /// # Examples
    /// ```
    /// use homestead::domain::Role;
    ///
    /// assert_eq!(Role::Agent.home_path(), "/agent/dashboard");
    /// ```
    #[must_use]
    pub const fn home_path(self) -> &'static str {
        match self {
            Self::Homeowner => "/dashboard",
            Self::Agent => "/agent/dashboard",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = UnknownRole;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "homeowner" => Ok(Self::Homeowner),
            "agent" => Ok(Self::Agent),
            _ => Err(UnknownRole(s.to_owned())),
        }
    }
}
