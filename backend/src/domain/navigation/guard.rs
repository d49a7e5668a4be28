//! Role-based access decisions for resolved routes.

use serde::{Deserialize, Serialize};
use tracing::debug;
use utoipa::ToSchema;

use super::routes::RouteMatch;
use crate::domain::Session;

/// Path unauthenticated visitors are sent to.
pub const LANDING_PATH: &str = "/";

/// Whether the guard blocks cross-role and anonymous navigation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum GuardMode {
    /// Restricted routes require an authenticated user of the matching role.
    #[default]
    Enforce,
    /// Every route is allowed; navigation relies on links alone.
    Permissive,
}

impl GuardMode {
    /// Pick the mode; `true` enforces the guards.
    #[must_use]
    pub const fn from_flag(enforce: bool) -> Self {
        if enforce {
            Self::Enforce
        } else {
            Self::Permissive
        }
    }
}

/// Outcome of a guard check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Access {
    /// Render the requested screen.
    Allow,
    /// Navigate to `to` instead.
    Redirect {
        /// Destination path.
        to: String,
    },
}

impl Access {
    fn redirect(to: &str) -> Self {
        Self::Redirect { to: to.to_owned() }
    }

    /// Whether the requested screen may be rendered.
    #[must_use]
    pub fn is_allowed(&self) -> bool {
        matches!(self, Self::Allow)
    }
}

/// Decides whether a session may open a route.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RouteGuard {
    mode: GuardMode,
}

impl RouteGuard {
    /// Guard running in `mode`.
    #[must_use]
    pub const fn new(mode: GuardMode) -> Self {
        Self { mode }
    }

    /// Mode this guard runs in.
    #[must_use]
    pub const fn mode(&self) -> GuardMode {
        self.mode
    }

    /// Check `route` for `session`.
    ///
    /// Under [`GuardMode::Enforce`] a restricted route needs an
    /// authenticated user. Anonymous sessions go to the landing page and
    /// users of the other role go to their own home path. A role picked
    /// before login grants nothing.
    #[must_use]
    pub fn check(&self, route: &RouteMatch, session: &Session) -> Access {
        let Some(required) = route.audience().required_role() else {
            return Access::Allow;
        };
        if self.mode == GuardMode::Permissive {
            return Access::Allow;
        }

        let access = match session.current_user() {
            Some(user) if user.role() == required => Access::Allow,
            Some(user) => Access::redirect(user.role().home_path()),
            None => Access::redirect(LANDING_PATH),
        };
        if !access.is_allowed() {
            debug!(path = route.path(), %required, ?access, "navigation redirected");
        }
        access
    }
}
