//! Shared HTTP adapter state.
//!
//! HTTP handlers accept this state via `actix_web::web::Data` so they only
//! depend on domain services and remain testable without I/O.

use crate::domain::SessionService;
use crate::domain::navigation::{GuardMode, NavigationShell};
use crate::domain::ports::FixtureAuthGateway;

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub sessions: SessionService,
    pub shell: NavigationShell,
}

impl HttpState {
    /// Construct state from a session service and navigation shell.
    ///
    /// # Examples
    /// ```
    /// use homestead::domain::SessionService;
    /// use homestead::domain::navigation::{GuardMode, NavigationShell};
    /// use homestead::domain::ports::FixtureAuthGateway;
    /// use homestead::inbound::http::state::HttpState;
    ///
    /// let sessions = SessionService::with_fixtures(FixtureAuthGateway::default());
    /// let state = HttpState::new(sessions, NavigationShell::new(GuardMode::Enforce));
    /// assert_eq!(state.shell.guard_mode(), GuardMode::Enforce);
    /// ```
    pub fn new(sessions: SessionService, shell: NavigationShell) -> Self {
        Self { sessions, shell }
    }

    /// State over the in-process fixtures.
    pub fn fixtures(gateway: FixtureAuthGateway, mode: GuardMode) -> Self {
        Self::new(
            SessionService::with_fixtures(gateway),
            NavigationShell::new(mode),
        )
    }
}
