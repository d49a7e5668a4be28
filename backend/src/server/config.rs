//! HTTP server configuration object and helpers.

use std::net::SocketAddr;

use homestead::domain::ports::FixtureAuthGateway;
use homestead::inbound::http::session_config::SessionSettings;
use homestead::inbound::http::state::HttpState;
use homestead::settings::ShellSettings;

/// Everything needed to start the server, resolved before binding.
pub struct ServerConfig {
    pub(crate) session: SessionSettings,
    pub(crate) bind_addr: SocketAddr,
    pub(crate) state: HttpState,
}

impl ServerConfig {
    /// Combine application settings with validated cookie settings.
    #[must_use]
    pub fn new(settings: &ShellSettings, session: SessionSettings) -> Self {
        let gateway = FixtureAuthGateway::new(settings.otp_delay(), settings.otp_acceptance());
        Self {
            session,
            bind_addr: settings.bind_addr(),
            state: HttpState::fixtures(gateway, settings.guard_mode()),
        }
    }

    #[must_use]
    pub fn bind_addr(&self) -> SocketAddr {
        self.bind_addr
    }
}
