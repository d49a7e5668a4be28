//! Application settings loaded via OrthoConfig.
//!
//! Values layer CLI flags over `HOMESTEAD_*` environment variables over an
//! optional configuration file. Every field is optional; accessors supply
//! the defaults so an empty environment starts a working demo server.

use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::time::Duration;

use ortho_config::OrthoConfig;
use serde::Deserialize;

use crate::domain::OtpAcceptance;
use crate::domain::navigation::GuardMode;
use crate::domain::ports::DEFAULT_GATEWAY_DELAY;

const DEFAULT_HOST: IpAddr = IpAddr::V4(Ipv4Addr::UNSPECIFIED);
const DEFAULT_PORT: u16 = 8080;

/// Settings for the shell server.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "HOMESTEAD")]
pub struct ShellSettings {
    /// Interface to bind; defaults to all interfaces.
    pub host: Option<IpAddr>,
    /// Port to bind; defaults to 8080.
    pub port: Option<u16>,
    /// Simulated gateway round-trip in milliseconds.
    pub otp_delay_ms: Option<u64>,
    /// Accept only the bypass code instead of any six-character code.
    #[ortho_config(default = false)]
    pub otp_bypass_only: bool,
    /// Allow every route regardless of session.
    #[ortho_config(default = false)]
    pub disable_route_guards: bool,
}

impl ShellSettings {
    /// Socket address to bind.
    #[must_use]
    pub fn bind_addr(&self) -> SocketAddr {
        SocketAddr::new(
            self.host.unwrap_or(DEFAULT_HOST),
            self.port.unwrap_or(DEFAULT_PORT),
        )
    }

    /// Delay applied by the fixture gateway.
    #[must_use]
    pub fn otp_delay(&self) -> Duration {
        self.otp_delay_ms
            .map_or(DEFAULT_GATEWAY_DELAY, Duration::from_millis)
    }

    /// Code acceptance policy; the permissive demo rule unless restricted.
    #[must_use]
    pub fn otp_acceptance(&self) -> OtpAcceptance {
        OtpAcceptance::from_flag(!self.otp_bypass_only)
    }

    /// Route guard mode; enforcing unless disabled.
    #[must_use]
    pub fn guard_mode(&self) -> GuardMode {
        GuardMode::from_flag(!self.disable_route_guards)
    }
}
