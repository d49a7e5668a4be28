//! Driven port for one-time code delivery and verification.
//!
//! The session service only talks to this capability, so a real SMS provider
//! can replace the fixture without touching the session flow or adapters.

use std::time::Duration;

use async_trait::async_trait;
use tracing::{debug, info};

use crate::domain::{ContactNumber, OtpAcceptance, OtpCode};

use super::define_port_error;

/// Simulated round-trip used when no delay is configured.
pub const DEFAULT_GATEWAY_DELAY: Duration = Duration::from_millis(1000);

define_port_error! {
    /// Failures raised by code gateways.
    pub enum AuthGatewayError {
        /// The provider accepted the request but could not deliver the code.
        Delivery { message: String } => "code delivery failed: {message}",
        /// The provider could not be reached.
        Unavailable { message: String } => "auth gateway unavailable: {message}",
    }
}

/// Capability to send and check one-time codes.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AuthGateway: Send + Sync {
    /// Dispatch a fresh code to `contact`.
    async fn send_code(&self, contact: &ContactNumber) -> Result<(), AuthGatewayError>;

    /// Check `code` for `contact`. `Ok(false)` means the code was wrong.
    async fn verify_code(
        &self,
        contact: &ContactNumber,
        code: &OtpCode,
    ) -> Result<bool, AuthGatewayError>;
}

/// In-process gateway that waits a fixed delay and never sends anything.
///
/// Verification is decided by the configured [`OtpAcceptance`] policy.
#[derive(Debug, Clone, Copy)]
pub struct FixtureAuthGateway {
    delay: Duration,
    acceptance: OtpAcceptance,
}

impl FixtureAuthGateway {
    /// Build a gateway with an explicit delay and policy.
    #[must_use]
    pub const fn new(delay: Duration, acceptance: OtpAcceptance) -> Self {
        Self { delay, acceptance }
    }

    /// Gateway that resolves immediately; handy in tests.
    #[must_use]
    pub const fn instant(acceptance: OtpAcceptance) -> Self {
        Self::new(Duration::ZERO, acceptance)
    }

    async fn simulate_latency(&self) {
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
    }
}

impl Default for FixtureAuthGateway {
    fn default() -> Self {
        Self::new(DEFAULT_GATEWAY_DELAY, OtpAcceptance::default())
    }
}

#[async_trait]
impl AuthGateway for FixtureAuthGateway {
    async fn send_code(&self, contact: &ContactNumber) -> Result<(), AuthGatewayError> {
        self.simulate_latency().await;
        info!(contact = %contact.masked(), "simulated one-time code dispatch");
        Ok(())
    }

    async fn verify_code(
        &self,
        contact: &ContactNumber,
        code: &OtpCode,
    ) -> Result<bool, AuthGatewayError> {
        self.simulate_latency().await;
        let accepted = self.acceptance.accepts(code);
        debug!(contact = %contact.masked(), accepted, policy = ?self.acceptance, "code checked");
        Ok(accepted)
    }
}
