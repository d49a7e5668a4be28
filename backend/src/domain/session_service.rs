//! Session use-cases: role selection, code login, verification and logout.
//!
//! The service is stateless. Callers pass the client's [`Session`] in and the
//! service mutates it only once every awaited collaborator has succeeded, so
//! a failed call never leaves a half-updated session behind.

use std::sync::Arc;

use serde_json::json;
use tracing::{info, instrument, warn};

use crate::domain::ports::{
    AuthGateway, AuthGatewayError, FixtureAuthGateway, FixtureProfileDirectory, ProfileDirectory,
    ProfileDirectoryError,
};
use crate::domain::{ContactNumber, Error, OtpCode, Role, Session};

/// User-visible message for a rejected code.
pub const INCORRECT_CODE_MESSAGE: &str = "incorrect code, try again";

/// Orchestrates the session flow over the auth gateway and profile ports.
#[derive(Clone)]
pub struct SessionService {
    gateway: Arc<dyn AuthGateway>,
    profiles: Arc<dyn ProfileDirectory>,
}

impl SessionService {
    /// Build a service over explicit ports.
    pub fn new(gateway: Arc<dyn AuthGateway>, profiles: Arc<dyn ProfileDirectory>) -> Self {
        Self { gateway, profiles }
    }

    /// Build a service over the in-process fixtures.
    #[must_use]
    pub fn with_fixtures(gateway: FixtureAuthGateway) -> Self {
        Self::new(Arc::new(gateway), Arc::new(FixtureProfileDirectory))
    }

    /// Record the role chosen before authentication. Always succeeds.
    pub fn set_role(&self, session: &mut Session, role: Role) {
        session.select_role(role);
        info!(%role, phase = ?session.phase(), "role selected");
    }

    /// Ask the gateway to send a code to `contact` and mark it pending.
    ///
    /// A repeated call replaces the pending contact, which is how callers
    /// retry delivery.
    ///
    /// # Errors
    /// - `invalid_request` when no role is selected or the session is
    ///   already authenticated.
    /// - `service_unavailable` when the gateway fails; the session is left
    ///   unchanged.
    #[instrument(skip_all, fields(contact = %contact.masked()))]
    pub async fn login(&self, session: &mut Session, contact: ContactNumber) -> Result<(), Error> {
        if session.is_authenticated() {
            return Err(already_authenticated());
        }
        let Some(role) = session.selected_role() else {
            return Err(role_not_selected());
        };

        self.gateway
            .send_code(&contact)
            .await
            .map_err(map_gateway_error)?;

        session.begin_verification(contact);
        info!(%role, "verification code requested");
        Ok(())
    }

    /// Check `code` against the pending contact.
    ///
    /// Returns `Ok(true)` and stores the user record when the gateway accepts
    /// the code, `Ok(false)` with the session untouched otherwise. There is
    /// no attempt limit.
    ///
    /// # Errors
    /// - `invalid_request` when no login is pending or the session is
    ///   already authenticated.
    /// - `service_unavailable` or `internal_error` when a port fails; the
    ///   session is left unchanged.
    #[instrument(skip_all)]
    pub async fn verify_otp(&self, session: &mut Session, code: &OtpCode) -> Result<bool, Error> {
        if session.is_authenticated() {
            return Err(already_authenticated());
        }
        let Some(contact) = session.pending_contact().cloned() else {
            return Err(no_pending_login());
        };
        let Some(role) = session.selected_role() else {
            return Err(role_not_selected());
        };

        let accepted = self
            .gateway
            .verify_code(&contact, code)
            .await
            .map_err(map_gateway_error)?;
        if !accepted {
            warn!(contact = %contact.masked(), "verification code rejected");
            return Ok(false);
        }

        let user = self
            .profiles
            .profile_for(&contact, role)
            .await
            .map_err(map_profile_error)?;
        info!(user_id = %user.id(), %role, "session authenticated");
        session.complete_verification(user);
        Ok(true)
    }

    /// Clear the session. Idempotent.
    pub fn logout(&self, session: &mut Session) {
        let was_authenticated = session.is_authenticated();
        session.clear();
        info!(was_authenticated, "session cleared");
    }
}

fn role_not_selected() -> Error {
    Error::invalid_request("select a role before logging in")
        .with_details(json!({ "field": "role", "code": "role_not_selected" }))
}

fn already_authenticated() -> Error {
    Error::invalid_request("session is already authenticated; log out first")
        .with_details(json!({ "code": "already_authenticated" }))
}

fn no_pending_login() -> Error {
    Error::invalid_request("request a verification code before verifying")
        .with_details(json!({ "code": "no_pending_login" }))
}

fn map_gateway_error(err: AuthGatewayError) -> Error {
    warn!(error = %err, "auth gateway failure");
    match err {
        AuthGatewayError::Delivery { .. } => {
            Error::service_unavailable("could not send the verification code")
        }
        AuthGatewayError::Unavailable { .. } => {
            Error::service_unavailable("verification service is unavailable")
        }
    }
}

fn map_profile_error(err: ProfileDirectoryError) -> Error {
    Error::internal(format!("failed to load profile: {err}"))
}

#[cfg(test)]
#[path = "session_service_tests.rs"]
mod tests;
