//! Session flow handlers.
//!
//! ```text
//! GET  /api/v1/session
//! PUT  /api/v1/session/role    {"role":"agent"}
//! POST /api/v1/session/login   {"contact":"5551234567"}
//! POST /api/v1/session/verify  {"code":"123456"}
//! POST /api/v1/session/logout
//! ```
//!
//! Each handler loads the domain session from the cookie, applies one
//! service operation and stores the result back. Failed operations return
//! before the store, so the cookie keeps its previous state.

use actix_web::{HttpResponse, get, post, put, web};
use serde::{Deserialize, Serialize};
use serde_json::json;
use utoipa::ToSchema;

use crate::domain::navigation::{LANDING_PATH, NavigationShell};
use crate::domain::{
    ContactNumber, Error, INCORRECT_CODE_MESSAGE, LoginValidationError, OtpCode, Role, Session,
    SessionPhase, UnknownRole, User,
};
use crate::inbound::http::ApiResult;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;

/// Client-facing snapshot of the session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SessionView {
    pub phase: SessionPhase,
    pub user: Option<User>,
    pub selected_role: Option<Role>,
    /// Role screens should render for: the user's role once signed in.
    pub role: Option<Role>,
    #[schema(example = "5551234567")]
    pub pending_contact: Option<String>,
}

impl From<&Session> for SessionView {
    fn from(session: &Session) -> Self {
        Self {
            phase: session.phase(),
            user: session.current_user().cloned(),
            selected_role: session.selected_role(),
            role: session.effective_role(),
            pending_contact: session.pending_contact().map(|c| c.as_ref().to_owned()),
        }
    }
}

/// Body for `PUT /api/v1/session/role`.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RoleRequest {
    #[schema(example = "homeowner")]
    pub role: String,
}

/// Body for `POST /api/v1/session/login`.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    #[schema(example = "5551234567")]
    pub contact: String,
}

/// Body for `POST /api/v1/session/verify`.
#[derive(Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct VerifyOtpRequest {
    #[schema(example = "123456")]
    pub code: String,
}

/// Outcome of a verification attempt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct VerifyOtpResponse {
    pub verified: bool,
    /// Home path of the signed-in role; absent on failure.
    pub redirect: Option<String>,
    /// User-visible failure message; absent on success.
    pub message: Option<String>,
    pub session: SessionView,
}

/// Outcome of a logout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LogoutResponse {
    #[schema(example = "/")]
    pub redirect: String,
    pub session: SessionView,
}

fn map_role_error(err: UnknownRole) -> Error {
    Error::invalid_request(err.to_string())
        .with_details(json!({ "field": "role", "code": "unknown_role" }))
}

fn map_login_validation_error(err: LoginValidationError) -> Error {
    match err {
        LoginValidationError::EmptyContact => Error::invalid_request(err.to_string())
            .with_details(json!({ "field": "contact", "code": "empty_contact" })),
    }
}

/// Current session snapshot.
#[utoipa::path(
    get,
    path = "/api/v1/session",
    responses(
        (status = 200, description = "Session snapshot", body = SessionView),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["session"],
    operation_id = "getSession"
)]
#[get("/session")]
pub async fn current_session(session: SessionContext) -> web::Json<SessionView> {
    web::Json(SessionView::from(&session.load()))
}

/// Record the role chosen on the role selection screen.
#[utoipa::path(
    put,
    path = "/api/v1/session/role",
    request_body = RoleRequest,
    responses(
        (status = 200, description = "Role recorded", body = SessionView),
        (status = 400, description = "Unknown role", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["session"],
    operation_id = "setRole"
)]
#[put("/session/role")]
pub async fn set_role(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<RoleRequest>,
) -> ApiResult<web::Json<SessionView>> {
    let role: Role = payload.role.parse().map_err(map_role_error)?;
    let mut current = session.load();
    state.sessions.set_role(&mut current, role);
    session.store(&current)?;
    Ok(web::Json(SessionView::from(&current)))
}

/// Request a one-time code for a contact.
#[utoipa::path(
    post,
    path = "/api/v1/session/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Code requested", body = SessionView),
        (status = 400, description = "Invalid request", body = Error),
        (status = 503, description = "Code delivery unavailable", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["session"],
    operation_id = "login"
)]
#[post("/session/login")]
pub async fn login(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<LoginRequest>,
) -> ApiResult<web::Json<SessionView>> {
    let contact = ContactNumber::new(&payload.contact).map_err(map_login_validation_error)?;
    let mut current = session.load();
    state.sessions.login(&mut current, contact).await?;
    session.store(&current)?;
    Ok(web::Json(SessionView::from(&current)))
}

/// Submit the one-time code.
///
/// A wrong code is a normal outcome, reported with `verified: false` and a
/// message rather than an error status.
#[utoipa::path(
    post,
    path = "/api/v1/session/verify",
    request_body = VerifyOtpRequest,
    responses(
        (status = 200, description = "Verification outcome", body = VerifyOtpResponse),
        (status = 400, description = "No login pending", body = Error),
        (status = 503, description = "Verification unavailable", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["session"],
    operation_id = "verifyOtp"
)]
#[post("/session/verify")]
pub async fn verify_otp(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<VerifyOtpRequest>,
) -> ApiResult<web::Json<VerifyOtpResponse>> {
    let code = OtpCode::new(payload.into_inner().code);
    let mut current = session.load();
    let verified = state.sessions.verify_otp(&mut current, &code).await?;

    let response = if verified {
        session.renew();
        session.store(&current)?;
        VerifyOtpResponse {
            verified,
            redirect: NavigationShell::home_for(&current).map(str::to_owned),
            message: None,
            session: SessionView::from(&current),
        }
    } else {
        VerifyOtpResponse {
            verified,
            redirect: None,
            message: Some(INCORRECT_CODE_MESSAGE.to_owned()),
            session: SessionView::from(&current),
        }
    };
    Ok(web::Json(response))
}

/// Clear the session. Safe to call repeatedly.
#[utoipa::path(
    post,
    path = "/api/v1/session/logout",
    responses(
        (status = 200, description = "Session cleared", body = LogoutResponse),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["session"],
    operation_id = "logout"
)]
#[post("/session/logout")]
pub async fn logout(state: web::Data<HttpState>, session: SessionContext) -> HttpResponse {
    let mut current = session.load();
    state.sessions.logout(&mut current);
    session.purge();
    HttpResponse::Ok().json(LogoutResponse {
        redirect: LANDING_PATH.to_owned(),
        session: SessionView::from(&current),
    })
}

#[cfg(test)]
#[path = "sessions_tests.rs"]
mod tests;
