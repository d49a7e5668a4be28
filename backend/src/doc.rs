//! OpenAPI documentation for the shell API.
//!
//! [`ApiDoc`] registers the session, navigation and health endpoints plus the
//! session cookie security scheme. Swagger UI serves it in debug builds.

use utoipa::openapi::security::{ApiKey, ApiKeyValue, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::domain::navigation::{
    Access, Audience, GuardMode, NavItemView, NavKey, RouteDefinition, Screen,
};
use crate::domain::{Error, ErrorCode, Role, SessionPhase, User};
use crate::inbound::http::navigation::{NavigationView, RouteTableView};
use crate::inbound::http::sessions::{
    LoginRequest, LogoutResponse, RoleRequest, SessionView, VerifyOtpRequest, VerifyOtpResponse,
};

/// Adds the session cookie security scheme.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi
            .components
            .get_or_insert_with(utoipa::openapi::Components::default);

        components.add_security_scheme(
            "SessionCookie",
            SecurityScheme::ApiKey(ApiKey::Cookie(ApiKeyValue::with_description(
                "session",
                "Encrypted session cookie carrying role and sign-in state.",
            ))),
        );
    }
}

/// OpenAPI document for the shell API.
#[derive(OpenApi)]
#[openapi(
    modifiers(&SecurityAddon),
    info(
        title = "Homestead shell API",
        description = "Role selection, one-time code sign-in and role-aware navigation."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    security(("SessionCookie" = [])),
    paths(
        crate::inbound::http::sessions::current_session,
        crate::inbound::http::sessions::set_role,
        crate::inbound::http::sessions::login,
        crate::inbound::http::sessions::verify_otp,
        crate::inbound::http::sessions::logout,
        crate::inbound::http::navigation::navigate,
        crate::inbound::http::navigation::list_routes,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        Error,
        ErrorCode,
        Role,
        User,
        SessionPhase,
        SessionView,
        RoleRequest,
        LoginRequest,
        VerifyOtpRequest,
        VerifyOtpResponse,
        LogoutResponse,
        Screen,
        Audience,
        Access,
        GuardMode,
        NavKey,
        NavItemView,
        RouteDefinition,
        NavigationView,
        RouteTableView,
    )),
    tags(
        (name = "session", description = "Role selection and sign-in flow"),
        (name = "navigation", description = "Route resolution and bottom navigation"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;
