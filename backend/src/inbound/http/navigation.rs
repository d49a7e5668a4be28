//! Navigation shell handlers.
//!
//! ```text
//! GET /api/v1/navigation?path=/agent/clients/42
//! GET /api/v1/routes
//! ```

use std::collections::BTreeMap;

use actix_web::{get, web};
use serde::{Deserialize, Serialize};
use tracing::debug;
use utoipa::{IntoParams, ToSchema};

use crate::domain::navigation::{
    Access, Audience, GuardMode, NavItemView, Navigation, RouteDefinition, Screen,
};
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;

/// Query for `GET /api/v1/navigation`.
#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct NavigationQuery {
    /// Client path to resolve; query and fragment are ignored.
    #[param(example = "/properties/42")]
    pub path: String,
}

/// What the client should render for a path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct NavigationView {
    /// Normalised path.
    #[schema(example = "/properties/42")]
    pub path: String,
    pub screen: Screen,
    pub audience: Audience,
    /// Captured `:name` segments, e.g. `propertyId`.
    pub params: BTreeMap<String, String>,
    pub access: Access,
    pub bottom_nav: Vec<NavItemView>,
}

impl From<Navigation> for NavigationView {
    fn from(nav: Navigation) -> Self {
        let Navigation {
            route,
            access,
            bottom_nav,
        } = nav;
        Self {
            path: route.path().to_owned(),
            screen: route.screen(),
            audience: route.audience(),
            params: route.params().clone(),
            access,
            bottom_nav,
        }
    }
}

/// The declared route table.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RouteTableView {
    pub guard_mode: GuardMode,
    pub routes: Vec<RouteDefinition>,
}

/// Resolve a path for the current session.
///
/// Always answers 200: unknown paths resolve to the not-found screen and
/// disallowed paths carry a redirect in `access`.
#[utoipa::path(
    get,
    path = "/api/v1/navigation",
    params(NavigationQuery),
    responses(
        (status = 200, description = "Screen, access decision and bottom bar", body = NavigationView),
        (status = 400, description = "Missing path", body = crate::domain::Error)
    ),
    tags = ["navigation"],
    operation_id = "navigate"
)]
#[get("/navigation")]
pub async fn navigate(
    state: web::Data<HttpState>,
    session: SessionContext,
    query: web::Query<NavigationQuery>,
) -> web::Json<NavigationView> {
    let current = session.load();
    let nav = state.shell.navigate(&query.path, &current);
    debug!(
        path = nav.route.path(),
        screen = ?nav.route.screen(),
        access = ?nav.access,
        "navigation resolved"
    );
    web::Json(NavigationView::from(nav))
}

/// List the route table and the active guard mode.
#[utoipa::path(
    get,
    path = "/api/v1/routes",
    responses(
        (status = 200, description = "Declared routes in match order", body = RouteTableView)
    ),
    tags = ["navigation"],
    operation_id = "listRoutes"
)]
#[get("/routes")]
pub async fn list_routes(state: web::Data<HttpState>) -> web::Json<RouteTableView> {
    web::Json(RouteTableView {
        guard_mode: state.shell.guard_mode(),
        routes: state.shell.table().definitions().to_vec(),
    })
}
