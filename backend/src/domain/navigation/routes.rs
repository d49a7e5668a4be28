//! Static route table mapping client paths to screens.
//!
//! The table is declarative: every screen the shell can render is listed
//! once with the audience allowed to see it. Patterns use `:name` segments
//! for identifiers, and any path that matches nothing resolves to
//! [`Screen::NotFound`].

use std::collections::BTreeMap;

use serde::Serialize;
use utoipa::ToSchema;

use crate::domain::Role;

/// Screens the shell can render.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum Screen {
    /// Public landing page.
    Landing,
    /// Homeowner or agent picker.
    RoleSelection,
    /// Contact entry.
    Login,
    /// One-time code entry.
    VerifyOtp,
    /// Homeowner home.
    HomeownerDashboard,
    /// Homeowner property list.
    Properties,
    /// One property, keyed by `propertyId`.
    PropertyDetail,
    /// Photo and document capture.
    Capture,
    /// Homeowner profile.
    Profile,
    /// Homeowner alerts.
    Notifications,
    /// Documentation checklist.
    Checklist,
    /// Home inventory.
    Inventory,
    /// Agent home.
    AgentDashboard,
    /// Agent client list.
    AgentClients,
    /// One client, keyed by `clientId`.
    AgentClientDetail,
    /// Properties across the agent's clients.
    AgentProperties,
    /// Agent profile.
    AgentProfile,
    /// Agent alerts.
    AgentNotifications,
    /// Fallback for unmatched paths.
    NotFound,
}

/// Who may open a route.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum Audience {
    /// Landing, auth screens and the not-found fallback.
    Public,
    /// The homeowner subtree.
    Homeowner,
    /// The agent subtree under `/agent`.
    Agent,
}

impl Audience {
    /// Role required to open the route, if any.
    #[must_use]
    pub const fn required_role(self) -> Option<Role> {
        match self {
            Self::Public => None,
            Self::Homeowner => Some(Role::Homeowner),
            Self::Agent => Some(Role::Agent),
        }
    }
}

/// One row of the route table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RouteDefinition {
    /// Path pattern such as `/agent/clients/:clientId`.
    #[schema(value_type = String)]
    pub pattern: &'static str,
    pub screen: Screen,
    pub audience: Audience,
}

impl RouteDefinition {
    const fn new(pattern: &'static str, screen: Screen, audience: Audience) -> Self {
        Self {
            pattern,
            screen,
            audience,
        }
    }

    /// Match normalised `segments` against this pattern, capturing params.
    fn capture(&self, segments: &[&str]) -> Option<BTreeMap<String, String>> {
        let pattern: Vec<&str> = split_segments(self.pattern).collect();
        if pattern.len() != segments.len() {
            return None;
        }

        let mut params = BTreeMap::new();
        for (expected, actual) in pattern.iter().zip(segments) {
            match expected.strip_prefix(':') {
                Some(name) => {
                    params.insert(name.to_owned(), (*actual).to_owned());
                }
                None if expected == actual => {}
                None => return None,
            }
        }
        Some(params)
    }
}

const STANDARD_ROUTES: &[RouteDefinition] = &[
    RouteDefinition::new("/", Screen::Landing, Audience::Public),
    RouteDefinition::new("/auth/role", Screen::RoleSelection, Audience::Public),
    RouteDefinition::new("/auth/login", Screen::Login, Audience::Public),
    RouteDefinition::new("/auth/verify", Screen::VerifyOtp, Audience::Public),
    RouteDefinition::new("/dashboard", Screen::HomeownerDashboard, Audience::Homeowner),
    RouteDefinition::new("/properties", Screen::Properties, Audience::Homeowner),
    RouteDefinition::new(
        "/properties/:propertyId",
        Screen::PropertyDetail,
        Audience::Homeowner,
    ),
    RouteDefinition::new("/capture", Screen::Capture, Audience::Homeowner),
    RouteDefinition::new("/profile", Screen::Profile, Audience::Homeowner),
    RouteDefinition::new("/notifications", Screen::Notifications, Audience::Homeowner),
    RouteDefinition::new("/checklist", Screen::Checklist, Audience::Homeowner),
    RouteDefinition::new("/inventory", Screen::Inventory, Audience::Homeowner),
    RouteDefinition::new("/agent/dashboard", Screen::AgentDashboard, Audience::Agent),
    RouteDefinition::new("/agent/clients", Screen::AgentClients, Audience::Agent),
    RouteDefinition::new(
        "/agent/clients/:clientId",
        Screen::AgentClientDetail,
        Audience::Agent,
    ),
    RouteDefinition::new("/agent/properties", Screen::AgentProperties, Audience::Agent),
    RouteDefinition::new("/agent/profile", Screen::AgentProfile, Audience::Agent),
    RouteDefinition::new(
        "/agent/notifications",
        Screen::AgentNotifications,
        Audience::Agent,
    ),
];

/// Result of resolving a path against the table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteMatch {
    path: String,
    screen: Screen,
    audience: Audience,
    params: BTreeMap<String, String>,
}

impl RouteMatch {
    /// Normalised path that was resolved.
    #[must_use]
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Screen to render.
    #[must_use]
    pub fn screen(&self) -> Screen {
        self.screen
    }

    /// Audience of the matched route.
    #[must_use]
    pub fn audience(&self) -> Audience {
        self.audience
    }

    /// Captured `:name` parameters.
    #[must_use]
    pub fn params(&self) -> &BTreeMap<String, String> {
        &self.params
    }

    /// Whether the path fell through to the not-found screen.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        self.screen == Screen::NotFound
    }
}

/// Ordered route table. The first matching row wins.
#[derive(Debug, Clone, Copy)]
pub struct RouteTable {
    routes: &'static [RouteDefinition],
}

impl RouteTable {
    /// The application's route table.
    #[must_use]
    pub const fn standard() -> Self {
        Self {
            routes: STANDARD_ROUTES,
        }
    }

    /// All declared routes in match order.
    #[must_use]
    pub fn definitions(&self) -> &'static [RouteDefinition] {
        self.routes
    }

    /// Resolve a client path, ignoring query, fragment and trailing slash.
    ///
    /// # Examples
    ///
    /// ```
    /// use homestead::domain::navigation::{RouteTable, Screen};
    ///
    /// let table = RouteTable::standard();
    /// let found = table.resolve("/agent/clients/42/?tab=docs");
    /// assert_eq!(found.screen(), Screen::AgentClientDetail);
    /// assert_eq!(found.params().get("clientId").map(String::as_str), Some("42"));
    /// ```
    #[must_use]
    pub fn resolve(&self, raw: &str) -> RouteMatch {
        let segments: Vec<&str> = split_segments(strip_query(raw)).collect();
        let path = join_segments(&segments);

        self.routes
            .iter()
            .find_map(|route| {
                route.capture(&segments).map(|params| RouteMatch {
                    path: path.clone(),
                    screen: route.screen,
                    audience: route.audience,
                    params,
                })
            })
            .unwrap_or_else(|| RouteMatch {
                path,
                screen: Screen::NotFound,
                audience: Audience::Public,
                params: BTreeMap::new(),
            })
    }
}

impl Default for RouteTable {
    fn default() -> Self {
        Self::standard()
    }
}

fn strip_query(raw: &str) -> &str {
    raw.split(['?', '#']).next().unwrap_or_default().trim()
}

fn split_segments(path: &str) -> impl Iterator<Item = &str> {
    path.split('/').filter(|segment| !segment.is_empty())
}

fn join_segments(segments: &[&str]) -> String {
    format!("/{}", segments.join("/"))
}

#[cfg(test)]
mod tests {
    //! Route resolution coverage.
    use super::*;
    use rstest::{fixture, rstest};

    #[fixture]
    fn table() -> RouteTable {
        RouteTable::standard()
    }

    #[rstest]
    #[case("/", Screen::Landing, Audience::Public)]
    #[case("/auth/role", Screen::RoleSelection, Audience::Public)]
    #[case("/auth/login", Screen::Login, Audience::Public)]
    #[case("/auth/verify", Screen::VerifyOtp, Audience::Public)]
    #[case("/dashboard", Screen::HomeownerDashboard, Audience::Homeowner)]
    #[case("/properties", Screen::Properties, Audience::Homeowner)]
    #[case("/capture", Screen::Capture, Audience::Homeowner)]
    #[case("/profile", Screen::Profile, Audience::Homeowner)]
    #[case("/notifications", Screen::Notifications, Audience::Homeowner)]
    #[case("/checklist", Screen::Checklist, Audience::Homeowner)]
    #[case("/inventory", Screen::Inventory, Audience::Homeowner)]
    #[case("/agent/dashboard", Screen::AgentDashboard, Audience::Agent)]
    #[case("/agent/clients", Screen::AgentClients, Audience::Agent)]
    #[case("/agent/properties", Screen::AgentProperties, Audience::Agent)]
    #[case("/agent/profile", Screen::AgentProfile, Audience::Agent)]
    #[case("/agent/notifications", Screen::AgentNotifications, Audience::Agent)]
    fn static_paths_resolve(
        table: RouteTable,
        #[case] path: &str,
        #[case] screen: Screen,
        #[case] audience: Audience,
    ) {
        let found = table.resolve(path);
        assert_eq!(found.screen(), screen);
        assert_eq!(found.audience(), audience);
        assert!(found.params().is_empty());
    }

    #[rstest]
    #[case("/properties/p-17", Screen::PropertyDetail, "propertyId", "p-17")]
    #[case("/agent/clients/42", Screen::AgentClientDetail, "clientId", "42")]
    fn parameterised_paths_capture_identifiers(
        table: RouteTable,
        #[case] path: &str,
        #[case] screen: Screen,
        #[case] name: &str,
        #[case] value: &str,
    ) {
        let found = table.resolve(path);
        assert_eq!(found.screen(), screen);
        assert_eq!(found.params().get(name).map(String::as_str), Some(value));
    }

    #[rstest]
    #[case("/dashboard/", "/dashboard")]
    #[case("/dashboard?tab=claims", "/dashboard")]
    #[case("/agent//clients#top", "/agent/clients")]
    #[case("", "/")]
    #[case("  /capture  ", "/capture")]
    fn paths_are_normalised_before_matching(
        table: RouteTable,
        #[case] raw: &str,
        #[case] expected: &str,
    ) {
        let found = table.resolve(raw);
        assert_eq!(found.path(), expected);
        assert!(!found.is_not_found());
    }

    #[rstest]
    #[case("/agent")]
    #[case("/admin")]
    #[case("/properties/1/photos")]
    #[case("/agent/dashboard/extra")]
    fn unknown_paths_fall_through_to_not_found(table: RouteTable, #[case] path: &str) {
        let found = table.resolve(path);
        assert!(found.is_not_found());
        assert_eq!(found.audience(), Audience::Public);
    }

    #[rstest]
    fn every_restricted_route_lives_in_its_role_subtree(table: RouteTable) {
        for route in table.definitions() {
            match route.audience.required_role() {
                Some(Role::Agent) => assert!(route.pattern.starts_with("/agent/")),
                Some(Role::Homeowner) => assert!(!route.pattern.starts_with("/agent")),
                None => assert!(route.pattern == "/" || route.pattern.starts_with("/auth/")),
            }
        }
    }

    #[rstest]
    #[case(Role::Homeowner)]
    #[case(Role::Agent)]
    fn home_paths_are_routes_for_their_role(table: RouteTable, #[case] role: Role) {
        let found = table.resolve(role.home_path());
        assert_eq!(found.audience().required_role(), Some(role));
    }
}
