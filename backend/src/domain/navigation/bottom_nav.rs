//! Role-specific bottom navigation bar.

use serde::Serialize;
use utoipa::ToSchema;

use crate::domain::Role;

/// Identifier of a navigation shortcut.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum NavKey {
    /// The role's dashboard.
    Home,
    /// Property list.
    Properties,
    /// Agent client list.
    Clients,
    /// Homeowner capture screen.
    Capture,
    /// Notifications.
    Alerts,
    /// Profile screen.
    Profile,
}

/// A fixed bar entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NavItem {
    /// Stable identifier.
    pub key: NavKey,
    /// Text shown under the icon.
    pub label: &'static str,
    /// Destination path.
    pub path: &'static str,
}

impl NavItem {
    const fn new(key: NavKey, label: &'static str, path: &'static str) -> Self {
        Self { key, label, path }
    }

    /// Whether this item owns `path`: an exact match or a segment prefix,
    /// so `/properties` stays active on `/properties/42`.
    #[must_use]
    pub fn is_active_for(&self, path: &str) -> bool {
        path.strip_prefix(self.path)
            .is_some_and(|rest| rest.is_empty() || rest.starts_with('/'))
    }
}

const HOMEOWNER_ITEMS: [NavItem; 5] = [
    NavItem::new(NavKey::Home, "Home", "/dashboard"),
    NavItem::new(NavKey::Properties, "Properties", "/properties"),
    NavItem::new(NavKey::Capture, "Capture", "/capture"),
    NavItem::new(NavKey::Alerts, "Alerts", "/notifications"),
    NavItem::new(NavKey::Profile, "Profile", "/profile"),
];

const AGENT_ITEMS: [NavItem; 5] = [
    NavItem::new(NavKey::Home, "Home", "/agent/dashboard"),
    NavItem::new(NavKey::Clients, "Clients", "/agent/clients"),
    NavItem::new(NavKey::Properties, "Properties", "/agent/properties"),
    NavItem::new(NavKey::Alerts, "Alerts", "/agent/notifications"),
    NavItem::new(NavKey::Profile, "Profile", "/agent/profile"),
];

/// The fixed item list for `role`.
#[must_use]
pub const fn items_for(role: Role) -> &'static [NavItem] {
    match role {
        Role::Homeowner => &HOMEOWNER_ITEMS,
        Role::Agent => &AGENT_ITEMS,
    }
}

/// Rendered bar entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct NavItemView {
    pub key: NavKey,
    #[schema(value_type = String, example = "Home")]
    pub label: &'static str,
    #[schema(value_type = String, example = "/dashboard")]
    pub path: &'static str,
    /// Whether this item owns the current path.
    pub active: bool,
}

/// Render the bar for `role` with the item owning `path` marked active.
///
/// `path` is expected in normalised form. With no role the bar is empty.
///
/// # Examples
///
/// ```
/// use homestead::domain::Role;
/// use homestead::domain::navigation::{NavKey, bottom_nav};
///
/// let bar = bottom_nav(Some(Role::Agent), "/agent/clients/7");
/// let active: Vec<_> = bar.iter().filter(|item| item.active).map(|item| item.key).collect();
/// assert_eq!(active, vec![NavKey::Clients]);
/// assert!(bottom_nav(None, "/dashboard").is_empty());
/// ```
#[must_use]
pub fn bottom_nav(role: Option<Role>, path: &str) -> Vec<NavItemView> {
    role.map(items_for)
        .unwrap_or_default()
        .iter()
        .map(|item| NavItemView {
            key: item.key,
            label: item.label,
            path: item.path,
            active: item.is_active_for(path),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    //! Bottom navigation coverage.
    use super::*;
    use rstest::rstest;

    fn keys(role: Role) -> Vec<NavKey> {
        items_for(role).iter().map(|item| item.key).collect()
    }

    #[rstest]
    fn homeowner_bar_has_five_fixed_items() {
        assert_eq!(
            keys(Role::Homeowner),
            vec![
                NavKey::Home,
                NavKey::Properties,
                NavKey::Capture,
                NavKey::Alerts,
                NavKey::Profile
            ]
        );
    }

    #[rstest]
    fn agent_bar_has_five_fixed_items() {
        assert_eq!(
            keys(Role::Agent),
            vec![
                NavKey::Home,
                NavKey::Clients,
                NavKey::Properties,
                NavKey::Alerts,
                NavKey::Profile
            ]
        );
    }

    #[rstest]
    #[case(Role::Homeowner, "/dashboard", Some(NavKey::Home))]
    #[case(Role::Homeowner, "/properties/12", Some(NavKey::Properties))]
    #[case(Role::Homeowner, "/notifications", Some(NavKey::Alerts))]
    #[case(Role::Homeowner, "/checklist", None)]
    #[case(Role::Homeowner, "/propertiesx", None)]
    #[case(Role::Agent, "/agent/clients/4", Some(NavKey::Clients))]
    #[case(Role::Agent, "/agent/profile", Some(NavKey::Profile))]
    #[case(Role::Agent, "/dashboard", None)]
    fn at_most_one_item_is_active(
        #[case] role: Role,
        #[case] path: &str,
        #[case] expected: Option<NavKey>,
    ) {
        let active: Vec<NavKey> = bottom_nav(Some(role), path)
            .into_iter()
            .filter(|item| item.active)
            .map(|item| item.key)
            .collect();
        assert_eq!(active, expected.into_iter().collect::<Vec<_>>());
    }

    #[rstest]
    fn no_role_renders_an_empty_bar() {
        assert!(bottom_nav(None, "/").is_empty());
    }

    #[rstest]
    fn item_views_serialise_in_camel_case() {
        let bar = bottom_nav(Some(Role::Homeowner), "/capture");
        let value = serde_json::to_value(&bar[2]).expect("serialise");
        assert_eq!(
            value,
            serde_json::json!({
                "key": "capture",
                "label": "Capture",
                "path": "/capture",
                "active": true
            })
        );
    }
}
