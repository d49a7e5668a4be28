//! Route authorization and navigation shell.
//!
//! The shell combines the static [`RouteTable`], the [`RouteGuard`] and the
//! role-specific bottom bar into one decision per client path. It reads the
//! role from the [`Session`] on every call and keeps no state of its own.

mod bottom_nav;
mod guard;
mod routes;

pub use bottom_nav::{NavItem, NavItemView, NavKey, bottom_nav, items_for};
pub use guard::{Access, GuardMode, LANDING_PATH, RouteGuard};
pub use routes::{Audience, RouteDefinition, RouteMatch, RouteTable, Screen};

use crate::domain::Session;

/// Everything a client needs to render a path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Navigation {
    /// The resolved route for the requested path.
    pub route: RouteMatch,
    /// Whether the route may render or where to go instead.
    pub access: Access,
    /// Bar items for the screen that will actually render.
    pub bottom_nav: Vec<NavItemView>,
}

/// Stateless navigation shell over a route table and guard.
#[derive(Debug, Clone, Copy, Default)]
pub struct NavigationShell {
    table: RouteTable,
    guard: RouteGuard,
}

impl NavigationShell {
    /// Shell over the standard route table with the given guard mode.
    #[must_use]
    pub const fn new(mode: GuardMode) -> Self {
        Self {
            table: RouteTable::standard(),
            guard: RouteGuard::new(mode),
        }
    }

    /// Route table used for resolution.
    #[must_use]
    pub const fn table(&self) -> &RouteTable {
        &self.table
    }

    /// Active guard mode.
    #[must_use]
    pub const fn guard_mode(&self) -> GuardMode {
        self.guard.mode()
    }

    /// Resolve `path`, check access and build the bottom bar.
    ///
    /// The bar uses the session's effective role, so a logged-out session
    /// gets an empty bar. On a redirect the active item follows the
    /// destination, since that is the screen the client ends up on.
    #[must_use]
    pub fn navigate(&self, path: &str, session: &Session) -> Navigation {
        let route = self.table.resolve(path);
        let access = self.guard.check(&route, session);
        let active_path = match &access {
            Access::Allow => route.path(),
            Access::Redirect { to } => to.as_str(),
        };
        let bottom_nav = bottom_nav(session.effective_role(), active_path);
        Navigation {
            route,
            access,
            bottom_nav,
        }
    }

    /// Where an authenticated session lands after verification.
    #[must_use]
    pub fn home_for(session: &Session) -> Option<&'static str> {
        session.current_user().map(|user| user.role().home_path())
    }
}

#[cfg(test)]
mod tests {
    //! Shell-level coverage combining routes, guard and bar.
    use super::*;
    use crate::domain::{ContactNumber, Role, User, UserDraft, UserId};
    use rstest::rstest;

    fn homeowner_session() -> Session {
        let contact = ContactNumber::new("5551234567").expect("contact");
        let user = User::try_from_draft(UserDraft {
            id: UserId::random().into(),
            name: "John Smith".to_owned(),
            email: "john.smith@example.com".to_owned(),
            phone: contact.as_ref().to_owned(),
            role: Role::Homeowner,
            avatar: None,
        })
        .expect("user");
        let mut session = Session::new();
        session.select_role(Role::Homeowner);
        session.begin_verification(contact);
        session.complete_verification(user);
        session
    }

    #[rstest]
    fn signed_in_homeowner_gets_screen_and_bar() {
        let shell = NavigationShell::default();
        let nav = shell.navigate("/properties/7/", &homeowner_session());

        assert_eq!(nav.route.screen(), Screen::PropertyDetail);
        assert_eq!(nav.route.path(), "/properties/7");
        assert!(nav.access.is_allowed());
        assert_eq!(nav.bottom_nav.len(), 5);
        assert!(
            nav.bottom_nav
                .iter()
                .any(|item| item.active && item.key == NavKey::Properties)
        );
    }

    #[rstest]
    fn logged_out_session_gets_empty_bar_and_landing_redirect() {
        let shell = NavigationShell::default();
        let mut session = homeowner_session();
        session.clear();

        let nav = shell.navigate("/dashboard", &session);

        assert!(nav.bottom_nav.is_empty());
        assert_eq!(
            nav.access,
            Access::Redirect {
                to: LANDING_PATH.to_owned()
            }
        );
    }

    #[rstest]
    fn cross_role_redirect_highlights_the_destination() {
        let shell = NavigationShell::default();

        let nav = shell.navigate("/agent/clients/7", &homeowner_session());

        assert_eq!(nav.route.screen(), Screen::AgentClientDetail);
        assert_eq!(
            nav.access,
            Access::Redirect {
                to: "/dashboard".to_owned()
            }
        );
        let active: Vec<NavKey> = nav
            .bottom_nav
            .iter()
            .filter(|item| item.active)
            .map(|item| item.key)
            .collect();
        assert_eq!(active, vec![NavKey::Home]);
    }

    #[rstest]
    fn selected_role_drives_bar_before_login() {
        let shell = NavigationShell::new(GuardMode::Permissive);
        let mut session = Session::new();
        session.select_role(Role::Agent);

        let nav = shell.navigate("/agent/dashboard", &session);

        assert!(nav.access.is_allowed());
        assert_eq!(nav.bottom_nav.first().map(|item| item.path), Some("/agent/dashboard"));
    }

    #[rstest]
    fn home_follows_the_authenticated_role() {
        assert_eq!(NavigationShell::home_for(&homeowner_session()), Some("/dashboard"));
        assert_eq!(NavigationShell::home_for(&Session::new()), None);
    }
}
