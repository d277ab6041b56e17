//! Route definitions, the domain layer of the router.
//!
//! Pure logic with no DOM or web_sys dependency, so the access rules run
//! the same on the host as in the browser.

use std::fmt::Display;

use reserva_shared::SessionUser;

/// Application routes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AppRoute {
    /// Landing page, open to everyone.
    #[default]
    Home,
    Login,
    /// Facility catalog.
    Facilities,
    /// Slot browser and booking form.
    Slots,
    /// The signed-in user's own bookings.
    MyReservations,
    /// Cross-user booking management, admin only.
    AdminReservations,
}

/// Outcome of the access check for one navigation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteAccess {
    Allow,
    /// Anonymous visitor on a protected route.
    RedirectLogin,
    /// Signed in, but the route needs the admin role.
    RedirectHome,
}

impl AppRoute {
    /// Parses a URL path. `None` is an unknown path; the router lands
    /// those on home with a history replace.
    pub fn parse(path: &str) -> Option<Self> {
        match path {
            "/" => Some(Self::Home),
            "/login" => Some(Self::Login),
            "/facilities" => Some(Self::Facilities),
            "/slots" => Some(Self::Slots),
            "/my" => Some(Self::MyReservations),
            "/admin/reservations" => Some(Self::AdminReservations),
            _ => None,
        }
    }

    pub fn to_path(&self) -> &'static str {
        match self {
            Self::Home => "/",
            Self::Login => "/login",
            Self::Facilities => "/facilities",
            Self::Slots => "/slots",
            Self::MyReservations => "/my",
            Self::AdminReservations => "/admin/reservations",
        }
    }

    /// Core guard rule: does this route need a session at all?
    pub fn requires_auth(&self) -> bool {
        !matches!(self, Self::Home | Self::Login)
    }

    /// Routes reserved for the admin role.
    pub fn requires_admin(&self) -> bool {
        matches!(self, Self::AdminReservations)
    }

    /// Signed-in users should leave this route (the login page).
    pub fn should_redirect_when_authenticated(&self) -> bool {
        matches!(self, Self::Login)
    }

    /// Redirect target when the guard rejects an anonymous visitor.
    pub fn auth_failure_redirect() -> Self {
        Self::Login
    }

    /// Redirect target after a successful sign-in.
    pub fn auth_success_redirect() -> Self {
        Self::Facilities
    }

    /// Access decision for this route under the given session. Evaluated
    /// fresh on every navigation; the result is never cached.
    pub fn evaluate_guard(&self, session: Option<&SessionUser>) -> RouteAccess {
        match session {
            None if self.requires_auth() => RouteAccess::RedirectLogin,
            Some(user) if self.requires_admin() && !user.is_admin() => RouteAccess::RedirectHome,
            _ => RouteAccess::Allow,
        }
    }
}

impl Display for AppRoute {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_path())
    }
}

#[cfg(test)]
mod tests {
    use reserva_shared::Role;

    use super::*;

    fn user(rol: Role) -> SessionUser {
        SessionUser {
            id: 7,
            nombre: "Ana".to_string(),
            rol,
        }
    }

    #[test]
    fn known_paths_round_trip() {
        for route in [
            AppRoute::Home,
            AppRoute::Login,
            AppRoute::Facilities,
            AppRoute::Slots,
            AppRoute::MyReservations,
            AppRoute::AdminReservations,
        ] {
            assert_eq!(AppRoute::parse(route.to_path()), Some(route));
        }
    }

    #[test]
    fn unknown_paths_do_not_parse() {
        assert_eq!(AppRoute::parse("/nope"), None);
        assert_eq!(AppRoute::parse("/admin"), None);
        assert_eq!(AppRoute::parse(""), None);
    }

    #[test]
    fn home_and_login_are_public() {
        assert!(!AppRoute::Home.requires_auth());
        assert!(!AppRoute::Login.requires_auth());
        assert!(AppRoute::Facilities.requires_auth());
        assert!(AppRoute::Slots.requires_auth());
        assert!(AppRoute::MyReservations.requires_auth());
        assert!(AppRoute::AdminReservations.requires_auth());
    }

    #[test]
    fn anonymous_visitor_is_sent_to_login() {
        assert_eq!(
            AppRoute::MyReservations.evaluate_guard(None),
            RouteAccess::RedirectLogin
        );
        assert_eq!(AppRoute::Home.evaluate_guard(None), RouteAccess::Allow);
    }

    #[test]
    fn client_is_kept_out_of_the_admin_area() {
        let cliente = user(Role::Cliente);
        assert_eq!(
            AppRoute::AdminReservations.evaluate_guard(Some(&cliente)),
            RouteAccess::RedirectHome
        );
        assert_eq!(
            AppRoute::MyReservations.evaluate_guard(Some(&cliente)),
            RouteAccess::Allow
        );
    }

    #[test]
    fn admin_passes_the_admin_guard() {
        let admin = user(Role::Admin);
        assert_eq!(
            AppRoute::AdminReservations.evaluate_guard(Some(&admin)),
            RouteAccess::Allow
        );
    }

    #[test]
    fn login_page_bounces_authenticated_users() {
        assert!(AppRoute::Login.should_redirect_when_authenticated());
        assert!(!AppRoute::Facilities.should_redirect_when_authenticated());
        assert_eq!(AppRoute::auth_success_redirect(), AppRoute::Facilities);
        assert_eq!(AppRoute::auth_failure_redirect(), AppRoute::Login);
    }
}
