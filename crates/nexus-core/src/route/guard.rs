//! Navigation guard.

use tracing::debug;

use crate::traits::AuthState;

use super::table::RouteMatch;

/// Outcome of a guarded navigation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Navigation {
    /// The target may be shown.
    Allowed(RouteMatch),
    /// The target needs a session; go to the login route instead.
    Redirected(&'static str),
}

impl Navigation {
    pub fn is_allowed(&self) -> bool {
        matches!(self, Navigation::Allowed(_))
    }

    /// The path the navigation ends on.
    pub fn destination(&self) -> &str {
        match self {
            Navigation::Allowed(target) => &target.path,
            Navigation::Redirected(login) => login,
        }
    }
}

/// Runs before every route transition.
///
/// A route that requires a session is redirected to the login route while no
/// user is logged in; every other navigation is allowed. The check is pure:
/// calling it twice with the same inputs gives the same answer.
#[derive(Debug, Clone, Copy)]
pub struct NavigationGuard {
    login_route: &'static str,
}

impl NavigationGuard {
    pub const fn new(login_route: &'static str) -> Self {
        Self { login_route }
    }

    pub fn check(&self, target: RouteMatch, auth: &dyn AuthState) -> Navigation {
        if target.requires_auth && !auth.is_logged_in() {
            debug!(path = %target.path, to = self.login_route, "Redirecting unauthenticated navigation");
            Navigation::Redirected(self.login_route)
        } else {
            Navigation::Allowed(target)
        }
    }
}
