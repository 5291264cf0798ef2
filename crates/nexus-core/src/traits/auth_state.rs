//! Read-only view of the session used by the navigation guard.

/// Anything that can answer whether a user is logged in.
pub trait AuthState {
    /// True while an access token is held.
    fn is_logged_in(&self) -> bool;
}

impl AuthState for bool {
    fn is_logged_in(&self) -> bool {
        *self
    }
}
