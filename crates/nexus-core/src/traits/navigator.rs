//! Navigation sink trait.

/// Receives the route transitions the session layer performs.
///
/// The session store navigates home after login and to the login route after
/// logout; the HTTP client navigates to the login route when a 401 forces
/// the session out.
pub trait Navigator: Send + Sync {
    /// Move to `path`.
    fn navigate(&self, path: &str);
}
