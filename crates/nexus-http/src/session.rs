//! Login, registration and logout on top of the shared session.

use serde_json::Value;
use tracing::{debug, info, instrument, warn};

use nexus_core::error::{AuthError, InvalidInputError};
use nexus_core::{Credentials, Navigation, Registration, Result, RouteTable, SessionState};

use crate::api;
use crate::client::ApiClient;

/// Session lifecycle for one application.
///
/// Owns nothing but a client handle and the application's route table; the
/// tokens themselves live in the client's [`SessionState`], so every clone
/// of the client observes the same login.
#[derive(Debug, Clone)]
pub struct SessionStore {
    client: ApiClient,
    routes: RouteTable,
}

impl SessionStore {
    pub fn new(client: ApiClient, routes: RouteTable) -> Self {
        Self { client, routes }
    }

    pub fn client(&self) -> &ApiClient {
        &self.client
    }

    pub fn session(&self) -> &SessionState {
        self.client.session()
    }

    pub fn routes(&self) -> &RouteTable {
        &self.routes
    }

    pub fn is_logged_in(&self) -> bool {
        self.session().is_logged_in()
    }

    /// The user info record stored at login.
    pub fn user_info(&self) -> Option<Value> {
        self.session().user_info()
    }

    /// Resolve `path`, run the guard and hand the destination to the
    /// navigator.
    pub fn navigate(&self, path: &str) -> Result<Navigation> {
        let navigation = self.routes.navigate(path, self.session()).ok_or_else(|| {
            InvalidInputError::RoutePath {
                value: path.to_string(),
                reason: "no route matches".to_string(),
            }
        })?;

        self.client.navigator().navigate(navigation.destination());
        Ok(navigation)
    }

    /// Log in and navigate to the home route.
    ///
    /// A backend failure is returned with the backend's message and leaves
    /// the session untouched.
    #[instrument(skip(self, credentials), fields(identifier = %credentials.identifier()))]
    pub async fn login(&self, credentials: &Credentials) -> Result<()> {
        info!("Logging in");

        let auth = api::auth::login(&self.client, credentials)
            .await?
            .into_data_or("login failed")?;
        self.session().set_auth_data(&auth)?;

        debug!("Login succeeded");
        self.navigate(self.routes.home_route())?;
        Ok(())
    }

    /// Register a new account, which also logs it in.
    #[instrument(skip(self, registration), fields(email = %registration.email))]
    pub async fn register(&self, registration: &Registration) -> Result<()> {
        info!("Registering account");

        let auth = api::auth::register(&self.client, registration)
            .await?
            .into_data_or("registration failed")?;
        self.session().set_auth_data(&auth)?;

        debug!("Registration succeeded");
        self.navigate(self.routes.home_route())?;
        Ok(())
    }

    /// Log out.
    ///
    /// The backend is told first, but whatever it answers (or if it never
    /// answers) the local session is cleared and the login route shown.
    #[instrument(skip(self))]
    pub async fn logout(&self) {
        let _cleanup = LogoutCleanup { store: self };

        let result = api::auth::logout(&self.client)
            .await
            .and_then(|envelope| envelope.into_result_or("logout failed"));
        match result {
            Ok(_) => debug!("Backend session closed"),
            Err(e) => warn!(error = %e, "Logout request failed, clearing local session"),
        }
    }

    /// Exchange the refresh token for a new access token.
    ///
    /// A refresh token or user info the backend omits is kept from the
    /// current session.
    #[instrument(skip(self))]
    pub async fn refresh(&self) -> Result<()> {
        let refresh_token = self
            .session()
            .refresh_token()
            .ok_or(AuthError::RefreshTokenMissing)?;

        let mut auth = api::auth::refresh(&self.client, &refresh_token)
            .await?
            .into_data_or("token refresh failed")?;
        if auth.refresh_token.is_none() {
            auth.refresh_token = Some(refresh_token);
        }
        if auth.user_info.is_none() {
            auth.user_info = self.session().user_info();
        }

        self.session().set_auth_data(&auth)?;
        debug!("Access token refreshed");
        Ok(())
    }

    /// Fetch the logged-in user's profile from the backend.
    pub async fn current_user(&self) -> Result<Value> {
        if !self.is_logged_in() {
            return Err(AuthError::NotLoggedIn.into());
        }

        api::auth::me(&self.client)
            .await?
            .into_data_or("failed to load current user")
    }
}

/// Clears the session and shows the login route when dropped, so logout
/// finishes even if its request future is cancelled.
struct LogoutCleanup<'a> {
    store: &'a SessionStore,
}

impl Drop for LogoutCleanup<'_> {
    fn drop(&mut self) {
        self.store.session().clear();
        self.store
            .client
            .navigator()
            .navigate(self.store.routes.login_route());
        info!("Logged out");
    }
}
