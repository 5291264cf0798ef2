//! Per-invocation session context.

mod navigator;
mod storage;

use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context as _, Result, bail};
use serde::Serialize;

use nexus_core::{ApiUrl, AppProfile, Envelope, Error, Navigation, RouteMatch, SessionState};
use nexus_file::FileStore;
use nexus_http::{ApiClient, ClientConfig, SessionStore};

pub use navigator::TerminalNavigator;

use crate::cli::Cli;
use crate::output;

/// Everything a command needs: the restored session, the client bound to
/// it and the output settings.
pub struct Context {
    profile: AppProfile,
    store: SessionStore,
    pretty: bool,
}

impl Context {
    /// Restore the persisted session for the selected app and bind a client
    /// to it.
    pub fn open(cli: &Cli) -> Result<Self> {
        let profile = AppProfile::from(cli.app);

        let path = match &cli.store {
            Some(path) => path.clone(),
            None => storage::default_path()?,
        };
        let file = Arc::new(FileStore::new(&path));
        let session = SessionState::restore(file, profile.storage_keys())
            .with_context(|| format!("Failed to read session from {}", path.display()))?;

        let base_url = match &cli.api {
            Some(url) => ApiUrl::new(url).context("Invalid API URL")?,
            None => ApiUrl::default(),
        };
        let config = ClientConfig::new(base_url)
            .with_timeout(Duration::from_secs(cli.timeout_secs))
            .with_user_agent(concat!("nexus-cli/", env!("NEXUS_VERSION")));

        let routes = profile.routes();
        let client = ApiClient::new(
            config,
            Arc::new(session),
            Arc::new(TerminalNavigator),
            routes.login_route(),
        )
        .context("Failed to create HTTP client")?;

        Ok(Self {
            profile,
            store: SessionStore::new(client, *routes),
            pretty: cli.pretty,
        })
    }

    pub fn profile(&self) -> AppProfile {
        self.profile
    }

    pub fn store(&self) -> &SessionStore {
        &self.store
    }

    pub fn client(&self) -> &ApiClient {
        self.store.client()
    }

    /// Navigate to `path` through the guard.
    ///
    /// Fails when the guard redirects to login or when the selected app has
    /// no such route.
    pub fn enter(&self, path: &str) -> Result<RouteMatch> {
        match self.store.navigate(path) {
            Ok(Navigation::Allowed(target)) => Ok(target),
            Ok(Navigation::Redirected(login)) => {
                output::hint("Sign in first with 'nexus auth login'.");
                bail!("{} requires a session (redirected to {})", path, login)
            }
            Err(Error::InvalidInput(_)) => {
                bail!("{} is not available in the {} app", path, self.profile)
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Navigate to the app's home route.
    pub fn enter_home(&self) -> Result<RouteMatch> {
        self.enter(self.store.routes().home_route())
    }

    /// Print command data as JSON.
    pub fn print<T: Serialize>(&self, data: &T) -> Result<()> {
        output::data(data, self.pretty)
    }

    /// Unwrap an API response and print its payload.
    pub fn show<T: Serialize>(
        &self,
        response: nexus_core::Result<Envelope<T>>,
        action: &str,
    ) -> Result<()> {
        let data = response
            .and_then(Envelope::into_result)
            .with_context(|| format!("Failed to {}", action))?;

        match data {
            Some(data) => self.print(&data),
            None => {
                output::success("Done");
                Ok(())
            }
        }
    }
}
