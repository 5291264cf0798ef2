//! The shared HTTP request pipeline.

use std::sync::Arc;

use reqwest::multipart::Form;
use reqwest::{Method, RequestBuilder};
use serde::{Serialize, de::DeserializeOwned};
use serde_json::Value;
use tracing::{debug, instrument, trace, warn};

use nexus_core::error::{ProtocolError, TransportError};
use nexus_core::{Envelope, Error, Navigator, Result, SessionState};

use crate::config::ClientConfig;

/// What the pipeline does when the backend answers 401.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OnUnauthorized {
    /// Treat the held token as invalid: clear the session and navigate to
    /// the login route, then return the error.
    #[default]
    ExpireSession,
    /// Return the error untouched. Used by logout, which clears the session
    /// itself.
    PassThrough,
}

/// HTTP client for the backend API.
///
/// Every request passes through two stages:
///
/// - outbound, the current access token is read from the shared
///   [`SessionState`] and sent as `Authorization: Bearer <token>`;
/// - inbound, a 401 response forces the session out before the error is
///   returned to the caller.
///
/// Cheap to clone; clones share the connection pool and the session.
#[derive(Clone)]
pub struct ApiClient {
    inner: Arc<ClientInner>,
}

struct ClientInner {
    http: reqwest::Client,
    config: ClientConfig,
    session: Arc<SessionState>,
    navigator: Arc<dyn Navigator>,
    login_route: String,
}

impl ApiClient {
    /// Create a client bound to a session.
    ///
    /// `login_route` is where a forced logout navigates to.
    pub fn new(
        config: ClientConfig,
        session: Arc<SessionState>,
        navigator: Arc<dyn Navigator>,
        login_route: &str,
    ) -> Result<Self> {
        let http = reqwest::Client::builder()
            .user_agent(config.user_agent.clone())
            .timeout(config.timeout)
            .build()
            .map_err(|e| TransportError::Http {
                message: format!("failed to build HTTP client: {}", e),
            })?;

        Ok(Self {
            inner: Arc::new(ClientInner {
                http,
                config,
                session,
                navigator,
                login_route: login_route.to_string(),
            }),
        })
    }

    pub fn config(&self) -> &ClientConfig {
        &self.inner.config
    }

    /// Returns the session this client authenticates with.
    pub fn session(&self) -> &SessionState {
        &self.inner.session
    }

    pub fn navigator(&self) -> &dyn Navigator {
        self.inner.navigator.as_ref()
    }

    pub fn login_route(&self) -> &str {
        &self.inner.login_route
    }

    /// GET without parameters.
    pub async fn get<R>(&self, path: &str) -> Result<Envelope<R>>
    where
        R: DeserializeOwned,
    {
        self.send(Method::GET, path, OnUnauthorized::default(), |r| r)
            .await
    }

    /// GET with query parameters.
    pub async fn get_with<Q, R>(&self, path: &str, query: &Q) -> Result<Envelope<R>>
    where
        Q: Serialize + ?Sized,
        R: DeserializeOwned,
    {
        self.send(Method::GET, path, OnUnauthorized::default(), |r| {
            r.query(query)
        })
        .await
    }

    /// POST with a JSON body.
    pub async fn post<B, R>(&self, path: &str, body: &B) -> Result<Envelope<R>>
    where
        B: Serialize + ?Sized,
        R: DeserializeOwned,
    {
        self.send(Method::POST, path, OnUnauthorized::default(), |r| {
            r.json(body)
        })
        .await
    }

    /// POST with query parameters and no body.
    pub async fn post_with<Q, R>(&self, path: &str, query: &Q) -> Result<Envelope<R>>
    where
        Q: Serialize + ?Sized,
        R: DeserializeOwned,
    {
        self.send(Method::POST, path, OnUnauthorized::default(), |r| {
            r.query(query)
        })
        .await
    }

    /// POST a multipart form.
    pub async fn post_multipart<R>(&self, path: &str, form: Form) -> Result<Envelope<R>>
    where
        R: DeserializeOwned,
    {
        self.send(Method::POST, path, OnUnauthorized::default(), |r| {
            r.multipart(form)
        })
        .await
    }

    /// PUT with a JSON body.
    pub async fn put<B, R>(&self, path: &str, body: &B) -> Result<Envelope<R>>
    where
        B: Serialize + ?Sized,
        R: DeserializeOwned,
    {
        self.send(Method::PUT, path, OnUnauthorized::default(), |r| {
            r.json(body)
        })
        .await
    }

    /// DELETE without a body.
    pub async fn delete<R>(&self, path: &str) -> Result<Envelope<R>>
    where
        R: DeserializeOwned,
    {
        self.send(Method::DELETE, path, OnUnauthorized::default(), |r| r)
            .await
    }

    /// Run one request through the pipeline.
    ///
    /// `build` adds the body or query; the authorization header is attached
    /// after it, from the token held at the moment of sending.
    #[instrument(skip(self, build), fields(api = %self.inner.config.base_url))]
    pub async fn send<R, F>(
        &self,
        method: Method,
        path: &str,
        on_unauthorized: OnUnauthorized,
        build: F,
    ) -> Result<Envelope<R>>
    where
        R: DeserializeOwned,
        F: FnOnce(RequestBuilder) -> RequestBuilder,
    {
        let url = self.inner.config.base_url.endpoint(path);
        debug!(%url, "API request");

        let mut request = build(self.inner.http.request(method, &url));
        if let Some(token) = self.inner.session.access_token() {
            request = request.bearer_auth(token.as_str());
        }

        let response = request.send().await.map_err(|e| self.transport_error(e))?;
        let status = response.status();
        trace!(status = %status, "API response");

        if status.is_success() {
            return response
                .json::<Envelope<R>>()
                .await
                .map_err(|e| self.transport_error(e));
        }

        let error = parse_error_response(response).await;
        if error.is_unauthorized() && on_unauthorized == OnUnauthorized::ExpireSession {
            self.expire_session();
        }

        Err(Error::Protocol(error))
    }

    /// Force the session out after the backend rejected its token.
    ///
    /// Clears the session and navigates to the login route. Only the call
    /// that actually removes a token navigates; later calls are no-ops and
    /// return false.
    pub fn expire_session(&self) -> bool {
        let cleared = self.inner.session.clear();
        if cleared {
            warn!("Backend rejected the session token, logging out");
            self.inner.navigator.navigate(&self.inner.login_route);
        }
        cleared
    }

    fn transport_error(&self, err: reqwest::Error) -> Error {
        let error = if err.is_timeout() {
            TransportError::Timeout {
                duration_ms: u64::try_from(self.inner.config.timeout.as_millis())
                    .unwrap_or(u64::MAX),
            }
        } else if err.is_connect() {
            TransportError::Connection {
                message: err.to_string(),
            }
        } else if err.is_decode() {
            TransportError::Decode {
                message: err.to_string(),
            }
        } else {
            TransportError::Http {
                message: err.to_string(),
            }
        };
        error.into()
    }
}

/// Parse the body of a non-2xx response.
///
/// The backend answers errors with the same envelope it uses for success;
/// anything else keeps only the status.
async fn parse_error_response(response: reqwest::Response) -> ProtocolError {
    let status = response.status().as_u16();

    let message = match response.json::<Envelope<Value>>().await {
        Ok(body) => body.message.filter(|m| !m.trim().is_empty()),
        Err(_) => None,
    };

    ProtocolError::new(status, message)
}

impl std::fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiClient")
            .field("base_url", &self.inner.config.base_url)
            .field("timeout", &self.inner.config.timeout)
            .field("session", &self.inner.session)
            .finish()
    }
}
