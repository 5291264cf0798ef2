//! nexus-http - HTTP client and API bindings for the NexusVoice backend.
//!
//! [`ApiClient`] is the single request pipeline: it attaches the current
//! bearer token to every request and forces the session out when the
//! backend answers 401. [`SessionStore`] builds login, register and logout
//! on top of it, and [`api`] maps each backend endpoint to one function.
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use nexus_core::{AppProfile, Credentials, HistoryNavigator, MemoryStore, SessionState};
//! use nexus_http::{ApiClient, ClientConfig, SessionStore, api};
//!
//! # async fn example() -> Result<(), nexus_core::Error> {
//! let profile = AppProfile::User;
//! let session = Arc::new(SessionState::restore(
//!     Arc::new(MemoryStore::new()),
//!     profile.storage_keys(),
//! )?);
//! let client = ApiClient::new(
//!     ClientConfig::default(),
//!     session,
//!     Arc::new(HistoryNavigator::new()),
//!     profile.routes().login_route(),
//! )?;
//! let store = SessionStore::new(client, *profile.routes());
//!
//! store.login(&Credentials::new("alice@example.com", "secret")).await?;
//! let roles = api::roles::public(store.client(), &api::PageQuery::default())
//!     .await?
//!     .into_result()?;
//! println!("{:?}", roles);
//! # Ok(())
//! # }
//! ```

pub mod api;
mod client;
mod config;
mod session;

pub use client::{ApiClient, OnUnauthorized};
pub use config::ClientConfig;
pub use session::SessionStore;
