//! nexus-core - Core types for the NexusVoice clients.
//!
//! This crate holds everything the clients share that does not touch the
//! network: credentials and tokens, the backend response [`Envelope`], the
//! process-wide [`SessionState`], the [`CredentialStore`] and [`Navigator`]
//! seams, and the static route tables with their [`NavigationGuard`].
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use nexus_core::{AppProfile, MemoryStore, Navigation, SessionState};
//!
//! let profile = AppProfile::User;
//! let store = Arc::new(MemoryStore::new());
//! let session = SessionState::restore(store, profile.storage_keys()).unwrap();
//!
//! let routes = profile.routes();
//! let nav = routes.navigate("/chat/42", &session).unwrap();
//! assert_eq!(nav, Navigation::Redirected("/login"));
//! ```

pub mod credentials;
pub mod envelope;
pub mod error;
pub mod memory;
pub mod profile;
pub mod route;
pub mod session;
pub mod tokens;
pub mod traits;
pub mod types;

pub use credentials::{Credentials, Registration};
pub use envelope::Envelope;
pub use error::Error;
pub use memory::{HistoryNavigator, MemoryStore};
pub use profile::AppProfile;
pub use route::{Navigation, NavigationGuard, RouteDescriptor, RouteMatch, RouteTable};
pub use session::{AuthData, SessionState, StorageKeys};
pub use tokens::{AccessToken, RefreshToken};
pub use traits::{AuthState, CredentialStore, Navigator};
pub use types::ApiUrl;

/// Result type alias using the crate's Error type.
pub type Result<T> = std::result::Result<T, Error>;
