//! Seams between the session layer and its collaborators.

mod auth_state;
mod navigator;
mod store;

pub use auth_state::AuthState;
pub use navigator::Navigator;
pub use store::CredentialStore;
