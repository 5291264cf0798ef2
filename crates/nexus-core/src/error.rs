//! Error types for the NexusVoice clients.
//!
//! One error type covers the whole client stack, with explicit variants for
//! transport failures, HTTP status errors, application-level failures carried
//! in the response envelope, session problems, credential storage and input
//! validation.

use std::fmt;
use std::path::PathBuf;

use thiserror::Error;

/// The unified error type for client operations.
#[derive(Debug, Error)]
pub enum Error {
    /// Network transport errors (connection, timeout, undecodable body).
    #[error("transport error: {0}")]
    Transport(#[from] TransportError),

    /// Non-2xx HTTP responses.
    #[error("protocol error: {0}")]
    Protocol(#[from] ProtocolError),

    /// The backend answered but reported `success = false` in the envelope.
    ///
    /// Displays as the backend message alone so it can be shown to users
    /// verbatim.
    #[error("{message}")]
    Application {
        /// Message supplied by the backend (or a fallback).
        message: String,
        /// Business error code, when the backend sent one.
        code: Option<i32>,
    },

    /// Session errors (no token held, no refresh token).
    #[error("authentication error: {0}")]
    Auth(#[from] AuthError),

    /// Credential store failures.
    #[error("storage error: {0}")]
    Storage(#[from] StorageError),

    /// Input validation errors (API URL, route path).
    #[error("invalid input: {0}")]
    InvalidInput(#[from] InvalidInputError),
}

impl Error {
    /// Create an application-level error.
    pub fn application(message: impl Into<String>, code: Option<i32>) -> Self {
        Error::Application {
            message: message.into(),
            code,
        }
    }

    /// Returns true if this error came from an HTTP 401 response.
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, Error::Protocol(e) if e.is_unauthorized())
    }

    /// Returns true if this error is a request timeout.
    pub fn is_timeout(&self) -> bool {
        matches!(self, Error::Transport(TransportError::Timeout { .. }))
    }
}

/// Transport-level errors.
#[derive(Debug, Error)]
pub enum TransportError {
    /// Network connection failed.
    #[error("connection failed: {message}")]
    Connection { message: String },

    /// Request exceeded the configured overall timeout.
    #[error("request timed out after {duration_ms}ms")]
    Timeout { duration_ms: u64 },

    /// Response body could not be decoded.
    #[error("invalid response body: {message}")]
    Decode { message: String },

    /// Generic HTTP error.
    #[error("HTTP error: {message}")]
    Http { message: String },
}

/// Session-related errors.
#[derive(Debug, Error)]
pub enum AuthError {
    /// The operation needs a session but no token is held.
    #[error("not logged in")]
    NotLoggedIn,

    /// Refresh was requested without a refresh token.
    #[error("no refresh token available")]
    RefreshTokenMissing,
}

/// A non-2xx HTTP response.
#[derive(Debug)]
pub struct ProtocolError {
    /// HTTP status code.
    pub status: u16,
    /// Error message from the server, if the body carried one.
    pub message: Option<String>,
}

impl fmt::Display for ProtocolError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "HTTP {}", self.status)?;
        if let Some(ref message) = self.message {
            write!(f, ": {}", message)?;
        }
        Ok(())
    }
}

impl std::error::Error for ProtocolError {}

impl ProtocolError {
    /// Create a new protocol error.
    pub fn new(status: u16, message: Option<String>) -> Self {
        Self { status, message }
    }

    /// Check if this is an authorization failure.
    pub fn is_unauthorized(&self) -> bool {
        self.status == 401
    }
}

/// Credential store errors.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Reading or writing the backing file failed.
    #[error("I/O error on {}: {}", .path.display(), .source)]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The backing file exists but does not parse.
    #[error("corrupt store {}: {}", .path.display(), .message)]
    Corrupt { path: PathBuf, message: String },

    /// A value could not be serialized for storage.
    #[error("failed to serialize {key}: {message}")]
    Serialize { key: String, message: String },

    /// Backend-specific failure (e.g. a poisoned lock).
    #[error("{message}")]
    Other { message: String },
}

/// Input validation errors.
#[derive(Debug, Error)]
pub enum InvalidInputError {
    /// Invalid API base URL.
    #[error("invalid API URL '{value}': {reason}")]
    ApiUrl { value: String, reason: String },

    /// Invalid route path.
    #[error("invalid route path '{value}': {reason}")]
    RoutePath { value: String, reason: String },

    /// Generic invalid input.
    #[error("invalid input: {message}")]
    Other { message: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn application_error_displays_backend_message_only() {
        let err = Error::application("invalid credentials", Some(1001));
        assert_eq!(err.to_string(), "invalid credentials");
    }

    #[test]
    fn unauthorized_detection() {
        let err: Error = ProtocolError::new(401, None).into();
        assert!(err.is_unauthorized());

        let err: Error = ProtocolError::new(403, Some("forbidden".into())).into();
        assert!(!err.is_unauthorized());
        assert_eq!(err.to_string(), "protocol error: HTTP 403: forbidden");
    }

    #[test]
    fn timeout_detection() {
        let err: Error = TransportError::Timeout { duration_ms: 10_000 }.into();
        assert!(err.is_timeout());
        assert_eq!(
            err.to_string(),
            "transport error: request timed out after 10000ms"
        );
    }
}
