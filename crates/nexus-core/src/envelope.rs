//! Backend response envelope.

use serde::{Deserialize, Serialize};

use crate::error::{Error, TransportError};

/// Business code the backend uses for success.
pub const SUCCESS_CODE: i32 = 200;

/// The uniform wrapper around every backend response body.
///
/// A transport-level 200 does not mean the operation succeeded: callers must
/// go through [`Envelope::into_result`] (or one of its variants) before
/// trusting `data`.
///
/// # Example
///
/// ```
/// use nexus_core::Envelope;
///
/// let env: Envelope<u32> = serde_json::from_str(
///     r#"{"success":false,"code":1001,"message":"invalid credentials"}"#,
/// ).unwrap();
/// let err = env.into_result().unwrap_err();
/// assert_eq!(err.to_string(), "invalid credentials");
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", bound(deserialize = "T: Deserialize<'de>"))]
pub struct Envelope<T> {
    /// Explicit success flag.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub success: Option<bool>,
    /// Business result code.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<i32>,
    /// Human-readable message.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    /// Payload, only meaningful on success.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

impl<T> Envelope<T> {
    /// Build a successful envelope.
    pub fn ok(data: T) -> Self {
        Self {
            success: Some(true),
            code: Some(SUCCESS_CODE),
            message: None,
            data: Some(data),
        }
    }

    /// Build a failed envelope carrying a message.
    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            success: Some(false),
            code: None,
            message: Some(message.into()),
            data: None,
        }
    }

    /// Whether the backend reported success.
    ///
    /// Without an explicit flag, success is derived from the business code.
    pub fn is_success(&self) -> bool {
        match self.success {
            Some(flag) => flag,
            None => self.code == Some(SUCCESS_CODE),
        }
    }

    /// Unwrap into the optional payload, turning a failure into
    /// [`Error::Application`].
    pub fn into_result(self) -> Result<Option<T>, Error> {
        self.into_result_or("request failed")
    }

    /// Like [`into_result`](Self::into_result), with a fallback message used
    /// when the backend sent none.
    pub fn into_result_or(self, fallback: &str) -> Result<Option<T>, Error> {
        if self.is_success() {
            return Ok(self.data);
        }

        let message = self
            .message
            .filter(|m| !m.trim().is_empty())
            .unwrap_or_else(|| fallback.to_string());

        Err(Error::application(message, self.code))
    }

    /// Unwrap into the payload, which must be present.
    pub fn into_data_or(self, fallback: &str) -> Result<T, Error> {
        self.into_result_or(fallback)?.ok_or_else(|| {
            TransportError::Decode {
                message: "successful response carried no data".to_string(),
            }
            .into()
        })
    }
}
