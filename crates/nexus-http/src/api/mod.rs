//! Backend endpoint bindings.
//!
//! One function per endpoint. Each returns the backend [`Envelope`]
//! unmodified; callers unwrap it with
//! [`into_result`](nexus_core::Envelope::into_result) or
//! [`into_data_or`](nexus_core::Envelope::into_data_or). Payloads the
//! client only passes through are left as [`serde_json::Value`].
//!
//! [`Envelope`]: nexus_core::Envelope

use serde::Serialize;

pub mod admin;
pub mod assistant;
pub mod auth;
pub mod conversations;
pub mod files;
pub mod image;
pub mod roles;
pub mod tts;

/// Paging parameters shared by the list endpoints.
///
/// Unset fields are left out of the query so the backend defaults apply.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PageQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub keyword: Option<String>,
}

impl PageQuery {
    pub fn page(page: u32, size: u32) -> Self {
        Self {
            page: Some(page),
            size: Some(size),
            keyword: None,
        }
    }

    pub fn with_keyword(mut self, keyword: impl Into<String>) -> Self {
        self.keyword = Some(keyword.into());
        self
    }
}
