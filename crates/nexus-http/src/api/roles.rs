//! Character role endpoints.

use serde::Serialize;
use serde_json::Value;

use nexus_core::{Envelope, Result};

use super::PageQuery;
use crate::client::ApiClient;

pub const PUBLIC: &str = "/roles/public";
pub const PRIVATE: &str = "/roles/private";

/// Body for creating or updating a private role.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RoleRequest {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub persona_prompt: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub greeting_message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub greeting_audio_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avatar_url: Option<String>,
    pub voice_type: String,
}

/// Browse public roles.
pub async fn public(client: &ApiClient, query: &PageQuery) -> Result<Envelope<Value>> {
    client.get_with(PUBLIC, query).await
}

pub async fn public_detail(client: &ApiClient, id: i64) -> Result<Envelope<Value>> {
    client.get(&format!("{}/{}", PUBLIC, id)).await
}

/// The logged-in user's private roles.
pub async fn private(client: &ApiClient, query: &PageQuery) -> Result<Envelope<Value>> {
    client.get_with(PRIVATE, query).await
}

pub async fn create_private(client: &ApiClient, role: &RoleRequest) -> Result<Envelope<Value>> {
    client.post(PRIVATE, role).await
}

pub async fn update_private(
    client: &ApiClient,
    id: i64,
    role: &RoleRequest,
) -> Result<Envelope<Value>> {
    client.put(&format!("{}/{}", PRIVATE, id), role).await
}

pub async fn delete_private(client: &ApiClient, id: i64) -> Result<Envelope<Value>> {
    client.delete(&format!("{}/{}", PRIVATE, id)).await
}
