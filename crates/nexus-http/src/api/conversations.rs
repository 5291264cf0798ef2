//! Conversation and chat endpoints.

use serde::Serialize;
use serde_json::Value;

use nexus_core::{Envelope, Result};

use crate::client::ApiClient;

pub const BASE: &str = "/v1/conversations";
pub const LIST: &str = "/v1/conversations/list";
pub const CHAT: &str = "/v1/conversations/chat";
pub const MODELS: &str = "/v1/conversations/models";

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateConversation {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub system_prompt: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role_id: Option<i64>,
}

/// One chat turn. Without a `conversation_id` the backend opens a new
/// conversation.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub conversation_id: Option<i64>,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_tokens: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub system_prompt: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    pub enable_web_search: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role_id: Option<i64>,
}

impl ChatRequest {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            ..Self::default()
        }
    }
}

#[derive(Serialize)]
struct ListQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    limit: Option<u32>,
}

pub async fn create(client: &ApiClient, request: &CreateConversation) -> Result<Envelope<Value>> {
    client.post(BASE, request).await
}

/// Most recent conversations first; the backend caps `limit` at its default
/// when unset.
pub async fn list(client: &ApiClient, limit: Option<u32>) -> Result<Envelope<Value>> {
    client.get_with(LIST, &ListQuery { limit }).await
}

pub async fn history(client: &ApiClient, id: i64) -> Result<Envelope<Value>> {
    client.get(&format!("{}/{}/history", BASE, id)).await
}

pub async fn delete(client: &ApiClient, id: i64) -> Result<Envelope<Value>> {
    client.delete(&format!("{}/{}", BASE, id)).await
}

pub async fn chat(client: &ApiClient, request: &ChatRequest) -> Result<Envelope<Value>> {
    client.post(CHAT, request).await
}

pub async fn models(client: &ApiClient) -> Result<Envelope<Value>> {
    client.get(MODELS).await
}
