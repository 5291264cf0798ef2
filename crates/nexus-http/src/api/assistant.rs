//! Role creation assistant endpoints.

use serde::Serialize;
use serde_json::Value;

use nexus_core::{Envelope, Result};

use crate::client::ApiClient;

pub const BRIEF: &str = "/roles/assistant/brief";
pub const RESEARCH_TASKS: &str = "/roles/assistant/research/tasks";
pub const CONFIRM: &str = "/roles/assistant/confirm";
pub const RESEARCH_APPLY: &str = "/roles/assistant/research/apply";

/// Turn an assistant conversation into a role.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfirmRequest {
    pub conversation_id: i64,
    pub deep_research: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub research_limit: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub override_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub override_voice_type: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub research_queries: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResearchApplyRequest {
    pub conversation_id: i64,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub research_queries: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub research_limit: Option<u32>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct BriefQuery {
    conversation_id: i64,
    enable_web_search: bool,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct TasksQuery {
    conversation_id: i64,
}

/// Summarise the conversation so far into a role brief.
pub async fn brief(
    client: &ApiClient,
    conversation_id: i64,
    enable_web_search: bool,
) -> Result<Envelope<Value>> {
    let query = BriefQuery {
        conversation_id,
        enable_web_search,
    };
    client.post_with(BRIEF, &query).await
}

pub async fn research_tasks(client: &ApiClient, conversation_id: i64) -> Result<Envelope<Value>> {
    client
        .get_with(RESEARCH_TASKS, &TasksQuery { conversation_id })
        .await
}

pub async fn confirm(client: &ApiClient, request: &ConfirmRequest) -> Result<Envelope<Value>> {
    client.post(CONFIRM, request).await
}

pub async fn apply_research(
    client: &ApiClient,
    request: &ResearchApplyRequest,
) -> Result<Envelope<Value>> {
    client.post(RESEARCH_APPLY, request).await
}
