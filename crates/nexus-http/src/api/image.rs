//! Image generation endpoints.

use serde::Serialize;
use serde_json::Value;

use nexus_core::{Envelope, Result};

use crate::client::ApiClient;

pub const GENERATE: &str = "/v1/image/generate";
pub const MODELS: &str = "/v1/image/models";

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageRequest {
    pub model: String,
    pub prompt: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub negative_prompt: Option<String>,
    /// `<width>x<height>`, e.g. `1024x1024`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_size: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub batch_size: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub num_inference_steps: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub guidance_scale: Option<f64>,
}

pub async fn generate(client: &ApiClient, request: &ImageRequest) -> Result<Envelope<Value>> {
    client.post(GENERATE, request).await
}

pub async fn models(client: &ApiClient) -> Result<Envelope<Value>> {
    client.get(MODELS).await
}
