//! Text-to-speech endpoints.

use serde::Serialize;
use serde_json::Value;

use nexus_core::{Envelope, Result};

use crate::client::ApiClient;

pub const SPEAK: &str = "/tts/text-to-speech";
pub const VOICE_TYPES: &str = "/tts/voice-types";

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SpeechRequest {
    pub text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub voice_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub encoding: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub speed_ratio: Option<f64>,
}

pub async fn text_to_speech(client: &ApiClient, request: &SpeechRequest) -> Result<Envelope<Value>> {
    client.post(SPEAK, request).await
}

pub async fn voice_types(client: &ApiClient) -> Result<Envelope<Value>> {
    client.get(VOICE_TYPES).await
}
