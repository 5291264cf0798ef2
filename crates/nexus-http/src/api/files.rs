//! File upload endpoints.
//!
//! Both endpoints take a multipart form with a single `file` field and
//! answer with the stored file's URL.

use std::path::Path;

use reqwest::multipart::{Form, Part};
use tracing::debug;

use nexus_core::error::{InvalidInputError, StorageError};
use nexus_core::{Envelope, Result};

use crate::client::ApiClient;

pub const UPLOAD_IMAGE: &str = "/file/upload/image";
pub const UPLOAD_AUDIO: &str = "/file/upload/audio";

const FIELD: &str = "file";

pub async fn upload_image(
    client: &ApiClient,
    file_name: &str,
    bytes: Vec<u8>,
) -> Result<Envelope<String>> {
    client.post_multipart(UPLOAD_IMAGE, form(file_name, bytes)?).await
}

pub async fn upload_audio(
    client: &ApiClient,
    file_name: &str,
    bytes: Vec<u8>,
) -> Result<Envelope<String>> {
    client.post_multipart(UPLOAD_AUDIO, form(file_name, bytes)?).await
}

/// Read `path` and upload it as an image.
pub async fn upload_image_file(client: &ApiClient, path: &Path) -> Result<Envelope<String>> {
    let (name, bytes) = read(path).await?;
    upload_image(client, &name, bytes).await
}

/// Read `path` and upload it as audio.
pub async fn upload_audio_file(client: &ApiClient, path: &Path) -> Result<Envelope<String>> {
    let (name, bytes) = read(path).await?;
    upload_audio(client, &name, bytes).await
}

async fn read(path: &Path) -> Result<(String, Vec<u8>)> {
    let name = path
        .file_name()
        .and_then(|n| n.to_str())
        .ok_or_else(|| InvalidInputError::Other {
            message: format!("not a file path: {}", path.display()),
        })?
        .to_string();

    let bytes = tokio::fs::read(path).await.map_err(|e| StorageError::Io {
        path: path.to_path_buf(),
        source: e,
    })?;

    debug!(file = %name, size = bytes.len(), "Read upload");
    Ok((name, bytes))
}

fn form(file_name: &str, bytes: Vec<u8>) -> Result<Form> {
    let part = Part::bytes(bytes)
        .file_name(file_name.to_string())
        .mime_str(content_type(file_name))
        .map_err(|e| InvalidInputError::Other {
            message: format!("invalid content type: {}", e),
        })?;
    Ok(Form::new().part(FIELD, part))
}

fn content_type(file_name: &str) -> &'static str {
    let extension = Path::new(file_name)
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase);

    match extension.as_deref() {
        Some("png") => "image/png",
        Some("jpg" | "jpeg") => "image/jpeg",
        Some("gif") => "image/gif",
        Some("webp") => "image/webp",
        Some("mp3") => "audio/mpeg",
        Some("wav") => "audio/wav",
        Some("ogg") => "audio/ogg",
        Some("m4a") => "audio/mp4",
        _ => "application/octet-stream",
    }
}
