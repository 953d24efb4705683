//! Media host client
//!
//! Files are pushed to a Cloudinary-compatible unsigned upload endpoint. The
//! host answers with a public URL that is stored on the owning record.

use crate::config::MediaConfig;
use crate::error::{AppError, Result};
use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;

/// Upload target for profile photos and work attachments
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MediaHost: Send + Sync {
    /// Upload a file and return its public URL
    async fn upload(&self, file_name: &str, content_type: &str, bytes: Vec<u8>) -> Result<String>;
}

#[derive(Debug, Deserialize)]
struct UploadResponse {
    secure_url: String,
}

#[derive(Clone)]
pub struct CloudinaryClient {
    config: MediaConfig,
    http_client: Client,
}

impl CloudinaryClient {
    pub fn new(config: MediaConfig) -> Result<Self> {
        let http_client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| AppError::Media(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            config,
            http_client,
        })
    }

    /// Presets in the order they are attempted
    fn presets(&self) -> Vec<&str> {
        let mut presets: Vec<&str> = Vec::new();
        if let Some(preferred) = self.config.upload_preset.as_deref() {
            presets.push(preferred);
        }
        for fallback in &self.config.fallback_presets {
            if !presets.contains(&fallback.as_str()) {
                presets.push(fallback);
            }
        }
        presets
    }

    async fn upload_with_preset(
        &self,
        url: &str,
        preset: &str,
        file_name: &str,
        content_type: &str,
        bytes: Vec<u8>,
    ) -> Result<String> {
        let part = Part::bytes(bytes)
            .file_name(file_name.to_string())
            .mime_str(content_type)
            .map_err(|e| AppError::Media(format!("Invalid content type: {}", e)))?;
        let form = Form::new()
            .text("upload_preset", preset.to_string())
            .part("file", part);

        let response = self
            .http_client
            .post(url)
            .multipart(form)
            .send()
            .await
            .map_err(|e| AppError::Media(format!("Upload request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::Media(format!(
                "Upload rejected: {} - {}",
                status, body
            )));
        }

        let body: UploadResponse = response
            .json()
            .await
            .map_err(|e| AppError::Media(format!("Failed to parse upload response: {}", e)))?;
        Ok(body.secure_url)
    }
}

#[async_trait]
impl MediaHost for CloudinaryClient {
    async fn upload(&self, file_name: &str, content_type: &str, bytes: Vec<u8>) -> Result<String> {
        let cloud_name = self
            .config
            .cloud_name
            .as_deref()
            .ok_or_else(|| AppError::Media("Media host cloud name is not configured".to_string()))?;
        let url = format!(
            "{}/v1_1/{}/auto/upload",
            self.config.api_base_url.trim_end_matches('/'),
            cloud_name
        );

        let mut last_error = None;
        for preset in self.presets() {
            match self
                .upload_with_preset(&url, preset, file_name, content_type, bytes.clone())
                .await
            {
                Ok(secure_url) => {
                    metrics::counter!("folio_media_uploads_total", "result" => "success")
                        .increment(1);
                    tracing::info!(preset = %preset, size = bytes.len(), "Uploaded media");
                    return Ok(secure_url);
                }
                Err(e) => {
                    tracing::warn!(preset = %preset, error = %e, "Upload preset rejected");
                    last_error = Some(e);
                }
            }
        }

        metrics::counter!("folio_media_uploads_total", "result" => "failure").increment(1);
        Err(last_error
            .unwrap_or_else(|| AppError::Media("No upload preset is configured".to_string())))
    }
}
