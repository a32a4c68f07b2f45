//! Cloudinary unsigned image upload.
//!
//! `POST https://api.cloudinary.com/v1_1/<cloud>/image/upload` with a
//! multipart body carrying the file, the upload preset and the target
//! folder. The stored URL is the response's `secure_url`.

use crate::config::FileUploadConfig;
use async_trait::async_trait;
use formsmith_application::ports::blob_uploader::{BlobUploader, UploadError};
use reqwest::multipart;
use serde::Deserialize;
use std::time::Duration;
use tracing::debug;

const DEFAULT_API_BASE: &str = "https://api.cloudinary.com/v1_1";

#[derive(Debug, Deserialize)]
struct UploadResponse {
    secure_url: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ErrorResponse {
    error: ErrorBody,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: String,
}

/// Uploads images to a Cloudinary cloud through an unsigned preset
pub struct CloudinaryUploader {
    client: reqwest::Client,
    api_base: String,
    cloud_name: String,
    upload_preset: String,
    folder: String,
    timeout: Duration,
}

impl CloudinaryUploader {
    pub fn new(
        cloud_name: impl Into<String>,
        upload_preset: impl Into<String>,
        folder: impl Into<String>,
        timeout: Duration,
    ) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_base: DEFAULT_API_BASE.to_string(),
            cloud_name: cloud_name.into(),
            upload_preset: upload_preset.into(),
            folder: folder.into(),
            timeout,
        }
    }

    /// Build from the `[upload]` config section
    pub fn from_config(config: &FileUploadConfig) -> Result<Self, UploadError> {
        let cloud_name = config
            .cloud_name
            .clone()
            .ok_or_else(|| UploadError::NotConfigured("upload.cloud_name".to_string()))?;
        let upload_preset = config
            .upload_preset
            .clone()
            .ok_or_else(|| UploadError::NotConfigured("upload.upload_preset".to_string()))?;
        Ok(Self::new(
            cloud_name,
            upload_preset,
            config.folder.clone(),
            Duration::from_secs(config.timeout_seconds),
        ))
    }

    /// Point at a different API host
    pub fn with_api_base(mut self, api_base: impl Into<String>) -> Self {
        self.api_base = api_base.into();
        self
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/{}/image/upload",
            self.api_base.trim_end_matches('/'),
            self.cloud_name
        )
    }
}

#[async_trait]
impl BlobUploader for CloudinaryUploader {
    async fn upload(&self, bytes: Vec<u8>, filename: &str) -> Result<String, UploadError> {
        let part = multipart::Part::bytes(bytes).file_name(filename.to_string());
        let form = multipart::Form::new()
            .part("file", part)
            .text("upload_preset", self.upload_preset.clone())
            .text("folder", self.folder.clone());

        debug!("Uploading {} to {}", filename, self.endpoint());
        let response = self
            .client
            .post(self.endpoint())
            .multipart(form)
            .timeout(self.timeout)
            .send()
            .await
            .map_err(request_error)?;

        let status = response.status();
        let body = response.text().await.map_err(request_error)?;

        if !status.is_success() {
            let message = serde_json::from_str::<ErrorResponse>(&body)
                .map(|e| e.error.message)
                .unwrap_or(body);
            return Err(UploadError::Rejected {
                status: status.as_u16(),
                message,
            });
        }

        parse_secure_url(&body)
    }
}

fn request_error(e: reqwest::Error) -> UploadError {
    if e.is_timeout() {
        UploadError::Timeout
    } else {
        UploadError::Request(e.to_string())
    }
}

fn parse_secure_url(body: &str) -> Result<String, UploadError> {
    let response: UploadResponse =
        serde_json::from_str(body).map_err(|e| UploadError::Request(e.to_string()))?;
    response
        .secure_url
        .filter(|url| !url.is_empty())
        .ok_or(UploadError::MissingUrl)
}
