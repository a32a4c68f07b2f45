//! Blob uploader port
//!
//! Defines the interface for uploading images and getting back a public URL.

use async_trait::async_trait;
use thiserror::Error;

/// Errors that can occur while uploading a blob
#[derive(Error, Debug)]
pub enum UploadError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Request failed: {0}")]
    Request(String),

    #[error("Upload rejected ({status}): {message}")]
    Rejected { status: u16, message: String },

    #[error("Upload response did not contain a URL")]
    MissingUrl,

    #[error("Upload timed out")]
    Timeout,

    #[error("Uploader not configured: {0}")]
    NotConfigured(String),
}

/// Uploads a file's bytes and returns the URL it is served from
///
/// One round trip, no retries.
#[async_trait]
pub trait BlobUploader: Send + Sync {
    async fn upload(&self, bytes: Vec<u8>, filename: &str) -> Result<String, UploadError>;
}
