//! Blob uploader adapters

mod cloudinary;
mod filesystem;

pub use cloudinary::CloudinaryUploader;
pub use filesystem::FilesystemUploader;

use crate::config::{FileUploadConfig, UploadProvider};
use async_trait::async_trait;
use formsmith_application::ports::blob_uploader::{BlobUploader, UploadError};

/// The uploader selected by `upload.provider`
pub enum ConfiguredUploader {
    Cloudinary(CloudinaryUploader),
    Filesystem(FilesystemUploader),
}

impl ConfiguredUploader {
    pub fn from_config(config: &FileUploadConfig) -> Result<Self, UploadError> {
        Ok(match config.provider {
            UploadProvider::Cloudinary => {
                ConfiguredUploader::Cloudinary(CloudinaryUploader::from_config(config)?)
            }
            UploadProvider::Filesystem => {
                ConfiguredUploader::Filesystem(FilesystemUploader::from_config(config))
            }
        })
    }
}

#[async_trait]
impl BlobUploader for ConfiguredUploader {
    async fn upload(&self, bytes: Vec<u8>, filename: &str) -> Result<String, UploadError> {
        match self {
            ConfiguredUploader::Cloudinary(u) => u.upload(bytes, filename).await,
            ConfiguredUploader::Filesystem(u) => u.upload(bytes, filename).await,
        }
    }
}
