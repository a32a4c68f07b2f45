//! Upload configuration from TOML (`[upload]` section)

use super::ConfigValidationError;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Which blob uploader to use
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UploadProvider {
    /// Cloudinary unsigned upload API
    Cloudinary,
    /// Copy into a local directory
    #[default]
    Filesystem,
}

/// Raw upload configuration from TOML
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileUploadConfig {
    pub provider: UploadProvider,
    /// Cloudinary cloud name
    pub cloud_name: Option<String>,
    /// Cloudinary unsigned upload preset
    pub upload_preset: Option<String>,
    /// Cloudinary folder for uploaded images
    pub folder: String,
    /// Timeout in seconds for the upload request
    pub timeout_seconds: u64,
    /// Target directory for the filesystem provider
    pub directory: PathBuf,
    /// Public URL prefix for the filesystem provider (`file://` URLs if unset)
    pub base_url: Option<String>,
}

impl Default for FileUploadConfig {
    fn default() -> Self {
        Self {
            provider: UploadProvider::Filesystem,
            cloud_name: None,
            upload_preset: None,
            folder: "form-builder".to_string(),
            timeout_seconds: 30,
            directory: PathBuf::from("./data/uploads"),
            base_url: None,
        }
    }
}

impl FileUploadConfig {
    pub fn validate(&self) -> Result<(), ConfigValidationError> {
        if self.timeout_seconds == 0 {
            return Err(ConfigValidationError::InvalidTimeout);
        }
        if self.provider == UploadProvider::Cloudinary {
            if is_blank(&self.cloud_name) {
                return Err(ConfigValidationError::MissingCloudinaryField("cloud_name"));
            }
            if is_blank(&self.upload_preset) {
                return Err(ConfigValidationError::MissingCloudinaryField("upload_preset"));
            }
        }
        Ok(())
    }
}

fn is_blank(value: &Option<String>) -> bool {
    value.as_deref().is_none_or(|v| v.trim().is_empty())
}
