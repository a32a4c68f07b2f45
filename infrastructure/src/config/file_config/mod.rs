//! Raw TOML configuration data types
//!
//! These structs represent the exact structure of the TOML config file.

mod logging;
mod storage;
mod upload;

pub use logging::{FileLoggingConfig, FileOutputConfig};
pub use storage::FileStorageConfig;
pub use upload::{FileUploadConfig, UploadProvider};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Configuration validation errors
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigValidationError {
    #[error("upload.timeout_seconds cannot be 0")]
    InvalidTimeout,

    #[error("storage.data_dir cannot be empty")]
    EmptyDataDir,

    #[error("upload.{0} is required when upload.provider = \"cloudinary\"")]
    MissingCloudinaryField(&'static str),
}

/// Complete file configuration (raw TOML structure)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    /// Where forms are stored
    pub storage: FileStorageConfig,
    /// Image upload settings
    pub upload: FileUploadConfig,
    /// Log output settings
    pub logging: FileLoggingConfig,
    /// Console output settings
    pub output: FileOutputConfig,
}

impl FileConfig {
    /// Validate the configuration, stopping at the first problem.
    pub fn validate(&self) -> Result<(), ConfigValidationError> {
        if self.storage.data_dir.as_os_str().is_empty() {
            return Err(ConfigValidationError::EmptyDataDir);
        }
        self.upload.validate()
    }
}
