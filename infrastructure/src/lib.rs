//! Infrastructure layer for formsmith
//!
//! This crate contains adapters that implement the ports defined
//! in the application layer, including configuration file loading.

pub mod config;
pub mod store;
pub mod upload;

// Re-export commonly used types
pub use config::{
    ConfigLoader, ConfigValidationError, FileConfig, FileLoggingConfig, FileOutputConfig,
    FileStorageConfig, FileUploadConfig, UploadProvider,
};
pub use store::JsonFileFormRepository;
pub use upload::{CloudinaryUploader, ConfiguredUploader, FilesystemUploader};
