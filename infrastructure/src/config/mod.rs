//! Configuration file loading for formsmith
//!
//! This module handles file I/O and merging of configuration from multiple sources.
//! The priority order (highest to lowest):
//!
//! 1. `FORMSMITH_*` environment variables (`__` separates sections)
//! 2. `--config <path>` specified file
//! 3. Project root: `./formsmith.toml` or `./.formsmith.toml`
//! 4. XDG config: `$XDG_CONFIG_HOME/formsmith/config.toml`
//! 5. Default values

mod file_config;
mod loader;

pub use file_config::{
    ConfigValidationError, FileConfig, FileLoggingConfig, FileOutputConfig, FileStorageConfig,
    FileUploadConfig, UploadProvider,
};
pub use loader::ConfigLoader;
