//! Local directory uploader.
//!
//! Copies the image into a directory under a collision-free name and
//! returns either `<base_url>/<name>` or a `file://` URL.

use crate::config::FileUploadConfig;
use async_trait::async_trait;
use formsmith_application::ports::blob_uploader::{BlobUploader, UploadError};
use std::path::{Path, PathBuf};
use tracing::debug;
use uuid::Uuid;

/// Stores uploads in a local directory
pub struct FilesystemUploader {
    directory: PathBuf,
    base_url: Option<String>,
}

impl FilesystemUploader {
    pub fn new(directory: impl Into<PathBuf>, base_url: Option<String>) -> Self {
        Self {
            directory: directory.into(),
            base_url,
        }
    }

    pub fn from_config(config: &FileUploadConfig) -> Self {
        Self::new(config.directory.clone(), config.base_url.clone())
    }

    fn url_for(&self, name: &str, stored: &Path) -> Result<String, UploadError> {
        match &self.base_url {
            Some(base) => Ok(format!("{}/{}", base.trim_end_matches('/'), name)),
            None => {
                let absolute = std::path::absolute(stored)?;
                Ok(format!("file://{}", absolute.display()))
            }
        }
    }
}

/// `<uuid>-<sanitized original name>`
fn stored_name(filename: &str) -> String {
    let clean: String = Path::new(filename)
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default()
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() || c == '.' || c == '-' || c == '_' { c } else { '_' })
        .collect();
    let prefix = Uuid::new_v4().simple().to_string();
    if clean.is_empty() {
        prefix
    } else {
        format!("{}-{}", prefix, clean)
    }
}

#[async_trait]
impl BlobUploader for FilesystemUploader {
    async fn upload(&self, bytes: Vec<u8>, filename: &str) -> Result<String, UploadError> {
        tokio::fs::create_dir_all(&self.directory).await?;
        let name = stored_name(filename);
        let path = self.directory.join(&name);
        tokio::fs::write(&path, bytes).await?;
        debug!("Stored upload at {}", path.display());
        self.url_for(&name, &path)
    }
}
