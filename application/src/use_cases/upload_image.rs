//! Upload image use case
//!
//! Sends a temporary image file to the blob uploader and stores the
//! returned URL on the form header or on one question. The temporary file
//! is removed on every exit path.

use crate::ports::blob_uploader::{BlobUploader, UploadError};
use crate::ports::form_repository::FormRepository;
use crate::use_cases::shared::FormServiceError;
use formsmith_domain::{FormEdit, FormId};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Where the uploaded image goes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageTarget {
    Header,
    Question(usize),
}

impl ImageTarget {
    fn edit(self, url: String) -> FormEdit {
        match self {
            ImageTarget::Header => FormEdit::SetHeaderImage { url },
            ImageTarget::Question(index) => FormEdit::SetQuestionImage { index, url },
        }
    }
}

/// Input for the UploadImage use case
#[derive(Debug, Clone)]
pub struct UploadImageInput {
    pub id: FormId,
    /// Temporary file holding the image; removed when the use case returns
    pub temp_path: PathBuf,
    pub target: ImageTarget,
}

impl UploadImageInput {
    pub fn new(id: FormId, temp_path: impl Into<PathBuf>, target: ImageTarget) -> Self {
        Self {
            id,
            temp_path: temp_path.into(),
            target,
        }
    }
}

/// Removes the wrapped file when dropped.
struct TempArtifact {
    path: PathBuf,
}

impl TempArtifact {
    fn new(path: PathBuf) -> Self {
        Self { path }
    }

    fn path(&self) -> &Path {
        &self.path
    }
}

impl Drop for TempArtifact {
    fn drop(&mut self) {
        match std::fs::remove_file(&self.path) {
            Ok(()) => debug!("Removed temporary file {}", self.path.display()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
            Err(e) => warn!(
                "Failed to remove temporary file {}: {}",
                self.path.display(),
                e
            ),
        }
    }
}

/// Use case for attaching an uploaded image to a form
pub struct UploadImageUseCase<R: FormRepository + 'static, U: BlobUploader + 'static> {
    repository: Arc<R>,
    uploader: Arc<U>,
}

impl<R: FormRepository + 'static, U: BlobUploader + 'static> UploadImageUseCase<R, U> {
    pub fn new(repository: Arc<R>, uploader: Arc<U>) -> Self {
        Self {
            repository,
            uploader,
        }
    }

    /// Upload the image and return the stored URL.
    pub async fn execute(&self, input: UploadImageInput) -> Result<String, FormServiceError> {
        let UploadImageInput {
            id,
            temp_path,
            target,
        } = input;
        let artifact = TempArtifact::new(temp_path);

        // The target must exist before anything is uploaded.
        let form = self.repository.load(&id).await?;
        if let ImageTarget::Question(index) = target {
            form.question(index)?;
        }

        let bytes = tokio::fs::read(artifact.path())
            .await
            .map_err(UploadError::from)?;
        let filename = artifact
            .path()
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "upload".to_string());

        let url = self.uploader.upload(bytes, &filename).await?;
        info!("Uploaded {} for form {} to {}", filename, id, url);

        let form = form.apply(target.edit(url.clone()))?;
        self.repository.save(&id, &form).await?;

        Ok(url)
    }
}
