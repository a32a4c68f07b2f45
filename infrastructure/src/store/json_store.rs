//! JSON-file form repository.
//!
//! One pretty-printed JSON document per form, named `<id>.json`, in a
//! single data directory. Writes go to a temporary sibling first and are
//! renamed into place, so readers never see a half-written document.

use async_trait::async_trait;
use formsmith_application::ports::form_repository::{FormRepository, RepositoryError};
use formsmith_domain::{Form, FormId, Submission};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tokio::sync::Mutex;
use tracing::{debug, info};
use uuid::Uuid;

/// Form repository backed by a directory of JSON files.
///
/// Every read-modify-write holds one process-wide lock, so concurrent
/// submissions are appended one after another and none is lost.
pub struct JsonFileFormRepository {
    dir: PathBuf,
    write_lock: Mutex<()>,
}

impl JsonFileFormRepository {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            write_lock: Mutex::new(()),
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, id: &FormId) -> Result<PathBuf, RepositoryError> {
        let raw = id.as_str();
        let safe = raw
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
        if !safe {
            return Err(RepositoryError::NotFound(id.clone()));
        }
        Ok(self.dir.join(format!("{}.json", raw)))
    }

    async fn read(&self, id: &FormId) -> Result<Form, RepositoryError> {
        let path = self.path_for(id)?;
        let content = match tokio::fs::read_to_string(&path).await {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                return Err(RepositoryError::NotFound(id.clone()));
            }
            Err(e) => {
                return Err(RepositoryError::Storage(format!(
                    "Failed to read {}: {}",
                    path.display(),
                    e
                )));
            }
        };
        serde_json::from_str(&content).map_err(|e| {
            RepositoryError::Serialization(format!("{}: {}", path.display(), e))
        })
    }

    async fn write(&self, id: &FormId, form: &Form) -> Result<(), RepositoryError> {
        let path = self.path_for(id)?;
        let json = serde_json::to_string_pretty(form)
            .map_err(|e| RepositoryError::Serialization(e.to_string()))?;

        tokio::fs::create_dir_all(&self.dir)
            .await
            .map_err(|e| storage_error(&self.dir, e))?;

        let tmp = path.with_extension("json.tmp");
        tokio::fs::write(&tmp, json)
            .await
            .map_err(|e| storage_error(&tmp, e))?;
        tokio::fs::rename(&tmp, &path)
            .await
            .map_err(|e| storage_error(&path, e))?;

        debug!("Wrote {}", path.display());
        Ok(())
    }
}

fn storage_error(path: &Path, e: std::io::Error) -> RepositoryError {
    RepositoryError::Storage(format!("{}: {}", path.display(), e))
}

#[async_trait]
impl FormRepository for JsonFileFormRepository {
    async fn create(&self, form: &Form) -> Result<FormId, RepositoryError> {
        let _guard = self.write_lock.lock().await;
        let id = FormId::new(Uuid::new_v4().simple().to_string())
            .ok_or_else(|| RepositoryError::Storage("generated an empty form id".to_string()))?;
        self.write(&id, form).await?;
        info!("Stored new form {} in {}", id, self.dir.display());
        Ok(id)
    }

    async fn load(&self, id: &FormId) -> Result<Form, RepositoryError> {
        self.read(id).await
    }

    async fn save(&self, id: &FormId, form: &Form) -> Result<(), RepositoryError> {
        let _guard = self.write_lock.lock().await;
        let stored = self.read(id).await?;
        self.write(id, &stored.with_authoring_of(form.clone())).await
    }

    async fn append_submission(
        &self,
        id: &FormId,
        submission: Submission,
    ) -> Result<Submission, RepositoryError> {
        let _guard = self.write_lock.lock().await;
        let mut form = self.read(id).await?;
        let stored = form
            .append_submission(submission.answers, submission.submitted_at)
            .clone();
        self.write(id, &form).await?;
        Ok(stored)
    }

    async fn list(&self) -> Result<Vec<FormId>, RepositoryError> {
        let mut entries = match tokio::fs::read_dir(&self.dir).await {
            Ok(entries) => entries,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(storage_error(&self.dir, e)),
        };

        let mut ids = Vec::new();
        while let Some(entry) = entries
            .next_entry()
            .await
            .map_err(|e| storage_error(&self.dir, e))?
        {
            let path = entry.path();
            if path.extension().is_some_and(|ext| ext == "json")
                && let Some(id) = path
                    .file_stem()
                    .and_then(|s| s.to_str())
                    .and_then(FormId::new)
            {
                ids.push(id);
            }
        }
        ids.sort();
        Ok(ids)
    }
}
