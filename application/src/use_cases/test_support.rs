//! Mock ports shared by the use case tests.

use crate::ports::blob_uploader::{BlobUploader, UploadError};
use crate::ports::form_repository::{FormRepository, RepositoryError};
use async_trait::async_trait;
use formsmith_domain::{Form, FormId, Submission};
use std::collections::BTreeMap;
use std::sync::Mutex;

/// In-memory repository with sequential ids
#[derive(Default)]
pub(crate) struct MockRepository {
    forms: Mutex<BTreeMap<FormId, Form>>,
    pub(crate) saves: Mutex<usize>,
}

impl MockRepository {
    pub(crate) fn with_form(id: &str, form: Form) -> Self {
        let repo = Self::default();
        repo.forms
            .lock()
            .unwrap()
            .insert(FormId::new(id).unwrap(), form);
        repo
    }

    pub(crate) fn get(&self, id: &str) -> Form {
        self.forms.lock().unwrap()[&FormId::new(id).unwrap()].clone()
    }
}

#[async_trait]
impl FormRepository for MockRepository {
    async fn create(&self, form: &Form) -> Result<FormId, RepositoryError> {
        let mut forms = self.forms.lock().unwrap();
        let id = FormId::new(format!("form-{}", forms.len() + 1)).unwrap();
        forms.insert(id.clone(), form.clone());
        Ok(id)
    }

    async fn load(&self, id: &FormId) -> Result<Form, RepositoryError> {
        self.forms
            .lock()
            .unwrap()
            .get(id)
            .cloned()
            .ok_or_else(|| RepositoryError::NotFound(id.clone()))
    }

    async fn save(&self, id: &FormId, form: &Form) -> Result<(), RepositoryError> {
        let mut forms = self.forms.lock().unwrap();
        let stored = forms
            .get_mut(id)
            .ok_or_else(|| RepositoryError::NotFound(id.clone()))?;
        *stored = stored.clone().with_authoring_of(form.clone());
        *self.saves.lock().unwrap() += 1;
        Ok(())
    }

    async fn append_submission(
        &self,
        id: &FormId,
        submission: Submission,
    ) -> Result<Submission, RepositoryError> {
        let mut forms = self.forms.lock().unwrap();
        let stored = forms
            .get_mut(id)
            .ok_or_else(|| RepositoryError::NotFound(id.clone()))?;
        Ok(stored
            .append_submission(submission.answers, submission.submitted_at)
            .clone())
    }

    async fn list(&self) -> Result<Vec<FormId>, RepositoryError> {
        Ok(self.forms.lock().unwrap().keys().cloned().collect())
    }
}

/// Uploader that records filenames and returns a fixed URL, or fails
pub(crate) struct MockUploader {
    pub(crate) url: Option<String>,
    pub(crate) uploads: Mutex<Vec<(String, usize)>>,
}

impl MockUploader {
    pub(crate) fn succeeding(url: &str) -> Self {
        Self {
            url: Some(url.to_string()),
            uploads: Mutex::new(Vec::new()),
        }
    }

    pub(crate) fn failing() -> Self {
        Self {
            url: None,
            uploads: Mutex::new(Vec::new()),
        }
    }
}

#[async_trait]
impl BlobUploader for MockUploader {
    async fn upload(&self, bytes: Vec<u8>, filename: &str) -> Result<String, UploadError> {
        self.uploads
            .lock()
            .unwrap()
            .push((filename.to_string(), bytes.len()));
        self.url.clone().ok_or(UploadError::Rejected {
            status: 400,
            message: "bad image".to_string(),
        })
    }
}
