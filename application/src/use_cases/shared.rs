//! Shared error type and helpers for use cases.

use crate::ports::blob_uploader::UploadError;
use crate::ports::form_repository::RepositoryError;
use formsmith_domain::{DomainError, FormId, RawAnswerError, Violation};
use thiserror::Error;
use tracing::warn;

/// Errors returned by the form use cases
#[derive(Error, Debug)]
pub enum FormServiceError {
    #[error("Form not found: {0}")]
    NotFound(FormId),

    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error("Invalid answers: {0}")]
    Answers(#[from] RawAnswerError),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Upload failed: {0}")]
    Upload(#[from] UploadError),
}

impl From<RepositoryError> for FormServiceError {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::NotFound(id) => FormServiceError::NotFound(id),
            other => FormServiceError::Storage(other.to_string()),
        }
    }
}

impl FormServiceError {
    /// Check if the form (or question) the caller addressed does not exist
    pub fn is_not_found(&self) -> bool {
        match self {
            FormServiceError::NotFound(_) => true,
            FormServiceError::Domain(e) => e.is_invalid_index(),
            _ => false,
        }
    }
}

/// Log advisory violations. They never fail the operation.
pub(crate) fn log_violations(id: &FormId, violations: &[Violation]) {
    for violation in violations {
        warn!("Form {}: {}", id, violation);
    }
}
