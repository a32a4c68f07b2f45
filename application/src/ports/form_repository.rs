//! Form repository port
//!
//! Defines the document store that holds forms and their submissions.

use async_trait::async_trait;
use formsmith_domain::{Form, FormId, Submission};
use thiserror::Error;

/// Errors that can occur during repository operations
#[derive(Error, Debug)]
pub enum RepositoryError {
    #[error("Form not found: {0}")]
    NotFound(FormId),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

/// Get/put-by-id store of forms
///
/// Implementations (adapters) live in the infrastructure layer.
#[async_trait]
pub trait FormRepository: Send + Sync {
    /// Store a new form and return the id assigned to it
    async fn create(&self, form: &Form) -> Result<FormId, RepositoryError>;

    /// Load a form with its submissions
    async fn load(&self, id: &FormId) -> Result<Form, RepositoryError>;

    /// Replace the authoring state of an existing form
    ///
    /// Submissions already stored are kept; the ones carried by `form` are
    /// ignored.
    async fn save(&self, id: &FormId, form: &Form) -> Result<(), RepositoryError>;

    /// Atomically append one submission, returning the stored entry
    ///
    /// The stored timestamp may be later than the requested one so that
    /// timestamps stay strictly increasing within the form.
    async fn append_submission(
        &self,
        id: &FormId,
        submission: Submission,
    ) -> Result<Submission, RepositoryError>;

    /// Ids of all stored forms
    async fn list(&self) -> Result<Vec<FormId>, RepositoryError>;
}
