//! Edit form use case
//!
//! Loads a form, applies a batch of editor actions through the domain
//! reducer, and saves the result. Either every edit applies or nothing is
//! saved.

use crate::ports::form_repository::FormRepository;
use crate::use_cases::shared::{FormServiceError, log_violations};
use formsmith_domain::{Form, FormEdit, FormId, Violation};
use std::sync::Arc;
use tracing::info;

/// Input for the EditForm use case
#[derive(Debug, Clone)]
pub struct EditFormInput {
    pub id: FormId,
    pub edits: Vec<FormEdit>,
}

impl EditFormInput {
    pub fn new(id: FormId, edit: FormEdit) -> Self {
        Self {
            id,
            edits: vec![edit],
        }
    }

    pub fn batch(id: FormId, edits: Vec<FormEdit>) -> Self {
        Self { id, edits }
    }
}

/// Output of the EditForm use case
#[derive(Debug, Clone)]
pub struct EditFormOutput {
    pub form: Form,
    /// Advisory findings on the saved form
    pub violations: Vec<Violation>,
}

/// Use case for applying editor actions to a stored form
pub struct EditFormUseCase<R: FormRepository + 'static> {
    repository: Arc<R>,
}

impl<R: FormRepository + 'static> EditFormUseCase<R> {
    pub fn new(repository: Arc<R>) -> Self {
        Self { repository }
    }

    pub async fn execute(&self, input: EditFormInput) -> Result<EditFormOutput, FormServiceError> {
        let EditFormInput { id, edits } = input;
        let count = edits.len();

        let form = self.repository.load(&id).await?;
        let form = form.apply_all(edits)?;
        self.repository.save(&id, &form).await?;
        info!("Applied {} edit(s) to form {}", count, id);

        let violations = form.validate();
        log_violations(&id, &violations);

        Ok(EditFormOutput { form, violations })
    }
}
