//! List submissions use case

use crate::ports::form_repository::FormRepository;
use crate::use_cases::shared::FormServiceError;
use formsmith_domain::{FormId, Question, Submission};
use serde::Serialize;
use std::sync::Arc;

/// Submissions of a form together with the questions they answer
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmissionReport {
    pub title: String,
    pub questions: Vec<Question>,
    pub submissions: Vec<Submission>,
    /// Non-empty answers per question, across all submissions
    pub response_counts: Vec<usize>,
}

/// Use case for reading back collected submissions
pub struct ListSubmissionsUseCase<R: FormRepository + 'static> {
    repository: Arc<R>,
}

impl<R: FormRepository + 'static> ListSubmissionsUseCase<R> {
    pub fn new(repository: Arc<R>) -> Self {
        Self { repository }
    }

    pub async fn execute(&self, id: &FormId) -> Result<SubmissionReport, FormServiceError> {
        let form = self.repository.load(id).await?;
        let response_counts = form.response_counts();
        let submissions = form.submissions().to_vec();
        Ok(SubmissionReport {
            title: form.title,
            questions: form.questions,
            submissions,
            response_counts,
        })
    }
}
