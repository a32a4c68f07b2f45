//! Load/save a single question by position

use crate::ports::form_repository::FormRepository;
use crate::use_cases::shared::{FormServiceError, log_violations};
use formsmith_domain::{FormId, Question};
use std::sync::Arc;
use tracing::{debug, info};

/// Use case for reading and replacing one question of a form
pub struct QuestionAccessUseCase<R: FormRepository + 'static> {
    repository: Arc<R>,
}

impl<R: FormRepository + 'static> QuestionAccessUseCase<R> {
    pub fn new(repository: Arc<R>) -> Self {
        Self { repository }
    }

    /// Load the question at `index`
    pub async fn load_question(&self, id: &FormId, index: usize) -> Result<Question, FormServiceError> {
        let form = self.repository.load(id).await?;
        let question = form.question(index)?.clone();
        debug!("Loaded question {} of form {}", index, id);
        Ok(question)
    }

    /// Replace the question at `index` wholesale
    pub async fn save_question(
        &self,
        id: &FormId,
        index: usize,
        question: Question,
    ) -> Result<(), FormServiceError> {
        let violations: Vec<_> = question
            .validate()
            .into_iter()
            .map(|v| v.at_question(index))
            .collect();

        let form = self.repository.load(id).await?;
        let form = form.replace_question(index, question)?;
        self.repository.save(id, &form).await?;
        info!("Saved question {} of form {}", index, id);

        log_violations(id, &violations);
        Ok(())
    }
}
