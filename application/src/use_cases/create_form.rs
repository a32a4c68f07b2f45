//! Create form use case

use crate::ports::form_repository::FormRepository;
use crate::use_cases::shared::FormServiceError;
use formsmith_domain::{Form, FormId, Question, QuestionType};
use std::sync::Arc;
use tracing::info;

/// Input for the CreateForm use case
#[derive(Debug, Clone, Default)]
pub struct CreateFormInput {
    pub title: String,
    pub header_image: Option<String>,
    /// Questions to seed the form with, each with placeholder content
    pub questions: Vec<QuestionType>,
}

impl CreateFormInput {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Default::default()
        }
    }

    pub fn with_question(mut self, kind: QuestionType) -> Self {
        self.questions.push(kind);
        self
    }

    pub fn with_header_image(mut self, url: impl Into<String>) -> Self {
        self.header_image = Some(url.into());
        self
    }
}

/// Output of the CreateForm use case
#[derive(Debug, Clone)]
pub struct CreateFormOutput {
    pub id: FormId,
    pub form: Form,
}

/// Use case for creating a new form
pub struct CreateFormUseCase<R: FormRepository + 'static> {
    repository: Arc<R>,
}

impl<R: FormRepository + 'static> CreateFormUseCase<R> {
    pub fn new(repository: Arc<R>) -> Self {
        Self { repository }
    }

    pub async fn execute(&self, input: CreateFormInput) -> Result<CreateFormOutput, FormServiceError> {
        let mut form = Form::new().with_title(input.title);
        if let Some(url) = input.header_image {
            form = form.with_header_image(url);
        }
        for kind in input.questions {
            form = form.add_question(Question::create_default(kind));
        }

        let id = self.repository.create(&form).await?;
        info!("Created form {} with {} question(s)", id, form.questions.len());

        Ok(CreateFormOutput { id, form })
    }
}
