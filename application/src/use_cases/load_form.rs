//! Load form and list forms use cases

use crate::ports::form_repository::FormRepository;
use crate::use_cases::shared::FormServiceError;
use formsmith_domain::{Form, FormId};
use std::sync::Arc;
use tracing::debug;

/// Use case for loading one form
pub struct LoadFormUseCase<R: FormRepository + 'static> {
    repository: Arc<R>,
}

impl<R: FormRepository + 'static> LoadFormUseCase<R> {
    pub fn new(repository: Arc<R>) -> Self {
        Self { repository }
    }

    pub async fn execute(&self, id: &FormId) -> Result<Form, FormServiceError> {
        let form = self.repository.load(id).await?;
        debug!("Loaded form {} ({} questions)", id, form.questions.len());
        Ok(form)
    }
}

/// Use case for listing stored forms with their titles
pub struct ListFormsUseCase<R: FormRepository + 'static> {
    repository: Arc<R>,
}

impl<R: FormRepository + 'static> ListFormsUseCase<R> {
    pub fn new(repository: Arc<R>) -> Self {
        Self { repository }
    }

    pub async fn execute(&self) -> Result<Vec<(FormId, Form)>, FormServiceError> {
        let ids = self.repository.list().await?;
        let mut forms = Vec::with_capacity(ids.len());
        for id in ids {
            let form = self.repository.load(&id).await?;
            forms.push((id, form));
        }
        Ok(forms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::use_cases::test_support::MockRepository;

    #[tokio::test]
    async fn test_load_missing_form() {
        let use_case = LoadFormUseCase::new(Arc::new(MockRepository::default()));
        let err = use_case
            .execute(&FormId::new("nope").unwrap())
            .await
            .unwrap_err();
        assert!(matches!(err, FormServiceError::NotFound(_)));
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn test_list_forms() {
        let repo = Arc::new(MockRepository::with_form("a", Form::new().with_title("A")));
        let forms = ListFormsUseCase::new(repo).execute().await.unwrap();
        assert_eq!(forms.len(), 1);
        assert_eq!(forms[0].0.as_str(), "a");
        assert_eq!(forms[0].1.title, "A");
    }
}
