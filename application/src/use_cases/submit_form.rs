//! Submit form use case
//!
//! Records one respondent's answers. Answers are checked against the form's
//! questions first; findings are logged and returned but never block the
//! submission.

use crate::ports::form_repository::FormRepository;
use crate::use_cases::shared::{FormServiceError, log_violations};
use chrono::{DateTime, Utc};
use formsmith_domain::{AnswerSheet, FormId, Submission, Violation};
use std::sync::Arc;
use tracing::info;

/// Answers as received from the respondent
#[derive(Debug, Clone)]
pub enum AnswerPayload {
    /// Already typed per question
    Sheet(AnswerSheet),
    /// Untagged `{ "<questionIndex>": answer }` mapping, typed using the form
    Raw(serde_json::Value),
}

/// Input for the SubmitForm use case
#[derive(Debug, Clone)]
pub struct SubmitFormInput {
    pub id: FormId,
    pub answers: AnswerPayload,
    /// Submission time; defaults to now
    pub at: Option<DateTime<Utc>>,
}

impl SubmitFormInput {
    pub fn new(id: FormId, answers: AnswerSheet) -> Self {
        Self {
            id,
            answers: AnswerPayload::Sheet(answers),
            at: None,
        }
    }

    pub fn raw(id: FormId, answers: serde_json::Value) -> Self {
        Self {
            id,
            answers: AnswerPayload::Raw(answers),
            at: None,
        }
    }

    pub fn at(mut self, at: DateTime<Utc>) -> Self {
        self.at = Some(at);
        self
    }
}

/// Output of the SubmitForm use case
#[derive(Debug, Clone)]
pub struct SubmitFormOutput {
    /// The entry as stored
    pub submission: Submission,
    pub violations: Vec<Violation>,
}

/// Use case for appending a submission to a form
pub struct SubmitFormUseCase<R: FormRepository + 'static> {
    repository: Arc<R>,
}

impl<R: FormRepository + 'static> SubmitFormUseCase<R> {
    pub fn new(repository: Arc<R>) -> Self {
        Self { repository }
    }

    pub async fn execute(&self, input: SubmitFormInput) -> Result<SubmitFormOutput, FormServiceError> {
        let SubmitFormInput { id, answers, at } = input;

        let form = self.repository.load(&id).await?;
        let sheet = match answers {
            AnswerPayload::Sheet(sheet) => sheet,
            AnswerPayload::Raw(value) => AnswerSheet::from_raw(&form.questions, value)?,
        };

        let violations = form.check_answers(&sheet);
        log_violations(&id, &violations);

        let submission = Submission::new(sheet, at.unwrap_or_else(Utc::now));
        let submission = self.repository.append_submission(&id, submission).await?;
        info!(
            "Recorded submission for form {} at {}",
            id,
            submission.submitted_at.to_rfc3339()
        );

        Ok(SubmitFormOutput {
            submission,
            violations,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::use_cases::test_support::MockRepository;
    use chrono::TimeZone;
    use formsmith_domain::{
        Answer, BlankAnswer, ChoiceAnswer, Form, Question, QuestionType, ViolationCode,
    };
    use serde_json::json;

    fn form() -> Form {
        let cloze = Question::create_default(QuestionType::Cloze)
            .set_cloze_text("The cat sat")
            .unwrap()
            .toggle_blank(2)
            .unwrap();
        Form::new()
            .add_question(cloze)
            .add_question(Question::create_default(QuestionType::Comprehension))
    }

    fn id() -> FormId {
        FormId::new("f").unwrap()
    }

    #[tokio::test]
    async fn test_submissions_keep_order_with_distinct_timestamps() {
        let repo = Arc::new(MockRepository::with_form("f", form()));
        let use_case = SubmitFormUseCase::new(repo.clone());
        let at = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();

        let first = AnswerSheet::new().record(0, BlankAnswer::new().set_blank(0, "dog"));
        let second = AnswerSheet::new().record(0, BlankAnswer::new().set_blank(0, "rat"));
        use_case
            .execute(SubmitFormInput::new(id(), first.clone()).at(at))
            .await
            .unwrap();
        use_case
            .execute(SubmitFormInput::new(id(), second.clone()).at(at))
            .await
            .unwrap();

        let stored = repo.get("f");
        let subs = stored.submissions();
        assert_eq!(subs.len(), 2);
        assert_eq!(subs[0].answers, first);
        assert_eq!(subs[0].submitted_at, at);
        assert_eq!(subs[1].answers, second);
        assert!(subs[1].submitted_at > subs[0].submitted_at);
    }

    #[tokio::test]
    async fn test_raw_answers_are_typed_by_question() {
        let repo = Arc::new(MockRepository::with_form("f", form()));
        let use_case = SubmitFormUseCase::new(repo.clone());

        let output = use_case
            .execute(SubmitFormInput::raw(id(), json!({"0": {"0": "dog"}, "1": {"0": "Option A"}})))
            .await
            .unwrap();

        assert!(output.violations.is_empty());
        assert_eq!(
            output.submission.answers.get(1),
            Some(&Answer::Comprehension(ChoiceAnswer::new().set_choice(0, "Option A")))
        );
    }

    #[tokio::test]
    async fn test_violations_do_not_block_submission() {
        let repo = Arc::new(MockRepository::with_form("f", form()));
        let use_case = SubmitFormUseCase::new(repo.clone());

        let sheet = AnswerSheet::new().record(0, BlankAnswer::new().set_blank(3, "x"));
        let output = use_case.execute(SubmitFormInput::new(id(), sheet)).await.unwrap();

        assert_eq!(output.violations[0].code, ViolationCode::BlankOutOfRange);
        assert_eq!(repo.get("f").submissions().len(), 1);
    }

    #[tokio::test]
    async fn test_malformed_raw_answers_rejected() {
        let repo = Arc::new(MockRepository::with_form("f", form()));
        let use_case = SubmitFormUseCase::new(repo.clone());

        let err = use_case
            .execute(SubmitFormInput::raw(id(), json!({"7": {}})))
            .await
            .unwrap_err();
        assert!(matches!(err, FormServiceError::Answers(_)));
        assert!(repo.get("f").submissions().is_empty());
    }
}
