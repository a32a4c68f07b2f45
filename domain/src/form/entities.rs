//! Form aggregate entities

use crate::answer::AnswerSheet;
use crate::core::error::{DomainError, check_index};
use crate::question::{Question, QuestionPatch, non_empty_url};
use crate::validation::Violation;
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Store-assigned identifier of a form.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FormId(String);

impl FormId {
    /// Returns `None` for an empty or blank id.
    pub fn new(id: impl Into<String>) -> Option<Self> {
        let id = id.into();
        let trimmed = id.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(Self(trimmed.to_string()))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for FormId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// One respondent's stored answers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Submission {
    pub answers: AnswerSheet,
    pub submitted_at: DateTime<Utc>,
}

impl Submission {
    pub fn new(answers: AnswerSheet, submitted_at: DateTime<Utc>) -> Self {
        Self {
            answers,
            submitted_at,
        }
    }
}

/// A questionnaire and the submissions collected for it (Aggregate root)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Form {
    #[serde(default)]
    pub title: String,
    #[serde(
        default,
        deserialize_with = "non_empty_url",
        skip_serializing_if = "Option::is_none"
    )]
    pub header_image: Option<String>,
    #[serde(default)]
    pub questions: Vec<Question>,
    #[serde(default)]
    submissions: Vec<Submission>,
}

impl Form {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Set the header image URL; an empty URL clears it.
    pub fn with_header_image(mut self, url: impl Into<String>) -> Self {
        let url = url.into();
        self.header_image = if url.trim().is_empty() { None } else { Some(url) };
        self
    }

    pub fn without_header_image(mut self) -> Self {
        self.header_image = None;
        self
    }

    pub fn add_question(mut self, question: Question) -> Self {
        self.questions.push(question);
        self
    }

    pub fn question(&self, index: usize) -> Result<&Question, DomainError> {
        check_index("question", index, self.questions.len())?;
        Ok(&self.questions[index])
    }

    pub fn replace_question(mut self, index: usize, question: Question) -> Result<Self, DomainError> {
        check_index("question", index, self.questions.len())?;
        self.questions[index] = question;
        Ok(self)
    }

    /// Merge `patch` into the question at `index`.
    pub fn update_question(self, index: usize, patch: QuestionPatch) -> Result<Self, DomainError> {
        self.map_question(index, |q| q.apply(patch))
    }

    /// Replace the question at `index` with the result of `f`.
    pub fn map_question(
        mut self,
        index: usize,
        f: impl FnOnce(Question) -> Result<Question, DomainError>,
    ) -> Result<Self, DomainError> {
        check_index("question", index, self.questions.len())?;
        let current = self.questions.remove(index);
        let next = f(current)?;
        self.questions.insert(index, next);
        Ok(self)
    }

    /// Remove the question at `index`; later questions shift down by one.
    pub fn remove_question(mut self, index: usize) -> Result<Self, DomainError> {
        check_index("question", index, self.questions.len())?;
        self.questions.remove(index);
        Ok(self)
    }

    /// Append a submission, returning the stored entry.
    ///
    /// Earlier entries are never touched. If `at` is not after the last
    /// entry's timestamp it is moved to one microsecond past it.
    pub fn append_submission(&mut self, answers: AnswerSheet, at: DateTime<Utc>) -> &Submission {
        let at = match self.submissions.last() {
            Some(last) if at <= last.submitted_at => last.submitted_at + Duration::microseconds(1),
            _ => at,
        };
        self.submissions.push(Submission::new(answers, at));
        &self.submissions[self.submissions.len() - 1]
    }

    pub fn submissions(&self) -> &[Submission] {
        &self.submissions
    }

    /// Take title, header image and questions from `edited`, keeping this
    /// form's submissions.
    pub fn with_authoring_of(self, edited: Form) -> Self {
        Self {
            title: edited.title,
            header_image: edited.header_image,
            questions: edited.questions,
            submissions: self.submissions,
        }
    }

    /// Per-question violations, each tagged with its question index.
    pub fn validate(&self) -> Vec<Violation> {
        self.questions
            .iter()
            .enumerate()
            .flat_map(|(index, q)| q.validate().into_iter().map(move |v| v.at_question(index)))
            .collect()
    }

    /// Check a respondent's answers against this form's questions.
    pub fn check_answers(&self, answers: &AnswerSheet) -> Vec<Violation> {
        answers.check(&self.questions)
    }

    /// Number of answers-per-question across all submissions.
    pub fn response_counts(&self) -> Vec<usize> {
        let mut counts = vec![0; self.questions.len()];
        for submission in &self.submissions {
            for (index, answer) in submission.answers.iter() {
                if let Some(slot) = counts.get_mut(index)
                    && !answer.is_empty()
                {
                    *slot += 1;
                }
            }
        }
        counts
    }
}
