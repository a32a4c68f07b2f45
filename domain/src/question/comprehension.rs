//! Comprehension questions: a passage followed by multiple-choice questions.

use crate::core::error::{DomainError, check_index};
use crate::validation::{Violation, ViolationCode};
use serde::{Deserialize, Serialize};

/// One multiple-choice question under a passage.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubQuestion {
    #[serde(default)]
    pub question: String,
    #[serde(default)]
    pub options: Vec<String>,
    /// Stored for authors; never used for scoring.
    #[serde(default)]
    pub correct_answer: String,
}

impl SubQuestion {
    pub fn new(question: impl Into<String>, options: Vec<String>) -> Self {
        Self {
            question: question.into(),
            options,
            correct_answer: String::new(),
        }
    }

    /// The sub-question added by "add MCQ question" in the editor.
    pub fn placeholder() -> Self {
        Self::new(
            "New MCQ Question",
            vec!["Option A".to_string(), "Option B".to_string()],
        )
    }

    /// Parse options typed as a comma-separated list.
    ///
    /// Each entry is trimmed; empty entries are kept so the author sees
    /// them flagged rather than silently dropped.
    pub fn parse_options(csv: &str) -> Vec<String> {
        csv.split(',').map(|s| s.trim().to_string()).collect()
    }

    pub fn has_option(&self, option: &str) -> bool {
        self.options.iter().any(|o| o == option)
    }

    /// Shallow merge: fields present in `patch` replace the current ones.
    pub fn apply(self, patch: SubQuestionPatch) -> Self {
        Self {
            question: patch.question.unwrap_or(self.question),
            options: patch.options.unwrap_or(self.options),
            correct_answer: patch.correct_answer.unwrap_or(self.correct_answer),
        }
    }
}

/// Shallow update for a single sub-question.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SubQuestionPatch {
    pub question: Option<String>,
    pub options: Option<Vec<String>>,
    pub correct_answer: Option<String>,
}

/// Authoring state of a Comprehension question.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComprehensionBody {
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub sub_questions: Vec<SubQuestion>,
}

impl ComprehensionBody {
    pub fn new(text: impl Into<String>, sub_questions: Vec<SubQuestion>) -> Self {
        Self {
            text: text.into(),
            sub_questions,
        }
    }

    pub(crate) fn placeholder() -> Self {
        Self::new(
            "Enter your comprehension passage here...",
            vec![SubQuestion::placeholder()],
        )
    }

    pub fn set_passage(mut self, text: impl Into<String>) -> Self {
        self.text = text.into();
        self
    }

    pub fn add_sub_question(mut self, sub: SubQuestion) -> Self {
        self.sub_questions.push(sub);
        self
    }

    pub fn update_sub_question(mut self, index: usize, patch: SubQuestionPatch) -> Result<Self, DomainError> {
        check_index("sub-question", index, self.sub_questions.len())?;
        let current = std::mem::take(&mut self.sub_questions[index]);
        self.sub_questions[index] = current.apply(patch);
        Ok(self)
    }

    /// Remove by index; later sub-questions shift down in order.
    pub fn remove_sub_question(mut self, index: usize) -> Result<Self, DomainError> {
        check_index("sub-question", index, self.sub_questions.len())?;
        self.sub_questions.remove(index);
        Ok(self)
    }

    pub fn set_correct_answer(self, index: usize, option: impl Into<String>) -> Result<Self, DomainError> {
        self.update_sub_question(
            index,
            SubQuestionPatch {
                correct_answer: Some(option.into()),
                ..Default::default()
            },
        )
    }

    pub(crate) fn validate(&self) -> Vec<Violation> {
        let mut violations = Vec::new();

        if self.text.trim().is_empty() {
            violations.push(Violation::warning(
                ViolationCode::EmptyText,
                "comprehension passage is empty",
            ));
        }
        if self.sub_questions.is_empty() {
            violations.push(Violation::error(
                ViolationCode::NoSubQuestions,
                "comprehension question has no multiple-choice questions",
            ));
        }

        for (i, sub) in self.sub_questions.iter().enumerate() {
            if sub.question.trim().is_empty() {
                violations.push(Violation::warning(
                    ViolationCode::EmptySubQuestion,
                    format!("multiple-choice question {} has no text", i + 1),
                ));
            }
            let usable = sub.options.iter().filter(|o| !o.trim().is_empty()).count();
            if usable < 2 {
                violations.push(Violation::error(
                    ViolationCode::TooFewOptions,
                    format!(
                        "multiple-choice question {} has {} usable option(s), needs at least 2",
                        i + 1,
                        usable
                    ),
                ));
            }
            if !sub.correct_answer.is_empty() && !sub.has_option(&sub.correct_answer) {
                violations.push(Violation::warning(
                    ViolationCode::CorrectAnswerNotAnOption,
                    format!(
                        "correct answer '{}' of multiple-choice question {} is not one of its options",
                        sub.correct_answer,
                        i + 1
                    ),
                ));
            }
        }

        violations
    }
}
