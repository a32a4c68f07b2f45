//! Advisory validation results.
//!
//! Violations describe shape problems in questions and captured answers.
//! They are reported to the author or logged, but never block saving or
//! submitting.

use serde::Serialize;
use std::fmt;

/// How much a violation matters to the respondent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// The question cannot be answered as authored.
    Error,
    /// The question works but something looks unintended.
    Warning,
}

/// Identifies a specific violation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ViolationCode {
    EmptyTitle,
    NoCategories,
    NoItems,
    DuplicateCategory,
    DuplicateItem,
    /// correctCategory is keyed by an item text that no longer exists.
    CorrectCategoryUnknownItem,
    /// correctCategory points at a category that no longer exists.
    CorrectCategoryUnknownCategory,
    EmptyText,
    NoBlanks,
    /// The stored blank structure no longer matches the cloze text.
    StaleStructure,
    NoSubQuestions,
    EmptySubQuestion,
    TooFewOptions,
    CorrectAnswerNotAnOption,

    // Answer boundary checks
    AnswerForUnknownQuestion,
    AnswerTypeMismatch,
    UnknownItem,
    UnknownCategory,
    BlankOutOfRange,
    SubQuestionOutOfRange,
    OptionNotOffered,
}

/// A detected problem, optionally tied to a question by index.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Violation {
    pub severity: Severity,
    pub code: ViolationCode,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub question: Option<usize>,
}

impl Violation {
    pub fn error(code: ViolationCode, message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Error,
            code,
            message: message.into(),
            question: None,
        }
    }

    pub fn warning(code: ViolationCode, message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Warning,
            code,
            message: message.into(),
            question: None,
        }
    }

    /// Attach the index of the question this violation belongs to.
    pub fn at_question(mut self, index: usize) -> Self {
        self.question = Some(index);
        self
    }

    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let level = match self.severity {
            Severity::Error => "error",
            Severity::Warning => "warning",
        };
        match self.question {
            Some(index) => write!(f, "{} (question {}): {}", level, index + 1, self.message),
            None => write!(f, "{}: {}", level, self.message),
        }
    }
}
