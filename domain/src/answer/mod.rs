//! Answer capture.
//!
//! - [`capture`]: per-variant answer values and their set/unset operations
//! - [`AnswerSheet`]: question index → [`Answer`] for one respondent
//! - [`check`]: advisory checks of a sheet against the form's questions
//! - [`raw`]: typing an untagged answer mapping using the form's questions

pub mod capture;
pub mod check;
pub mod raw;

use crate::question::QuestionType;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

pub use capture::{BlankAnswer, CategoryAnswer, ChoiceAnswer};

/// A respondent's answer to one question, shaped by the question type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "values")]
pub enum Answer {
    Categorize(CategoryAnswer),
    Cloze(BlankAnswer),
    Comprehension(ChoiceAnswer),
}

impl Answer {
    /// An empty answer of the right shape for `kind`.
    pub fn empty_for(kind: QuestionType) -> Self {
        match kind {
            QuestionType::Categorize => Answer::Categorize(CategoryAnswer::new()),
            QuestionType::Cloze => Answer::Cloze(BlankAnswer::new()),
            QuestionType::Comprehension => Answer::Comprehension(ChoiceAnswer::new()),
        }
    }

    pub fn kind(&self) -> QuestionType {
        match self {
            Answer::Categorize(_) => QuestionType::Categorize,
            Answer::Cloze(_) => QuestionType::Cloze,
            Answer::Comprehension(_) => QuestionType::Comprehension,
        }
    }

    pub fn is_empty(&self) -> bool {
        match self {
            Answer::Categorize(a) => a.is_empty(),
            Answer::Cloze(a) => a.is_empty(),
            Answer::Comprehension(a) => a.is_empty(),
        }
    }
}

impl From<CategoryAnswer> for Answer {
    fn from(answer: CategoryAnswer) -> Self {
        Answer::Categorize(answer)
    }
}

impl From<BlankAnswer> for Answer {
    fn from(answer: BlankAnswer) -> Self {
        Answer::Cloze(answer)
    }
}

impl From<ChoiceAnswer> for Answer {
    fn from(answer: ChoiceAnswer) -> Self {
        Answer::Comprehension(answer)
    }
}

/// All answers of one respondent, keyed by question index.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AnswerSheet {
    answers: BTreeMap<usize, Answer>,
}

impl AnswerSheet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the whole answer for one question.
    pub fn record(mut self, question_index: usize, answer: impl Into<Answer>) -> Self {
        self.answers.insert(question_index, answer.into());
        self
    }

    pub fn get(&self, question_index: usize) -> Option<&Answer> {
        self.answers.get(&question_index)
    }

    pub fn iter(&self) -> impl Iterator<Item = (usize, &Answer)> {
        self.answers.iter().map(|(i, a)| (*i, a))
    }

    pub fn len(&self) -> usize {
        self.answers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.answers.is_empty()
    }
}
