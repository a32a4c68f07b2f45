//! Domain layer for formsmith
//!
//! This crate contains the core logic of the form builder: question
//! variants, the cloze text-to-blank transformation, answer capture and the
//! form aggregate. It performs no I/O and has no dependencies on
//! infrastructure or presentation concerns.
//!
//! # Core Concepts
//!
//! ## Cloze blanks
//!
//! Cloze text is segmented into word and whitespace tokens
//! ([`cloze::segment`]). Authors mark word tokens as blanks
//! ([`BlankStructure::toggle`]); the blanks, in text order, are numbered by
//! ordinal and respondents fill them by ordinal.
//!
//! ## Questions and answers
//!
//! - **Categorize**: place items into categories
//! - **Cloze**: fill blanks in a text
//! - **Comprehension**: read a passage, answer multiple-choice questions
//!
//! Each variant has a matching [`Answer`] shape. Capture never fails;
//! [`AnswerSheet::check`] reports advisory [`Violation`]s at submission.

pub mod answer;
pub mod cloze;
pub mod core;
pub mod form;
pub mod question;
pub mod validation;

// Re-export commonly used types
pub use answer::{
    Answer, AnswerSheet, BlankAnswer, CategoryAnswer, ChoiceAnswer, raw::RawAnswerError,
};
pub use cloze::{BlankStructure, BlankToken, Token, segment};
pub use core::error::{DomainError, IndexErrorKind};
pub use form::{Form, FormEdit, FormId, Submission};
pub use question::{
    CategorizeBody, ClozeBody, ComprehensionBody, Question, QuestionBody, QuestionPatch,
    QuestionType, SubQuestion, SubQuestionPatch,
};
pub use validation::{Severity, Violation, ViolationCode};
