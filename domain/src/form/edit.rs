//! Editor actions on a form.
//!
//! Each editor interaction is a [`FormEdit`] value; [`Form::apply`] turns
//! the current form into the next one. Nothing is shared or mutated in
//! place, so the last applied edit always wins.
//!
//! `index` always addresses a question. Categories, items and
//! sub-questions inside it are addressed by their own position.

use super::Form;
use crate::core::error::DomainError;
use crate::question::{Question, QuestionPatch, QuestionType, SubQuestion, SubQuestionPatch};
use serde::{Deserialize, Serialize};

/// One editor action.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum FormEdit {
    SetTitle { title: String },
    SetHeaderImage { url: String },
    ClearHeaderImage,
    AddQuestion { question: Question },
    UpdateQuestion { index: usize, patch: QuestionPatch },
    ReplaceQuestion { index: usize, question: Question },
    RemoveQuestion { index: usize },
    SetQuestionImage { index: usize, url: String },
    ClearQuestionImage { index: usize },
    SetClozeText { index: usize, text: String },
    ToggleBlank { index: usize, token: usize },
    AddCategory { index: usize, name: String },
    RenameCategory { index: usize, category: usize, name: String },
    RemoveCategory { index: usize, category: usize },
    AddItem { index: usize, text: String },
    RenameItem { index: usize, item: usize, text: String },
    /// Also drops the correctCategory entry keyed by the item's text.
    RemoveItem { index: usize, item: usize },
    /// `None` clears the item's correct category.
    SetCorrectCategory {
        index: usize,
        item: usize,
        category: Option<String>,
    },
    SetPassage { index: usize, text: String },
    AddSubQuestion { index: usize, sub_question: SubQuestion },
    UpdateSubQuestion {
        index: usize,
        sub_question: usize,
        patch: SubQuestionPatch,
    },
    RemoveSubQuestion { index: usize, sub_question: usize },
    SetCorrectAnswer {
        index: usize,
        sub_question: usize,
        option: String,
    },
}

impl FormEdit {
    /// Add a question of `kind` with placeholder content.
    pub fn add(kind: QuestionType) -> Self {
        FormEdit::AddQuestion {
            question: Question::create_default(kind),
        }
    }
}

impl Form {
    /// Apply one editor action.
    pub fn apply(self, edit: FormEdit) -> Result<Form, DomainError> {
        match edit {
            FormEdit::SetTitle { title } => Ok(self.with_title(title)),
            FormEdit::SetHeaderImage { url } => Ok(self.with_header_image(url)),
            FormEdit::ClearHeaderImage => Ok(self.without_header_image()),
            FormEdit::AddQuestion { question } => Ok(self.add_question(question)),
            FormEdit::UpdateQuestion { index, patch } => self.update_question(index, patch),
            FormEdit::ReplaceQuestion { index, question } => self.replace_question(index, question),
            FormEdit::RemoveQuestion { index } => self.remove_question(index),
            FormEdit::SetQuestionImage { index, url } => {
                self.map_question(index, |q| Ok(q.with_image(url)))
            }
            FormEdit::ClearQuestionImage { index } => {
                self.map_question(index, |q| Ok(q.without_image()))
            }
            FormEdit::SetClozeText { index, text } => {
                self.map_question(index, |q| q.set_cloze_text(text))
            }
            FormEdit::ToggleBlank { index, token } => {
                self.map_question(index, |q| q.toggle_blank(token))
            }
            FormEdit::AddCategory { index, name } => self.map_question(index, |q| {
                q.map_categorize(|body| Ok(body.add_category(name)))
            }),
            FormEdit::RenameCategory {
                index,
                category,
                name,
            } => self.map_question(index, |q| {
                q.map_categorize(|body| body.rename_category(category, name))
            }),
            FormEdit::RemoveCategory { index, category } => self.map_question(index, |q| {
                q.map_categorize(|body| body.remove_category(category))
            }),
            FormEdit::AddItem { index, text } => {
                self.map_question(index, |q| q.map_categorize(|body| Ok(body.add_item(text))))
            }
            FormEdit::RenameItem { index, item, text } => self.map_question(index, |q| {
                q.map_categorize(|body| body.rename_item(item, text))
            }),
            FormEdit::RemoveItem { index, item } => {
                self.map_question(index, |q| q.map_categorize(|body| body.remove_item(item)))
            }
            FormEdit::SetCorrectCategory {
                index,
                item,
                category,
            } => self.map_question(index, |q| {
                q.map_categorize(|body| body.correct_category_at(item, category))
            }),
            FormEdit::SetPassage { index, text } => self.map_question(index, |q| {
                q.map_comprehension(|body| Ok(body.set_passage(text)))
            }),
            FormEdit::AddSubQuestion {
                index,
                sub_question,
            } => self.map_question(index, |q| {
                q.map_comprehension(|body| Ok(body.add_sub_question(sub_question)))
            }),
            FormEdit::UpdateSubQuestion {
                index,
                sub_question,
                patch,
            } => self.map_question(index, |q| {
                q.map_comprehension(|body| body.update_sub_question(sub_question, patch))
            }),
            FormEdit::RemoveSubQuestion {
                index,
                sub_question,
            } => self.map_question(index, |q| {
                q.map_comprehension(|body| body.remove_sub_question(sub_question))
            }),
            FormEdit::SetCorrectAnswer {
                index,
                sub_question,
                option,
            } => self.map_question(index, |q| {
                q.map_comprehension(|body| body.set_correct_answer(sub_question, option))
            }),
        }
    }

    /// Apply `edits` in order, stopping at the first failure.
    pub fn apply_all(self, edits: impl IntoIterator<Item = FormEdit>) -> Result<Form, DomainError> {
        edits.into_iter().try_fold(self, Form::apply)
    }
}
