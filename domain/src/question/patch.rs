//! Shallow question updates.

use super::{Question, QuestionBody, SubQuestion};
use crate::cloze::BlankStructure;
use crate::core::error::DomainError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A delta merged shallowly into a [`Question`].
///
/// Present fields replace the current value wholesale (arrays are not
/// diffed). Fields that do not exist on the question's variant are ignored.
/// An empty `image` clears the image.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct QuestionPatch {
    pub title: Option<String>,
    pub image: Option<String>,
    pub categories: Option<Vec<String>>,
    pub items: Option<Vec<String>>,
    pub correct_category: Option<BTreeMap<String, String>>,
    pub text: Option<String>,
    pub structure: Option<BlankStructure>,
    pub sub_questions: Option<Vec<SubQuestion>>,
}

impl QuestionPatch {
    pub fn title(title: impl Into<String>) -> Self {
        Self {
            title: Some(title.into()),
            ..Default::default()
        }
    }

    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
            ..Default::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

impl Question {
    /// Merge `patch` into this question.
    ///
    /// For Cloze, a changed `text` re-derives the blank structure (clearing
    /// all blanks) unless the patch also carries a structure for the new
    /// text. A supplied structure that does not match the resulting text is
    /// rejected with `StructureMismatch`.
    pub fn apply(self, patch: QuestionPatch) -> Result<Self, DomainError> {
        let QuestionPatch {
            title,
            image,
            categories,
            items,
            correct_category,
            text,
            structure,
            sub_questions,
        } = patch;

        let mut next = self;
        if let Some(title) = title {
            next.title = title;
        }
        if let Some(image) = image {
            next = next.with_image(image);
        }

        next.body = match next.body {
            QuestionBody::Categorize(mut body) => {
                if let Some(categories) = categories {
                    body.categories = categories;
                }
                if let Some(items) = items {
                    body.items = items;
                }
                if let Some(correct) = correct_category {
                    body.correct_category = correct;
                }
                QuestionBody::Categorize(body)
            }
            QuestionBody::Cloze(body) => {
                let body = match text {
                    Some(text) if text != body.text => body.set_text(text),
                    _ => body,
                };
                let body = match structure {
                    Some(structure) => body.with_structure(structure)?,
                    None => body,
                };
                QuestionBody::Cloze(body)
            }
            QuestionBody::Comprehension(mut body) => {
                if let Some(text) = text {
                    body.text = text;
                }
                if let Some(subs) = sub_questions {
                    body.sub_questions = subs;
                }
                QuestionBody::Comprehension(body)
            }
        };

        Ok(next)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::question::{ClozeBody, QuestionType};

    #[test]
    fn test_title_patch_keeps_body() {
        let q = Question::create_default(QuestionType::Categorize);
        let next = q.clone().apply(QuestionPatch::title("Animals")).unwrap();
        assert_eq!(next.title, "Animals");
        assert_eq!(next.body, q.body);
    }

    #[test]
    fn test_arrays_replaced_wholesale() {
        let q = Question::create_default(QuestionType::Categorize);
        let next = q
            .apply(QuestionPatch {
                items: Some(vec!["Dog".to_string()]),
                ..Default::default()
            })
            .unwrap();
        let body = next.as_categorize().unwrap();
        assert_eq!(body.items, vec!["Dog"]);
        assert_eq!(body.categories, vec!["Category 1", "Category 2"]);
    }

    #[test]
    fn test_foreign_fields_ignored() {
        let q = Question::create_default(QuestionType::Comprehension);
        let next = q
            .clone()
            .apply(QuestionPatch {
                categories: Some(vec!["x".to_string()]),
                ..Default::default()
            })
            .unwrap();
        assert_eq!(next, q);
    }

    #[test]
    fn test_cloze_text_change_resets_blanks() {
        let q = Question::new("c", QuestionBody::Cloze(ClozeBody::new("The cat sat")))
            .toggle_blank(2)
            .unwrap();
        let next = q.apply(QuestionPatch::text("The cat sat down")).unwrap();
        let body = next.as_cloze().unwrap();
        assert_eq!(body.blank_count(), 0);
        assert!(body.structure.is_some());
    }

    #[test]
    fn test_cloze_unchanged_text_keeps_blanks() {
        let q = Question::new("c", QuestionBody::Cloze(ClozeBody::new("The cat sat")))
            .toggle_blank(2)
            .unwrap();
        let next = q.apply(QuestionPatch::text("The cat sat")).unwrap();
        assert_eq!(next.as_cloze().unwrap().blank_count(), 1);
    }

    #[test]
    fn test_cloze_text_with_matching_structure() {
        let q = Question::new("c", QuestionBody::Cloze(ClozeBody::new("old")));
        let structure = BlankStructure::derive_from("new text").toggle(2).unwrap();
        let next = q
            .apply(QuestionPatch {
                text: Some("new text".to_string()),
                structure: Some(structure),
                ..Default::default()
            })
            .unwrap();
        assert_eq!(next.as_cloze().unwrap().structure().blank_words(), vec!["text"]);
    }

    #[test]
    fn test_cloze_mismatched_structure_rejected() {
        let q = Question::new("c", QuestionBody::Cloze(ClozeBody::new("old")));
        let result = q.apply(QuestionPatch {
            structure: Some(BlankStructure::derive_from("other words")),
            ..Default::default()
        });
        assert_eq!(result, Err(DomainError::StructureMismatch));
    }

    #[test]
    fn test_cloze_structure_with_whitespace_blank_rejected() {
        let q = Question::new("c", QuestionBody::Cloze(ClozeBody::new("The cat")));
        let patch: QuestionPatch = serde_json::from_str(
            r#"{"structure":[
                {"text":"The","isBlankCandidate":true,"index":0,"blank":false},
                {"text":" ","isBlankCandidate":true,"index":1,"blank":true},
                {"text":"cat","isBlankCandidate":true,"index":2,"blank":false}]}"#,
        )
        .unwrap();
        assert_eq!(q.apply(patch), Err(DomainError::StructureMismatch));
    }

    #[test]
    fn test_empty_image_clears() {
        let q = Question::create_default(QuestionType::Cloze).with_image("http://x");
        let next = q
            .apply(QuestionPatch {
                image: Some(String::new()),
                ..Default::default()
            })
            .unwrap();
        assert!(next.image.is_none());
    }

    #[test]
    fn test_patch_from_json() {
        let patch: QuestionPatch =
            serde_json::from_str(r#"{"title":"T","subQuestions":[{"question":"Q","options":["a","b"]}]}"#)
                .unwrap();
        assert_eq!(patch.title.as_deref(), Some("T"));
        assert_eq!(patch.sub_questions.unwrap()[0].options, vec!["a", "b"]);
        assert!(QuestionPatch::default().is_empty());
    }
}
