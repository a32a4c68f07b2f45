//! Question variants.
//!
//! A [`Question`] is a shared envelope (title, optional image) around a
//! [`QuestionBody`] sum type. Every consumer matches the body exhaustively,
//! so adding a variant is a compile error until render, validation and
//! answer capture all handle it.
//!
//! All updates are pure: they consume the current value and return the next
//! one, mirroring the "replace whole record" behaviour of the editor.

pub mod categorize;
pub mod cloze;
pub mod comprehension;
pub mod patch;

use crate::core::error::DomainError;
use crate::validation::{Violation, ViolationCode};
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::str::FromStr;

pub use categorize::CategorizeBody;
pub use cloze::ClozeBody;
pub use comprehension::{ComprehensionBody, SubQuestion, SubQuestionPatch};
pub use patch::QuestionPatch;

/// Discriminant of the question variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum QuestionType {
    Categorize,
    Cloze,
    Comprehension,
}

impl QuestionType {
    pub const ALL: [QuestionType; 3] = [
        QuestionType::Categorize,
        QuestionType::Cloze,
        QuestionType::Comprehension,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            QuestionType::Categorize => "Categorize",
            QuestionType::Cloze => "Cloze",
            QuestionType::Comprehension => "Comprehension",
        }
    }

    /// Title given to a freshly added question of this type.
    pub fn default_title(&self) -> String {
        format!("New {} Question", self.as_str())
    }
}

impl fmt::Display for QuestionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for QuestionType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "categorize" => Ok(QuestionType::Categorize),
            "cloze" => Ok(QuestionType::Cloze),
            "comprehension" => Ok(QuestionType::Comprehension),
            other => Err(format!(
                "unknown question type '{}' (expected categorize, cloze or comprehension)",
                other
            )),
        }
    }
}

/// Variant-specific authoring state, tagged by `type` when serialized.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum QuestionBody {
    Categorize(CategorizeBody),
    Cloze(ClozeBody),
    Comprehension(ComprehensionBody),
}

impl QuestionBody {
    pub fn kind(&self) -> QuestionType {
        match self {
            QuestionBody::Categorize(_) => QuestionType::Categorize,
            QuestionBody::Cloze(_) => QuestionType::Cloze,
            QuestionBody::Comprehension(_) => QuestionType::Comprehension,
        }
    }
}

/// A question on a form (Entity, addressed by its position in the form)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    #[serde(default)]
    pub title: String,
    #[serde(
        default,
        deserialize_with = "non_empty_url",
        skip_serializing_if = "Option::is_none"
    )]
    pub image: Option<String>,
    #[serde(flatten)]
    pub body: QuestionBody,
}

/// The editor stores `""` after an image is removed.
pub(crate) fn non_empty_url<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value: Option<String> = Option::deserialize(deserializer)?;
    Ok(value.filter(|url| !url.trim().is_empty()))
}

impl Question {
    pub fn new(title: impl Into<String>, body: QuestionBody) -> Self {
        Self {
            title: title.into(),
            image: None,
            body,
        }
    }

    /// Create a question of `kind` with the editor's placeholder content.
    pub fn create(kind: QuestionType, title_seed: impl Into<String>) -> Self {
        let body = match kind {
            QuestionType::Categorize => QuestionBody::Categorize(CategorizeBody::placeholder()),
            QuestionType::Cloze => QuestionBody::Cloze(ClozeBody::placeholder()),
            QuestionType::Comprehension => {
                QuestionBody::Comprehension(ComprehensionBody::placeholder())
            }
        };
        Self::new(title_seed, body)
    }

    /// [`Question::create`] with the default "New … Question" title.
    pub fn create_default(kind: QuestionType) -> Self {
        Self::create(kind, kind.default_title())
    }

    pub fn kind(&self) -> QuestionType {
        self.body.kind()
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn with_image(mut self, url: impl Into<String>) -> Self {
        let url = url.into();
        self.image = if url.trim().is_empty() { None } else { Some(url) };
        self
    }

    pub fn without_image(mut self) -> Self {
        self.image = None;
        self
    }

    pub fn as_categorize(&self) -> Option<&CategorizeBody> {
        match &self.body {
            QuestionBody::Categorize(body) => Some(body),
            _ => None,
        }
    }

    pub fn as_cloze(&self) -> Option<&ClozeBody> {
        match &self.body {
            QuestionBody::Cloze(body) => Some(body),
            _ => None,
        }
    }

    pub fn as_comprehension(&self) -> Option<&ComprehensionBody> {
        match &self.body {
            QuestionBody::Comprehension(body) => Some(body),
            _ => None,
        }
    }

    /// Replace the Categorize body via `f`.
    pub fn map_categorize(
        self,
        f: impl FnOnce(CategorizeBody) -> Result<CategorizeBody, DomainError>,
    ) -> Result<Self, DomainError> {
        let Question { title, image, body } = self;
        match body {
            QuestionBody::Categorize(inner) => Ok(Question {
                title,
                image,
                body: QuestionBody::Categorize(f(inner)?),
            }),
            other => Err(mismatch(QuestionType::Categorize, other.kind())),
        }
    }

    /// Replace the Cloze body via `f`.
    pub fn map_cloze(
        self,
        f: impl FnOnce(ClozeBody) -> Result<ClozeBody, DomainError>,
    ) -> Result<Self, DomainError> {
        let Question { title, image, body } = self;
        match body {
            QuestionBody::Cloze(inner) => Ok(Question {
                title,
                image,
                body: QuestionBody::Cloze(f(inner)?),
            }),
            other => Err(mismatch(QuestionType::Cloze, other.kind())),
        }
    }

    /// Replace the Comprehension body via `f`.
    pub fn map_comprehension(
        self,
        f: impl FnOnce(ComprehensionBody) -> Result<ComprehensionBody, DomainError>,
    ) -> Result<Self, DomainError> {
        let Question { title, image, body } = self;
        match body {
            QuestionBody::Comprehension(inner) => Ok(Question {
                title,
                image,
                body: QuestionBody::Comprehension(f(inner)?),
            }),
            other => Err(mismatch(QuestionType::Comprehension, other.kind())),
        }
    }

    /// Toggle a cloze blank by token index.
    pub fn toggle_blank(self, token_index: usize) -> Result<Self, DomainError> {
        self.map_cloze(|body| body.toggle_blank(token_index))
    }

    /// Replace the cloze text, resetting every blank.
    pub fn set_cloze_text(self, text: impl Into<String>) -> Result<Self, DomainError> {
        let text = text.into();
        self.map_cloze(|body| Ok(body.set_text(text)))
    }

    /// Advisory checks. An empty list means the question is ready to answer.
    pub fn validate(&self) -> Vec<Violation> {
        let mut violations = Vec::new();
        if self.title.trim().is_empty() {
            violations.push(Violation::warning(
                ViolationCode::EmptyTitle,
                "question title is empty",
            ));
        }
        violations.extend(match &self.body {
            QuestionBody::Categorize(body) => body.validate(),
            QuestionBody::Cloze(body) => body.validate(),
            QuestionBody::Comprehension(body) => body.validate(),
        });
        violations
    }
}

fn mismatch(expected: QuestionType, actual: QuestionType) -> DomainError {
    DomainError::QuestionTypeMismatch {
        expected: expected.as_str(),
        actual: actual.as_str(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_create_categorize_defaults() {
        let q = Question::create_default(QuestionType::Categorize);
        assert_eq!(q.title, "New Categorize Question");
        let body = q.as_categorize().unwrap();
        assert_eq!(body.categories, vec!["Category 1", "Category 2"]);
        assert_eq!(body.items, vec!["Item 1", "Item 2"]);
        assert!(body.correct_category.is_empty());
    }

    #[test]
    fn test_create_comprehension_defaults() {
        let q = Question::create(QuestionType::Comprehension, "Reading");
        assert_eq!(q.title, "Reading");
        let body = q.as_comprehension().unwrap();
        assert_eq!(body.sub_questions.len(), 1);
        assert_eq!(body.sub_questions[0].question, "New MCQ Question");
        assert_eq!(body.sub_questions[0].options, vec!["Option A", "Option B"]);
        assert_eq!(body.sub_questions[0].correct_answer, "");
    }

    #[test]
    fn test_create_cloze_defaults() {
        let q = Question::create_default(QuestionType::Cloze);
        let body = q.as_cloze().unwrap();
        assert_eq!(body.text, "Type your text here with [blank] placeholders.");
        assert!(body.structure.is_none());
    }

    #[test]
    fn test_question_type_parse() {
        assert_eq!("cloze".parse::<QuestionType>(), Ok(QuestionType::Cloze));
        assert_eq!(
            "Comprehension".parse::<QuestionType>(),
            Ok(QuestionType::Comprehension)
        );
        assert!("essay".parse::<QuestionType>().is_err());
    }

    #[test]
    fn test_map_wrong_variant_fails() {
        let q = Question::create_default(QuestionType::Categorize);
        assert_eq!(
            q.toggle_blank(0),
            Err(DomainError::QuestionTypeMismatch {
                expected: "Cloze",
                actual: "Categorize",
            })
        );
    }

    #[test]
    fn test_toggle_blank_through_question() {
        let q = Question::new("Fill", QuestionBody::Cloze(ClozeBody::new("The cat sat")))
            .toggle_blank(2)
            .unwrap();
        assert_eq!(q.as_cloze().unwrap().structure().blank_words(), vec!["cat"]);
        let q = q.set_cloze_text("The dog sat").unwrap();
        assert_eq!(q.as_cloze().unwrap().blank_count(), 0);
    }

    #[test]
    fn test_image_envelope() {
        let q = Question::create_default(QuestionType::Cloze).with_image("https://img/x.png");
        assert_eq!(q.image.as_deref(), Some("https://img/x.png"));
        assert!(q.clone().with_image("").image.is_none());
        assert!(q.without_image().image.is_none());
    }

    #[test]
    fn test_serialized_shape() {
        let q = Question::create_default(QuestionType::Comprehension).with_image("u");
        let value = serde_json::to_value(&q).unwrap();
        assert_eq!(value["type"], "Comprehension");
        assert_eq!(value["title"], "New Comprehension Question");
        assert_eq!(value["image"], "u");
        assert_eq!(value["subQuestions"][0]["correctAnswer"], "");
        assert_eq!(value["text"], "Enter your comprehension passage here...");
    }

    #[test]
    fn test_deserialize_editor_record() {
        let value = json!({
            "type": "Categorize",
            "title": "Sort",
            "image": "",
            "categories": ["Fruit"],
            "items": ["Apple"],
            "correctCategory": {"Apple": "Fruit"}
        });
        let q: Question = serde_json::from_value(value).unwrap();
        assert!(q.image.is_none());
        let body = q.as_categorize().unwrap();
        assert_eq!(body.correct_category.get("Apple").map(String::as_str), Some("Fruit"));
    }

    #[test]
    fn test_deserialize_missing_collections_default_empty() {
        let q: Question = serde_json::from_value(json!({"type": "Categorize"})).unwrap();
        let body = q.as_categorize().unwrap();
        assert!(body.categories.is_empty());
        assert!(body.items.is_empty());
        assert_eq!(q.title, "");
    }

    #[test]
    fn test_validate_dispatches() {
        let q = Question::create(QuestionType::Cloze, "");
        let codes: Vec<_> = q.validate().into_iter().map(|v| v.code).collect();
        assert_eq!(codes, vec![ViolationCode::EmptyTitle, ViolationCode::NoBlanks]);
    }
}
