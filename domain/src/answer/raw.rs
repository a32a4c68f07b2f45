//! Typing untagged answer mappings.
//!
//! Respondent clients send `{ "<questionIndex>": <answer> }` where the answer
//! shape depends on the question type and carries no tag of its own. The
//! form's questions supply the type.

use super::{Answer, AnswerSheet, BlankAnswer, CategoryAnswer, ChoiceAnswer};
use crate::question::{Question, QuestionType};
use serde::Deserialize;
use serde_json::Value;
use thiserror::Error;

/// Errors decoding an untagged answer mapping
#[derive(Error, Debug)]
pub enum RawAnswerError {
    #[error("answers must be a JSON object keyed by question index")]
    NotAnObject,

    #[error("'{0}' is not a question index")]
    BadQuestionIndex(String),

    #[error("question {0} does not exist")]
    UnknownQuestion(usize),

    #[error("answer to question {question} does not fit a {kind} question: {source}")]
    Shape {
        question: usize,
        kind: QuestionType,
        #[source]
        source: serde_json::Error,
    },
}

impl AnswerSheet {
    /// Build a sheet from an untagged mapping, using `questions` to decide
    /// the shape of each answer.
    ///
    /// Entries that are already tagged (`{"type": …, "values": …}`) are
    /// accepted as they are.
    pub fn from_raw(questions: &[Question], raw: Value) -> Result<Self, RawAnswerError> {
        let Value::Object(map) = raw else {
            return Err(RawAnswerError::NotAnObject);
        };

        let mut sheet = AnswerSheet::new();
        for (key, value) in map {
            let index: usize = key
                .trim()
                .parse()
                .map_err(|_| RawAnswerError::BadQuestionIndex(key.clone()))?;
            let question = questions
                .get(index)
                .ok_or(RawAnswerError::UnknownQuestion(index))?;
            let answer = decode(question.kind(), value).map_err(|source| RawAnswerError::Shape {
                question: index,
                kind: question.kind(),
                source,
            })?;
            sheet = sheet.record(index, answer);
        }
        Ok(sheet)
    }
}

fn decode(kind: QuestionType, value: Value) -> Result<Answer, serde_json::Error> {
    // The respondent view sends "" for questions it never touched.
    if matches!(&value, Value::String(s) if s.is_empty()) || value.is_null() {
        return Ok(Answer::empty_for(kind));
    }

    // The untagged shape wins: item texts such as "type" are legal keys.
    let untagged = match kind {
        QuestionType::Categorize => CategoryAnswer::deserialize(&value).map(Answer::Categorize),
        QuestionType::Cloze => BlankAnswer::deserialize(&value).map(Answer::Cloze),
        QuestionType::Comprehension => ChoiceAnswer::deserialize(&value).map(Answer::Comprehension),
    };
    match untagged {
        Err(_) if is_tagged(&value) => serde_json::from_value(value),
        other => other,
    }
}

fn is_tagged(value: &Value) -> bool {
    value.as_object().is_some_and(|o| {
        o.len() == 2 && o.get("type").is_some_and(Value::is_string) && o.contains_key("values")
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::question::{CategorizeBody, ClozeBody, QuestionBody};
    use serde_json::json;

    fn questions() -> Vec<Question> {
        vec![
            Question::create_default(QuestionType::Categorize),
            Question::new("c", QuestionBody::Cloze(ClozeBody::new("The cat sat")))
                .toggle_blank(2)
                .unwrap(),
            Question::create_default(QuestionType::Comprehension),
        ]
    }

    #[test]
    fn test_from_raw_types_each_answer() {
        let raw = json!({
            "0": {"Item 1": "Category 1"},
            "1": {"0": "dog"},
            "2": {"0": "Option A"}
        });
        let sheet = AnswerSheet::from_raw(&questions(), raw).unwrap();
        assert_eq!(
            sheet.get(0),
            Some(&Answer::Categorize(
                CategoryAnswer::new().set_category_for_item("Item 1", "Category 1")
            ))
        );
        assert_eq!(sheet.get(1), Some(&Answer::Cloze(BlankAnswer::new().set_blank(0, "dog"))));
        assert_eq!(
            sheet.get(2),
            Some(&Answer::Comprehension(ChoiceAnswer::new().set_choice(0, "Option A")))
        );
    }

    #[test]
    fn test_from_raw_accepts_tagged_entries() {
        let raw = json!({"1": {"type": "Cloze", "values": {"0": "dog"}}});
        let sheet = AnswerSheet::from_raw(&questions(), raw).unwrap();
        assert_eq!(sheet.get(1), Some(&Answer::Cloze(BlankAnswer::new().set_blank(0, "dog"))));
    }

    #[test]
    fn test_from_raw_items_named_like_tag_fields() {
        let question = Question::new(
            "Sort",
            QuestionBody::Categorize(CategorizeBody::new(
                vec!["Noun".to_string()],
                vec!["type".to_string(), "values".to_string()],
            )),
        );
        let raw = json!({"0": {"type": "Noun", "values": "Noun"}});

        let sheet = AnswerSheet::from_raw(&[question], raw).unwrap();
        assert_eq!(
            sheet.get(0),
            Some(&Answer::Categorize(
                CategoryAnswer::new()
                    .set_category_for_item("type", "Noun")
                    .set_category_for_item("values", "Noun")
            ))
        );
    }

    #[test]
    fn test_from_raw_untouched_question() {
        let sheet = AnswerSheet::from_raw(&questions(), json!({"0": ""})).unwrap();
        assert!(sheet.get(0).unwrap().is_empty());
    }

    #[test]
    fn test_from_raw_errors() {
        assert!(matches!(
            AnswerSheet::from_raw(&questions(), json!([1, 2])),
            Err(RawAnswerError::NotAnObject)
        ));
        assert!(matches!(
            AnswerSheet::from_raw(&questions(), json!({"x": {}})),
            Err(RawAnswerError::BadQuestionIndex(_))
        ));
        assert!(matches!(
            AnswerSheet::from_raw(&questions(), json!({"9": {}})),
            Err(RawAnswerError::UnknownQuestion(9))
        ));
        assert!(matches!(
            AnswerSheet::from_raw(&questions(), json!({"1": {"first": "dog"}})),
            Err(RawAnswerError::Shape { question: 1, .. })
        ));
    }
}
