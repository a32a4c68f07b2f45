//! Advisory checks of captured answers against the questions they answer.
//!
//! Runs at the boundary between capture and persistence. Findings are
//! reported, the submission is stored regardless.

use super::{Answer, AnswerSheet};
use crate::question::{Question, QuestionBody};
use crate::validation::{Violation, ViolationCode};

impl AnswerSheet {
    /// Check every answer against `questions`.
    pub fn check(&self, questions: &[Question]) -> Vec<Violation> {
        let mut violations = Vec::new();

        for (index, answer) in self.iter() {
            let Some(question) = questions.get(index) else {
                violations.push(
                    Violation::warning(
                        ViolationCode::AnswerForUnknownQuestion,
                        format!("answer given for question {} which does not exist", index + 1),
                    )
                    .at_question(index),
                );
                continue;
            };

            let found = check_answer(question, answer)
                .into_iter()
                .map(|v| v.at_question(index));
            violations.extend(found);
        }

        violations
    }
}

fn check_answer(question: &Question, answer: &Answer) -> Vec<Violation> {
    let mut violations = Vec::new();

    match (&question.body, answer) {
        (QuestionBody::Categorize(body), Answer::Categorize(answer)) => {
            for (item, category) in answer.placements() {
                if !body.has_item(item) {
                    violations.push(Violation::warning(
                        ViolationCode::UnknownItem,
                        format!("item '{}' is not part of the question", item),
                    ));
                }
                if !body.has_category(category) {
                    violations.push(Violation::warning(
                        ViolationCode::UnknownCategory,
                        format!("category '{}' is not part of the question", category),
                    ));
                }
            }
        }
        (QuestionBody::Cloze(body), Answer::Cloze(answer)) => {
            let blanks = body.blank_count();
            for ordinal in answer.fills().keys() {
                if *ordinal >= blanks {
                    violations.push(Violation::warning(
                        ViolationCode::BlankOutOfRange,
                        format!(
                            "blank {} was filled but the text has {} blank(s)",
                            ordinal + 1,
                            blanks
                        ),
                    ));
                }
            }
        }
        (QuestionBody::Comprehension(body), Answer::Comprehension(answer)) => {
            for (index, option) in answer.choices() {
                match body.sub_questions.get(*index) {
                    None => violations.push(Violation::warning(
                        ViolationCode::SubQuestionOutOfRange,
                        format!(
                            "multiple-choice question {} was answered but there are only {}",
                            index + 1,
                            body.sub_questions.len()
                        ),
                    )),
                    Some(sub) if !sub.has_option(option) => violations.push(Violation::warning(
                        ViolationCode::OptionNotOffered,
                        format!(
                            "'{}' is not an option of multiple-choice question {}",
                            option,
                            index + 1
                        ),
                    )),
                    Some(_) => {}
                }
            }
        }
        (body, answer) => violations.push(Violation::error(
            ViolationCode::AnswerTypeMismatch,
            format!(
                "{} answer given for a {} question",
                answer.kind(),
                body.kind()
            ),
        )),
    }

    violations
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::answer::{BlankAnswer, CategoryAnswer, ChoiceAnswer};
    use crate::question::{ClozeBody, ComprehensionBody, QuestionType, SubQuestion};

    fn codes(violations: &[Violation]) -> Vec<ViolationCode> {
        violations.iter().map(|v| v.code).collect()
    }

    fn cloze(text: &str, blanks: &[usize]) -> Question {
        let mut q = Question::new("cloze", QuestionBody::Cloze(ClozeBody::new(text)));
        for &b in blanks {
            q = q.toggle_blank(b).unwrap();
        }
        q
    }

    #[test]
    fn test_valid_sheet_is_clean() {
        let questions = vec![
            Question::create_default(QuestionType::Categorize),
            cloze("The cat sat", &[2]),
            Question::create_default(QuestionType::Comprehension),
        ];
        let sheet = AnswerSheet::new()
            .record(0, CategoryAnswer::new().set_category_for_item("Item 1", "Category 2"))
            .record(1, BlankAnswer::new().set_blank(0, "dog"))
            .record(2, ChoiceAnswer::new().set_choice(0, "Option B"));
        assert!(sheet.check(&questions).is_empty());
    }

    #[test]
    fn test_unknown_question() {
        let sheet = AnswerSheet::new().record(3, BlankAnswer::new());
        let violations = sheet.check(&[]);
        assert_eq!(codes(&violations), vec![ViolationCode::AnswerForUnknownQuestion]);
        assert_eq!(violations[0].question, Some(3));
    }

    #[test]
    fn test_type_mismatch() {
        let questions = vec![cloze("a b", &[0])];
        let sheet = AnswerSheet::new().record(0, ChoiceAnswer::new().set_choice(0, "x"));
        let violations = sheet.check(&questions);
        assert_eq!(codes(&violations), vec![ViolationCode::AnswerTypeMismatch]);
        assert!(violations[0].is_error());
    }

    #[test]
    fn test_blank_out_of_range() {
        let questions = vec![cloze("The cat sat", &[2])];
        let sheet = AnswerSheet::new().record(0, BlankAnswer::new().set_blank(0, "a").set_blank(1, "b"));
        assert_eq!(codes(&sheet.check(&questions)), vec![ViolationCode::BlankOutOfRange]);
    }

    #[test]
    fn test_categorize_unknowns() {
        let questions = vec![Question::create_default(QuestionType::Categorize)];
        let sheet = AnswerSheet::new().record(
            0,
            CategoryAnswer::new().set_category_for_item("Ghost", "Nowhere"),
        );
        assert_eq!(
            codes(&sheet.check(&questions)),
            vec![ViolationCode::UnknownItem, ViolationCode::UnknownCategory]
        );
    }

    #[test]
    fn test_comprehension_checks() {
        let body = ComprehensionBody::new(
            "p",
            vec![SubQuestion::new("Q1", vec!["A".to_string(), "B".to_string()])],
        );
        let questions = vec![Question::new("c", QuestionBody::Comprehension(body))];
        let sheet = AnswerSheet::new().record(
            0,
            ChoiceAnswer::new().set_choice(0, "C").set_choice(4, "A"),
        );
        assert_eq!(
            codes(&sheet.check(&questions)),
            vec![ViolationCode::OptionNotOffered, ViolationCode::SubQuestionOutOfRange]
        );
    }
}
