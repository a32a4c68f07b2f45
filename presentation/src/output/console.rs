//! Console output formatter for forms and submissions

use crate::output::formatter::OutputFormatter;
use colored::Colorize;
use formsmith_application::SubmissionReport;
use formsmith_domain::core::string::preview;
use formsmith_domain::{
    Answer, BlankStructure, Form, FormId, Question, QuestionBody, Severity, Violation,
};

/// Formats forms and submissions for console display
pub struct ConsoleFormatter;

impl ConsoleFormatter {
    /// Token table for a cloze text: index, text, and blank ordinal if any
    pub fn format_token_map(structure: &BlankStructure) -> String {
        if structure.is_empty() {
            return format!("{}\n", "(no tokens)".dimmed());
        }

        let mut output = String::new();
        for slot in structure.tokens() {
            let index = format!("{:>4}", slot.index());
            if slot.token.is_whitespace() {
                output.push_str(&format!(
                    "{}  {}\n",
                    index.dimmed(),
                    format!("{:?}", slot.text()).dimmed()
                ));
            } else if slot.blank {
                let ordinal = structure.ordinal_of(slot.index()).map_or(0, |o| o + 1);
                output.push_str(&format!(
                    "{}  {}  {}\n",
                    index,
                    slot.text().yellow().bold(),
                    format!("blank {}", ordinal).yellow()
                ));
            } else {
                output.push_str(&format!("{}  {}\n", index, slot.text()));
            }
        }
        output
    }

    /// Cloze text as a respondent sees it, blanks numbered
    pub fn format_cloze_view(structure: &BlankStructure) -> String {
        structure.render_with(|ordinal| format!("[{}]", ordinal + 1).underline().to_string())
    }

    /// One question with its number, as shown by `format_form`
    pub fn format_question(index: usize, question: &Question) -> String {
        let mut output = format!(
            "\n{} {}\n",
            format!("── Q{} · {} ──", index + 1, question.kind()).yellow().bold(),
            question.title
        );
        if let Some(image) = &question.image {
            output.push_str(&format!("  {} {}\n", "Image:".dimmed(), image));
        }

        match &question.body {
            QuestionBody::Categorize(body) => {
                output.push_str(&format!(
                    "  {} {}\n",
                    "Categories:".cyan(),
                    body.categories.join(", ")
                ));
                output.push_str(&format!("  {}\n", "Items:".cyan()));
                for item in &body.items {
                    match body.correct_category.get(item) {
                        Some(category) => output.push_str(&format!(
                            "    * {} {} {}\n",
                            item,
                            "→".dimmed(),
                            category.green()
                        )),
                        None => output.push_str(&format!("    * {}\n", item)),
                    }
                }
            }
            QuestionBody::Cloze(body) => {
                let structure = body.structure();
                output.push_str(&format!("  {}\n", Self::format_cloze_view(&structure)));
                let words = structure.blank_words();
                if words.is_empty() {
                    output.push_str(&format!("  {}\n", "(no blanks)".dimmed()));
                } else {
                    output.push_str(&format!("  {} {}\n", "Blanks:".cyan(), words.join(", ")));
                }
            }
            QuestionBody::Comprehension(body) => {
                output.push_str(&format!("  {}\n", preview(&body.text, 120).italic()));
                for (i, sub) in body.sub_questions.iter().enumerate() {
                    output.push_str(&format!("  {}. {}\n", i + 1, sub.question));
                    for option in &sub.options {
                        if !sub.correct_answer.is_empty() && *option == sub.correct_answer {
                            output.push_str(&format!("     {} {}\n", "✓".green(), option.green()));
                        } else {
                            output.push_str(&format!("     - {}\n", option));
                        }
                    }
                }
            }
        }
        output
    }

    fn format_answer(question: Option<&Question>, answer: &Answer) -> String {
        match answer {
            Answer::Categorize(a) => {
                let pairs: Vec<_> = a
                    .placements()
                    .iter()
                    .map(|(item, category)| format!("{} → {}", item, category))
                    .collect();
                pairs.join("; ")
            }
            Answer::Cloze(a) => match question.and_then(Question::as_cloze) {
                Some(body) => body.structure().render_with(|ordinal| {
                    a.blank(ordinal)
                        .map(|text| text.green().to_string())
                        .unwrap_or_else(|| "___".dimmed().to_string())
                }),
                None => {
                    let fills: Vec<_> = a
                        .fills()
                        .iter()
                        .map(|(ordinal, text)| format!("[{}] {}", ordinal + 1, text))
                        .collect();
                    fills.join("; ")
                }
            },
            Answer::Comprehension(a) => {
                let choices: Vec<_> = a
                    .choices()
                    .iter()
                    .map(|(index, option)| format!("{}. {}", index + 1, option))
                    .collect();
                choices.join("; ")
            }
        }
    }

    fn header(title: &str) -> String {
        let line = "=".repeat(60);
        format!("{}\n{:^60}\n{}", line.cyan(), title.bold(), line.cyan())
    }

    fn section_header(title: &str) -> String {
        format!("\n{}\n{}\n", title.cyan().bold(), "-".repeat(40))
    }

    fn footer() -> String {
        format!("\n{}\n", "=".repeat(60).cyan())
    }
}

impl OutputFormatter for ConsoleFormatter {
    fn format_form(&self, id: &FormId, form: &Form) -> String {
        let title = if form.title.is_empty() {
            "(untitled form)"
        } else {
            form.title.as_str()
        };

        let mut output = String::new();
        output.push_str(&Self::header(title));
        output.push('\n');
        output.push_str(&format!("{} {}\n", "ID:".cyan().bold(), id));
        if let Some(image) = &form.header_image {
            output.push_str(&format!("{} {}\n", "Header image:".cyan().bold(), image));
        }

        if form.questions.is_empty() {
            output.push_str(&format!("\n{}\n", "No questions yet.".dimmed()));
        }
        for (index, question) in form.questions.iter().enumerate() {
            output.push_str(&Self::format_question(index, question));
        }

        output.push_str(&format!(
            "\n{} {}\n",
            "Submissions:".cyan().bold(),
            form.submissions().len()
        ));
        output.push_str(&Self::footer());
        output
    }

    fn format_form_list(&self, forms: &[(FormId, Form)]) -> String {
        if forms.is_empty() {
            return format!("{}\n", "No forms stored.".dimmed());
        }
        forms
            .iter()
            .map(|(id, form)| {
                format!(
                    "{}  {}  {}\n",
                    id.as_str().yellow(),
                    form.title.bold(),
                    format!(
                        "({} questions, {} submissions)",
                        form.questions.len(),
                        form.submissions().len()
                    )
                    .dimmed()
                )
            })
            .collect()
    }

    fn format_violations(&self, violations: &[Violation]) -> String {
        if violations.is_empty() {
            return format!("{}\n", "No problems found.".green());
        }
        violations
            .iter()
            .map(|v| {
                let line = v.to_string();
                match v.severity {
                    Severity::Error => format!("{}\n", line.red()),
                    Severity::Warning => format!("{}\n", line.yellow()),
                }
            })
            .collect()
    }

    fn format_submissions(&self, report: &SubmissionReport) -> String {
        let mut output = String::new();
        output.push_str(&Self::header(&format!("Submissions: {}", report.title)));
        output.push('\n');

        if report.submissions.is_empty() {
            output.push_str(&format!("\n{}\n", "No submissions yet.".dimmed()));
        }

        for (n, submission) in report.submissions.iter().enumerate() {
            output.push_str(&Self::section_header(&format!(
                "#{}  {}",
                n + 1,
                submission.submitted_at.format("%Y-%m-%d %H:%M:%S%.6f UTC")
            )));
            for (index, answer) in submission.answers.iter() {
                let question = report.questions.get(index);
                let label = question.map_or_else(
                    || format!("Q{} (removed)", index + 1),
                    |q| format!("Q{} {}", index + 1, q.title),
                );
                output.push_str(&format!(
                    "  {}: {}\n",
                    label.bold(),
                    Self::format_answer(question, answer)
                ));
            }
        }

        if !report.questions.is_empty() {
            output.push_str(&Self::section_header("Responses per question"));
            for (index, (question, count)) in report
                .questions
                .iter()
                .zip(&report.response_counts)
                .enumerate()
            {
                output.push_str(&format!("  Q{} {}: {}\n", index + 1, question.title, count));
            }
        }

        output.push_str(&Self::footer());
        output
    }
}
