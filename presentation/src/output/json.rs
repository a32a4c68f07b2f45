//! JSON output formatter

use crate::output::formatter::OutputFormatter;
use formsmith_application::SubmissionReport;
use formsmith_domain::{Form, FormId, Violation};
use serde_json::json;

/// Formats results as pretty-printed JSON
pub struct JsonFormatter;

impl JsonFormatter {
    fn pretty(value: &serde_json::Value) -> String {
        serde_json::to_string_pretty(value).unwrap_or_else(|_| "{}".to_string())
    }
}

impl OutputFormatter for JsonFormatter {
    fn format_form(&self, id: &FormId, form: &Form) -> String {
        Self::pretty(&json!({ "id": id, "form": form }))
    }

    fn format_form_list(&self, forms: &[(FormId, Form)]) -> String {
        let entries: Vec<_> = forms
            .iter()
            .map(|(id, form)| {
                json!({
                    "id": id,
                    "title": form.title,
                    "questions": form.questions.len(),
                    "submissions": form.submissions().len(),
                })
            })
            .collect();
        Self::pretty(&json!(entries))
    }

    fn format_violations(&self, violations: &[Violation]) -> String {
        Self::pretty(&json!(violations))
    }

    fn format_submissions(&self, report: &SubmissionReport) -> String {
        Self::pretty(&json!(report))
    }
}
