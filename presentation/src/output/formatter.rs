//! Output formatter trait

use formsmith_application::SubmissionReport;
use formsmith_domain::{Form, FormId, Violation};

/// Trait for formatting forms and their submissions
pub trait OutputFormatter {
    /// Format one form with its questions
    fn format_form(&self, id: &FormId, form: &Form) -> String;

    /// Format the stored forms, one per line
    fn format_form_list(&self, forms: &[(FormId, Form)]) -> String;

    /// Format advisory violations
    fn format_violations(&self, violations: &[Violation]) -> String;

    /// Format collected submissions
    fn format_submissions(&self, report: &SubmissionReport) -> String;
}
