//! Cloze questions: fill in the blanks.

use crate::cloze::BlankStructure;
use crate::core::error::DomainError;
use crate::validation::{Violation, ViolationCode};
use serde::{Deserialize, Serialize};
use std::borrow::Cow;

/// Authoring state of a Cloze question.
///
/// `structure` may be absent (freshly created or stored by an older editor);
/// it is then derived from `text` on demand with no blanks.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClozeBody {
    #[serde(default)]
    pub text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub structure: Option<BlankStructure>,
}

impl ClozeBody {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            structure: None,
        }
    }

    pub(crate) fn placeholder() -> Self {
        Self::new("Type your text here with [blank] placeholders.")
    }

    /// The blank structure for the current text.
    ///
    /// Returns the stored structure when it matches `text`, otherwise a
    /// freshly derived one with no blanks.
    pub fn structure(&self) -> Cow<'_, BlankStructure> {
        match &self.structure {
            Some(s) if s.matches_text(&self.text) => Cow::Borrowed(s),
            _ => Cow::Owned(BlankStructure::derive_from(&self.text)),
        }
    }

    /// Replace the text. Always resets every blank.
    pub fn set_text(self, text: impl Into<String>) -> Self {
        let text = text.into();
        let structure = BlankStructure::derive_from(&text);
        Self {
            text,
            structure: Some(structure),
        }
    }

    pub fn toggle_blank(self, token_index: usize) -> Result<Self, DomainError> {
        let structure = self.structure().into_owned().toggle(token_index)?;
        Ok(Self {
            text: self.text,
            structure: Some(structure),
        })
    }

    /// Install a structure, which must match the current text.
    pub fn with_structure(self, structure: BlankStructure) -> Result<Self, DomainError> {
        if !structure.matches_text(&self.text) {
            return Err(DomainError::StructureMismatch);
        }
        Ok(Self {
            text: self.text,
            structure: Some(structure),
        })
    }

    pub fn blank_count(&self) -> usize {
        self.structure().blank_count()
    }

    pub(crate) fn validate(&self) -> Vec<Violation> {
        let mut violations = Vec::new();

        if self.text.trim().is_empty() {
            violations.push(Violation::error(ViolationCode::EmptyText, "cloze text is empty"));
            return violations;
        }

        if let Some(stored) = &self.structure
            && !stored.matches_text(&self.text)
        {
            violations.push(Violation::warning(
                ViolationCode::StaleStructure,
                "blank selection is out of date with the text and will be reset",
            ));
        }

        if self.blank_count() == 0 {
            violations.push(Violation::error(
                ViolationCode::NoBlanks,
                "cloze text has no blanks",
            ));
        }

        violations
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_structure_is_derived_lazily() {
        let body = ClozeBody::new("The cat sat");
        assert!(body.structure.is_none());
        assert_eq!(body.structure().len(), 5);
        assert_eq!(body.blank_count(), 0);
    }

    #[test]
    fn test_toggle_then_set_text_resets() {
        let body = ClozeBody::new("The cat sat").toggle_blank(2).unwrap();
        assert_eq!(body.blank_count(), 1);

        let body = body.set_text("The cat sat down");
        assert_eq!(body.blank_count(), 0);
        assert!(body.structure.as_ref().unwrap().matches_text("The cat sat down"));
    }

    #[test]
    fn test_set_same_text_still_resets() {
        let body = ClozeBody::new("The cat sat").toggle_blank(4).unwrap();
        let body = body.set_text("The cat sat");
        assert_eq!(body.blank_count(), 0);
    }

    #[test]
    fn test_toggle_rejects_whitespace() {
        assert!(ClozeBody::new("The cat").toggle_blank(1).is_err());
    }

    #[test]
    fn test_stale_structure_is_ignored() {
        let stale = BlankStructure::derive_from("old words").toggle(0).unwrap();
        let body = ClozeBody {
            text: "new text here".to_string(),
            structure: Some(stale),
        };
        assert_eq!(body.blank_count(), 0);
        let codes: Vec<_> = body.validate().into_iter().map(|v| v.code).collect();
        assert_eq!(codes, vec![ViolationCode::StaleStructure, ViolationCode::NoBlanks]);
    }

    #[test]
    fn test_with_structure_requires_match() {
        let body = ClozeBody::new("a b");
        assert_eq!(
            body.clone().with_structure(BlankStructure::derive_from("a c")),
            Err(DomainError::StructureMismatch)
        );
        let s = BlankStructure::derive_from("a b").toggle(2).unwrap();
        assert_eq!(body.with_structure(s).unwrap().blank_count(), 1);
    }

    #[test]
    fn test_stored_whitespace_blank_is_reset() {
        let json = r#"{"text":"The cat","structure":[
            {"text":"The","idx":0,"blank":false},
            {"text":" ","idx":1,"blank":true},
            {"text":"cat","idx":2,"blank":true}]}"#;
        let body: ClozeBody = serde_json::from_str(json).unwrap();

        assert_eq!(body.blank_count(), 0);
        assert!(body.structure().blank_words().is_empty());
        let codes: Vec<_> = body.validate().into_iter().map(|v| v.code).collect();
        assert!(codes.contains(&ViolationCode::StaleStructure));
        assert!(body.toggle_blank(1).is_err());
    }

    #[test]
    fn test_validate() {
        assert_eq!(
            ClozeBody::new("  ").validate()[0].code,
            ViolationCode::EmptyText
        );
        let ready = ClozeBody::new("The cat sat").toggle_blank(2).unwrap();
        assert!(ready.validate().is_empty());
    }
}
