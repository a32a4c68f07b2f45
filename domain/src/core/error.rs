//! Domain error types

use thiserror::Error;

/// Why an index was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum IndexErrorKind {
    #[error("out of range (length {len})")]
    OutOfRange { len: usize },

    #[error("whitespace tokens cannot be blanks")]
    WhitespaceToken,
}

/// Domain-level errors
///
/// Advisory shape problems are not errors; they are reported as
/// [`Violation`](crate::validation::Violation)s instead.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("Invalid {target} index {index}: {kind}")]
    InvalidIndex {
        target: &'static str,
        index: usize,
        kind: IndexErrorKind,
    },

    #[error("Cloze structure does not match the segmentation of its text")]
    StructureMismatch,

    #[error("Expected a {expected} question, found {actual}")]
    QuestionTypeMismatch {
        expected: &'static str,
        actual: &'static str,
    },
}

impl DomainError {
    /// Index past the end of a collection of `len` elements.
    pub fn out_of_range(target: &'static str, index: usize, len: usize) -> Self {
        DomainError::InvalidIndex {
            target,
            index,
            kind: IndexErrorKind::OutOfRange { len },
        }
    }

    /// Check if this error rejected an index
    pub fn is_invalid_index(&self) -> bool {
        matches!(self, DomainError::InvalidIndex { .. })
    }
}

/// Check `index` against a collection length.
pub(crate) fn check_index(target: &'static str, index: usize, len: usize) -> Result<(), DomainError> {
    if index < len {
        Ok(())
    } else {
        Err(DomainError::out_of_range(target, index, len))
    }
}
