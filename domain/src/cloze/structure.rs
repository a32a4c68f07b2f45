//! Blank structure: a toggleable overlay on segmented text.
//!
//! A [`BlankStructure`] is always tied to one cloze text. Editing the text
//! produces a fresh structure via [`BlankStructure::derive_from`], which
//! clears every blank. Blanks are never carried across edits because the
//! segmentation of the old and new text cannot be matched up reliably.

use super::segment::{Token, segment};
use crate::core::error::{DomainError, IndexErrorKind};
use serde::{Deserialize, Serialize};

/// A token together with its blank flag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlankToken {
    #[serde(flatten)]
    pub token: Token,
    #[serde(default)]
    pub blank: bool,
}

impl BlankToken {
    pub fn text(&self) -> &str {
        &self.token.text
    }

    pub fn index(&self) -> usize {
        self.token.index
    }
}

/// Segmented cloze text with per-token blank flags (Value Object)
///
/// Ordinals: the blanks, taken in ascending token index, are numbered
/// 0, 1, 2, … and that ordinal (not the token index) keys cloze answers.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BlankStructure {
    tokens: Vec<BlankToken>,
}

impl BlankStructure {
    /// Segment `text` with every blank flag cleared.
    pub fn derive_from(text: &str) -> Self {
        Self {
            tokens: segment(text)
                .into_iter()
                .map(|token| BlankToken { token, blank: false })
                .collect(),
        }
    }

    /// Invert the blank flag of the token at `token_index`.
    ///
    /// Fails with `InvalidIndex` when the index is out of range or names a
    /// whitespace token.
    pub fn toggle(mut self, token_index: usize) -> Result<Self, DomainError> {
        let slot = self.candidate_mut(token_index)?;
        slot.blank = !slot.blank;
        Ok(self)
    }

    /// Replace the blank selection with exactly `token_indices`.
    pub fn set_blanks(self, token_indices: &[usize]) -> Result<Self, DomainError> {
        let mut next = self.cleared();
        for &index in token_indices {
            next.candidate_mut(index)?.blank = true;
        }
        Ok(next)
    }

    /// Same tokens, no blanks.
    pub fn cleared(mut self) -> Self {
        for slot in &mut self.tokens {
            slot.blank = false;
        }
        self
    }

    fn candidate_mut(&mut self, token_index: usize) -> Result<&mut BlankToken, DomainError> {
        let len = self.tokens.len();
        let slot = self
            .tokens
            .get_mut(token_index)
            .ok_or_else(|| DomainError::out_of_range("token", token_index, len))?;
        if !slot.token.is_blank_candidate {
            return Err(DomainError::InvalidIndex {
                target: "token",
                index: token_index,
                kind: IndexErrorKind::WhitespaceToken,
            });
        }
        Ok(slot)
    }

    pub fn tokens(&self) -> &[BlankToken] {
        &self.tokens
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// Blank tokens in ordinal order.
    pub fn blanks(&self) -> impl Iterator<Item = &BlankToken> {
        self.tokens.iter().filter(|t| t.blank)
    }

    pub fn blank_count(&self) -> usize {
        self.blanks().count()
    }

    /// Token indices of the blanks, ascending.
    pub fn blank_indices(&self) -> Vec<usize> {
        self.blanks().map(BlankToken::index).collect()
    }

    /// The words that were turned into blanks, in ordinal order.
    pub fn blank_words(&self) -> Vec<&str> {
        self.blanks().map(BlankToken::text).collect()
    }

    /// Ordinal of the blank at `token_index`, if that token is a blank.
    pub fn ordinal_of(&self, token_index: usize) -> Option<usize> {
        self.blanks().position(|t| t.index() == token_index)
    }

    /// Token index of the blank with the given ordinal.
    pub fn token_index_of(&self, ordinal: usize) -> Option<usize> {
        self.blanks().nth(ordinal).map(BlankToken::index)
    }

    /// The source text this structure was derived from.
    pub fn text(&self) -> String {
        self.tokens.iter().map(BlankToken::text).collect()
    }

    /// Whether this structure is the segmentation of `text` with blanks
    /// only on word tokens.
    ///
    /// A stored structure that fails this check is stale and must be
    /// re-derived before use.
    pub fn matches_text(&self, text: &str) -> bool {
        let fresh = segment(text);
        fresh.len() == self.tokens.len()
            && fresh.iter().zip(&self.tokens).all(|(f, t)| {
                f.text == t.token.text
                    && f.index == t.token.index
                    && (!t.blank || f.is_blank_candidate)
            })
    }

    /// Render the text with each blank replaced by `fill(ordinal)`.
    pub fn render_with(&self, mut fill: impl FnMut(usize) -> String) -> String {
        let mut ordinal = 0;
        let mut out = String::new();
        for slot in &self.tokens {
            if slot.blank {
                out.push_str(&fill(ordinal));
                ordinal += 1;
            } else {
                out.push_str(slot.text());
            }
        }
        out
    }
}
