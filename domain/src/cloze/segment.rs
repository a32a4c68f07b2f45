//! Text segmentation
//!
//! Splits passage text into alternating runs of whitespace and
//! non-whitespace. Whitespace runs are kept as tokens of their own so that
//! joining every token's text reproduces the input exactly.

use serde::{Deserialize, Serialize};

/// A unit of segmented text (Value Object)
///
/// `index` is the token's position in one segmentation result and is only
/// meaningful until the source text changes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", from = "TokenRecord")]
pub struct Token {
    pub text: String,
    pub is_blank_candidate: bool,
    pub index: usize,
}

impl Token {
    pub fn new(text: impl Into<String>, index: usize) -> Self {
        let text = text.into();
        let is_blank_candidate = is_word(&text);
        Self {
            text,
            is_blank_candidate,
            index,
        }
    }

    /// Whether this token is a whitespace run.
    pub fn is_whitespace(&self) -> bool {
        !self.is_blank_candidate
    }
}

/// Stored token shape. Older records carry `idx` instead of `index`.
///
/// A stored `isBlankCandidate` is ignored; the flag always follows `text`.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct TokenRecord {
    text: String,
    #[serde(alias = "idx")]
    index: usize,
}

impl From<TokenRecord> for Token {
    fn from(record: TokenRecord) -> Self {
        Self::new(record.text, record.index)
    }
}

fn is_word(text: &str) -> bool {
    !text.is_empty() && !text.chars().all(char::is_whitespace)
}

/// Split `text` into word and whitespace tokens.
///
/// The result alternates between maximal whitespace and non-whitespace runs.
/// An empty input yields no tokens.
pub fn segment(text: &str) -> Vec<Token> {
    let mut tokens = Vec::new();
    let mut start = 0;
    let mut current: Option<bool> = None;

    for (pos, ch) in text.char_indices() {
        let ws = ch.is_whitespace();
        match current {
            Some(prev) if prev == ws => {}
            Some(_) => {
                tokens.push(Token::new(&text[start..pos], tokens.len()));
                start = pos;
                current = Some(ws);
            }
            None => current = Some(ws),
        }
    }

    if start < text.len() {
        tokens.push(Token::new(&text[start..], tokens.len()));
    }

    tokens
}

/// Re-assemble text from tokens.
pub fn join<'a>(tokens: impl IntoIterator<Item = &'a Token>) -> String {
    tokens.into_iter().map(|t| t.text.as_str()).collect()
}

/// Number of blank-candidate tokens in `text`.
pub fn word_count(text: &str) -> usize {
    segment(text).iter().filter(|t| t.is_blank_candidate).count()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn texts(tokens: &[Token]) -> Vec<&str> {
        tokens.iter().map(|t| t.text.as_str()).collect()
    }

    #[test]
    fn test_segment_simple_sentence() {
        let tokens = segment("The cat sat");
        assert_eq!(texts(&tokens), vec!["The", " ", "cat", " ", "sat"]);
        assert_eq!(
            tokens.iter().map(|t| t.index).collect::<Vec<_>>(),
            vec![0, 1, 2, 3, 4]
        );
        assert!(tokens[0].is_blank_candidate);
        assert!(!tokens[1].is_blank_candidate);
        assert!(tokens[2].is_blank_candidate);
    }

    #[test]
    fn test_segment_keeps_whitespace_runs() {
        let tokens = segment("a  \n\tb");
        assert_eq!(texts(&tokens), vec!["a", "  \n\t", "b"]);
    }

    #[test]
    fn test_segment_leading_and_trailing_whitespace() {
        let tokens = segment("  hello ");
        assert_eq!(texts(&tokens), vec!["  ", "hello", " "]);
        assert!(tokens[0].is_whitespace());
        assert_eq!(tokens[1].index, 1);
    }

    #[test]
    fn test_segment_empty() {
        assert!(segment("").is_empty());
    }

    #[test]
    fn test_segment_pure_whitespace() {
        let tokens = segment(" \n ");
        assert_eq!(tokens.len(), 1);
        assert!(!tokens[0].is_blank_candidate);
    }

    #[test]
    fn test_round_trip() {
        let samples = [
            "",
            " ",
            "   \t\n",
            "word",
            "The cat sat",
            "  leading",
            "trailing  ",
            "multi\n\nline  text\twith tabs",
            "punctuation, stays; attached!",
            "日本語 の テキスト",
            "non\u{a0}breaking space",
        ];
        for text in samples {
            assert_eq!(join(&segment(text)), text, "round trip failed for {:?}", text);
        }
    }

    #[test]
    fn test_deterministic() {
        let text = "Mary had a little lamb";
        assert_eq!(segment(text), segment(text));
    }

    #[test]
    fn test_word_count() {
        assert_eq!(word_count("The cat sat"), 3);
        assert_eq!(word_count("   "), 0);
        assert_eq!(word_count(""), 0);
    }

    #[test]
    fn test_token_serialization_shape() {
        let token = Token::new("cat", 2);
        let json = serde_json::to_value(&token).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"text": "cat", "isBlankCandidate": true, "index": 2})
        );
    }

    #[test]
    fn test_stored_candidate_flag_follows_text() {
        let space: Token =
            serde_json::from_str(r#"{"text": " ", "isBlankCandidate": true, "index": 1}"#).unwrap();
        assert!(space.is_whitespace());

        let word: Token =
            serde_json::from_str(r#"{"text": "cat", "isBlankCandidate": false, "index": 2}"#)
                .unwrap();
        assert!(word.is_blank_candidate);
    }

    #[test]
    fn test_token_deserializes_legacy_shape() {
        let token: Token = serde_json::from_str(r#"{"text": " ", "idx": 1}"#).unwrap();
        assert_eq!(token.index, 1);
        assert!(!token.is_blank_candidate);

        let token: Token = serde_json::from_str(r#"{"text": "dog", "idx": 0}"#).unwrap();
        assert!(token.is_blank_candidate);
    }
}
