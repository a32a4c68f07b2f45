//! String utilities for the domain layer.

/// Collapse whitespace runs and shorten to `max_chars` characters.
///
/// Used for one-line previews of passages and cloze text. Counts characters,
/// not bytes, so multi-byte text is never split mid-character.
pub fn preview(s: &str, max_chars: usize) -> String {
    let collapsed = s.split_whitespace().collect::<Vec<_>>().join(" ");
    if collapsed.chars().count() <= max_chars {
        return collapsed;
    }
    let keep = max_chars.saturating_sub(3);
    let mut out: String = collapsed.chars().take(keep).collect();
    out.push_str("...");
    out
}
