//! Minimal replace-region diffing of a single text node.
//!
//! Offsets are counted in UTF-16 code units, the same unit the document model
//! uses for its text offsets. Comparison happens on whole `char`s so a region
//! boundary never falls inside a surrogate pair.

/// Trailing padding some surfaces append to a text node's content.
pub const LINE_TERMINATOR: char = '\n';

/// The span `[start, end)` of the previous text that was replaced by
/// `inserted_text` to produce the current text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextRegion {
    pub start: usize,
    pub end: usize,
    pub inserted_text: String,
}

impl TextRegion {
    /// Replays the region on `previous`. Returns `None` when the offsets do
    /// not land on character boundaries of `previous`.
    pub fn apply(&self, previous: &str) -> Option<String> {
        let start = byte_offset(previous, self.start)?;
        let end = byte_offset(previous, self.end)?;
        if start > end {
            return None;
        }
        let mut out =
            String::with_capacity(previous.len() - (end - start) + self.inserted_text.len());
        out.push_str(&previous[..start]);
        out.push_str(&self.inserted_text);
        out.push_str(&previous[end..]);
        Some(out)
    }
}

/// Strips one trailing line terminator from the surface's text when it ends
/// in more terminators than the model's text. A surface pads text ending in
/// `\n` with one more. Never strips more than once.
pub fn normalize_surface_text<'a>(previous: &str, current: &'a str) -> &'a str {
    if trailing_terminators(current) <= trailing_terminators(previous) {
        return current;
    }
    current.strip_suffix(LINE_TERMINATOR).unwrap_or(current)
}

fn trailing_terminators(text: &str) -> usize {
    text.chars()
        .rev()
        .take_while(|&c| c == LINE_TERMINATOR)
        .count()
}

/// Computes the minimal replace region turning `previous` into `current`.
///
/// `current` is normalized with [`normalize_surface_text`] first. Returns
/// `None` when nothing changed.
pub fn diff_text(previous: &str, current: &str) -> Option<TextRegion> {
    let current = normalize_surface_text(previous, current);
    if previous == current {
        return None;
    }

    let prev: Vec<char> = previous.chars().collect();
    let next: Vec<char> = current.chars().collect();

    let prefix = prev
        .iter()
        .zip(next.iter())
        .take_while(|(a, b)| a == b)
        .count();

    // The suffix may not reach back into the shared prefix on either side.
    let max_suffix = (prev.len() - prefix).min(next.len() - prefix);
    let suffix = prev
        .iter()
        .rev()
        .zip(next.iter().rev())
        .take(max_suffix)
        .take_while(|(a, b)| a == b)
        .count();

    if prefix + suffix == prev.len() && prefix + suffix == next.len() {
        return None;
    }

    let start = utf16_len_of(&prev[..prefix]);
    let end = start + utf16_len_of(&prev[prefix..prev.len() - suffix]);
    let inserted_text = next[prefix..next.len() - suffix].iter().collect();

    Some(TextRegion {
        start,
        end,
        inserted_text,
    })
}

/// Length of `text` in UTF-16 code units.
pub fn utf16_len(text: &str) -> usize {
    text.chars().map(char::len_utf16).sum()
}

fn utf16_len_of(chars: &[char]) -> usize {
    chars.iter().copied().map(char::len_utf16).sum()
}

/// Converts a UTF-16 offset into a byte offset into `text`.
///
/// `None` if the offset is past the end or splits a surrogate pair.
pub fn byte_offset(text: &str, utf16_offset: usize) -> Option<usize> {
    let mut units = 0;
    for (byte, ch) in text.char_indices() {
        if units == utf16_offset {
            return Some(byte);
        }
        units += ch.len_utf16();
        if units > utf16_offset {
            return None;
        }
    }
    (units == utf16_offset).then_some(text.len())
}
