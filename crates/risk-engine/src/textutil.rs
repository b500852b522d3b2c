//! Byte-offset helpers. Regex matches report byte offsets; any widening of a
//! span must land back on UTF-8 character boundaries.

/// Largest char boundary at or below `index`.
pub(crate) fn floor_boundary(text: &str, index: usize) -> usize {
    let mut i = index.min(text.len());
    while i > 0 && !text.is_char_boundary(i) {
        i -= 1;
    }
    i
}

/// Smallest char boundary at or above `index`.
pub(crate) fn ceil_boundary(text: &str, index: usize) -> usize {
    let mut i = index.min(text.len());
    while i < text.len() && !text.is_char_boundary(i) {
        i += 1;
    }
    i
}

/// Window of up to `radius` bytes either side of `[start, end)`, snapped to
/// char boundaries.
pub(crate) fn window<'a>(text: &'a str, start: usize, end: usize, radius: usize) -> &'a str {
    let lo = floor_boundary(text, start.saturating_sub(radius));
    let hi = ceil_boundary(text, (end + radius).min(text.len()));
    &text[lo..hi]
}

/// Leading excerpt of at most `max_chars` characters, single-line.
pub(crate) fn excerpt(text: &str, max_chars: usize) -> String {
    let trimmed = text.trim();
    let cut: String = trimmed.chars().take(max_chars).collect();
    let mut out = cut.replace(['\n', '\r'], " ");
    if trimmed.chars().count() > max_chars {
        out.push('…');
    }
    out
}
