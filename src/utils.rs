//! Label display helpers shared by chart-building callers.

use crate::constants::labels::ELLIPSIS;

/// Truncate a label to at most `max_chars` characters, ellipsis included.
///
/// Counts characters, not bytes, so accented labels truncate cleanly.
/// A `max_chars` of zero disables truncation.
pub fn truncate_label<T: AsRef<str>>(label: T, max_chars: usize) -> String {
    let label = label.as_ref();
    let count = label.chars().count();
    if max_chars == 0 || count <= max_chars {
        return label.to_string();
    }
    let mut truncated: String = label.chars().take(max_chars.saturating_sub(1)).collect();
    truncated.push(ELLIPSIS);
    truncated
}

/// Split a label into fixed-width segments for multi-line display.
///
/// The caller joins segments with its renderer's line separator. A zero
/// width or an empty label yields the label as a single segment.
pub fn wrap_label<T: AsRef<str>>(label: T, width: usize) -> Vec<String> {
    let label = label.as_ref();
    if width == 0 || label.is_empty() {
        return vec![label.to_string()];
    }
    let chars: Vec<char> = label.chars().collect();
    chars
        .chunks(width)
        .map(|chunk| chunk.iter().collect())
        .collect()
}
