//! Unicode text utilities for TUI rendering.

use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Display width of a string in terminal columns.
pub fn display_width(s: &str) -> usize {
    UnicodeWidthStr::width(s)
}

/// Truncate a string to fit within `max_width` display columns.
///
/// If the string fits within `max_width`, it is returned unchanged.
/// If truncated, `tail` (e.g., "…") is appended. The total display width
/// of the result (including the tail) will not exceed `max_width`.
///
/// # Examples
///
/// ```
/// use plaza_widgets::runeutil::truncate;
///
/// assert_eq!(truncate("Centro de costo", 8, "…"), "Centro …");
/// assert_eq!(truncate("Norte", 10, "…"), "Norte");
/// ```
pub fn truncate(s: &str, max_width: usize, tail: &str) -> String {
    if display_width(s) <= max_width {
        return s.to_string();
    }
    let tail_width = display_width(tail);
    if tail_width >= max_width {
        return take_columns(tail, max_width);
    }
    let mut result = take_columns(s, max_width - tail_width);
    result.push_str(tail);
    result
}

/// The longest prefix of `s` no wider than `columns`.
fn take_columns(s: &str, columns: usize) -> String {
    let mut width = 0;
    s.chars()
        .take_while(|c| {
            width += c.width().unwrap_or(0);
            width <= columns
        })
        .collect()
}
