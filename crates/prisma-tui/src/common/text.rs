//! Text utilities for TUI rendering.
//!
//! All widths are terminal columns as reported by `unicode-width`, so wide
//! characters (CJK, emoji) count as two.

use std::borrow::Cow;

use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

const ELLIPSIS: char = '…';

/// Truncates a string to `max_width` columns, ending it with `…` when cut.
pub fn truncate_with_ellipsis(text: &str, max_width: usize) -> String {
    if text.width() <= max_width {
        return text.to_string();
    }
    if max_width <= 1 {
        return ELLIPSIS.to_string();
    }

    let budget = max_width - 1;
    let mut used = 0;
    let mut truncated = String::new();
    for ch in text.chars() {
        let w = ch.width().unwrap_or(0);
        if used + w > budget {
            break;
        }
        used += w;
        truncated.push(ch);
    }
    truncated.push(ELLIPSIS);
    truncated
}

/// Removes escape and control characters and expands tabs to four spaces.
///
/// Newlines are kept; `wrap_text` treats them as paragraph breaks.
/// Borrows when nothing needs to change.
pub fn sanitize_for_display(s: &str) -> Cow<'_, str> {
    let needs_change = s.chars().any(|c| c == '\t' || (c.is_control() && c != '\n'));
    if !needs_change {
        return Cow::Borrowed(s);
    }

    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '\t' => out.push_str("    "),
            '\n' => out.push('\n'),
            c if c.is_control() => {}
            c => out.push(c),
        }
    }
    Cow::Owned(out)
}

/// Word-wraps `text` into lines of at most `width` columns.
///
/// Explicit newlines start a new line. Words wider than `width` are split
/// at character boundaries. Always returns at least one line.
pub fn wrap_text(text: &str, width: usize) -> Vec<String> {
    let width = width.max(1);
    let mut lines = Vec::new();

    for paragraph in text.split('\n') {
        let mut current = String::new();
        let mut current_width = 0;

        for word in paragraph.split_whitespace() {
            let word_width = word.width();
            let sep = usize::from(!current.is_empty());

            if current_width + sep + word_width <= width {
                if sep == 1 {
                    current.push(' ');
                }
                current.push_str(word);
                current_width += sep + word_width;
                continue;
            }

            if !current.is_empty() {
                lines.push(std::mem::take(&mut current));
                current_width = 0;
            }

            if word_width <= width {
                current.push_str(word);
                current_width = word_width;
                continue;
            }

            for ch in word.chars() {
                let w = ch.width().unwrap_or(0);
                if current_width + w > width && !current.is_empty() {
                    lines.push(std::mem::take(&mut current));
                    current_width = 0;
                }
                current.push(ch);
                current_width += w;
            }
        }

        lines.push(current);
    }

    lines
}

/// Right-pads `text` with spaces up to `width` columns.
pub fn pad_to_width(text: &str, width: usize) -> String {
    let fill = width.saturating_sub(text.width());
    let mut out = String::with_capacity(text.len() + fill);
    out.push_str(text);
    out.extend(std::iter::repeat_n(' ', fill));
    out
}
