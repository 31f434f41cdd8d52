//! Single-line message input.

use unicode_width::UnicodeWidthChar;

/// Editable line with a char-indexed cursor.
#[derive(Debug, Clone, Default)]
pub struct InputState {
    text: String,
    cursor: usize,
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// Cursor position in chars.
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// True when the line holds nothing worth submitting.
    pub fn is_blank(&self) -> bool {
        self.text.trim().is_empty()
    }

    pub fn insert_char(&mut self, ch: char) {
        let idx = self.byte_index(self.cursor);
        self.text.insert(idx, ch);
        self.cursor += 1;
    }

    /// Inserts pasted text, folding line breaks into spaces.
    pub fn insert_str(&mut self, text: &str) {
        let flattened: String = text
            .chars()
            .map(|c| if c == '\n' || c == '\r' { ' ' } else { c })
            .collect();
        let idx = self.byte_index(self.cursor);
        self.text.insert_str(idx, &flattened);
        self.cursor += flattened.chars().count();
    }

    /// Deletes the char before the cursor.
    pub fn backspace(&mut self) {
        if self.cursor == 0 {
            return;
        }
        self.cursor -= 1;
        let idx = self.byte_index(self.cursor);
        self.text.remove(idx);
    }

    /// Deletes the char under the cursor.
    pub fn delete(&mut self) {
        if self.cursor >= self.char_len() {
            return;
        }
        let idx = self.byte_index(self.cursor);
        self.text.remove(idx);
    }

    pub fn move_left(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    pub fn move_right(&mut self) {
        self.cursor = (self.cursor + 1).min(self.char_len());
    }

    pub fn move_home(&mut self) {
        self.cursor = 0;
    }

    pub fn move_end(&mut self) {
        self.cursor = self.char_len();
    }

    /// Deletes everything before the cursor.
    pub fn kill_to_start(&mut self) {
        let idx = self.byte_index(self.cursor);
        self.text.replace_range(..idx, "");
        self.cursor = 0;
    }

    pub fn clear(&mut self) {
        self.text.clear();
        self.cursor = 0;
    }

    /// Takes the current text, leaving the input empty.
    pub fn take(&mut self) -> String {
        self.cursor = 0;
        std::mem::take(&mut self.text)
    }

    /// Returns the slice of text to show in a `width`-column field and the
    /// cursor column within it. Scrolls horizontally to keep the cursor visible.
    pub fn visible_window(&self, width: usize) -> (String, usize) {
        let width = width.max(1);
        let chars: Vec<char> = self.text.chars().collect();

        // Walk left from the cursor until the field is full.
        let mut start = self.cursor;
        let mut used = 0;
        while start > 0 {
            let w = chars[start - 1].width().unwrap_or(0);
            if used + w >= width {
                break;
            }
            used += w;
            start -= 1;
        }
        let cursor_col = used;

        let mut visible = String::new();
        let mut total = 0;
        for &ch in &chars[start..] {
            let w = ch.width().unwrap_or(0);
            if total + w > width {
                break;
            }
            total += w;
            visible.push(ch);
        }

        (visible, cursor_col)
    }

    fn char_len(&self) -> usize {
        self.text.chars().count()
    }

    fn byte_index(&self, char_idx: usize) -> usize {
        self.text
            .char_indices()
            .nth(char_idx)
            .map_or(self.text.len(), |(i, _)| i)
    }
}
