//! Editing state for the select's search term.
//!
//! A single line of characters with a cursor. Control characters never enter
//! the buffer; pasted newlines become spaces.

/// Search term buffer with a character cursor.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchText {
    chars: Vec<char>,
    cursor: usize,
}

impl SearchText {
    /// Create a new empty buffer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the current value as a String.
    pub fn value(&self) -> String {
        self.chars.iter().collect()
    }

    /// Replace the value and move the cursor to the end.
    pub fn set_value(&mut self, s: &str) {
        self.chars = s.chars().filter(|c| !c.is_control()).collect();
        self.cursor = self.chars.len();
    }

    /// Current cursor position (char index, 0-based).
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Number of characters.
    pub fn len(&self) -> usize {
        self.chars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chars.is_empty()
    }

    /// Insert a character at the cursor. Returns false for control
    /// characters, which are ignored.
    pub fn insert_char(&mut self, c: char) -> bool {
        if c.is_control() {
            return false;
        }
        self.chars.insert(self.cursor, c);
        self.cursor += 1;
        true
    }

    /// Insert pasted text at the cursor. Returns the number of characters
    /// inserted.
    pub fn insert_str(&mut self, s: &str) -> usize {
        let incoming: Vec<char> = s
            .chars()
            .map(|c| if c == '\n' || c == '\t' { ' ' } else { c })
            .filter(|c| !c.is_control())
            .collect();
        let n = incoming.len();
        self.chars.splice(self.cursor..self.cursor, incoming);
        self.cursor += n;
        n
    }

    /// Delete character before cursor (backspace).
    pub fn delete_back(&mut self) -> bool {
        if self.cursor == 0 {
            return false;
        }
        self.cursor -= 1;
        self.chars.remove(self.cursor);
        true
    }

    /// Delete character at cursor (delete key).
    pub fn delete_forward(&mut self) -> bool {
        if self.cursor >= self.chars.len() {
            return false;
        }
        self.chars.remove(self.cursor);
        true
    }

    /// Delete the word before the cursor along with trailing spaces.
    pub fn delete_word_back(&mut self) -> bool {
        let end = self.cursor;
        let mut start = end;
        while start > 0 && self.chars[start - 1] == ' ' {
            start -= 1;
        }
        while start > 0 && self.chars[start - 1] != ' ' {
            start -= 1;
        }
        if start == end {
            return false;
        }
        self.chars.drain(start..end);
        self.cursor = start;
        true
    }

    pub fn move_left(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    pub fn move_right(&mut self) {
        self.cursor = (self.cursor + 1).min(self.chars.len());
    }

    pub fn move_home(&mut self) {
        self.cursor = 0;
    }

    pub fn move_end(&mut self) {
        self.cursor = self.chars.len();
    }

    /// Empty the buffer. Returns whether anything was removed.
    pub fn clear(&mut self) -> bool {
        let had_text = !self.chars.is_empty();
        self.chars.clear();
        self.cursor = 0;
        had_text
    }
}
