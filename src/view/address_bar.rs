//! Editable address bar
//!
//! Holds the text the user is typing and a cursor. The cursor counts
//! characters, not bytes, so non-ASCII folder names edit correctly.

#[derive(Debug, Clone, Default)]
pub struct AddressBar {
    /// Text currently shown
    text: String,
    /// Cursor position, in characters
    pub cursor: usize,
    /// Location last set by a completed navigation
    committed: String,
}

impl AddressBar {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// Replace the text with a navigated location; the cursor moves to the end
    pub fn set_location(&mut self, location: &str) {
        self.committed = location.to_string();
        self.text = location.to_string();
        self.cursor = self.char_len();
    }

    /// Throw away edits and show the current location again
    pub fn restore(&mut self) {
        self.text = self.committed.clone();
        self.cursor = self.char_len();
    }

    /// Whether the text differs from the current location
    pub fn is_edited(&self) -> bool {
        self.text != self.committed
    }

    /// Insert a character at the cursor
    pub fn insert(&mut self, c: char) {
        let at = self.byte_index(self.cursor);
        self.text.insert(at, c);
        self.cursor += 1;
    }

    /// Insert a string at the cursor position
    pub fn insert_str(&mut self, s: &str) {
        let at = self.byte_index(self.cursor);
        self.text.insert_str(at, s);
        self.cursor += s.chars().count();
    }

    /// Delete the character before the cursor
    pub fn backspace(&mut self) {
        if self.cursor == 0 {
            return;
        }
        self.cursor -= 1;
        let at = self.byte_index(self.cursor);
        self.text.remove(at);
    }

    /// Delete character at cursor (forward delete)
    pub fn delete(&mut self) {
        if self.cursor >= self.char_len() {
            return;
        }
        let at = self.byte_index(self.cursor);
        self.text.remove(at);
    }

    /// Remove all text
    pub fn clear(&mut self) {
        self.text.clear();
        self.cursor = 0;
    }

    /// Move cursor left
    pub fn move_left(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    /// Move cursor right
    pub fn move_right(&mut self) {
        if self.cursor < self.char_len() {
            self.cursor += 1;
        }
    }

    pub fn move_home(&mut self) {
        self.cursor = 0;
    }

    pub fn move_end(&mut self) {
        self.cursor = self.char_len();
    }

    fn char_len(&self) -> usize {
        self.text.chars().count()
    }

    fn byte_index(&self, char_index: usize) -> usize {
        self.text
            .char_indices()
            .nth(char_index)
            .map(|(i, _)| i)
            .unwrap_or(self.text.len())
    }
}
