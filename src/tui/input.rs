//! Single-line text input with a character cursor.

/// A text input field with cursor position and active state management.
///
/// `cursor` counts characters, not bytes, so editing stays valid for
/// non-ASCII text.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct InputField {
    pub value: String,
    pub cursor: usize,
    pub active: bool,
}

impl InputField {
    /// Create a new empty input field.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an input field with initial text value, cursor at the end.
    pub fn with_value(value: &str) -> Self {
        Self {
            value: value.to_string(),
            cursor: value.chars().count(),
            active: false,
        }
    }

    fn byte_index(&self, cursor: usize) -> usize {
        self.value
            .char_indices()
            .nth(cursor)
            .map_or(self.value.len(), |(i, _)| i)
    }

    /// Insert a character at the current cursor position.
    pub fn handle_char(&mut self, c: char) {
        let idx = self.byte_index(self.cursor);
        self.value.insert(idx, c);
        self.cursor += 1;
    }

    /// Delete the character before the cursor.
    pub fn handle_backspace(&mut self) {
        if self.cursor > 0 {
            let idx = self.byte_index(self.cursor - 1);
            self.value.remove(idx);
            self.cursor -= 1;
        }
    }

    /// Delete the character at the cursor position.
    pub fn handle_delete(&mut self) {
        if self.cursor < self.value.chars().count() {
            let idx = self.byte_index(self.cursor);
            self.value.remove(idx);
        }
    }

    pub fn move_cursor_left(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    pub fn move_cursor_right(&mut self) {
        if self.cursor < self.value.chars().count() {
            self.cursor += 1;
        }
    }

    pub fn clear(&mut self) {
        self.value.clear();
        self.cursor = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_and_backspace() {
        let mut field = InputField::new();
        for c in "milk".chars() {
            field.handle_char(c);
        }
        field.move_cursor_left();
        field.handle_backspace();
        assert_eq!(field.value, "mik");
        assert_eq!(field.cursor, 2);
    }

    #[test]
    fn test_multibyte_editing() {
        let mut field = InputField::with_value("café");
        assert_eq!(field.cursor, 4);
        field.handle_backspace();
        assert_eq!(field.value, "caf");
        field.move_cursor_left();
        field.handle_char('ß');
        assert_eq!(field.value, "caßf");
        field.handle_delete();
        assert_eq!(field.value, "caß");
    }

    #[test]
    fn test_cursor_stays_in_bounds() {
        let mut field = InputField::with_value("ab");
        field.move_cursor_right();
        assert_eq!(field.cursor, 2);
        field.handle_delete();
        assert_eq!(field.value, "ab");
        field.clear();
        field.move_cursor_left();
        field.handle_backspace();
        assert_eq!(field.cursor, 0);
    }
}
