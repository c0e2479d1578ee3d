//! Unicode-safe editing helpers for the input buffer. The cursor is a char
//! index; these translate to byte positions at the edit point.
use super::UIState;

impl UIState {
    pub fn safe_insert_char(&mut self, c: char) {
        let byte_pos = self.byte_pos(self.cursor_pos);
        self.input_buffer.insert(byte_pos, c);
        self.cursor_pos += 1;
    }

    pub fn safe_remove_char_before(&mut self) -> bool {
        if self.cursor_pos == 0 {
            return false;
        }
        let byte_pos = self.byte_pos(self.cursor_pos - 1);
        self.input_buffer.remove(byte_pos);
        self.cursor_pos -= 1;
        true
    }

    pub fn safe_remove_char_at(&mut self) -> bool {
        if self.cursor_pos >= self.input_buffer.chars().count() {
            return false;
        }
        let byte_pos = self.byte_pos(self.cursor_pos);
        self.input_buffer.remove(byte_pos);
        true
    }

    pub fn safe_cursor_left(&mut self) {
        if self.cursor_pos > 0 {
            self.cursor_pos -= 1;
        }
    }

    pub fn safe_cursor_right(&mut self) {
        if self.cursor_pos < self.input_buffer.chars().count() {
            self.cursor_pos += 1;
        }
    }

    pub fn safe_cursor_home(&mut self) {
        self.cursor_pos = 0;
    }

    pub fn safe_cursor_end(&mut self) {
        self.cursor_pos = self.input_buffer.chars().count();
    }

    /// Replaces the whole buffer, e.g. on a history recall.
    pub fn set_input(&mut self, text: &str) {
        self.input_buffer = text.to_string();
        self.safe_cursor_end();
    }

    fn byte_pos(&self, char_pos: usize) -> usize {
        self.input_buffer
            .char_indices()
            .nth(char_pos)
            .map(|(i, _)| i)
            .unwrap_or(self.input_buffer.len())
    }
}
