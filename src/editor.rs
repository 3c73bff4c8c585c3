use unicode_width::UnicodeWidthStr;

/// Editable text with a cursor, used for every input field in the window.
///
/// The cursor is a byte offset that always sits on a char boundary.
/// Single-line inputs ignore newlines.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TextInput {
    value: String,
    cursor: usize,
    multiline: bool,
}

impl TextInput {
    pub fn single_line() -> Self {
        Self::default()
    }

    pub fn multi_line() -> Self {
        Self {
            multiline: true,
            ..Self::default()
        }
    }

    #[cfg(test)]
    pub fn with_text(mut self, text: &str) -> Self {
        self.set_text(text);
        self
    }

    pub fn text(&self) -> &str {
        &self.value
    }

    pub fn is_empty(&self) -> bool {
        self.value.is_empty()
    }

    pub fn set_text(&mut self, text: &str) {
        self.value = if self.multiline {
            text.to_string()
        } else {
            text.replace(['\r', '\n'], " ")
        };
        self.cursor = self.value.len();
    }

    pub fn insert_char(&mut self, ch: char) {
        if ch == '\n' && !self.multiline {
            return;
        }
        self.value.insert(self.cursor, ch);
        self.cursor += ch.len_utf8();
    }

    pub fn insert_newline(&mut self) {
        self.insert_char('\n');
    }

    pub fn backspace(&mut self) {
        if let Some(prev) = self.prev_boundary() {
            self.value.replace_range(prev..self.cursor, "");
            self.cursor = prev;
        }
    }

    pub fn delete(&mut self) {
        if let Some(next) = self.next_boundary() {
            self.value.replace_range(self.cursor..next, "");
        }
    }

    pub fn move_left(&mut self) {
        if let Some(prev) = self.prev_boundary() {
            self.cursor = prev;
        }
    }

    pub fn move_right(&mut self) {
        if let Some(next) = self.next_boundary() {
            self.cursor = next;
        }
    }

    pub fn move_home(&mut self) {
        self.cursor = self.line_start();
    }

    pub fn move_end(&mut self) {
        self.cursor = self.value[self.cursor..]
            .find('\n')
            .map(|i| self.cursor + i)
            .unwrap_or(self.value.len());
    }

    pub fn move_up(&mut self) {
        let start = self.line_start();
        if start == 0 {
            return;
        }
        let column = self.value[start..self.cursor].chars().count();
        let prev_start = self.value[..start - 1]
            .rfind('\n')
            .map(|i| i + 1)
            .unwrap_or(0);
        self.cursor = advance_chars(&self.value, prev_start, start - 1, column);
    }

    pub fn move_down(&mut self) {
        let Some(offset) = self.value[self.cursor..].find('\n') else {
            return;
        };
        let column = self.value[self.line_start()..self.cursor].chars().count();
        let next_start = self.cursor + offset + 1;
        let next_end = self.value[next_start..]
            .find('\n')
            .map(|i| next_start + i)
            .unwrap_or(self.value.len());
        self.cursor = advance_chars(&self.value, next_start, next_end, column);
    }

    /// Cursor position as (display column, line index).
    pub fn cursor_position(&self) -> (u16, u16) {
        let before = &self.value[..self.cursor];
        let line = before.matches('\n').count();
        let column = before[self.line_start()..].width();
        (column as u16, line as u16)
    }

    fn line_start(&self) -> usize {
        self.value[..self.cursor]
            .rfind('\n')
            .map(|i| i + 1)
            .unwrap_or(0)
    }

    fn prev_boundary(&self) -> Option<usize> {
        self.value[..self.cursor]
            .char_indices()
            .next_back()
            .map(|(i, _)| i)
    }

    fn next_boundary(&self) -> Option<usize> {
        self.value[self.cursor..]
            .chars()
            .next()
            .map(|c| self.cursor + c.len_utf8())
    }
}

/// Byte offset `columns` chars after `start`, capped at `end`.
fn advance_chars(text: &str, start: usize, end: usize, columns: usize) -> usize {
    text[start..end]
        .char_indices()
        .nth(columns)
        .map(|(i, _)| start + i)
        .unwrap_or(end)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn typed(input: &mut TextInput, text: &str) {
        for ch in text.chars() {
            input.insert_char(ch);
        }
    }

    #[test]
    fn typing_and_backspace() {
        let mut input = TextInput::single_line();
        typed(&mut input, "hallo");
        input.backspace();
        input.backspace();
        typed(&mut input, "lo");
        assert_eq!(input.text(), "hallo");
        assert_eq!(input.cursor_position(), (5, 0));
    }

    #[test]
    fn editing_in_the_middle() {
        let mut input = TextInput::single_line().with_text("ac");
        input.move_left();
        input.insert_char('b');
        assert_eq!(input.text(), "abc");
        input.move_home();
        input.delete();
        assert_eq!(input.text(), "bc");
        input.move_end();
        input.delete();
        assert_eq!(input.text(), "bc");
    }

    #[test]
    fn single_line_rejects_newlines() {
        let mut input = TextInput::single_line();
        input.insert_newline();
        input.set_text("one\ntwo");
        assert_eq!(input.text(), "one two");
    }

    #[test]
    fn multi_byte_chars_keep_boundaries() {
        let mut input = TextInput::single_line();
        typed(&mut input, "日本語");
        input.move_left();
        input.backspace();
        assert_eq!(input.text(), "日語");
        // wide glyphs take two columns each
        assert_eq!(input.cursor_position(), (2, 0));
    }

    #[test]
    fn multi_line_cursor_movement() {
        let mut input = TextInput::multi_line();
        typed(&mut input, "first");
        input.insert_newline();
        typed(&mut input, "ab");
        assert_eq!(input.cursor_position(), (2, 1));

        input.move_up();
        assert_eq!(input.cursor_position(), (2, 0));
        input.move_end();
        input.move_down();
        assert_eq!(input.cursor_position(), (2, 1));
        input.move_home();
        assert_eq!(input.cursor_position(), (0, 1));
        input.move_down();
        assert_eq!(input.cursor_position(), (0, 1));
    }

    #[test]
    fn backspace_at_start_is_noop() {
        let mut input = TextInput::multi_line();
        input.backspace();
        input.move_left();
        input.move_up();
        assert!(input.is_empty());
        assert_eq!(input.cursor_position(), (0, 0));
    }
}
