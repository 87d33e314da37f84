/// Editable text with a byte-offset cursor that always sits on a char boundary.
#[derive(Debug, Clone, Default)]
pub struct TextBuffer {
    text: String,
    cursor: usize,
}

impl TextBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Replace the contents and park the cursor at the end.
    pub fn set<T: Into<String>>(&mut self, value: T) {
        self.text = value.into();
        self.cursor = self.text.len();
    }

    pub fn clear(&mut self) {
        self.text.clear();
        self.cursor = 0;
    }

    pub fn insert_char(&mut self, ch: char) {
        if ch == '\r' {
            return;
        }
        self.text.insert(self.cursor, ch);
        self.cursor += ch.len_utf8();
    }

    pub fn insert_newline(&mut self) {
        self.insert_char('\n');
    }

    pub fn backspace(&mut self) {
        if let Some(prev) = self.prev_boundary() {
            self.text.drain(prev..self.cursor);
            self.cursor = prev;
        }
    }

    pub fn delete_char(&mut self) {
        if let Some(next) = self.next_boundary() {
            self.text.drain(self.cursor..next);
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
        let (line, _) = self.cursor_line_col();
        self.cursor = self.line_spans()[line].0;
    }

    pub fn move_end(&mut self) {
        let (line, _) = self.cursor_line_col();
        self.cursor = self.line_spans()[line].1;
    }

    pub fn move_up(&mut self) {
        let (line, col) = self.cursor_line_col();
        if line > 0 {
            self.cursor = self.offset_in_line(line - 1, col);
        }
    }

    pub fn move_down(&mut self) {
        let (line, col) = self.cursor_line_col();
        if line + 1 < self.line_spans().len() {
            self.cursor = self.offset_in_line(line + 1, col);
        }
    }

    /// Zero-based line and column (in chars) of the cursor.
    pub fn cursor_line_col(&self) -> (usize, usize) {
        let spans = self.line_spans();
        let line = spans
            .iter()
            .position(|(start, end)| self.cursor >= *start && self.cursor <= *end)
            .unwrap_or(0);
        let start = spans[line].0;
        (line, self.text[start..self.cursor].chars().count())
    }

    fn prev_boundary(&self) -> Option<usize> {
        self.text[..self.cursor]
            .char_indices()
            .next_back()
            .map(|(idx, _)| idx)
    }

    fn next_boundary(&self) -> Option<usize> {
        self.text[self.cursor..]
            .chars()
            .next()
            .map(|ch| self.cursor + ch.len_utf8())
    }

    /// `(start, end)` byte offsets of every line, newline excluded. Never empty.
    fn line_spans(&self) -> Vec<(usize, usize)> {
        let mut spans = Vec::new();
        let mut start = 0;
        for (idx, ch) in self.text.char_indices() {
            if ch == '\n' {
                spans.push((start, idx));
                start = idx + 1;
            }
        }
        spans.push((start, self.text.len()));
        spans
    }

    fn offset_in_line(&self, line: usize, column: usize) -> usize {
        let (start, end) = self.line_spans()[line];
        self.text[start..end]
            .char_indices()
            .nth(column)
            .map(|(idx, _)| start + idx)
            .unwrap_or(end)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_places_cursor_at_end() {
        let mut buffer = TextBuffer::new();
        buffer.set("hello");

        assert_eq!(buffer.as_str(), "hello");
        assert_eq!(buffer.cursor_line_col(), (0, 5));
    }

    #[test]
    fn cursor_line_col_tracks_navigation() {
        let mut buffer = TextBuffer::new();
        buffer.set("alpha\nbeta");

        buffer.move_home();
        buffer.move_right();
        assert_eq!(buffer.cursor_line_col(), (1, 1));

        buffer.move_up();
        assert_eq!(buffer.cursor_line_col(), (0, 1));
        buffer.move_end();
        buffer.move_down();
        assert_eq!(buffer.cursor_line_col(), (1, 4));
    }

    #[test]
    fn edits_respect_multibyte_chars() {
        let mut buffer = TextBuffer::new();
        buffer.set("café");
        buffer.backspace();
        buffer.insert_char('e');
        buffer.move_left();
        buffer.move_left();
        buffer.delete_char();
        assert_eq!(buffer.as_str(), "cae");
    }

    #[test]
    fn newline_splits_lines() {
        let mut buffer = TextBuffer::new();
        buffer.set("ab");
        buffer.move_left();
        buffer.insert_newline();
        assert_eq!(buffer.as_str(), "a\nb");
        assert_eq!(buffer.cursor_line_col(), (1, 0));
    }
}
