//! Text buffer implementation using ropey.
//!
//! Only `\n` counts as a line break, matching how search splits lines.

use crate::history::{Operation, OperationKind};
use crate::position::Position;
use ropey::Rope;

/// A text buffer backed by a rope data structure.
#[derive(Debug, Clone)]
pub struct TextBuffer {
    rope: Rope,
}

impl Default for TextBuffer {
    fn default() -> Self {
        Self::new()
    }
}

impl TextBuffer {
    /// Creates a new empty text buffer.
    pub fn new() -> Self {
        Self { rope: Rope::new() }
    }

    /// Creates a text buffer from a string.
    pub fn from_str(text: &str) -> Self {
        Self {
            rope: Rope::from_str(text),
        }
    }

    /// Returns a snapshot of the whole buffer.
    pub fn content(&self) -> String {
        self.rope.to_string()
    }

    /// Replaces the whole buffer.
    pub fn set_content(&mut self, text: &str) {
        self.rope = Rope::from_str(text);
    }

    /// Returns the total number of characters in the buffer.
    pub fn len_chars(&self) -> usize {
        self.rope.len_chars()
    }

    /// Returns the total number of lines in the buffer.
    pub fn len_lines(&self) -> usize {
        self.rope.len_lines()
    }

    /// Returns true if the buffer is empty.
    pub fn is_empty(&self) -> bool {
        self.rope.len_chars() == 0
    }

    /// Inserts a string at the given character index.
    pub fn insert(&mut self, char_idx: usize, text: &str) {
        let idx = char_idx.min(self.len_chars());
        self.rope.insert(idx, text);
    }

    /// Removes text in the given character range.
    pub fn remove(&mut self, start: usize, end: usize) {
        let start = start.min(self.len_chars());
        let end = end.min(self.len_chars());
        if start < end {
            self.rope.remove(start..end);
        }
    }

    /// Returns the text in the given character range.
    pub fn slice(&self, start: usize, end: usize) -> String {
        let start = start.min(self.len_chars());
        let end = end.min(self.len_chars()).max(start);
        self.rope.slice(start..end).to_string()
    }

    /// Converts a character index to a 1-based position.
    pub fn char_to_position(&self, char_idx: usize) -> Position {
        let char_idx = char_idx.min(self.len_chars());
        let line = self.rope.char_to_line(char_idx);
        let col = char_idx - self.rope.line_to_char(line);
        Position::new(line + 1, col + 1)
    }

    /// Converts a 1-based position to a character index, clamping the
    /// column to the line length.
    pub fn position_to_char(&self, pos: Position) -> usize {
        let line = pos.line.saturating_sub(1);
        if line >= self.len_lines() {
            return self.len_chars();
        }
        let line_start = self.rope.line_to_char(line);
        line_start + pos.column.saturating_sub(1).min(self.line_len_chars(line))
    }

    /// Returns the length of a line (0-based) in characters, excluding the newline.
    pub fn line_len_chars(&self, line: usize) -> usize {
        if line >= self.len_lines() {
            return 0;
        }
        let line_slice = self.rope.line(line);
        let len = line_slice.len_chars();
        if len > 0 && line_slice.char(len - 1) == '\n' {
            return len - 1;
        }
        len
    }

    /// Returns the line at the given 0-based index without its newline.
    pub fn line(&self, line: usize) -> Option<String> {
        if line >= self.len_lines() {
            return None;
        }
        let mut s = self.rope.line(line).to_string();
        if s.ends_with('\n') {
            s.pop();
        }
        Some(s)
    }

    /// Replays a recorded operation into the buffer.
    pub fn apply(&mut self, op: &Operation) {
        let at = self.position_to_char(op.position);
        match op.kind {
            OperationKind::Insert => self.insert(at, &op.new_text),
            OperationKind::Delete => self.remove(at, at + op.old_text.chars().count()),
            OperationKind::Replace => {
                self.remove(at, at + op.old_text.chars().count());
                self.insert(at, &op.new_text);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_buffer() {
        let buf = TextBuffer::new();
        assert!(buf.is_empty());
        assert_eq!(buf.len_chars(), 0);
        assert_eq!(buf.len_lines(), 1);
    }

    #[test]
    fn test_content_round_trip() {
        let mut buf = TextBuffer::from_str("hello\nworld");
        assert_eq!(buf.len_lines(), 2);
        buf.set_content("replaced");
        assert_eq!(buf.content(), "replaced");
    }

    #[test]
    fn test_insert_and_remove() {
        let mut buf = TextBuffer::new();
        buf.insert(0, "hello");
        buf.insert(5, " world");
        assert_eq!(buf.content(), "hello world");

        buf.remove(5, 11);
        assert_eq!(buf.content(), "hello");
        buf.remove(3, 100);
        assert_eq!(buf.content(), "hel");
    }

    #[test]
    fn test_carriage_return_is_not_a_line_break() {
        let buf = TextBuffer::from_str("a\r\nb\rc");
        assert_eq!(buf.len_lines(), 2);
        assert_eq!(buf.line(0), Some("a\r".to_string()));
        assert_eq!(buf.line(1), Some("b\rc".to_string()));
    }

    #[test]
    fn test_line_operations() {
        let buf = TextBuffer::from_str("abc\ndefgh\n");
        assert_eq!(buf.line_len_chars(0), 3);
        assert_eq!(buf.line_len_chars(1), 5);
        assert_eq!(buf.line_len_chars(2), 0);
        assert_eq!(buf.line(1), Some("defgh".to_string()));
        assert_eq!(buf.line(3), None);
    }

    #[test]
    fn test_position_conversion() {
        let buf = TextBuffer::from_str("abc\ndéfgh");
        assert_eq!(buf.char_to_position(0), Position::new(1, 1));
        assert_eq!(buf.char_to_position(3), Position::new(1, 4));
        assert_eq!(buf.char_to_position(6), Position::new(2, 3));

        assert_eq!(buf.position_to_char(Position::new(2, 3)), 6);
        assert_eq!(buf.position_to_char(Position::new(1, 99)), 3);
        assert_eq!(buf.position_to_char(Position::new(9, 1)), buf.len_chars());
    }

    #[test]
    fn test_slice() {
        let buf = TextBuffer::from_str("hello world");
        assert_eq!(buf.slice(6, 11), "world");
        assert_eq!(buf.slice(8, 3), "");
    }

    #[test]
    fn test_apply_operations() {
        let mut buf = TextBuffer::from_str("Hello World\nBye");
        let insert = Operation::insert(Position::new(1, 6), ",");
        buf.apply(&insert);
        assert_eq!(buf.content(), "Hello, World\nBye");

        buf.apply(&insert.inverse());
        assert_eq!(buf.content(), "Hello World\nBye");

        buf.apply(&Operation::replace(Position::new(2, 1), "Bye", "Ciao"));
        assert_eq!(buf.content(), "Hello World\nCiao");

        buf.apply(&Operation::delete(Position::new(1, 1), "Hello "));
        assert_eq!(buf.content(), "World\nCiao");
    }
}
