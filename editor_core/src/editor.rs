//! Main editor logic.
//!
//! An [`Editor`] is one open document: the buffer plus the search, history
//! and indentation state that act on it. Every edit made through the editor
//! is recorded in the history so it can be undone.

use crate::buffer::TextBuffer;
use crate::config::EditorConfig;
use crate::file::{FileError, FileInfo, FileManager};
use crate::filetype::FileType;
use crate::history::{History, Operation};
use crate::indent::IndentationManager;
use crate::position::{Match, Position};
use crate::search::{ReplaceOptions, SearchManager};
use std::path::{Path, PathBuf};

/// Cursor positions around a whole-document transform, keyed by the
/// operation it was recorded as.
#[derive(Debug, Clone)]
struct TransformCursor {
    op: Operation,
    before: Position,
    after: Position,
}

/// The state of a single open document.
#[derive(Debug, Clone)]
pub struct Editor {
    /// The text buffer.
    buffer: TextBuffer,
    search: SearchManager,
    /// Undo/redo history.
    history: History,
    indentation: IndentationManager,
    /// Current file path, if any.
    file_path: Option<PathBuf>,
    file_type: FileType,
    /// Whether the buffer has unsaved changes.
    modified: bool,
    cursor: Position,
    /// Cursors to restore when a transform is undone or redone.
    transform_cursors: Vec<TransformCursor>,
    trim_on_save: bool,
}

impl Default for Editor {
    fn default() -> Self {
        Self::new()
    }
}

impl Editor {
    /// Creates a new empty editor.
    pub fn new() -> Self {
        Self {
            buffer: TextBuffer::new(),
            search: SearchManager::new(),
            history: History::new(),
            indentation: IndentationManager::new(),
            file_path: None,
            file_type: FileType::plain_text(""),
            modified: false,
            cursor: Position::start(),
            transform_cursors: Vec::new(),
            trim_on_save: false,
        }
    }

    /// Creates an empty editor using the indentation and save settings in
    /// `config`.
    pub fn with_config(config: &EditorConfig) -> Self {
        let mut editor = Self::new();
        editor.apply_config(config);
        editor
    }

    /// Applies indentation and save settings without touching the document.
    pub fn apply_config(&mut self, config: &EditorConfig) {
        self.indentation.set_tab_size(config.tab_size);
        self.indentation.set_use_spaces(config.insert_spaces);
        self.indentation.set_auto_indent(config.auto_indent);
        self.trim_on_save = config.trim_whitespace;
    }

    /// Resets to an untitled, empty document.
    pub fn new_file(&mut self) {
        self.load_document("", None, FileType::plain_text(""));
    }

    /// Opens a file, replacing the current document.
    pub fn open_file(&mut self, files: &FileManager, path: impl AsRef<Path>) -> Result<FileInfo, FileError> {
        let path = path.as_ref();
        let (content, info) = files.read_file_with_info(path)?;
        let file_type = files.file_type(path);
        log::info!("Opened {} as {}", path.display(), file_type.name);
        self.load_document(&content, Some(path.to_path_buf()), file_type);
        Ok(info)
    }

    fn load_document(&mut self, content: &str, path: Option<PathBuf>, file_type: FileType) {
        self.buffer.set_content(content);
        self.file_path = path;
        self.file_type = file_type;
        self.modified = false;
        self.cursor = Position::start();
        self.history.clear();
        self.transform_cursors.clear();
        self.search.clear();
    }

    /// Saves the buffer to the current file path.
    pub fn save(&mut self, files: &FileManager) -> Result<(), FileError> {
        let path = self.file_path.clone().ok_or_else(|| FileError::InvalidPath {
            path: String::new(),
            reason: "document has no file path".to_string(),
        })?;
        self.write_to(files, &path)
    }

    /// Saves the buffer to a new file path, which becomes the current one.
    pub fn save_as(&mut self, files: &FileManager, path: impl AsRef<Path>) -> Result<(), FileError> {
        let path = path.as_ref();
        self.write_to(files, path)?;
        self.file_path = Some(path.to_path_buf());
        self.file_type = files.file_type(path);
        Ok(())
    }

    fn write_to(&mut self, files: &FileManager, path: &Path) -> Result<(), FileError> {
        if self.trim_on_save {
            self.trim_trailing_whitespace();
        }
        files.save_file_with_backup(path, &self.buffer.content())?;
        self.modified = false;
        Ok(())
    }

    /// Returns the current file path.
    pub fn file_path(&self) -> Option<&Path> {
        self.file_path.as_deref()
    }

    pub fn file_type(&self) -> &FileType {
        &self.file_type
    }

    /// Returns whether the buffer has unsaved changes.
    pub fn is_modified(&self) -> bool {
        self.modified
    }

    /// Returns a reference to the buffer.
    pub fn buffer(&self) -> &TextBuffer {
        &self.buffer
    }

    pub fn content(&self) -> String {
        self.buffer.content()
    }

    pub fn line_count(&self) -> usize {
        self.buffer.len_lines()
    }

    pub fn cursor(&self) -> Position {
        self.cursor
    }

    /// Moves the cursor, clamping it into the document.
    pub fn set_cursor(&mut self, pos: Position) {
        self.cursor = self.clamp(pos);
    }

    pub fn search(&self) -> &SearchManager {
        &self.search
    }

    pub fn search_mut(&mut self) -> &mut SearchManager {
        &mut self.search
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    pub fn history_mut(&mut self) -> &mut History {
        &mut self.history
    }

    pub fn indentation(&self) -> &IndentationManager {
        &self.indentation
    }

    pub fn indentation_mut(&mut self) -> &mut IndentationManager {
        &mut self.indentation
    }

    pub fn trim_on_save(&self) -> bool {
        self.trim_on_save
    }

    pub fn set_trim_on_save(&mut self, trim: bool) {
        self.trim_on_save = trim;
    }

    // ==================== Text Editing ====================

    /// Inserts `text` at `pos` and leaves the cursor after it.
    pub fn insert(&mut self, pos: Position, text: &str) {
        if text.is_empty() {
            return;
        }
        let at = self.buffer.position_to_char(pos);
        let pos = self.buffer.char_to_position(at);
        self.buffer.insert(at, text);
        self.history.record_insert(pos, text);
        self.cursor = self.buffer.char_to_position(at + text.chars().count());
        self.after_edit();
    }

    /// Deletes the text between two positions and returns it.
    pub fn delete(&mut self, start: Position, end: Position) -> String {
        let (from, to) = self.char_range(start, end);
        if from == to {
            return String::new();
        }
        let removed = self.buffer.slice(from, to);
        let pos = self.buffer.char_to_position(from);
        self.buffer.remove(from, to);
        self.history.record_delete(pos, &removed);
        self.cursor = pos;
        self.after_edit();
        removed
    }

    /// Replaces the text between two positions with `text`.
    pub fn replace_range(&mut self, start: Position, end: Position, text: &str) {
        let (from, to) = self.char_range(start, end);
        let old = self.buffer.slice(from, to);
        if old == text {
            return;
        }
        let pos = self.buffer.char_to_position(from);
        self.buffer.remove(from, to);
        self.buffer.insert(from, text);
        self.history.record_replace(pos, &old, text);
        self.cursor = self.buffer.char_to_position(from + text.chars().count());
        self.after_edit();
    }

    // ==================== Undo/Redo ====================

    /// Undoes the last operation and returns it.
    pub fn undo(&mut self) -> Option<Operation> {
        let op = self.history.undo()?;
        self.replay(&op.inverse());
        let target = self
            .transform_cursor(&op)
            .map_or(op.position, |mark| mark.before);
        self.cursor = self.clamp(target);
        Some(op)
    }

    /// Redoes the last undone operation and returns it.
    pub fn redo(&mut self) -> Option<Operation> {
        let op = self.history.redo()?;
        self.replay(&op);
        self.cursor = match self.transform_cursor(&op) {
            Some(mark) => self.clamp(mark.after),
            None => {
                let at = self.buffer.position_to_char(op.position);
                self.buffer.char_to_position(at + op.new_text.chars().count())
            }
        };
        Some(op)
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    /// Applies an operation to the buffer. Replays bypass the history.
    fn replay(&mut self, op: &Operation) {
        self.buffer.apply(op);
        self.after_edit();
    }

    // ==================== Search and Replace ====================

    /// Searches the document and selects the first match at or after the
    /// cursor. Returns the number of matches.
    pub fn find(&mut self, pattern: &str) -> usize {
        let content = self.buffer.content();
        let count = self.search.find(&content, pattern).len();
        let cursor = self.cursor;
        if let Some(m) = self.search.nearest_match(cursor) {
            self.cursor = m.start;
        }
        count
    }

    /// Moves to the next match.
    pub fn find_next(&mut self) -> Option<Match> {
        let m = self.search.next_match()?.clone();
        self.cursor = m.start;
        Some(m)
    }

    /// Moves to the previous match.
    pub fn find_previous(&mut self) -> Option<Match> {
        let m = self.search.previous_match()?.clone();
        self.cursor = m.start;
        Some(m)
    }

    /// Replaces matches of `pattern` and returns how many were replaced.
    pub fn replace(&mut self, pattern: &str, replacement: &str, options: &ReplaceOptions) -> usize {
        let content = self.buffer.content();
        let (replaced, count) = self.search.replace(&content, pattern, replacement, options);
        self.apply_transform(replaced);
        count
    }

    // ==================== Indentation ====================

    /// Inserts a newline at the cursor, carrying indentation forward.
    pub fn newline(&mut self) {
        let content = self.buffer.content();
        let at = self.buffer.position_to_char(self.cursor);
        let (updated, new_cursor) = self.indentation.handle_enter_key(&content, at);
        self.insert_generated(&updated, at, new_cursor);
    }

    /// Inserts one indent unit at the cursor.
    pub fn tab(&mut self) {
        let content = self.buffer.content();
        let at = self.buffer.position_to_char(self.cursor);
        let (updated, new_cursor) = self.indentation.handle_tab_key(&content, at);
        self.insert_generated(&updated, at, new_cursor);
    }

    /// Removes one indent level from the cursor's line.
    pub fn shift_tab(&mut self) {
        let content = self.buffer.content();
        let at = self.buffer.position_to_char(self.cursor);
        let (updated, new_cursor) = self.indentation.handle_shift_tab_key(&content, at);
        self.apply_transform_with_cursor(updated, Some(new_cursor));
    }

    /// Records the text a key handler inserted. The handlers only insert at
    /// the cursor, so the new text is `updated[at..new_cursor]` in chars.
    fn insert_generated(&mut self, updated: &str, at: usize, new_cursor: usize) {
        let inserted: String = updated
            .chars()
            .skip(at)
            .take(new_cursor.saturating_sub(at))
            .collect();
        let pos = self.buffer.char_to_position(at);
        self.insert(pos, &inserted);
    }

    /// Indents lines `first..=last` (1-based).
    pub fn indent_lines(&mut self, first: usize, last: usize) -> bool {
        let content = self.buffer.content();
        let updated = self
            .indentation
            .indent_lines(&content, first.saturating_sub(1), last.saturating_sub(1));
        self.apply_transform(updated)
    }

    /// Unindents lines `first..=last` (1-based).
    pub fn unindent_lines(&mut self, first: usize, last: usize) -> bool {
        let content = self.buffer.content();
        let updated = self
            .indentation
            .unindent_lines(&content, first.saturating_sub(1), last.saturating_sub(1));
        self.apply_transform(updated)
    }

    pub fn convert_tabs_to_spaces(&mut self) -> bool {
        let updated = self.indentation.convert_tabs_to_spaces(&self.buffer.content());
        self.apply_transform(updated)
    }

    pub fn convert_spaces_to_tabs(&mut self) -> bool {
        let updated = self.indentation.convert_spaces_to_tabs(&self.buffer.content());
        self.apply_transform(updated)
    }

    pub fn trim_trailing_whitespace(&mut self) -> bool {
        let updated = self.indentation.trim_trailing_whitespace(&self.buffer.content());
        self.apply_transform(updated)
    }

    // ==================== Navigation ====================

    /// Moves the cursor to the start of line `line` (1-based). Returns
    /// `None` when the line does not exist.
    pub fn goto_line(&mut self, line: usize) -> Option<Position> {
        if line == 0 || line > self.buffer.len_lines() {
            return None;
        }
        self.cursor = Position::new(line, 1);
        Some(self.cursor)
    }

    /// Replaces the whole document with `updated`, recording a single
    /// replace operation. Returns false if nothing changed.
    fn apply_transform(&mut self, updated: String) -> bool {
        self.apply_transform_with_cursor(updated, None)
    }

    /// Like [`apply_transform`](Self::apply_transform), moving the cursor to
    /// the char offset `cursor_after` in the new text when given.
    fn apply_transform_with_cursor(&mut self, updated: String, cursor_after: Option<usize>) -> bool {
        let content = self.buffer.content();
        if updated == content {
            return false;
        }
        let before = self.cursor;
        self.history.record_replace(Position::start(), &content, &updated);
        self.buffer.set_content(&updated);
        self.cursor = match cursor_after {
            Some(at) => self.buffer.char_to_position(at),
            None => self.clamp(before),
        };

        if self.history.is_enabled() {
            if let Some(op) = self.history.last_operation().cloned() {
                self.transform_cursors.push(TransformCursor {
                    op,
                    before,
                    after: self.cursor,
                });
                let excess = self
                    .transform_cursors
                    .len()
                    .saturating_sub(self.history.max_size());
                self.transform_cursors.drain(..excess);
            }
        }

        self.after_edit();
        true
    }

    fn transform_cursor(&self, op: &Operation) -> Option<&TransformCursor> {
        self.transform_cursors.iter().rev().find(|mark| &mark.op == op)
    }

    fn after_edit(&mut self) {
        self.modified = true;
        if self.search.is_active() {
            let content = self.buffer.content();
            self.search.refresh(&content);
        }
    }

    fn clamp(&self, pos: Position) -> Position {
        self.buffer
            .char_to_position(self.buffer.position_to_char(pos))
    }

    /// Converts two positions into an ordered character range.
    fn char_range(&self, a: Position, b: Position) -> (usize, usize) {
        let a = self.buffer.position_to_char(a);
        let b = self.buffer.position_to_char(b);
        (a.min(b), a.max(b))
    }
}
