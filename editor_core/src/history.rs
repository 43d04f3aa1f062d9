//! Undo/Redo history system.
//!
//! The history only records what happened; replaying an operation into a
//! buffer is up to the caller (see [`TextBuffer::apply`](crate::TextBuffer::apply)).

use crate::position::Position;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::SystemTime;

/// Default maximum number of undo levels.
pub const DEFAULT_MAX_SIZE: usize = 100;

/// The kind of edit an [`Operation`] records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OperationKind {
    Insert,
    Delete,
    Replace,
}

impl fmt::Display for OperationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            OperationKind::Insert => "Insert",
            OperationKind::Delete => "Delete",
            OperationKind::Replace => "Replace",
        };
        f.write_str(name)
    }
}

/// A single edit that can be undone/redone.
///
/// `old_text` is empty for inserts and `new_text` is empty for deletes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Operation {
    pub kind: OperationKind,
    pub position: Position,
    pub old_text: String,
    pub new_text: String,
    /// When the edit happened. `None` is stamped on record.
    pub timestamp: Option<SystemTime>,
}

impl Operation {
    pub fn insert(position: Position, text: &str) -> Self {
        Self {
            kind: OperationKind::Insert,
            position,
            old_text: String::new(),
            new_text: text.to_string(),
            timestamp: None,
        }
    }

    pub fn delete(position: Position, text: &str) -> Self {
        Self {
            kind: OperationKind::Delete,
            position,
            old_text: text.to_string(),
            new_text: String::new(),
            timestamp: None,
        }
    }

    pub fn replace(position: Position, old_text: &str, new_text: &str) -> Self {
        Self {
            kind: OperationKind::Replace,
            position,
            old_text: old_text.to_string(),
            new_text: new_text.to_string(),
            timestamp: None,
        }
    }

    /// Returns the operation that reverts this one (for undo).
    pub fn inverse(&self) -> Operation {
        let kind = match self.kind {
            OperationKind::Insert => OperationKind::Delete,
            OperationKind::Delete => OperationKind::Insert,
            OperationKind::Replace => OperationKind::Replace,
        };
        Operation {
            kind,
            position: self.position,
            old_text: self.new_text.clone(),
            new_text: self.old_text.clone(),
            timestamp: self.timestamp,
        }
    }

    fn stamped(mut self) -> Self {
        self.timestamp = Some(SystemTime::now());
        self
    }
}

/// Manages bounded undo/redo stacks for one document.
#[derive(Debug, Clone)]
pub struct History {
    /// Operations that can be undone, most recent last.
    undo_stack: Vec<Operation>,
    /// Operations that can be redone, most recent last.
    redo_stack: Vec<Operation>,
    /// Maximum number of undo levels.
    max_size: usize,
    /// Whether new operations are recorded.
    enabled: bool,
}

impl Default for History {
    fn default() -> Self {
        Self::new()
    }
}

impl History {
    /// Creates a new history with the default maximum size.
    pub fn new() -> Self {
        Self::with_max_size(DEFAULT_MAX_SIZE)
    }

    /// Creates a new history with the given maximum size.
    /// A size of zero falls back to the default.
    pub fn with_max_size(max_size: usize) -> Self {
        Self {
            undo_stack: Vec::new(),
            redo_stack: Vec::new(),
            max_size: if max_size == 0 { DEFAULT_MAX_SIZE } else { max_size },
            enabled: true,
        }
    }

    /// Records an operation. Any redo branch is discarded and the oldest
    /// operations are evicted once the stack exceeds the maximum size.
    pub fn record(&mut self, mut op: Operation) {
        if !self.enabled {
            log::debug!("History disabled, dropping {} operation", op.kind);
            return;
        }

        if op.timestamp.is_none() {
            op.timestamp = Some(SystemTime::now());
        }

        self.undo_stack.push(op);
        self.redo_stack.clear();
        self.enforce_limit();
    }

    pub fn record_insert(&mut self, position: Position, text: &str) {
        self.record(Operation::insert(position, text).stamped());
    }

    pub fn record_delete(&mut self, position: Position, text: &str) {
        self.record(Operation::delete(position, text).stamped());
    }

    pub fn record_replace(&mut self, position: Position, old_text: &str, new_text: &str) {
        self.record(Operation::replace(position, old_text, new_text).stamped());
    }

    /// Returns true if undo is available.
    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    /// Returns true if redo is available.
    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    /// Pops the last operation for undo and moves it to the redo stack.
    pub fn undo(&mut self) -> Option<Operation> {
        let op = self.undo_stack.pop()?;
        self.redo_stack.push(op.clone());
        Some(op)
    }

    /// Pops the last undone operation and moves it back to the undo stack.
    pub fn redo(&mut self) -> Option<Operation> {
        let op = self.redo_stack.pop()?;
        self.undo_stack.push(op.clone());
        Some(op)
    }

    /// Clears all history. The size limit and enabled flag are kept.
    pub fn clear(&mut self) {
        self.undo_stack.clear();
        self.redo_stack.clear();
    }

    pub fn undo_count(&self) -> usize {
        self.undo_stack.len()
    }

    pub fn redo_count(&self) -> usize {
        self.redo_stack.len()
    }

    /// Enables or disables recording. Operations recorded while disabled are dropped.
    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Sets the maximum size, trimming the oldest operations right away.
    /// Returns false (and keeps the old limit) for a size of zero.
    pub fn set_max_size(&mut self, max_size: usize) -> bool {
        if max_size == 0 {
            return false;
        }
        self.max_size = max_size;
        self.enforce_limit();
        true
    }

    pub fn max_size(&self) -> usize {
        self.max_size
    }

    /// Returns the most recent operation without removing it.
    pub fn last_operation(&self) -> Option<&Operation> {
        self.undo_stack.last()
    }

    /// Returns a copy of the undo stack, oldest first.
    pub fn operations(&self) -> Vec<Operation> {
        self.undo_stack.clone()
    }

    fn enforce_limit(&mut self) {
        if self.undo_stack.len() > self.max_size {
            let excess = self.undo_stack.len() - self.max_size;
            self.undo_stack.drain(..excess);
        }
    }
}
