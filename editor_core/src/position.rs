//! Document positions and located search matches.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Represents a position in the document as (line, column).
/// Both are 1-indexed; columns count characters, not bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Position {
    pub line: usize,
    pub column: usize,
}

impl Position {
    pub fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }

    /// The first character of the document.
    pub fn start() -> Self {
        Self::new(1, 1)
    }
}

impl Default for Position {
    fn default() -> Self {
        Self::start()
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Ln {}, Col {}", self.line, self.column)
    }
}

/// A located occurrence of a search pattern.
///
/// Matches never span lines: `start` and `end` share a line, and `end`
/// is one column past the last matched character.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Match {
    pub start: Position,
    pub end: Position,
    /// The matched text as it appears in the document (original case).
    pub text: String,
}

impl Match {
    /// Creates a match on `line` covering the 0-based char range `[start_col, end_col)`.
    pub fn on_line(line: usize, start_col: usize, end_col: usize, text: &str) -> Self {
        Self {
            start: Position::new(line, start_col + 1),
            end: Position::new(line, end_col + 1),
            text: text.to_string(),
        }
    }

    /// Returns the length of the match in characters.
    pub fn len(&self) -> usize {
        self.end.column - self.start.column
    }

    /// Returns true for zero-width matches (possible with regex patterns).
    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }
}
