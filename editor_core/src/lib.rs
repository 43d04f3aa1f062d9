//! Textpad Core - Pure text editor logic.
//!
//! This crate contains the editing model of a single-document text editor
//! (search and replace, undo history, indentation) together with the file,
//! file type and configuration services it needs. It has no dependencies on
//! windowing or rendering systems.

pub mod buffer;
pub mod config;
pub mod editor;
pub mod file;
pub mod filetype;
pub mod history;
pub mod indent;
pub mod position;
pub mod search;

pub use buffer::TextBuffer;
pub use config::{ConfigError, ConfigManager, Configuration, EditorConfig, SyntaxConfig, UiConfig};
pub use editor::Editor;
pub use file::{FileError, FileInfo, FileManager, FileOperation};
pub use filetype::{FileType, FileTypeRegistry};
pub use history::{History, Operation, OperationKind};
pub use indent::IndentationManager;
pub use position::{Match, Position};
pub use search::{ReplaceOptions, SearchError, SearchManager, SearchOptions};
