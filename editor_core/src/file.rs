//! File I/O for the editor.
//!
//! Reading, saving with a `.bak` backup, metadata queries and path
//! validation. File type lookups go through the manager's own
//! [`FileTypeRegistry`].

use crate::filetype::{FileType, FileTypeRegistry};
use serde::Serialize;
use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::SystemTime;
use thiserror::Error;

/// Characters rejected by [`FileManager::validate_file_path`].
const INVALID_PATH_CHARS: [char; 7] = ['<', '>', ':', '"', '|', '?', '*'];

/// The file operation that failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileOperation {
    Read,
    Save,
    CreateDirectory,
}

impl fmt::Display for FileOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FileOperation::Read => write!(f, "read"),
            FileOperation::Save => write!(f, "save"),
            FileOperation::CreateDirectory => write!(f, "create directory"),
        }
    }
}

/// Errors from file operations.
#[derive(Error, Debug)]
pub enum FileError {
    #[error("failed to {operation} '{}': {source}", path.display())]
    Io {
        operation: FileOperation,
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("invalid file path '{path}': {reason}")]
    InvalidPath { path: String, reason: String },
}

impl FileError {
    fn io(operation: FileOperation, path: &Path, source: io::Error) -> Self {
        FileError::Io {
            operation,
            path: path.to_path_buf(),
            source,
        }
    }
}

/// Metadata about a file on disk.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FileInfo {
    /// Absolute path when it can be resolved.
    pub path: PathBuf,
    pub name: String,
    pub size: u64,
    pub modified: Option<SystemTime>,
    pub is_directory: bool,
    /// Permission bits in `ls -l` form, e.g. `-rw-r--r--`.
    pub permissions: String,
    /// Lowercase extension with its leading dot, or empty.
    pub extension: String,
}

/// Handles file operations.
#[derive(Debug, Clone, Default)]
pub struct FileManager {
    file_types: FileTypeRegistry,
}

impl FileManager {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_registry(file_types: FileTypeRegistry) -> Self {
        Self { file_types }
    }

    pub fn registry(&self) -> &FileTypeRegistry {
        &self.file_types
    }

    /// Reads a file and returns its content together with its metadata.
    pub fn read_file_with_info(&self, path: impl AsRef<Path>) -> Result<(String, FileInfo), FileError> {
        let path = path.as_ref();
        let info = self.file_info(path)?;
        let content =
            fs::read_to_string(path).map_err(|e| FileError::io(FileOperation::Read, path, e))?;
        log::info!("Read {} ({} bytes)", path.display(), info.size);
        Ok((content, info))
    }

    /// Saves `content` to `path`, first copying any existing file to
    /// `<path>.bak`. A failed backup does not stop the save.
    pub fn save_file_with_backup(&self, path: impl AsRef<Path>, content: &str) -> Result<(), FileError> {
        let path = path.as_ref();
        if path.is_file() {
            let backup = backup_path(path);
            if let Err(e) = fs::copy(path, &backup) {
                log::warn!("Failed to create backup {}: {}", backup.display(), e);
            }
        }

        fs::write(path, content).map_err(|e| FileError::io(FileOperation::Save, path, e))?;
        log::info!("Saved {} ({} bytes)", path.display(), content.len());
        Ok(())
    }

    /// Returns metadata for `path`.
    pub fn file_info(&self, path: impl AsRef<Path>) -> Result<FileInfo, FileError> {
        let path = path.as_ref();
        let meta = fs::metadata(path).map_err(|e| FileError::io(FileOperation::Read, path, e))?;
        let absolute = fs::canonicalize(path).unwrap_or_else(|_| path.to_path_buf());
        let name = absolute
            .file_name()
            .or_else(|| path.file_name())
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();

        Ok(FileInfo {
            name,
            size: meta.len(),
            modified: meta.modified().ok(),
            is_directory: meta.is_dir(),
            permissions: permissions_string(&meta),
            extension: extension_of(path),
            path: absolute,
        })
    }

    pub fn file_exists(&self, path: impl AsRef<Path>) -> bool {
        path.as_ref().exists()
    }

    pub fn is_readable(&self, path: impl AsRef<Path>) -> bool {
        fs::File::open(path).is_ok()
    }

    /// Returns whether `path` can be written. For a file that does not
    /// exist yet, checks whether its directory accepts new files.
    pub fn is_writable(&self, path: impl AsRef<Path>) -> bool {
        let path = path.as_ref();
        match fs::OpenOptions::new().write(true).open(path) {
            Ok(_) => true,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                let dir = match path.parent() {
                    Some(parent) if !parent.as_os_str().is_empty() => parent,
                    _ => Path::new("."),
                };
                is_dir_writable(dir)
            }
            Err(_) => false,
        }
    }

    /// Rejects empty paths and paths containing characters that are not
    /// portable across file systems.
    pub fn validate_file_path(&self, path: &str) -> Result<(), FileError> {
        if path.is_empty() {
            return Err(FileError::InvalidPath {
                path: path.to_string(),
                reason: "path must not be empty".to_string(),
            });
        }
        if let Some(c) = path.chars().find(|c| INVALID_PATH_CHARS.contains(c)) {
            return Err(FileError::InvalidPath {
                path: path.to_string(),
                reason: format!("contains invalid character '{}'", c),
            });
        }
        Ok(())
    }

    /// Creates a directory and any missing parents.
    pub fn create_directory(&self, path: impl AsRef<Path>) -> Result<(), FileError> {
        let path = path.as_ref();
        fs::create_dir_all(path).map_err(|e| FileError::io(FileOperation::CreateDirectory, path, e))
    }

    pub fn file_type(&self, path: impl AsRef<Path>) -> FileType {
        self.file_types.detect(path)
    }

    pub fn lexer_name(&self, path: impl AsRef<Path>) -> String {
        self.file_types.lexer_name(path)
    }
}

/// Returns the backup location for `path`: the same name with `.bak` appended.
pub fn backup_path(path: &Path) -> PathBuf {
    let mut name = path.as_os_str().to_owned();
    name.push(".bak");
    PathBuf::from(name)
}

fn extension_of(path: &Path) -> String {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| format!(".{}", ext.to_lowercase()))
        .unwrap_or_default()
}

fn is_dir_writable(dir: &Path) -> bool {
    let probe = dir.join(".write_test");
    match fs::File::create(&probe) {
        Ok(_) => {
            let _ = fs::remove_file(&probe);
            true
        }
        Err(_) => false,
    }
}

#[cfg(unix)]
fn permissions_string(meta: &fs::Metadata) -> String {
    use std::os::unix::fs::PermissionsExt;

    let mode = meta.permissions().mode();
    let mut s = String::with_capacity(10);
    s.push(if meta.is_dir() { 'd' } else { '-' });
    for shift in [6, 3, 0] {
        let bits = (mode >> shift) & 0o7;
        s.push(if bits & 0o4 != 0 { 'r' } else { '-' });
        s.push(if bits & 0o2 != 0 { 'w' } else { '-' });
        s.push(if bits & 0o1 != 0 { 'x' } else { '-' });
    }
    s
}

#[cfg(not(unix))]
fn permissions_string(meta: &fs::Metadata) -> String {
    let kind = if meta.is_dir() { 'd' } else { '-' };
    if meta.permissions().readonly() {
        format!("{}r--r--r--", kind)
    } else {
        format!("{}rw-rw-rw-", kind)
    }
}
