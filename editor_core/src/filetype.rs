//! File type detection.
//!
//! Maps file extensions to a display name, lexer name and MIME type, and
//! resolves lexer names to bundled tree-sitter grammars. The registry is an
//! ordinary value: build one per process and pass it by reference.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;

/// Lexer name used for unknown files.
pub const PLAIN_TEXT_LEXER: &str = "text";

/// A supported file type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileType {
    pub name: String,
    /// Extensions including the leading dot, e.g. `.rs`.
    pub extensions: Vec<String>,
    pub lexer_name: String,
    pub mime_type: String,
}

impl FileType {
    pub fn new(name: &str, extensions: &[&str], lexer_name: &str, mime_type: &str) -> Self {
        Self {
            name: name.to_string(),
            extensions: extensions.iter().map(|e| e.to_string()).collect(),
            lexer_name: lexer_name.to_string(),
            mime_type: mime_type.to_string(),
        }
    }

    /// The fallback type for an unrecognized extension.
    pub fn plain_text(extension: &str) -> Self {
        let extensions: &[&str] = if extension.is_empty() { &[] } else { &[extension] };
        Self::new("Plain Text", extensions, PLAIN_TEXT_LEXER, "text/plain")
    }

    /// Returns whether a tree-sitter grammar is bundled for this type.
    pub fn has_grammar(&self) -> bool {
        grammar(&self.lexer_name).is_some()
    }
}

/// Registry of known file types, keyed by lowercase extension.
#[derive(Debug, Clone)]
pub struct FileTypeRegistry {
    by_extension: HashMap<String, FileType>,
}

impl Default for FileTypeRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl FileTypeRegistry {
    /// Creates a registry with the default file types.
    pub fn new() -> Self {
        let mut registry = Self::empty();
        for file_type in default_file_types() {
            registry.register(file_type);
        }
        registry
    }

    /// Creates a registry with no file types.
    pub fn empty() -> Self {
        Self {
            by_extension: HashMap::new(),
        }
    }

    /// Registers a file type under each of its extensions, replacing any
    /// previous owner of an extension.
    pub fn register(&mut self, file_type: FileType) {
        for ext in &file_type.extensions {
            self.by_extension
                .insert(ext.to_lowercase(), file_type.clone());
        }
    }

    /// Detects the file type of `filename` from its extension.
    pub fn detect(&self, filename: impl AsRef<Path>) -> FileType {
        let ext = extension_of(filename.as_ref());
        self.by_extension
            .get(&ext)
            .cloned()
            .unwrap_or_else(|| FileType::plain_text(&ext))
    }

    /// Looks up a file type by extension; the leading dot is optional.
    pub fn by_extension(&self, extension: &str) -> Option<&FileType> {
        let ext = extension.to_lowercase();
        if ext.starts_with('.') {
            self.by_extension.get(&ext)
        } else {
            self.by_extension.get(&format!(".{}", ext))
        }
    }

    /// Returns all registered extensions, sorted.
    pub fn supported_extensions(&self) -> Vec<String> {
        let mut extensions: Vec<String> = self.by_extension.keys().cloned().collect();
        extensions.sort();
        extensions
    }

    /// Returns each registered file type once, sorted by name.
    pub fn all_file_types(&self) -> Vec<FileType> {
        let mut by_name: HashMap<&str, &FileType> = HashMap::new();
        for file_type in self.by_extension.values() {
            by_name.insert(&file_type.name, file_type);
        }
        let mut types: Vec<FileType> = by_name.into_values().cloned().collect();
        types.sort_by(|a, b| a.name.cmp(&b.name));
        types
    }

    pub fn is_supported(&self, filename: impl AsRef<Path>) -> bool {
        self.by_extension
            .contains_key(&extension_of(filename.as_ref()))
    }

    pub fn lexer_name(&self, filename: impl AsRef<Path>) -> String {
        self.detect(filename).lexer_name
    }

    pub fn mime_type(&self, filename: impl AsRef<Path>) -> String {
        self.detect(filename).mime_type
    }
}

/// Returns the tree-sitter grammar for a lexer name, if one is bundled.
pub fn grammar(lexer_name: &str) -> Option<tree_sitter::Language> {
    match lexer_name {
        "rust" => Some(tree_sitter_rust::LANGUAGE.into()),
        "python" => Some(tree_sitter_python::LANGUAGE.into()),
        "javascript" => Some(tree_sitter_javascript::LANGUAGE.into()),
        "typescript" => Some(tree_sitter_typescript::LANGUAGE_TYPESCRIPT.into()),
        "c" => Some(tree_sitter_c::LANGUAGE.into()),
        "cpp" => Some(tree_sitter_cpp::LANGUAGE.into()),
        "json" => Some(tree_sitter_json::LANGUAGE.into()),
        _ => None,
    }
}

/// Lowercase extension with its leading dot, or an empty string.
fn extension_of(path: &Path) -> String {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| format!(".{}", ext.to_lowercase()))
        .unwrap_or_default()
}

fn default_file_types() -> Vec<FileType> {
    vec![
        FileType::new("Go", &[".go"], "go", "text/x-go"),
        FileType::new("Rust", &[".rs"], "rust", "text/x-rust"),
        FileType::new(
            "JavaScript",
            &[".js", ".jsx", ".mjs"],
            "javascript",
            "application/javascript",
        ),
        FileType::new("TypeScript", &[".ts", ".tsx"], "typescript", "application/typescript"),
        FileType::new("Python", &[".py", ".pyw", ".pyi"], "python", "text/x-python"),
        FileType::new("Java", &[".java"], "java", "text/x-java-source"),
        FileType::new("C", &[".c", ".h"], "c", "text/x-c"),
        FileType::new(
            "C++",
            &[".cpp", ".cxx", ".cc", ".hpp", ".hxx"],
            "cpp",
            "text/x-c++",
        ),
        FileType::new("HTML", &[".html", ".htm"], "html", "text/html"),
        FileType::new("CSS", &[".css"], "css", "text/css"),
        FileType::new("JSON", &[".json"], "json", "application/json"),
        FileType::new("XML", &[".xml", ".xsd", ".xsl"], "xml", "application/xml"),
        FileType::new("YAML", &[".yaml", ".yml"], "yaml", "application/x-yaml"),
        FileType::new("Markdown", &[".md", ".markdown"], "markdown", "text/markdown"),
        FileType::new("Shell", &[".sh", ".bash", ".zsh"], "bash", "application/x-sh"),
        FileType::new("SQL", &[".sql"], "sql", "application/sql"),
        FileType::new("Dockerfile", &[".dockerfile"], "dockerfile", "text/x-dockerfile"),
        FileType::new("Plain Text", &[".txt", ".text"], PLAIN_TEXT_LEXER, "text/plain"),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detect() {
        let registry = FileTypeRegistry::new();
        assert_eq!(registry.detect("main.go").name, "Go");
        assert_eq!(registry.detect("lib.rs").lexer_name, "rust");
        assert_eq!(registry.detect("/path/to/config.JSON").name, "JSON");
        assert_eq!(registry.detect("page.htm").mime_type, "text/html");
        assert_eq!(registry.detect("notes.txt").lexer_name, "text");
    }

    #[test]
    fn test_detect_unknown_falls_back_to_plain_text() {
        let registry = FileTypeRegistry::new();
        let unknown = registry.detect("archive.xyz");
        assert_eq!(unknown.name, "Plain Text");
        assert_eq!(unknown.lexer_name, "text");
        assert_eq!(unknown.mime_type, "text/plain");
        assert_eq!(unknown.extensions, vec![".xyz".to_string()]);

        assert!(registry.detect("Makefile").extensions.is_empty());
    }

    #[test]
    fn test_by_extension() {
        let registry = FileTypeRegistry::new();
        assert_eq!(registry.by_extension("py").map(|t| t.name.as_str()), Some("Python"));
        assert_eq!(registry.by_extension(".PY").map(|t| t.name.as_str()), Some("Python"));
        assert!(registry.by_extension("nope").is_none());
    }

    #[test]
    fn test_is_supported() {
        let registry = FileTypeRegistry::new();
        assert!(registry.is_supported("script.sh"));
        assert!(registry.is_supported("README.MD"));
        assert!(!registry.is_supported("binary.exe"));
        assert!(!registry.is_supported("noext"));
    }

    #[test]
    fn test_all_file_types_deduplicated() {
        let registry = FileTypeRegistry::new();
        let types = registry.all_file_types();
        assert_eq!(types.len(), default_file_types().len());
        assert!(types.windows(2).all(|w| w[0].name < w[1].name));
    }

    #[test]
    fn test_register_overrides() {
        let mut registry = FileTypeRegistry::empty();
        assert!(registry.supported_extensions().is_empty());

        registry.register(FileType::new("Toml", &[".TOML"], "toml", "application/toml"));
        assert_eq!(registry.lexer_name("Cargo.toml"), "toml");
        assert_eq!(registry.mime_type("Cargo.toml"), "application/toml");
        assert_eq!(registry.supported_extensions(), vec![".toml".to_string()]);
    }

    #[test]
    fn test_grammar_lookup() {
        let registry = FileTypeRegistry::new();
        assert!(registry.detect("main.rs").has_grammar());
        assert!(registry.detect("app.tsx").has_grammar());
        assert!(!registry.detect("main.go").has_grammar());
        assert!(grammar(PLAIN_TEXT_LEXER).is_none());
        assert!(grammar("json").is_some());
    }
}
