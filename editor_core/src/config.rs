//! Persistent editor configuration.
//!
//! Stored as camelCase JSON in `textpad/textpad.json` under the platform
//! config directory (`~/.config` on Linux). Fields missing from the file take
//! their default value; fields present keep theirs, even when zero or empty.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

const CONFIG_DIR: &str = "textpad";
const CONFIG_FILE: &str = "textpad.json";

/// Errors from loading or saving the configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to access config file '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to parse config file '{}': {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to serialize config: {0}")]
    Serialize(#[source] serde_json::Error),
}

/// All application settings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Configuration {
    pub editor: EditorConfig,
    pub ui: UiConfig,
    pub syntax: SyntaxConfig,
}

/// Editing behaviour.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct EditorConfig {
    pub font_size: u32,
    pub tab_size: usize,
    pub word_wrap: bool,
    pub show_line_numbers: bool,
    pub auto_indent: bool,
    pub insert_spaces: bool,
    /// Strip trailing whitespace on save.
    pub trim_whitespace: bool,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            font_size: 14,
            tab_size: 4,
            word_wrap: false,
            show_line_numbers: true,
            auto_indent: true,
            insert_spaces: true,
            trim_whitespace: true,
        }
    }
}

/// Window and theme settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct UiConfig {
    /// `"light"`, `"dark"` or `"auto"`.
    pub theme: String,
    pub window_width: u32,
    pub window_height: u32,
    pub window_x: i32,
    pub window_y: i32,
    pub maximized: bool,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            theme: "light".to_string(),
            window_width: 800,
            window_height: 600,
            window_x: 100,
            window_y: 100,
            maximized: false,
        }
    }
}

/// Syntax highlighting settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SyntaxConfig {
    pub default_theme: String,
    /// Per-language enable flags, keyed by lexer name.
    pub languages: BTreeMap<String, bool>,
    pub enabled: bool,
}

impl Default for SyntaxConfig {
    fn default() -> Self {
        let languages = [
            "go",
            "javascript",
            "typescript",
            "python",
            "java",
            "html",
            "css",
            "json",
            "xml",
            "yaml",
        ]
        .into_iter()
        .map(|lang| (lang.to_string(), true))
        .collect();

        Self {
            default_theme: "github".to_string(),
            languages,
            enabled: true,
        }
    }
}

impl SyntaxConfig {
    /// Returns whether highlighting is on for `lexer_name`.
    pub fn is_language_enabled(&self, lexer_name: &str) -> bool {
        self.enabled && self.languages.get(lexer_name).copied().unwrap_or(false)
    }
}

/// Loads, holds and saves the configuration.
#[derive(Debug, Clone)]
pub struct ConfigManager {
    config: Configuration,
    path: PathBuf,
}

impl Default for ConfigManager {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigManager {
    /// Creates a manager with default settings at the standard location.
    pub fn new() -> Self {
        Self::with_path(default_config_path())
    }

    /// Creates a manager with default settings backed by `path`.
    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self {
            config: Configuration::default(),
            path: path.into(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Loads the configuration file. A missing file leaves the defaults in
    /// place.
    pub fn load(&mut self) -> Result<(), ConfigError> {
        if !self.path.exists() {
            log::debug!("No config at {}, using defaults", self.path.display());
            return Ok(());
        }

        let contents = fs::read_to_string(&self.path).map_err(|source| ConfigError::Io {
            path: self.path.clone(),
            source,
        })?;
        self.config = serde_json::from_str(&contents).map_err(|source| ConfigError::Parse {
            path: self.path.clone(),
            source,
        })?;

        log::info!("Loaded config from {}", self.path.display());
        Ok(())
    }

    /// Writes the configuration as pretty-printed JSON, creating the
    /// directory if needed. The file is replaced atomically.
    pub fn save(&self) -> Result<(), ConfigError> {
        let io_err = |source| ConfigError::Io {
            path: self.path.clone(),
            source,
        };

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).map_err(io_err)?;
            }
        }

        let json = serde_json::to_string_pretty(&self.config).map_err(ConfigError::Serialize)?;
        let mut tmp = self.path.clone().into_os_string();
        tmp.push(".tmp");
        let tmp = PathBuf::from(tmp);
        fs::write(&tmp, json).map_err(io_err)?;
        if let Err(e) = fs::rename(&tmp, &self.path) {
            let _ = fs::remove_file(&tmp);
            return Err(io_err(e));
        }

        log::info!("Saved config to {}", self.path.display());
        Ok(())
    }

    pub fn config(&self) -> &Configuration {
        &self.config
    }

    pub fn editor(&self) -> &EditorConfig {
        &self.config.editor
    }

    pub fn ui(&self) -> &UiConfig {
        &self.config.ui
    }

    pub fn syntax(&self) -> &SyntaxConfig {
        &self.config.syntax
    }

    pub fn update_editor(&mut self, editor: EditorConfig) {
        self.config.editor = editor;
    }

    pub fn update_ui(&mut self, ui: UiConfig) {
        self.config.ui = ui;
    }

    pub fn update_syntax(&mut self, syntax: SyntaxConfig) {
        self.config.syntax = syntax;
    }
}

/// Standard config file location, falling back to the working directory
/// when the platform has no config directory.
pub fn default_config_path() -> PathBuf {
    dirs::config_dir()
        .map(|dir| dir.join(CONFIG_DIR).join(CONFIG_FILE))
        .unwrap_or_else(|| PathBuf::from(CONFIG_FILE))
}
