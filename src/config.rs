//! Category declarations via TOML configuration files.
//!
//! The built-in category set can be replaced by a configuration file that
//! declares an ordered list of categories, each matching on extensions, glob
//! patterns, or regexes against the file name:
//!
//! ```toml
//! [[categories]]
//! name = "Images"
//! extensions = ["png", "jpg", "jpeg"]
//! patterns = ["IMG_*"]
//! flatten = true
//!
//! [[categories]]
//! name = "Apps"
//! extensions = ["app", "dmg"]
//! include_dirs = true
//! ```
//!
//! Declaration order is preserved: it decides which category wins when
//! several match the same file during normalization.

use crate::category::{Category, default_categories, has_extension};
use glob::Pattern;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Errors that can occur while loading and compiling category declarations.
#[derive(Debug, Clone)]
pub enum ConfigError {
    /// Configuration file not found at the specified path.
    ConfigNotFound(PathBuf),
    /// Invalid TOML syntax or structure.
    ConfigInvalid(String),
    /// Invalid glob pattern provided.
    InvalidGlobPattern(String),
    /// Invalid regex pattern provided with the actual error reason.
    InvalidRegexPattern {
        /// The regex pattern that failed to compile.
        pattern: String,
        /// The reason why the pattern is invalid.
        reason: String,
    },
    /// A category was declared without a usable matcher.
    EmptyCategory(String),
    /// IO error while reading configuration.
    IoError(String),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::ConfigNotFound(path) => {
                write!(f, "Configuration file not found: {}", path.display())
            }
            ConfigError::ConfigInvalid(msg) => write!(f, "Invalid configuration: {}", msg),
            ConfigError::InvalidGlobPattern(pattern) => {
                write!(f, "Invalid glob pattern '{}'", pattern)
            }
            ConfigError::InvalidRegexPattern { pattern, reason } => {
                write!(f, "Invalid regex pattern '{}': {}", pattern, reason)
            }
            ConfigError::EmptyCategory(name) => {
                write!(
                    f,
                    "Category '{}' declares no extensions, patterns or regex",
                    name
                )
            }
            ConfigError::IoError(msg) => write!(f, "IO error reading configuration: {}", msg),
        }
    }
}

impl std::error::Error for ConfigError {}

/// Top-level configuration: an ordered list of category declarations.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoryConfig {
    #[serde(default)]
    pub categories: Vec<CategoryRule>,
}

/// One declared category.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CategoryRule {
    /// Directory name for the category.
    pub name: String,

    /// Extensions claimed by the category, without a leading dot.
    #[serde(default)]
    pub extensions: Vec<String>,

    /// Glob patterns matched against the file name.
    #[serde(default)]
    pub patterns: Vec<String>,

    /// Regex patterns matched against the file name.
    #[serde(default)]
    pub regex: Vec<String>,

    /// Whether directories are candidates too. Defaults to false.
    #[serde(default)]
    pub include_dirs: bool,

    /// Whether nested files are flattened into the category root. Defaults
    /// to false.
    #[serde(default)]
    pub flatten: bool,
}

impl CategoryConfig {
    /// Load configuration, with fallback to the built-in categories.
    ///
    /// Lookup order:
    /// 1. If `config_path` is provided, load from that file
    /// 2. `.sortdir.toml` in the current directory
    /// 3. `~/.config/sortdir/config.toml`
    /// 4. `None` — callers fall back to [`default_categories`]
    ///
    /// # Errors
    ///
    /// Returns an error only if an explicitly provided or discovered file
    /// cannot be read or parsed.
    pub fn load(config_path: Option<&Path>) -> Result<Option<Self>, ConfigError> {
        if let Some(path) = config_path {
            return Self::load_from_file(path).map(Some);
        }

        let local_config = PathBuf::from(".sortdir.toml");
        if local_config.exists() {
            return Self::load_from_file(&local_config).map(Some);
        }

        if let Ok(home) = std::env::var("HOME") {
            let home_config = PathBuf::from(home)
                .join(".config")
                .join("sortdir")
                .join("config.toml");
            if home_config.exists() {
                return Self::load_from_file(&home_config).map(Some);
            }
        }

        Ok(None)
    }

    fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Err(ConfigError::ConfigNotFound(path.to_path_buf()));
        }

        let content = fs::read_to_string(path).map_err(|e| ConfigError::IoError(e.to_string()))?;

        toml::from_str(&content).map_err(|e| ConfigError::ConfigInvalid(e.to_string()))
    }

    /// Compile the declarations into a category list, validating all glob
    /// and regex patterns up front.
    ///
    /// # Errors
    ///
    /// Returns an error if any pattern is invalid or a category declares no
    /// matcher at all.
    pub fn compile(self) -> Result<Vec<Category>, ConfigError> {
        self.categories
            .into_iter()
            .map(CategoryRule::compile)
            .collect()
    }
}

impl CategoryRule {
    fn compile(self) -> Result<Category, ConfigError> {
        if self.extensions.is_empty() && self.patterns.is_empty() && self.regex.is_empty() {
            return Err(ConfigError::EmptyCategory(self.name));
        }

        let extensions: Vec<String> = self
            .extensions
            .iter()
            .map(|e| e.trim_start_matches('.').to_lowercase())
            .collect();

        let patterns = self
            .patterns
            .iter()
            .map(|pattern| {
                Pattern::new(pattern).map_err(|_| ConfigError::InvalidGlobPattern(pattern.clone()))
            })
            .collect::<Result<Vec<_>, _>>()?;

        let regexes = self
            .regex
            .iter()
            .map(|pattern| {
                Regex::new(pattern).map_err(|e| ConfigError::InvalidRegexPattern {
                    pattern: pattern.clone(),
                    reason: e.to_string(),
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        let matcher = move |path: &Path| {
            let ext_refs: Vec<&str> = extensions.iter().map(|e| e.as_str()).collect();
            if has_extension(path, &ext_refs) {
                return true;
            }
            let file_name = path
                .file_name()
                .map(|n| n.to_string_lossy().to_string())
                .unwrap_or_default();
            patterns.iter().any(|p| p.matches(&file_name))
                || regexes.iter().any(|r| r.is_match(&file_name))
        };

        Ok(Category::new(
            self.name,
            matcher,
            self.include_dirs,
            self.flatten,
        ))
    }
}

/// Loads the category list for a run: configured categories when a file is
/// found, otherwise the built-in defaults.
pub fn load_categories(config_path: Option<&Path>) -> Result<Vec<Category>, ConfigError> {
    match CategoryConfig::load(config_path)? {
        Some(config) => config.compile(),
        None => Ok(default_categories()),
    }
}
