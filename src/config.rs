//! Run configuration.
//!
//! Configuration is a plain serde record loaded from a TOML file (or a JSON
//! file when the path ends in `.json`). Every field has a default, so a
//! partial file is valid.
//!
//! # Configuration File Format
//!
//! ```toml
//! source_directories = ["~/Desktop", "~/Downloads"]
//! destination_directory = "~/CleanMate/Organized"
//! ignore_patterns = ["^\\.", "^~\\$", "^Thumbs\\.db$", "^desktop\\.ini$"]
//! summarize_extensions = [".pdf", ".txt", ".docx"]
//! max_file_size_for_summary_mb = 10
//! organize_by_content = true
//! smart_rename = true
//! create_summary_file = true
//!
//! [[categories]]
//! name = "Documents"
//! extensions = [".pdf", ".docx", ".doc", ".txt", ".rtf", ".odt"]
//!
//! [[categories]]
//! name = "Images"
//! extensions = [".jpg", ".jpeg", ".png"]
//! ```
//!
//! Categories are an array of tables so that their declared order survives
//! the round trip through the file.

use crate::file_category::{CategoryRule, default_categories, normalize_extension};
use crate::ignore::IgnoreFilter;
use crate::paths::expand_tilde;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{info, warn};

/// Errors that can occur while loading or saving configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Configuration file not found at the specified path.
    #[error("Configuration file not found: {}", .0.display())]
    NotFound(PathBuf),
    /// IO error while reading or writing configuration.
    #[error("IO error on configuration file {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// Invalid TOML syntax or structure.
    #[error("Invalid configuration: {0}")]
    InvalidToml(#[from] toml::de::Error),
    /// Invalid JSON syntax or structure.
    #[error("Invalid configuration: {0}")]
    InvalidJson(#[from] serde_json::Error),
    /// The configuration could not be rendered to TOML.
    #[error("Could not serialize configuration: {0}")]
    Serialize(#[from] toml::ser::Error),
    /// Invalid regex pattern provided with the actual error reason.
    #[error("Invalid regex pattern '{pattern}': {reason}")]
    InvalidRegexPattern {
        /// The regex pattern that failed to compile.
        pattern: String,
        /// The reason why the pattern is invalid.
        reason: String,
    },
}

/// Settings for one organization run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Directories scanned recursively for files to organize.
    pub source_directories: Vec<String>,
    /// Root of the organized tree.
    pub destination_directory: String,
    /// Regex patterns; a file whose name matches any of them is left alone.
    pub ignore_patterns: Vec<String>,
    /// Extensions eligible for content summaries.
    pub summarize_extensions: Vec<String>,
    /// Files larger than this are never summarized.
    pub max_file_size_for_summary_mb: u64,
    /// Summarize eligible files while organizing.
    pub organize_by_content: bool,
    /// Place summarized files into a smart sub-folder.
    pub smart_rename: bool,
    /// Write a `{stem}_summary.txt` sidecar next to summarized files.
    pub create_summary_file: bool,
    /// Ordered category table. Kept last so TOML output puts the tables at the end.
    pub categories: Vec<CategoryRule>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            source_directories: vec!["~/Desktop".to_string(), "~/Downloads".to_string()],
            destination_directory: "~/CleanMate/Organized".to_string(),
            ignore_patterns: vec![
                r"^\.".to_string(),
                r"^~\$".to_string(),
                r"^Thumbs\.db$".to_string(),
                r"^desktop\.ini$".to_string(),
            ],
            summarize_extensions: vec![".pdf".to_string(), ".txt".to_string(), ".docx".to_string()],
            max_file_size_for_summary_mb: 10,
            organize_by_content: true,
            smart_rename: true,
            create_summary_file: true,
            categories: default_categories(),
        }
    }
}

impl Config {
    /// Loads configuration from the default location, falling back to defaults.
    ///
    /// * Missing file: the default configuration is written there and used.
    /// * Unreadable or invalid file: a warning is logged and the defaults are
    ///   used; the file is left as it is.
    ///
    /// Never fails.
    pub fn load_or_default(path: &Path) -> Self {
        if !path.exists() {
            let config = Self::default();
            match config.save(path) {
                Ok(()) => info!(path = %path.display(), "Default configuration created"),
                Err(e) => warn!("Could not persist default configuration: {}", e),
            }
            return config;
        }

        match Self::load_from_file(path) {
            Ok(config) => {
                info!(path = %path.display(), "Configuration loaded from file");
                config
            }
            Err(e) => {
                warn!("Error loading configuration, using defaults: {}", e);
                Self::default()
            }
        }
    }

    /// Loads configuration from a specific file.
    ///
    /// The ignore patterns are compiled once here so a bad pattern is reported
    /// as a configuration problem rather than at run time.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::NotFound` if the file does not exist,
    /// `ConfigError::Io` if it cannot be read, `InvalidToml`/`InvalidJson` if
    /// parsing fails and `InvalidRegexPattern` for a bad ignore pattern.
    pub fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Err(ConfigError::NotFound(path.to_path_buf()));
        }

        let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        let config: Self = if is_json(path) {
            serde_json::from_str(&content)?
        } else {
            toml::from_str(&content)?
        };

        let config = config.normalize();
        IgnoreFilter::new(&config.ignore_patterns)?;
        Ok(config)
    }

    /// Writes this configuration to `path`, creating parent directories.
    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        let rendered = if is_json(path) {
            serde_json::to_string_pretty(self)?
        } else {
            toml::to_string_pretty(self)?
        };

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|source| ConfigError::Io {
                path: parent.to_path_buf(),
                source,
            })?;
        }

        fs::write(path, rendered).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Lowercases every extension and makes sure it starts with a dot.
    pub fn normalize(mut self) -> Self {
        for rule in &mut self.categories {
            rule.extensions = normalized(&rule.extensions);
        }
        self.summarize_extensions = normalized(&self.summarize_extensions);
        self
    }

    /// Source directories with `~` expanded.
    pub fn source_paths(&self) -> Vec<PathBuf> {
        self.source_directories
            .iter()
            .map(|dir| expand_tilde(dir))
            .collect()
    }

    /// Destination directory with `~` expanded.
    pub fn destination_path(&self) -> PathBuf {
        expand_tilde(&self.destination_directory)
    }

    /// Returns true if files with this (normalized) extension may be summarized.
    pub fn should_summarize(&self, extension: &str) -> bool {
        self.summarize_extensions.iter().any(|ext| ext == extension)
    }
}

fn normalized(extensions: &[String]) -> Vec<String> {
    extensions
        .iter()
        .map(|ext| normalize_extension(ext))
        .filter(|ext| !ext.is_empty())
        .collect()
}

fn is_json(path: &Path) -> bool {
    path.extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"))
}
