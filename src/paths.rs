//! Application directories and `~` expansion.

use std::path::{Component, Path, PathBuf};

/// Environment variable that overrides the application home directory.
pub const HOME_ENV: &str = "CLEANMATE_HOME";

/// Locations of the files cleanmate manages for itself.
#[derive(Debug, Clone)]
pub struct AppPaths {
    root: PathBuf,
}

impl AppPaths {
    /// Uses `root` as the application home.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Resolves the application home from `$CLEANMATE_HOME`, then `~/CleanMate`.
    pub fn from_env() -> Self {
        match std::env::var(HOME_ENV) {
            Ok(root) if !root.is_empty() => Self::new(expand_tilde(&root)),
            _ => Self::new(expand_tilde("~/CleanMate")),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Default configuration file.
    pub fn config_file(&self) -> PathBuf {
        self.root.join("config").join("config.toml")
    }

    /// Directory holding the log file and run reports.
    pub fn log_dir(&self) -> PathBuf {
        self.root.join("logs")
    }
}

/// Expands a leading `~` to the user's home directory.
///
/// Paths without a leading `~`, or when `$HOME` is unset, are returned as is.
pub fn expand_tilde(path: &str) -> PathBuf {
    let home = match std::env::var("HOME") {
        Ok(home) => PathBuf::from(home),
        Err(_) => return PathBuf::from(path),
    };

    if path == "~" {
        home
    } else if let Some(rest) = path.strip_prefix("~/") {
        home.join(rest)
    } else {
        PathBuf::from(path)
    }
}

/// Makes `path` absolute against the working directory and folds away `.`
/// and `..` components without touching the filesystem.
///
/// Symlinks are not resolved, so two spellings of a linked directory still
/// compare unequal.
pub fn normalize_path(path: &Path) -> PathBuf {
    let absolute = std::path::absolute(path).unwrap_or_else(|_| path.to_path_buf());
    let mut normalized = PathBuf::new();
    for component in absolute.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                normalized.pop();
            }
            other => normalized.push(other),
        }
    }
    normalized
}
