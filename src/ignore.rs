//! Filename ignore rules.

use crate::config::ConfigError;
use regex::Regex;

/// Compiled ignore patterns.
///
/// A filename is ignored when any pattern matches anywhere in it; patterns
/// are searched, not anchored, so `^` and `$` must be written explicitly.
#[derive(Debug, Clone, Default)]
pub struct IgnoreFilter {
    patterns: Vec<Regex>,
}

impl IgnoreFilter {
    /// Compiles a list of regex patterns.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidRegexPattern` for the first pattern that
    /// does not compile.
    pub fn new<S: AsRef<str>>(patterns: &[S]) -> Result<Self, ConfigError> {
        let patterns = patterns
            .iter()
            .map(|pattern| {
                let pattern = pattern.as_ref();
                Regex::new(pattern).map_err(|e| ConfigError::InvalidRegexPattern {
                    pattern: pattern.to_string(),
                    reason: e.to_string(),
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self { patterns })
    }

    /// Returns true if the filename matches any pattern.
    pub fn should_ignore(&self, file_name: &str) -> bool {
        self.patterns.iter().any(|regex| regex.is_match(file_name))
    }
}
