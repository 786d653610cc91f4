//! File categorization by extension.
//!
//! Categories are kept as an ordered list of `(name, extensions)` rules. An
//! extension is resolved to the first rule, in declared order, that lists it,
//! so a table where two categories share an extension still resolves
//! deterministically.
//!
//! # Examples
//!
//! ```
//! use cleanmate::file_category::{category_of, default_categories};
//! use std::path::Path;
//!
//! let categories = default_categories();
//! assert_eq!(category_of(Path::new("photo.JPG"), &categories), "Images");
//! assert_eq!(category_of(Path::new("report.pdf"), &categories), "Documents");
//! assert_eq!(category_of(Path::new("mystery.xyz"), &categories), "Other");
//! ```
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Category assigned to files whose extension matches no rule.
pub const OTHER_CATEGORY: &str = "Other";

/// A named category and the extensions that belong to it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryRule {
    /// The category name, also used as the destination sub-directory.
    pub name: String,
    /// Lowercase extensions including the leading dot (e.g. ".pdf").
    pub extensions: Vec<String>,
}

impl CategoryRule {
    /// Creates a rule from a name and a list of extensions.
    pub fn new(name: &str, extensions: &[&str]) -> Self {
        Self {
            name: name.to_string(),
            extensions: extensions.iter().map(|ext| ext.to_string()).collect(),
        }
    }

    /// Returns true if this rule lists the given (already normalized) extension.
    pub fn contains(&self, extension: &str) -> bool {
        self.extensions.iter().any(|ext| ext == extension)
    }
}

/// Returns the lowercased extension of a path with its leading dot.
///
/// Files without an extension (including dotfiles such as `.DS_Store`)
/// yield an empty string.
pub fn extension_of(path: &Path) -> String {
    path.extension()
        .map(|ext| format!(".{}", ext.to_string_lossy().to_lowercase()))
        .unwrap_or_default()
}

/// Normalizes a user-supplied extension to lowercase with a leading dot.
pub fn normalize_extension(extension: &str) -> String {
    let trimmed = extension.trim().to_lowercase();
    if trimmed.is_empty() || trimmed.starts_with('.') {
        trimmed
    } else {
        format!(".{}", trimmed)
    }
}

/// Resolves the category of a file from its extension.
///
/// Returns the name of the first rule containing the extension, or
/// [`OTHER_CATEGORY`] when none does.
pub fn category_of<'a>(path: &Path, categories: &'a [CategoryRule]) -> &'a str {
    let extension = extension_of(path);
    if extension.is_empty() {
        return OTHER_CATEGORY;
    }

    categories
        .iter()
        .find(|rule| rule.contains(&extension))
        .map(|rule| rule.name.as_str())
        .unwrap_or(OTHER_CATEGORY)
}

/// The standard category table.
///
/// `.pdf` appears under both "Documents" and "PDFs"; the earlier rule wins.
pub fn default_categories() -> Vec<CategoryRule> {
    vec![
        CategoryRule::new(
            "Documents",
            &[".pdf", ".docx", ".doc", ".txt", ".rtf", ".odt"],
        ),
        CategoryRule::new(
            "Images",
            &[".jpg", ".jpeg", ".png", ".gif", ".bmp", ".tiff", ".webp"],
        ),
        CategoryRule::new("Videos", &[".mp4", ".mov", ".avi", ".mkv", ".wmv", ".flv"]),
        CategoryRule::new("Audio", &[".mp3", ".wav", ".aac", ".flac", ".ogg"]),
        CategoryRule::new(
            "Code",
            &[
                ".py", ".js", ".html", ".css", ".java", ".cpp", ".c", ".go", ".rb", ".php",
            ],
        ),
        CategoryRule::new("Archives", &[".zip", ".rar", ".tar", ".gz", ".7z"]),
        CategoryRule::new("Presentations", &[".ppt", ".pptx", ".key"]),
        CategoryRule::new("Spreadsheets", &[".xls", ".xlsx", ".csv", ".numbers"]),
        CategoryRule::new("PDFs", &[".pdf"]),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extension_of() {
        assert_eq!(extension_of(Path::new("a/b/Photo.JPG")), ".jpg");
        assert_eq!(extension_of(Path::new("archive.tar.gz")), ".gz");
        assert_eq!(extension_of(Path::new("README")), "");
        assert_eq!(extension_of(Path::new(".DS_Store")), "");
    }

    #[test]
    fn test_normalize_extension() {
        assert_eq!(normalize_extension("PDF"), ".pdf");
        assert_eq!(normalize_extension(".Txt"), ".txt");
        assert_eq!(normalize_extension(" docx "), ".docx");
        assert_eq!(normalize_extension(""), "");
    }

    #[test]
    fn test_each_default_extension_resolves() {
        let categories = default_categories();
        assert_eq!(category_of(Path::new("song.mp3"), &categories), "Audio");
        assert_eq!(category_of(Path::new("clip.mkv"), &categories), "Videos");
        assert_eq!(category_of(Path::new("main.go"), &categories), "Code");
        assert_eq!(category_of(Path::new("backup.7z"), &categories), "Archives");
        assert_eq!(category_of(Path::new("deck.key"), &categories), "Presentations");
        assert_eq!(category_of(Path::new("data.csv"), &categories), "Spreadsheets");
    }

    #[test]
    fn test_unknown_and_missing_extension_is_other() {
        let categories = default_categories();
        assert_eq!(category_of(Path::new("thing.xyz"), &categories), OTHER_CATEGORY);
        assert_eq!(category_of(Path::new("Makefile"), &categories), OTHER_CATEGORY);
    }

    #[test]
    fn test_first_declared_category_wins() {
        let categories = default_categories();
        assert_eq!(category_of(Path::new("paper.pdf"), &categories), "Documents");

        let reordered = vec![
            CategoryRule::new("PDFs", &[".pdf"]),
            CategoryRule::new("Documents", &[".pdf", ".txt"]),
        ];
        assert_eq!(category_of(Path::new("paper.pdf"), &reordered), "PDFs");
        assert_eq!(category_of(Path::new("notes.txt"), &reordered), "Documents");
    }

    #[test]
    fn test_uppercase_extension_matches() {
        let categories = default_categories();
        assert_eq!(category_of(Path::new("IMG_0001.PNG"), &categories), "Images");
    }
}
