//! Content summaries and smart-folder suggestions.
//!
//! [`ContentAnalyzer`] is the seam where a real summarization backend can be
//! plugged in. [`HeuristicAnalyzer`] is the built-in implementation: it looks
//! at the first bytes of plain-text files and otherwise describes a file by
//! its type.

use crate::file_category::extension_of;
use crate::filesystem::FileSystem;
use std::path::Path;
use tracing::{debug, info, warn};

/// Extensions the heuristic analyzer knows how to describe.
pub const SUMMARIZABLE_EXTENSIONS: [&str; 3] = [".pdf", ".txt", ".docx"];

/// Number of bytes read from a text file to build its summary.
const TEXT_PREFIX_BYTES: usize = 1000;

/// Texts with more words than this get the "contains text about" summary.
const SHORT_TEXT_MAX_WORDS: usize = 20;

/// Summary words that never make a useful folder name.
const FOLDER_STOP_WORDS: [&str; 7] = [
    "document", "contains", "about", "words", "long", "this", "that",
];

const BYTES_PER_MB: u64 = 1024 * 1024;

/// Produces a short description of a file and a folder name derived from it.
pub trait ContentAnalyzer {
    /// Describes the file at `path`, or returns `None` when the file is not
    /// eligible. Files larger than `max_size_mb` are never summarized.
    fn summarize(&self, fs: &dyn FileSystem, path: &Path, max_size_mb: u64) -> Option<String>;

    /// Suggests a sub-folder name for a file from its summary.
    fn suggest_folder(&self, path: &Path, summary: Option<&str>) -> Option<String>;
}

/// String-matching analyzer over file type and leading text.
#[derive(Debug, Clone, Copy, Default)]
pub struct HeuristicAnalyzer;

impl ContentAnalyzer for HeuristicAnalyzer {
    fn summarize(&self, fs: &dyn FileSystem, path: &Path, max_size_mb: u64) -> Option<String> {
        let extension = extension_of(path);
        if !SUMMARIZABLE_EXTENSIONS.contains(&extension.as_str()) {
            return None;
        }

        let size = match fs.file_size(path) {
            Ok(size) => size,
            Err(e) => {
                warn!("Could not determine size of {}: {}", path.display(), e);
                return None;
            }
        };
        if size > max_size_mb.saturating_mul(BYTES_PER_MB) {
            info!(
                "Skipped summary, file too large: {} ({:.2} MB)",
                path.display(),
                size as f64 / BYTES_PER_MB as f64
            );
            return None;
        }

        debug!("Summarizing file: {}", path.display());
        let summary = match extension.as_str() {
            ".txt" => summarize_text(fs, path),
            ".pdf" => "This is a PDF document.".to_string(),
            _ => "This is a Word document.".to_string(),
        };
        Some(summary)
    }

    fn suggest_folder(&self, path: &Path, summary: Option<&str>) -> Option<String> {
        let summary = summary?;

        let folder = if summary.contains("PDF") {
            "PDF Documents".to_string()
        } else if summary.contains("Word") {
            "Word Documents".to_string()
        } else if summary.to_lowercase().contains("text") {
            summary
                .split_whitespace()
                .find(|word| is_folder_word(word))
                .map(str::to_string)
                .unwrap_or_else(|| "Text Documents".to_string())
        } else {
            match extension_of(path).as_str() {
                ".pdf" => "PDF Documents",
                ".docx" => "Word Documents",
                ".txt" => "Text Documents",
                _ => "Other Documents",
            }
            .to_string()
        };

        debug!("Suggested folder '{}' for {}", folder, path.display());
        Some(folder)
    }
}

fn summarize_text(fs: &dyn FileSystem, path: &Path) -> String {
    let bytes = match fs.read_prefix(path, TEXT_PREFIX_BYTES) {
        Ok(bytes) => bytes,
        Err(e) => {
            warn!("Error reading file {}: {}", path.display(), e);
            return "This is a text document.".to_string();
        }
    };

    let content = decode_lossy(&bytes);
    let words: Vec<&str> = content.split_whitespace().collect();

    if words.len() > SHORT_TEXT_MAX_WORDS {
        format!(
            "This document contains text about {}... and is {} words long.",
            words[..3].join(" "),
            words.len()
        )
    } else {
        format!("Short document containing: {}", content)
    }
}

/// Decodes UTF-8, dropping invalid sequences instead of replacing them.
fn decode_lossy(bytes: &[u8]) -> String {
    bytes.utf8_chunks().map(|chunk| chunk.valid()).collect()
}

fn is_folder_word(word: &str) -> bool {
    let lower = word.to_lowercase();
    word.chars().count() > 4
        && !FOLDER_STOP_WORDS.contains(&lower.as_str())
        && !word.contains(['/', '\\'])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filesystem::memory::MemoryFs;

    const CAP_MB: u64 = 10;

    fn summarize(fs: &MemoryFs, path: &str) -> Option<String> {
        HeuristicAnalyzer.summarize(fs, Path::new(path), CAP_MB)
    }

    fn suggest(path: &str, summary: Option<&str>) -> Option<String> {
        HeuristicAnalyzer.suggest_folder(Path::new(path), summary)
    }

    #[test]
    fn test_unsupported_extension_not_summarized() {
        let fs = MemoryFs::new();
        fs.add_file("/src/photo.jpg", "jpeg bytes");
        fs.add_file("/src/notes.md", "markdown");
        assert_eq!(summarize(&fs, "/src/photo.jpg"), None);
        assert_eq!(summarize(&fs, "/src/notes.md"), None);
    }

    #[test]
    fn test_short_text_summary_keeps_raw_snippet() {
        let fs = MemoryFs::new();
        fs.add_file("/src/notes.txt", "hello world");
        assert_eq!(
            summarize(&fs, "/src/notes.txt").as_deref(),
            Some("Short document containing: hello world")
        );
    }

    #[test]
    fn test_short_text_summary_keeps_whitespace() {
        let fs = MemoryFs::new();
        fs.add_file("/src/list.txt", "milk\neggs\n");
        assert_eq!(
            summarize(&fs, "/src/list.txt").as_deref(),
            Some("Short document containing: milk\neggs\n")
        );
    }

    #[test]
    fn test_long_text_summary() {
        let fs = MemoryFs::new();
        let text = (1..=25)
            .map(|i| format!("word{}", i))
            .collect::<Vec<_>>()
            .join(" ");
        fs.add_file("/src/essay.TXT", text);

        assert_eq!(
            summarize(&fs, "/src/essay.TXT").as_deref(),
            Some("This document contains text about word1 word2 word3... and is 25 words long.")
        );
    }

    #[test]
    fn test_exactly_twenty_words_is_short() {
        let fs = MemoryFs::new();
        let text = vec!["w"; 20].join(" ");
        fs.add_file("/src/twenty.txt", text.clone());
        assert_eq!(
            summarize(&fs, "/src/twenty.txt"),
            Some(format!("Short document containing: {}", text))
        );
    }

    #[test]
    fn test_text_is_truncated_to_prefix() {
        let fs = MemoryFs::new();
        let text = "a".repeat(1500);
        fs.add_file("/src/blob.txt", text);

        let summary = summarize(&fs, "/src/blob.txt").unwrap();
        assert_eq!(
            summary,
            format!("Short document containing: {}", "a".repeat(1000))
        );
    }

    #[test]
    fn test_invalid_utf8_is_dropped() {
        let fs = MemoryFs::new();
        fs.add_file("/src/mixed.txt", b"caf\xff\xfe ok".to_vec());
        assert_eq!(
            summarize(&fs, "/src/mixed.txt").as_deref(),
            Some("Short document containing: caf ok")
        );
    }

    #[test]
    fn test_literal_replacement_character_is_kept() {
        let fs = MemoryFs::new();
        fs.add_file("/src/marks.txt", ["bad \u{FFFD} glyph".as_bytes(), b"\xff".as_slice()].concat());
        assert_eq!(
            summarize(&fs, "/src/marks.txt").as_deref(),
            Some("Short document containing: bad \u{FFFD} glyph")
        );
    }

    #[test]
    fn test_unreadable_text_falls_back() {
        let fs = MemoryFs::new();
        fs.add_file("/src/locked.txt", "secret");
        fs.make_unreadable("/src/locked.txt");
        assert_eq!(
            summarize(&fs, "/src/locked.txt").as_deref(),
            Some("This is a text document.")
        );
    }

    #[test]
    fn test_pdf_and_docx_summaries() {
        let fs = MemoryFs::new();
        fs.add_file("/src/paper.pdf", "%PDF-1.4");
        fs.add_file("/src/letter.docx", "PK");
        assert_eq!(
            summarize(&fs, "/src/paper.pdf").as_deref(),
            Some("This is a PDF document.")
        );
        assert_eq!(
            summarize(&fs, "/src/letter.docx").as_deref(),
            Some("This is a Word document.")
        );
    }

    #[test]
    fn test_oversized_file_not_summarized() {
        let fs = MemoryFs::new();
        fs.add_file("/src/big.pdf", vec![0u8; 2 * 1024 * 1024 + 1]);
        fs.add_file("/src/big.txt", vec![b'a'; 2 * 1024 * 1024 + 1]);
        let analyzer = HeuristicAnalyzer;
        assert_eq!(analyzer.summarize(&fs, Path::new("/src/big.pdf"), 2), None);
        assert_eq!(analyzer.summarize(&fs, Path::new("/src/big.txt"), 2), None);
    }

    #[test]
    fn test_file_at_cap_is_summarized() {
        let fs = MemoryFs::new();
        fs.add_file("/src/edge.pdf", vec![0u8; 1024 * 1024]);
        assert!(
            HeuristicAnalyzer
                .summarize(&fs, Path::new("/src/edge.pdf"), 1)
                .is_some()
        );
    }

    #[test]
    fn test_missing_file_not_summarized() {
        let fs = MemoryFs::new();
        assert_eq!(summarize(&fs, "/src/ghost.txt"), None);
    }

    #[test]
    fn test_no_summary_no_folder() {
        assert_eq!(suggest("/src/notes.txt", None), None);
    }

    #[test]
    fn test_pdf_summary_wins_regardless_of_extension() {
        assert_eq!(
            suggest("/src/notes.txt", Some("This is a PDF document.")).as_deref(),
            Some("PDF Documents")
        );
        assert_eq!(
            suggest("/src/song.mp3", Some("mentions PDF and Word")).as_deref(),
            Some("PDF Documents")
        );
    }

    #[test]
    fn test_word_summary() {
        assert_eq!(
            suggest("/src/a.docx", Some("This is a Word document.")).as_deref(),
            Some("Word Documents")
        );
    }

    #[test]
    fn test_text_summary_picks_first_meaningful_word() {
        let summary = "This document contains text about Rust ownership borrowing... and is 42 words long.";
        assert_eq!(suggest("/src/a.txt", Some(summary)).as_deref(), Some("ownership"));
    }

    #[test]
    fn test_text_summary_keeps_original_casing() {
        let summary = "This document contains text about Quarterly Budget review... and is 30 words long.";
        assert_eq!(suggest("/src/a.txt", Some(summary)).as_deref(), Some("Quarterly"));
    }

    #[test]
    fn test_text_summary_without_candidates() {
        assert_eq!(
            suggest("/src/a.txt", Some("some text here")).as_deref(),
            Some("Text Documents")
        );
    }

    #[test]
    fn test_stop_words_compare_whole_words() {
        // "document." carries punctuation so it is not the stop word "document".
        assert_eq!(
            suggest("/src/a.txt", Some("This is a text document.")).as_deref(),
            Some("document.")
        );
    }

    #[test]
    fn test_text_word_with_path_separator_is_skipped() {
        let summary = "text about ../../etc/passwd later";
        assert_eq!(suggest("/src/a.txt", Some(summary)).as_deref(), Some("later"));
    }

    #[test]
    fn test_extension_fallback() {
        let summary = Some("Short document containing: hello world");
        assert_eq!(suggest("/src/a.txt", summary).as_deref(), Some("Text Documents"));
        assert_eq!(suggest("/src/a.pdf", summary).as_deref(), Some("PDF Documents"));
        assert_eq!(suggest("/src/a.docx", summary).as_deref(), Some("Word Documents"));
        assert_eq!(suggest("/src/a.png", summary).as_deref(), Some("Other Documents"));
    }
}
