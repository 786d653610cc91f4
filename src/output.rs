//! Output formatting and styling module.
//!
//! Provides a centralized interface for all CLI output: colored status lines,
//! the per-file progress bar and the end-of-run statistics table.

use crate::file_organizer::RunStatistics;
use colored::*;
use indicatif::{ProgressBar, ProgressStyle};

/// Manages all CLI output with consistent styling and formatting.
pub struct OutputFormatter;

impl OutputFormatter {
    /// Prints a success message in green with a checkmark.
    ///
    /// ```no_run
    /// use cleanmate::output::OutputFormatter;
    /// OutputFormatter::success("CleanMate completed successfully!");
    /// ```
    pub fn success(message: &str) {
        println!("{} {}", "✓".green(), message);
    }

    /// Prints an error message in red with an X mark.
    pub fn error(message: &str) {
        eprintln!("{} {}", "✗".red(), message);
    }

    /// Prints a warning message in yellow with a warning symbol.
    pub fn warning(message: &str) {
        println!("{} {}", "⚠".yellow(), message);
    }

    /// Prints an info message in cyan.
    pub fn info(message: &str) {
        println!("{}", message.cyan());
    }

    /// Prints a regular message without styling.
    pub fn plain(message: &str) {
        println!("{}", message);
    }

    /// Prints a section header.
    pub fn header(header: &str) {
        println!("\n{}", header.bold());
    }

    /// Creates a progress bar over `total` files.
    ///
    /// Falls back to the default bar style if the template is rejected.
    pub fn create_progress_bar(total: u64) -> ProgressBar {
        let pb = ProgressBar::new(total);
        let style = ProgressStyle::default_bar()
            .template("{spinner:.cyan} [{bar:40.cyan/blue}] {pos}/{len} {msg}")
            .map(|style| style.progress_chars("█▓░"))
            .unwrap_or_else(|_| ProgressStyle::default_bar());
        pb.set_style(style);
        pb
    }

    /// Prints the run counters as a two-column table.
    ///
    /// ```no_run
    /// use cleanmate::file_organizer::RunStatistics;
    /// use cleanmate::output::OutputFormatter;
    ///
    /// OutputFormatter::statistics_table(&RunStatistics {
    ///     total_processed: 12,
    ///     organized: 10,
    ///     summarized: 4,
    ///     smart_folders_used: 3,
    ///     errors: 1,
    /// });
    /// ```
    pub fn statistics_table(stats: &RunStatistics) {
        Self::header("SUMMARY");

        let rows = [
            ("Files processed", stats.total_processed),
            ("Files organized", stats.organized),
            ("Files summarized", stats.summarized),
            ("Smart folders used", stats.smart_folders_used),
            ("Errors", stats.errors),
        ];
        let width = rows.iter().map(|(label, _)| label.len()).max().unwrap_or(0);

        println!("{}", "-".repeat(width + 10));
        for (label, count) in rows {
            let value = if label == "Errors" && count > 0 {
                count.to_string().red().bold()
            } else {
                count.to_string().green()
            };
            println!("{:<width$} | {}", label, value, width = width);
        }
        println!("{}", "-".repeat(width + 10));
    }

    /// Prints a dry-run notice message.
    pub fn dry_run_notice(message: &str) {
        println!("{}", format!("[DRY RUN] {}", message).yellow());
    }
}
