//! Plain-text run reports.

use crate::config::Config;
use crate::file_organizer::RunStatistics;
use chrono::{DateTime, Local};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Renders the report for one run.
pub fn render_report(stats: &RunStatistics, config: &Config, now: DateTime<Local>) -> String {
    let mut report = String::new();
    report.push_str("CleanMate - File Organization Report\n");
    report.push_str(&"=".repeat(40));
    report.push_str("\n\n");
    report.push_str(&format!("Date: {}\n\n", now.format("%Y-%m-%d %H:%M:%S")));

    report.push_str("Source Directories:\n");
    for source in config.source_paths() {
        report.push_str(&format!("- {}\n", source.display()));
    }

    report.push_str(&format!(
        "\nDestination Directory: {}\n\n",
        config.destination_path().display()
    ));

    report.push_str("Statistics:\n");
    report.push_str(&format!("- Total files processed: {}\n", stats.total_processed));
    report.push_str(&format!("- Files organized: {}\n", stats.organized));
    report.push_str(&format!("- Files summarized: {}\n", stats.summarized));
    report.push_str(&format!("- Smart folders used: {}\n", stats.smart_folders_used));
    report.push_str(&format!("- Errors encountered: {}\n\n", stats.errors));

    report.push_str("CleanMate completed successfully!\n");
    report
}

/// Writes the report to `log_dir/report_YYYYMMDD_HHMMSS.txt` and returns its path.
pub fn write_report(
    stats: &RunStatistics,
    config: &Config,
    log_dir: &Path,
) -> io::Result<PathBuf> {
    let now = Local::now();
    fs::create_dir_all(log_dir)?;

    let report_path = log_dir.join(format!("report_{}.txt", now.format("%Y%m%d_%H%M%S")));
    fs::write(&report_path, render_report(stats, config, now))?;
    Ok(report_path)
}
