//! Command-line interface module for cleanmate.
//!
//! This module handles all CLI-related functionality including:
//! - Argument parsing
//! - Configuration loading and command-line overrides
//! - Running the organizer with a progress bar and printing the summary
//! - Managing the cron schedule

use crate::analyzer::HeuristicAnalyzer;
use crate::config::{Config, ConfigError};
use crate::file_organizer::{FileOrganizer, FileOutcome, RunStatistics};
use crate::filesystem::RealFs;
use crate::output::OutputFormatter;
use crate::paths::{AppPaths, expand_tilde};
use crate::report::write_report;
use crate::schedule::{
    Crontab, DEFAULT_TIME, Frequency, ScheduleError, Scheduler, SystemCrontab,
};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use thiserror::Error;
use tracing::info;

/// Scan folders and sort files into a category and smart-folder tree.
#[derive(Debug, Parser)]
#[command(name = "cleanmate", version, about, long_about = None)]
pub struct Cli {
    /// Path to a custom configuration file (TOML, or JSON with a .json extension)
    #[arg(long, value_name = "PATH")]
    pub config: Option<String>,

    /// Source folder to organize (replaces the configured sources)
    #[arg(long, value_name = "DIR")]
    pub source: Option<String>,

    /// Destination folder for organized files
    #[arg(long, value_name = "DIR")]
    pub dest: Option<String>,

    /// Show what would happen without moving or writing anything
    #[arg(long)]
    pub dry_run: bool,

    /// Print debug logs to the terminal
    #[arg(short, long)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Manage periodic runs through cron
    #[command(subcommand)]
    Schedule(ScheduleCommand),
}

#[derive(Debug, Subcommand)]
pub enum ScheduleCommand {
    /// Add a scheduled run
    Add {
        /// How often to run
        #[arg(value_enum)]
        frequency: Frequency,
        /// Time to run, 24-hour format (e.g. 20:00)
        #[arg(long, default_value = DEFAULT_TIME)]
        time: String,
    },
    /// Remove scheduled runs
    Remove,
    /// List scheduled runs
    List,
}

/// Errors that stop the program before or instead of a run.
#[derive(Debug, Error)]
pub enum CliError {
    #[error("Source directory does not exist: {}", .0.display())]
    SourceNotFound(PathBuf),
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Schedule(#[from] ScheduleError),
    #[error("Could not locate the cleanmate executable: {0}")]
    CurrentExe(#[source] std::io::Error),
}

/// Runs the CLI application.
///
/// # Examples
///
/// ```no_run
/// use clap::Parser;
/// use cleanmate::cli::{Cli, run_cli};
/// use cleanmate::paths::AppPaths;
///
/// let cli = Cli::parse_from(["cleanmate", "--source", "/tmp/inbox", "--dry-run"]);
/// if let Err(e) = run_cli(cli, &AppPaths::from_env()) {
///     eprintln!("Error: {}", e);
/// }
/// ```
pub fn run_cli(cli: Cli, paths: &AppPaths) -> Result<(), CliError> {
    match &cli.command {
        Some(Command::Schedule(command)) => {
            let program = std::env::current_exe().map_err(CliError::CurrentExe)?;
            run_schedule(command, &Scheduler::new(SystemCrontab, program))
        }
        None => organize(&cli, paths),
    }
}

/// Loads the configuration for a run.
///
/// An explicit `--config` must exist and be valid; the default location
/// falls back to defaults.
pub fn load_config(cli: &Cli, paths: &AppPaths) -> Result<Config, CliError> {
    match &cli.config {
        Some(path) => Ok(Config::load_from_file(&expand_tilde(path))?),
        None => Ok(Config::load_or_default(&paths.config_file())),
    }
}

/// Applies `--source` and `--dest` to the configuration.
///
/// # Errors
///
/// Returns `CliError::SourceNotFound` if the source override does not exist.
pub fn apply_overrides(
    config: &mut Config,
    source: Option<&str>,
    dest: Option<&str>,
) -> Result<(), CliError> {
    if let Some(source) = source {
        let source_path = expand_tilde(source);
        if !source_path.exists() {
            return Err(CliError::SourceNotFound(source_path));
        }
        info!("Using source directory from command line: {}", source_path.display());
        config.source_directories = vec![source_path.to_string_lossy().into_owned()];
    }

    if let Some(dest) = dest {
        let dest_path = expand_tilde(dest);
        info!("Using destination directory from command line: {}", dest_path.display());
        config.destination_directory = dest_path.to_string_lossy().into_owned();
    }

    Ok(())
}

/// Organizes the configured sources and prints the outcome.
fn organize(cli: &Cli, paths: &AppPaths) -> Result<(), CliError> {
    let mut config = load_config(cli, paths)?;
    apply_overrides(&mut config, cli.source.as_deref(), cli.dest.as_deref())?;

    let organizer =
        FileOrganizer::new(&config, &RealFs, &HeuristicAnalyzer)?.with_dry_run(cli.dry_run);

    if organizer.is_dry_run() {
        OutputFormatter::dry_run_notice("Performing dry run (no files will be moved)");
    }
    OutputFormatter::info(&format!(
        "Organizing into: {}",
        organizer.destination().display()
    ));

    let stats = execute(&organizer);

    if organizer.is_dry_run() {
        OutputFormatter::statistics_table(&stats);
        OutputFormatter::dry_run_notice("Dry run complete. No files were modified.");
        return Ok(());
    }

    let report_path = match write_report(&stats, &config, &paths.log_dir()) {
        Ok(path) => {
            info!("Organization complete. Report saved to: {}", path.display());
            Some(path)
        }
        Err(e) => {
            OutputFormatter::warning(&format!("Could not write report: {}", e));
            None
        }
    };

    OutputFormatter::statistics_table(&stats);
    OutputFormatter::success("CleanMate completed successfully!");
    OutputFormatter::plain(&format!("Organized {} files", stats.organized));
    OutputFormatter::plain(&format!(
        "Used {} smart folders",
        stats.smart_folders_used
    ));
    if let Some(path) = report_path {
        OutputFormatter::plain(&format!("Report saved to: {}", path.display()));
    }
    if stats.errors > 0 {
        OutputFormatter::warning(&format!(
            "{} files could not be organized. See the log for details.",
            stats.errors
        ));
    }

    Ok(())
}

/// Runs every discovered file through the organizer behind a progress bar.
fn execute(organizer: &FileOrganizer<'_>) -> RunStatistics {
    let files = organizer.discover();
    let pb = OutputFormatter::create_progress_bar(files.len() as u64);
    let mut stats = RunStatistics::default();

    for path in &files {
        if let Some(name) = path.file_name() {
            pb.set_message(name.to_string_lossy().into_owned());
        }

        let outcome = organizer.process_file(path, &mut stats);
        if organizer.is_dry_run()
            && let FileOutcome::Organized(record) = &outcome
        {
            pb.println(format!(
                " - {}\n   → Would move to {}",
                path.display(),
                record.target_path.display()
            ));
        }
        pb.inc(1);
    }

    pb.finish_and_clear();
    stats
}

/// Executes a schedule subcommand against the given scheduler.
pub fn run_schedule<C: Crontab>(
    command: &ScheduleCommand,
    scheduler: &Scheduler<C>,
) -> Result<(), CliError> {
    match command {
        ScheduleCommand::Add { frequency, time } => {
            let entry = scheduler.add(*frequency, time)?;
            OutputFormatter::success(&format!(
                "CleanMate scheduled to run {} at {}",
                frequency.as_str(),
                time
            ));
            OutputFormatter::plain(&format!("  {}", entry));
        }
        ScheduleCommand::Remove => {
            if scheduler.remove()? == 0 {
                OutputFormatter::info("No scheduled CleanMate runs found.");
            } else {
                OutputFormatter::success("CleanMate schedule removed.");
            }
        }
        ScheduleCommand::List => {
            let entries = scheduler.list()?;
            if entries.is_empty() {
                OutputFormatter::info("No scheduled CleanMate runs found.");
            } else {
                OutputFormatter::header("Scheduled CleanMate runs:");
                for entry in entries {
                    OutputFormatter::plain(&format!("  {}", entry));
                }
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_organize_flags() {
        let cli = Cli::parse_from([
            "cleanmate",
            "--source",
            "/in",
            "--dest",
            "/out",
            "--config",
            "/etc/cm.toml",
            "--dry-run",
        ]);
        assert_eq!(cli.source.as_deref(), Some("/in"));
        assert_eq!(cli.dest.as_deref(), Some("/out"));
        assert_eq!(cli.config.as_deref(), Some("/etc/cm.toml"));
        assert!(cli.dry_run);
        assert!(cli.command.is_none());
    }

    #[test]
    fn test_parse_schedule_add_default_time() {
        let cli = Cli::parse_from(["cleanmate", "schedule", "add", "weekly"]);
        match cli.command {
            Some(Command::Schedule(ScheduleCommand::Add { frequency, time })) => {
                assert_eq!(frequency, Frequency::Weekly);
                assert_eq!(time, DEFAULT_TIME);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_parse_rejects_unknown_frequency() {
        let result = Cli::try_parse_from(["cleanmate", "schedule", "add", "hourly"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_missing_source_override_is_fatal() {
        let mut config = Config::default();
        let result = apply_overrides(&mut config, Some("/non/existent/inbox"), None);
        assert!(matches!(result, Err(CliError::SourceNotFound(_))));
        assert_eq!(config.source_directories, Config::default().source_directories);
    }

    #[test]
    fn test_overrides_replace_sources_and_destination() {
        let temp_dir = tempfile::TempDir::new().expect("Failed to create temp directory");
        let source = temp_dir.path().to_string_lossy().into_owned();
        let mut config = Config::default();

        apply_overrides(&mut config, Some(&source), Some("/out")).unwrap();

        assert_eq!(config.source_directories, vec![source]);
        assert_eq!(config.destination_directory, "/out");
    }
}
