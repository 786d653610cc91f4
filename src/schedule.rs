//! Periodic runs through cron.
//!
//! A schedule is a single crontab line whose command is the cleanmate
//! executable. Entries are recognized by that path appearing anywhere in a
//! line, so adding refuses to create a second entry for the same program.

use chrono::{NaiveTime, Timelike};
use clap::ValueEnum;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};
use thiserror::Error;
use tracing::info;

/// Time of day used when none is given.
pub const DEFAULT_TIME: &str = "20:00";

/// How often a scheduled run happens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Frequency {
    /// Every day.
    Daily,
    /// Every Sunday.
    Weekly,
    /// On the first day of each month.
    Monthly,
}

impl Frequency {
    /// Cron expression firing at `time` with this frequency.
    pub fn cron_expression(&self, time: NaiveTime) -> String {
        let (minute, hour) = (time.minute(), time.hour());
        match self {
            Frequency::Daily => format!("{} {} * * *", minute, hour),
            Frequency::Weekly => format!("{} {} * * 0", minute, hour),
            Frequency::Monthly => format!("{} {} 1 * *", minute, hour),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Frequency::Daily => "daily",
            Frequency::Weekly => "weekly",
            Frequency::Monthly => "monthly",
        }
    }
}

/// Errors from managing the schedule.
#[derive(Debug, Error)]
pub enum ScheduleError {
    #[error("Invalid time '{0}': expected HH:MM in 24-hour format")]
    InvalidTime(String),
    #[error("CleanMate is already scheduled. Remove the existing schedule first.")]
    AlreadyScheduled,
    #[error("crontab command failed: {0}")]
    CommandFailed(String),
    #[error("Could not run crontab: {0}")]
    Io(#[from] io::Error),
}

/// Access to the user's crontab.
pub trait Crontab {
    /// Current crontab contents, or `None` when the user has no crontab.
    fn read(&self) -> Result<Option<String>, ScheduleError>;

    /// Replaces the crontab with `contents`.
    fn write(&self, contents: &str) -> Result<(), ScheduleError>;
}

impl<C: Crontab + ?Sized> Crontab for &C {
    fn read(&self) -> Result<Option<String>, ScheduleError> {
        (**self).read()
    }

    fn write(&self, contents: &str) -> Result<(), ScheduleError> {
        (**self).write(contents)
    }
}

/// The system `crontab` command.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemCrontab;

impl Crontab for SystemCrontab {
    fn read(&self) -> Result<Option<String>, ScheduleError> {
        let output = Command::new("crontab").arg("-l").output()?;
        if output.status.success() {
            Ok(Some(String::from_utf8_lossy(&output.stdout).into_owned()))
        } else {
            // `crontab -l` exits non-zero when the user has no crontab yet.
            Ok(None)
        }
    }

    fn write(&self, contents: &str) -> Result<(), ScheduleError> {
        let mut child = Command::new("crontab")
            .arg("-")
            .stdin(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()?;

        if let Some(mut stdin) = child.stdin.take() {
            stdin.write_all(contents.as_bytes())?;
        }

        let output = child.wait_with_output()?;
        if output.status.success() {
            Ok(())
        } else {
            Err(ScheduleError::CommandFailed(
                String::from_utf8_lossy(&output.stderr).trim().to_string(),
            ))
        }
    }
}

/// Adds, removes and lists the crontab entries that run `program`.
pub struct Scheduler<C: Crontab> {
    crontab: C,
    program: PathBuf,
}

impl<C: Crontab> Scheduler<C> {
    pub fn new(crontab: C, program: impl Into<PathBuf>) -> Self {
        Self {
            crontab,
            program: program.into(),
        }
    }

    pub fn program(&self) -> &Path {
        &self.program
    }

    /// Installs a run at `time` (`HH:MM`) with the given frequency and
    /// returns the crontab line that was added.
    ///
    /// # Errors
    ///
    /// `InvalidTime` for a malformed time, `AlreadyScheduled` if an entry for
    /// this program exists, or a crontab failure.
    pub fn add(&self, frequency: Frequency, time: &str) -> Result<String, ScheduleError> {
        let time = parse_time(time)?;
        let existing = self.crontab.read()?.unwrap_or_default();

        let command = self.command();
        if existing.contains(command.as_str()) {
            return Err(ScheduleError::AlreadyScheduled);
        }

        let entry = format!("{} {}", frequency.cron_expression(time), command);
        let trimmed = existing.trim();
        let updated = if trimmed.is_empty() {
            format!("{}\n", entry)
        } else {
            format!("{}\n{}\n", trimmed, entry)
        };

        self.crontab.write(&updated)?;
        info!("Scheduled {} run: {}", frequency.as_str(), entry);
        Ok(entry)
    }

    /// Removes every entry for this program and returns how many were removed.
    pub fn remove(&self) -> Result<usize, ScheduleError> {
        let Some(existing) = self.crontab.read()? else {
            return Ok(0);
        };

        let command = self.command();
        let (removed, kept): (Vec<&str>, Vec<&str>) = existing
            .lines()
            .partition(|line| line.contains(command.as_str()));

        if removed.is_empty() {
            return Ok(0);
        }

        let mut updated = kept.join("\n");
        if !updated.is_empty() {
            updated.push('\n');
        }
        self.crontab.write(&updated)?;
        info!("Removed {} scheduled run(s)", removed.len());
        Ok(removed.len())
    }

    /// Lists the entries for this program.
    pub fn list(&self) -> Result<Vec<String>, ScheduleError> {
        let existing = self.crontab.read()?.unwrap_or_default();
        let command = self.command();
        Ok(existing
            .lines()
            .filter(|line| line.contains(command.as_str()))
            .map(str::to_string)
            .collect())
    }

    /// The program path as cron's shell will read it.
    fn command(&self) -> String {
        shell_quote(&self.program.to_string_lossy())
    }
}

/// Quotes `word` for the command field of a crontab line.
///
/// Anything beyond a plain path is single-quoted for `/bin/sh`. `%` is
/// escaped since cron reads a bare `%` as a newline.
fn shell_quote(word: &str) -> String {
    let plain = !word.is_empty()
        && word
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || "/._-+:@,=".contains(c));
    let quoted = if plain {
        word.to_string()
    } else {
        format!("'{}'", word.replace('\'', r"'\''"))
    };
    quoted.replace('%', r"\%")
}

/// Parses a 24-hour `HH:MM` time.
pub fn parse_time(time: &str) -> Result<NaiveTime, ScheduleError> {
    NaiveTime::parse_from_str(time.trim(), "%H:%M")
        .map_err(|_| ScheduleError::InvalidTime(time.to_string()))
}
