//! cleanmate - sort scattered files into a tidy, categorized tree
//!
//! This library scans source directories, classifies each file by extension,
//! optionally summarizes a few text-like formats and derives a smart
//! sub-folder from the summary, then moves the file into the destination
//! tree. It also manages a cron entry for periodic runs.

pub mod analyzer;
pub mod cli;
pub mod config;
pub mod file_category;
pub mod file_organizer;
pub mod filesystem;
pub mod ignore;
pub mod logging;
pub mod output;
pub mod paths;
pub mod report;
pub mod schedule;

pub use analyzer::{ContentAnalyzer, HeuristicAnalyzer};
pub use config::{Config, ConfigError};
pub use file_category::{CategoryRule, category_of};
pub use file_organizer::{FileOrganizer, FileOutcome, FileRecord, OrganizeError, RunStatistics};
pub use filesystem::{FileSystem, RealFs};
pub use ignore::IgnoreFilter;
pub use schedule::{Frequency, Scheduler};

pub use cli::{Cli, run_cli};
