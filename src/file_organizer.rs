//! File organization pipeline.
//!
//! [`FileOrganizer`] walks every configured source directory and, for each
//! file, decides where it belongs: category from the extension, then an
//! optional content summary and smart sub-folder. It then moves the file into
//! the destination tree and writes the summary sidecar.
//!
//! A failure on one file is counted in [`RunStatistics::errors`] and logged;
//! it never stops the run.

use crate::analyzer::ContentAnalyzer;
use crate::config::{Config, ConfigError};
use crate::file_category::{category_of, extension_of};
use crate::filesystem::FileSystem;
use crate::ignore::IgnoreFilter;
use crate::paths::normalize_path;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, error, info, warn};

/// Counters accumulated over one run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunStatistics {
    /// Every discovered file, ignored ones included.
    pub total_processed: usize,
    /// Files moved (or, in a dry run, planned) successfully.
    pub organized: usize,
    /// Files for which a summary was produced.
    pub summarized: usize,
    /// Files placed into a smart sub-folder.
    pub smart_folders_used: usize,
    /// Files that failed somewhere between categorization and the sidecar.
    pub errors: usize,
}

/// Everything decided about one file before it is moved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileRecord {
    /// Where the file was found.
    pub path: PathBuf,
    /// Lowercased extension with its dot, empty if none.
    pub extension: String,
    pub category: String,
    pub summary: Option<String>,
    pub smart_folder: Option<String>,
    /// `destination/category[/smart_folder]`.
    pub target_directory: PathBuf,
    /// `target_directory/filename`.
    pub target_path: PathBuf,
}

/// How processing of a single file ended.
#[derive(Debug)]
pub enum FileOutcome {
    /// The name matched an ignore pattern; the file was not touched.
    Ignored,
    /// The file was placed (or, in a dry run, would be placed).
    Organized(FileRecord),
    /// Something went wrong; the error has been counted and logged.
    Failed { path: PathBuf, error: OrganizeError },
}

/// Errors that can occur while placing one file.
#[derive(Debug, Error)]
pub enum OrganizeError {
    /// The path has no file name component.
    #[error("{} has no file name", .0.display())]
    NoFileName(PathBuf),
    /// Failed to create the target directory.
    #[error("Failed to create directory {}: {source}", path.display())]
    DirectoryCreationFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// Failed to move a file to its target directory.
    #[error("Failed to move {} to {}: {source}", from.display(), to.display())]
    FileMoveFailure {
        from: PathBuf,
        to: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// Failed to write the summary sidecar.
    #[error("Failed to write summary file {}: {source}", path.display())]
    SummaryWriteFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Result type for file organization operations.
pub type OrganizeResult<T> = Result<T, OrganizeError>;

/// Places files from the source directories into the destination tree.
///
/// Everything a run depends on is passed in: the configuration, the
/// filesystem and the content analyzer.
pub struct FileOrganizer<'a> {
    config: &'a Config,
    fs: &'a dyn FileSystem,
    analyzer: &'a dyn ContentAnalyzer,
    ignore: IgnoreFilter,
    destination: PathBuf,
    /// Absolute, `.`/`..`-free form of `destination`, for excluding it from discovery.
    destination_root: PathBuf,
    dry_run: bool,
}

impl<'a> FileOrganizer<'a> {
    /// Builds an organizer for one run.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidRegexPattern` if an ignore pattern does not
    /// compile.
    pub fn new(
        config: &'a Config,
        fs: &'a dyn FileSystem,
        analyzer: &'a dyn ContentAnalyzer,
    ) -> Result<Self, ConfigError> {
        let destination = config.destination_path();
        Ok(Self {
            config,
            fs,
            analyzer,
            ignore: IgnoreFilter::new(&config.ignore_patterns)?,
            destination_root: normalize_path(&destination),
            destination,
            dry_run: false,
        })
    }

    /// In a dry run every decision is made but nothing is created, moved or written.
    pub fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    pub fn is_dry_run(&self) -> bool {
        self.dry_run
    }

    pub fn destination(&self) -> &Path {
        &self.destination
    }

    /// Processes every file under every source directory.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use cleanmate::analyzer::HeuristicAnalyzer;
    /// use cleanmate::config::Config;
    /// use cleanmate::file_organizer::FileOrganizer;
    /// use cleanmate::filesystem::RealFs;
    ///
    /// let config = Config::default();
    /// let organizer = FileOrganizer::new(&config, &RealFs, &HeuristicAnalyzer)?;
    /// let stats = organizer.run();
    /// println!("Organized {} of {} files", stats.organized, stats.total_processed);
    /// # Ok::<(), cleanmate::config::ConfigError>(())
    /// ```
    pub fn run(&self) -> RunStatistics {
        let mut stats = RunStatistics::default();
        for path in self.discover() {
            self.process_file(&path, &mut stats);
        }
        stats
    }

    /// Lists the files a run would process, source directory by source directory.
    ///
    /// Missing source directories are skipped with a warning. Files already
    /// inside the destination tree are left out.
    pub fn discover(&self) -> Vec<PathBuf> {
        let mut files = Vec::new();
        for source in self.config.source_paths() {
            if !self.fs.is_dir(&source) {
                warn!("Source directory does not exist: {}", source.display());
                continue;
            }

            info!("Processing directory: {}", source.display());
            files.extend(
                self.fs
                    .walk_files(&source)
                    .into_iter()
                    .filter(|path| {
                        !normalize_path(path).starts_with(&self.destination_root)
                    }),
            );
        }
        files
    }

    /// Runs one file through the pipeline and updates `stats`.
    pub fn process_file(&self, path: &Path, stats: &mut RunStatistics) -> FileOutcome {
        stats.total_processed += 1;

        let file_name = path
            .file_name()
            .map(|name| name.to_string_lossy())
            .unwrap_or_default();
        if self.ignore.should_ignore(&file_name) {
            debug!("Ignoring file: {}", path.display());
            return FileOutcome::Ignored;
        }

        match self.place(path, stats) {
            Ok(record) => {
                stats.organized += 1;
                if self.dry_run {
                    info!(
                        "Would organize: {} -> {}",
                        path.display(),
                        record.target_path.display()
                    );
                } else {
                    info!(
                        "Organized: {} -> {}",
                        path.display(),
                        record.target_path.display()
                    );
                }
                FileOutcome::Organized(record)
            }
            Err(error) => {
                stats.errors += 1;
                error!("Error processing file {}: {}", path.display(), error);
                FileOutcome::Failed {
                    path: path.to_path_buf(),
                    error,
                }
            }
        }
    }

    /// Decides where a file goes and, unless this is a dry run, puts it there.
    fn place(&self, path: &Path, stats: &mut RunStatistics) -> OrganizeResult<FileRecord> {
        let record = self.resolve(path, stats)?;
        if self.dry_run {
            return Ok(record);
        }

        self.fs
            .create_dir_all(&record.target_directory)
            .map_err(|source| OrganizeError::DirectoryCreationFailed {
                path: record.target_directory.clone(),
                source,
            })?;

        self.fs
            .move_file(path, &record.target_path)
            .map_err(|source| OrganizeError::FileMoveFailure {
                from: path.to_path_buf(),
                to: record.target_path.clone(),
                source,
            })?;

        if self.config.create_summary_file
            && let Some(summary) = &record.summary
        {
            self.write_summary_file(&record, summary)?;
        }

        Ok(record)
    }

    /// Resolves category, summary, smart folder and target paths.
    fn resolve(&self, path: &Path, stats: &mut RunStatistics) -> OrganizeResult<FileRecord> {
        let file_name = path
            .file_name()
            .ok_or_else(|| OrganizeError::NoFileName(path.to_path_buf()))?;

        let extension = extension_of(path);
        let category = category_of(path, &self.config.categories).to_string();
        let mut target_directory = self.destination.join(&category);

        let mut summary = None;
        let mut smart_folder = None;

        if self.config.organize_by_content && self.config.should_summarize(&extension) {
            summary = self.analyzer.summarize(
                self.fs,
                path,
                self.config.max_file_size_for_summary_mb,
            );

            if summary.is_some() {
                stats.summarized += 1;

                if self.config.smart_rename {
                    smart_folder = self.analyzer.suggest_folder(path, summary.as_deref());
                    if let Some(folder) = &smart_folder {
                        target_directory = target_directory.join(folder);
                        stats.smart_folders_used += 1;
                    }
                }
            }
        }

        let target_path = target_directory.join(file_name);

        Ok(FileRecord {
            path: path.to_path_buf(),
            extension,
            category,
            summary,
            smart_folder,
            target_directory,
            target_path,
        })
    }

    /// Writes `{stem}_summary.txt` next to the moved file.
    fn write_summary_file(&self, record: &FileRecord, summary: &str) -> OrganizeResult<()> {
        let stem = record
            .path
            .file_stem()
            .map(|stem| stem.to_string_lossy())
            .unwrap_or_default();
        let file_name = record
            .path
            .file_name()
            .map(|name| name.to_string_lossy())
            .unwrap_or_default();

        let summary_path = record
            .target_directory
            .join(format!("{}_summary.txt", stem));
        let contents = format!(
            "Summary of {}:\n\n{}\n\nOrganized on: {}",
            file_name,
            summary,
            chrono::Local::now().format("%Y-%m-%d %H:%M:%S")
        );

        self.fs
            .write(&summary_path, contents.as_bytes())
            .map_err(|source| OrganizeError::SummaryWriteFailed {
                path: summary_path.clone(),
                source,
            })
    }
}
