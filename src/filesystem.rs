//! Filesystem access used by the organizer.
//!
//! The organizer only touches the disk through [`FileSystem`], so its decision
//! logic can be exercised against an in-memory tree in tests.

use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use tracing::warn;
use walkdir::WalkDir;

/// The filesystem operations needed to discover, inspect and move files.
pub trait FileSystem {
    /// Returns true if `path` exists and is a directory.
    fn is_dir(&self, path: &Path) -> bool;

    /// Lists every regular file below `root`, recursively, in a stable order.
    fn walk_files(&self, root: &Path) -> Vec<PathBuf>;

    /// Size of a file in bytes.
    fn file_size(&self, path: &Path) -> io::Result<u64>;

    /// Reads at most `limit` bytes from the start of a file.
    fn read_prefix(&self, path: &Path, limit: usize) -> io::Result<Vec<u8>>;

    /// Creates a directory and all missing parents. Succeeds if it already exists.
    fn create_dir_all(&self, path: &Path) -> io::Result<()>;

    /// Moves a file, replacing anything already at `to`.
    fn move_file(&self, from: &Path, to: &Path) -> io::Result<()>;

    /// Writes `contents` to `path`, replacing any existing file.
    fn write(&self, path: &Path, contents: &[u8]) -> io::Result<()>;
}

/// The local disk.
#[derive(Debug, Clone, Copy, Default)]
pub struct RealFs;

impl FileSystem for RealFs {
    fn is_dir(&self, path: &Path) -> bool {
        path.is_dir()
    }

    fn walk_files(&self, root: &Path) -> Vec<PathBuf> {
        let mut files = Vec::new();
        for entry in WalkDir::new(root).sort_by_file_name() {
            match entry {
                Ok(entry) if entry.file_type().is_file() => files.push(entry.into_path()),
                Ok(_) => {}
                Err(e) => warn!("Skipping unreadable entry under {}: {}", root.display(), e),
            }
        }
        files
    }

    fn file_size(&self, path: &Path) -> io::Result<u64> {
        Ok(fs::metadata(path)?.len())
    }

    fn read_prefix(&self, path: &Path, limit: usize) -> io::Result<Vec<u8>> {
        let mut buffer = Vec::with_capacity(limit);
        fs::File::open(path)?
            .take(limit as u64)
            .read_to_end(&mut buffer)?;
        Ok(buffer)
    }

    fn create_dir_all(&self, path: &Path) -> io::Result<()> {
        fs::create_dir_all(path)
    }

    fn move_file(&self, from: &Path, to: &Path) -> io::Result<()> {
        // Rename fails across filesystems; copy then delete instead.
        if fs::rename(from, to).is_err() {
            fs::copy(from, to)?;
            fs::remove_file(from)?;
        }
        Ok(())
    }

    fn write(&self, path: &Path, contents: &[u8]) -> io::Result<()> {
        fs::write(path, contents)
    }
}


#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_walk_files_is_recursive_and_sorted() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let root = temp_dir.path();
        fs::create_dir_all(root.join("nested/deeper")).expect("Failed to create dirs");
        fs::write(root.join("b.txt"), "b").expect("Failed to write file");
        fs::write(root.join("a.txt"), "a").expect("Failed to write file");
        fs::write(root.join("nested/deeper/c.txt"), "c").expect("Failed to write file");

        let files = RealFs.walk_files(root);
        assert_eq!(
            files,
            vec![
                root.join("a.txt"),
                root.join("b.txt"),
                root.join("nested/deeper/c.txt"),
            ]
        );
    }

    #[test]
    fn test_read_prefix_truncates() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let path = temp_dir.path().join("long.txt");
        fs::write(&path, "0123456789").expect("Failed to write file");

        assert_eq!(RealFs.read_prefix(&path, 4).unwrap(), b"0123");
        assert_eq!(RealFs.read_prefix(&path, 100).unwrap(), b"0123456789");
        assert_eq!(RealFs.file_size(&path).unwrap(), 10);
    }

    #[test]
    fn test_move_file_replaces_target() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let from = temp_dir.path().join("from.txt");
        let to = temp_dir.path().join("to.txt");
        fs::write(&from, "new").expect("Failed to write file");
        fs::write(&to, "old").expect("Failed to write file");

        RealFs.move_file(&from, &to).expect("Failed to move file");
        assert!(!from.exists());
        assert_eq!(fs::read_to_string(&to).unwrap(), "new");
    }

    #[test]
    fn test_create_dir_all_is_idempotent() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let dir = temp_dir.path().join("a/b/c");
        RealFs.create_dir_all(&dir).expect("First create failed");
        RealFs.create_dir_all(&dir).expect("Second create failed");
        assert!(RealFs.is_dir(&dir));
    }
}
