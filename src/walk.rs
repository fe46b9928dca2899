//! Source file discovery.
//!
//! Walks the project tree depth-first, pruning excluded directories and
//! yielding only regular files with the target extension.

use std::ffi::OsStr;
use std::path::{Path, PathBuf};
use thiserror::Error;
use walkdir::{DirEntry, WalkDir};

/// Extension (without the dot) of the files that get rewritten.
pub const TARGET_EXTENSION: &str = "go";

/// Directory names that are never descended into.
pub const EXCLUDED_DIRS: &[&str] = &[".git"];

/// Walk failure. The walkdir message already carries the I/O cause, so it
/// is rendered inline rather than exposed as a source.
#[derive(Error, Debug)]
#[error("failed to walk directory tree: {0}")]
pub struct WalkError(walkdir::Error);

impl From<walkdir::Error> for WalkError {
    fn from(err: walkdir::Error) -> Self {
        Self(err)
    }
}

impl WalkError {
    /// Path the walk failed on, when known.
    pub fn path(&self) -> Option<&Path> {
        self.0.path()
    }
}

/// Enumerate candidate source files under `root`, sorted by file name
/// within each directory.
///
/// The first traversal error is yielded as `Err`; callers stop there.
pub fn source_files(root: impl AsRef<Path>) -> impl Iterator<Item = Result<PathBuf, WalkError>> {
    WalkDir::new(root)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|entry| {
            if is_excluded(entry) {
                log::debug!("skipping excluded directory {}", entry.path().display());
                return false;
            }
            true
        })
        .filter_map(|entry| match entry {
            Ok(entry) if is_target(&entry) => Some(Ok(entry.into_path())),
            Ok(_) => None,
            Err(err) => Some(Err(WalkError::from(err))),
        })
}

/// Excluded directories are matched by name, never the walk root itself.
fn is_excluded(entry: &DirEntry) -> bool {
    entry.depth() > 0
        && entry.file_type().is_dir()
        && entry
            .file_name()
            .to_str()
            .is_some_and(|name| EXCLUDED_DIRS.contains(&name))
}

fn is_target(entry: &DirEntry) -> bool {
    entry.file_type().is_file() && has_target_extension(entry.path())
}

/// Check whether `path` ends in `.go`.
pub fn has_target_extension(path: &Path) -> bool {
    path.extension() == Some(OsStr::new(TARGET_EXTENSION))
}
