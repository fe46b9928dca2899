use crate::config::Config;
use std::fs::{self, Permissions};
use std::io::Write;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Literal, non-overlapping substitution of one term in a piece of text.
///
/// Occurrences are found left to right and never overlap, so `"aa"` occurs
/// twice in `"aaaa"` and once in `"aaa"`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Substitution {
    /// Number of occurrences replaced
    pub count: usize,
    /// Text with every occurrence replaced
    pub updated: String,
}

impl Substitution {
    /// Replace every occurrence of `search` in `content`.
    ///
    /// Returns `None` when `search` is empty or does not occur.
    pub fn compute(content: &str, search: &str, replacement: &str) -> Option<Self> {
        if search.is_empty() || !content.contains(search) {
            return None;
        }

        let count = content.matches(search).count();
        let updated = content.replace(search, replacement);
        Some(Self { count, updated })
    }
}

/// Outcome for one visited file.
#[derive(Debug, Clone, PartialEq, Eq)]
#[must_use = "FileVisitResult should be reported"]
pub struct FileVisitResult {
    pub path: PathBuf,
    pub changed: bool,
    pub replacement_count: usize,
}

impl FileVisitResult {
    fn unchanged(path: PathBuf) -> Self {
        Self {
            path,
            changed: false,
            replacement_count: 0,
        }
    }
}

#[derive(Error, Debug)]
pub enum RewriteError {
    #[error("failed to stat {path}")]
    Stat {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to read {path}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("{path} is not valid UTF-8 text")]
    NotUtf8 { path: PathBuf },

    #[error("failed to write {path}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
}

impl RewriteError {
    /// File the failure happened on.
    pub fn path(&self) -> &Path {
        match self {
            RewriteError::Stat { path, .. }
            | RewriteError::Read { path, .. }
            | RewriteError::NotUtf8 { path }
            | RewriteError::Write { path, .. } => path,
        }
    }
}

/// A planned rewrite of one file, computed but not yet written.
#[derive(Debug, Clone)]
#[must_use = "FileRewrite does nothing until commit() is called"]
pub struct FileRewrite {
    path: PathBuf,
    permissions: Permissions,
    original: String,
    substitution: Option<Substitution>,
}

impl FileRewrite {
    /// Stat and read `path`, then compute the substitution in memory.
    pub fn plan(
        path: impl Into<PathBuf>,
        search: &str,
        replacement: &str,
    ) -> Result<Self, RewriteError> {
        let path = path.into();

        let permissions = fs::metadata(&path)
            .map_err(|source| RewriteError::Stat {
                path: path.clone(),
                source,
            })?
            .permissions();

        let bytes = fs::read(&path).map_err(|source| RewriteError::Read {
            path: path.clone(),
            source,
        })?;
        let original =
            String::from_utf8(bytes).map_err(|_| RewriteError::NotUtf8 { path: path.clone() })?;

        let substitution = Substitution::compute(&original, search, replacement);

        Ok(Self {
            path,
            permissions,
            original,
            substitution,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Whether committing would change the file.
    pub fn is_change(&self) -> bool {
        self.substitution.is_some()
    }

    pub fn original(&self) -> &str {
        &self.original
    }

    /// Content after substitution; the original when nothing matched.
    pub fn updated(&self) -> &str {
        self.substitution
            .as_ref()
            .map_or(self.original.as_str(), |s| s.updated.as_str())
    }

    /// Write the new content unless `dry_run` is set.
    ///
    /// The write goes through a temp file in the same directory carrying
    /// the original permission bits, then renames over the target.
    pub fn commit(self, dry_run: bool) -> Result<FileVisitResult, RewriteError> {
        let Some(substitution) = self.substitution else {
            return Ok(FileVisitResult::unchanged(self.path));
        };

        if !dry_run {
            atomic_write(&self.path, substitution.updated.as_bytes(), &self.permissions)
                .map_err(|source| RewriteError::Write {
                    path: self.path.clone(),
                    source,
                })?;
        }

        Ok(FileVisitResult {
            path: self.path,
            changed: true,
            replacement_count: substitution.count,
        })
    }
}

/// Plan and commit a rewrite of `path` using the run configuration.
pub fn rewrite_file(
    path: impl Into<PathBuf>,
    config: &Config,
) -> Result<FileVisitResult, RewriteError> {
    FileRewrite::plan(path, config.search_term(), config.replacement_term())?
        .commit(config.dry_run())
}

/// Atomic file write: tempfile + permissions + fsync + rename.
fn atomic_write(path: &Path, content: &[u8], permissions: &Permissions) -> std::io::Result<()> {
    // Same directory keeps the rename on one filesystem
    let parent = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut temp = tempfile::NamedTempFile::new_in(parent)?;
    temp.write_all(content)?;
    temp.as_file().set_permissions(permissions.clone())?;
    temp.as_file().sync_all()?;
    temp.persist(path).map_err(|e| e.error)?;

    Ok(())
}
