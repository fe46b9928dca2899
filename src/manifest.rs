//! Module path discovery from `go.mod`.
//!
//! The search term is the module path declared in the project manifest:
//! the second whitespace-separated token of the `module` line.

use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Manifest file name, looked up directly inside the root directory.
pub const MANIFEST_FILE: &str = "go.mod";

/// Keyword identifying the declaration line.
pub const DECLARATION_KEYWORD: &str = "module";

/// How far into the manifest the declaration is searched for.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ManifestScan {
    /// Only the first line is inspected. A blank or comment first line
    /// fails even when a declaration follows.
    #[default]
    FirstLine,
    /// Every line is inspected until one contains the keyword.
    AllLines,
}

#[derive(Error, Debug)]
pub enum ManifestError {
    #[error("failed to read manifest {path}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("module declaration not found in {}", display_manifest(.path))]
    DeclarationNotFound { path: Option<PathBuf> },

    #[error(
        "module declaration on line {line} of {} has no module path",
        display_manifest(.path)
    )]
    MissingName { path: Option<PathBuf>, line: usize },
}

fn display_manifest(path: &Option<PathBuf>) -> String {
    match path {
        Some(path) => path.display().to_string(),
        None => MANIFEST_FILE.to_string(),
    }
}

impl ManifestError {
    fn with_path(self, path: &Path) -> Self {
        let path = Some(path.to_path_buf());
        match self {
            ManifestError::DeclarationNotFound { path: None } => {
                ManifestError::DeclarationNotFound { path }
            }
            ManifestError::MissingName { path: None, line } => {
                ManifestError::MissingName { path, line }
            }
            other => other,
        }
    }
}

/// Path of the manifest inside `root`.
pub fn manifest_path(root: impl AsRef<Path>) -> PathBuf {
    root.as_ref().join(MANIFEST_FILE)
}

/// Read `root/go.mod` and return the declared module path.
pub fn read_search_term(
    root: impl AsRef<Path>,
    scan: ManifestScan,
) -> Result<String, ManifestError> {
    let path = manifest_path(root);
    let contents = fs::read_to_string(&path).map_err(|source| ManifestError::Io {
        path: path.clone(),
        source,
    })?;

    let term = parse_declaration(&contents, scan).map_err(|e| e.with_path(&path))?;
    log::debug!("{} declares module {}", path.display(), term);
    Ok(term.to_string())
}

/// Extract the module path from manifest text.
pub fn parse_declaration(contents: &str, scan: ManifestScan) -> Result<&str, ManifestError> {
    for (idx, line) in contents.lines().enumerate() {
        if !line.contains(DECLARATION_KEYWORD) {
            match scan {
                ManifestScan::FirstLine => break,
                ManifestScan::AllLines => continue,
            }
        }

        return line
            .split_whitespace()
            .nth(1)
            .ok_or(ManifestError::MissingName {
                path: None,
                line: idx + 1,
            });
    }

    Err(ManifestError::DeclarationNotFound { path: None })
}
