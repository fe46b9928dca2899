use crate::manifest::{self, ManifestScan};
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum ConfigError {
    #[error("replace string [-rs] is required, but not provided")]
    MissingReplacement,

    #[error("search term must not be empty")]
    EmptySearchTerm,
}

/// Settings for one run, built once at startup and shared by reference.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    root_dir: PathBuf,
    search_term: String,
    replacement_term: String,
    dry_run: bool,
    show_diff: bool,
}

impl Config {
    pub fn new(
        root_dir: impl Into<PathBuf>,
        search_term: impl Into<String>,
        replacement_term: impl Into<String>,
    ) -> Result<Self, ConfigError> {
        let search_term = search_term.into();
        let replacement_term = replacement_term.into();

        check_replacement(&replacement_term)?;
        if search_term.is_empty() {
            return Err(ConfigError::EmptySearchTerm);
        }

        Ok(Self {
            root_dir: root_dir.into(),
            search_term,
            replacement_term,
            dry_run: false,
            show_diff: false,
        })
    }

    /// Derive the search term from `root_dir/go.mod`.
    pub fn from_manifest(
        root_dir: impl Into<PathBuf>,
        replacement_term: impl Into<String>,
        scan: ManifestScan,
    ) -> Result<Self, crate::Error> {
        let root_dir = root_dir.into();
        let replacement_term = replacement_term.into();

        // Checked before the manifest is touched
        check_replacement(&replacement_term)?;

        let search_term = manifest::read_search_term(&root_dir, scan)?;
        Ok(Self::new(root_dir, search_term, replacement_term)?)
    }

    pub fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    pub fn with_diff(mut self, show_diff: bool) -> Self {
        self.show_diff = show_diff;
        self
    }

    pub fn root_dir(&self) -> &Path {
        &self.root_dir
    }

    pub fn search_term(&self) -> &str {
        &self.search_term
    }

    pub fn replacement_term(&self) -> &str {
        &self.replacement_term
    }

    pub fn dry_run(&self) -> bool {
        self.dry_run
    }

    pub fn show_diff(&self) -> bool {
        self.show_diff
    }
}

/// Reject a missing or empty replacement term.
pub fn check_replacement(replacement_term: &str) -> Result<(), ConfigError> {
    if replacement_term.is_empty() {
        return Err(ConfigError::MissingReplacement);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_new_defaults() {
        let config = Config::new("/src/app", "example.com/foo", "example.com/bar").unwrap();
        assert_eq!(config.root_dir(), Path::new("/src/app"));
        assert_eq!(config.search_term(), "example.com/foo");
        assert_eq!(config.replacement_term(), "example.com/bar");
        assert!(!config.dry_run());
        assert!(!config.show_diff());
    }

    #[test]
    fn test_builder_flags() {
        let config = Config::new(".", "a", "b")
            .unwrap()
            .with_dry_run(true)
            .with_diff(true);
        assert!(config.dry_run());
        assert!(config.show_diff());
    }

    #[test]
    fn test_empty_replacement_rejected() {
        assert_eq!(
            Config::new(".", "example.com/foo", ""),
            Err(ConfigError::MissingReplacement)
        );
    }

    #[test]
    fn test_empty_search_rejected() {
        assert_eq!(
            Config::new(".", "", "example.com/bar"),
            Err(ConfigError::EmptySearchTerm)
        );
    }

    #[test]
    fn test_from_manifest() {
        let temp_dir = tempfile::tempdir().unwrap();
        fs::write(temp_dir.path().join("go.mod"), "module example.com/foo\n").unwrap();

        let config =
            Config::from_manifest(temp_dir.path(), "example.com/bar", ManifestScan::FirstLine)
                .unwrap();
        assert_eq!(config.search_term(), "example.com/foo");
        assert_eq!(config.root_dir(), temp_dir.path());
    }

    #[test]
    fn test_from_manifest_checks_replacement_first() {
        // No go.mod at all: the replacement check must win
        let temp_dir = tempfile::tempdir().unwrap();
        let result = Config::from_manifest(temp_dir.path(), "", ManifestScan::FirstLine);
        assert!(matches!(
            result,
            Err(crate::Error::Configuration(ConfigError::MissingReplacement))
        ));
    }
}
