//! Find Replace: rename a Go module path across a project tree
//!
//! Reads the module path declared in `go.mod`, walks the project, and
//! replaces every literal occurrence of that path in `.go` files with a
//! new one.
//!
//! # Pipeline
//!
//! 1. [`manifest`] derives the search term from the `module` line.
//! 2. [`walk`] enumerates `.go` files, pruning `.git`.
//! 3. [`rewrite`] counts and replaces occurrences in each file.
//! 4. [`report`] streams one line per changed file.
//!
//! [`app::search`] ties the steps together over an immutable [`Config`].
//!
//! # Safety
//!
//! - Literal substring matching only, no regular expressions
//! - Atomic file writes (tempfile + fsync + rename)
//! - Original permission bits carried over to the rewritten file
//! - Dry-run never touches the disk
//!
//! # Example
//!
//! ```no_run
//! use find_replace::{search, Config, ManifestScan, Reporter};
//!
//! let config = Config::from_manifest(".", "example.com/bar", ManifestScan::FirstLine)?
//!     .with_dry_run(true);
//! let summary = search(&config, &mut Reporter::stdout())?;
//! println!("{} files would change", summary.files_changed);
//! # Ok::<(), find_replace::Error>(())
//! ```

pub mod app;
pub mod config;
pub mod error;
pub mod manifest;
pub mod report;
pub mod rewrite;
pub mod walk;

// Re-exports
pub use app::{search, Summary};
pub use config::{Config, ConfigError};
pub use error::Error;
pub use manifest::{parse_declaration, read_search_term, ManifestError, ManifestScan};
pub use report::Reporter;
pub use rewrite::{rewrite_file, FileRewrite, FileVisitResult, RewriteError, Substitution};
pub use walk::{source_files, WalkError};
