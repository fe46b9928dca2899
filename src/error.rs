use crate::config::ConfigError;
use crate::manifest::ManifestError;
use crate::rewrite::RewriteError;
use crate::walk::WalkError;
use thiserror::Error;

/// Every failure that ends a run. None of them are recovered from.
#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Configuration(#[from] ConfigError),

    #[error(transparent)]
    Manifest(#[from] ManifestError),

    #[error(transparent)]
    Walk(#[from] WalkError),

    #[error(transparent)]
    FileAccess(#[from] RewriteError),

    #[error("failed to write report")]
    Report(#[from] std::io::Error),
}
