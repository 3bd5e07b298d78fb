use std::path::PathBuf;

use thiserror::Error;

/// Errors that stop a whole validator family.
///
/// Problems with individual plugins or files never surface here; they are
/// reported as [`crate::issue::ValidationIssue`]s on the run instead.
#[derive(Error, Debug)]
pub enum PlugcheckError {
    /// The `plugins/` directory does not exist under the repository root.
    #[error("plugins directory not found: {}", path.display())]
    MissingPluginsDir { path: PathBuf },

    /// A directory needed for discovery could not be listed.
    #[error("cannot read directory {}: {source}", path.display())]
    ReadDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Filesystem I/O error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience alias for `Result<T, PlugcheckError>`.
pub type Result<T> = std::result::Result<T, PlugcheckError>;
