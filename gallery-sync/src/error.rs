//! Error types for gallery-sync.

use std::path::PathBuf;

use thiserror::Error;

use gallery_core::ConfigError;
use gallery_renderer::RenderError;
use gallery_scanner::ScanError;

/// All errors that can arise from sync operations.
#[derive(Debug, Error)]
pub enum SyncError {
    /// An error from manifest encoding or substitution.
    #[error("render error: {0}")]
    Render(#[from] RenderError),

    /// An error from the image directory scan.
    #[error("scan error: {0}")]
    Scan(#[from] ScanError),

    /// An error while persisting `gallery.yaml`.
    #[error("config error: {0}")]
    Config(#[from] ConfigError),

    /// The page to rewrite does not exist.
    #[error("target file not found: {path}")]
    TargetNotFound { path: PathBuf },

    /// `init` refused to replace an existing page.
    #[error("{path} already exists; pass --force to overwrite")]
    TargetExists { path: PathBuf },

    /// An I/O error, with annotated path for context.
    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Convenience constructor for [`SyncError::Io`].
pub(crate) fn io_err(path: impl Into<PathBuf>, source: std::io::Error) -> SyncError {
    SyncError::Io {
        path: path.into(),
        source,
    }
}
