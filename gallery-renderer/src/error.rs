//! Error types for gallery-renderer.

use std::path::PathBuf;

use thiserror::Error;

/// All errors that can arise from manifest encoding, substitution and page
/// scaffolding.
#[derive(Debug, Error)]
pub enum RenderError {
    /// Tera template engine error.
    #[error("template engine error: {0}")]
    Tera(#[from] tera::Error),

    /// JSON serialization error (encoding the manifest or the tera context).
    #[error("manifest serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// The locator pattern failed to compile.
    #[error("invalid locator pattern: {0}")]
    Pattern(#[from] regex::Error),

    /// The target text has no `<identifier> = [ ... ];` literal.
    #[error("no `{identifier} = [ ... ];` array literal found in target")]
    ManifestNotFound { identifier: String },

    /// The target text has more than one candidate literal.
    #[error("found {count} `{identifier} = [ ... ];` array literals; expected exactly one")]
    AmbiguousManifest { identifier: String, count: usize },

    /// The existing literal is not a JSON array of strings.
    #[error("embedded `{identifier}` array is not a JSON string array: {source}")]
    UnreadableManifest {
        identifier: String,
        #[source]
        source: serde_json::Error,
    },

    /// Filesystem error while loading a user template.
    #[error("template io error at {path}: {source}")]
    Io { path: PathBuf, source: std::io::Error },
}
