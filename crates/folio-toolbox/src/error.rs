// error.rs — Error types for the mutation surface.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur during toolbox operations.
#[derive(Debug, Error)]
pub enum ToolboxError {
    /// The requested file does not exist in the surface's view.
    #[error("file not found: '{path}'")]
    FileNotFound { path: String },

    /// A git plumbing call failed unexpectedly.
    #[error(transparent)]
    Git(#[from] folio_git::GitError),

    /// A filesystem operation on a materialized worktree failed.
    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
}
