// error.rs — Error types for git invocations.

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised by the git gateway and repository handle.
#[derive(Debug, Error)]
pub enum GitError {
    /// No git repository encloses the given path.
    #[error("no git repository found enclosing {path}")]
    NotARepository { path: PathBuf },

    /// The git binary could not be spawned at all.
    #[error("failed to spawn `git {command}`: {source}")]
    Spawn {
        command: String,
        source: std::io::Error,
    },

    /// A git command exited with a code outside the accepted set.
    #[error("`git {command}` failed with code {code}: {stderr}")]
    Command {
        command: String,
        code: i32,
        stderr: String,
    },

    /// The persisted repository UUID is present but unparsable.
    #[error("invalid repository uuid {value:?}: {source}")]
    InvalidUuid {
        value: String,
        source: uuid::Error,
    },
}
