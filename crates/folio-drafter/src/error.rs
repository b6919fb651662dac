// error.rs — Error taxonomy for the draft lifecycle.

use thiserror::Error;

use folio_git::GitError;
use folio_store::StoreError;
use folio_toolbox::ToolboxError;

/// Errors surfaced by lifecycle operations.
///
/// Each failure mode that callers are expected to branch on gets its own
/// variant; everything else is wrapped from the layer that produced it.
#[derive(Debug, Error)]
pub enum DraftError {
    #[error("the staging area holds uncommitted changes; commit, unstage, or pass --reset")]
    PendingChanges,

    #[error("prompt is empty")]
    EmptyPrompt,

    #[error("not currently on a draft branch")]
    NotOnDraftBranch,

    #[error("no branch is currently checked out")]
    NoActiveBranch,

    #[error("no folio {folio_id} is recorded for this repository")]
    UnknownFolio { folio_id: i64 },

    #[error(
        "origin branch {branch} has moved since the folio was opened \
         (recorded {recorded}, now {current})"
    )]
    StaleOrigin {
        branch: String,
        recorded: String,
        current: String,
    },

    #[error("merge left conflicts in {} file(s): {}", paths.len(), paths.join(", "))]
    Conflict { paths: Vec<String> },

    #[error("failed to apply draft changes: {stderr}")]
    ApplyFailed { stderr: String },

    #[error("bot failed")]
    Bot(#[source] Box<dyn std::error::Error + Send + Sync>),

    #[error("i/o error on {path}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    Git(#[from] GitError),

    #[error(transparent)]
    Toolbox(#[from] ToolboxError),

    #[error(transparent)]
    Store(#[from] StoreError),
}
