//! # folio-toolbox
//!
//! The file-operation surface handed to code-generation bots.
//!
//! Two interchangeable strategies implement the same [`Toolbox`] capability
//! set (`list/read/write/delete/rename`):
//!
//! - [`StagingToolbox`] — operates purely against the repository's staging
//!   area. Tracked working-tree files are never touched; a later explicit
//!   apply step makes changes visible as files.
//! - [`WorktreeToolbox`] — a path-keyed overlay over a base tree, with a
//!   scoped edit session that materializes a temporary `git worktree` for
//!   external tools and folds their changes back on release.
//!
//! Every call is recorded as an [`Operation`] (closed [`ToolEvent`] kind plus
//! reason and timestamp) and forwarded to registered [`ToolObserver`]s, which
//! is how the history store builds its audit trail.

pub mod bot;
pub mod error;
pub mod operation;
pub mod staging;
pub mod toolbox;
pub mod worktree;

pub use bot::{Bot, BotAction, Goal, MappingBot};
pub use error::ToolboxError;
pub use operation::{Operation, OperationLog, ToolEvent, ToolObserver};
pub use staging::StagingToolbox;
pub use toolbox::Toolbox;
pub use worktree::WorktreeToolbox;
