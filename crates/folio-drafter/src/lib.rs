//! # folio-drafter
//!
//! The draft lifecycle: folios, draft branches, and the merge machinery
//! that carries generated changes back to the origin branch.
//!
//! A folio groups the prompts aimed at one change. Each prompt produces a
//! draft commit on a dedicated `drafts/<id>` branch, anchored under
//! `refs/drafts/` so it stays reachable after the branch is gone. The origin
//! branch itself only ever sees working-tree edits; draft history never
//! becomes part of it.

pub mod branch;
pub mod delta;
pub mod drafter;
pub mod error;

pub use branch::DraftBranch;
pub use delta::{ChangedPaths, Delta, MergeStrategy};
pub use drafter::{Accept, Draft, Drafter, GenerateOptions};
pub use error::DraftError;
