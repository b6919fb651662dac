//! # folio-git
//!
//! Synchronous git plumbing for folio.
//!
//! Two layers:
//!
//! - [`GitCall`] — process gateway: runs the `git` binary, captures exit
//!   code/stdout/stderr, and raises [`GitError::Command`] on unexpected exit
//!   codes. The only place in the workspace that spawns processes.
//! - [`Repo`] — repository handle: resolves the enclosing repository root,
//!   maintains a persisted repository UUID, and exposes branch/commit/staging
//!   primitives on top of the gateway.
//!
//! Everything is blocking; callers serialize their own git traffic.

pub mod call;
pub mod error;
pub mod repo;

pub use call::GitCall;
pub use error::GitError;
pub use repo::{CommitId, CommitOptions, Repo};
