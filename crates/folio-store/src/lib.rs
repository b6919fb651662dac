//! # folio-store
//!
//! Durable history of folios, prompts, actions, and operations, keyed by
//! the repository's persisted UUID. One SQLite file holds the records for
//! every repository on the machine.
//!
//! The store assigns folio ids and per-folio prompt sequence numbers; it is
//! never the source of truth for branch existence — branch state is always
//! re-derived from the live repository and cross-checked against these rows.

pub mod error;
pub mod store;

pub use error::StoreError;
pub use store::{
    ActionRecord, FolioRow, FolioSummary, HistoryStore, OperationRow, PromptRecord, PromptRow,
};
