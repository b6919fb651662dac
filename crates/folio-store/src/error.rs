// error.rs — Error types for the history store.

use thiserror::Error;

/// Errors that can occur while recording or querying history.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("no folio {folio_id} recorded for this repository")]
    UnknownFolio { folio_id: i64 },
}
