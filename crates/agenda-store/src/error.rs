use thiserror::Error;

/// Errors that can occur within the occurrence store.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Underlying SQLite / rusqlite error.
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    /// The `detail` JSON column failed to serialize or deserialize.
    #[error("Detail serialization error: {0}")]
    Detail(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, StoreError>;
