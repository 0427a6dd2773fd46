use thiserror::Error;

/// Storage errors callers may want to branch on.
#[derive(Debug, Error)]
pub enum StoreError {
    /// No rows exist for the requested instrument.
    #[error("no data stored for ticker {0}")]
    UnknownTicker(String),

    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}
