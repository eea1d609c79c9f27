use thiserror::Error;

/// Failures that are not routine misses. An input with no recoverable
/// identifier is `None`, never an `Error`.
#[derive(Debug, Error)]
pub enum Error {
    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("external lookup failed: {0}")]
    ExternalLookup(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
