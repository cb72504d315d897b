//! Error types for the serializer

use std::path::PathBuf;
use thiserror::Error;

pub type SerializeResult<T> = Result<T, SerializeError>;

#[derive(Error, Debug)]
pub enum SerializeError {
    #[error("Corrupt tag tree: {0}")]
    CorruptTree(String),

    #[error("Invalid document payload: {0}")]
    Json(#[from] serde_json::Error),

    #[error("I/O failure on {}: {source}", .path.display())]
    Persistence {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl SerializeError {
    pub(crate) fn corrupt(message: impl Into<String>) -> Self {
        SerializeError::CorruptTree(message.into())
    }
}
