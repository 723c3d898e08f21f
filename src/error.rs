//! Error types for rank/select structures.

use thiserror::Error;

/// Error variants for rank/select structure operations.
#[derive(Debug, Error)]
pub enum Error {
    /// Serialized bytes do not describe a structure that fits the given storage.
    #[error("invalid encoding: {0}")]
    InvalidEncoding(String),

    /// An I/O error occurred during serialization or deserialization.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// A specialized Result type for rank/select operations.
pub type Result<T> = std::result::Result<T, Error>;
