//! Error types shared across the crate.

use thiserror::Error;

/// Result type for fallible operations in this crate.
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    /// Response body could not be turned into an image.
    #[error("image decode failed: {0}")]
    Decode(String),

    /// Catalog JSON did not match the expected shape.
    #[error("catalog parse failed: {0}")]
    Catalog(#[from] serde_json::Error),

    /// Request could not be built or the server answered with an error.
    #[error("HTTP error: {0}")]
    Http(String),

    /// Configuration could not be read or written.
    #[error("config error: {0}")]
    Config(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}
