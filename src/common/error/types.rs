//! Unified error type for wpgraphics.
//!
//! Container, header and record-stream failures all surface through this
//! type so callers see one consistent API regardless of which layer failed.
use thiserror::Error;

/// Main error type for wpgraphics operations.
#[derive(Error, Debug)]
pub enum Error {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Bad magic, wrong product/file type, unknown version or an encrypted file
    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),

    /// Coordinate precision code outside {0, 1}
    #[error("Unsupported coordinate precision: {0}")]
    UnsupportedPrecision(u8),

    /// Input ended before a fixed-size structure was complete
    #[error("Truncated input: expected {expected} bytes, {available} available")]
    TruncatedInput { expected: usize, available: usize },

    /// Compound document container failed its structural checks
    #[error("Malformed container: {0}")]
    MalformedContainer(String),

    /// Named stream is not present in the container
    #[error("Stream not found: {0}")]
    StreamNotFound(String),
}

/// Result type for wpgraphics operations.
pub type Result<T> = std::result::Result<T, Error>;
