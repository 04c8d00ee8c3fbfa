//! Error types for unweb library.

use std::io;
use thiserror::Error;

/// Result type alias for unweb operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur while loading or rendering page analyses.
///
/// The analysis stages themselves never fail: malformed sections degrade to
/// defaults and carry a diagnostic note instead.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error when reading or writing files.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The capture document could not be decoded.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// The input is neither a capture document nor line-delimited captures.
    #[error("Unknown input format: expected a JSON capture document")]
    UnknownFormat,

    /// The input was recognized but is unusable.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Error during rendering (JSON, CSS, outline).
    #[error("Rendering error: {0}")]
    Render(String),

    /// Generic error with message.
    #[error("{0}")]
    Other(String),
}
