//! Error types for the courtpress library.
//!
//! The parsing core degrades gracefully on malformed input (unterminated
//! title blocks, duplicate exhibit numbers, headingless text) rather than
//! erroring; the variants here cover the conditions that genuinely cannot
//! proceed: I/O, an unusable page geometry, and render formatting.

use std::io;
use thiserror::Error;

/// Result type alias for courtpress operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur while laying out a filing.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error when reading or writing files.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Page geometry that cannot hold any content.
    #[error("Layout error: {0}")]
    Layout(String),

    /// Error during rendering (proof sheet, JSON).
    #[error("Rendering error: {0}")]
    Render(String),
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Render(format!("JSON serialization error: {}", err))
    }
}
