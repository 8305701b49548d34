//! Error handling module for chapsplit

use thiserror::Error;

/// Errors raised while decoding SubRip text
#[derive(Error, Debug)]
pub enum SplitterError {
    /// Malformed SubRip timestamp
    #[error("Invalid subtitle timestamp: {value}. Expected HH:MM:SS,mmm")]
    InvalidTimestamp { value: String },

    /// Malformed SubRip cue block
    #[error("Malformed subtitle cue at line {line}: {message}")]
    MalformedCue { line: usize, message: String },
}

/// Result type alias for chapsplit operations
pub type SplitterResult<T> = std::result::Result<T, SplitterError>;
