//! Error types for midi2key

use thiserror::Error;

/// Result type alias for midi2key operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in midi2key
#[derive(Debug, Error)]
pub enum Error {
    /// MIDI backend error
    #[error("MIDI error: {0}")]
    Midi(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
