//! Error types for the import layer.
//!
//! Uses [`thiserror`] for ergonomic error derivation. Malformed content never
//! produces an error; only cancellation, bad options and the facade's I/O do.

use thiserror::Error;

/// Error type for content stream import.
#[derive(Debug, Error)]
pub enum ImportError {
    /// The caller's abort signal fired; no partial result is returned.
    #[error("import cancelled")]
    Cancelled,

    /// The import options cannot be used.
    #[error("invalid import options: {0}")]
    InvalidOptions(String),

    /// Error reading the content stream text.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A background import thread panicked.
    #[error("import worker panicked")]
    WorkerPanicked,
}

impl ImportError {
    /// True for the cancellation outcome.
    pub fn is_cancelled(&self) -> bool {
        matches!(self, ImportError::Cancelled)
    }
}
