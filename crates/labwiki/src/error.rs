//! Error types for notebook logging.

use std::path::PathBuf;

use thiserror::Error;

use crate::store::Position;

/// Errors that can occur while building or writing a notebook document.
#[derive(Debug, Error)]
pub enum LogError {
    /// Two fragments resolved to the same position key. This indicates a
    /// logic error in how call sites map to positions, so it is surfaced
    /// rather than silently overwriting.
    #[error("position {0} is already occupied")]
    DuplicatePosition(Position),

    /// A custom artifact's kind has no registered renderer and none was
    /// supplied explicitly.
    #[error("no renderer registered for artifact kind '{kind}'")]
    UnsupportedArtifact { kind: String },

    /// The host script's source text could not be read at construction.
    /// Without it there are no annotations and no provenance, so this is
    /// fatal to logger construction.
    #[error("cannot read source {}: {source}", path.display())]
    SourceUnavailable {
        path: PathBuf,
        source: std::io::Error,
    },

    /// I/O error writing a generated image or the final document.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for notebook logging operations.
pub type LogResult<T> = Result<T, LogError>;
