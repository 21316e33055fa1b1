//! Error types for archive operations.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while resolving or writing an archive.
#[derive(Error, Debug)]
pub enum ArchiveError {
    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// ZIP archive error
    #[error("ZIP error: {0}")]
    Zip(#[from] zip::result::ZipError),

    /// A literal include entry does not exist at resolution time
    #[error("missing source file: {}", path.display())]
    MissingSource { path: PathBuf },

    /// A glob include entry is not a valid pattern
    #[error("invalid glob pattern '{pattern}': {source}")]
    Pattern {
        pattern: String,
        #[source]
        source: glob::PatternError,
    },

    /// A destination would escape the archive root
    #[error("destination escapes archive root: {path}")]
    UnsafePath { path: String },

    /// A path is not representable as UTF-8
    #[error("path is not valid UTF-8: {path}")]
    NonUtf8Path { path: String },
}

/// Result type alias for archive operations.
pub type Result<T> = std::result::Result<T, ArchiveError>;
