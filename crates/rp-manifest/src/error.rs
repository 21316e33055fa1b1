//! Error types for manifest loading and validation.

use thiserror::Error;

/// Errors that can occur while loading or validating a manifest.
#[derive(Error, Debug)]
pub enum ManifestError {
    /// Manifest file does not exist at the expected path
    #[error("manifest not found: {0}")]
    Missing(String),

    /// I/O error reading the manifest
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Manifest is not valid JSON or violates the schema
    #[error("manifest parse error: {0}")]
    Parse(#[from] serde_json::Error),

    /// Manifest defines no groups
    #[error("manifest defines no groups")]
    Empty,

    /// A group violates a semantic constraint
    #[error("invalid group '{group}': {reason}")]
    Invalid { group: String, reason: String },
}

/// Result type alias for manifest operations.
pub type Result<T> = std::result::Result<T, ManifestError>;
