//! Unified error type for the assembly engine.

use rp_archive::ArchiveError;
use rp_manifest::ManifestError;
use std::process::ExitStatus;
use thiserror::Error;

/// Errors that abort an assembly run.
///
/// All of these are unrecoverable at the engine level: there is no retry and
/// no partial-archive recovery. Each variant maps to one stable exit code in
/// [`crate::exit_codes::ExitCode`].
#[derive(Error, Debug)]
pub enum EngineError {
    /// Manifest missing, unreadable, or malformed
    #[error("manifest error: {0}")]
    Manifest(#[from] ManifestError),

    /// The scratch workspace copy could not be created
    #[error("workspace isolation failed: {0}")]
    Isolation(#[source] std::io::Error),

    /// The test command could not be started
    #[error("failed to launch test command '{command}': {source}")]
    TestLaunch {
        command: String,
        #[source]
        source: std::io::Error,
    },

    /// The test command exited unsuccessfully
    #[error("test command failed: {status}")]
    TestFailure { status: ExitStatus },

    /// Archive resolution or writing failed
    #[error("archive error: {0}")]
    Archive(#[from] ArchiveError),

    /// I/O error outside the stages above
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for engine operations.
pub type Result<T> = std::result::Result<T, EngineError>;
