//! Exit codes for the relpack CLI.
//!
//! Exit codes communicate operation outcome without requiring output
//! parsing. Ranges:
//! - 0: success
//! - 10-19: user/environment errors (recoverable by user action)
//! - 20-29: internal errors

use crate::error::EngineError;

/// Exit codes for relpack runs.
///
/// These codes are a stable contract for automation. Changes require
/// a major version bump.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum ExitCode {
    /// Success: archive written
    Success = 0,

    /// Invalid or missing arguments
    ArgsError = 10,

    /// Manifest missing, unreadable, or malformed
    ManifestError = 11,

    /// Scratch workspace could not be created
    IsolationError = 12,

    /// Test command failed or could not be launched
    TestFailure = 13,

    /// Archive resolution or writing failed (e.g. missing source file)
    ArchiveError = 14,

    /// I/O error
    IoError = 20,
}

impl ExitCode {
    /// Convert to i32 for process exit.
    pub fn as_i32(self) -> i32 {
        self as i32
    }

    /// Terminate the process with this code.
    pub fn exit(self) -> ! {
        std::process::exit(self.as_i32())
    }
}

impl From<&EngineError> for ExitCode {
    fn from(err: &EngineError) -> Self {
        match err {
            EngineError::Manifest(_) => ExitCode::ManifestError,
            EngineError::Isolation(_) => ExitCode::IsolationError,
            EngineError::TestLaunch { .. } | EngineError::TestFailure { .. } => {
                ExitCode::TestFailure
            }
            EngineError::Archive(_) => ExitCode::ArchiveError,
            EngineError::Io(_) => ExitCode::IoError,
        }
    }
}
