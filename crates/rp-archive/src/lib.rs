//! Archive entry resolution and ZIP writing for relpack.
//!
//! The archive stage runs in two passes. [`resolve_manifest`] walks every
//! manifest group in document order and turns each include entry into an
//! [`ArchiveEntry`]: a source file on disk plus a normalized relative
//! destination path inside the archive. [`write_archive`] then creates the
//! output file and writes the entries in resolved order.
//!
//! Resolving everything before creating the output file means a missing
//! source never leaves a partial archive on disk.
//!
//! # Destination paths
//!
//! Literal includes land at `dest_path/<include>`. Glob matches land at
//! `dest_path/<match relative to src_path>`. Either way the destination is
//! normalized to a forward-slash relative path; a path that would escape the
//! archive root is an error.

pub mod entry;
pub mod error;
pub mod writer;

pub use entry::{resolve_group, resolve_manifest, ArchiveEntry};
pub use error::{ArchiveError, Result};
pub use writer::{write_archive, ArchiveWriter};
