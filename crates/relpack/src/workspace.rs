//! Scratch workspace isolation.
//!
//! Filtering and testing are destructive, so they run against a full copy of
//! the project tree in a uniquely named directory under the project root.
//! The copy excludes version-control metadata and other scratch trees, which
//! also keeps the destination from being copied into itself and makes
//! concurrent invocations from the same directory safe.
//!
//! The workspace is owned by one run: the `TempDir` guard removes it on
//! every exit path, and [`ScratchWorkspace::close`] surfaces removal errors
//! on the success path.

use std::fs;
use std::io;
use std::path::Path;
use tempfile::TempDir;
use tracing::debug;
use walkdir::{DirEntry, WalkDir};

use crate::error::{EngineError, Result};

/// Name prefix for scratch directories under the project root.
pub const SCRATCH_PREFIX: &str = ".relpack-";

/// Version-control metadata excluded from the copy.
const VCS_DIRS: &[&str] = &[".git", ".hg", ".svn"];

/// A disposable copy of the project tree.
#[derive(Debug)]
pub struct ScratchWorkspace {
    dir: TempDir,
}

impl ScratchWorkspace {
    /// Copy the tree at `project_root` into a fresh scratch directory.
    ///
    /// Fails with [`EngineError::Isolation`] if the copy cannot complete;
    /// the partially created directory is removed by the guard.
    pub fn create(project_root: &Path) -> Result<Self> {
        let dir = tempfile::Builder::new()
            .prefix(SCRATCH_PREFIX)
            .tempdir_in(project_root)
            .map_err(EngineError::Isolation)?;

        copy_tree(project_root, dir.path()).map_err(EngineError::Isolation)?;
        debug!(root = %dir.path().display(), "Scratch workspace ready");
        Ok(Self { dir })
    }

    /// Root of the scratch copy.
    pub fn root(&self) -> &Path {
        self.dir.path()
    }

    /// Remove the workspace, surfacing removal errors.
    ///
    /// Dropping the guard removes it best-effort instead.
    pub fn close(self) -> io::Result<()> {
        self.dir.close()
    }
}

fn excluded(entry: &DirEntry) -> bool {
    let name = entry.file_name().to_string_lossy();
    if entry.file_type().is_dir() && VCS_DIRS.contains(&name.as_ref()) {
        return true;
    }
    // other scratch trees, including the copy destination itself
    entry.depth() == 1 && name.starts_with(SCRATCH_PREFIX)
}

fn copy_tree(src: &Path, dst: &Path) -> io::Result<()> {
    let walker = WalkDir::new(src)
        .min_depth(1)
        .into_iter()
        .filter_entry(|entry| !excluded(entry));

    for entry in walker {
        let entry = entry?;
        let rel = entry
            .path()
            .strip_prefix(src)
            .map_err(|err| io::Error::new(io::ErrorKind::InvalidData, err))?;
        let target = dst.join(rel);

        let file_type = entry.file_type();
        if file_type.is_dir() {
            fs::create_dir_all(&target)?;
        } else if file_type.is_file() {
            fs::copy(entry.path(), &target)?;
        } else if entry.path().is_file() {
            // symlink to a regular file: copy the contents
            fs::copy(entry.path(), &target)?;
        } else {
            debug!(path = %entry.path().display(), "Skipping non-regular entry");
        }
    }

    Ok(())
}
