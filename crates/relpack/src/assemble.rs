//! The assembly pipeline.
//!
//! One linear pass: load manifest → isolate → filter & verify → resolve and
//! write archive → cleanup. The scratch root is passed to each stage as an
//! explicit value; nothing mutates the process working directory.

use std::path::{Path, PathBuf};
use tracing::{debug, info};

use crate::error::Result;
use crate::filter::{self, FilterReport};
use crate::verify;
use crate::workspace::ScratchWorkspace;
use rp_manifest::{Manifest, MANIFEST_FILE};

/// Outcome of a successful assembly run.
#[derive(Debug)]
pub struct AssembleReport {
    /// Where the archive was written.
    pub archive_path: PathBuf,

    /// Number of entries in the archive.
    pub entry_count: usize,

    /// Filtering outcome, when the clean gate ran.
    pub filter: Option<FilterReport>,
}

/// Run one assemble-and-package pass for the project at `project_root`,
/// writing the archive to `project_root/<archive_name>`.
///
/// The scratch workspace is removed on every exit path: the guard drops on
/// failure, and `close` surfaces removal errors on success.
pub fn run(project_root: &Path, archive_name: &str) -> Result<AssembleReport> {
    let manifest = rp_manifest::load(&project_root.join(MANIFEST_FILE))?;
    info!("Starting artifact build");
    if let Ok(echo) = serde_json::to_string_pretty(&manifest) {
        debug!("manifest:\n{echo}");
    }

    info!("Copying project tree to scratch workspace");
    let workspace = ScratchWorkspace::create(project_root)?;

    let filter_report = clean_and_verify(&manifest, workspace.root())?;

    let entries = rp_archive::resolve_manifest(workspace.root(), &manifest)?;
    let archive_path = project_root.join(archive_name);
    info!("Compiling artifact archive {}", archive_path.display());
    let entry_count = rp_archive::write_archive(&archive_path, &entries)?;

    info!("Removing scratch workspace");
    workspace.close()?;

    Ok(AssembleReport {
        archive_path,
        entry_count,
        filter: filter_report,
    })
}

fn clean_and_verify(manifest: &Manifest, workspace_root: &Path) -> Result<Option<FilterReport>> {
    let Some(group) = manifest.clean_gate() else {
        debug!("No clean gate group; skipping filter and tests");
        return Ok(None);
    };

    if !group.clean {
        info!("Skipped clean testing");
        return Ok(None);
    }

    info!("Deleting spurious source files before test");
    let report = filter::filter_sources(workspace_root, group)?;
    verify::run_tests(workspace_root)?;
    Ok(Some(report))
}
