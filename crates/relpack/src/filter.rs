//! Whitelist filtering of the clean-gate group's source directory.
//!
//! Operates only inside the scratch workspace. The immediate contents of the
//! group's `src_path` are compared against the include list by file name:
//! whitelisted entries are kept untouched, everything else is deleted. A
//! single level only; subdirectory contents are never inspected (a
//! non-whitelisted subdirectory is removed whole).

use std::fs;
use std::io;
use std::path::Path;
use tracing::info;

use rp_manifest::FileGroup;

/// Names kept and deleted by one filtering pass, sorted.
#[derive(Debug, Clone, Default)]
pub struct FilterReport {
    pub kept: Vec<String>,
    pub deleted: Vec<String>,
}

/// Delete every entry of `workspace_root/group.src_path` whose name is not
/// present verbatim in `group.include`.
pub fn filter_sources(workspace_root: &Path, group: &FileGroup) -> io::Result<FilterReport> {
    let dir = workspace_root.join(&group.src_path);

    let mut listing = Vec::new();
    for entry in fs::read_dir(&dir)? {
        let entry = entry?;
        let name = entry.file_name().to_string_lossy().into_owned();
        listing.push((name, entry.path(), entry.file_type()?));
    }
    listing.sort_by(|a, b| a.0.cmp(&b.0));

    let mut report = FilterReport::default();
    for (name, path, file_type) in listing {
        if group.include.iter().any(|inc| *inc == name) {
            info!("    Kept {name}");
            report.kept.push(name);
        } else {
            if file_type.is_dir() {
                fs::remove_dir_all(&path)?;
            } else {
                fs::remove_file(&path)?;
            }
            info!("    Deleted {name}");
            report.deleted.push(name);
        }
    }

    Ok(report)
}
