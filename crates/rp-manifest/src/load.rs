//! Manifest loading and semantic validation.

use std::fs;
use std::path::Path;

use crate::error::{ManifestError, Result};
use crate::model::{FileGroup, Manifest};

/// Load and validate a manifest from `path`.
///
/// Fails before any filesystem mutation: a missing, unreadable, or malformed
/// manifest aborts the whole run at startup.
pub fn load(path: &Path) -> Result<Manifest> {
    if !path.is_file() {
        return Err(ManifestError::Missing(path.display().to_string()));
    }

    let data = fs::read_to_string(path)?;
    let manifest: Manifest = serde_json::from_str(&data)?;
    validate(&manifest)?;
    Ok(manifest)
}

/// Semantic validation on top of the schema the types already enforce.
pub fn validate(manifest: &Manifest) -> Result<()> {
    if manifest.is_empty() {
        return Err(ManifestError::Empty);
    }

    for (name, group) in manifest.iter() {
        validate_group(name, group)?;
    }

    Ok(())
}

fn validate_group(name: &str, group: &FileGroup) -> Result<()> {
    let invalid = |reason: String| ManifestError::Invalid {
        group: name.to_string(),
        reason,
    };

    if group.src_path.is_empty() {
        return Err(invalid("src_path must not be empty".to_string()));
    }

    if Path::new(&group.src_path).is_absolute() {
        return Err(invalid(format!(
            "src_path must be relative, got '{}'",
            group.src_path
        )));
    }

    if Path::new(&group.dest_path).is_absolute() {
        return Err(invalid(format!(
            "dest_path must be relative, got '{}'",
            group.dest_path
        )));
    }

    for pattern in &group.include {
        if pattern.is_empty() {
            return Err(invalid("include entries must not be empty".to_string()));
        }
        if Path::new(pattern).is_absolute() {
            return Err(invalid(format!(
                "include entry must be relative, got '{pattern}'"
            )));
        }
    }

    Ok(())
}
