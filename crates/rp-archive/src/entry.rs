//! Resolution of manifest groups into archive entries.

use std::path::{Component, Path, PathBuf};
use tracing::debug;

use crate::error::{ArchiveError, Result};
use rp_manifest::{FileGroup, Manifest};

/// One resolved archive entry: a source file and its destination path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArchiveEntry {
    /// Source file on disk.
    pub source: PathBuf,

    /// Normalized relative destination path inside the archive.
    pub dest: String,
}

/// Resolve every group of `manifest` against `root`, in document order.
pub fn resolve_manifest(root: &Path, manifest: &Manifest) -> Result<Vec<ArchiveEntry>> {
    let mut entries = Vec::new();
    for (name, group) in manifest.iter() {
        entries.extend(resolve_group(root, name, group)?);
    }
    Ok(entries)
}

/// Resolve one group's include entries, in list order.
///
/// Literal entries must exist as regular files. Glob entries expand with
/// shell-style semantics (`**` recurses); matches are limited to regular
/// files and sorted lexicographically so re-runs against an unchanged tree
/// resolve to the same entry sequence. Zero matches is not an error.
pub fn resolve_group(root: &Path, name: &str, group: &FileGroup) -> Result<Vec<ArchiveEntry>> {
    let src_root = root.join(&group.src_path);
    let mut entries = Vec::new();

    for pattern in &group.include {
        if group.glob {
            let matched = resolve_glob(&src_root, &group.dest_path, pattern)?;
            debug!(group = name, pattern = %pattern, matches = matched.len(), "Expanded glob");
            entries.extend(matched);
        } else {
            let source = src_root.join(pattern);
            if !source.is_file() {
                return Err(ArchiveError::MissingSource { path: source });
            }
            let dest = dest_for(&group.dest_path, Path::new(pattern))?;
            entries.push(ArchiveEntry { source, dest });
        }
    }

    Ok(entries)
}

fn resolve_glob(src_root: &Path, dest_root: &str, pattern: &str) -> Result<Vec<ArchiveEntry>> {
    let full = src_root.join(pattern);
    let full_pattern = full.to_str().ok_or_else(|| ArchiveError::NonUtf8Path {
        path: full.display().to_string(),
    })?;

    let paths = glob::glob(full_pattern).map_err(|source| ArchiveError::Pattern {
        pattern: pattern.to_string(),
        source,
    })?;

    let mut matches = Vec::new();
    for item in paths {
        let path = item.map_err(|err| ArchiveError::Io(err.into_error()))?;
        // only regular files become entries
        if path.is_file() {
            matches.push(path);
        }
    }
    matches.sort();

    let mut entries = Vec::with_capacity(matches.len());
    for path in matches {
        // destination is the match's path relative to src_path, joined
        // onto dest_path
        let rel = path
            .strip_prefix(src_root)
            .map_err(|_| ArchiveError::UnsafePath {
                path: path.display().to_string(),
            })?;
        let dest = dest_for(dest_root, rel)?;
        entries.push(ArchiveEntry { source: path, dest });
    }

    Ok(entries)
}

/// Join `rel` onto `dest_root` and normalize into a forward-slash relative
/// path with no `.`/`..`/empty segments.
fn dest_for(dest_root: &str, rel: &Path) -> Result<String> {
    let mut stack: Vec<&str> = Vec::new();

    for segment in dest_root.split('/') {
        push_segment(&mut stack, segment, dest_root, rel)?;
    }

    for component in rel.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => push_segment(&mut stack, "..", dest_root, rel)?,
            Component::Normal(os) => {
                let segment = os.to_str().ok_or_else(|| ArchiveError::NonUtf8Path {
                    path: rel.display().to_string(),
                })?;
                push_segment(&mut stack, segment, dest_root, rel)?;
            }
            Component::RootDir | Component::Prefix(_) => {
                return Err(unsafe_path(dest_root, rel));
            }
        }
    }

    if stack.is_empty() {
        return Err(unsafe_path(dest_root, rel));
    }

    Ok(stack.join("/"))
}

fn push_segment<'a>(
    stack: &mut Vec<&'a str>,
    segment: &'a str,
    dest_root: &str,
    rel: &Path,
) -> Result<()> {
    match segment {
        "" | "." => Ok(()),
        ".." => {
            if stack.pop().is_none() {
                Err(unsafe_path(dest_root, rel))
            } else {
                Ok(())
            }
        }
        _ => {
            stack.push(segment);
            Ok(())
        }
    }
}

fn unsafe_path(dest_root: &str, rel: &Path) -> ArchiveError {
    ArchiveError::UnsafePath {
        path: format!("{}/{}", dest_root, rel.display()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn touch(root: &Path, rel: &str) {
        let path = root.join(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, rel).unwrap();
    }

    fn group(src_path: &str, dest_path: &str, include: &[&str], glob: bool) -> FileGroup {
        FileGroup {
            src_path: src_path.to_string(),
            dest_path: dest_path.to_string(),
            include: include.iter().map(|s| s.to_string()).collect(),
            glob,
            clean: true,
        }
    }

    #[test]
    fn test_literal_resolution() {
        let dir = TempDir::new().unwrap();
        touch(dir.path(), "lib/a.txt");
        touch(dir.path(), "lib/b.txt");

        let entries =
            resolve_group(dir.path(), "src", &group("lib", "out/lib", &["a.txt", "b.txt"], false))
                .unwrap();

        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].dest, "out/lib/a.txt");
        assert_eq!(entries[1].dest, "out/lib/b.txt");
        assert_eq!(entries[0].source, dir.path().join("lib/a.txt"));
    }

    #[test]
    fn test_literal_missing_source() {
        let dir = TempDir::new().unwrap();
        touch(dir.path(), "lib/a.txt");

        let err = resolve_group(dir.path(), "src", &group("lib", "out", &["missing.txt"], false))
            .unwrap_err();

        assert!(matches!(err, ArchiveError::MissingSource { .. }));
        assert!(err.to_string().contains("missing.txt"));
    }

    #[test]
    fn test_literal_directory_is_missing_source() {
        let dir = TempDir::new().unwrap();
        fs::create_dir_all(dir.path().join("lib/subdir")).unwrap();

        let err = resolve_group(dir.path(), "src", &group("lib", "out", &["subdir"], false))
            .unwrap_err();

        assert!(matches!(err, ArchiveError::MissingSource { .. }));
    }

    #[test]
    fn test_glob_expansion_sorted() {
        let dir = TempDir::new().unwrap();
        touch(dir.path(), "lib/c.txt");
        touch(dir.path(), "lib/a.txt");
        touch(dir.path(), "lib/b.txt");
        touch(dir.path(), "lib/skip.log");

        let entries =
            resolve_group(dir.path(), "src", &group("lib", "out/lib", &["*.txt"], true)).unwrap();

        let dests: Vec<&str> = entries.iter().map(|e| e.dest.as_str()).collect();
        assert_eq!(dests, vec!["out/lib/a.txt", "out/lib/b.txt", "out/lib/c.txt"]);
    }

    #[test]
    fn test_glob_recursive_remaps_subtree() {
        let dir = TempDir::new().unwrap();
        touch(dir.path(), "src/main.rs");
        touch(dir.path(), "src/sub/module.rs");
        touch(dir.path(), "src/sub/deep/inner.rs");

        let entries =
            resolve_group(dir.path(), "src", &group("src", "pkg", &["**/*.rs"], true)).unwrap();

        let dests: Vec<&str> = entries.iter().map(|e| e.dest.as_str()).collect();
        assert_eq!(
            dests,
            vec!["pkg/main.rs", "pkg/sub/deep/inner.rs", "pkg/sub/module.rs"]
        );
    }

    #[test]
    fn test_glob_zero_matches_is_empty() {
        let dir = TempDir::new().unwrap();
        touch(dir.path(), "lib/a.txt");

        let entries =
            resolve_group(dir.path(), "src", &group("lib", "out", &["*.nomatch"], true)).unwrap();

        assert!(entries.is_empty());
    }

    #[test]
    fn test_glob_skips_directories() {
        let dir = TempDir::new().unwrap();
        touch(dir.path(), "lib/data/x.txt");
        touch(dir.path(), "lib/a.txt");

        // '*' matches the 'data' directory too; only files become entries
        let entries =
            resolve_group(dir.path(), "src", &group("lib", "out", &["*"], true)).unwrap();

        let dests: Vec<&str> = entries.iter().map(|e| e.dest.as_str()).collect();
        assert_eq!(dests, vec!["out/a.txt"]);
    }

    #[test]
    fn test_glob_deterministic_across_runs() {
        let dir = TempDir::new().unwrap();
        touch(dir.path(), "lib/b.txt");
        touch(dir.path(), "lib/a.txt");
        touch(dir.path(), "lib/sub/c.txt");

        let g = group("lib", "out", &["**/*.txt"], true);
        let first = resolve_group(dir.path(), "src", &g).unwrap();
        let second = resolve_group(dir.path(), "src", &g).unwrap();

        assert_eq!(first, second);
    }

    #[test]
    fn test_bad_pattern_rejected() {
        let dir = TempDir::new().unwrap();

        let err = resolve_group(dir.path(), "src", &group("lib", "out", &["[unclosed"], true))
            .unwrap_err();

        assert!(matches!(err, ArchiveError::Pattern { .. }));
    }

    #[test]
    fn test_manifest_resolution_in_group_order() {
        let dir = TempDir::new().unwrap();
        touch(dir.path(), "tests/t.txt");
        touch(dir.path(), "lib/a.txt");

        let manifest = Manifest::from_groups(vec![
            ("test".to_string(), group("tests", "out/tests", &["t.txt"], false)),
            ("src".to_string(), group("lib", "out/lib", &["a.txt"], false)),
        ]);

        let entries = resolve_manifest(dir.path(), &manifest).unwrap();
        let dests: Vec<&str> = entries.iter().map(|e| e.dest.as_str()).collect();
        assert_eq!(dests, vec!["out/tests/t.txt", "out/lib/a.txt"]);
    }

    #[test]
    fn test_dest_normalization() {
        assert_eq!(dest_for("out//lib/", Path::new("a.txt")).unwrap(), "out/lib/a.txt");
        assert_eq!(dest_for("./out", Path::new("a.txt")).unwrap(), "out/a.txt");
        assert_eq!(dest_for("out", Path::new("sub/../a.txt")).unwrap(), "out/a.txt");
        assert_eq!(dest_for("", Path::new("a.txt")).unwrap(), "a.txt");
    }

    #[test]
    fn test_dest_escape_rejected() {
        assert!(matches!(
            dest_for("out", Path::new("../../a.txt")),
            Err(ArchiveError::UnsafePath { .. })
        ));
        assert!(matches!(
            dest_for("..", Path::new("a.txt")),
            Err(ArchiveError::UnsafePath { .. })
        ));
        assert!(matches!(
            dest_for("", Path::new(".")),
            Err(ArchiveError::UnsafePath { .. })
        ));
    }
}
