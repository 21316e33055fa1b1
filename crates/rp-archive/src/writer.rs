//! ZIP writing for resolved archive entries.

use std::collections::HashSet;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};
use zip::write::{FileOptions, ZipWriter};
use zip::CompressionMethod;

use crate::entry::ArchiveEntry;
use crate::error::{ArchiveError, Result};

fn file_options() -> FileOptions<'static, ()> {
    FileOptions::default()
        .compression_method(CompressionMethod::Deflated)
        .unix_permissions(0o644)
}

/// Incremental archive writer over a fresh output file.
pub struct ArchiveWriter {
    path: PathBuf,
    zip: ZipWriter<File>,
    written: HashSet<String>,
}

impl ArchiveWriter {
    /// Create the output file and an empty archive over it.
    pub fn create(path: &Path) -> Result<Self> {
        let file = File::create(path)?;
        Ok(Self {
            path: path.to_path_buf(),
            zip: ZipWriter::new(file),
            written: HashSet::new(),
        })
    }

    /// Read `entry.source` and write it at `entry.dest`.
    pub fn add(&mut self, entry: &ArchiveEntry) -> Result<()> {
        let data = fs::read(&entry.source).map_err(|err| {
            if err.kind() == std::io::ErrorKind::NotFound {
                ArchiveError::MissingSource {
                    path: entry.source.clone(),
                }
            } else {
                ArchiveError::Io(err)
            }
        })?;

        if !self.written.insert(entry.dest.clone()) {
            warn!(dest = %entry.dest, "duplicate destination path; last write wins on extraction");
        }

        debug!(source = %entry.source.display(), dest = %entry.dest, "Adding");
        self.zip.start_file(entry.dest.as_str(), file_options())?;
        self.zip.write_all(&data)?;
        Ok(())
    }

    /// Finalize the archive.
    pub fn finish(self) -> Result<PathBuf> {
        let mut zip = self.zip;
        zip.finish()?;
        Ok(self.path)
    }
}

/// Write `entries` into a fresh archive at `path`, in order.
///
/// On failure the partially written file is removed best-effort before the
/// error propagates; no partial artifact is left at `path`.
pub fn write_archive(path: &Path, entries: &[ArchiveEntry]) -> Result<usize> {
    match try_write(path, entries) {
        Ok(count) => {
            info!(path = %path.display(), files = count, "Archive written");
            Ok(count)
        }
        Err(err) => {
            let _ = fs::remove_file(path);
            Err(err)
        }
    }
}

fn try_write(path: &Path, entries: &[ArchiveEntry]) -> Result<usize> {
    let mut writer = ArchiveWriter::create(path)?;
    for entry in entries {
        writer.add(entry)?;
    }
    writer.finish()?;
    Ok(entries.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Read;
    use tempfile::TempDir;

    fn entry(dir: &TempDir, rel: &str, dest: &str, contents: &str) -> ArchiveEntry {
        let source = dir.path().join(rel);
        fs::create_dir_all(source.parent().unwrap()).unwrap();
        fs::write(&source, contents).unwrap();
        ArchiveEntry {
            source,
            dest: dest.to_string(),
        }
    }

    fn archive_names(path: &Path) -> Vec<String> {
        let file = File::open(path).unwrap();
        let mut archive = zip::ZipArchive::new(file).unwrap();
        (0..archive.len())
            .map(|i| archive.by_index(i).unwrap().name().to_string())
            .collect()
    }

    #[test]
    fn test_write_entries_in_order() {
        let dir = TempDir::new().unwrap();
        let entries = vec![
            entry(&dir, "lib/z.txt", "out/z.txt", "z"),
            entry(&dir, "lib/a.txt", "out/a.txt", "a"),
        ];
        let archive_path = dir.path().join("rel.zip");

        let count = write_archive(&archive_path, &entries).unwrap();

        assert_eq!(count, 2);
        // entry order is the resolved order, not sorted
        assert_eq!(archive_names(&archive_path), vec!["out/z.txt", "out/a.txt"]);
    }

    #[test]
    fn test_contents_copied_verbatim() {
        let dir = TempDir::new().unwrap();
        let entries = vec![entry(&dir, "lib/a.txt", "out/a.txt", "payload bytes")];
        let archive_path = dir.path().join("rel.zip");

        write_archive(&archive_path, &entries).unwrap();

        let file = File::open(&archive_path).unwrap();
        let mut archive = zip::ZipArchive::new(file).unwrap();
        let mut contents = String::new();
        archive
            .by_name("out/a.txt")
            .unwrap()
            .read_to_string(&mut contents)
            .unwrap();
        assert_eq!(contents, "payload bytes");
    }

    #[test]
    fn test_empty_entry_list_writes_empty_archive() {
        let dir = TempDir::new().unwrap();
        let archive_path = dir.path().join("rel.zip");

        let count = write_archive(&archive_path, &[]).unwrap();

        assert_eq!(count, 0);
        assert!(archive_names(&archive_path).is_empty());
    }

    #[test]
    fn test_vanished_source_removes_partial_archive() {
        let dir = TempDir::new().unwrap();
        let good = entry(&dir, "lib/a.txt", "out/a.txt", "a");
        let gone = entry(&dir, "lib/b.txt", "out/b.txt", "b");
        fs::remove_file(&gone.source).unwrap();
        let archive_path = dir.path().join("rel.zip");

        let err = write_archive(&archive_path, &[good, gone]).unwrap_err();

        assert!(matches!(err, ArchiveError::MissingSource { .. }));
        assert!(!archive_path.exists());
    }

    #[test]
    fn test_duplicate_destination_still_writes() {
        let dir = TempDir::new().unwrap();
        let first = entry(&dir, "lib/a.txt", "out/same.txt", "first");
        let second = entry(&dir, "lib/b.txt", "out/same.txt", "second");
        let archive_path = dir.path().join("rel.zip");

        let count = write_archive(&archive_path, &[first, second]).unwrap();

        assert_eq!(count, 2);
        assert_eq!(
            archive_names(&archive_path),
            vec!["out/same.txt", "out/same.txt"]
        );
    }
}
