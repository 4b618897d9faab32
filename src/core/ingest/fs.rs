//! Filesystem-backed entry tree, so local paths can be "dropped".

use super::tree::{DirectoryReader, DropPayload, EntryKind, TreeEntry};
use super::SourceFile;
use crate::error::IngestError;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::warn;

/// Configuration for filesystem ingestion
#[derive(Debug, Clone)]
pub struct FsIngestConfig {
    /// Children handed out per directory read
    pub batch_size: usize,
}

impl Default for FsIngestConfig {
    fn default() -> Self {
        Self { batch_size: 100 }
    }
}

/// A file or directory on disk
#[derive(Debug, Clone)]
pub struct FsEntry {
    path: PathBuf,
    name: String,
    kind: EntryKind,
    batch_size: usize,
}

impl FsEntry {
    /// Inspect `path` without following a symlinked directory.
    pub fn new(path: &Path, config: &FsIngestConfig) -> Result<Self, IngestError> {
        let metadata =
            fs::symlink_metadata(path).map_err(|e| IngestError::from_io(path.to_path_buf(), e))?;

        let file_type = metadata.file_type();
        let kind = if file_type.is_dir() {
            EntryKind::Directory
        } else if file_type.is_file() {
            EntryKind::File
        } else if file_type.is_symlink() && path.is_file() {
            EntryKind::File
        } else {
            EntryKind::Other
        };

        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());

        Ok(Self {
            path: path.to_path_buf(),
            name,
            kind,
            batch_size: config.batch_size.max(1),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl TreeEntry for FsEntry {
    type Reader = FsDirectoryReader;

    fn name(&self) -> &str {
        &self.name
    }

    fn kind(&self) -> EntryKind {
        self.kind
    }

    fn full_path(&self) -> String {
        self.path.display().to_string()
    }

    fn file(&self) -> Result<SourceFile, IngestError> {
        SourceFile::from_path(&self.path)
    }

    fn create_reader(&self) -> Result<FsDirectoryReader, IngestError> {
        FsDirectoryReader::open(&self.path, self.batch_size)
    }
}

/// Batched directory listing.
///
/// Children are sorted by name when the directory is opened so output order
/// doesn't depend on the filesystem.
pub struct FsDirectoryReader {
    pending: std::vec::IntoIter<FsEntry>,
    batch_size: usize,
}

impl FsDirectoryReader {
    pub fn open(path: &Path, batch_size: usize) -> Result<Self, IngestError> {
        let read_dir = fs::read_dir(path).map_err(|e| IngestError::ReadDirectory {
            path: path.to_path_buf(),
            source: e,
        })?;

        let config = FsIngestConfig { batch_size };
        let mut children = Vec::new();
        for dir_entry in read_dir {
            let child = dir_entry
                .map_err(|e| IngestError::from_io(path.to_path_buf(), e))
                .and_then(|d| FsEntry::new(&d.path(), &config));
            match child {
                Ok(child) => children.push(child),
                Err(e) => warn!(error = %e, "skipping directory child"),
            }
        }
        children.sort_by(|a, b| a.name.cmp(&b.name));

        Ok(Self {
            pending: children.into_iter(),
            batch_size: batch_size.max(1),
        })
    }
}

impl DirectoryReader for FsDirectoryReader {
    type Entry = FsEntry;

    fn read_entries(&mut self) -> Result<Vec<FsEntry>, IngestError> {
        Ok(self.pending.by_ref().take(self.batch_size).collect())
    }
}

/// Build a drop payload from local paths, as if they had been dragged in.
///
/// Paths that can't be inspected are returned as errors; top-level regular
/// files are also listed as raw files for the flat fallback.
pub fn drop_from_paths(
    paths: &[PathBuf],
    config: &FsIngestConfig,
) -> (DropPayload<FsEntry>, Vec<IngestError>) {
    let mut entries = Vec::new();
    let mut files = Vec::new();
    let mut errors = Vec::new();

    for path in paths {
        match FsEntry::new(path, config) {
            Ok(entry) => {
                if entry.kind() == EntryKind::File {
                    if let Ok(file) = entry.file() {
                        files.push(file);
                    }
                }
                entries.push(entry);
            }
            Err(e) => errors.push(e),
        }
    }

    (DropPayload::new(entries, files), errors)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::ingest::{ingest_drop, read_all_entries, IngestedItem};
    use crate::events::null_sender;
    use tempfile::TempDir;

    #[test]
    fn reader_pages_sorted_children() {
        let temp = TempDir::new().unwrap();
        for name in ["c.txt", "a.txt", "b.txt"] {
            fs::write(temp.path().join(name), b"x").unwrap();
        }

        let mut reader = FsDirectoryReader::open(temp.path(), 2).unwrap();
        assert_eq!(reader.read_entries().unwrap().len(), 2);
        assert_eq!(reader.read_entries().unwrap().len(), 1);
        assert!(reader.read_entries().unwrap().is_empty());

        let mut reader = FsDirectoryReader::open(temp.path(), 2).unwrap();
        let names: Vec<_> = read_all_entries(&mut reader)
            .unwrap()
            .iter()
            .map(|e| e.name().to_string())
            .collect();
        assert_eq!(names, vec!["a.txt", "b.txt", "c.txt"]);
    }

    #[test]
    fn dropped_directory_keeps_hierarchy_and_empty_dirs() {
        let temp = TempDir::new().unwrap();
        let root = temp.path().join("Photos");
        fs::create_dir_all(root.join("2023")).unwrap();
        fs::create_dir_all(root.join("Drafts").join("Old")).unwrap();
        fs::write(root.join("2023").join("IMG_01.JPG"), b"jpeg").unwrap();

        let config = FsIngestConfig { batch_size: 1 };
        let (payload, errors) = drop_from_paths(&[root], &config);
        assert!(errors.is_empty());

        let result = ingest_drop(payload, &null_sender());
        let paths: Vec<_> = result.items.iter().map(IngestedItem::relative_path).collect();
        assert_eq!(paths, vec!["Photos/2023/IMG_01.JPG", "Photos/Drafts/Old"]);
        assert!(result.items[1].is_directory());
    }

    #[test]
    fn missing_path_is_an_error() {
        let (payload, errors) =
            drop_from_paths(&[PathBuf::from("/nonexistent/ziplifica")], &FsIngestConfig::default());
        assert!(payload.entries.is_empty());
        assert_eq!(errors.len(), 1);
    }
}
