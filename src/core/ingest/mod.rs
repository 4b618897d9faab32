//! # Ingest Module
//!
//! Turns one user action (a drop, a file pick or a folder pick) into a flat,
//! ordered Working Set of files and empty-directory markers.
//!
//! ## Sources
//! - `tree` - entry-tree traversal with paginated directory reads (drops)
//! - `selection` - flat file lists, optionally carrying relative paths (pickers)
//! - `fs` - filesystem implementations of both
//!
//! Empty-directory markers only ever come from entry-tree traversal; flat
//! selections have no way to see an empty directory.

mod bytes;
mod fs;
mod selection;
mod tree;
mod workspace;

pub use bytes::{ByteSource, FsByteSource, InMemoryBytes};
pub use fs::{drop_from_paths, FsDirectoryReader, FsEntry, FsIngestConfig};
pub use selection::{files_from_paths, folders_from_paths, ingest_selection, SelectedFile};
pub use tree::{ingest_drop, read_all_entries, DirectoryReader, DropPayload, EntryKind, TreeEntry};
pub use workspace::{IngestTicket, Workspace};

use crate::core::classify::{extension_of, mime_for_extension};
use crate::error::IngestError;
use crate::events::{Event, EventSender, IngestEvent};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::SystemTime;

/// Handle to one user-supplied file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceFile {
    /// Original file name including extension
    pub name: String,
    /// Size in bytes
    pub size: u64,
    /// Last modified time; `None` is treated as "now" when dates are needed
    pub modified: Option<SystemTime>,
    /// Best-effort MIME type, empty when unknown
    pub mime_type: String,
    /// Where the bytes live, as understood by a [`ByteSource`]
    pub location: PathBuf,
}

impl SourceFile {
    /// A file with no timestamp and a MIME type guessed from its extension
    pub fn new(name: impl Into<String>, size: u64, location: impl Into<PathBuf>) -> Self {
        let name = name.into();
        let mime_type = mime_for_extension(&extension_of(&name)).to_string();
        Self {
            name,
            size,
            modified: None,
            mime_type,
            location: location.into(),
        }
    }

    pub fn with_modified(mut self, modified: SystemTime) -> Self {
        self.modified = Some(modified);
        self
    }

    /// Describe a file on disk
    pub fn from_path(path: &Path) -> Result<Self, IngestError> {
        let metadata =
            std::fs::metadata(path).map_err(|e| IngestError::from_io(path.to_path_buf(), e))?;
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());

        let mut file = Self::new(name, metadata.len(), path);
        file.modified = metadata.modified().ok();
        Ok(file)
    }
}

/// A file together with its position in the dropped/selected hierarchy
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileEntry {
    pub file: SourceFile,
    /// `/`-separated, never starting with `/`; equals `file.name` for top-level files
    pub relative_path: String,
}

impl FileEntry {
    /// Directory part of `relative_path`, empty for top-level files
    pub fn relative_dir(&self) -> &str {
        match self.relative_path.rfind('/') {
            Some(idx) => &self.relative_path[..idx],
            None => "",
        }
    }
}

/// A directory that had no children when it was traversed
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmptyDirectoryEntry {
    pub relative_path: String,
}

/// One element of a Working Set
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum IngestedItem {
    File(FileEntry),
    EmptyDirectory(EmptyDirectoryEntry),
}

impl IngestedItem {
    pub fn file(file: SourceFile, relative_path: impl Into<String>) -> Self {
        IngestedItem::File(FileEntry {
            file,
            relative_path: relative_path.into(),
        })
    }

    pub fn empty_directory(relative_path: impl Into<String>) -> Self {
        IngestedItem::EmptyDirectory(EmptyDirectoryEntry {
            relative_path: relative_path.into(),
        })
    }

    pub fn relative_path(&self) -> &str {
        match self {
            IngestedItem::File(entry) => &entry.relative_path,
            IngestedItem::EmptyDirectory(entry) => &entry.relative_path,
        }
    }

    pub fn is_directory(&self) -> bool {
        matches!(self, IngestedItem::EmptyDirectory(_))
    }
}

/// What the Working Set currently allows
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WorkingSetStatus {
    /// Nothing ingested yet
    Waiting,
    /// Only empty-directory markers
    OnlyEmptyDirectories,
    /// At least one file
    Ready,
}

/// Flat, ordered result of one ingestion pass
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkingSet {
    items: Vec<IngestedItem>,
}

impl WorkingSet {
    pub fn new(items: Vec<IngestedItem>) -> Self {
        Self { items }
    }

    pub fn items(&self) -> &[IngestedItem] {
        &self.items
    }

    pub fn files(&self) -> impl Iterator<Item = &FileEntry> {
        self.items.iter().filter_map(|item| match item {
            IngestedItem::File(entry) => Some(entry),
            IngestedItem::EmptyDirectory(_) => None,
        })
    }

    pub fn empty_directories(&self) -> impl Iterator<Item = &EmptyDirectoryEntry> {
        self.items.iter().filter_map(|item| match item {
            IngestedItem::EmptyDirectory(entry) => Some(entry),
            IngestedItem::File(_) => None,
        })
    }

    pub fn file_count(&self) -> usize {
        self.files().count()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn status(&self) -> WorkingSetStatus {
        if self.files().next().is_some() {
            WorkingSetStatus::Ready
        } else if self.items.is_empty() {
            WorkingSetStatus::Waiting
        } else {
            WorkingSetStatus::OnlyEmptyDirectories
        }
    }
}

/// Output of an ingestion pass: the items plus whatever was skipped
#[derive(Debug, Default)]
pub struct IngestResult {
    pub items: Vec<IngestedItem>,
    /// Entries that could not be read. Never fatal.
    pub errors: Vec<IngestError>,
}

impl IngestResult {
    pub fn into_working_set(self) -> WorkingSet {
        WorkingSet::new(self.items)
    }
}

/// Running discovery counter that reports each leaf as it is found
pub(crate) struct Discovery<'a> {
    events: &'a EventSender,
    discovered: usize,
    skipped: usize,
}

impl<'a> Discovery<'a> {
    pub(crate) fn new(events: &'a EventSender) -> Self {
        Self {
            events,
            discovered: 0,
            skipped: 0,
        }
    }

    pub(crate) fn found(&mut self, item: &IngestedItem) {
        self.discovered += 1;
        self.events.send(Event::Ingest(IngestEvent::ItemFound {
            relative_path: item.relative_path().to_string(),
            is_directory: item.is_directory(),
            discovered: self.discovered,
        }));
    }

    pub(crate) fn skipped(&mut self, path: String, error: &IngestError) {
        self.skipped += 1;
        tracing::warn!(%path, %error, "skipping unreadable entry");
        self.events.send(Event::Ingest(IngestEvent::Skipped {
            path,
            message: error.to_string(),
        }));
    }

    pub(crate) fn complete(&self, items: &[IngestedItem]) {
        let empty_directories = items.iter().filter(|item| item.is_directory()).count();
        let files = items.len() - empty_directories;
        tracing::info!(files, empty_directories, skipped = self.skipped, "ingestion finished");
        self.events.send(Event::Ingest(IngestEvent::Completed {
            files,
            empty_directories,
            skipped: self.skipped,
        }));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn file(name: &str) -> SourceFile {
        SourceFile::new(name, 10, format!("/mem/{name}"))
    }

    #[test]
    fn status_reflects_contents() {
        assert_eq!(WorkingSet::default().status(), WorkingSetStatus::Waiting);

        let dirs_only = WorkingSet::new(vec![IngestedItem::empty_directory("Drafts/Old")]);
        assert_eq!(dirs_only.status(), WorkingSetStatus::OnlyEmptyDirectories);

        let ready = WorkingSet::new(vec![
            IngestedItem::empty_directory("Drafts/Old"),
            IngestedItem::file(file("a.txt"), "a.txt"),
        ]);
        assert_eq!(ready.status(), WorkingSetStatus::Ready);
        assert_eq!(ready.file_count(), 1);
        assert_eq!(ready.empty_directories().count(), 1);
    }

    #[test]
    fn relative_dir_of_nested_and_top_level() {
        let nested = FileEntry {
            file: file("IMG_01.JPG"),
            relative_path: "Photos/2023/IMG_01.JPG".to_string(),
        };
        assert_eq!(nested.relative_dir(), "Photos/2023");

        let top = FileEntry {
            file: file("a.txt"),
            relative_path: "a.txt".to_string(),
        };
        assert_eq!(top.relative_dir(), "");
    }

    #[test]
    fn new_source_file_guesses_mime() {
        assert_eq!(file("scan.PDF").mime_type, "application/pdf");
        assert_eq!(file("blob.bin").mime_type, "");
    }
}
