//! Event type definitions for progress reporting.

use serde::{Deserialize, Serialize};

/// All events emitted by the engine
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Event {
    /// Drop / picker ingestion
    Ingest(IngestEvent),
    /// Archive generation
    Archive(ArchiveEvent),
}

/// Which trigger produced an ingestion pass
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IngestTrigger {
    /// Drag-and-drop of an entry tree
    Drop,
    /// Flat file picker
    FilePicker,
    /// Folder picker carrying relative paths
    FolderPicker,
}

/// Events during ingestion
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum IngestEvent {
    Started { trigger: IngestTrigger },
    /// A leaf file or an empty directory was discovered
    ItemFound {
        relative_path: String,
        is_directory: bool,
        /// Running count of discovered items, starting at 1
        discovered: usize,
    },
    /// An entry could not be read and was left out
    Skipped { path: String, message: String },
    Completed {
        files: usize,
        empty_directories: usize,
        skipped: usize,
    },
}

/// Events during archive generation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum ArchiveEvent {
    Started {
        total_files: usize,
        total_directories: usize,
    },
    EntryWritten {
        path: String,
        completed: usize,
        total: usize,
    },
    /// Reading the file's bytes failed; it is excluded from the archive
    EntryFailed { name: String, message: String },
    Completed {
        files_written: usize,
        directories_written: usize,
        failed: usize,
    },
}

impl std::fmt::Display for IngestTrigger {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            IngestTrigger::Drop => write!(f, "dropped items"),
            IngestTrigger::FilePicker => write!(f, "selected files"),
            IngestTrigger::FolderPicker => write!(f, "selected folders"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn events_are_serializable() {
        let event = Event::Archive(ArchiveEvent::EntryFailed {
            name: "broken.pdf".to_string(),
            message: "permission denied".to_string(),
        });

        let json = serde_json::to_string(&event).unwrap();
        let back: Event = serde_json::from_str(&json).unwrap();

        match back {
            Event::Archive(ArchiveEvent::EntryFailed { name, .. }) => assert_eq!(name, "broken.pdf"),
            other => panic!("unexpected event: {other:?}"),
        }
    }

    #[test]
    fn trigger_uses_snake_case() {
        let json = serde_json::to_string(&IngestTrigger::FolderPicker).unwrap();
        assert_eq!(json, "\"folder_picker\"");
    }
}
