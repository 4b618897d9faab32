//! Flat selections from file and folder pickers.

use super::{Discovery, IngestResult, IngestedItem, SourceFile};
use crate::error::IngestError;
use crate::events::{Event, EventSender, IngestEvent, IngestTrigger};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// A picked file, with the hierarchical path a folder picker attaches
#[derive(Debug, Clone)]
pub struct SelectedFile {
    pub file: SourceFile,
    /// `dir/sub/name.ext` for folder picks, `None` for plain file picks
    pub relative_path: Option<String>,
}

impl SelectedFile {
    pub fn flat(file: SourceFile) -> Self {
        Self {
            file,
            relative_path: None,
        }
    }
}

/// Ingest a picker selection. Every file becomes one file item, keyed by its
/// relative path when it has one and by its name otherwise.
pub fn ingest_selection(
    selected: Vec<SelectedFile>,
    trigger: IngestTrigger,
    events: &EventSender,
) -> IngestResult {
    events.send(Event::Ingest(IngestEvent::Started { trigger }));
    let mut discovery = Discovery::new(events);

    let items = selected
        .into_iter()
        .map(|SelectedFile { file, relative_path }| {
            let relative_path = relative_path
                .filter(|path| !path.is_empty())
                .unwrap_or_else(|| file.name.clone());
            let item = IngestedItem::file(file, relative_path);
            discovery.found(&item);
            item
        })
        .collect::<Vec<_>>();

    discovery.complete(&items);
    IngestResult {
        items,
        errors: Vec::new(),
    }
}

/// Top-level files keyed by name, reporting each one as found
pub(crate) fn flat_items(files: Vec<SourceFile>, discovery: &mut Discovery<'_>) -> Vec<IngestedItem> {
    files
        .into_iter()
        .map(|file| {
            let relative_path = file.name.clone();
            let item = IngestedItem::file(file, relative_path);
            discovery.found(&item);
            item
        })
        .collect()
}

/// A file-picker selection over local paths
pub fn files_from_paths(paths: &[PathBuf]) -> (Vec<SelectedFile>, Vec<IngestError>) {
    let mut selected = Vec::new();
    let mut errors = Vec::new();

    for path in paths {
        match SourceFile::from_path(path) {
            Ok(file) => selected.push(SelectedFile::flat(file)),
            Err(e) => errors.push(e),
        }
    }

    (selected, errors)
}

/// A folder-picker selection: every file below each root, with a relative
/// path that starts at the root directory's own name.
pub fn folders_from_paths(roots: &[PathBuf]) -> (Vec<SelectedFile>, Vec<IngestError>) {
    let mut selected = Vec::new();
    let mut errors = Vec::new();

    for root in roots {
        if !root.is_dir() {
            errors.push(IngestError::NotFound { path: root.clone() });
            continue;
        }

        let root_name = root
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();

        for entry in WalkDir::new(root).sort_by_file_name() {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    let path = e.path().map(Path::to_path_buf).unwrap_or_else(|| root.clone());
                    let source = e
                        .into_io_error()
                        .unwrap_or_else(|| std::io::Error::new(std::io::ErrorKind::Other, "walk failed"));
                    errors.push(IngestError::from_io(path, source));
                    continue;
                }
            };

            if !entry.file_type().is_file() {
                continue;
            }

            match SourceFile::from_path(entry.path()) {
                Ok(file) => {
                    let relative_path = relative_to(root, &root_name, entry.path());
                    selected.push(SelectedFile {
                        file,
                        relative_path: Some(relative_path),
                    });
                }
                Err(e) => errors.push(e),
            }
        }
    }

    (selected, errors)
}

fn relative_to(root: &Path, root_name: &str, path: &Path) -> String {
    let inner = path
        .strip_prefix(root)
        .unwrap_or(path)
        .components()
        .map(|c| c.as_os_str().to_string_lossy().into_owned())
        .collect::<Vec<_>>()
        .join("/");

    if root_name.is_empty() {
        inner
    } else {
        format!("{}/{}", root_name, inner)
    }
}
