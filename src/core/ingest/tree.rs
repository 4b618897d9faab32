//! Entry-tree traversal for dropped items.
//!
//! Directories are listed through a [`DirectoryReader`] that hands out
//! children in batches. The reader is called until it returns an empty
//! batch; a single call is never assumed to return everything.

use super::selection::flat_items;
use super::{Discovery, IngestResult, IngestedItem, SourceFile};
use crate::error::IngestError;
use crate::events::{Event, EventSender, IngestEvent, IngestTrigger};
use tracing::debug;

/// What an entry in a dropped tree is
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    File,
    Directory,
    /// Anything else (sockets, unfollowed links); ignored
    Other,
}

/// One node of a dropped hierarchy
pub trait TreeEntry: Sized {
    type Reader: DirectoryReader<Entry = Self>;

    /// Entry name without any path
    fn name(&self) -> &str;

    fn kind(&self) -> EntryKind;

    /// Full location, used only for log and error messages
    fn full_path(&self) -> String;

    /// Resolve a file entry to its file handle
    fn file(&self) -> Result<SourceFile, IngestError>;

    /// Open a paginated listing of a directory entry
    fn create_reader(&self) -> Result<Self::Reader, IngestError>;
}

/// Paginated directory listing
pub trait DirectoryReader {
    type Entry;

    /// Next batch of children. An empty batch means the listing is done;
    /// a non-empty one says nothing about whether more follow.
    fn read_entries(&mut self) -> Result<Vec<Self::Entry>, IngestError>;
}

/// Drain a reader, calling it until it yields an empty batch
pub fn read_all_entries<R: DirectoryReader>(reader: &mut R) -> Result<Vec<R::Entry>, IngestError> {
    let mut entries = Vec::new();
    loop {
        let batch = reader.read_entries()?;
        if batch.is_empty() {
            return Ok(entries);
        }
        entries.extend(batch);
    }
}

/// Everything a drop carries: tree entries when the host exposes them,
/// and the raw top-level files either way.
#[derive(Debug)]
pub struct DropPayload<E> {
    pub entries: Vec<E>,
    pub files: Vec<SourceFile>,
}

impl<E> DropPayload<E> {
    pub fn new(entries: Vec<E>, files: Vec<SourceFile>) -> Self {
        Self { entries, files }
    }
}

/// Ingest a drop.
///
/// Walks the entry trees depth first. Without tree entries, or when the
/// walk produced nothing while raw files are present, the raw files are
/// taken as flat top-level files instead.
pub fn ingest_drop<E: TreeEntry>(payload: DropPayload<E>, events: &EventSender) -> IngestResult {
    events.send(Event::Ingest(IngestEvent::Started {
        trigger: IngestTrigger::Drop,
    }));

    let DropPayload { entries, files } = payload;
    let mut discovery = Discovery::new(events);

    let mut result = if entries.is_empty() {
        IngestResult::default()
    } else {
        traverse(entries, &mut discovery)
    };

    if result.items.is_empty() && !files.is_empty() {
        debug!(count = files.len(), "entry tree empty, using raw dropped files");
        result.items = flat_items(files, &mut discovery);
    }

    discovery.complete(&result.items);
    result
}

fn traverse<E: TreeEntry>(entries: Vec<E>, discovery: &mut Discovery<'_>) -> IngestResult {
    let mut result = IngestResult::default();

    // Reversed so popping yields entries in their original order.
    let mut stack: Vec<(E, String)> = entries
        .into_iter()
        .rev()
        .map(|entry| (entry, String::new()))
        .collect();

    while let Some((entry, prefix)) = stack.pop() {
        match entry.kind() {
            EntryKind::File => match entry.file() {
                Ok(file) => {
                    let relative_path = join(&prefix, &file.name);
                    let item = IngestedItem::file(file, relative_path);
                    discovery.found(&item);
                    result.items.push(item);
                }
                Err(error) => {
                    discovery.skipped(entry.full_path(), &error);
                    result.errors.push(error);
                }
            },
            EntryKind::Directory => {
                let path = join(&prefix, entry.name());
                let children = entry
                    .create_reader()
                    .and_then(|mut reader| read_all_entries(&mut reader));

                match children {
                    Ok(children) if children.is_empty() => {
                        let item = IngestedItem::empty_directory(path);
                        discovery.found(&item);
                        result.items.push(item);
                    }
                    Ok(children) => {
                        for child in children.into_iter().rev() {
                            stack.push((child, path.clone()));
                        }
                    }
                    Err(error) => {
                        discovery.skipped(entry.full_path(), &error);
                        result.errors.push(error);
                    }
                }
            }
            EntryKind::Other => {
                debug!(path = %entry.full_path(), "ignoring entry that is neither file nor directory");
            }
        }
    }

    result
}

fn join(prefix: &str, name: &str) -> String {
    if prefix.is_empty() {
        name.to_string()
    } else {
        format!("{}/{}", prefix, name)
    }
}
