//! Streams a manifest through an archive writer.

use super::{ArchiveManifest, ArchiveWriter};
use crate::core::ingest::ByteSource;
use crate::error::ArchiveError;
use crate::events::{ArchiveEvent, Event, EventSender};
use serde::Serialize;
use std::time::Instant;
use tracing::{info, warn};

/// Outcome of one archive run
#[derive(Debug, Clone, Default, Serialize)]
pub struct ArchiveReport {
    pub files_written: usize,
    pub directories_written: usize,
    /// Names of files that could not be read or written
    pub failed: Vec<String>,
    pub duration_ms: u64,
}

impl ArchiveReport {
    pub fn has_failures(&self) -> bool {
        !self.failed.is_empty()
    }

    /// Short status line: `ZIP pronto` or `ZIP pronto (2 falharam)`
    pub fn status(&self) -> String {
        if self.has_failures() {
            format!("ZIP pronto ({} falharam)", self.failed.len())
        } else {
            "ZIP pronto".to_string()
        }
    }
}

pub struct ArchiveBuilder;

impl ArchiveBuilder {
    /// Write every file and directory in `manifest` to `writer`.
    ///
    /// A file that cannot be read, or that the writer refuses, is logged,
    /// reported as `EntryFailed` and left out; the run continues. A directory
    /// marker the writer refuses is logged and skipped. If nothing at all was
    /// written the result is [`ArchiveError::Empty`]. Creating and finishing
    /// the sink are the caller's job and are where fatal errors surface.
    pub fn build<W: ArchiveWriter + ?Sized>(
        manifest: &ArchiveManifest,
        bytes: &dyn ByteSource,
        writer: &mut W,
        events: &EventSender,
    ) -> Result<ArchiveReport, ArchiveError> {
        let start = Instant::now();
        let total = manifest.files.len();
        let mut report = ArchiveReport::default();

        events.send(Event::Archive(ArchiveEvent::Started {
            total_files: total,
            total_directories: manifest.directories.len(),
        }));

        for (i, entry) in manifest.files.iter().enumerate() {
            let written = bytes
                .read(&entry.source)
                .map_err(|source| ArchiveError::Read {
                    name: entry.source.name.clone(),
                    source,
                })
                .and_then(|content| writer.add_file(&entry.target_path, &content));

            if let Err(error) = written {
                warn!(file = %entry.source.name, %error, "Could not add file, leaving it out");
                events.send(Event::Archive(ArchiveEvent::EntryFailed {
                    name: entry.source.name.clone(),
                    message: error.to_string(),
                }));
                report.failed.push(entry.source.name.clone());
                continue;
            }

            report.files_written += 1;
            events.send(Event::Archive(ArchiveEvent::EntryWritten {
                path: entry.target_path.clone(),
                completed: i + 1,
                total,
            }));
        }

        for directory in &manifest.directories {
            match writer.add_directory(directory) {
                Ok(()) => report.directories_written += 1,
                Err(error) => warn!(%directory, %error, "Could not add empty directory, skipping"),
            }
        }

        report.duration_ms = start.elapsed().as_millis() as u64;
        events.send(Event::Archive(ArchiveEvent::Completed {
            files_written: report.files_written,
            directories_written: report.directories_written,
            failed: report.failed.len(),
        }));

        if report.files_written == 0 && report.directories_written == 0 {
            return Err(ArchiveError::Empty);
        }

        info!(
            files = report.files_written,
            directories = report.directories_written,
            failed = report.failed.len(),
            "Archive assembled"
        );
        Ok(report)
    }
}
