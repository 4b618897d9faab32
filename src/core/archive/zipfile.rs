//! ZIP output using the `zip` crate.

use super::{check_entry_path, ArchiveWriter};
use crate::error::ArchiveError;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use tracing::debug;
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

/// Writes a `.zip` next to its destination and renames it into place on
/// [`finish`](ZipArchive::finish). Dropping it unfinished leaves nothing behind.
pub struct ZipArchive {
    writer: ZipWriter<NamedTempFile>,
    destination: PathBuf,
    options: SimpleFileOptions,
}

impl ZipArchive {
    pub fn create(destination: &Path) -> Result<Self, ArchiveError> {
        let parent = match destination.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        };
        let temp = NamedTempFile::new_in(&parent).map_err(|source| ArchiveError::Io {
            path: parent.clone(),
            source,
        })?;

        Ok(Self {
            writer: ZipWriter::new(temp),
            destination: destination.to_path_buf(),
            options: SimpleFileOptions::default()
                .compression_method(CompressionMethod::Deflated)
                .unix_permissions(0o644),
        })
    }

    /// Write the central directory and move the archive to its destination
    pub fn finish(self) -> Result<PathBuf, ArchiveError> {
        let temp = self.writer.finish().map_err(|e| ArchiveError::Write {
            path: self.destination.display().to_string(),
            reason: e.to_string(),
        })?;
        temp.persist(&self.destination).map_err(|e| ArchiveError::Io {
            path: self.destination.clone(),
            source: e.error,
        })?;
        debug!(path = %self.destination.display(), "Archive written");
        Ok(self.destination)
    }
}

impl ArchiveWriter for ZipArchive {
    fn add_file(&mut self, path: &str, bytes: &[u8]) -> Result<(), ArchiveError> {
        check_entry_path(path)?;
        let to_error = |reason: String| ArchiveError::Write {
            path: path.to_string(),
            reason,
        };
        self.writer
            .start_file(path, self.options)
            .map_err(|e| to_error(e.to_string()))?;
        self.writer.write_all(bytes).map_err(|e| to_error(e.to_string()))
    }

    fn add_directory(&mut self, path: &str) -> Result<(), ArchiveError> {
        check_entry_path(path)?;
        self.writer
            .add_directory(path, self.options.unix_permissions(0o755))
            .map_err(|e| ArchiveError::Write {
                path: path.to_string(),
                reason: e.to_string(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::File;
    use std::io::Read;
    use tempfile::TempDir;

    #[test]
    fn writes_files_and_directories() {
        let dir = TempDir::new().unwrap();
        let destination = dir.path().join("out.zip");

        let mut archive = ZipArchive::create(&destination).unwrap();
        archive.add_file("PDF/report.pdf", b"%PDF-1.7").unwrap();
        archive.add_directory("DIRECTORIES/Drafts/Old").unwrap();
        let written = archive.finish().unwrap();
        assert_eq!(written, destination);

        let mut zip = zip::ZipArchive::new(File::open(&destination).unwrap()).unwrap();
        assert_eq!(zip.len(), 2);

        let mut content = String::new();
        zip.by_name("PDF/report.pdf").unwrap().read_to_string(&mut content).unwrap();
        assert_eq!(content, "%PDF-1.7");
        assert!(zip.by_name("DIRECTORIES/Drafts/Old/").unwrap().is_dir());
    }

    #[test]
    fn unfinished_archive_leaves_no_file() {
        let dir = TempDir::new().unwrap();
        let destination = dir.path().join("never.zip");
        {
            let mut archive = ZipArchive::create(&destination).unwrap();
            archive.add_file("a.txt", b"a").unwrap();
        }
        assert!(!destination.exists());
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
    }

    #[test]
    fn rejects_escaping_paths() {
        let dir = TempDir::new().unwrap();
        let mut archive = ZipArchive::create(&dir.path().join("x.zip")).unwrap();
        assert!(archive.add_file("../x.txt", b"x").is_err());
    }
}
