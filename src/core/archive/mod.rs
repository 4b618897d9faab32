//! # Archive Module
//!
//! Writes a resolved plan out as an archive.
//!
//! A plan is reduced to an [`ArchiveManifest`]: `(source file, target path)`
//! pairs plus empty-directory paths. The [`ArchiveBuilder`] reads each
//! file through a [`ByteSource`](crate::core::ingest::ByteSource) and hands
//! it to an [`ArchiveWriter`].
//!
//! ## Writers
//! - `ZipArchive` - a `.zip` file, written to a temp file and moved into place
//! - `DirectoryArchive` - the same layout unpacked into a directory
//! - `InMemoryArchive` - for testing

mod builder;
mod directory;
mod memory;
mod zipfile;

pub use builder::{ArchiveBuilder, ArchiveReport};
pub use directory::DirectoryArchive;
pub use memory::InMemoryArchive;
pub use zipfile::ZipArchive;

use crate::core::ingest::SourceFile;
use crate::error::ArchiveError;
use serde::{Deserialize, Serialize};

/// Default archive name in organize mode
pub const DEFAULT_ARCHIVE_NAME: &str = "ziplifica.zip";

/// One file to write
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArchiveEntry {
    pub source: SourceFile,
    /// `/`-separated path inside the archive
    pub target_path: String,
}

/// Everything an archive should contain
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArchiveManifest {
    pub files: Vec<ArchiveEntry>,
    /// Empty directories, `/`-separated, no trailing slash
    pub directories: Vec<String>,
}

impl ArchiveManifest {
    pub fn is_empty(&self) -> bool {
        self.files.is_empty() && self.directories.is_empty()
    }
}

/// Sink for archive entries
pub trait ArchiveWriter {
    fn add_file(&mut self, path: &str, bytes: &[u8]) -> Result<(), ArchiveError>;

    fn add_directory(&mut self, path: &str) -> Result<(), ArchiveError>;
}

/// Reject paths that would escape the archive root.
///
/// A backslash is an ordinary file-name character on Unix, but some
/// extractors treat it as a separator, so it counts as one when looking for
/// `..` segments or a leading root.
pub(crate) fn check_entry_path(path: &str) -> Result<(), ArchiveError> {
    let escapes = path.starts_with(['/', '\\'])
        || path.split(['/', '\\']).any(|segment| segment == "..");
    if path.is_empty() || escapes {
        return Err(ArchiveError::Write {
            path: path.to_string(),
            reason: "entry path must be relative and stay inside the archive".to_string(),
        });
    }
    Ok(())
}
