//! Unpacked output: the archive layout written straight into a directory.

use super::{check_entry_path, ArchiveWriter};
use crate::error::ArchiveError;
use std::fs;
use std::path::{Path, PathBuf};

pub struct DirectoryArchive {
    root: PathBuf,
}

impl DirectoryArchive {
    /// Use `root` as the archive root, creating it if needed
    pub fn create(root: &Path) -> Result<Self, ArchiveError> {
        fs::create_dir_all(root).map_err(|source| ArchiveError::Io {
            path: root.to_path_buf(),
            source,
        })?;
        Ok(Self {
            root: root.to_path_buf(),
        })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn resolve(&self, path: &str) -> Result<PathBuf, ArchiveError> {
        check_entry_path(path)?;
        Ok(path.split('/').filter(|s| !s.is_empty()).fold(self.root.clone(), |acc, s| acc.join(s)))
    }
}

impl ArchiveWriter for DirectoryArchive {
    fn add_file(&mut self, path: &str, bytes: &[u8]) -> Result<(), ArchiveError> {
        let target = self.resolve(path)?;
        if let Some(parent) = target.parent() {
            fs::create_dir_all(parent).map_err(|source| ArchiveError::Io {
                path: parent.to_path_buf(),
                source,
            })?;
        }
        fs::write(&target, bytes).map_err(|source| ArchiveError::Io { path: target, source })
    }

    fn add_directory(&mut self, path: &str) -> Result<(), ArchiveError> {
        let target = self.resolve(path)?;
        fs::create_dir_all(&target).map_err(|source| ArchiveError::Io { path: target, source })
    }
}
