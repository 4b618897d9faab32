//! In-memory archive writer for testing.

use super::{check_entry_path, ArchiveWriter};
use crate::error::ArchiveError;
use std::collections::HashSet;

/// Records entries instead of writing them
#[derive(Debug, Default)]
pub struct InMemoryArchive {
    pub files: Vec<(String, Vec<u8>)>,
    pub directories: Vec<String>,
    fail_on: HashSet<String>,
}

impl InMemoryArchive {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make writes to `path` fail
    pub fn fail_on(mut self, path: impl Into<String>) -> Self {
        self.fail_on.insert(path.into());
        self
    }

    pub fn file(&self, path: &str) -> Option<&[u8]> {
        self.files
            .iter()
            .find(|(p, _)| p == path)
            .map(|(_, bytes)| bytes.as_slice())
    }

    pub fn paths(&self) -> Vec<&str> {
        self.files.iter().map(|(p, _)| p.as_str()).collect()
    }
}

impl ArchiveWriter for InMemoryArchive {
    fn add_file(&mut self, path: &str, bytes: &[u8]) -> Result<(), ArchiveError> {
        check_entry_path(path)?;
        if self.fail_on.contains(path) {
            return Err(ArchiveError::Write {
                path: path.to_string(),
                reason: "simulated failure".to_string(),
            });
        }
        self.files.push((path.to_string(), bytes.to_vec()));
        Ok(())
    }

    fn add_directory(&mut self, path: &str) -> Result<(), ArchiveError> {
        check_entry_path(path)?;
        self.directories.push(path.to_string());
        Ok(())
    }
}
