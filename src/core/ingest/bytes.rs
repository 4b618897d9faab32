//! Byte access for ingested files.

use super::SourceFile;
use std::collections::HashMap;
use std::io;
use std::path::PathBuf;
use std::sync::RwLock;

/// Reads the full content of a [`SourceFile`]
pub trait ByteSource: Send + Sync {
    fn read(&self, file: &SourceFile) -> io::Result<Vec<u8>>;

    /// Content as UTF-8 text
    fn read_to_string(&self, file: &SourceFile) -> io::Result<String> {
        let bytes = self.read(file)?;
        String::from_utf8(bytes).map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))
    }
}

/// Reads files from their on-disk location
#[derive(Debug, Default, Clone, Copy)]
pub struct FsByteSource;

impl ByteSource for FsByteSource {
    fn read(&self, file: &SourceFile) -> io::Result<Vec<u8>> {
        std::fs::read(&file.location)
    }
}

/// Content keyed by location, for tests and previews
#[derive(Default)]
pub struct InMemoryBytes {
    contents: RwLock<HashMap<PathBuf, Vec<u8>>>,
}

impl InMemoryBytes {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&self, location: impl Into<PathBuf>, bytes: impl Into<Vec<u8>>) {
        if let Ok(mut contents) = self.contents.write() {
            contents.insert(location.into(), bytes.into());
        }
    }
}

impl ByteSource for InMemoryBytes {
    fn read(&self, file: &SourceFile) -> io::Result<Vec<u8>> {
        let contents = self
            .contents
            .read()
            .map_err(|_| io::Error::new(io::ErrorKind::Other, "byte store poisoned"))?;

        contents.get(&file.location).cloned().ok_or_else(|| {
            io::Error::new(
                io::ErrorKind::NotFound,
                format!("no content for {}", file.location.display()),
            )
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn memory_source_reads_inserted_content() {
        let bytes = InMemoryBytes::new();
        bytes.insert("/mem/package.json", br#"{"name":"demo"}"#.to_vec());

        let file = SourceFile::new("package.json", 15, "/mem/package.json");
        assert_eq!(bytes.read_to_string(&file).unwrap(), r#"{"name":"demo"}"#);
    }

    #[test]
    fn memory_source_reports_missing_as_not_found() {
        let bytes = InMemoryBytes::new();
        let file = SourceFile::new("gone.txt", 0, "/mem/gone.txt");
        assert_eq!(bytes.read(&file).unwrap_err().kind(), io::ErrorKind::NotFound);
    }

    #[test]
    fn invalid_utf8_is_invalid_data() {
        let bytes = InMemoryBytes::new();
        bytes.insert("/mem/bin", vec![0xff, 0xfe]);
        let file = SourceFile::new("bin", 2, "/mem/bin");
        assert_eq!(
            bytes.read_to_string(&file).unwrap_err().kind(),
            io::ErrorKind::InvalidData
        );
    }
}
