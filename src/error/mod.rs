//! # Error Module
//!
//! Error types for ingestion, rule persistence and archive generation.
//!
//! ## Design Principles
//! - **Never panic** on user data - return errors instead
//! - **Include context** - paths and file names travel with the error
//! - **Per-item failures are not fatal** - they are collected into result
//!   structs and only whole-operation failures surface as `Err`

use std::path::PathBuf;
use thiserror::Error;

/// Top-level application error
#[derive(Error, Debug)]
pub enum ZiplificaError {
    #[error("Ingestion error: {0}")]
    Ingest(#[from] IngestError),

    #[error("Settings store error: {0}")]
    Store(#[from] StoreError),

    #[error("Custom rule error: {0}")]
    Rule(#[from] RuleError),

    #[error("Archive error: {0}")]
    Archive(#[from] ArchiveError),

    #[error("Configuration error: {0}")]
    Config(String),
}

/// Errors raised while turning a drop or selection into a Working Set
#[derive(Error, Debug)]
pub enum IngestError {
    #[error("Path not found: {path}")]
    NotFound { path: PathBuf },

    #[error("Permission denied accessing: {path}")]
    PermissionDenied { path: PathBuf },

    #[error("Failed to read {path}: {source}")]
    ReadEntry {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to list directory {path}: {source}")]
    ReadDirectory {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("A newer selection replaced this one before it finished loading")]
    Superseded,
}

impl IngestError {
    /// Map an I/O failure on `path` to the most specific variant.
    pub fn from_io(path: PathBuf, source: std::io::Error) -> Self {
        match source.kind() {
            std::io::ErrorKind::NotFound => IngestError::NotFound { path },
            std::io::ErrorKind::PermissionDenied => IngestError::PermissionDenied { path },
            _ => IngestError::ReadEntry { path, source },
        }
    }
}

/// Errors from the key-value settings store
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Failed to open settings database at {path}: {reason}")]
    OpenFailed { path: PathBuf, reason: String },

    #[error("Settings query failed: {0}")]
    QueryFailed(String),

    #[error("Settings store corruption detected at {path}. Delete this file and try again.")]
    Corrupted { path: PathBuf },

    #[error("Failed to serialize settings: {0}")]
    Serialization(String),
}

/// Errors from adding or removing custom extension rules
#[derive(Error, Debug)]
pub enum RuleError {
    #[error("Extension must not be empty")]
    EmptyExtension,

    #[error("Folder name must not be empty")]
    EmptyFolder,

    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Errors while assembling an archive
#[derive(Error, Debug)]
pub enum ArchiveError {
    #[error("Failed to read {name}: {source}")]
    Read {
        name: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write archive entry {path}: {reason}")]
    Write { path: String, reason: String },

    #[error("Failed to create {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Nothing could be added to the archive")]
    Empty,
}

/// Convenience Result type alias
pub type Result<T> = std::result::Result<T, ZiplificaError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ingest_error_includes_path() {
        let error = IngestError::ReadDirectory {
            path: PathBuf::from("/drop/Drafts"),
            source: std::io::Error::new(std::io::ErrorKind::Other, "device gone"),
        };
        let message = error.to_string();
        assert!(message.contains("/drop/Drafts"));
        assert!(message.contains("device gone"));
    }

    #[test]
    fn io_not_found_maps_to_not_found() {
        let error = IngestError::from_io(
            PathBuf::from("/missing.txt"),
            std::io::Error::new(std::io::ErrorKind::NotFound, "gone"),
        );
        assert!(matches!(error, IngestError::NotFound { .. }));
    }

    #[test]
    fn store_error_suggests_recovery() {
        let error = StoreError::Corrupted {
            path: PathBuf::from("/config/settings.db"),
        };
        assert!(error.to_string().contains("Delete this file"));
    }

    #[test]
    fn rule_error_wraps_store_error() {
        let error: ZiplificaError =
            RuleError::from(StoreError::QueryFailed("locked".to_string())).into();
        assert!(error.to_string().contains("locked"));
    }
}
