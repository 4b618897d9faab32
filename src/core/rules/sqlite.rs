//! SQLite key-value store for persistent settings.

use super::KeyValueStore;
use crate::error::StoreError;
use rusqlite::{params, Connection};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

/// SQLite-backed settings store
pub struct SqliteStore {
    conn: Mutex<Connection>,
    db_path: PathBuf,
}

impl SqliteStore {
    /// Open or create a settings database at the given path
    pub fn open(path: &Path) -> Result<Self, StoreError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| StoreError::OpenFailed {
                path: path.to_path_buf(),
                reason: e.to_string(),
            })?;
        }

        let conn = Connection::open(path).map_err(|e| StoreError::OpenFailed {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        conn.execute(
            "CREATE TABLE IF NOT EXISTS settings (
                namespace TEXT PRIMARY KEY,
                value TEXT NOT NULL
            )",
            [],
        )
        .map_err(|e| StoreError::QueryFailed(e.to_string()))?;

        Ok(Self {
            conn: Mutex::new(conn),
            db_path: path.to_path_buf(),
        })
    }

    /// Default location: `<config dir>/ziplifica/settings.db`
    pub fn default_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("ziplifica")
            .join("settings.db")
    }
}

impl KeyValueStore for SqliteStore {
    fn get(&self, namespace: &str) -> Result<Option<String>, StoreError> {
        let conn = self.conn.lock().map_err(|_| StoreError::Corrupted {
            path: self.db_path.clone(),
        })?;

        let result = conn.query_row(
            "SELECT value FROM settings WHERE namespace = ?",
            [namespace],
            |row| row.get::<_, String>(0),
        );

        match result {
            Ok(value) => Ok(Some(value)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(StoreError::QueryFailed(e.to_string())),
        }
    }

    fn set(&self, namespace: &str, value: &str) -> Result<(), StoreError> {
        let conn = self.conn.lock().map_err(|_| StoreError::Corrupted {
            path: self.db_path.clone(),
        })?;

        conn.execute(
            "INSERT OR REPLACE INTO settings (namespace, value) VALUES (?, ?)",
            params![namespace, value],
        )
        .map_err(|e| StoreError::QueryFailed(e.to_string()))?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn values_survive_reopen() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("settings.db");

        {
            let store = SqliteStore::open(&path).unwrap();
            store.set("ziplifica-custom-rules", r#"{"psd":"DESIGN"}"#).unwrap();
        }

        let store = SqliteStore::open(&path).unwrap();
        assert_eq!(
            store.get("ziplifica-custom-rules").unwrap().as_deref(),
            Some(r#"{"psd":"DESIGN"}"#)
        );
        assert_eq!(store.get("other").unwrap(), None);
    }
}
