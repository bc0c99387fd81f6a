//! Database connection management.

use std::path::{Path, PathBuf};

use rusqlite::Connection;

use super::error::StoreError;
use super::migrations::run_migrations;

/// Database file name.
const DB_FILE_NAME: &str = "reelbox.db";

/// Opens (or creates) the database and runs migrations.
///
/// - If `dir` is `Some`, uses `{dir}/reelbox.db`.
/// - Otherwise uses `~/.local/share/reelbox/reelbox.db`.
///
/// # Errors
///
/// Returns an error if the directory cannot be created, the database
/// cannot be opened, or migrations fail.
pub fn open_db(dir: Option<&Path>) -> Result<Connection, StoreError> {
    let db_path = resolve_db_path(dir)?;

    if let Some(parent) = db_path.parent() {
        std::fs::create_dir_all(parent).map_err(|source| StoreError::CreateDir {
            path: parent.to_path_buf(),
            source,
        })?;
    }

    let conn = Connection::open(&db_path).map_err(|source| StoreError::Open {
        path: db_path.clone(),
        source,
    })?;

    run_migrations(&conn).map_err(StoreError::Migration)?;
    tracing::debug!(path = %db_path.display(), "database opened");

    Ok(conn)
}

/// Resolves the data directory (parent of the database file).
///
/// # Errors
///
/// Returns an error if `dir` is `None` and `HOME` is not set.
pub fn resolve_data_dir(dir: Option<&Path>) -> Result<PathBuf, StoreError> {
    if let Some(d) = dir {
        return Ok(d.to_path_buf());
    }

    let home = std::env::var("HOME").map_err(|_| StoreError::HomeNotSet)?;
    Ok(PathBuf::from(home)
        .join(".local")
        .join("share")
        .join("reelbox"))
}

/// Resolves the database file path.
fn resolve_db_path(dir: Option<&Path>) -> Result<PathBuf, StoreError> {
    Ok(resolve_data_dir(dir)?.join(DB_FILE_NAME))
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;

    #[test]
    fn test_open_db_in_temp_dir() {
        // Arrange
        let dir = tempfile::tempdir().unwrap();

        // Act
        let conn = open_db(Some(dir.path())).unwrap();

        // Assert
        let version: u32 = conn
            .pragma_query_value(None, "user_version", |row| row.get(0))
            .unwrap();
        assert!(version > 0);
        assert!(dir.path().join("reelbox.db").exists());
    }

    #[test]
    fn test_open_db_creates_missing_directory() {
        // Arrange
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("a").join("b");

        // Act
        let result = open_db(Some(&nested));

        // Assert
        assert!(result.is_ok());
        assert!(nested.join("reelbox.db").exists());
    }

    #[test]
    fn test_resolve_db_path_with_dir() {
        // Arrange
        let dir = PathBuf::from("/tmp/myproject");

        // Act
        let path = resolve_db_path(Some(&dir)).unwrap();

        // Assert
        assert_eq!(path, PathBuf::from("/tmp/myproject/reelbox.db"));
    }

    #[test]
    fn test_resolve_db_path_default() {
        // Arrange & Act
        let path = resolve_db_path(None).unwrap();

        // Assert
        assert!(path.ends_with(".local/share/reelbox/reelbox.db"));
    }
}
