//! Schema version management using `PRAGMA user_version`.

use rusqlite::Connection;

/// Current schema version.
const CURRENT_VERSION: u32 = 1;

/// Runs database migrations up to `CURRENT_VERSION`.
///
/// # Errors
///
/// Returns an error if any SQL statement fails.
pub fn run_migrations(conn: &Connection) -> rusqlite::Result<()> {
    let version: u32 = conn.pragma_query_value(None, "user_version", |row| row.get(0))?;

    if version < 1 {
        migrate_v1(conn)?;
        tracing::info!(version = 1, "database schema migrated");
    }

    conn.pragma_update(None, "user_version", CURRENT_VERSION)?;

    Ok(())
}

/// Migration to v1: create the `saved_titles` table.
///
/// `row_id` is the record identity; the catalog `id` is not unique.
fn migrate_v1(conn: &Connection) -> rusqlite::Result<()> {
    conn.execute_batch(
        "CREATE TABLE IF NOT EXISTS saved_titles (
            row_id          INTEGER PRIMARY KEY AUTOINCREMENT,
            id              INTEGER NOT NULL,
            original_title  TEXT,
            original_name   TEXT,
            overview        TEXT,
            media_type      TEXT,
            poster_path     TEXT,
            release_date    TEXT,
            vote_count      INTEGER NOT NULL DEFAULT 0,
            vote_average    REAL NOT NULL DEFAULT 0,
            saved_at        TEXT NOT NULL DEFAULT CURRENT_TIMESTAMP
        );",
    )
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;

    #[test]
    fn test_migrations_are_idempotent() {
        // Arrange
        let conn = Connection::open_in_memory().unwrap();

        // Act
        run_migrations(&conn).unwrap();
        run_migrations(&conn).unwrap();

        // Assert
        let version: u32 = conn
            .pragma_query_value(None, "user_version", |row| row.get(0))
            .unwrap();
        assert_eq!(version, CURRENT_VERSION);
        let count: i64 = conn
            .query_row(
                "SELECT COUNT(*) FROM sqlite_master WHERE type = 'table' AND name = 'saved_titles'",
                [],
                |row| row.get(0),
            )
            .unwrap();
        assert_eq!(count, 1);
    }
}
