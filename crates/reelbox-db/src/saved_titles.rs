//! Saved title CRUD operations.

use rusqlite::{Connection, Row};

use super::error::StoreError;

/// Fields of a title to be saved.
#[derive(Debug, Clone, PartialEq)]
pub struct NewSavedTitle {
    /// TMDB ID of the source title.
    pub id: u64,
    /// Original movie title (nullable).
    pub original_title: Option<String>,
    /// Original show name (nullable).
    pub original_name: Option<String>,
    /// Overview text (nullable).
    pub overview: Option<String>,
    /// Media type tag (nullable).
    pub media_type: Option<String>,
    /// Poster path fragment (nullable).
    pub poster_path: Option<String>,
    /// Release date (nullable).
    pub release_date: Option<String>,
    /// Vote count.
    pub vote_count: u64,
    /// Vote average.
    pub vote_average: f64,
}

/// A persisted title record.
#[derive(Debug, Clone, PartialEq)]
pub struct SavedTitle {
    /// Store-assigned row identity.
    pub row_id: i64,
    /// TMDB ID of the source title (not unique).
    pub id: u64,
    /// Original movie title (nullable).
    pub original_title: Option<String>,
    /// Original show name (nullable).
    pub original_name: Option<String>,
    /// Overview text (nullable).
    pub overview: Option<String>,
    /// Media type tag (nullable).
    pub media_type: Option<String>,
    /// Poster path fragment (nullable).
    pub poster_path: Option<String>,
    /// Release date (nullable).
    pub release_date: Option<String>,
    /// Vote count.
    pub vote_count: u64,
    /// Vote average.
    pub vote_average: f64,
    /// Save timestamp (`YYYY-MM-DD HH:MM:SS`, UTC).
    pub saved_at: String,
}

/// Column list shared by the queries below.
const SELECT_COLUMNS: &str = "row_id, id, original_title, original_name, overview,
    media_type, poster_path, release_date, vote_count, vote_average, saved_at";

/// Maps a row selected with `SELECT_COLUMNS`.
fn map_row(row: &Row<'_>) -> rusqlite::Result<SavedTitle> {
    Ok(SavedTitle {
        row_id: row.get(0)?,
        id: row.get(1)?,
        original_title: row.get(2)?,
        original_name: row.get(3)?,
        overview: row.get(4)?,
        media_type: row.get(5)?,
        poster_path: row.get(6)?,
        release_date: row.get(7)?,
        vote_count: row.get(8)?,
        vote_average: row.get(9)?,
        saved_at: row.get(10)?,
    })
}

/// Inserts a new record and returns it with its assigned row identity.
///
/// No uniqueness check: saving the same title twice yields two records.
///
/// # Errors
///
/// Returns [`StoreError::Save`] if the insert or read-back fails.
#[allow(clippy::module_name_repetitions)]
pub fn insert_saved_title(
    conn: &Connection,
    title: &NewSavedTitle,
) -> Result<SavedTitle, StoreError> {
    let to_err = |source| StoreError::Save {
        id: title.id,
        source,
    };

    conn.execute(
        "INSERT INTO saved_titles (
            id, original_title, original_name, overview,
            media_type, poster_path, release_date, vote_count, vote_average
        ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
        rusqlite::params![
            title.id,
            title.original_title,
            title.original_name,
            title.overview,
            title.media_type,
            title.poster_path,
            title.release_date,
            title.vote_count,
            title.vote_average,
        ],
    )
    .map_err(to_err)?;

    let row_id = conn.last_insert_rowid();
    conn.query_row(
        &format!("SELECT {SELECT_COLUMNS} FROM saved_titles WHERE row_id = ?1"),
        [row_id],
        map_row,
    )
    .map_err(to_err)
}

/// Loads every saved record in insertion order.
///
/// # Errors
///
/// Returns [`StoreError::Fetch`] if the query fails.
#[allow(clippy::module_name_repetitions)]
pub fn load_saved_titles(conn: &Connection) -> Result<Vec<SavedTitle>, StoreError> {
    let mut stmt = conn
        .prepare(&format!(
            "SELECT {SELECT_COLUMNS} FROM saved_titles ORDER BY row_id"
        ))
        .map_err(StoreError::Fetch)?;

    let rows = stmt.query_map([], map_row).map_err(StoreError::Fetch)?;

    rows.collect::<rusqlite::Result<Vec<_>>>()
        .map_err(StoreError::Fetch)
}

/// Deletes exactly one record by row identity.
///
/// Returns `true` if a record was removed, `false` if it was already gone.
///
/// # Errors
///
/// Returns [`StoreError::Delete`] if the statement fails.
#[allow(clippy::module_name_repetitions)]
pub fn delete_saved_title(conn: &Connection, row_id: i64) -> Result<bool, StoreError> {
    let removed = conn
        .execute("DELETE FROM saved_titles WHERE row_id = ?1", [row_id])
        .map_err(|source| StoreError::Delete { row_id, source })?;
    Ok(removed > 0)
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    #![allow(clippy::indexing_slicing)]

    use super::*;
    use crate::connection::open_db;

    fn setup_db() -> (Connection, tempfile::TempDir) {
        let dir = tempfile::tempdir().unwrap();
        let conn = open_db(Some(dir.path())).unwrap();
        (conn, dir)
    }

    fn make_title(id: u64, original_title: &str) -> NewSavedTitle {
        NewSavedTitle {
            id,
            original_title: Some(String::from(original_title)),
            original_name: None,
            overview: Some(String::from("overview")),
            media_type: Some(String::from("movie")),
            poster_path: Some(String::from("/p.jpg")),
            release_date: Some(String::from("2024-01-01")),
            vote_count: 12,
            vote_average: 7.5,
        }
    }

    #[test]
    fn test_insert_and_load() {
        // Arrange
        let (conn, _dir) = setup_db();

        // Act
        let saved = insert_saved_title(&conn, &make_title(7, "Seven")).unwrap();
        let loaded = load_saved_titles(&conn).unwrap();

        // Assert
        assert_eq!(loaded.len(), 1);
        assert_eq!(loaded[0], saved);
        assert_eq!(loaded[0].id, 7);
        assert_eq!(loaded[0].original_title.as_deref(), Some("Seven"));
        assert_eq!(loaded[0].vote_count, 12);
        assert!(!loaded[0].saved_at.is_empty());
    }

    #[test]
    fn test_load_in_insertion_order() {
        // Arrange
        let (conn, _dir) = setup_db();
        insert_saved_title(&conn, &make_title(300, "C")).unwrap();
        insert_saved_title(&conn, &make_title(100, "A")).unwrap();
        insert_saved_title(&conn, &make_title(200, "B")).unwrap();

        // Act
        let loaded = load_saved_titles(&conn).unwrap();

        // Assert
        let ids: Vec<u64> = loaded.iter().map(|t| t.id).collect();
        assert_eq!(ids, vec![300, 100, 200]);
    }

    #[test]
    fn test_duplicate_id_creates_second_record() {
        // Arrange
        let (conn, _dir) = setup_db();

        // Act
        let first = insert_saved_title(&conn, &make_title(7, "Seven")).unwrap();
        let second = insert_saved_title(&conn, &make_title(7, "Seven")).unwrap();
        let loaded = load_saved_titles(&conn).unwrap();

        // Assert
        assert_ne!(first.row_id, second.row_id);
        assert_eq!(loaded.len(), 2);
    }

    #[test]
    fn test_delete_removes_exactly_one_record() {
        // Arrange
        let (conn, _dir) = setup_db();
        let first = insert_saved_title(&conn, &make_title(7, "Seven")).unwrap();
        let second = insert_saved_title(&conn, &make_title(7, "Seven")).unwrap();
        let other = insert_saved_title(&conn, &make_title(8, "Eight")).unwrap();

        // Act
        let removed = delete_saved_title(&conn, first.row_id).unwrap();
        let loaded = load_saved_titles(&conn).unwrap();

        // Assert
        assert!(removed);
        assert_eq!(loaded, vec![second, other]);
    }

    #[test]
    fn test_delete_missing_record() {
        // Arrange
        let (conn, _dir) = setup_db();

        // Act
        let removed = delete_saved_title(&conn, 999).unwrap();

        // Assert
        assert!(!removed);
    }

    #[test]
    fn test_load_without_table_is_fetch_error() {
        // Arrange
        let conn = Connection::open_in_memory().unwrap();

        // Act
        let result = load_saved_titles(&conn);

        // Assert
        assert!(matches!(result, Err(StoreError::Fetch(_))));
    }

    #[test]
    fn test_insert_without_table_is_save_error() {
        // Arrange
        let conn = Connection::open_in_memory().unwrap();

        // Act
        let result = insert_saved_title(&conn, &make_title(1, "A"));

        // Assert
        assert!(matches!(result, Err(StoreError::Save { id: 1, .. })));
    }
}
