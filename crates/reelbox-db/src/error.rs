//! Store error type.

use std::path::PathBuf;

use thiserror::Error;

/// Failure of a local store operation.
#[derive(Debug, Error)]
pub enum StoreError {
    /// No data directory was given and `HOME` is not set.
    #[error("HOME environment variable is not set")]
    HomeNotSet,

    /// The data directory could not be created.
    #[error("failed to create directory {}", path.display())]
    CreateDir {
        /// Directory path.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The database file could not be opened.
    #[error("failed to open database {}", path.display())]
    Open {
        /// Database file path.
        path: PathBuf,
        /// Underlying SQLite error.
        #[source]
        source: rusqlite::Error,
    },

    /// A schema migration failed.
    #[error("database migration failed")]
    Migration(#[source] rusqlite::Error),

    /// Writing a new record failed.
    #[error("failed to save title {id}")]
    Save {
        /// Catalog ID of the title being saved.
        id: u64,
        /// Underlying SQLite error.
        #[source]
        source: rusqlite::Error,
    },

    /// Reading records failed.
    #[error("failed to fetch saved titles")]
    Fetch(#[source] rusqlite::Error),

    /// Deleting a record failed.
    #[error("failed to delete saved title row {row_id}")]
    Delete {
        /// Store row identity.
        row_id: i64,
        /// Underlying SQLite error.
        #[source]
        source: rusqlite::Error,
    },

    /// A previous holder of the connection lock panicked.
    #[error("database connection lock is poisoned")]
    Poisoned,

    /// The worker running the operation did not complete.
    #[error("store task did not complete: {0}")]
    Worker(String),
}
