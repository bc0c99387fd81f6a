//! Local store for saved titles.
//!
//! Uses `rusqlite` (bundled `SQLite`) to persist titles the user saved
//! from the catalog, and a `tokio` broadcast channel to announce saves.

mod connection;
mod error;
mod migrations;
/// Saved title CRUD operations.
pub mod saved_titles;
mod store;

#[allow(clippy::module_name_repetitions)]
pub use connection::{open_db, resolve_data_dir};
pub use error::StoreError;
#[allow(clippy::module_name_repetitions)]
pub use saved_titles::{
    NewSavedTitle, SavedTitle, delete_saved_title, insert_saved_title, load_saved_titles,
};
pub use store::{DownloadStore, StoreEvent};
