//! Shared saved-titles store with change notifications.

use std::path::Path;
use std::sync::{Mutex, MutexGuard};

use rusqlite::Connection;
use tokio::sync::broadcast;

use super::connection::open_db;
use super::error::StoreError;
use super::saved_titles::{
    NewSavedTitle, SavedTitle, delete_saved_title, insert_saved_title, load_saved_titles,
};

/// Capacity of the change notification channel.
const EVENT_CAPACITY: usize = 16;

/// Change notification emitted by [`DownloadStore`].
///
/// Carries no payload: listeners re-read the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreEvent {
    /// A title was saved.
    TitleSaved,
}

/// Application-wide saved-titles store.
///
/// One instance is shared by every screen. Saves are announced to all
/// current subscribers; deletes are not.
#[derive(Debug)]
pub struct DownloadStore {
    conn: Mutex<Connection>,
    events: broadcast::Sender<StoreEvent>,
}

impl DownloadStore {
    /// Opens the store under `dir` (or the default data directory).
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be opened or migrated.
    pub fn open(dir: Option<&Path>) -> Result<Self, StoreError> {
        Ok(Self::from_connection(open_db(dir)?))
    }

    /// Wraps an already-migrated connection.
    #[must_use]
    pub fn from_connection(conn: Connection) -> Self {
        let (events, _) = broadcast::channel(EVENT_CAPACITY);
        Self {
            conn: Mutex::new(conn),
            events,
        }
    }

    fn lock(&self) -> Result<MutexGuard<'_, Connection>, StoreError> {
        self.conn.lock().map_err(|_| StoreError::Poisoned)
    }

    /// Persists a new record and notifies subscribers.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Save`] if the write fails. No event is sent
    /// in that case.
    pub fn save(&self, title: &NewSavedTitle) -> Result<SavedTitle, StoreError> {
        let saved = insert_saved_title(&*self.lock()?, title)?;
        tracing::info!(id = saved.id, row_id = saved.row_id, "title saved");

        // No receivers is fine: nobody is watching.
        let _ = self.events.send(StoreEvent::TitleSaved);
        Ok(saved)
    }

    /// Returns every saved record in insertion order.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Fetch`] if the read fails.
    pub fn list_all(&self) -> Result<Vec<SavedTitle>, StoreError> {
        load_saved_titles(&*self.lock()?)
    }

    /// Removes exactly the given record.
    ///
    /// Removing a record that is already gone is not an error.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Delete`] if the statement fails.
    pub fn delete(&self, record: &SavedTitle) -> Result<(), StoreError> {
        let removed = delete_saved_title(&*self.lock()?, record.row_id)?;
        if removed {
            tracing::info!(id = record.id, row_id = record.row_id, "title removed");
        } else {
            tracing::debug!(row_id = record.row_id, "title already removed");
        }
        Ok(())
    }

    /// Subscribes to saves that happen after this call.
    #[must_use]
    pub fn subscribe(&self) -> broadcast::Receiver<StoreEvent> {
        self.events.subscribe()
    }
}
