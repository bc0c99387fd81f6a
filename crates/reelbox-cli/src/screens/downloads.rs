//! Downloads screen: the saved titles, refreshed on every save.

use reelbox_api::tmdb::{Title, UNKNOWN_TITLE_NAME};
use reelbox_db::{SavedTitle, StoreError};

use super::effect::Effect;
use super::records::{saved_display_name, to_title};
use super::title_list::{RequestToken, TitleList};

/// Downloads screen state.
#[derive(Debug)]
pub struct DownloadsScreen {
    /// Saved records in insertion order.
    pub list: TitleList<SavedTitle>,
    active: bool,
}

impl Default for DownloadsScreen {
    fn default() -> Self {
        Self {
            list: TitleList::new("downloads"),
            active: false,
        }
    }
}

impl DownloadsScreen {
    /// Starts listening for changes and loads the records.
    pub fn activate(&mut self) -> Effect {
        self.active = true;
        self.reload()
    }

    /// Reloads after a store change. Ignored until the screen was shown.
    pub fn on_store_event(&mut self) -> Option<Effect> {
        self.active.then(|| self.reload())
    }

    fn reload(&mut self) -> Effect {
        Effect::ListDownloads {
            token: self.list.begin_load(),
        }
    }

    /// Applies a load result.
    pub fn apply(&mut self, token: RequestToken, result: Result<Vec<SavedTitle>, StoreError>) {
        self.list.finish(token, result);
    }

    /// Drops the selected record from the screen and asks the store to delete it.
    pub fn remove_selected(&mut self) -> Option<Effect> {
        self.list.remove_selected().map(Effect::DeleteDownload)
    }

    /// The selected record as a catalog title.
    #[must_use]
    pub fn selected_title(&self) -> Option<Title> {
        self.list.selected().map(to_title)
    }

    /// Row names with the placeholder applied.
    #[must_use]
    pub fn row_names(&self) -> Vec<&str> {
        self.list
            .rows()
            .iter()
            .map(|s| saved_display_name(s, UNKNOWN_TITLE_NAME))
            .collect()
    }
}
