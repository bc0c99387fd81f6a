//! Upcoming screen: a single list of upcoming movies.

use reelbox_api::FetchResult;
use reelbox_api::tmdb::{Category, Title};

use super::effect::{Effect, ListTarget};
use super::title_list::{RequestToken, TitleList};

/// Upcoming screen state.
#[derive(Debug)]
pub struct UpcomingScreen {
    /// Upcoming titles.
    pub list: TitleList<Title>,
}

impl Default for UpcomingScreen {
    fn default() -> Self {
        Self {
            list: TitleList::new("upcoming"),
        }
    }
}

impl UpcomingScreen {
    /// Starts loading the list.
    pub fn activate(&mut self) -> Effect {
        Effect::FetchCategory {
            target: ListTarget::Upcoming,
            category: Category::Upcoming,
            token: self.list.begin_load(),
        }
    }

    /// Applies a load result.
    pub fn apply(&mut self, token: RequestToken, result: FetchResult<Vec<Title>>) {
        self.list.finish(token, result);
    }
}
