//! Work requested by screens and the results fed back to them.

use reelbox_api::FetchResult;
use reelbox_api::tmdb::{Category, Title};
use reelbox_api::youtube::TrailerResult;
use reelbox_db::{NewSavedTitle, SavedTitle, StoreError};

use super::title_list::RequestToken;

/// Which list a category load belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListTarget {
    /// A home section.
    Home(Category),
    /// The upcoming screen.
    Upcoming,
    /// The search screen's discover list.
    Discover,
}

/// A call a screen wants made on its behalf.
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    /// Fetch one catalog listing.
    FetchCategory {
        /// Destination list.
        target: ListTarget,
        /// Listing to fetch.
        category: Category,
        /// Token of the destination list's load.
        token: RequestToken,
    },
    /// Run a catalog text search.
    Search {
        /// Trimmed query text.
        query: String,
        /// Token of the results list's load.
        token: RequestToken,
    },
    /// Resolve a trailer for the preview.
    FindTrailer {
        /// Search query.
        query: String,
        /// Token of the preview request.
        token: RequestToken,
    },
    /// Persist a title.
    SaveTitle(NewSavedTitle),
    /// Reload the saved titles.
    ListDownloads {
        /// Token of the downloads list's load.
        token: RequestToken,
    },
    /// Remove one saved record.
    DeleteDownload(SavedTitle),
    /// Open a URL in the system browser.
    OpenUrl(String),
}

/// Result of an [`Effect`], or a notification from the store.
#[derive(Debug)]
pub enum Outcome {
    /// Result of [`Effect::FetchCategory`].
    Category {
        /// Destination list.
        target: ListTarget,
        /// Token carried by the effect.
        token: RequestToken,
        /// Fetched titles.
        result: FetchResult<Vec<Title>>,
    },
    /// Result of [`Effect::Search`].
    Search {
        /// Token carried by the effect.
        token: RequestToken,
        /// Matching titles.
        result: FetchResult<Vec<Title>>,
    },
    /// Result of [`Effect::FindTrailer`].
    Trailer {
        /// Token carried by the effect.
        token: RequestToken,
        /// Resolved trailer.
        result: FetchResult<TrailerResult>,
    },
    /// Result of [`Effect::SaveTitle`].
    Saved(Result<SavedTitle, StoreError>),
    /// Result of [`Effect::ListDownloads`].
    Downloads {
        /// Token carried by the effect.
        token: RequestToken,
        /// Saved records in insertion order.
        result: Result<Vec<SavedTitle>, StoreError>,
    },
    /// Result of [`Effect::DeleteDownload`].
    Deleted {
        /// Row identity of the removed record.
        row_id: i64,
        /// Delete status.
        result: Result<(), StoreError>,
    },
    /// The store announced a change.
    StoreChanged,
}
