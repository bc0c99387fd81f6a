//! Title preview: waits for a trailer, then shows it with the overview.

use reelbox_api::FetchResult;
use reelbox_api::tmdb::{Title, UNKNOWN_TITLE_NAME};
use reelbox_api::youtube::{TrailerResult, TrailerSuffix, trailer_query};

use super::effect::Effect;
use super::records::to_new_saved_title;
use super::title_list::RequestToken;

/// Everything the preview shows once the trailer is known.
#[derive(Debug, Clone, PartialEq)]
pub struct TitlePreview {
    /// Title being previewed.
    pub title: Title,
    /// Display name.
    pub name: String,
    /// Overview text, empty when the catalog has none.
    pub overview: String,
    /// Resolved trailer.
    pub trailer: TrailerResult,
    /// Poster image URL.
    pub poster_url: Option<String>,
}

/// Preview state.
#[derive(Debug, Clone, PartialEq)]
pub enum PreviewScreen {
    /// Trailer lookup in flight.
    AwaitingTrailer {
        /// Title being previewed.
        title: Title,
        /// Token of the lookup.
        token: RequestToken,
    },
    /// Trailer resolved.
    Ready(TitlePreview),
}

impl PreviewScreen {
    /// Starts a preview for `title`.
    ///
    /// Returns `None` without issuing a lookup when the title has no name.
    #[must_use]
    pub fn request(
        title: Title,
        suffix: TrailerSuffix,
        token: RequestToken,
    ) -> Option<(Self, Effect)> {
        let Some(name) = title.lookup_name() else {
            tracing::warn!(id = title.id, "title has no name, skipping trailer lookup");
            return None;
        };
        let effect = Effect::FindTrailer {
            query: trailer_query(name, suffix),
            token,
        };
        Some((Self::AwaitingTrailer { title, token }, effect))
    }

    /// Applies a trailer lookup result.
    ///
    /// Returns `None` when the preview should be dismissed (lookup
    /// failed). Results for another token leave the state unchanged.
    #[must_use]
    pub fn apply(self, token: RequestToken, result: FetchResult<TrailerResult>) -> Option<Self> {
        let (title, expected) = match self {
            Self::AwaitingTrailer { title, token } => (title, token),
            ready @ Self::Ready(_) => return Some(ready),
        };
        if token != expected {
            tracing::debug!("dropping stale trailer response");
            return Some(Self::AwaitingTrailer {
                title,
                token: expected,
            });
        }

        match result {
            Ok(trailer) => Some(Self::Ready(TitlePreview {
                name: String::from(title.display_name(UNKNOWN_TITLE_NAME)),
                overview: title.overview.clone().unwrap_or_default(),
                poster_url: title.poster_url(),
                trailer,
                title,
            })),
            Err(err) => {
                tracing::warn!(id = title.id, error = %err, "trailer lookup failed");
                None
            }
        }
    }

    /// Title being previewed.
    #[must_use]
    pub const fn title(&self) -> &Title {
        match self {
            Self::AwaitingTrailer { title, .. } => title,
            Self::Ready(preview) => &preview.title,
        }
    }

    /// Saves the previewed title.
    #[must_use]
    pub fn download(&self) -> Effect {
        Effect::SaveTitle(to_new_saved_title(self.title()))
    }

    /// Opens the trailer in the browser once it is known.
    #[must_use]
    pub fn open_trailer(&self) -> Option<Effect> {
        match self {
            Self::Ready(preview) => Some(Effect::OpenUrl(preview.trailer.watch_url())),
            Self::AwaitingTrailer { .. } => None,
        }
    }
}
