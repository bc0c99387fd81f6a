//! YouTube search response types.

use serde::Deserialize;

/// Embed URL prefix for resolved trailers.
const EMBED_BASE_URL: &str = "https://www.youtube.com/embed/";

/// Watch URL prefix for resolved trailers.
const WATCH_BASE_URL: &str = "https://www.youtube.com/watch?v=";

/// Response from the `search` endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct YoutubeSearchResponse {
    /// Search hits, best match first.
    #[serde(default)]
    pub items: Vec<VideoElement>,
}

/// A single search hit.
#[derive(Debug, Clone, Deserialize)]
pub struct VideoElement {
    /// Resource identifier.
    pub id: VideoId,
}

/// Resource identifier of a search hit.
///
/// Channel and playlist hits carry no `videoId`.
#[derive(Debug, Clone, Deserialize)]
pub struct VideoId {
    /// Resource kind (e.g. "youtube#video").
    pub kind: String,
    /// Video ID, present for video hits only.
    #[serde(rename = "videoId", default)]
    pub video_id: Option<String>,
}

/// A resolved trailer video.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrailerResult {
    /// Resource kind (e.g. "youtube#video").
    pub kind: String,
    /// YouTube video ID.
    pub video_id: String,
}

impl TrailerResult {
    /// URL for embedding the video.
    #[must_use]
    pub fn embed_url(&self) -> String {
        format!("{EMBED_BASE_URL}{}", self.video_id)
    }

    /// URL for watching the video in a browser.
    #[must_use]
    pub fn watch_url(&self) -> String {
        format!("{WATCH_BASE_URL}{}", self.video_id)
    }
}

impl YoutubeSearchResponse {
    /// First hit that is a playable video.
    #[must_use]
    pub fn first_video(self) -> Option<TrailerResult> {
        self.items.into_iter().find_map(|item| {
            let video_id = item.id.video_id.filter(|id| !id.is_empty())?;
            Some(TrailerResult {
                kind: item.id.kind,
                video_id,
            })
        })
    }
}

/// Whether the word "trailer" is appended to a lookup query.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrailerSuffix {
    /// Search the bare title name.
    None,
    /// Search "{name}trailer" (no separator).
    Append,
}

/// Builds a trailer search query for a title name.
#[must_use]
pub fn trailer_query(name: &str, suffix: TrailerSuffix) -> String {
    match suffix {
        TrailerSuffix::None => String::from(name),
        TrailerSuffix::Append => format!("{name}trailer"),
    }
}
