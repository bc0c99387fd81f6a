//! TMDB catalog response types and category selectors.

use std::fmt;

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

/// Placeholder used by the home, upcoming, downloads and preview screens.
pub const UNKNOWN_TITLE_NAME: &str = "Unknown Title Name";

/// Placeholder used by the search screen.
pub const UNKNOWN_NAME: &str = "Unknown name";

/// Base URL for poster images.
const POSTER_BASE_URL: &str = "https://image.tmdb.org/t/p/w500";

/// Envelope returned by every catalog endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct TitleResponse {
    /// Titles in API order.
    pub results: Vec<Title>,
}

/// A catalog entry (movie or show).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Title {
    /// TMDB ID.
    pub id: u64,
    /// Original movie title.
    #[serde(default)]
    pub original_title: Option<String>,
    /// Original show name.
    #[serde(default)]
    pub original_name: Option<String>,
    /// Overview text.
    #[serde(default)]
    pub overview: Option<String>,
    /// Media type tag ("movie", "tv"). Only trending responses carry it.
    #[serde(default)]
    pub media_type: Option<String>,
    /// Poster path fragment (e.g. "/abc.jpg").
    #[serde(default)]
    pub poster_path: Option<String>,
    /// Release date (YYYY-MM-DD).
    #[serde(default)]
    pub release_date: Option<String>,
    /// Vote count.
    #[serde(default)]
    pub vote_count: u64,
    /// Vote average.
    #[serde(default)]
    pub vote_average: f64,
}

/// Returns the value when it is present and not empty.
fn non_empty(value: Option<&String>) -> Option<&str> {
    value.map(String::as_str).filter(|s| !s.is_empty())
}

impl Title {
    /// Resolves the display name: `original_title`, then `original_name`,
    /// then `placeholder`.
    #[must_use]
    pub fn display_name<'a>(&'a self, placeholder: &'a str) -> &'a str {
        self.lookup_name().unwrap_or(placeholder)
    }

    /// Name usable for a trailer lookup, if the title has one.
    #[must_use]
    pub fn lookup_name(&self) -> Option<&str> {
        non_empty(self.original_title.as_ref()).or_else(|| non_empty(self.original_name.as_ref()))
    }

    /// Full poster image URL.
    #[must_use]
    pub fn poster_url(&self) -> Option<String> {
        non_empty(self.poster_path.as_ref()).map(|path| format!("{POSTER_BASE_URL}{path}"))
    }

    /// Release year parsed from `release_date`.
    #[must_use]
    pub fn release_year(&self) -> Option<i32> {
        let date = non_empty(self.release_date.as_ref())?;
        NaiveDate::parse_from_str(date, "%Y-%m-%d")
            .ok()
            .map(|d| d.year())
    }
}

/// Error envelope returned by TMDB on failure.
#[derive(Debug, Clone, Deserialize)]
pub struct TmdbErrorResponse {
    /// TMDB status code.
    pub status_code: u32,
    /// Error message.
    pub status_message: String,
    /// Always false for errors.
    #[serde(default)]
    pub success: bool,
}

/// Catalog listing selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    /// Movies trending today.
    TrendingMovies,
    /// Shows trending today.
    TrendingTv,
    /// Popular movies.
    Popular,
    /// Upcoming movies.
    Upcoming,
    /// Top rated movies.
    TopRated,
    /// Discover, sorted by popularity.
    Discover,
}

impl Category {
    /// All categories in home-screen order, followed by discover.
    pub const ALL: [Self; 6] = [
        Self::TrendingMovies,
        Self::TrendingTv,
        Self::Popular,
        Self::Upcoming,
        Self::TopRated,
        Self::Discover,
    ];

    /// Endpoint path relative to the API base URL.
    #[must_use]
    pub const fn path(self) -> &'static str {
        match self {
            Self::TrendingMovies => "trending/movie/day",
            Self::TrendingTv => "trending/tv/day",
            Self::Popular => "movie/popular",
            Self::Upcoming => "movie/upcoming",
            Self::TopRated => "movie/top_rated",
            Self::Discover => "discover/movie",
        }
    }

    /// Endpoint-specific query parameters.
    #[must_use]
    pub const fn extra_query(self) -> &'static [(&'static str, &'static str)] {
        match self {
            Self::TrendingMovies | Self::TrendingTv => &[],
            Self::Popular | Self::Upcoming | Self::TopRated => &[("page", "1")],
            Self::Discover => &[
                ("sort_by", "popularity.desc"),
                ("include_adult", "false"),
                ("include_video", "false"),
                ("page", "1"),
                ("with_watch_monetization_types", "flatrate"),
            ],
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::TrendingMovies => "trending-movies",
            Self::TrendingTv => "trending-tv",
            Self::Popular => "popular",
            Self::Upcoming => "upcoming",
            Self::TopRated => "top-rated",
            Self::Discover => "discover",
        };
        f.write_str(name)
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    #![allow(clippy::indexing_slicing)]

    use super::*;

    fn make_title(id: u64, original_title: Option<&str>, original_name: Option<&str>) -> Title {
        Title {
            id,
            original_title: original_title.map(String::from),
            original_name: original_name.map(String::from),
            overview: None,
            media_type: None,
            poster_path: None,
            release_date: None,
            vote_count: 0,
            vote_average: 0.0,
        }
    }

    #[test]
    fn test_display_name_prefers_original_title() {
        // Arrange
        let title = make_title(1, Some("Dune"), Some("Dune: The Series"));

        // Act & Assert
        assert_eq!(title.display_name(UNKNOWN_TITLE_NAME), "Dune");
    }

    #[test]
    fn test_display_name_falls_back_to_original_name() {
        // Arrange
        let title = make_title(2, None, Some("Severance"));

        // Act & Assert
        assert_eq!(title.display_name(UNKNOWN_TITLE_NAME), "Severance");
    }

    #[test]
    fn test_display_name_skips_empty_original_title() {
        // Arrange
        let title = make_title(3, Some(""), Some("Shogun"));

        // Act & Assert
        assert_eq!(title.display_name(UNKNOWN_NAME), "Shogun");
    }

    #[test]
    fn test_display_name_keeps_whitespace_original_title() {
        // Arrange
        let title: Title =
            serde_json::from_str(r#"{"id":1,"original_title":" ","original_name":"B"}"#).unwrap();

        // Act & Assert
        assert_eq!(title.display_name(UNKNOWN_TITLE_NAME), " ");
        assert_eq!(title.lookup_name(), Some(" "));
    }

    #[test]
    fn test_display_name_placeholders_differ_per_screen() {
        // Arrange
        let title = make_title(4, None, Some(""));

        // Act & Assert
        assert_eq!(title.display_name(UNKNOWN_TITLE_NAME), "Unknown Title Name");
        assert_eq!(title.display_name(UNKNOWN_NAME), "Unknown name");
        assert!(title.lookup_name().is_none());
    }

    #[test]
    fn test_poster_url() {
        // Arrange
        let mut title = make_title(5, Some("A"), None);
        title.poster_path = Some(String::from("/poster.jpg"));

        // Act & Assert
        assert_eq!(
            title.poster_url().as_deref(),
            Some("https://image.tmdb.org/t/p/w500/poster.jpg")
        );
        assert!(make_title(6, None, None).poster_url().is_none());
    }

    #[test]
    fn test_release_year() {
        // Arrange
        let mut title = make_title(7, Some("A"), None);
        title.release_date = Some(String::from("2024-03-01"));
        let mut malformed = make_title(8, Some("B"), None);
        malformed.release_date = Some(String::from("soon"));

        // Act & Assert
        assert_eq!(title.release_year(), Some(2024));
        assert_eq!(malformed.release_year(), None);
    }

    #[test]
    fn test_parse_response_with_missing_fields() {
        // Arrange
        let json = r#"{"page":1,"results":[
            {"id":1,"original_title":"A","media_type":"movie","vote_count":10,"vote_average":7.5},
            {"id":2,"original_name":"B","overview":null}
        ]}"#;

        // Act
        let response: TitleResponse = serde_json::from_str(json).unwrap();

        // Assert
        assert_eq!(response.results.len(), 2);
        assert_eq!(response.results[0].id, 1);
        assert_eq!(response.results[0].vote_count, 10);
        assert_eq!(response.results[1].display_name(UNKNOWN_TITLE_NAME), "B");
        assert_eq!(response.results[1].vote_count, 0);
    }

    #[test]
    fn test_category_paths() {
        // Arrange & Act & Assert
        assert_eq!(Category::TrendingMovies.path(), "trending/movie/day");
        assert_eq!(Category::TrendingTv.path(), "trending/tv/day");
        assert_eq!(Category::TopRated.path(), "movie/top_rated");
        assert!(
            Category::Discover
                .extra_query()
                .contains(&("with_watch_monetization_types", "flatrate"))
        );
        assert!(Category::TrendingTv.extra_query().is_empty());
    }

    #[test]
    fn test_category_display() {
        // Arrange & Act & Assert
        assert_eq!(Category::TopRated.to_string(), "top-rated");
        assert_eq!(Category::TrendingMovies.to_string(), "trending-movies");
    }
}
