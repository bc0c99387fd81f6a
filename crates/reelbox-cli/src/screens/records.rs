//! Conversions between catalog titles and saved records.

use reelbox_api::tmdb::Title;
use reelbox_db::{NewSavedTitle, SavedTitle};

/// Builds the insert payload for a catalog title.
#[must_use]
pub fn to_new_saved_title(title: &Title) -> NewSavedTitle {
    NewSavedTitle {
        id: title.id,
        original_title: title.original_title.clone(),
        original_name: title.original_name.clone(),
        overview: title.overview.clone(),
        media_type: title.media_type.clone(),
        poster_path: title.poster_path.clone(),
        release_date: title.release_date.clone(),
        vote_count: title.vote_count,
        vote_average: title.vote_average,
    }
}

/// Rebuilds a catalog title from a saved record.
#[must_use]
pub fn to_title(saved: &SavedTitle) -> Title {
    Title {
        id: saved.id,
        original_title: saved.original_title.clone(),
        original_name: saved.original_name.clone(),
        overview: saved.overview.clone(),
        media_type: saved.media_type.clone(),
        poster_path: saved.poster_path.clone(),
        release_date: saved.release_date.clone(),
        vote_count: saved.vote_count,
        vote_average: saved.vote_average,
    }
}

/// Display name of a saved record: `original_title`, then
/// `original_name`, then `placeholder`.
#[must_use]
pub fn saved_display_name<'a>(saved: &'a SavedTitle, placeholder: &'a str) -> &'a str {
    [&saved.original_title, &saved.original_name]
        .into_iter()
        .filter_map(Option::as_deref)
        .find(|name| !name.is_empty())
        .unwrap_or(placeholder)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_saved_record_keeps_catalog_fields() {
        // Arrange
        let title = Title {
            id: 7,
            original_title: Some(String::from("Seven")),
            original_name: None,
            overview: Some(String::from("Two detectives.")),
            media_type: Some(String::from("movie")),
            poster_path: Some(String::from("/seven.jpg")),
            release_date: Some(String::from("1995-09-22")),
            vote_count: 20_000,
            vote_average: 8.4,
        };
        let payload = to_new_saved_title(&title);
        let saved = SavedTitle {
            row_id: 1,
            id: payload.id,
            original_title: payload.original_title,
            original_name: payload.original_name,
            overview: payload.overview,
            media_type: payload.media_type,
            poster_path: payload.poster_path,
            release_date: payload.release_date,
            vote_count: payload.vote_count,
            vote_average: payload.vote_average,
            saved_at: String::from("2024-01-01 00:00:00"),
        };

        // Act
        let rebuilt = to_title(&saved);

        // Assert
        assert_eq!(rebuilt, title);
        assert_eq!(saved_display_name(&saved, "?"), "Seven");
    }

    #[test]
    fn test_saved_display_name_empty_and_whitespace() {
        // Arrange
        let mut saved = SavedTitle {
            row_id: 2,
            id: 8,
            original_title: Some(String::new()),
            original_name: Some(String::from("Shogun")),
            overview: None,
            media_type: None,
            poster_path: None,
            release_date: None,
            vote_count: 0,
            vote_average: 0.0,
            saved_at: String::from("2024-01-01 00:00:00"),
        };

        // Act
        let from_empty = String::from(saved_display_name(&saved, "?"));
        saved.original_title = Some(String::from("  "));
        let from_whitespace = String::from(saved_display_name(&saved, "?"));

        // Assert
        assert_eq!(from_empty, "Shogun");
        assert_eq!(from_whitespace, "  ");
    }
}
