//! Search screen: a discover list plus gated free-text search.

use reelbox_api::FetchResult;
use reelbox_api::tmdb::{Category, Title, UNKNOWN_NAME};

use super::effect::{Effect, ListTarget};
use super::title_list::{RequestToken, TitleList};

/// Minimum trimmed query length (in characters) that triggers a search.
pub const MIN_QUERY_LEN: usize = 3;

/// Search screen state.
#[derive(Debug)]
pub struct SearchScreen {
    /// Popular titles shown while no query is entered.
    pub discover: TitleList<Title>,
    /// Results of the latest accepted query.
    pub results: TitleList<Title>,
    query: String,
}

impl Default for SearchScreen {
    fn default() -> Self {
        Self {
            discover: TitleList::new("discover"),
            results: TitleList::new("search"),
            query: String::new(),
        }
    }
}

impl SearchScreen {
    /// Starts loading the discover list.
    pub fn activate(&mut self) -> Effect {
        Effect::FetchCategory {
            target: ListTarget::Discover,
            category: Category::Discover,
            token: self.discover.begin_load(),
        }
    }

    /// Raw query text as typed.
    #[must_use]
    pub fn query(&self) -> &str {
        &self.query
    }

    /// Replaces the query text.
    ///
    /// Returns a search for the trimmed text when it is at least
    /// [`MIN_QUERY_LEN`] characters; otherwise nothing is issued and the
    /// previous results stay as they are.
    pub fn set_query(&mut self, text: &str) -> Option<Effect> {
        text.clone_into(&mut self.query);

        let trimmed = text.trim();
        if trimmed.chars().count() < MIN_QUERY_LEN {
            tracing::debug!(len = trimmed.chars().count(), "query too short, not searching");
            return None;
        }

        Some(Effect::Search {
            query: String::from(trimmed),
            token: self.results.begin_load(),
        })
    }

    /// Appends a character to the query.
    pub fn push_char(&mut self, c: char) -> Option<Effect> {
        let mut text = self.query.clone();
        text.push(c);
        self.set_query(&text)
    }

    /// Removes the last character of the query.
    pub fn pop_char(&mut self) -> Option<Effect> {
        let mut text = self.query.clone();
        text.pop()?;
        self.set_query(&text)
    }

    /// Whether the results list is displayed instead of discover.
    #[must_use]
    pub fn showing_results(&self) -> bool {
        !self.query.trim().is_empty()
    }

    /// The list currently displayed.
    #[must_use]
    pub fn visible_list(&self) -> &TitleList<Title> {
        if self.showing_results() {
            &self.results
        } else {
            &self.discover
        }
    }

    /// The list currently displayed, mutably.
    pub fn visible_list_mut(&mut self) -> &mut TitleList<Title> {
        if self.showing_results() {
            &mut self.results
        } else {
            &mut self.discover
        }
    }

    /// Row names of the displayed list with the search placeholder applied.
    #[must_use]
    pub fn row_names(&self) -> Vec<&str> {
        self.visible_list()
            .rows()
            .iter()
            .map(|t| t.display_name(UNKNOWN_NAME))
            .collect()
    }

    /// Applies a discover load result.
    pub fn apply_discover(&mut self, token: RequestToken, result: FetchResult<Vec<Title>>) {
        self.discover.finish(token, result);
    }

    /// Applies a search result.
    pub fn apply_results(&mut self, token: RequestToken, result: FetchResult<Vec<Title>>) {
        self.results.finish(token, result);
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    #![allow(clippy::indexing_slicing)]

    use super::*;

    fn make_title(id: u64, original_title: Option<&str>) -> Title {
        Title {
            id,
            original_title: original_title.map(String::from),
            original_name: None,
            overview: None,
            media_type: None,
            poster_path: None,
            release_date: None,
            vote_count: 0,
            vote_average: 0.0,
        }
    }

    fn search_token(effect: Option<Effect>) -> (String, RequestToken) {
        match effect {
            Some(Effect::Search { query, token }) => Some((query, token)),
            _ => None,
        }
        .unwrap()
    }

    #[test]
    fn test_short_query_issues_nothing() {
        // Arrange
        let mut screen = SearchScreen::default();

        // Act
        let effect = screen.set_query("ab");

        // Assert
        assert!(effect.is_none());
        assert_eq!(screen.query(), "ab");
    }

    #[test]
    fn test_query_is_trimmed_before_gate() {
        // Arrange
        let mut screen = SearchScreen::default();

        // Act
        let padded_short = screen.set_query("  ab  ");
        let (query, _) = search_token(screen.set_query("  abc "));

        // Assert
        assert!(padded_short.is_none());
        assert_eq!(query, "abc");
    }

    #[test]
    fn test_gate_counts_characters_not_bytes() {
        // Arrange
        let mut screen = SearchScreen::default();

        // Act
        let two_chars = screen.set_query("日本");
        let three_chars = screen.set_query("日本語");

        // Assert
        assert!(two_chars.is_none());
        assert!(three_chars.is_some());
    }

    #[test]
    fn test_typing_issues_search_from_third_character() {
        // Arrange
        let mut screen = SearchScreen::default();

        // Act
        let effects: Vec<Option<Effect>> = "dune".chars().map(|c| screen.push_char(c)).collect();

        // Assert
        assert!(effects[0].is_none());
        assert!(effects[1].is_none());
        assert!(matches!(&effects[2], Some(Effect::Search { query, .. }) if query == "dun"));
        assert!(matches!(&effects[3], Some(Effect::Search { query, .. }) if query == "dune"));
    }

    #[test]
    fn test_shortening_query_keeps_prior_results() {
        // Arrange
        let mut screen = SearchScreen::default();
        let (_, token) = search_token(screen.set_query("abc"));
        screen.apply_results(token, Ok(vec![make_title(1, Some("Abc"))]));

        // Act
        let effect = screen.pop_char();

        // Assert
        assert!(effect.is_none());
        assert_eq!(screen.query(), "ab");
        assert_eq!(screen.row_names(), vec!["Abc"]);
    }

    #[test]
    fn test_blank_query_shows_discover() {
        // Arrange
        let mut screen = SearchScreen::default();
        let discover_token = match screen.activate() {
            Effect::FetchCategory { token, .. } => Some(token),
            _ => None,
        }
        .unwrap();
        screen.apply_discover(discover_token, Ok(vec![make_title(5, None)]));

        // Act
        screen.set_query("   ");

        // Assert
        assert!(!screen.showing_results());
        assert_eq!(screen.row_names(), vec!["Unknown name"]);
    }

    #[test]
    fn test_later_search_wins_over_earlier_response() {
        // Arrange
        let mut screen = SearchScreen::default();
        let (_, first) = search_token(screen.set_query("abc"));
        let (_, second) = search_token(screen.set_query("abcd"));

        // Act
        screen.apply_results(second, Ok(vec![make_title(2, Some("Abcd"))]));
        screen.apply_results(first, Ok(vec![make_title(1, Some("Abc"))]));

        // Assert
        assert_eq!(screen.row_names(), vec!["Abcd"]);
    }

    #[test]
    fn test_pop_on_empty_query() {
        // Arrange
        let mut screen = SearchScreen::default();

        // Act & Assert
        assert!(screen.pop_char().is_none());
        assert_eq!(screen.query(), "");
    }
}
