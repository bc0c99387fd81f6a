//! Home screen: five horizontal catalog sections and a featured header.

use reelbox_api::tmdb::{Category, Title, UNKNOWN_TITLE_NAME};

use super::capitalize_first_letter;
use super::effect::{Effect, ListTarget};
use super::records::to_new_saved_title;
use super::title_list::{RequestToken, TitleList};

/// Home sections in display order.
pub const HOME_SECTIONS: [(&str, Category); 5] = [
    ("Trending Movies", Category::TrendingMovies),
    ("Trending Tv", Category::TrendingTv),
    ("Popular", Category::Popular),
    ("Upcoming Movies", Category::Upcoming),
    ("Top Rated", Category::TopRated),
];

/// One catalog row on the home screen.
#[derive(Debug)]
pub struct HomeSection {
    /// Header as displayed.
    pub header: String,
    /// Listing backing this section.
    pub category: Category,
    /// Loaded titles.
    pub list: TitleList<Title>,
}

/// Home screen state.
#[derive(Debug)]
pub struct HomeScreen {
    sections: Vec<HomeSection>,
    focused: usize,
}

impl Default for HomeScreen {
    fn default() -> Self {
        Self::new()
    }
}

impl HomeScreen {
    /// Creates the screen with all sections empty.
    #[must_use]
    pub fn new() -> Self {
        let sections = HOME_SECTIONS
            .iter()
            .map(|&(header, category)| HomeSection {
                header: capitalize_first_letter(header),
                category,
                list: TitleList::new(header),
            })
            .collect();
        Self {
            sections,
            focused: 0,
        }
    }

    /// Starts loading every section, one fetch each.
    pub fn activate(&mut self) -> Vec<Effect> {
        self.sections
            .iter_mut()
            .map(|section| Effect::FetchCategory {
                target: ListTarget::Home(section.category),
                category: section.category,
                token: section.list.begin_load(),
            })
            .collect()
    }

    /// Applies a section load result.
    pub fn apply(
        &mut self,
        category: Category,
        token: RequestToken,
        result: reelbox_api::FetchResult<Vec<Title>>,
    ) {
        if let Some(section) = self.sections.iter_mut().find(|s| s.category == category) {
            section.list.finish(token, result);
        }
    }

    /// Sections in display order.
    #[must_use]
    pub fn sections(&self) -> &[HomeSection] {
        &self.sections
    }

    /// Sections in display order, mutably.
    pub fn sections_mut(&mut self) -> &mut [HomeSection] {
        &mut self.sections
    }

    /// Index of the focused section.
    #[must_use]
    pub const fn focused_index(&self) -> usize {
        self.focused
    }

    /// The focused section.
    #[must_use]
    pub fn focused(&self) -> Option<&HomeSection> {
        self.sections.get(self.focused)
    }

    /// The focused section, mutably.
    pub fn focused_mut(&mut self) -> Option<&mut HomeSection> {
        self.sections.get_mut(self.focused)
    }

    /// Focuses the previous section.
    pub const fn focus_prev(&mut self) {
        self.focused = self.focused.saturating_sub(1);
    }

    /// Focuses the next section.
    #[allow(clippy::arithmetic_side_effects)]
    pub const fn focus_next(&mut self) {
        if self.focused + 1 < HOME_SECTIONS.len() {
            self.focused += 1;
        }
    }

    /// Selected title of the focused section.
    #[must_use]
    pub fn selected_title(&self) -> Option<&Title> {
        self.focused()?.list.selected()
    }

    /// Poster URL for the featured header: the first trending movie.
    #[must_use]
    pub fn featured_poster_url(&self) -> Option<String> {
        self.sections
            .iter()
            .find(|s| s.category == Category::TrendingMovies)?
            .list
            .rows()
            .first()?
            .poster_url()
    }

    /// Row names of a section with the home placeholder applied.
    #[must_use]
    pub fn row_names(&self, category: Category) -> Vec<&str> {
        self.sections
            .iter()
            .find(|s| s.category == category)
            .map(|s| {
                s.list
                    .rows()
                    .iter()
                    .map(|t| t.display_name(UNKNOWN_TITLE_NAME))
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Saves the selected title.
    #[must_use]
    pub fn download_selected(&self) -> Option<Effect> {
        let title = self.selected_title()?;
        Some(Effect::SaveTitle(to_new_saved_title(title)))
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    #![allow(clippy::indexing_slicing)]

    use reelbox_api::FetchError;
    use tracing::subscriber::with_default;
    use tracing_mock::{expect, subscriber};

    use super::*;

    fn make_title(id: u64, original_title: Option<&str>, original_name: Option<&str>) -> Title {
        Title {
            id,
            original_title: original_title.map(String::from),
            original_name: original_name.map(String::from),
            overview: None,
            media_type: None,
            poster_path: Some(format!("/{id}.jpg")),
            release_date: None,
            vote_count: 0,
            vote_average: 0.0,
        }
    }

    fn token_for(effects: &[Effect], wanted: Category) -> RequestToken {
        effects
            .iter()
            .find_map(|e| match e {
                Effect::FetchCategory {
                    category, token, ..
                } if *category == wanted => Some(*token),
                _ => None,
            })
            .unwrap()
    }

    #[test]
    fn test_sections_and_headers_in_order() {
        // Arrange & Act
        let home = HomeScreen::new();

        // Assert
        let headers: Vec<&str> = home.sections().iter().map(|s| s.header.as_str()).collect();
        assert_eq!(
            headers,
            vec![
                "Trending movies",
                "Trending tv",
                "Popular",
                "Upcoming movies",
                "Top rated"
            ]
        );
    }

    #[test]
    fn test_activate_fetches_each_section_once() {
        // Arrange
        let mut home = HomeScreen::new();

        // Act
        let effects = home.activate();

        // Assert
        let categories: Vec<Category> = effects
            .iter()
            .filter_map(|e| match e {
                Effect::FetchCategory { category, .. } => Some(*category),
                _ => None,
            })
            .collect();
        assert_eq!(
            categories,
            vec![
                Category::TrendingMovies,
                Category::TrendingTv,
                Category::Popular,
                Category::Upcoming,
                Category::TopRated,
            ]
        );
    }

    #[test]
    fn test_trending_rows_use_display_names_in_order() {
        // Arrange
        let mut home = HomeScreen::new();
        let effects = home.activate();
        let token = token_for(&effects, Category::TrendingMovies);

        // Act
        home.apply(
            Category::TrendingMovies,
            token,
            Ok(vec![
                make_title(1, Some("A"), None),
                make_title(2, None, Some("B")),
                make_title(3, None, None),
            ]),
        );

        // Assert
        assert_eq!(
            home.row_names(Category::TrendingMovies),
            vec!["A", "B", "Unknown Title Name"]
        );
        assert_eq!(
            home.featured_poster_url().as_deref(),
            Some("https://image.tmdb.org/t/p/w500/1.jpg")
        );
    }

    #[test]
    fn test_failed_section_stays_empty_and_others_load() {
        // Arrange
        let mut home = HomeScreen::new();
        let effects = home.activate();

        // Act
        home.apply(
            Category::Popular,
            token_for(&effects, Category::Popular),
            Err(FetchError::NotFound {
                query: String::from("popular"),
            }),
        );
        home.apply(
            Category::TopRated,
            token_for(&effects, Category::TopRated),
            Ok(vec![make_title(9, Some("Z"), None)]),
        );

        // Assert
        assert!(home.row_names(Category::Popular).is_empty());
        assert_eq!(home.row_names(Category::TopRated), vec!["Z"]);
    }

    #[test]
    fn test_failed_section_logs_its_own_label() {
        // Arrange
        let mut home = HomeScreen::new();
        let effects = home.activate();
        let token = token_for(&effects, Category::TopRated);
        let (subscriber, handle) = subscriber::mock()
            .event(
                expect::event()
                    .at_level(tracing::Level::WARN)
                    .with_fields(expect::field("list").with_value(&"Top Rated")),
            )
            .only()
            .run_with_handle();

        // Act
        with_default(subscriber, || {
            home.apply(
                Category::TopRated,
                token,
                Err(FetchError::NotFound {
                    query: String::from("top rated"),
                }),
            );
        });

        // Assert
        handle.assert_finished();
    }

    #[test]
    fn test_download_selected_builds_save_effect() {
        // Arrange
        let mut home = HomeScreen::new();
        let effects = home.activate();
        home.apply(
            Category::TrendingMovies,
            token_for(&effects, Category::TrendingMovies),
            Ok(vec![make_title(7, Some("Seven"), None)]),
        );

        // Act
        let effect = home.download_selected().unwrap();

        // Assert
        assert!(matches!(effect, Effect::SaveTitle(ref payload) if payload.id == 7));
    }

    #[test]
    fn test_focus_is_bounded() {
        // Arrange
        let mut home = HomeScreen::new();

        // Act
        home.focus_prev();
        for _ in 0..10 {
            home.focus_next();
        }

        // Assert
        assert_eq!(home.focused_index(), 4);
        assert_eq!(home.focused().unwrap().category, Category::TopRated);
    }
}
