//! Top-level browser state: tabs, the preview overlay and outcome routing.

use reelbox_api::tmdb::Title;
use reelbox_api::youtube::TrailerSuffix;

use super::downloads::DownloadsScreen;
use super::effect::{Effect, ListTarget, Outcome};
use super::home::HomeScreen;
use super::preview::PreviewScreen;
use super::search::SearchScreen;
use super::title_list::RequestSeq;
use super::upcoming::UpcomingScreen;

/// Browser tabs in tab-bar order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tab {
    /// Catalog sections.
    Home,
    /// Upcoming movies.
    Upcoming,
    /// Discover and search.
    Search,
    /// Saved titles.
    Downloads,
}

impl Tab {
    /// All tabs in order.
    pub const ALL: [Self; 4] = [Self::Home, Self::Upcoming, Self::Search, Self::Downloads];

    /// Tab bar label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Home => "Home",
            Self::Upcoming => "Coming Soon",
            Self::Search => "Search",
            Self::Downloads => "Downloads",
        }
    }

    const fn index(self) -> usize {
        match self {
            Self::Home => 0,
            Self::Upcoming => 1,
            Self::Search => 2,
            Self::Downloads => 3,
        }
    }
}

/// Browser state.
#[derive(Debug)]
pub struct App {
    tab: Tab,
    visited: Vec<Tab>,
    /// Home screen.
    pub home: HomeScreen,
    /// Upcoming screen.
    pub upcoming: UpcomingScreen,
    /// Search screen.
    pub search: SearchScreen,
    /// Downloads screen.
    pub downloads: DownloadsScreen,
    preview: Option<PreviewScreen>,
    previews: RequestSeq,
}

impl Default for App {
    fn default() -> Self {
        Self::new()
    }
}

impl App {
    /// Creates the browser with nothing loaded.
    #[must_use]
    pub fn new() -> Self {
        Self {
            tab: Tab::Home,
            visited: Vec::new(),
            home: HomeScreen::new(),
            upcoming: UpcomingScreen::default(),
            search: SearchScreen::default(),
            downloads: DownloadsScreen::default(),
            preview: None,
            previews: RequestSeq::default(),
        }
    }

    /// Shows the initial tab.
    pub fn start(&mut self) -> Vec<Effect> {
        self.select_tab(Tab::Home)
    }

    /// Active tab.
    #[must_use]
    pub const fn tab(&self) -> Tab {
        self.tab
    }

    /// Open preview, if any.
    #[must_use]
    pub const fn preview(&self) -> Option<&PreviewScreen> {
        self.preview.as_ref()
    }

    /// Switches tabs. A tab loads the first time it is shown.
    pub fn select_tab(&mut self, tab: Tab) -> Vec<Effect> {
        self.tab = tab;
        if self.visited.contains(&tab) {
            return Vec::new();
        }
        self.visited.push(tab);
        match tab {
            Tab::Home => self.home.activate(),
            Tab::Upcoming => vec![self.upcoming.activate()],
            Tab::Search => vec![self.search.activate()],
            Tab::Downloads => vec![self.downloads.activate()],
        }
    }

    /// Switches to the next tab, wrapping around.
    #[allow(clippy::arithmetic_side_effects)]
    pub fn next_tab(&mut self) -> Vec<Effect> {
        let next = (self.tab.index() + 1) % Tab::ALL.len();
        self.select_tab(Tab::ALL.get(next).copied().unwrap_or(Tab::Home))
    }

    /// Switches to the previous tab, wrapping around.
    #[allow(clippy::arithmetic_side_effects)]
    pub fn prev_tab(&mut self) -> Vec<Effect> {
        let len = Tab::ALL.len();
        let prev = (self.tab.index() + len - 1) % len;
        self.select_tab(Tab::ALL.get(prev).copied().unwrap_or(Tab::Home))
    }

    /// Moves the cursor up in the active list.
    pub fn move_up(&mut self) {
        match self.tab {
            Tab::Home => {
                if let Some(section) = self.home.focused_mut() {
                    section.list.move_up();
                }
            }
            Tab::Upcoming => self.upcoming.list.move_up(),
            Tab::Search => self.search.visible_list_mut().move_up(),
            Tab::Downloads => self.downloads.list.move_up(),
        }
    }

    /// Moves the cursor down in the active list.
    pub fn move_down(&mut self) {
        match self.tab {
            Tab::Home => {
                if let Some(section) = self.home.focused_mut() {
                    section.list.move_down();
                }
            }
            Tab::Upcoming => self.upcoming.list.move_down(),
            Tab::Search => self.search.visible_list_mut().move_down(),
            Tab::Downloads => self.downloads.list.move_down(),
        }
    }

    /// Focuses the previous home section.
    pub const fn focus_prev_section(&mut self) {
        if matches!(self.tab, Tab::Home) {
            self.home.focus_prev();
        }
    }

    /// Focuses the next home section.
    pub const fn focus_next_section(&mut self) {
        if matches!(self.tab, Tab::Home) {
            self.home.focus_next();
        }
    }

    /// Opens a preview for the selected row.
    ///
    /// The home grid searches for "{name} trailer"; the other tabs search
    /// for the bare name.
    pub fn select(&mut self) -> Option<Effect> {
        let (title, suffix) = self.selected_title()?;
        let token = self.previews.issue();
        let (preview, effect) = PreviewScreen::request(title, suffix, token)?;
        self.preview = Some(preview);
        Some(effect)
    }

    fn selected_title(&self) -> Option<(Title, TrailerSuffix)> {
        match self.tab {
            Tab::Home => Some((self.home.selected_title()?.clone(), TrailerSuffix::Append)),
            Tab::Upcoming => Some((self.upcoming.list.selected()?.clone(), TrailerSuffix::None)),
            Tab::Search => Some((
                self.search.visible_list().selected()?.clone(),
                TrailerSuffix::None,
            )),
            Tab::Downloads => Some((self.downloads.selected_title()?, TrailerSuffix::None)),
        }
    }

    /// Closes the preview.
    pub fn close_preview(&mut self) {
        self.preview = None;
    }

    /// Saves the previewed title, or the selected home title.
    #[must_use]
    pub fn download(&self) -> Option<Effect> {
        if let Some(preview) = &self.preview {
            return Some(preview.download());
        }
        match self.tab {
            Tab::Home => self.home.download_selected(),
            Tab::Upcoming | Tab::Search | Tab::Downloads => None,
        }
    }

    /// Removes the selected saved title.
    pub fn remove(&mut self) -> Option<Effect> {
        if self.preview.is_some() || self.tab != Tab::Downloads {
            return None;
        }
        self.downloads.remove_selected()
    }

    /// Opens the previewed trailer in the browser.
    #[must_use]
    pub fn open_trailer(&self) -> Option<Effect> {
        self.preview.as_ref()?.open_trailer()
    }

    /// Appends a character to the search query.
    pub fn search_input(&mut self, c: char) -> Option<Effect> {
        self.search.push_char(c)
    }

    /// Removes the last character of the search query.
    pub fn search_backspace(&mut self) -> Option<Effect> {
        self.search.pop_char()
    }

    /// Routes an outcome to the screen that asked for it.
    pub fn apply(&mut self, outcome: Outcome) -> Option<Effect> {
        match outcome {
            Outcome::Category {
                target,
                token,
                result,
            } => match target {
                ListTarget::Home(category) => self.home.apply(category, token, result),
                ListTarget::Upcoming => self.upcoming.apply(token, result),
                ListTarget::Discover => self.search.apply_discover(token, result),
            },
            Outcome::Search { token, result } => self.search.apply_results(token, result),
            Outcome::Trailer { token, result } => match self.preview.take() {
                Some(preview) => self.preview = preview.apply(token, result),
                None => tracing::debug!("trailer arrived after preview closed"),
            },
            Outcome::Saved(result) => {
                if let Err(err) = result {
                    tracing::warn!(error = %err, "failed to save title");
                }
            }
            Outcome::Downloads { token, result } => self.downloads.apply(token, result),
            Outcome::Deleted { row_id, result } => {
                if let Err(err) = result {
                    tracing::warn!(row_id, error = %err, "failed to delete saved title");
                }
            }
            Outcome::StoreChanged => return self.downloads.on_store_event(),
        }
        None
    }
}
