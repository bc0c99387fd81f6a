//! Screen state machines.
//!
//! Screens never perform I/O. User intents return [`Effect`] values that
//! the dispatcher runs off the UI thread; the results come back as
//! [`Outcome`] values and are applied on the UI thread.

mod app;
mod downloads;
mod effect;
mod home;
mod preview;
mod records;
mod search;
mod title_list;
mod upcoming;

pub use app::{App, Tab};
pub use effect::{Effect, ListTarget, Outcome};
pub use preview::PreviewScreen;
pub use records::{saved_display_name, to_new_saved_title};
pub use search::{MIN_QUERY_LEN, SearchScreen};
pub use title_list::{Phase, TitleList};

/// Upper-cases the first character and lower-cases the rest
/// ("Trending Movies" -> "Trending movies").
#[must_use]
pub fn capitalize_first_letter(text: &str) -> String {
    let mut chars = text.chars();
    chars.next().map_or_else(String::new, |first| {
        first
            .to_uppercase()
            .chain(chars.flat_map(char::to_lowercase))
            .collect()
    })
}
