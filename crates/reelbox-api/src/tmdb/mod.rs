//! TMDB catalog client module.
//!
//! Handles HTTP requests to the TMDB API v3 listing and search
//! endpoints and decodes them into [`Title`] values.

mod api;
mod client;
mod types;

#[allow(clippy::module_name_repetitions)]
pub use api::{CatalogApi, LocalCatalogApi};
#[allow(clippy::module_name_repetitions)]
pub use client::{TmdbClient, TmdbClientBuilder};
pub use types::{Category, Title, TitleResponse, UNKNOWN_NAME, UNKNOWN_TITLE_NAME};
