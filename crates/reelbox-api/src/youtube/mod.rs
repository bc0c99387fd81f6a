//! YouTube trailer search module.
//!
//! Resolves a title name to a playable video through the YouTube Data
//! API v3 `search` endpoint.

mod api;
mod client;
mod types;

#[allow(clippy::module_name_repetitions)]
pub use api::{LocalTrailerApi, TrailerApi};
#[allow(clippy::module_name_repetitions)]
pub use client::{YoutubeClient, YoutubeClientBuilder};
pub use types::{TrailerResult, TrailerSuffix, trailer_query};
