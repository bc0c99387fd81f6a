//! API client library for reelbox.
//!
//! Provides clients for the TMDB catalog API and the YouTube search API
//! used to resolve trailers.

mod error;
mod http;

/// TMDB catalog client.
pub mod tmdb;

/// YouTube trailer search client.
pub mod youtube;

pub use error::{FetchError, FetchResult};
