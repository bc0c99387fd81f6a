//! `TrailerApi` trait definition.
#![allow(clippy::future_not_send)]

use super::types::TrailerResult;
use crate::error::FetchResult;

/// Trailer lookup trait.
///
/// Abstracts the video search for mock substitution in tests.
/// Uses `trait_variant::make` to generate a `Send`-bound async trait.
#[allow(clippy::module_name_repetitions)]
#[trait_variant::make(TrailerApi: Send)]
pub trait LocalTrailerApi {
    /// Returns the first video matching `query`.
    ///
    /// # Errors
    ///
    /// Returns [`crate::FetchError::NotFound`] when the search yields no
    /// video, or another variant if the request or decoding fails.
    async fn find_trailer(&self, query: &str) -> FetchResult<TrailerResult>;
}
