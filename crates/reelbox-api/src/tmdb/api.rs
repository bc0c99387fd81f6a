//! `CatalogApi` trait definition.
#![allow(clippy::future_not_send)]

use super::types::{Category, Title};
use crate::error::FetchResult;

/// TMDB catalog trait.
///
/// Abstracts catalog fetches for mock substitution in tests.
/// Uses `trait_variant::make` to generate a `Send`-bound async trait.
#[allow(clippy::module_name_repetitions)]
#[trait_variant::make(CatalogApi: Send)]
pub trait LocalCatalogApi {
    /// Fetches one catalog listing, in API order.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP request fails, the status is not a
    /// success, or the JSON payload cannot be decoded.
    async fn fetch_category(&self, category: Category) -> FetchResult<Vec<Title>>;

    /// Searches movies by free text.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP request fails, the status is not a
    /// success, or the JSON payload cannot be decoded.
    async fn search(&self, query: &str) -> FetchResult<Vec<Title>>;
}
