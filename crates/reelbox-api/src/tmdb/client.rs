//! `TmdbClient` - TMDB catalog client implementation.

use anyhow::{Context, Result};
use reqwest::Client;
use tracing::instrument;
use url::Url;

use super::api::CatalogApi;
use super::types::{Category, Title, TitleResponse, TmdbErrorResponse};
use crate::error::FetchResult;
use crate::http::get_json;

/// Default base URL for TMDB API v3.
const DEFAULT_BASE_URL: &str = "https://api.themoviedb.org/3/";

/// Default response language.
const DEFAULT_LANGUAGE: &str = "en-US";

/// TMDB catalog client.
#[derive(Debug)]
#[allow(clippy::module_name_repetitions)]
pub struct TmdbClient {
    /// HTTP client.
    http_client: Client,
    /// Base URL for API requests.
    base_url: Url,
    /// API key sent as the `api_key` query parameter.
    api_key: String,
    /// Response language.
    language: String,
}

/// Builder for `TmdbClient`.
#[derive(Debug)]
#[allow(clippy::module_name_repetitions)]
pub struct TmdbClientBuilder {
    base_url: Option<Url>,
    api_key: Option<String>,
    user_agent: Option<String>,
    language: Option<String>,
}

impl TmdbClientBuilder {
    /// Creates a new builder.
    const fn new() -> Self {
        Self {
            base_url: None,
            api_key: None,
            user_agent: None,
            language: None,
        }
    }

    /// Overrides the base URL (for wiremock in tests).
    #[must_use]
    pub fn base_url(mut self, url: Url) -> Self {
        self.base_url = Some(url);
        self
    }

    /// Sets the API key (required).
    #[must_use]
    pub fn api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(key.into());
        self
    }

    /// Sets the User-Agent (required).
    #[must_use]
    pub fn user_agent(mut self, ua: impl Into<String>) -> Self {
        self.user_agent = Some(ua.into());
        self
    }

    /// Sets the response language (default: "en-US").
    #[must_use]
    pub fn language(mut self, language: impl Into<String>) -> Self {
        self.language = Some(language.into());
        self
    }

    /// Builds the client.
    ///
    /// # Errors
    ///
    /// - `api_key` is not set or blank.
    /// - `user_agent` is not set.
    /// - `reqwest::Client` build fails.
    pub fn build(self) -> Result<TmdbClient> {
        let api_key = self.api_key.context("api_key is required")?;
        if api_key.trim().is_empty() {
            anyhow::bail!("api_key must not be empty");
        }
        let user_agent = self.user_agent.context("user_agent is required")?;

        let base_url = if let Some(url) = self.base_url {
            url
        } else {
            let result = Url::parse(DEFAULT_BASE_URL);
            result.context("invalid default base URL")?
        };

        let http_client = Client::builder()
            .user_agent(&user_agent)
            .gzip(true)
            .build()
            .context("failed to build HTTP client")?;

        Ok(TmdbClient {
            http_client,
            base_url,
            api_key,
            language: self
                .language
                .unwrap_or_else(|| String::from(DEFAULT_LANGUAGE)),
        })
    }
}

/// Pulls `status_message` out of a TMDB error envelope.
fn parse_tmdb_error(body: &str) -> Option<String> {
    serde_json::from_str::<TmdbErrorResponse>(body)
        .ok()
        .map(|e| format!("code={}, message={}", e.status_code, e.status_message))
}

impl TmdbClient {
    /// Creates a new builder.
    #[must_use]
    pub const fn builder() -> TmdbClientBuilder {
        TmdbClientBuilder::new()
    }

    /// Fetches one listing envelope and unwraps its results.
    async fn get_titles(&self, path: &str, extra: &[(&str, String)]) -> FetchResult<Vec<Title>> {
        let mut query: Vec<(&str, String)> = vec![
            ("api_key", self.api_key.clone()),
            ("language", self.language.clone()),
        ];
        query.extend(extra.iter().cloned());

        let response: TitleResponse = get_json(
            &self.http_client,
            &self.base_url,
            path,
            &query,
            parse_tmdb_error,
        )
        .await?;
        Ok(response.results)
    }
}

impl CatalogApi for TmdbClient {
    #[instrument(skip_all, fields(category = %category))]
    async fn fetch_category(&self, category: Category) -> FetchResult<Vec<Title>> {
        let extra: Vec<(&str, String)> = category
            .extra_query()
            .iter()
            .map(|&(k, v)| (k, String::from(v)))
            .collect();
        let titles = self.get_titles(category.path(), &extra).await?;
        tracing::debug!(count = titles.len(), "catalog listing fetched");
        Ok(titles)
    }

    #[instrument(skip_all)]
    async fn search(&self, query: &str) -> FetchResult<Vec<Title>> {
        let extra = [("query", String::from(query))];
        let titles = self.get_titles("search/movie", &extra).await?;
        tracing::debug!(count = titles.len(), "search results fetched");
        Ok(titles)
    }
}
