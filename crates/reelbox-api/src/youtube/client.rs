//! `YoutubeClient` - YouTube Data API search client implementation.

use anyhow::{Context, Result};
use reqwest::Client;
use serde::Deserialize;
use tracing::instrument;
use url::Url;

use super::api::TrailerApi;
use super::types::{TrailerResult, YoutubeSearchResponse};
use crate::error::{FetchError, FetchResult};
use crate::http::get_json;

/// Default base URL for YouTube Data API v3.
const DEFAULT_BASE_URL: &str = "https://youtube.googleapis.com/youtube/v3/";

/// YouTube search client.
#[derive(Debug)]
#[allow(clippy::module_name_repetitions)]
pub struct YoutubeClient {
    /// HTTP client.
    http_client: Client,
    /// Base URL for API requests.
    base_url: Url,
    /// API key sent as the `key` query parameter.
    api_key: String,
}

/// Builder for `YoutubeClient`.
#[derive(Debug)]
#[allow(clippy::module_name_repetitions)]
pub struct YoutubeClientBuilder {
    base_url: Option<Url>,
    api_key: Option<String>,
    user_agent: Option<String>,
}

impl YoutubeClientBuilder {
    /// Creates a new builder.
    const fn new() -> Self {
        Self {
            base_url: None,
            api_key: None,
            user_agent: None,
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

    /// Builds the client.
    ///
    /// # Errors
    ///
    /// - `api_key` is not set or blank.
    /// - `user_agent` is not set.
    /// - `reqwest::Client` build fails.
    pub fn build(self) -> Result<YoutubeClient> {
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

        Ok(YoutubeClient {
            http_client,
            base_url,
            api_key,
        })
    }
}

/// Google API error envelope.
#[derive(Debug, Deserialize)]
struct GoogleErrorResponse {
    error: GoogleErrorBody,
}

#[derive(Debug, Deserialize)]
struct GoogleErrorBody {
    code: u16,
    message: String,
}

/// Pulls `error.message` out of a Google API error envelope.
fn parse_google_error(body: &str) -> Option<String> {
    serde_json::from_str::<GoogleErrorResponse>(body)
        .ok()
        .map(|e| format!("code={}, message={}", e.error.code, e.error.message))
}

impl YoutubeClient {
    /// Creates a new builder.
    #[must_use]
    pub const fn builder() -> YoutubeClientBuilder {
        YoutubeClientBuilder::new()
    }
}

impl TrailerApi for YoutubeClient {
    #[instrument(skip_all)]
    async fn find_trailer(&self, query: &str) -> FetchResult<TrailerResult> {
        let params = [("q", String::from(query)), ("key", self.api_key.clone())];

        let response: YoutubeSearchResponse = get_json(
            &self.http_client,
            &self.base_url,
            "search",
            &params,
            parse_google_error,
        )
        .await?;

        let trailer = response.first_video().ok_or_else(|| FetchError::NotFound {
            query: String::from(query),
        })?;
        tracing::debug!(video_id = %trailer.video_id, "trailer resolved");
        Ok(trailer)
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;

    fn build_client(mock_server: &wiremock::MockServer) -> YoutubeClient {
        let base_url = format!("{}/youtube/v3/", mock_server.uri());
        YoutubeClient::builder()
            .base_url(base_url.parse().unwrap())
            .api_key("yt-key")
            .user_agent("test/0.0.0")
            .build()
            .unwrap()
    }

    #[test]
    fn test_builder_requires_api_key() {
        // Arrange & Act
        let result = YoutubeClient::builder().user_agent("test/0.0.0").build();

        // Assert
        assert!(
            result
                .unwrap_err()
                .to_string()
                .contains("api_key is required")
        );
    }

    #[test]
    fn test_builder_requires_user_agent() {
        // Arrange & Act
        let result = YoutubeClient::builder().api_key("yt-key").build();

        // Assert
        assert!(
            result
                .unwrap_err()
                .to_string()
                .contains("user_agent is required")
        );
    }

    #[tokio::test]
    async fn test_find_trailer_via_http() {
        // Arrange
        let mock_server = wiremock::MockServer::start().await;
        let json_body = include_str!("../../../../fixtures/youtube/search_dune_trailer.json");

        wiremock::Mock::given(wiremock::matchers::method("GET"))
            .and(wiremock::matchers::path("/youtube/v3/search"))
            .and(wiremock::matchers::query_param("q", "Dunetrailer"))
            .and(wiremock::matchers::query_param("key", "yt-key"))
            .respond_with(wiremock::ResponseTemplate::new(200).set_body_string(json_body))
            .expect(1)
            .mount(&mock_server)
            .await;

        let client = build_client(&mock_server);

        // Act
        let trailer = client.find_trailer("Dunetrailer").await.unwrap();

        // Assert
        assert_eq!(trailer.video_id, "Way9Dexny3w");
        assert_eq!(trailer.embed_url(), "https://www.youtube.com/embed/Way9Dexny3w");
    }

    #[tokio::test]
    async fn test_zero_items_is_not_found() {
        // Arrange
        let mock_server = wiremock::MockServer::start().await;
        let json_body = include_str!("../../../../fixtures/youtube/search_empty.json");

        wiremock::Mock::given(wiremock::matchers::method("GET"))
            .respond_with(wiremock::ResponseTemplate::new(200).set_body_string(json_body))
            .mount(&mock_server)
            .await;

        let client = build_client(&mock_server);

        // Act
        let result = client.find_trailer("no such film").await;

        // Assert
        let err = result.unwrap_err();
        assert!(err.is_not_found());
        assert!(err.to_string().contains("no such film"));
    }

    #[tokio::test]
    async fn test_quota_error_is_status_error() {
        // Arrange
        let mock_server = wiremock::MockServer::start().await;
        let error_body = r#"{"error":{"code":403,"message":"The request cannot be completed because you have exceeded your quota.","errors":[]}}"#;

        wiremock::Mock::given(wiremock::matchers::method("GET"))
            .respond_with(wiremock::ResponseTemplate::new(403).set_body_string(error_body))
            .mount(&mock_server)
            .await;

        let client = build_client(&mock_server);

        // Act
        let result = client.find_trailer("Dune").await;

        // Assert
        let err = result.unwrap_err();
        assert!(matches!(err, FetchError::Status { status: 403, .. }));
        assert!(err.to_string().contains("exceeded your quota"));
    }
}
