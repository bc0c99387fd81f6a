//! Single-shot JSON GET shared by the API clients.

use reqwest::Client;
use serde::de::DeserializeOwned;
use tracing::instrument;
use url::Url;

use crate::error::{FetchError, FetchResult};

/// Extracts a readable message from a non-success response body.
pub(crate) type ErrorBodyParser = fn(&str) -> Option<String>;

/// Sends one GET request and decodes the JSON body.
///
/// No retry and no pagination: one call, one round trip. The query may
/// carry an API key, so only the path is logged.
#[instrument(skip_all, fields(path = %path))]
pub(crate) async fn get_json<T: DeserializeOwned>(
    http_client: &Client,
    base_url: &Url,
    path: &str,
    query: &[(&str, String)],
    parse_error_body: ErrorBodyParser,
) -> FetchResult<T> {
    let url = base_url.join(path).map_err(|e| FetchError::Request {
        path: String::from(path),
        reason: e.to_string(),
    })?;

    let request = http_client
        .get(url)
        .query(query)
        .build()
        .map_err(|e| FetchError::Request {
            path: String::from(path),
            reason: e.to_string(),
        })?;

    tracing::debug!("API request");

    let response = http_client
        .execute(request)
        .await
        .map_err(|source| FetchError::Transport {
            path: String::from(path),
            source,
        })?;

    let status = response.status();
    let body = response
        .text()
        .await
        .map_err(|source| FetchError::Transport {
            path: String::from(path),
            source,
        })?;

    if !status.is_success() {
        let message = parse_error_body(&body).unwrap_or(body);
        tracing::debug!(status = status.as_u16(), "API request failed");
        return Err(FetchError::Status {
            path: String::from(path),
            status: status.as_u16(),
            message,
        });
    }

    serde_json::from_str(&body).map_err(|source| FetchError::Decode {
        path: String::from(path),
        source,
    })
}
