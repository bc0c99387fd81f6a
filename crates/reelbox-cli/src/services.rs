//! Client and store construction from configuration.

use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use reelbox_api::tmdb::TmdbClient;
use reelbox_api::youtube::YoutubeClient;
use reelbox_db::DownloadStore;
use tracing::instrument;
use url::Url;

use crate::config::{AppConfig, resolve_config_path};

/// User-Agent sent with every API request.
const USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

/// Loads the config file (if any) and applies environment overrides.
///
/// # Errors
///
/// Returns an error if the config path cannot be resolved or the file
/// cannot be parsed.
pub fn load_config(dir: Option<&Path>) -> Result<AppConfig> {
    let config_path = resolve_config_path(dir).context("failed to resolve config path")?;
    let config = AppConfig::load(&config_path).context("failed to load config")?;
    tracing::debug!(path = %config_path.display(), "config loaded");
    Ok(config.with_env())
}

fn parse_base_url(raw: &str, section: &str) -> Result<Url> {
    Url::parse(raw).with_context(|| format!("invalid [{section}] base_url: {raw}"))
}

/// Builds the TMDB catalog client.
///
/// # Errors
///
/// Returns an error if the API key is missing, the base URL is invalid,
/// or the client fails to build.
#[instrument(skip_all)]
pub fn build_tmdb_client(config: &AppConfig) -> Result<TmdbClient> {
    let mut builder = TmdbClient::builder()
        .api_key(config.tmdb_api_key()?)
        .user_agent(USER_AGENT);
    if let Some(raw) = &config.tmdb.base_url {
        builder = builder.base_url(parse_base_url(raw, "tmdb")?);
    }
    if let Some(language) = &config.tmdb.language {
        builder = builder.language(language);
    }
    builder.build().context("failed to build TMDB client")
}

/// Builds the YouTube trailer client.
///
/// # Errors
///
/// Returns an error if the API key is missing, the base URL is invalid,
/// or the client fails to build.
#[instrument(skip_all)]
pub fn build_youtube_client(config: &AppConfig) -> Result<YoutubeClient> {
    let mut builder = YoutubeClient::builder()
        .api_key(config.youtube_api_key()?)
        .user_agent(USER_AGENT);
    if let Some(raw) = &config.youtube.base_url {
        builder = builder.base_url(parse_base_url(raw, "youtube")?);
    }
    builder.build().context("failed to build YouTube client")
}

/// Shared service objects handed to the browser.
#[derive(Debug)]
pub struct Services {
    /// Catalog client.
    pub catalog: Arc<TmdbClient>,
    /// Trailer client.
    pub trailers: Arc<YoutubeClient>,
    /// Saved titles.
    pub store: Arc<DownloadStore>,
}

impl Services {
    /// Builds every service.
    ///
    /// # Errors
    ///
    /// Returns an error if a client cannot be built or the store cannot
    /// be opened.
    pub fn build(config: &AppConfig, dir: Option<&Path>) -> Result<Self> {
        Ok(Self {
            catalog: Arc::new(build_tmdb_client(config)?),
            trailers: Arc::new(build_youtube_client(config)?),
            store: Arc::new(DownloadStore::open(dir).context("failed to open database")?),
        })
    }
}
