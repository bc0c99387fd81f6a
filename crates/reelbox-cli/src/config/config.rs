//! `AppConfig` struct and TOML loading.

use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Environment variable that overrides `[tmdb] api_key`.
pub const TMDB_API_KEY_ENV: &str = "TMDB_API_KEY";

/// Environment variable that overrides `[youtube] api_key`.
pub const YOUTUBE_API_KEY_ENV: &str = "YOUTUBE_API_KEY";

/// Top-level application configuration.
#[derive(Debug, Serialize, Deserialize, Default, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// TMDB catalog settings.
    #[serde(default)]
    pub tmdb: TmdbConfig,
    /// YouTube trailer search settings.
    #[serde(default)]
    pub youtube: YoutubeConfig,
}

/// TMDB catalog configuration.
#[derive(Debug, Serialize, Deserialize, Default, Clone, PartialEq, Eq)]
pub struct TmdbConfig {
    /// API key (v3).
    #[serde(default)]
    pub api_key: Option<String>,
    /// Base URL override.
    #[serde(default)]
    pub base_url: Option<String>,
    /// Response language (default "en-US").
    #[serde(default)]
    pub language: Option<String>,
}

/// YouTube search configuration.
#[derive(Debug, Serialize, Deserialize, Default, Clone, PartialEq, Eq)]
pub struct YoutubeConfig {
    /// Data API key.
    #[serde(default)]
    pub api_key: Option<String>,
    /// Base URL override.
    #[serde(default)]
    pub base_url: Option<String>,
}

impl AppConfig {
    /// Loads config from a TOML file. Returns default if file does not exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        toml::from_str(&content).with_context(|| format!("failed to parse {}", path.display()))
    }

    /// Applies API keys from the process environment.
    #[must_use]
    pub fn with_env(self) -> Self {
        self.with_env_overrides(|name| std::env::var(name).ok())
    }

    /// Applies API keys from `lookup`, which take precedence over file values.
    ///
    /// Blank values are ignored.
    #[must_use]
    pub fn with_env_overrides(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        let non_blank = |name| lookup(name).filter(|v: &String| !v.trim().is_empty());
        if let Some(key) = non_blank(TMDB_API_KEY_ENV) {
            self.tmdb.api_key = Some(key);
        }
        if let Some(key) = non_blank(YOUTUBE_API_KEY_ENV) {
            self.youtube.api_key = Some(key);
        }
        self
    }

    /// Returns the TMDB API key.
    ///
    /// # Errors
    ///
    /// Returns an error naming both sources if the key is missing.
    pub fn tmdb_api_key(&self) -> Result<&str> {
        required_key(self.tmdb.api_key.as_deref(), TMDB_API_KEY_ENV, "[tmdb] api_key")
    }

    /// Returns the YouTube API key.
    ///
    /// # Errors
    ///
    /// Returns an error naming both sources if the key is missing.
    pub fn youtube_api_key(&self) -> Result<&str> {
        required_key(
            self.youtube.api_key.as_deref(),
            YOUTUBE_API_KEY_ENV,
            "[youtube] api_key",
        )
    }
}

fn required_key<'a>(value: Option<&'a str>, env: &str, key: &str) -> Result<&'a str> {
    value
        .filter(|v| !v.trim().is_empty())
        .with_context(|| format!("API key is not configured: set {env} or {key} in config.toml"))
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;

    #[test]
    fn test_default_config() {
        // Arrange & Act
        let config = AppConfig::default();

        // Assert
        assert!(config.tmdb.api_key.is_none());
        assert!(config.youtube.api_key.is_none());
    }

    #[test]
    fn test_load_nonexistent_returns_default() {
        // Arrange
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing.toml");

        // Act
        let config = AppConfig::load(&path).unwrap();

        // Assert
        assert_eq!(config, AppConfig::default());
    }

    #[test]
    fn test_load_full_config() {
        // Arrange
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(
            &path,
            r#"
[tmdb]
api_key = "tmdb-file"
base_url = "http://localhost:1234/3/"
language = "ja-JP"

[youtube]
api_key = "yt-file"
"#,
        )
        .unwrap();

        // Act
        let config = AppConfig::load(&path).unwrap();

        // Assert
        assert_eq!(config.tmdb.api_key.as_deref(), Some("tmdb-file"));
        assert_eq!(
            config.tmdb.base_url.as_deref(),
            Some("http://localhost:1234/3/")
        );
        assert_eq!(config.tmdb.language.as_deref(), Some("ja-JP"));
        assert_eq!(config.youtube.api_key.as_deref(), Some("yt-file"));
        assert!(config.youtube.base_url.is_none());
    }

    #[test]
    fn test_load_partial_config() {
        // Arrange
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "").unwrap();

        // Act
        let config = AppConfig::load(&path).unwrap();

        // Assert
        assert_eq!(config, AppConfig::default());
    }

    #[test]
    fn test_load_invalid_toml() {
        // Arrange
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[tmdb\napi_key = 1").unwrap();

        // Act
        let result = AppConfig::load(&path);

        // Assert
        assert!(result.unwrap_err().to_string().contains("failed to parse"));
    }

    #[test]
    fn test_env_overrides_file_values() {
        // Arrange
        let mut config = AppConfig::default();
        config.tmdb.api_key = Some(String::from("tmdb-file"));
        config.youtube.api_key = Some(String::from("yt-file"));

        // Act
        let config = config.with_env_overrides(|name| match name {
            TMDB_API_KEY_ENV => Some(String::from("tmdb-env")),
            YOUTUBE_API_KEY_ENV => Some(String::from("  ")),
            _ => None,
        });

        // Assert
        assert_eq!(config.tmdb_api_key().unwrap(), "tmdb-env");
        assert_eq!(config.youtube_api_key().unwrap(), "yt-file");
    }

    #[test]
    fn test_missing_key_names_both_sources() {
        // Arrange
        let config = AppConfig::default();

        // Act
        let err = config.tmdb_api_key().unwrap_err().to_string();

        // Assert
        assert!(err.contains("TMDB_API_KEY"));
        assert!(err.contains("[tmdb] api_key"));
    }
}
