//! Application configuration module.
//!
//! Loads the TOML config file holding API keys and endpoint overrides,
//! with environment variables taking precedence for the keys.

#[allow(clippy::module_inception)]
mod config;
mod paths;

#[allow(clippy::module_name_repetitions)]
pub use config::AppConfig;
pub use paths::resolve_config_path;
