//! Application configuration module.
//!
//! Manages the TOML config file holding TMDB endpoint, language and
//! timeout settings, and resolves the settings the client is built from.

#[allow(clippy::module_inception)]
mod config;
mod paths;

#[allow(clippy::module_name_repetitions)]
pub use config::{AppConfig, ClientSettings, TOKEN_ENV_VAR};
pub use paths::{resolve_config_path, resolve_log_path};
