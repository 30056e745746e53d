//! `AppConfig` struct, TOML loading and client settings resolution.

use std::path::Path;
use std::time::Duration;

use anyhow::{Context, Result, bail};
use moviedeck_api::tmdb::{DEFAULT_BASE_URL, TmdbClient};
use moviedeck_view::images::{DEFAULT_IMAGE_BASE_URL, ImageBase};
use serde::Deserialize;
use url::Url;

/// Environment variable holding the TMDB bearer token.
pub const TOKEN_ENV_VAR: &str = "TMDB_API_TOKEN";

/// Top-level application configuration.
#[derive(Debug, Deserialize, Default, PartialEq, Eq)]
pub struct AppConfig {
    /// TMDB settings.
    #[serde(default)]
    pub tmdb: TmdbConfig,
}

/// `[tmdb]` section.
#[derive(Debug, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct TmdbConfig {
    /// API base URL.
    pub base_url: String,
    /// Image CDN base URL.
    pub image_base_url: String,
    /// Response language (e.g. `"en-US"`).
    pub language: String,
    /// Request timeout in seconds. Unset or `0` disables the timeout.
    pub timeout_secs: Option<u64>,
    /// Bearer token, used when the environment variable is unset.
    pub api_token: Option<String>,
}

impl Default for TmdbConfig {
    fn default() -> Self {
        Self {
            base_url: String::from(DEFAULT_BASE_URL),
            image_base_url: String::from(DEFAULT_IMAGE_BASE_URL),
            language: String::from("en-US"),
            timeout_secs: None,
            api_token: None,
        }
    }
}

/// Settings resolved once at startup and passed by reference.
#[derive(Debug, Clone)]
pub struct ClientSettings {
    /// API base URL.
    pub base_url: Url,
    /// Image CDN base.
    pub images: ImageBase,
    /// Response language.
    pub language: String,
    /// Request timeout.
    pub timeout: Option<Duration>,
    api_token: String,
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

    /// Resolves client settings. `env_token` takes precedence over the
    /// token in the config file.
    ///
    /// # Errors
    ///
    /// Returns an error if no token is available or the base URL is invalid.
    pub fn client_settings(&self, env_token: Option<String>) -> Result<ClientSettings> {
        let api_token = env_token
            .filter(|t| !t.is_empty())
            .or_else(|| self.tmdb.api_token.clone().filter(|t| !t.is_empty()));
        let Some(api_token) = api_token else {
            bail!("{TOKEN_ENV_VAR} is not set and [tmdb] api_token is missing from the config");
        };

        let base_url = Url::parse(&self.tmdb.base_url)
            .with_context(|| format!("invalid [tmdb] base_url: {}", self.tmdb.base_url))?;

        Ok(ClientSettings {
            base_url,
            images: ImageBase::new(&self.tmdb.image_base_url),
            language: self.tmdb.language.clone(),
            timeout: self
                .tmdb
                .timeout_secs
                .filter(|&secs| secs > 0)
                .map(Duration::from_secs),
            api_token,
        })
    }
}

impl ClientSettings {
    /// Builds a TMDB client from these settings.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client fails to build.
    pub fn build_client(&self) -> Result<TmdbClient> {
        TmdbClient::builder()
            .base_url(self.base_url.clone())
            .api_token(self.api_token.clone())
            .user_agent(concat!(
                env!("CARGO_PKG_NAME"),
                "/",
                env!("CARGO_PKG_VERSION")
            ))
            .timeout(self.timeout)
            .build()
            .context("failed to build TMDB client")
    }
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
        assert_eq!(config.tmdb.base_url, "https://api.themoviedb.org/3/");
        assert_eq!(config.tmdb.language, "en-US");
        assert!(config.tmdb.timeout_secs.is_none());
    }

    #[test]
    fn test_load_nonexistent_returns_default() {
        // Arrange
        let path = Path::new("/tmp/moviedeck_test_nonexistent_config.toml");

        // Act
        let config = AppConfig::load(path).unwrap();

        // Assert
        assert_eq!(config, AppConfig::default());
    }

    #[test]
    fn test_load_partial_config() {
        // Arrange
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[tmdb]\nlanguage = \"ja-JP\"\ntimeout_secs = 10\n").unwrap();

        // Act
        let config = AppConfig::load(&path).unwrap();

        // Assert
        assert_eq!(config.tmdb.language, "ja-JP");
        assert_eq!(config.tmdb.timeout_secs, Some(10));
        assert_eq!(config.tmdb.base_url, DEFAULT_BASE_URL);
    }

    #[test]
    fn test_load_invalid_toml_fails() {
        // Arrange
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[tmdb\n").unwrap();

        // Act
        let result = AppConfig::load(&path);

        // Assert
        assert!(result.is_err());
    }

    #[test]
    fn test_env_token_overrides_config() {
        // Arrange
        let mut config = AppConfig::default();
        config.tmdb.api_token = Some(String::from("from-file"));

        // Act
        let settings = config
            .client_settings(Some(String::from("from-env")))
            .unwrap();

        // Assert
        assert_eq!(settings.api_token, "from-env");
    }

    #[test]
    fn test_config_token_used_when_env_missing() {
        // Arrange
        let mut config = AppConfig::default();
        config.tmdb.api_token = Some(String::from("from-file"));

        // Act
        let settings = config.client_settings(Some(String::new())).unwrap();

        // Assert
        assert_eq!(settings.api_token, "from-file");
    }

    #[test]
    fn test_missing_token_fails() {
        // Arrange
        let config = AppConfig::default();

        // Act
        let err = config.client_settings(None).unwrap_err();

        // Assert
        assert!(err.to_string().contains(TOKEN_ENV_VAR));
    }

    #[test]
    fn test_zero_timeout_disables_timeout() {
        // Arrange
        let mut config = AppConfig::default();
        config.tmdb.timeout_secs = Some(0);

        // Act
        let settings = config.client_settings(Some(String::from("t"))).unwrap();

        // Assert
        assert!(settings.timeout.is_none());
    }

    #[test]
    fn test_invalid_base_url_fails() {
        // Arrange
        let mut config = AppConfig::default();
        config.tmdb.base_url = String::from("not a url");

        // Act
        let result = config.client_settings(Some(String::from("t")));

        // Assert
        assert!(result.is_err());
    }

    #[test]
    fn test_build_client() {
        let settings = AppConfig::default()
            .client_settings(Some(String::from("t")))
            .unwrap();
        assert!(settings.build_client().is_ok());
    }
}
