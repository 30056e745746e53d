//! `TmdbClient` - TMDB API client implementation.

use std::time::Duration;

use reqwest::Client;
use reqwest::header::{ACCEPT, HeaderValue};
use tracing::instrument;
use url::Url;

use super::api::LocalMovieApi;
use super::error::FetchError;
use super::types::{
    MovieDetailsParams, TmdbCredits, TmdbErrorResponse, TmdbMovieDetails, TmdbMovieList,
};

/// Default base URL for TMDB API v3.
pub const DEFAULT_BASE_URL: &str = "https://api.themoviedb.org/3/";

/// Error message used when a builder is missing its bearer token.
const MISSING_TOKEN: &str = "api_token is required";

/// Error message used when a builder is missing its user agent.
const MISSING_USER_AGENT: &str = "user_agent is required";

/// TMDB API client.
///
/// Every request is sent exactly once; failures are returned to the
/// caller without retry.
#[derive(Debug)]
#[allow(clippy::module_name_repetitions)]
pub struct TmdbClient {
    /// HTTP client.
    http_client: Client,
    /// Base URL for API requests.
    base_url: Url,
    /// Bearer API token.
    api_token: String,
}

/// Error returned by [`TmdbClientBuilder::build`].
#[derive(Debug, thiserror::Error)]
#[allow(clippy::module_name_repetitions)]
pub enum TmdbClientBuildError {
    /// A required builder field was not set.
    #[error("{0}")]
    MissingField(&'static str),
    /// The default base URL failed to parse.
    #[error("invalid default base URL: {0}")]
    BaseUrl(#[from] url::ParseError),
    /// `reqwest::Client` construction failed.
    #[error("failed to build HTTP client: {0}")]
    Http(#[from] reqwest::Error),
}

/// Builder for `TmdbClient`.
#[derive(Debug)]
#[allow(clippy::module_name_repetitions)]
pub struct TmdbClientBuilder {
    base_url: Option<Url>,
    api_token: Option<String>,
    user_agent: Option<String>,
    timeout: Option<Duration>,
}

impl TmdbClientBuilder {
    /// Creates a new builder.
    const fn new() -> Self {
        Self {
            base_url: None,
            api_token: None,
            user_agent: None,
            timeout: None,
        }
    }

    /// Overrides the base URL (for wiremock in tests).
    #[must_use]
    pub fn base_url(mut self, url: Url) -> Self {
        self.base_url = Some(url);
        self
    }

    /// Sets the API bearer token (required).
    #[must_use]
    pub fn api_token(mut self, token: impl Into<String>) -> Self {
        self.api_token = Some(token.into());
        self
    }

    /// Sets the User-Agent (required).
    #[must_use]
    pub fn user_agent(mut self, ua: impl Into<String>) -> Self {
        self.user_agent = Some(ua.into());
        self
    }

    /// Sets a whole-request timeout (default: none).
    #[must_use]
    pub const fn timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    /// Builds the client.
    ///
    /// # Errors
    ///
    /// - `api_token` is not set.
    /// - `user_agent` is not set.
    /// - `reqwest::Client` build fails.
    pub fn build(self) -> Result<TmdbClient, TmdbClientBuildError> {
        let api_token = self
            .api_token
            .ok_or(TmdbClientBuildError::MissingField(MISSING_TOKEN))?;
        let user_agent = self
            .user_agent
            .ok_or(TmdbClientBuildError::MissingField(MISSING_USER_AGENT))?;

        let base_url = match self.base_url {
            Some(url) => url,
            None => Url::parse(DEFAULT_BASE_URL)?,
        };

        let mut builder = Client::builder().user_agent(&user_agent).gzip(true);
        if let Some(timeout) = self.timeout {
            builder = builder.timeout(timeout);
        }
        let http_client = builder.build()?;

        Ok(TmdbClient {
            http_client,
            base_url,
            api_token,
        })
    }
}

impl TmdbClient {
    /// Creates a new builder.
    #[must_use]
    pub const fn builder() -> TmdbClientBuilder {
        TmdbClientBuilder::new()
    }

    /// Sends a GET request with Bearer auth and query params, and decodes
    /// the JSON body.
    #[instrument(skip_all, fields(path = %path))]
    async fn get_json<T: serde::de::DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<T, FetchError> {
        let url = self.base_url.join(path).map_err(|source| FetchError::Url {
            path: String::from(path),
            source,
        })?;

        let network = |source: reqwest::Error| FetchError::Network {
            path: String::from(path),
            source,
        };

        let request = self
            .http_client
            .get(url)
            .bearer_auth(&self.api_token)
            .header(ACCEPT, HeaderValue::from_static("application/json"))
            .query(query)
            .build()
            .map_err(network)?;

        tracing::debug!(url = %request.url(), "TMDB API request");

        let response = self.http_client.execute(request).await.map_err(network)?;
        let status = response.status();

        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| String::from("<failed to read body>"));
            let message = serde_json::from_str::<TmdbErrorResponse>(&body)
                .map_or(body, |error_response| error_response.status_message);
            return Err(FetchError::Status {
                path: String::from(path),
                status: status.as_u16(),
                message,
            });
        }

        let body = response.text().await.map_err(network)?;
        serde_json::from_str(&body).map_err(|source| FetchError::Decode {
            path: String::from(path),
            source,
        })
    }
}

impl LocalMovieApi for TmdbClient {
    #[instrument(skip_all, fields(movie_id = movie_id))]
    async fn movie_details(
        &self,
        movie_id: u64,
        params: &MovieDetailsParams,
    ) -> Result<TmdbMovieDetails, FetchError> {
        let path = format!("movie/{movie_id}");
        let mut query: Vec<(&str, String)> = vec![("language", params.language.clone())];
        if let Some(append) = params.append_to_response() {
            query.push(("append_to_response", append));
        }
        self.get_json(&path, &query).await
    }

    #[instrument(skip_all, fields(movie_id = movie_id))]
    async fn movie_credits(
        &self,
        movie_id: u64,
        language: &str,
    ) -> Result<TmdbCredits, FetchError> {
        let path = format!("movie/{movie_id}/credits");
        let query = [("language", String::from(language))];
        self.get_json(&path, &query).await
    }

    #[instrument(skip_all, fields(movie_id = movie_id))]
    async fn similar_movies(
        &self,
        movie_id: u64,
        language: &str,
    ) -> Result<TmdbMovieList, FetchError> {
        let path = format!("movie/{movie_id}/similar");
        let query = [("language", String::from(language)), ("page", String::from("1"))];
        self.get_json(&path, &query).await
    }

    #[instrument(skip_all)]
    async fn popular_movies(&self, language: &str) -> Result<TmdbMovieList, FetchError> {
        let query = [("language", String::from(language)), ("page", String::from("1"))];
        self.get_json("movie/popular", &query).await
    }

    #[instrument(skip_all, fields(url = %url))]
    async fn probe_image(&self, url: &str) -> Result<(), FetchError> {
        let image_load = |reason: String| FetchError::ImageLoad {
            url: String::from(url),
            reason,
        };

        let response = self
            .http_client
            .head(url)
            .send()
            .await
            .map_err(|e| image_load(e.to_string()))?;

        let status = response.status();
        if status.is_success() {
            Ok(())
        } else {
            Err(image_load(format!("HTTP {status}")))
        }
    }
}
