//! Fetch error types.

use thiserror::Error;

/// Error returned by every TMDB request.
///
/// No variant is retried by the client: the first failure is surfaced to
/// the caller as-is.
#[derive(Debug, Error)]
pub enum FetchError {
    /// Transport-level failure (connect, timeout, body read).
    #[error("network error while fetching {path}: {source}")]
    Network {
        /// Request path relative to the API base.
        path: String,
        /// Underlying transport error.
        #[source]
        source: reqwest::Error,
    },

    /// The server answered with a non-success status.
    #[error("TMDB API error (HTTP {status}) for {path}: {message}")]
    Status {
        /// Request path relative to the API base.
        path: String,
        /// HTTP status code.
        status: u16,
        /// TMDB `status_message`, or the raw body when it is not a TMDB error document.
        message: String,
    },

    /// The body could not be decoded as the expected JSON structure.
    #[error("failed to decode JSON response for {path}: {source}")]
    Decode {
        /// Request path relative to the API base.
        path: String,
        /// Underlying decode error.
        #[source]
        source: serde_json::Error,
    },

    /// An image asset could not be loaded.
    #[error("failed to load image {url}: {reason}")]
    ImageLoad {
        /// Absolute image URL.
        url: String,
        /// Human-readable failure reason.
        reason: String,
    },

    /// A URL could not be built from the base URL and the request path.
    #[error("invalid request URL {path}: {source}")]
    Url {
        /// Request path relative to the API base.
        path: String,
        /// Underlying parse error.
        #[source]
        source: url::ParseError,
    },
}

/// Discriminant of [`FetchError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchErrorKind {
    /// See [`FetchError::Network`].
    Network,
    /// See [`FetchError::Status`].
    Status,
    /// See [`FetchError::Decode`].
    Decode,
    /// See [`FetchError::ImageLoad`].
    ImageLoad,
}

impl FetchError {
    /// Returns the error kind.
    ///
    /// URL construction failures are reported as [`FetchErrorKind::Network`].
    #[must_use]
    pub const fn kind(&self) -> FetchErrorKind {
        match self {
            Self::Network { .. } | Self::Url { .. } => FetchErrorKind::Network,
            Self::Status { .. } => FetchErrorKind::Status,
            Self::Decode { .. } => FetchErrorKind::Decode,
            Self::ImageLoad { .. } => FetchErrorKind::ImageLoad,
        }
    }
}

impl std::fmt::Display for FetchErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Network => write!(f, "network error"),
            Self::Status => write!(f, "server error"),
            Self::Decode => write!(f, "unexpected response"),
            Self::ImageLoad => write!(f, "image failed to load"),
        }
    }
}
