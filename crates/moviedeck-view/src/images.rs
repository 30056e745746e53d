//! Image URL construction and placeholder fallback.

use moviedeck_api::tmdb::{FetchError, LocalMovieApi};

/// Default TMDB image CDN base.
pub const DEFAULT_IMAGE_BASE_URL: &str = "https://image.tmdb.org/t/p/";

/// Bundled placeholder for missing posters and backdrops.
pub const POSTER_PLACEHOLDER: &str = "no-movie.png";

/// Placeholder for missing or broken cast headshots.
pub const HEADSHOT_PLACEHOLDER: &str = "https://via.placeholder.com/185x185?text=Actor";

/// CDN rendition size.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageSize {
    /// 185px wide (headshots).
    W185,
    /// 500px wide (posters).
    W500,
    /// Original upload (backdrops).
    Original,
}

impl ImageSize {
    /// Returns the CDN path segment.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::W185 => "w185",
            Self::W500 => "w500",
            Self::Original => "original",
        }
    }
}

/// Image CDN base, configured once at startup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageBase {
    base_url: String,
}

impl Default for ImageBase {
    fn default() -> Self {
        Self::new(DEFAULT_IMAGE_BASE_URL)
    }
}

impl ImageBase {
    /// Creates an image base; a trailing `/` is added when missing.
    #[must_use]
    pub fn new(base_url: &str) -> Self {
        let mut base_url = String::from(base_url);
        if !base_url.ends_with('/') {
            base_url.push('/');
        }
        Self { base_url }
    }

    /// Builds a slot for an API path, or a placeholder slot when the path is absent.
    #[must_use]
    pub fn slot(&self, size: ImageSize, path: Option<&str>, fallback: &'static str) -> ImageSlot {
        let source = path
            .map(|p| p.trim_start_matches('/'))
            .filter(|p| !p.is_empty())
            .map_or(ImageSource::Placeholder(fallback), |p| {
                ImageSource::Remote(format!("{}{}/{p}", self.base_url, size.as_str()))
            });
        ImageSlot { source, fallback }
    }

    /// Poster slot (`w500`).
    #[must_use]
    pub fn poster(&self, path: Option<&str>) -> ImageSlot {
        self.slot(ImageSize::W500, path, POSTER_PLACEHOLDER)
    }

    /// Backdrop slot (`original`).
    #[must_use]
    pub fn backdrop(&self, path: Option<&str>) -> ImageSlot {
        self.slot(ImageSize::Original, path, POSTER_PLACEHOLDER)
    }

    /// Cast headshot slot (`w185`).
    #[must_use]
    pub fn headshot(&self, path: Option<&str>) -> ImageSlot {
        self.slot(ImageSize::W185, path, HEADSHOT_PLACEHOLDER)
    }
}

/// Where an image is currently loaded from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImageSource {
    /// CDN URL.
    Remote(String),
    /// Placeholder asset.
    Placeholder(&'static str),
}

/// One rendered image with its fallback.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageSlot {
    source: ImageSource,
    fallback: &'static str,
}

impl ImageSlot {
    /// Returns the current source URL or placeholder path.
    #[must_use]
    pub fn src(&self) -> &str {
        match &self.source {
            ImageSource::Remote(url) => url,
            ImageSource::Placeholder(path) => path,
        }
    }

    /// Returns the current source.
    #[must_use]
    pub const fn source(&self) -> &ImageSource {
        &self.source
    }

    /// Whether the placeholder is shown.
    #[must_use]
    pub const fn is_placeholder(&self) -> bool {
        matches!(self.source, ImageSource::Placeholder(_))
    }

    /// Swaps in the placeholder after a load failure. Idempotent.
    pub fn on_load_error(&mut self, error: &FetchError) {
        if let ImageSource::Remote(url) = &self.source {
            tracing::warn!(%url, %error, "image failed to load, using placeholder");
            self.source = ImageSource::Placeholder(self.fallback);
        }
    }

    /// Probes the remote source and falls back to the placeholder on failure.
    pub async fn verify<A: LocalMovieApi>(&mut self, api: &A) {
        let ImageSource::Remote(url) = &self.source else {
            return;
        };
        let result = api.probe_image(url).await;
        if let Err(error) = result {
            self.on_load_error(&error);
        }
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    #![allow(clippy::panic)]

    use std::sync::Mutex;

    use moviedeck_api::tmdb::{
        MovieApi, MovieDetailsParams, TmdbCredits, TmdbMovieDetails, TmdbMovieList,
    };

    use super::*;

    /// Image prober that rejects every URL in `broken`.
    struct ProbeApi {
        broken: Vec<String>,
        probed: Mutex<Vec<String>>,
    }

    impl ProbeApi {
        fn new(broken: &[&str]) -> Self {
            Self {
                broken: broken.iter().map(|url| String::from(*url)).collect(),
                probed: Mutex::new(Vec::new()),
            }
        }

        fn probed(&self) -> Vec<String> {
            self.probed.lock().unwrap().clone()
        }
    }

    impl MovieApi for ProbeApi {
        async fn movie_details(
            &self,
            _movie_id: u64,
            _params: &MovieDetailsParams,
        ) -> Result<TmdbMovieDetails, FetchError> {
            panic!("details are not requested while verifying images");
        }

        async fn movie_credits(
            &self,
            _movie_id: u64,
            _language: &str,
        ) -> Result<TmdbCredits, FetchError> {
            panic!("credits are not requested while verifying images");
        }

        async fn similar_movies(
            &self,
            _movie_id: u64,
            _language: &str,
        ) -> Result<TmdbMovieList, FetchError> {
            panic!("similar movies are not requested while verifying images");
        }

        async fn popular_movies(&self, _language: &str) -> Result<TmdbMovieList, FetchError> {
            panic!("popular movies are not requested while verifying images");
        }

        async fn probe_image(&self, url: &str) -> Result<(), FetchError> {
            self.probed.lock().unwrap().push(String::from(url));
            if self.broken.iter().any(|broken| broken == url) {
                return Err(FetchError::ImageLoad {
                    url: String::from(url),
                    reason: String::from("HTTP 404 Not Found"),
                });
            }
            Ok(())
        }
    }

    fn image_error() -> FetchError {
        FetchError::ImageLoad {
            url: String::from("https://image.tmdb.org/t/p/w185/x.jpg"),
            reason: String::from("HTTP 404 Not Found"),
        }
    }

    #[test]
    fn test_poster_url_joins_base_size_and_path() {
        // Arrange
        let images = ImageBase::default();

        // Act
        let slot = images.poster(Some("/c54HpQmuwXjHq2C9wmoACjxoom3.jpg"));

        // Assert
        assert_eq!(
            slot.src(),
            "https://image.tmdb.org/t/p/w500/c54HpQmuwXjHq2C9wmoACjxoom3.jpg"
        );
        assert!(!slot.is_placeholder());
    }

    #[test]
    fn test_backdrop_uses_original_size() {
        let slot = ImageBase::default().backdrop(Some("/n5A7.jpg"));
        assert_eq!(slot.src(), "https://image.tmdb.org/t/p/original/n5A7.jpg");
    }

    #[test]
    fn test_custom_base_without_trailing_slash() {
        let slot = ImageBase::new("http://localhost:9000/t/p").headshot(Some("a.jpg"));
        assert_eq!(slot.src(), "http://localhost:9000/t/p/w185/a.jpg");
    }

    #[test]
    fn test_missing_path_uses_placeholder() {
        // Arrange
        let images = ImageBase::default();

        // Act
        let poster = images.poster(None);
        let headshot = images.headshot(Some(""));

        // Assert
        assert_eq!(poster.src(), POSTER_PLACEHOLDER);
        assert!(poster.is_placeholder());
        assert_eq!(headshot.src(), HEADSHOT_PLACEHOLDER);
    }

    #[test]
    fn test_load_error_swaps_in_placeholder() {
        // Arrange
        let mut slot = ImageBase::default().headshot(Some("/x.jpg"));

        // Act
        slot.on_load_error(&image_error());
        slot.on_load_error(&image_error());

        // Assert
        assert_eq!(slot.source(), &ImageSource::Placeholder(HEADSHOT_PLACEHOLDER));
    }

    #[tokio::test]
    async fn test_verify_failed_probe_uses_placeholder() {
        // Arrange
        let images = ImageBase::default();
        let mut broken = images.poster(Some("/broken.jpg"));
        let mut healthy = images.headshot(Some("/healthy.jpg"));
        let api = ProbeApi::new(&["https://image.tmdb.org/t/p/w500/broken.jpg"]);

        // Act
        broken.verify(&api).await;
        healthy.verify(&api).await;

        // Assert
        assert_eq!(broken.source(), &ImageSource::Placeholder(POSTER_PLACEHOLDER));
        assert_eq!(healthy.src(), "https://image.tmdb.org/t/p/w185/healthy.jpg");
    }

    #[tokio::test]
    async fn test_verify_skips_placeholder_slots() {
        // Arrange
        let mut slot = ImageBase::default().poster(None);
        let api = ProbeApi::new(&[]);

        // Act
        slot.verify(&api).await;

        // Assert
        assert!(api.probed().is_empty());
        assert!(slot.is_placeholder());
    }
}
