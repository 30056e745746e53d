//! TMDB API response types and request parameters.

use serde::Deserialize;

// --- Movie Lists ---

/// Paged movie list, returned by `movie/popular` and `movie/{id}/similar`
/// and embedded in details responses as `similar`.
#[derive(Debug, Clone, Deserialize)]
pub struct TmdbMovieList {
    /// Current page number.
    #[serde(default)]
    pub page: u32,
    /// Movies on this page.
    #[serde(default)]
    pub results: Vec<TmdbMovieListItem>,
    /// Total number of pages.
    #[serde(default)]
    pub total_pages: u32,
    /// Total number of results.
    #[serde(default)]
    pub total_results: u32,
}

/// A single movie within a list.
#[derive(Debug, Clone, Deserialize)]
pub struct TmdbMovieListItem {
    /// TMDB movie ID.
    pub id: u64,
    /// Localized title.
    pub title: String,
    /// Original language (ISO 639-1).
    #[serde(default)]
    pub original_language: String,
    /// Overview text.
    #[serde(default)]
    pub overview: String,
    /// Release date (YYYY-MM-DD, empty string or null).
    pub release_date: Option<String>,
    /// Vote average.
    pub vote_average: Option<f64>,
    /// Poster image path.
    pub poster_path: Option<String>,
    /// Backdrop image path.
    pub backdrop_path: Option<String>,
}

// --- Movie Details ---

/// Response from `movie/{id}`.
///
/// The `credits`, `similar` and `videos` sections are present only when
/// requested through `append_to_response`.
#[derive(Debug, Clone, Deserialize)]
pub struct TmdbMovieDetails {
    /// TMDB movie ID.
    pub id: u64,
    /// Localized title.
    pub title: String,
    /// Original language (ISO 639-1).
    #[serde(default)]
    pub original_language: String,
    /// Overview text.
    pub overview: Option<String>,
    /// Tagline.
    pub tagline: Option<String>,
    /// Release date (YYYY-MM-DD).
    pub release_date: Option<String>,
    /// Runtime in minutes.
    pub runtime: Option<u32>,
    /// Vote average.
    pub vote_average: Option<f64>,
    /// Vote count.
    #[serde(default)]
    pub vote_count: u32,
    /// Genres.
    #[serde(default)]
    pub genres: Vec<TmdbGenre>,
    /// Poster image path.
    pub poster_path: Option<String>,
    /// Backdrop image path.
    pub backdrop_path: Option<String>,
    /// Appended credits.
    pub credits: Option<TmdbCredits>,
    /// Appended similar movies.
    pub similar: Option<TmdbMovieList>,
    /// Appended videos.
    pub videos: Option<TmdbVideoList>,
}

/// Genre entry.
#[derive(Debug, Clone, Deserialize)]
pub struct TmdbGenre {
    /// Genre ID.
    pub id: u32,
    /// Genre name.
    pub name: String,
}

/// Response from `movie/{id}/credits`, or the appended `credits` section.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TmdbCredits {
    /// Cast members in billing order.
    #[serde(default)]
    pub cast: Vec<TmdbCastMember>,
    /// Crew members.
    #[serde(default)]
    pub crew: Vec<TmdbCrewMember>,
}

/// A cast member.
#[derive(Debug, Clone, Deserialize)]
pub struct TmdbCastMember {
    /// TMDB person ID.
    pub id: u64,
    /// Person name.
    pub name: String,
    /// Character played.
    pub character: Option<String>,
    /// Headshot image path.
    pub profile_path: Option<String>,
    /// Billing order.
    pub order: Option<u32>,
}

/// A crew member.
#[derive(Debug, Clone, Deserialize)]
pub struct TmdbCrewMember {
    /// TMDB person ID.
    pub id: u64,
    /// Person name.
    pub name: String,
    /// Job title (e.g., "Director").
    #[serde(default)]
    pub job: String,
    /// Department (e.g., "Directing").
    #[serde(default)]
    pub department: String,
}

/// Appended `videos` section.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TmdbVideoList {
    /// Videos.
    #[serde(default)]
    pub results: Vec<TmdbVideo>,
}

/// A video (trailer, teaser, clip, ...).
#[derive(Debug, Clone, Deserialize)]
pub struct TmdbVideo {
    /// Video name.
    pub name: String,
    /// Site-specific key (YouTube video ID).
    pub key: String,
    /// Hosting site (e.g., "YouTube").
    pub site: String,
    /// Video type (e.g., "Trailer", "Teaser").
    #[serde(rename = "type")]
    pub video_type: String,
    /// Official flag.
    #[serde(default)]
    pub official: bool,
}

// --- Error Response ---

/// TMDB API error response body.
#[derive(Debug, Clone, Deserialize)]
pub struct TmdbErrorResponse {
    /// TMDB error code.
    pub status_code: u32,
    /// Error message.
    pub status_message: String,
    /// Success flag (always false for errors).
    #[serde(default)]
    pub success: bool,
}

// --- Details Parameters ---

/// Sub-resource that can be appended to a details request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppendSection {
    /// Cast and crew.
    Credits,
    /// Similar movies.
    Similar,
    /// Videos (trailers, teasers).
    Videos,
}

impl AppendSection {
    /// Returns the `append_to_response` token.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Credits => "credits",
            Self::Similar => "similar",
            Self::Videos => "videos",
        }
    }
}

/// Parameters for `movie/{id}`.
#[derive(Debug, Clone)]
pub struct MovieDetailsParams {
    /// Response language (default: "en-US").
    pub language: String,
    /// Sections to append (default: credits, similar, videos).
    pub append: Vec<AppendSection>,
}

impl Default for MovieDetailsParams {
    fn default() -> Self {
        Self::new()
    }
}

impl MovieDetailsParams {
    /// Creates params requesting every sub-resource the detail view uses.
    #[must_use]
    pub fn new() -> Self {
        Self {
            language: String::from("en-US"),
            append: vec![
                AppendSection::Credits,
                AppendSection::Similar,
                AppendSection::Videos,
            ],
        }
    }

    /// Sets the response language.
    #[must_use]
    pub fn language(mut self, language: impl Into<String>) -> Self {
        self.language = language.into();
        self
    }

    /// Replaces the appended sections.
    #[must_use]
    pub fn append(mut self, sections: &[AppendSection]) -> Self {
        self.append = sections.to_vec();
        self
    }

    /// Returns the comma-separated `append_to_response` value, if any.
    #[must_use]
    pub fn append_to_response(&self) -> Option<String> {
        if self.append.is_empty() {
            return None;
        }
        let tokens: Vec<&str> = self.append.iter().map(|s| s.as_str()).collect();
        Some(tokens.join(","))
    }
}
