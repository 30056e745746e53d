//! TMDB API client module.
//!
//! Handles HTTP requests to the TMDB API v3 movie endpoints
//! and retrieves movie details, credits, similar and popular lists.

mod api;
mod client;
mod error;
mod types;

#[allow(clippy::module_name_repetitions)]
pub use api::{LocalMovieApi, MovieApi};
#[allow(clippy::module_name_repetitions)]
pub use client::{DEFAULT_BASE_URL, TmdbClient, TmdbClientBuildError, TmdbClientBuilder};
pub use error::{FetchError, FetchErrorKind};
#[allow(clippy::module_name_repetitions)]
pub use types::{
    AppendSection, MovieDetailsParams, TmdbCastMember, TmdbCredits, TmdbCrewMember,
    TmdbErrorResponse, TmdbGenre, TmdbMovieDetails, TmdbMovieList, TmdbMovieListItem, TmdbVideo,
    TmdbVideoList,
};
