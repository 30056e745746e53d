//! `MovieApi` trait definition.
#![allow(clippy::future_not_send)]

use super::error::FetchError;
use super::types::{MovieDetailsParams, TmdbCredits, TmdbMovieDetails, TmdbMovieList};

/// TMDB movie API trait.
///
/// Abstracts API operations for mock substitution in tests.
/// Uses `trait_variant::make` to generate a `Send`-bound async trait.
#[allow(clippy::module_name_repetitions)]
#[trait_variant::make(MovieApi: Send)]
pub trait LocalMovieApi {
    /// Fetches movie details with the requested sections appended.
    ///
    /// # Errors
    ///
    /// Returns [`FetchError`] if the transport fails, the status is
    /// non-success, or the body cannot be decoded.
    async fn movie_details(
        &self,
        movie_id: u64,
        params: &MovieDetailsParams,
    ) -> Result<TmdbMovieDetails, FetchError>;

    /// Fetches the cast and crew of a movie.
    ///
    /// # Errors
    ///
    /// Returns [`FetchError`] if the transport fails, the status is
    /// non-success, or the body cannot be decoded.
    async fn movie_credits(
        &self,
        movie_id: u64,
        language: &str,
    ) -> Result<TmdbCredits, FetchError>;

    /// Fetches the first page of movies similar to the given one.
    ///
    /// # Errors
    ///
    /// Returns [`FetchError`] if the transport fails, the status is
    /// non-success, or the body cannot be decoded.
    async fn similar_movies(
        &self,
        movie_id: u64,
        language: &str,
    ) -> Result<TmdbMovieList, FetchError>;

    /// Fetches the first page of popular movies.
    ///
    /// # Errors
    ///
    /// Returns [`FetchError`] if the transport fails, the status is
    /// non-success, or the body cannot be decoded.
    async fn popular_movies(&self, language: &str) -> Result<TmdbMovieList, FetchError>;

    /// Checks that an image URL is loadable.
    ///
    /// # Errors
    ///
    /// Returns [`FetchError::ImageLoad`] if the asset cannot be fetched.
    async fn probe_image(&self, url: &str) -> Result<(), FetchError>;
}
