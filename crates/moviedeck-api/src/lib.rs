//! API client library for moviedeck.
//!
//! Provides a client for the TMDB v3 movie endpoints.

/// TMDB API client.
pub mod tmdb;
