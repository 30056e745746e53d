//! Detail aggregation state machine.
//!
//! Each identifier change mints a [`RequestToken`]. A fetch result is
//! committed only while its token is still the active one, so a slow
//! response for a superseded identifier can never overwrite newer state.

use moviedeck_api::tmdb::{
    FetchError, FetchErrorKind, LocalMovieApi, MovieDetailsParams, TmdbCredits, TmdbMovieList,
};

use crate::model::{MovieDetail, MovieId};

/// Identifies one detail request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RequestToken {
    movie_id: MovieId,
    generation: u64,
}

impl RequestToken {
    /// Movie the request was issued for.
    #[must_use]
    pub const fn movie_id(&self) -> MovieId {
        self.movie_id
    }
}

/// Aggregator state.
#[derive(Debug, Clone, PartialEq)]
pub enum DetailState {
    /// No identifier selected.
    Idle,
    /// Request in flight.
    Loading {
        /// Requested movie.
        movie_id: MovieId,
    },
    /// Detail available.
    Loaded {
        /// Requested movie.
        movie_id: MovieId,
        /// Immutable snapshot of the response.
        detail: Box<MovieDetail>,
    },
    /// Request failed.
    Failed {
        /// Requested movie.
        movie_id: MovieId,
        /// Error kind.
        kind: FetchErrorKind,
        /// Error message for diagnostics.
        message: String,
    },
}

impl DetailState {
    /// Movie the state refers to, if any.
    #[must_use]
    pub const fn movie_id(&self) -> Option<MovieId> {
        match self {
            Self::Idle => None,
            Self::Loading { movie_id }
            | Self::Loaded { movie_id, .. }
            | Self::Failed { movie_id, .. } => Some(*movie_id),
        }
    }
}

/// Result of [`DetailAggregator::commit`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommitOutcome {
    /// The result became the current state.
    Applied,
    /// The result belonged to a superseded request and was dropped.
    Stale,
}

/// Last-request-wins detail loader state.
#[derive(Debug)]
pub struct DetailAggregator {
    state: DetailState,
    active: Option<RequestToken>,
    generation: u64,
}

impl Default for DetailAggregator {
    fn default() -> Self {
        Self::new()
    }
}

impl DetailAggregator {
    /// Creates an idle aggregator.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            state: DetailState::Idle,
            active: None,
            generation: 0,
        }
    }

    /// Current state.
    #[must_use]
    pub const fn state(&self) -> &DetailState {
        &self.state
    }

    /// Identifier of the active request, if any.
    #[must_use]
    pub fn active_id(&self) -> Option<MovieId> {
        self.active.map(|t| t.movie_id)
    }

    /// Switches to a new identifier and returns the token to fetch with.
    ///
    /// Returns `None` when `movie_id` is already the active identifier.
    pub fn on_identifier_changed(&mut self, movie_id: MovieId) -> Option<RequestToken> {
        if self.active_id() == Some(movie_id) {
            return None;
        }
        Some(self.begin(movie_id))
    }

    /// Re-issues a request for the active identifier.
    pub fn reload(&mut self) -> Option<RequestToken> {
        let movie_id = self.active_id()?;
        Some(self.begin(movie_id))
    }

    /// Drops all state, as when the view unmounts. Pending results become stale.
    pub fn reset(&mut self) {
        self.active = None;
        self.state = DetailState::Idle;
    }

    fn begin(&mut self, movie_id: MovieId) -> RequestToken {
        self.generation = self.generation.wrapping_add(1);
        let token = RequestToken {
            movie_id,
            generation: self.generation,
        };
        tracing::debug!(%movie_id, generation = token.generation, "loading movie detail");
        self.active = Some(token);
        self.state = DetailState::Loading { movie_id };
        token
    }

    /// Commits a fetch result if `token` is still active.
    pub fn commit(
        &mut self,
        token: RequestToken,
        result: Result<MovieDetail, FetchError>,
    ) -> CommitOutcome {
        if self.active != Some(token) {
            tracing::debug!(
                movie_id = %token.movie_id,
                generation = token.generation,
                "discarding stale movie detail response"
            );
            return CommitOutcome::Stale;
        }

        let movie_id = token.movie_id;
        self.state = match result {
            Ok(detail) => DetailState::Loaded {
                movie_id,
                detail: Box::new(detail),
            },
            Err(error) => {
                tracing::warn!(%movie_id, kind = ?error.kind(), %error, "failed to load movie detail");
                DetailState::Failed {
                    movie_id,
                    kind: error.kind(),
                    message: error.to_string(),
                }
            }
        };
        CommitOutcome::Applied
    }
}

/// Fetches a movie with credits, similar movies and videos appended, and
/// projects it into a [`MovieDetail`].
///
/// When the response lacks an appended section, only the missing
/// sub-resources are requested separately before combining.
///
/// # Errors
///
/// Returns the first [`FetchError`] encountered.
pub async fn fetch_detail<A: LocalMovieApi>(
    api: &A,
    movie_id: MovieId,
    language: &str,
) -> Result<MovieDetail, FetchError> {
    let params = MovieDetailsParams::new().language(language);
    let details = api.movie_details(movie_id.0, &params).await?;

    let credits: TmdbCredits = match &details.credits {
        Some(credits) => credits.clone(),
        None => {
            tracing::debug!(%movie_id, "credits not appended, fetching separately");
            api.movie_credits(movie_id.0, language).await?
        }
    };
    let similar: TmdbMovieList = match &details.similar {
        Some(similar) => similar.clone(),
        None => {
            tracing::debug!(%movie_id, "similar not appended, fetching separately");
            api.similar_movies(movie_id.0, language).await?
        }
    };

    Ok(MovieDetail::from_parts(&details, &credits, &similar))
}

/// Loads one detail from scratch and returns the terminal state
/// (`Loaded` or `Failed`).
pub async fn load_detail<A: LocalMovieApi>(
    api: &A,
    movie_id: MovieId,
    language: &str,
) -> DetailState {
    let mut aggregator = DetailAggregator::new();
    let Some(token) = aggregator.on_identifier_changed(movie_id) else {
        return aggregator.state;
    };
    let result = fetch_detail(api, movie_id, language).await;
    aggregator.commit(token, result);
    aggregator.state
}
