//! Pure projection of view state into display trees.
//!
//! Nothing here performs I/O; the terminal front end draws the returned
//! values as-is.

use moviedeck_api::tmdb::FetchErrorKind;

use crate::aggregator::DetailState;
use crate::format::{card_rating_text, language_text, rating_text, runtime_text, year_text};
use crate::images::{ImageBase, ImageSlot};
use crate::model::{MovieDetail, MovieId, MovieSummary};

/// Maximum number of cast members shown.
pub const MAX_CAST: usize = 5;

/// Maximum number of similar-movie tiles shown.
pub const MAX_SIMILAR: usize = 4;

/// Public TMDB page for a movie.
const TMDB_MOVIE_PAGE_URL: &str = "https://www.themoviedb.org/movie/";

/// Public TMDB page URL for a movie.
#[must_use]
pub fn tmdb_page_url(movie_id: MovieId) -> String {
    format!("{TMDB_MOVIE_PAGE_URL}{movie_id}")
}

/// Top-level screen for any loadable view.
#[derive(Debug, Clone, PartialEq)]
pub enum Screen<T> {
    /// Nothing selected.
    Empty,
    /// Waiting for data.
    Loading,
    /// Load failed.
    Failed(ErrorPanel),
    /// Data available.
    Ready(T),
}

/// Error panel contents.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorPanel {
    /// Failed movie.
    pub movie_id: MovieId,
    /// Error kind.
    pub kind: FetchErrorKind,
    /// Headline, e.g. `"Could not load movie 42: network error"`.
    pub headline: String,
    /// Underlying error message.
    pub detail: String,
}

/// Year, runtime and rating pills.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pills {
    /// Release year.
    pub year: String,
    /// Runtime.
    pub runtime: String,
    /// Rating to one decimal.
    pub rating: String,
}

impl Pills {
    fn of(detail: &MovieDetail) -> Self {
        Self {
            year: year_text(detail.release_date.as_deref()),
            runtime: runtime_text(detail.runtime),
            rating: rating_text(detail.vote_average),
        }
    }
}

/// Cast tile.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CastTile {
    /// Person name.
    pub name: String,
    /// Character played.
    pub character: Option<String>,
    /// Headshot image.
    pub headshot: ImageSlot,
}

/// Similar-movie tile, navigable to its own detail view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SimilarTile {
    /// Target movie.
    pub movie_id: MovieId,
    /// Title.
    pub title: String,
    /// Release year.
    pub year: String,
    /// Poster image.
    pub poster: ImageSlot,
}

/// Full detail view.
#[derive(Debug, Clone, PartialEq)]
pub struct DetailView {
    /// Movie ID.
    pub movie_id: MovieId,
    /// Title.
    pub title: String,
    /// Tagline.
    pub tagline: Option<String>,
    /// Backdrop image.
    pub backdrop: ImageSlot,
    /// Poster image.
    pub poster: ImageSlot,
    /// Metadata pills.
    pub pills: Pills,
    /// Overview text.
    pub overview: String,
    /// Genre tags, all of them, source order.
    pub genres: Vec<String>,
    /// Director names.
    pub directors: Vec<String>,
    /// First [`MAX_CAST`] cast members.
    pub cast: Vec<CastTile>,
    /// First [`MAX_SIMILAR`] similar movies.
    pub similar: Vec<SimilarTile>,
    /// Trailer URL.
    pub trailer_url: Option<String>,
    /// Public TMDB page.
    pub page_url: String,
}

impl DetailView {
    /// Mutable references to every image slot in the view.
    pub fn image_slots_mut(&mut self) -> impl Iterator<Item = &mut ImageSlot> {
        [&mut self.backdrop, &mut self.poster]
            .into_iter()
            .chain(self.cast.iter_mut().map(|c| &mut c.headshot))
            .chain(self.similar.iter_mut().map(|s| &mut s.poster))
    }
}

/// Maps aggregator state to a detail screen.
#[must_use]
pub fn render_detail(state: &DetailState, images: &ImageBase) -> Screen<DetailView> {
    match state {
        DetailState::Idle => Screen::Empty,
        DetailState::Loading { .. } => Screen::Loading,
        DetailState::Failed {
            movie_id,
            kind,
            message,
        } => Screen::Failed(error_panel(*movie_id, *kind, message)),
        DetailState::Loaded { detail, .. } => Screen::Ready(detail_view(detail, images)),
    }
}

fn error_panel(movie_id: MovieId, kind: FetchErrorKind, message: &str) -> ErrorPanel {
    ErrorPanel {
        movie_id,
        kind,
        headline: format!("Could not load movie {movie_id}: {kind}"),
        detail: String::from(message),
    }
}

fn detail_view(detail: &MovieDetail, images: &ImageBase) -> DetailView {
    DetailView {
        movie_id: detail.id,
        title: detail.title.clone(),
        tagline: detail.tagline.clone(),
        backdrop: images.backdrop(detail.backdrop_path.as_deref()),
        poster: images.poster(detail.poster_path.as_deref()),
        pills: Pills::of(detail),
        overview: detail.overview.clone(),
        genres: detail.genres.iter().map(|g| g.name.clone()).collect(),
        directors: detail.directors.clone(),
        cast: detail
            .cast
            .iter()
            .take(MAX_CAST)
            .map(|member| CastTile {
                name: member.name.clone(),
                character: member.character.clone(),
                headshot: images.headshot(member.profile_path.as_deref()),
            })
            .collect(),
        similar: detail
            .similar
            .iter()
            .take(MAX_SIMILAR)
            .map(|movie| SimilarTile {
                movie_id: movie.id,
                title: movie.title.clone(),
                year: year_text(movie.release_date.as_deref()),
                poster: images.poster(movie.poster_path.as_deref()),
            })
            .collect(),
        trailer_url: detail.trailer.as_ref().map(|t| t.url.clone()),
        page_url: tmdb_page_url(detail.id),
    }
}

/// Compact quick-look variant of the detail view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompactView {
    /// Title.
    pub title: String,
    /// Metadata pills.
    pub pills: Pills,
    /// Overview text.
    pub overview: String,
    /// `"Genre: a, b"`.
    pub genre_line: String,
    /// `"Cast: a, b"` with at most [`MAX_CAST`] names.
    pub cast_line: String,
}

/// Maps aggregator state to the compact quick-look screen.
#[must_use]
pub fn render_detail_compact(state: &DetailState) -> Screen<CompactView> {
    match state {
        DetailState::Loaded { detail, .. } => Screen::Ready(compact_view(detail)),
        DetailState::Failed {
            movie_id,
            kind,
            message,
        } => Screen::Failed(error_panel(*movie_id, *kind, message)),
        DetailState::Loading { .. } => Screen::Loading,
        DetailState::Idle => Screen::Empty,
    }
}

fn compact_view(detail: &MovieDetail) -> CompactView {
    let genres: Vec<&str> = detail.genres.iter().map(|g| g.name.as_str()).collect();
    let cast: Vec<&str> = detail
        .cast
        .iter()
        .take(MAX_CAST)
        .map(|c| c.name.as_str())
        .collect();
    CompactView {
        title: detail.title.clone(),
        pills: Pills::of(detail),
        overview: detail.overview.clone(),
        genre_line: format!("Genre: {}", genres.join(", ")),
        cast_line: format!("Cast: {}", cast.join(", ")),
    }
}

/// Inert action button on an expanded card.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionButton {
    /// Play.
    Play,
    /// Info.
    Info,
}

impl ActionButton {
    /// Button label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Play => "Play",
            Self::Info => "Info",
        }
    }
}

/// Expanded card overlay, shown while hovered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CardOverlay {
    /// Rating to one decimal.
    pub rating: String,
    /// Release year.
    pub year: String,
    /// Upper-cased original language.
    pub language: String,
    /// Overview text.
    pub overview: String,
    /// Action buttons, in display order.
    pub buttons: [ActionButton; 2],
}

/// Movie card on the listing grid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CardView {
    /// Movie ID.
    pub movie_id: MovieId,
    /// Title.
    pub title: String,
    /// Poster image.
    pub poster: ImageSlot,
    /// Overlay, present only while hovered.
    pub overlay: Option<CardOverlay>,
}

/// Renders a listing card; the overlay is expanded only while `hovered`.
#[must_use]
pub fn render_card(movie: &MovieSummary, hovered: bool, images: &ImageBase) -> CardView {
    let overlay = hovered.then(|| CardOverlay {
        rating: card_rating_text(movie.vote_average),
        year: year_text(movie.release_date.as_deref()),
        language: language_text(&movie.original_language),
        overview: movie.overview.clone(),
        buttons: [ActionButton::Play, ActionButton::Info],
    });
    CardView {
        movie_id: movie.id,
        title: movie.title.clone(),
        poster: images.poster(movie.poster_path.as_deref()),
        overlay,
    }
}
