//! View models projected from TMDB responses.
//!
//! A [`MovieDetail`] is built once per detail request and never mutated
//! afterwards.

use moviedeck_api::tmdb::{
    TmdbCastMember, TmdbCredits, TmdbMovieDetails, TmdbMovieList, TmdbMovieListItem, TmdbVideo,
};

/// TMDB numeric movie identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MovieId(pub u64);

impl std::fmt::Display for MovieId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Movie as shown on listing and hover cards.
#[derive(Debug, Clone, PartialEq)]
pub struct MovieSummary {
    /// Movie ID.
    pub id: MovieId,
    /// Localized title.
    pub title: String,
    /// Poster image path.
    pub poster_path: Option<String>,
    /// Release date (YYYY-MM-DD).
    pub release_date: Option<String>,
    /// Vote average.
    pub vote_average: Option<f64>,
    /// Original language (ISO 639-1).
    pub original_language: String,
    /// Overview text.
    pub overview: String,
}

impl From<&TmdbMovieListItem> for MovieSummary {
    fn from(item: &TmdbMovieListItem) -> Self {
        Self {
            id: MovieId(item.id),
            title: item.title.clone(),
            poster_path: non_empty(item.poster_path.as_deref()),
            release_date: non_empty(item.release_date.as_deref()),
            vote_average: item.vote_average,
            original_language: item.original_language.clone(),
            overview: item.overview.clone(),
        }
    }
}

/// Converts a movie list page into summaries, order preserved.
#[must_use]
pub fn summaries(list: &TmdbMovieList) -> Vec<MovieSummary> {
    list.results.iter().map(MovieSummary::from).collect()
}

/// Genre tag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Genre {
    /// Genre ID.
    pub id: u32,
    /// Genre name.
    pub name: String,
}

/// Cast member.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CastMember {
    /// Person ID.
    pub id: u64,
    /// Person name.
    pub name: String,
    /// Character played.
    pub character: Option<String>,
    /// Headshot image path.
    pub profile_path: Option<String>,
}

impl From<&TmdbCastMember> for CastMember {
    fn from(member: &TmdbCastMember) -> Self {
        Self {
            id: member.id,
            name: member.name.clone(),
            character: non_empty(member.character.as_deref()),
            profile_path: non_empty(member.profile_path.as_deref()),
        }
    }
}

/// Playable trailer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Trailer {
    /// Video name.
    pub name: String,
    /// Watch URL.
    pub url: String,
}

/// YouTube watch URL prefix.
const YOUTUBE_WATCH_URL: &str = "https://www.youtube.com/watch?v=";

impl Trailer {
    /// Picks the first YouTube trailer, falling back to the first YouTube video.
    #[must_use]
    pub fn pick(videos: &[TmdbVideo]) -> Option<Self> {
        let youtube = || videos.iter().filter(|v| v.site == "YouTube");
        youtube()
            .find(|v| v.video_type == "Trailer")
            .or_else(|| youtube().next())
            .map(|v| Self {
                name: v.name.clone(),
                url: format!("{YOUTUBE_WATCH_URL}{}", v.key),
            })
    }
}

/// Full movie detail, combining the primary resource and its sub-resources.
#[derive(Debug, Clone, PartialEq)]
pub struct MovieDetail {
    /// Movie ID.
    pub id: MovieId,
    /// Localized title.
    pub title: String,
    /// Tagline.
    pub tagline: Option<String>,
    /// Backdrop image path.
    pub backdrop_path: Option<String>,
    /// Poster image path.
    pub poster_path: Option<String>,
    /// Release date (YYYY-MM-DD).
    pub release_date: Option<String>,
    /// Runtime in minutes.
    pub runtime: Option<u32>,
    /// Vote average.
    pub vote_average: Option<f64>,
    /// Overview text.
    pub overview: String,
    /// Genres, source order.
    pub genres: Vec<Genre>,
    /// Cast, billing order.
    pub cast: Vec<CastMember>,
    /// Directors, source order.
    pub directors: Vec<String>,
    /// Similar movies, source order.
    pub similar: Vec<MovieSummary>,
    /// Trailer, if any.
    pub trailer: Option<Trailer>,
}

impl MovieDetail {
    /// Projects a details response plus its (possibly separately fetched)
    /// credits and similar list into a view model.
    #[must_use]
    pub fn from_parts(
        details: &TmdbMovieDetails,
        credits: &TmdbCredits,
        similar: &TmdbMovieList,
    ) -> Self {
        let trailer = details
            .videos
            .as_ref()
            .and_then(|videos| Trailer::pick(&videos.results));

        Self {
            id: MovieId(details.id),
            title: details.title.clone(),
            tagline: non_empty(details.tagline.as_deref()),
            backdrop_path: non_empty(details.backdrop_path.as_deref()),
            poster_path: non_empty(details.poster_path.as_deref()),
            release_date: non_empty(details.release_date.as_deref()),
            runtime: details.runtime,
            vote_average: details.vote_average,
            overview: details.overview.clone().unwrap_or_default(),
            genres: details
                .genres
                .iter()
                .map(|g| Genre {
                    id: g.id,
                    name: g.name.clone(),
                })
                .collect(),
            cast: credits.cast.iter().map(CastMember::from).collect(),
            directors: credits
                .crew
                .iter()
                .filter(|c| c.job == "Director")
                .map(|c| c.name.clone())
                .collect(),
            similar: summaries(similar),
            trailer,
        }
    }
}

/// Treats empty strings as absent.
fn non_empty(value: Option<&str>) -> Option<String> {
    value.filter(|v| !v.is_empty()).map(String::from)
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    #![allow(clippy::indexing_slicing)]

    use super::*;

    fn fixture() -> TmdbMovieDetails {
        serde_json::from_str(include_str!(
            "../../../fixtures/tmdb/movie_details_12445.json"
        ))
        .unwrap()
    }

    #[test]
    fn test_from_parts_projects_fixture() {
        // Arrange
        let details = fixture();
        let credits = details.credits.clone().unwrap();
        let similar = details.similar.clone().unwrap();

        // Act
        let detail = MovieDetail::from_parts(&details, &credits, &similar);

        // Assert
        assert_eq!(detail.id, MovieId(12_445));
        assert_eq!(detail.tagline.as_deref(), Some("It all ends."));
        assert_eq!(detail.runtime, Some(130));
        let genres: Vec<&str> = detail.genres.iter().map(|g| g.name.as_str()).collect();
        assert_eq!(genres, ["Adventure", "Fantasy", "Mystery"]);
        assert_eq!(detail.cast.len(), 7);
        assert_eq!(detail.cast[0].name, "Daniel Radcliffe");
        assert!(detail.cast[5].profile_path.is_none());
        assert_eq!(detail.directors, ["David Yates"]);
        assert_eq!(detail.similar.len(), 6);
    }

    #[test]
    fn test_empty_strings_become_none() {
        // Arrange
        let details = fixture();
        let similar = details.similar.clone().unwrap();

        // Act
        let summaries = summaries(&similar);

        // Assert
        let undated = summaries.iter().find(|s| s.id == MovieId(999_001)).unwrap();
        assert!(undated.release_date.is_none());
        assert!(undated.poster_path.is_none());
    }

    #[test]
    fn test_trailer_prefers_youtube_trailer() {
        // Arrange
        let details = fixture();

        // Act
        let trailer = Trailer::pick(&details.videos.unwrap().results).unwrap();

        // Assert
        assert_eq!(trailer.name, "Official Trailer");
        assert_eq!(trailer.url, "https://www.youtube.com/watch?v=mObK5XD8udk");
    }

    #[test]
    fn test_trailer_falls_back_to_first_youtube_video() {
        // Arrange
        let videos: Vec<TmdbVideo> = serde_json::from_str(
            r#"[{"name":"Clip","key":"vm1","site":"Vimeo","type":"Clip"},
                {"name":"Teaser","key":"yt1","site":"YouTube","type":"Teaser"}]"#,
        )
        .unwrap();

        // Act
        let trailer = Trailer::pick(&videos).unwrap();

        // Assert
        assert_eq!(trailer.name, "Teaser");
    }

    #[test]
    fn test_no_videos_means_no_trailer() {
        assert!(Trailer::pick(&[]).is_none());
    }
}
