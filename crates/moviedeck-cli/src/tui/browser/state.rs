//! Movie browser TUI state management.

use crossterm::event::{KeyCode, KeyModifiers, MouseButton, MouseEventKind};
use moviedeck_api::tmdb::FetchError;
use moviedeck_view::aggregator::{CommitOutcome, DetailAggregator, DetailState, RequestToken};
use moviedeck_view::model::{MovieDetail, MovieId, MovieSummary};
use moviedeck_view::render::{MAX_SIMILAR, tmdb_page_url};
use ratatui::layout::{Position, Rect};

/// Number of card columns on the movies grid.
pub const GRID_COLUMNS: usize = 3;

/// Selection offset for moving one grid row.
const ROW_STEP: isize = 3;

/// Navigation target.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    /// Popular movies grid.
    Movies,
    /// Detail view for one movie.
    Detail(MovieId),
}

/// What the event loop should do after an input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Nothing.
    None,
    /// Exit the browser.
    Quit,
    /// Start a detail fetch.
    Fetch(RequestToken),
    /// Open a URL in the system browser.
    Open(String),
}

/// State for the movie browser TUI.
#[derive(Debug)]
#[allow(clippy::module_name_repetitions)]
pub struct BrowserState {
    /// Popular movies, source order.
    pub movies: Vec<MovieSummary>,
    /// Keyboard-selected card.
    selected: usize,
    /// Card under the mouse pointer.
    hovered: Option<usize>,
    /// Route history; the last entry is current.
    history: Vec<Route>,
    /// Detail loader.
    aggregator: DetailAggregator,
    /// Compact overlay visible.
    quick_look: bool,
    /// First grid row inside the visible window.
    first_row: usize,
    /// Card hit areas from the last draw, starting at `first_row`.
    pub card_areas: Vec<Rect>,
    /// Similar tile hit areas from the last draw.
    pub similar_areas: Vec<Rect>,
}

impl BrowserState {
    /// Creates a new state showing the movies grid.
    #[must_use]
    pub fn new(movies: Vec<MovieSummary>) -> Self {
        Self {
            movies,
            selected: 0,
            hovered: None,
            history: vec![Route::Movies],
            aggregator: DetailAggregator::new(),
            quick_look: false,
            first_row: 0,
            card_areas: Vec::new(),
            similar_areas: Vec::new(),
        }
    }

    /// Current route.
    #[must_use]
    pub fn route(&self) -> Route {
        self.history.last().copied().unwrap_or(Route::Movies)
    }

    /// Keyboard-selected card index.
    #[must_use]
    pub const fn selected(&self) -> usize {
        self.selected
    }

    /// Hovered card index.
    #[must_use]
    pub const fn hovered(&self) -> Option<usize> {
        self.hovered
    }

    /// Scrolls the grid window so the selected card's row is visible and
    /// returns the first visible row.
    pub fn scroll_to_selection(&mut self, visible_rows: usize) -> usize {
        let visible_rows = visible_rows.max(1);
        let selected_row = self.selected / GRID_COLUMNS;
        if selected_row < self.first_row {
            self.first_row = selected_row;
        } else if selected_row >= self.first_row.saturating_add(visible_rows) {
            self.first_row = selected_row.saturating_sub(visible_rows.saturating_sub(1));
        }
        self.first_row
    }

    /// Detail aggregator state.
    #[must_use]
    pub const fn detail_state(&self) -> &DetailState {
        self.aggregator.state()
    }

    /// Whether the quick-look overlay is visible.
    #[must_use]
    pub const fn quick_look(&self) -> bool {
        self.quick_look
    }

    /// Commits a finished fetch through the aggregator's token guard.
    pub fn commit(
        &mut self,
        token: RequestToken,
        result: Result<MovieDetail, FetchError>,
    ) -> CommitOutcome {
        self.aggregator.commit(token, result)
    }

    /// Handles a key press.
    pub fn handle_key(&mut self, key: KeyCode, modifiers: KeyModifiers) -> Command {
        match key {
            KeyCode::Char('q') => return Command::Quit,
            KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => {
                return Command::Quit;
            }
            _ => {}
        }
        match self.route() {
            Route::Movies => self.handle_movies_key(key),
            Route::Detail(_) => self.handle_detail_key(key),
        }
    }

    fn handle_movies_key(&mut self, key: KeyCode) -> Command {
        match key {
            KeyCode::Left | KeyCode::Char('h') => self.move_selection(-1),
            KeyCode::Right | KeyCode::Char('l') => self.move_selection(1),
            KeyCode::Up | KeyCode::Char('k') => self.move_selection(-ROW_STEP),
            KeyCode::Down | KeyCode::Char('j') => self.move_selection(ROW_STEP),
            KeyCode::Enter => return self.open_card(self.selected),
            _ => {}
        }
        Command::None
    }

    fn handle_detail_key(&mut self, key: KeyCode) -> Command {
        match key {
            KeyCode::Backspace | KeyCode::Esc => {
                if self.quick_look {
                    self.quick_look = false;
                    return Command::None;
                }
                return self.back();
            }
            KeyCode::Char('r') => {
                return self.aggregator.reload().map_or(Command::None, Command::Fetch);
            }
            KeyCode::Char(' ') => self.quick_look = !self.quick_look,
            KeyCode::Char('o') => {
                if let Route::Detail(id) = self.route() {
                    return Command::Open(tmdb_page_url(id));
                }
            }
            KeyCode::Char('t') => {
                if let Some(url) = self.loaded().and_then(|d| d.trailer.as_ref()) {
                    return Command::Open(url.url.clone());
                }
            }
            KeyCode::Char(c @ '1'..='4') => {
                let index = c.to_digit(10).and_then(|d| usize::try_from(d).ok());
                if let Some(index) = index.and_then(|d| d.checked_sub(1)) {
                    return self.open_similar(index);
                }
            }
            _ => {}
        }
        Command::None
    }

    /// Handles a mouse event at a terminal cell.
    pub fn handle_mouse(&mut self, kind: MouseEventKind, column: u16, row: u16) -> Command {
        let position = Position::new(column, row);
        match (self.route(), kind) {
            (Route::Movies, MouseEventKind::Moved) => {
                self.hovered = self.card_at(position);
                Command::None
            }
            (Route::Movies, MouseEventKind::Down(MouseButton::Left)) => {
                self.card_at(position).map_or(Command::None, |i| self.open_card(i))
            }
            (Route::Detail(_), MouseEventKind::Down(MouseButton::Left)) => {
                hit(&self.similar_areas, position).map_or(Command::None, |i| self.open_similar(i))
            }
            _ => Command::None,
        }
    }

    /// Movie index of the card drawn at `position`.
    fn card_at(&self, position: Position) -> Option<usize> {
        let offset = self.first_row.saturating_mul(GRID_COLUMNS);
        hit(&self.card_areas, position).map(|i| i.saturating_add(offset))
    }

    fn move_selection(&mut self, delta: isize) {
        let last = self.movies.len().saturating_sub(1);
        self.selected = self.selected.saturating_add_signed(delta).min(last);
    }

    fn open_card(&mut self, index: usize) -> Command {
        let Some(id) = self.movies.get(index).map(|m| m.id) else {
            return Command::None;
        };
        self.selected = index;
        self.open_movie(id)
    }

    fn open_similar(&mut self, index: usize) -> Command {
        if index >= MAX_SIMILAR {
            return Command::None;
        }
        let Some(id) = self.loaded().and_then(|d| d.similar.get(index)).map(|s| s.id) else {
            return Command::None;
        };
        self.open_movie(id)
    }

    /// Navigates to a movie's detail view.
    pub fn open_movie(&mut self, id: MovieId) -> Command {
        self.quick_look = false;
        self.hovered = None;
        self.history.push(Route::Detail(id));
        self.aggregator
            .on_identifier_changed(id)
            .map_or(Command::None, Command::Fetch)
    }

    /// Returns to the previous route.
    pub fn back(&mut self) -> Command {
        if self.history.len() > 1 {
            self.history.pop();
        }
        self.hovered = None;
        match self.route() {
            Route::Movies => {
                self.aggregator.reset();
                Command::None
            }
            Route::Detail(id) => self
                .aggregator
                .on_identifier_changed(id)
                .map_or(Command::None, Command::Fetch),
        }
    }

    fn loaded(&self) -> Option<&MovieDetail> {
        match self.aggregator.state() {
            DetailState::Loaded { detail, .. } => Some(detail),
            _ => None,
        }
    }
}

fn hit(areas: &[Rect], position: Position) -> Option<usize> {
    areas.iter().position(|area| area.contains(position))
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    #![allow(clippy::indexing_slicing)]
    #![allow(clippy::panic)]

    use moviedeck_api::tmdb::{TmdbMovieDetails, TmdbMovieList};
    use moviedeck_view::model::summaries;

    use super::*;

    fn make_state() -> BrowserState {
        let list: TmdbMovieList = serde_json::from_str(include_str!(
            "../../../../../fixtures/tmdb/movie_popular.json"
        ))
        .unwrap();
        let mut state = BrowserState::new(summaries(&list));
        state.card_areas = (0..state.movies.len())
            .map(|i| {
                let col = u16::try_from(i % GRID_COLUMNS).unwrap();
                let row = u16::try_from(i / GRID_COLUMNS).unwrap();
                Rect::new(col * 20, row * 10, 20, 10)
            })
            .collect();
        state
    }

    fn fixture_detail() -> MovieDetail {
        let details: TmdbMovieDetails = serde_json::from_str(include_str!(
            "../../../../../fixtures/tmdb/movie_details_12445.json"
        ))
        .unwrap();
        let credits = details.credits.clone().unwrap();
        let similar = details.similar.clone().unwrap();
        MovieDetail::from_parts(&details, &credits, &similar)
    }

    fn key(state: &mut BrowserState, code: KeyCode) -> Command {
        state.handle_key(code, KeyModifiers::NONE)
    }

    fn fetch_token(command: Command) -> RequestToken {
        match command {
            Command::Fetch(token) => token,
            other => panic!("expected Fetch, got {other:?}"),
        }
    }

    #[test]
    fn test_initial_state() {
        // Arrange & Act
        let state = make_state();

        // Assert
        assert_eq!(state.route(), Route::Movies);
        assert_eq!(state.selected(), 0);
        assert!(state.hovered().is_none());
        assert_eq!(state.detail_state(), &DetailState::Idle);
    }

    #[test]
    fn test_grid_navigation_clamps() {
        // Arrange
        let mut state = make_state();

        // Act & Assert
        key(&mut state, KeyCode::Left);
        assert_eq!(state.selected(), 0);

        key(&mut state, KeyCode::Char('l'));
        assert_eq!(state.selected(), 1);

        key(&mut state, KeyCode::Down);
        assert_eq!(state.selected(), 4);

        key(&mut state, KeyCode::Down); // past the last card
        assert_eq!(state.selected(), 5);

        key(&mut state, KeyCode::Char('k'));
        assert_eq!(state.selected(), 2);
    }

    #[test]
    fn test_mouse_move_sets_and_clears_hover() {
        // Arrange
        let mut state = make_state();

        // Act: pointer enters the second card
        state.handle_mouse(MouseEventKind::Moved, 25, 3);

        // Assert
        assert_eq!(state.hovered(), Some(1));

        // Act: pointer leaves every card
        state.handle_mouse(MouseEventKind::Moved, 100, 100);

        // Assert
        assert!(state.hovered().is_none());
    }

    #[test]
    fn test_scroll_follows_selection() {
        // Arrange
        let mut state = make_state();
        state.movies = state.movies.iter().cycle().take(20).cloned().collect();

        // Act & Assert: selection in the last row scrolls the window down
        state.selected = 19;
        assert_eq!(state.scroll_to_selection(3), 4);

        // Act & Assert: selection still inside the window keeps it
        state.selected = 13;
        assert_eq!(state.scroll_to_selection(3), 4);

        // Act & Assert: selection above the window scrolls back up
        state.selected = 1;
        assert_eq!(state.scroll_to_selection(3), 0);
    }

    #[test]
    fn test_hit_areas_map_to_scrolled_cards() {
        // Arrange: 20 cards, window of one row starting at the last row
        let mut state = make_state();
        state.movies = state.movies.iter().cycle().take(20).cloned().collect();
        state.selected = 19;
        state.scroll_to_selection(1);
        state.card_areas = vec![Rect::new(0, 0, 20, 10), Rect::new(20, 0, 20, 10)];

        // Act
        state.handle_mouse(MouseEventKind::Moved, 25, 3);

        // Assert
        assert_eq!(state.hovered(), Some(19));
    }

    #[test]
    fn test_navigation_clears_hover() {
        // Arrange
        let mut state = make_state();
        state.handle_mouse(MouseEventKind::Moved, 25, 3);
        assert_eq!(state.hovered(), Some(1));

        // Act
        key(&mut state, KeyCode::Enter);

        // Assert
        assert!(state.hovered().is_none());

        // Act: a stale hover must not survive the way back either
        state.hovered = Some(2);
        key(&mut state, KeyCode::Esc);

        // Assert
        assert_eq!(state.route(), Route::Movies);
        assert!(state.hovered().is_none());
    }

    #[test]
    fn test_enter_opens_detail_and_fetches() {
        // Arrange
        let mut state = make_state();

        // Act
        let token = fetch_token(key(&mut state, KeyCode::Enter));

        // Assert
        assert_eq!(token.movie_id(), MovieId(27_205));
        assert_eq!(state.route(), Route::Detail(MovieId(27_205)));
        assert!(matches!(state.detail_state(), DetailState::Loading { .. }));
    }

    #[test]
    fn test_click_opens_card() {
        // Arrange
        let mut state = make_state();

        // Act
        let token = fetch_token(state.handle_mouse(
            MouseEventKind::Down(MouseButton::Left),
            45,
            2,
        ));

        // Assert
        assert_eq!(token.movie_id(), MovieId(916_224));
        assert_eq!(state.selected(), 2);
    }

    #[test]
    fn test_similar_key_opens_tile_and_back_restores() {
        // Arrange
        let mut state = make_state();
        state.selected = 1;
        let first = fetch_token(key(&mut state, KeyCode::Enter));
        state.commit(first, Ok(fixture_detail()));

        // Act
        let second = fetch_token(key(&mut state, KeyCode::Char('2')));

        // Assert
        assert_eq!(second.movie_id(), MovieId(767));
        assert_eq!(state.route(), Route::Detail(MovieId(767)));

        // Act: back to the first detail refetches it
        let third = fetch_token(key(&mut state, KeyCode::Backspace));

        // Assert
        assert_eq!(third.movie_id(), MovieId(12_445));

        // Act: back to the grid
        let command = key(&mut state, KeyCode::Esc);

        // Assert
        assert_eq!(command, Command::None);
        assert_eq!(state.route(), Route::Movies);
        assert_eq!(state.detail_state(), &DetailState::Idle);
    }

    #[test]
    fn test_late_response_after_navigation_is_ignored() {
        // Arrange
        let mut state = make_state();
        let first = fetch_token(key(&mut state, KeyCode::Enter));
        key(&mut state, KeyCode::Esc);
        state.selected = 1;
        let second = fetch_token(key(&mut state, KeyCode::Enter));

        // Act
        let outcome = state.commit(first, Ok(fixture_detail()));

        // Assert
        assert_eq!(outcome, CommitOutcome::Stale);
        assert_eq!(
            state.detail_state(),
            &DetailState::Loading {
                movie_id: second.movie_id()
            }
        );
    }

    #[test]
    fn test_detail_open_commands() {
        // Arrange
        let mut state = make_state();
        state.selected = 1;
        let token = fetch_token(key(&mut state, KeyCode::Enter));
        state.commit(token, Ok(fixture_detail()));

        // Act & Assert
        assert_eq!(
            key(&mut state, KeyCode::Char('o')),
            Command::Open(String::from("https://www.themoviedb.org/movie/12445"))
        );
        assert_eq!(
            key(&mut state, KeyCode::Char('t')),
            Command::Open(String::from("https://www.youtube.com/watch?v=mObK5XD8udk"))
        );
    }

    #[test]
    fn test_reload_and_quick_look() {
        // Arrange
        let mut state = make_state();
        let first = fetch_token(key(&mut state, KeyCode::Enter));

        // Act
        let second = fetch_token(key(&mut state, KeyCode::Char('r')));
        key(&mut state, KeyCode::Char(' '));

        // Assert
        assert_ne!(first, second);
        assert!(state.quick_look());

        // Act: Esc closes the overlay before navigating back
        key(&mut state, KeyCode::Esc);

        // Assert
        assert!(!state.quick_look());
        assert_eq!(state.route(), Route::Detail(MovieId(27_205)));
    }

    #[test]
    fn test_quit_keys() {
        let mut state = make_state();
        assert_eq!(key(&mut state, KeyCode::Char('q')), Command::Quit);
        assert_eq!(
            state.handle_key(KeyCode::Char('c'), KeyModifiers::CONTROL),
            Command::Quit
        );
    }
}
