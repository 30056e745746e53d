//! Movie browser TUI main loop.
//!
//! Terminal events and in-flight detail fetches are polled by one
//! `tokio::select!` loop on the current thread. Every fetch resolves to its
//! request token, and the state commits it only while that token is active.

/// Browser state types.
pub mod state;
mod ui;

use std::io;

use anyhow::{Context, Result};
use crossterm::event::{
    DisableMouseCapture, EnableMouseCapture, Event, EventStream, KeyEventKind,
};
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use futures::future::LocalBoxFuture;
use futures::stream::FuturesUnordered;
use futures::{FutureExt, StreamExt};
use moviedeck_api::tmdb::{FetchError, LocalMovieApi};
use moviedeck_view::aggregator::{RequestToken, fetch_detail};
use moviedeck_view::images::ImageBase;
use moviedeck_view::model::{MovieDetail, MovieSummary};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;

use self::state::{BrowserState, Command};

/// A finished detail fetch, tagged with the token it was issued under.
type FetchOutcome = (RequestToken, Result<MovieDetail, FetchError>);

/// Runs the movie browser TUI.
///
/// # Errors
///
/// Returns an error if terminal setup or event handling fails.
pub async fn run_browser<A: LocalMovieApi>(
    api: &A,
    language: &str,
    images: &ImageBase,
    movies: Vec<MovieSummary>,
) -> Result<()> {
    let mut state = BrowserState::new(movies);

    enable_raw_mode().context("failed to enable raw mode")?;
    let mut stdout = io::stdout();
    crossterm::execute!(stdout, EnterAlternateScreen, EnableMouseCapture)
        .context("failed to enter alternate screen")?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend).context("failed to create terminal")?;

    let result = run_event_loop(&mut terminal, &mut state, api, language, images).await;

    // Cleanup (always attempt even if event loop failed)
    disable_raw_mode().context("failed to disable raw mode")?;
    crossterm::execute!(io::stdout(), DisableMouseCapture, LeaveAlternateScreen)
        .context("failed to leave alternate screen")?;

    result
}

/// Main event loop.
async fn run_event_loop<A: LocalMovieApi>(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    state: &mut BrowserState,
    api: &A,
    language: &str,
    images: &ImageBase,
) -> Result<()> {
    let mut events = EventStream::new();
    let mut in_flight: FuturesUnordered<LocalBoxFuture<'_, FetchOutcome>> =
        FuturesUnordered::new();

    loop {
        terminal
            .draw(|frame| ui::draw(frame, state, images))
            .context("failed to draw TUI")?;

        tokio::select! {
            maybe_event = events.next() => {
                let Some(event) = maybe_event else {
                    return Ok(());
                };
                let command = match event.context("failed to read event")? {
                    Event::Key(key) if key.kind == KeyEventKind::Press => {
                        state.handle_key(key.code, key.modifiers)
                    }
                    Event::Mouse(mouse) => state.handle_mouse(mouse.kind, mouse.column, mouse.row),
                    _ => Command::None,
                };
                match command {
                    Command::None => {}
                    Command::Quit => return Ok(()),
                    Command::Fetch(token) => in_flight.push(tagged_fetch(api, token, language)),
                    Command::Open(url) => open_url(&url),
                }
            }
            Some((token, result)) = in_flight.next(), if !in_flight.is_empty() => {
                state.commit(token, result);
            }
        }
    }
}

/// Wraps a detail fetch so it resolves together with its token.
fn tagged_fetch<'a, A: LocalMovieApi>(
    api: &'a A,
    token: RequestToken,
    language: &'a str,
) -> LocalBoxFuture<'a, FetchOutcome> {
    async move {
        let result = fetch_detail(api, token.movie_id(), language).await;
        (token, result)
    }
    .boxed_local()
}

/// Opens a URL in the system browser.
fn open_url(url: &str) {
    if let Err(error) = open::that(url) {
        tracing::warn!(%url, %error, "failed to open browser");
    }
}
