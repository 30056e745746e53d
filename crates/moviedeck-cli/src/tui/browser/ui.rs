//! TUI rendering logic for the movie browser.

use moviedeck_view::images::ImageBase;
use moviedeck_view::render::{
    CardView, CompactView, DetailView, ErrorPanel, Screen, render_card, render_detail,
    render_detail_compact,
};
use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};

use super::state::{BrowserState, GRID_COLUMNS, Route};

/// Height of one card on the movies grid.
const CARD_HEIGHT: u16 = 9;

/// Draws the browser UI and records hit areas for mouse handling.
#[allow(clippy::indexing_slicing)]
pub fn draw(frame: &mut Frame, state: &mut BrowserState, images: &ImageBase) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(5),    // main content
            Constraint::Length(3), // footer
        ])
        .split(frame.area());

    match state.route() {
        Route::Movies => {
            state.similar_areas.clear();
            draw_movies(frame, chunks[0], state, images);
        }
        Route::Detail(_) => {
            state.card_areas.clear();
            draw_detail(frame, chunks[0], state, images);
        }
    }
    draw_footer(frame, chunks[1], state.route());
}

/// Draws the popular movies grid.
fn draw_movies(frame: &mut Frame, area: Rect, state: &mut BrowserState, images: &ImageBase) {
    let block = Block::default().borders(Borders::ALL).title(format!(
        " Popular Movies ({}/{}) ",
        state.selected().saturating_add(1),
        state.movies.len()
    ));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    state.card_areas.clear();
    if state.movies.is_empty() {
        frame.render_widget(Paragraph::new("No movies found."), inner);
        return;
    }

    let row_count = state.movies.len().div_ceil(GRID_COLUMNS);
    let visible_rows = usize::from(inner.height / CARD_HEIGHT).clamp(1, row_count);
    let first_row = state.scroll_to_selection(visible_rows);
    let shown_rows = visible_rows.min(row_count.saturating_sub(first_row));
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints(vec![Constraint::Length(CARD_HEIGHT); shown_rows])
        .split(inner);
    let columns = [Constraint::Ratio(1, 3); GRID_COLUMNS];

    for (row_offset, row_area) in rows.iter().enumerate() {
        let cells = Layout::default()
            .direction(Direction::Horizontal)
            .constraints(columns)
            .split(*row_area);
        for (col_index, cell) in cells.iter().enumerate() {
            let index = first_row
                .saturating_add(row_offset)
                .saturating_mul(GRID_COLUMNS)
                .saturating_add(col_index);
            let Some(movie) = state.movies.get(index) else {
                break;
            };
            let hovered = state.hovered() == Some(index);
            let card = render_card(movie, hovered, images);
            draw_card(frame, *cell, &card, index == state.selected());
            state.card_areas.push(*cell);
        }
    }
}

/// Draws one movie card, expanded when its overlay is present.
fn draw_card(frame: &mut Frame, area: Rect, card: &CardView, selected: bool) {
    let border_style = if card.overlay.is_some() {
        Style::default().fg(Color::Yellow)
    } else if selected {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default()
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(border_style)
        .title(format!(" {} ", card.title));

    let lines = match &card.overlay {
        Some(overlay) => {
            let buttons: Vec<Span> = overlay
                .buttons
                .iter()
                .flat_map(|b| {
                    [
                        Span::styled(
                            format!("[ {} ]", b.label()),
                            Style::default().add_modifier(Modifier::REVERSED),
                        ),
                        Span::raw(" "),
                    ]
                })
                .collect();
            vec![
                Line::from(format!(
                    "★ {}  {}  {}",
                    overlay.rating, overlay.year, overlay.language
                )),
                Line::from(overlay.overview.clone()),
                Line::from(buttons),
            ]
        }
        None => vec![Line::styled(
            card.poster.src().to_owned(),
            Style::default().fg(Color::DarkGray),
        )],
    };

    let paragraph = Paragraph::new(lines)
        .block(block)
        .wrap(Wrap { trim: true });
    frame.render_widget(paragraph, area);
}

/// Draws the detail screen for the current aggregator state.
fn draw_detail(frame: &mut Frame, area: Rect, state: &mut BrowserState, images: &ImageBase) {
    state.similar_areas.clear();
    match render_detail(state.detail_state(), images) {
        Screen::Empty => {
            frame.render_widget(Paragraph::new("No movie selected."), area);
        }
        Screen::Loading => {
            let loading = Paragraph::new("Loading...")
                .block(Block::default().borders(Borders::ALL).title(" Movie "));
            frame.render_widget(loading, area);
        }
        Screen::Failed(panel) => draw_error(frame, area, &panel),
        Screen::Ready(view) => {
            state.similar_areas = draw_detail_view(frame, area, &view);
        }
    }

    if state.quick_look() {
        draw_quick_look(frame, area, render_detail_compact(state.detail_state()));
    }
}

/// Draws the error panel.
fn draw_error(frame: &mut Frame, area: Rect, panel: &ErrorPanel) {
    let lines = vec![
        Line::styled(
            panel.headline.clone(),
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        ),
        Line::from(""),
        Line::from(panel.detail.clone()),
        Line::from(""),
        Line::from("Press r to retry, Esc to go back."),
    ];
    let paragraph = Paragraph::new(lines)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Red))
                .title(" Error "),
        )
        .wrap(Wrap { trim: true });
    frame.render_widget(paragraph, area);
}

/// Draws a loaded detail view. Returns the similar tile areas.
#[allow(clippy::indexing_slicing)]
fn draw_detail_view(frame: &mut Frame, area: Rect, view: &DetailView) -> Vec<Rect> {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(5), // header
            Constraint::Min(4),    // overview + cast
            Constraint::Length(6), // similar tiles
        ])
        .split(area);

    let mut header = vec![Line::styled(
        view.title.clone(),
        Style::default().add_modifier(Modifier::BOLD),
    )];
    if let Some(tagline) = &view.tagline {
        header.push(Line::styled(
            tagline.clone(),
            Style::default().add_modifier(Modifier::ITALIC),
        ));
    }
    header.push(Line::from(vec![
        pill(&view.pills.year),
        Span::raw(" "),
        pill(&view.pills.runtime),
        Span::raw(" "),
        pill(&format!("★ {}", view.pills.rating)),
    ]));
    let genres: Vec<Span> = view
        .genres
        .iter()
        .flat_map(|g| {
            [
                Span::styled(format!("#{g}"), Style::default().fg(Color::Magenta)),
                Span::raw(" "),
            ]
        })
        .collect();
    header.push(Line::from(genres));
    frame.render_widget(
        Paragraph::new(header).block(
            Block::default()
                .borders(Borders::ALL)
                .title(format!(" {} ", view.backdrop.src())),
        ),
        chunks[0],
    );

    let body = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
        .split(chunks[1]);

    let mut overview = vec![Line::from(view.overview.clone()), Line::from("")];
    if !view.directors.is_empty() {
        overview.push(Line::from(format!("Directed by {}", view.directors.join(", "))));
    }
    overview.push(Line::styled(
        format!("Poster: {}", view.poster.src()),
        Style::default().fg(Color::DarkGray),
    ));
    frame.render_widget(
        Paragraph::new(overview)
            .block(Block::default().borders(Borders::ALL).title(" Overview "))
            .wrap(Wrap { trim: true }),
        body[0],
    );

    let cast: Vec<Line> = view
        .cast
        .iter()
        .flat_map(|member| {
            let name = member.character.as_ref().map_or_else(
                || member.name.clone(),
                |character| format!("{} as {character}", member.name),
            );
            [
                Line::from(name),
                Line::styled(
                    format!("  {}", member.headshot.src()),
                    Style::default().fg(Color::DarkGray),
                ),
            ]
        })
        .collect();
    frame.render_widget(
        Paragraph::new(cast).block(Block::default().borders(Borders::ALL).title(" Cast ")),
        body[1],
    );

    draw_similar(frame, chunks[2], view)
}

/// Draws the similar-movie tiles. Returns their areas.
fn draw_similar(frame: &mut Frame, area: Rect, view: &DetailView) -> Vec<Rect> {
    let block = Block::default()
        .borders(Borders::ALL)
        .title(" Similar Movies ");
    let inner = block.inner(area);
    frame.render_widget(block, area);

    if view.similar.is_empty() {
        frame.render_widget(Paragraph::new("No similar movies."), inner);
        return Vec::new();
    }

    let count = u32::try_from(view.similar.len()).unwrap_or(1);
    let tiles = Layout::default()
        .direction(Direction::Horizontal)
        .constraints(vec![Constraint::Ratio(1, count); view.similar.len()])
        .split(inner);

    let mut areas = Vec::with_capacity(view.similar.len());
    for (n, (tile, tile_area)) in view.similar.iter().zip(tiles.iter()).enumerate() {
        let lines = vec![
            Line::styled(
                format!("[{}] {}", n.saturating_add(1), tile.title),
                Style::default().add_modifier(Modifier::BOLD),
            ),
            Line::from(tile.year.clone()),
            Line::styled(
                tile.poster.src().to_owned(),
                Style::default().fg(Color::DarkGray),
            ),
        ];
        frame.render_widget(Paragraph::new(lines).wrap(Wrap { trim: true }), *tile_area);
        areas.push(*tile_area);
    }
    areas
}

/// Draws the compact quick-look overlay centered over `area`.
fn draw_quick_look(frame: &mut Frame, area: Rect, screen: Screen<CompactView>) {
    let popup = centered(area, 70, 60);
    frame.render_widget(Clear, popup);
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Yellow))
        .title(" Quick Look ");

    let lines = match screen {
        Screen::Ready(view) => vec![
            Line::styled(view.title, Style::default().add_modifier(Modifier::BOLD)),
            Line::from(format!(
                "{}  {}  ★ {}",
                view.pills.year, view.pills.runtime, view.pills.rating
            )),
            Line::from(""),
            Line::from(view.overview),
            Line::from(""),
            Line::from(view.genre_line),
            Line::from(view.cast_line),
        ],
        Screen::Failed(panel) => vec![Line::from(panel.headline)],
        Screen::Loading => vec![Line::from("Loading...")],
        Screen::Empty => vec![Line::from("No movie selected.")],
    };
    frame.render_widget(
        Paragraph::new(lines).block(block).wrap(Wrap { trim: true }),
        popup,
    );
}

/// Draws the footer with key bindings for the current route.
fn draw_footer(frame: &mut Frame, area: Rect, route: Route) {
    let help = match route {
        Route::Movies => "←↓↑→/hjkl: Move  Enter/Click: Open  q: Quit",
        Route::Detail(_) => {
            "1-4: Similar  Space: Quick look  r: Reload  o: TMDB  t: Trailer  Esc: Back to Movies  q: Quit"
        }
    };
    let footer = Paragraph::new(help).block(Block::default().borders(Borders::ALL));
    frame.render_widget(footer, area);
}

fn pill(text: &str) -> Span<'static> {
    Span::styled(
        format!(" {text} "),
        Style::default().fg(Color::Black).bg(Color::Gray),
    )
}

/// Returns a rectangle of `percent_x` by `percent_y` centered in `area`.
#[allow(clippy::indexing_slicing)]
fn centered(area: Rect, percent_x: u16, percent_y: u16) -> Rect {
    let margin_y = 100_u16.saturating_sub(percent_y) / 2;
    let margin_x = 100_u16.saturating_sub(percent_x) / 2;
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage(margin_y),
            Constraint::Percentage(percent_y),
            Constraint::Percentage(margin_y),
        ])
        .split(area);
    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(margin_x),
            Constraint::Percentage(percent_x),
            Constraint::Percentage(margin_x),
        ])
        .split(vertical[1])[1]
}
