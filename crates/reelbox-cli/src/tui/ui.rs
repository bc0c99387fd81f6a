//! TUI rendering for the browser.

use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::Line;
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Row, Table, TableState, Tabs, Wrap};
use reelbox_api::tmdb::{Title, UNKNOWN_NAME, UNKNOWN_TITLE_NAME};
use reelbox_db::SavedTitle;

use super::InputMode;
use crate::screens::{App, Phase, PreviewScreen, Tab, TitleList, saved_display_name};

/// Formats a number with thousands separators (e.g. 169940 -> "169,940").
#[allow(clippy::arithmetic_side_effects)]
fn fmt_num(n: u64) -> String {
    let s = n.to_string();
    let mut result = String::with_capacity(s.len() + s.len() / 3);
    for (i, c) in s.chars().enumerate() {
        if i > 0 && (s.len() - i).is_multiple_of(3) {
            result.push(',');
        }
        result.push(c);
    }
    result
}

fn header_style() -> Style {
    Style::default()
        .fg(Color::Yellow)
        .add_modifier(Modifier::BOLD)
}

fn highlight_style() -> Style {
    Style::default()
        .fg(Color::Cyan)
        .add_modifier(Modifier::BOLD)
}

/// Draws the whole browser.
#[allow(clippy::indexing_slicing)]
pub fn draw(frame: &mut Frame, app: &mut App, input_mode: InputMode) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // tab bar
            Constraint::Min(5),    // main content
            Constraint::Length(3), // footer
        ])
        .split(frame.area());

    draw_tabs(frame, chunks[0], app.tab());

    match app.tab() {
        Tab::Home => draw_home(frame, chunks[1], app),
        Tab::Upcoming => draw_title_table(
            frame,
            chunks[1],
            " Upcoming ",
            &mut app.upcoming.list,
            UNKNOWN_TITLE_NAME,
            true,
        ),
        Tab::Search => draw_search(frame, chunks[1], app, input_mode),
        Tab::Downloads => draw_downloads(frame, chunks[1], app),
    }

    if let Some(preview) = app.preview() {
        draw_preview(frame, chunks[1], preview);
    }

    draw_footer(frame, chunks[2], app, input_mode);
}

fn draw_tabs(frame: &mut Frame, area: Rect, active: Tab) {
    let selected = Tab::ALL.iter().position(|t| *t == active).unwrap_or(0);
    let tabs = Tabs::new(Tab::ALL.iter().map(|t| t.label()))
        .select(selected)
        .highlight_style(highlight_style())
        .block(Block::default().borders(Borders::ALL).title(" reelbox "));
    frame.render_widget(tabs, area);
}

/// Appends a placeholder row while the first load is in flight.
fn status_row<T>(list: &TitleList<T>) -> Option<Row<'static>> {
    if !list.rows().is_empty() {
        return None;
    }
    match list.phase() {
        Phase::Loading => Some(Row::new(vec![String::from("Loading...")])),
        Phase::Empty | Phase::Populated | Phase::Failed => None,
    }
}

fn title_row(t: &Title, placeholder: &str) -> Row<'static> {
    Row::new(vec![
        String::from(t.display_name(placeholder)),
        t.release_year()
            .map_or_else(|| String::from("--"), |y| y.to_string()),
        format!("{:.1}", t.vote_average),
        fmt_num(t.vote_count),
    ])
}

fn draw_title_table(
    frame: &mut Frame,
    area: Rect,
    block_title: &str,
    list: &mut TitleList<Title>,
    placeholder: &str,
    focused: bool,
) {
    let border_style = if focused {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default()
    };

    let header = Row::new(vec!["Title", "Year", "Rating", "Votes"])
        .style(header_style())
        .bottom_margin(1);

    let rows: Vec<Row> = list
        .rows()
        .iter()
        .map(|t| title_row(t, placeholder))
        .chain(status_row(list))
        .collect();

    let widths = [
        Constraint::Min(20),
        Constraint::Length(6),
        Constraint::Length(7),
        Constraint::Length(10),
    ];

    let table = Table::new(rows, widths)
        .header(header)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(String::from(block_title))
                .border_style(border_style),
        )
        .row_highlight_style(highlight_style());

    if focused {
        frame.render_stateful_widget(table, area, &mut list.table_state);
    } else {
        frame.render_stateful_widget(table, area, &mut TableState::default());
    }
}

/// Draws the featured header and the five sections.
fn draw_home(frame: &mut Frame, area: Rect, app: &mut App) {
    let mut constraints = vec![Constraint::Length(3)];
    constraints.extend(app.home.sections().iter().map(|_| Constraint::Min(4)));
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .split(area);

    let featured = app
        .home
        .featured_poster_url()
        .unwrap_or_else(|| String::from("--"));
    let Some((featured_area, section_areas)) = chunks.split_first() else {
        return;
    };
    frame.render_widget(
        Paragraph::new(featured).block(Block::default().borders(Borders::ALL).title(" Featured ")),
        *featured_area,
    );

    let focused = app.home.focused_index();
    let sections = app.home.sections_mut();
    for (idx, (section, section_area)) in sections.iter_mut().zip(section_areas).enumerate() {
        let title = format!(" {} ", section.header);
        draw_title_table(
            frame,
            *section_area,
            &title,
            &mut section.list,
            UNKNOWN_TITLE_NAME,
            idx == focused,
        );
    }
}

#[allow(clippy::indexing_slicing)]
fn draw_search(frame: &mut Frame, area: Rect, app: &mut App, input_mode: InputMode) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(5)])
        .split(area);

    let input_style = if input_mode == InputMode::Search {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default()
    };
    let input = Paragraph::new(String::from(app.search.query()))
        .style(input_style)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" Search for a movie or a TV show (/) "),
        );
    frame.render_widget(input, chunks[0]);

    let block_title = if app.search.showing_results() {
        " Results "
    } else {
        " Discover "
    };
    draw_title_table(
        frame,
        chunks[1],
        block_title,
        app.search.visible_list_mut(),
        UNKNOWN_NAME,
        true,
    );
}

fn saved_row(s: &SavedTitle) -> Row<'static> {
    Row::new(vec![
        String::from(saved_display_name(s, UNKNOWN_TITLE_NAME)),
        s.media_type.clone().unwrap_or_else(|| String::from("--")),
        s.saved_at.clone(),
    ])
}

fn draw_downloads(frame: &mut Frame, area: Rect, app: &mut App) {
    let list = &mut app.downloads.list;
    let header = Row::new(vec!["Title", "Type", "Saved"])
        .style(header_style())
        .bottom_margin(1);
    let rows: Vec<Row> = list
        .rows()
        .iter()
        .map(saved_row)
        .chain(status_row(list))
        .collect();
    let widths = [
        Constraint::Min(20),
        Constraint::Length(8),
        Constraint::Length(20),
    ];
    let table = Table::new(rows, widths)
        .header(header)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" Downloads ")
                .border_style(Style::default().fg(Color::Cyan)),
        )
        .row_highlight_style(highlight_style());
    frame.render_stateful_widget(table, area, &mut list.table_state);
}

/// Returns a rectangle of `percent` width and height centered in `area`.
#[allow(clippy::arithmetic_side_effects)]
fn centered(area: Rect, percent: u16) -> Rect {
    let width = area.width * percent / 100;
    let height = area.height * percent / 100;
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}

fn draw_preview(frame: &mut Frame, area: Rect, preview: &PreviewScreen) {
    let popup = centered(area, 80);
    let (block_title, lines) = match preview {
        PreviewScreen::AwaitingTrailer { title, .. } => (
            format!(" {} ", title.display_name(UNKNOWN_TITLE_NAME)),
            vec![Line::from("Looking up trailer...")],
        ),
        PreviewScreen::Ready(p) => (
            format!(" {} ", p.name),
            vec![
                Line::from(format!("Trailer: {}", p.trailer.embed_url())),
                Line::from(format!(
                    "Poster:  {}",
                    p.poster_url.as_deref().unwrap_or("--")
                )),
                Line::from(""),
                Line::from(p.overview.clone()),
            ],
        ),
    };

    frame.render_widget(Clear, popup);
    let paragraph = Paragraph::new(lines).wrap(Wrap { trim: true }).block(
        Block::default()
            .borders(Borders::ALL)
            .title(block_title)
            .border_style(Style::default().fg(Color::Cyan)),
    );
    frame.render_widget(paragraph, popup);
}

/// Draws the footer with key hints.
fn draw_footer(frame: &mut Frame, area: Rect, app: &App, input_mode: InputMode) {
    let help_text = match (input_mode, app.preview(), app.tab()) {
        (InputMode::Search, _, _) => Line::from("Type to search | Esc/Enter: done"),
        (InputMode::Normal, Some(_), _) => {
            Line::from("o: open trailer  d: download  Esc: close  q: quit")
        }
        (InputMode::Normal, None, Tab::Home) => Line::from(
            "Tab: tabs  \u{2190}\u{2192}: section  \u{2191}\u{2193}/j/k: move  Enter: preview  d: download  q: quit",
        ),
        (InputMode::Normal, None, Tab::Search) => Line::from(
            "Tab: tabs  /: search  \u{2191}\u{2193}/j/k: move  Enter: preview  q: quit",
        ),
        (InputMode::Normal, None, Tab::Downloads) => Line::from(
            "Tab: tabs  \u{2191}\u{2193}/j/k: move  Enter: preview  x: delete  q: quit",
        ),
        (InputMode::Normal, None, Tab::Upcoming) => {
            Line::from("Tab: tabs  \u{2191}\u{2193}/j/k: move  Enter: preview  q: quit")
        }
    };

    let footer = Paragraph::new(help_text).block(Block::default().borders(Borders::ALL));
    frame.render_widget(footer, area);
}
