//! Interactive browser TUI.
//!
//! Uses `ratatui` + `crossterm` for rendering. Runs on a blocking thread
//! that owns all screen state; effects go out through the dispatcher and
//! their outcomes are applied here before each draw.

mod ui;

use std::io;
use std::ops::ControlFlow;
use std::time::Duration;

use anyhow::{Context, Result};
use crossterm::event::{self, Event, KeyCode, KeyEventKind, KeyModifiers};
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use reelbox_api::tmdb::CatalogApi;
use reelbox_api::youtube::TrailerApi;
use tokio::sync::mpsc;

use crate::dispatch::Dispatcher;
use crate::screens::{App, Effect, Outcome, Tab};

/// Keyboard input mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    /// Navigation keys.
    Normal,
    /// Keys edit the search query.
    Search,
}

/// Runs the browser until the user quits.
///
/// Must be called from a thread that may block.
///
/// # Errors
///
/// Returns an error if terminal setup or event handling fails.
pub fn run_browser<C, T>(
    dispatcher: &Dispatcher<C, T>,
    mut outcomes: mpsc::UnboundedReceiver<Outcome>,
) -> Result<()>
where
    C: CatalogApi + Send + Sync + 'static,
    T: TrailerApi + Send + Sync + 'static,
{
    let mut app = App::new();
    dispatcher.watch_store();
    for effect in app.start() {
        dispatcher.spawn(effect);
    }

    enable_raw_mode().context("failed to enable raw mode")?;
    let mut stdout = io::stdout();
    crossterm::execute!(stdout, EnterAlternateScreen)
        .context("failed to enter alternate screen")?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend).context("failed to create terminal")?;

    let result = run_event_loop(&mut terminal, &mut app, dispatcher, &mut outcomes);

    // Cleanup (always attempt even if event loop failed)
    disable_raw_mode().context("failed to disable raw mode")?;
    crossterm::execute!(io::stdout(), LeaveAlternateScreen)
        .context("failed to leave alternate screen")?;

    result
}

/// Main event loop.
fn run_event_loop<C, T>(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    dispatcher: &Dispatcher<C, T>,
    outcomes: &mut mpsc::UnboundedReceiver<Outcome>,
) -> Result<()>
where
    C: CatalogApi + Send + Sync + 'static,
    T: TrailerApi + Send + Sync + 'static,
{
    let mut input_mode = InputMode::Normal;

    loop {
        while let Ok(outcome) = outcomes.try_recv() {
            if let Some(effect) = app.apply(outcome) {
                dispatcher.spawn(effect);
            }
        }

        terminal
            .draw(|frame| ui::draw(frame, app, input_mode))
            .context("failed to draw TUI")?;

        if event::poll(Duration::from_millis(100)).context("failed to poll events")?
            && let Event::Key(key) = event::read().context("failed to read event")?
            && key.kind == KeyEventKind::Press
        {
            let flow = match input_mode {
                InputMode::Search => handle_search_input(app, &mut input_mode, key.code),
                InputMode::Normal => {
                    handle_normal_input(app, &mut input_mode, key.code, key.modifiers)
                }
            };
            match flow {
                ControlFlow::Break(()) => return Ok(()),
                ControlFlow::Continue(effects) => {
                    for effect in effects {
                        dispatcher.spawn(effect);
                    }
                }
            }
        }
    }
}

/// Handles key input while editing the search query.
fn handle_search_input(
    app: &mut App,
    input_mode: &mut InputMode,
    key: KeyCode,
) -> ControlFlow<(), Vec<Effect>> {
    let effect = match key {
        KeyCode::Esc | KeyCode::Enter => {
            *input_mode = InputMode::Normal;
            None
        }
        KeyCode::Backspace => app.search_backspace(),
        KeyCode::Char(c) => app.search_input(c),
        _ => None,
    };
    ControlFlow::Continue(effect.into_iter().collect())
}

/// Handles key input in normal mode. Breaks to exit.
fn handle_normal_input(
    app: &mut App,
    input_mode: &mut InputMode,
    key: KeyCode,
    modifiers: KeyModifiers,
) -> ControlFlow<(), Vec<Effect>> {
    let effects = match key {
        KeyCode::Char('q') => return ControlFlow::Break(()),
        KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => {
            return ControlFlow::Break(());
        }
        KeyCode::Esc => {
            app.close_preview();
            Vec::new()
        }
        KeyCode::Tab => app.next_tab(),
        KeyCode::BackTab => app.prev_tab(),
        KeyCode::Char('1') => app.select_tab(Tab::Home),
        KeyCode::Char('2') => app.select_tab(Tab::Upcoming),
        KeyCode::Char('3') => app.select_tab(Tab::Search),
        KeyCode::Char('4') => app.select_tab(Tab::Downloads),
        KeyCode::Up | KeyCode::Char('k') => {
            app.move_up();
            Vec::new()
        }
        KeyCode::Down | KeyCode::Char('j') => {
            app.move_down();
            Vec::new()
        }
        KeyCode::Left | KeyCode::Char('h') => {
            app.focus_prev_section();
            Vec::new()
        }
        KeyCode::Right | KeyCode::Char('l') => {
            app.focus_next_section();
            Vec::new()
        }
        KeyCode::Enter => app.select().into_iter().collect(),
        KeyCode::Char('d') => app.download().into_iter().collect(),
        KeyCode::Char('x') | KeyCode::Delete => app.remove().into_iter().collect(),
        KeyCode::Char('o') => app.open_trailer().into_iter().collect(),
        KeyCode::Char('/') => {
            if app.tab() == Tab::Search && app.preview().is_none() {
                *input_mode = InputMode::Search;
            }
            Vec::new()
        }
        _ => Vec::new(),
    };
    ControlFlow::Continue(effects)
}
