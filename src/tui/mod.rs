//! Terminal User Interface module
//!
//! Interactive search panel: input box, results pane, status bar

pub mod app;
pub mod events;
pub mod ui;

use crate::fetch::HttpTermSource;
use crate::logging::debug_log;
use crate::panel::FileView;
use crate::{LookupError, Result};
use app::App;
use crossterm::event::{DisableMouseCapture, EnableMouseCapture, Event};
use crossterm::execute;
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use events::EventHandler;
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;
use std::io::{self, Stdout};
use std::time::Duration;

const TICK: Duration = Duration::from_millis(100);

type Term = Terminal<CrosstermBackend<Stdout>>;

fn setup_terminal() -> Result<Term> {
    enable_raw_mode().map_err(|e| LookupError::terminal_error(&e.to_string()))?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)
        .map_err(|e| LookupError::terminal_error(&e.to_string()))?;
    Terminal::new(CrosstermBackend::new(stdout))
        .map_err(|e| LookupError::terminal_error(&e.to_string()))
}

fn restore_terminal(terminal: &mut Term) -> Result<()> {
    disable_raw_mode().map_err(|e| LookupError::terminal_error(&e.to_string()))?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )
    .map_err(|e| LookupError::terminal_error(&e.to_string()))?;
    terminal
        .show_cursor()
        .map_err(|e| LookupError::terminal_error(&e.to_string()))
}

/// Run the interactive panel until the user quits
pub fn run(source: HttpTermSource, mirror: Option<FileView>) -> Result<()> {
    let mut terminal = setup_terminal()?;
    let mut app = App::new(source, mirror);

    let result = event_loop(&mut terminal, &mut app);

    // Restore even when the loop failed
    let restored = restore_terminal(&mut terminal);
    result.and(restored)
}

fn event_loop(terminal: &mut Term, app: &mut App<HttpTermSource>) -> Result<()> {
    let handler = EventHandler::new();

    while !app.should_quit {
        terminal
            .draw(|frame| ui::draw(frame, app))
            .map_err(|e| LookupError::TuiError(format!("Draw failed: {}", e)))?;

        match handler.next_event(TICK)? {
            Some(Event::Key(key)) => app.handle_key(handler.handle_key_event(key)),
            Some(Event::Mouse(mouse)) => app.handle_mouse(handler.handle_mouse_event(mouse)),
            Some(Event::Resize(width, height)) => {
                debug_log(&format!("Terminal resized to {}x{}", width, height));
            }
            _ => {}
        }

        app.poll_results()?;
    }

    Ok(())
}
