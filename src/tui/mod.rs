//! Terminal User Interface (TUI) for lockin.
//!
//! A live view of the work timer. Built with ratatui and crossterm.

mod app;
mod event;
mod ui;

pub use app::{App, Notice, Notices};

use std::io;
use std::time::{Duration, Instant};

use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::prelude::*;

use crate::cli::commands::Workspace;
use crate::core::Clock;
use crate::error::LockinError;

/// How long to wait for a key before redrawing.
const FRAME: Duration = Duration::from_millis(200);

/// Run the watch view until the user quits.
///
/// # Errors
///
/// Returns an error if the terminal fails to initialize or draw.
pub fn run<C: Clock + Clone + 'static>(workspace: &Workspace<C>) -> Result<(), LockinError> {
    // Setup terminal
    enable_raw_mode()
        .map_err(|e| LockinError::Terminal(format!("Failed to enable raw mode: {e}")))?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)
        .map_err(|e| LockinError::Terminal(format!("Failed to setup terminal: {e}")))?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)
        .map_err(|e| LockinError::Terminal(format!("Failed to create terminal: {e}")))?;

    let mut app = App::new(workspace);
    let result = run_app(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode().ok();
    execute!(terminal.backend_mut(), LeaveAlternateScreen).ok();
    terminal.show_cursor().ok();

    result
}

/// Run the main application loop.
fn run_app<B: Backend, C: Clock + Clone + 'static>(
    terminal: &mut Terminal<B>,
    app: &mut App<'_, C>,
) -> Result<(), LockinError> {
    let mut last = Instant::now();

    while !app.should_quit {
        terminal
            .draw(|frame| ui::render(frame, app))
            .map_err(|e| LockinError::Terminal(format!("Failed to draw: {e}")))?;

        if let Some(action) = event::handle_events(FRAME)? {
            match action {
                event::Action::Quit => app.should_quit = true,
                event::Action::Toggle => app.toggle(),
                event::Action::Stop => app.stop(),
                event::Action::Reset => app.reset(),
                event::Action::Help => app.status = Some(event::HELP.to_string()),
            }
        }

        let now = Instant::now();
        app.tick(now.duration_since(last));
        last = now;
    }

    Ok(())
}
