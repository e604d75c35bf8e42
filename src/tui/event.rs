//! Event handling for the watch view.

use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyModifiers};

use crate::error::LockinError;

/// Action to take after handling an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Quit the application.
    Quit,
    /// Pause or resume.
    Toggle,
    /// Stop and log the session.
    Stop,
    /// Zero today's total.
    Reset,
    /// Show the key help.
    Help,
}

/// Key help shown in the status bar.
pub const HELP: &str = "space:start/pause | s:stop | r:reset | q:quit";

/// Wait up to `timeout` for a key and map it to an action.
///
/// # Errors
///
/// Returns an error if event polling fails.
pub fn handle_events(timeout: Duration) -> Result<Option<Action>, LockinError> {
    if event::poll(timeout).map_err(|e| LockinError::Terminal(format!("Event poll failed: {e}")))? {
        if let Event::Key(key) =
            event::read().map_err(|e| LockinError::Terminal(format!("Event read failed: {e}")))?
        {
            return Ok(action_for_key(key));
        }
    }

    Ok(None)
}

/// Map a key press to an action.
#[must_use]
pub fn action_for_key(key: KeyEvent) -> Option<Action> {
    // Handle Ctrl+C
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return Some(Action::Quit);
    }

    match key.code {
        KeyCode::Char('q') | KeyCode::Esc => Some(Action::Quit),
        KeyCode::Char(' ') | KeyCode::Enter => Some(Action::Toggle),
        KeyCode::Char('s') => Some(Action::Stop),
        KeyCode::Char('r') => Some(Action::Reset),
        KeyCode::Char('?') => Some(Action::Help),
        _ => None,
    }
}
