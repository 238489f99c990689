//! Event handling for the TUI.

use std::time::Instant;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::error::PomodoroError;
use crate::tui::app::{App, Mode};

/// Action to take after handling an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Quit the application.
    Quit,
    /// Start or pause the timer.
    Toggle,
    /// Open the settings dialog.
    OpenSettings,
    /// Apply the settings dialog.
    SaveSettings,
    /// Discard the settings dialog.
    CancelSettings,
    /// Restart the current work session.
    Reset,
    /// End the break early.
    EndBreak,
}

/// Handle terminal events.
///
/// Blocks for at most the app's poll timeout. Returns an action to take,
/// or None if no action is needed.
///
/// # Errors
///
/// Returns an error if event polling fails.
pub fn handle_events(app: &mut App) -> Result<Option<Action>, PomodoroError> {
    if !event::poll(app.poll_timeout(Instant::now()))
        .map_err(|e| PomodoroError::Terminal(format!("Event poll failed: {e}")))?
    {
        return Ok(None);
    }

    match event::read().map_err(|e| PomodoroError::Terminal(format!("Event read failed: {e}")))? {
        Event::Key(key) if key.kind == KeyEventKind::Press => Ok(handle_key(app, key)),
        _ => Ok(None),
    }
}

/// Map a key press to an action for the current screen.
pub fn handle_key(app: &mut App, key: KeyEvent) -> Option<Action> {
    // Ctrl+C always quits
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return Some(Action::Quit);
    }

    match &mut app.mode {
        Mode::Break { .. } => match key.code {
            KeyCode::Char('q' | 'Q') | KeyCode::Esc => Some(Action::EndBreak),
            _ => None,
        },

        Mode::Settings(form) => {
            match key.code {
                KeyCode::Up | KeyCode::Char('k') => form.select_previous(),
                KeyCode::Down | KeyCode::Char('j') | KeyCode::Tab => form.select_next(),
                KeyCode::Left | KeyCode::Char('h') => form.adjust(-60),
                KeyCode::Right | KeyCode::Char('l') => form.adjust(60),
                KeyCode::Char('-') => form.adjust(-1),
                KeyCode::Char('+' | '=') => form.adjust(1),
                KeyCode::Enter => return Some(Action::SaveSettings),
                KeyCode::Esc => return Some(Action::CancelSettings),
                _ => {}
            }
            None
        }

        Mode::Main => match key.code {
            KeyCode::Char(' ' | 'p') => Some(Action::Toggle),
            KeyCode::Char('s') => Some(Action::OpenSettings),
            KeyCode::Char('r') => Some(Action::Reset),
            KeyCode::Char('q') | KeyCode::Esc => {
                if app.can_quit() {
                    Some(Action::Quit)
                } else {
                    app.status = Some("Finish the break before quitting".to_string());
                    None
                }
            }
            KeyCode::Char('?') => {
                app.status = Some(
                    "space:start/pause | s:settings | r:reset | q:quit".to_string(),
                );
                None
            }
            _ => None,
        },
    }
}
