//! Terminal User Interface (TUI) for the timer.
//!
//! Shows the countdown, a settings dialog and a full-screen break overlay.
//! Built with ratatui and crossterm.

mod app;
mod event;
mod ui;

pub use app::{App, Mode, SettingsForm};

use std::io;
use std::time::Instant;

use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::prelude::*;
use tracing::info;

use crate::error::PomodoroError;

/// Run the TUI application.
///
/// # Errors
///
/// Returns an error if the TUI fails to initialize or run.
pub fn run(app: &mut App) -> Result<(), PomodoroError> {
    // Setup terminal
    enable_raw_mode()
        .map_err(|e| PomodoroError::Terminal(format!("Failed to enable raw mode: {e}")))?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)
        .map_err(|e| PomodoroError::Terminal(format!("Failed to setup terminal: {e}")))?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)
        .map_err(|e| PomodoroError::Terminal(format!("Failed to create terminal: {e}")))?;

    let result = run_app(&mut terminal, app);

    // Restore terminal
    disable_raw_mode().ok();
    execute!(terminal.backend_mut(), LeaveAlternateScreen).ok();
    terminal.show_cursor().ok();

    result
}

/// Run the main application loop.
fn run_app<B: Backend>(terminal: &mut Terminal<B>, app: &mut App) -> Result<(), PomodoroError> {
    loop {
        terminal
            .draw(|frame| ui::render(frame, app))
            .map_err(|e| PomodoroError::Terminal(format!("Failed to draw: {e}")))?;

        if let Some(action) = event::handle_events(app)? {
            let now = Instant::now();
            match action {
                event::Action::Quit => break,
                event::Action::Toggle => app.toggle(now),
                event::Action::OpenSettings => app.open_settings(),
                event::Action::SaveSettings => app.save_settings(),
                event::Action::CancelSettings => app.cancel_settings(),
                event::Action::Reset => app.reset_session(),
                event::Action::EndBreak => app.force_end_break(now),
            }
        }

        app.advance(Instant::now());
    }

    info!("quitting");
    Ok(())
}
