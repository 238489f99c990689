//! UI rendering for the TUI.

use ratatui::{
    layout::{Alignment, Constraint, Direction, Flex, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

use crate::output::break_title;
use crate::timer::format_mmss;
use crate::tui::app::{App, Mode, SettingsForm};

/// Render the application UI.
pub fn render(frame: &mut Frame<'_>, app: &App) {
    match &app.mode {
        Mode::Break { long } => render_break(frame, app, *long),
        Mode::Main => render_main(frame, app),
        Mode::Settings(form) => {
            render_main(frame, app);
            render_settings(frame, form, app.status.as_deref());
        }
    }
}

/// Render the countdown screen: header, clock, status bar.
fn render_main(frame: &mut Frame<'_>, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Min(0),    // Clock
            Constraint::Length(1), // Status bar
        ])
        .split(frame.area());

    let state = if app.timer.is_running() { "running" } else { "paused" };
    let header = Paragraph::new(format!(" Pomodoro Timer ({state}) "))
        .style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Cyan)),
        );
    frame.render_widget(header, chunks[0]);

    render_clock(frame, &app.label, &app.display, Color::White, chunks[1]);
    render_status_bar(frame, app, chunks[2]);
}

/// Render the full-screen break overlay.
fn render_break(frame: &mut Frame<'_>, app: &App, long: bool) {
    let area = frame.area();
    frame.render_widget(Clear, area);

    let block = Block::default()
        .title(format!(" {} ", break_title(long)))
        .title_alignment(Alignment::Center)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Green));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    render_clock(frame, &app.label, &app.display, Color::Green, inner);
}

/// Render the session label above the remaining time, centered.
fn render_clock(frame: &mut Frame<'_>, label: &str, display: &str, color: Color, area: Rect) {
    let [centered] = Layout::vertical([Constraint::Length(3)])
        .flex(Flex::Center)
        .areas(area);

    let text = vec![
        Line::from(Span::styled(label.to_string(), Style::default().fg(Color::DarkGray))),
        Line::default(),
        Line::from(Span::styled(
            display.to_string(),
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        )),
    ];

    frame.render_widget(Paragraph::new(text).alignment(Alignment::Center), centered);
}

/// Render the settings dialog on top of the main screen.
fn render_settings(frame: &mut Frame<'_>, form: &SettingsForm, status: Option<&str>) {
    let [row] = Layout::vertical([Constraint::Length(9)])
        .flex(Flex::Center)
        .areas(frame.area());
    let [area] = Layout::horizontal([Constraint::Length(40)])
        .flex(Flex::Center)
        .areas(row);

    frame.render_widget(Clear, area);

    let mut lines: Vec<Line<'_>> = SettingsForm::LABELS
        .iter()
        .zip(form.values)
        .enumerate()
        .map(|(i, (label, seconds))| {
            let style = if i == form.selected {
                Style::default().bg(Color::DarkGray).add_modifier(Modifier::BOLD)
            } else {
                Style::default()
            };
            Line::from(Span::styled(
                format!(
                    " {label:<14}{:>8} ",
                    format_mmss(chrono::Duration::seconds(seconds))
                ),
                style,
            ))
        })
        .collect();

    lines.push(Line::default());
    lines.push(Line::from(Span::styled(
        status.unwrap_or("←/→ ±1m  -/+ ±1s  Enter:save  Esc:back"),
        Style::default().fg(Color::DarkGray),
    )));

    let dialog = Paragraph::new(lines).block(
        Block::default()
            .title(" Settings ")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Yellow)),
    );
    frame.render_widget(dialog, area);
}

/// Render the status bar.
fn render_status_bar(frame: &mut Frame<'_>, app: &App, area: Rect) {
    let status_text = app
        .status
        .as_deref()
        .unwrap_or("space:start/pause | s:settings | r:reset | ?:help | q:quit");

    let status = Paragraph::new(status_text).style(Style::default().fg(Color::DarkGray));

    frame.render_widget(status, area);
}
