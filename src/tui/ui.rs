//! UI rendering for the watch view.

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::core::Clock;
use crate::features::timer::{format_compact, format_human, TimerPhase};
use crate::tui::app::App;
use crate::tui::event::HELP;

/// Render the application UI.
pub fn render<C: Clock + Clone + 'static>(frame: &mut Frame<'_>, app: &App<'_, C>) {
    // Create layout: header, timer, notice, status bar
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Min(5),    // Timer
            Constraint::Length(3), // Notice
            Constraint::Length(1), // Status bar
        ])
        .split(frame.area());

    render_header(frame, app, chunks[0]);
    render_timer(frame, app, chunks[1]);
    render_notice(frame, app, chunks[2]);
    render_status_bar(frame, app, chunks[3]);
}

fn phase_color(phase: TimerPhase) -> Color {
    match phase {
        TimerPhase::Running => Color::Green,
        TimerPhase::Idle => Color::DarkGray,
    }
}

fn render_header<C: Clock + Clone + 'static>(frame: &mut Frame<'_>, app: &App<'_, C>, area: Rect) {
    let title = format!(" lockin · {} ", app.phase());

    let header = Paragraph::new(title)
        .style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Cyan)),
        );

    frame.render_widget(header, area);
}

fn render_timer<C: Clock + Clone + 'static>(frame: &mut Frame<'_>, app: &App<'_, C>, area: Rect) {
    let timer = app.timer();
    let color = phase_color(timer.phase());

    let mut lines = vec![
        Line::from(Span::styled(
            timer.display_time(),
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(vec![
            Span::styled("Completed ", Style::default().fg(Color::DarkGray)),
            Span::raw(format_human(timer.total_work_time())),
        ]),
    ];

    if timer.is_running() {
        lines.push(Line::from(vec![
            Span::styled("Session ", Style::default().fg(Color::DarkGray)),
            Span::raw(format_compact(timer.current_session_time())),
        ]));
    }

    lines.push(Line::from(vec![
        Span::styled("Logged today ", Style::default().fg(Color::DarkGray)),
        Span::raw(format_compact(app.logged_today())),
    ]));

    let body = Paragraph::new(lines)
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(color)),
        );

    frame.render_widget(body, area);
}

fn render_notice<C: Clock + Clone + 'static>(frame: &mut Frame<'_>, app: &App<'_, C>, area: Rect) {
    let Some(notice) = app.notice() else {
        return;
    };

    let paragraph = Paragraph::new(notice.text())
        .alignment(Alignment::Center)
        .style(Style::default().fg(Color::Yellow))
        .block(Block::default().borders(Borders::ALL));

    frame.render_widget(paragraph, area);
}

fn render_status_bar<C: Clock + Clone + 'static>(frame: &mut Frame<'_>, app: &App<'_, C>, area: Rect) {
    let status_text = app.status.as_deref().unwrap_or(HELP);

    let status = Paragraph::new(status_text).style(Style::default().fg(Color::DarkGray));

    frame.render_widget(status, area);
}
