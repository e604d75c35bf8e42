use chrono::Local;
use colored::Colorize;

use super::{ActionReport, StatusReport, TimerAction};
use crate::core::format_work_date;
use crate::features::activity::ActivitySession;
use crate::features::music::MusicPreferences;
use crate::features::timer::{format_compact, format_human, TimerPhase};

/// Format the timer status as pretty output
pub fn format_status_pretty(report: &StatusReport) -> String {
    let phase = match report.phase {
        TimerPhase::Running => "● Running".green().bold(),
        TimerPhase::Idle => "○ Idle".dimmed(),
    };

    let mut output = format!("{}  {}\n", report.display.bold(), phase);
    output.push_str(&"─".repeat(40));
    output.push('\n');

    output.push_str(&format!(
        "  {}: {}\n",
        "Completed".dimmed(),
        format_human(report.total_work_time)
    ));

    if report.phase == TimerPhase::Running {
        output.push_str(&format!(
            "  {}: {}\n",
            "Session".dimmed(),
            format_compact(report.current_session_time).cyan()
        ));
    }

    if let Some(started) = report.session_started_at {
        output.push_str(&format!(
            "  {}: {}\n",
            "Started".dimmed(),
            started.with_timezone(&Local).format("%H:%M")
        ));
    }

    output.push_str(&format!(
        "  {}: {}\n",
        "Logged".dimmed(),
        format_compact(report.logged_today)
    ));
    output.push_str(&format!(
        "  {}: {}\n",
        "Date".dimmed(),
        format_work_date(report.work_date)
    ));

    output
}

/// Format the outcome of a timer operation as pretty output
pub fn format_action_pretty(report: &ActionReport) -> String {
    let headline = match (report.action, report.changed) {
        (TimerAction::Start, true) => "▶ Work session started".green().to_string(),
        (TimerAction::Start, false) => "Already running".yellow().to_string(),
        (TimerAction::Pause, true) => "⏸ Paused".yellow().to_string(),
        (TimerAction::Pause, false) => "Not running".dimmed().to_string(),
        (TimerAction::Toggle, _) => match report.status.phase {
            TimerPhase::Running => "▶ Resumed".green().to_string(),
            TimerPhase::Idle => "⏸ Paused".yellow().to_string(),
        },
        (TimerAction::Stop, true) => "■ Stopped".red().to_string(),
        (TimerAction::Stop, false) => "No session to stop".dimmed().to_string(),
        (TimerAction::Reset, true) => "↺ Timer reset".red().to_string(),
        (TimerAction::Reset, false) => "Nothing to reset".dimmed().to_string(),
    };

    let mut output = format!("{headline}\n");

    if let Some(session) = &report.completed {
        output.push_str(&format!(
            "  {}: {}\n",
            "Logged session".dimmed(),
            format_compact(session.duration_seconds).bold()
        ));
    }

    output.push('\n');
    output.push_str(&format_status_pretty(&report.status));
    output
}

/// Format the activity log as pretty output
pub fn format_sessions_pretty(sessions: &[ActivitySession], today_total: u64) -> String {
    let mut output = format!(
        "{}: {}\n",
        "Today".bold(),
        format_compact(today_total).cyan()
    );

    if sessions.is_empty() {
        output.push_str("  No sessions yet");
        return output;
    }

    output.push_str(&format!("Recent sessions ({})\n", sessions.len()));
    output.push_str(&"─".repeat(40));
    output.push('\n');

    for session in sessions {
        let started = session.start_time.with_timezone(&Local);
        output.push_str(&format!(
            "  {}  {}  {}\n",
            started.format("%Y-%m-%d").to_string().dimmed(),
            started.format("%H:%M"),
            session.formatted_duration().bold()
        ));
    }

    output
}

/// Format music preferences as pretty output
pub fn format_music_pretty(prefs: &MusicPreferences) -> String {
    let mut output = format!(
        "{}: {}  {}\n",
        "Music".bold(),
        prefs.music_type.to_string().cyan(),
        format!("(video {})", prefs.music_type.video_id()).dimmed()
    );

    let volume = if prefs.muted {
        "muted".red().to_string()
    } else {
        format!("{}%", prefs.volume)
    };
    output.push_str(&format!("  {}: {}\n", "Volume".dimmed(), volume));

    output
}
