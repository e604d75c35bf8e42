//! Output formatting for lockin.
//!
//! Every command renders either colored text or pretty-printed JSON.

mod json;
mod pretty;

use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;

use crate::cli::args::OutputFormat;
use crate::error::LockinError;
use crate::features::activity::ActivitySession;
use crate::features::music::MusicPreferences;
use crate::features::timer::{CompletedSession, SessionTimer, TimerPhase, WorkStats};

pub use json::*;
pub use pretty::*;

/// Snapshot of the timer for display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatusReport {
    /// Idle or running.
    pub phase: TimerPhase,
    /// Total plus open session as `HH:MM:SS`.
    pub display: String,
    /// Completed seconds today.
    pub total_work_time: u64,
    /// Seconds in the open session.
    pub current_session_time: u64,
    /// Day the counters belong to.
    pub work_date: NaiveDate,
    /// When the open session began.
    pub session_started_at: Option<DateTime<Utc>>,
    /// Hour/minute breakdown.
    pub stats: WorkStats,
    /// Seconds in the activity log for today.
    pub logged_today: u64,
}

impl StatusReport {
    /// Capture `timer` alongside today's logged total.
    #[must_use]
    pub fn new(timer: &SessionTimer, logged_today: u64) -> Self {
        Self {
            phase: timer.phase(),
            display: timer.display_time(),
            total_work_time: timer.total_work_time(),
            current_session_time: timer.current_session_time(),
            work_date: timer.state().work_date,
            session_started_at: timer.session_started_at(),
            stats: timer.work_stats(),
            logged_today,
        }
    }
}

/// Timer operation requested on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TimerAction {
    /// `lockin start`
    Start,
    /// `lockin pause`
    Pause,
    /// `lockin stop`
    Stop,
    /// `lockin reset`
    Reset,
    /// `lockin toggle`
    Toggle,
}

/// Outcome of a timer operation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ActionReport {
    /// What was asked for.
    pub action: TimerAction,
    /// Whether the timer state changed.
    pub changed: bool,
    /// Session closed by the operation, if any.
    pub completed: Option<CompletedSession>,
    /// State afterwards.
    pub status: StatusReport,
}

/// Format the timer status.
///
/// # Errors
///
/// Returns `LockinError::Parse` if JSON serialization fails.
pub fn format_status(report: &StatusReport, format: OutputFormat) -> Result<String, LockinError> {
    match format {
        OutputFormat::Pretty => Ok(format_status_pretty(report)),
        OutputFormat::Json => to_json(report),
    }
}

/// Format the outcome of a timer operation.
///
/// # Errors
///
/// Returns `LockinError::Parse` if JSON serialization fails.
pub fn format_action(report: &ActionReport, format: OutputFormat) -> Result<String, LockinError> {
    match format {
        OutputFormat::Pretty => Ok(format_action_pretty(report)),
        OutputFormat::Json => to_json(report),
    }
}

/// Format the activity log.
///
/// # Errors
///
/// Returns `LockinError::Parse` if JSON serialization fails.
pub fn format_sessions(
    sessions: &[ActivitySession],
    today_total: u64,
    format: OutputFormat,
) -> Result<String, LockinError> {
    match format {
        OutputFormat::Pretty => Ok(format_sessions_pretty(sessions, today_total)),
        OutputFormat::Json => format_sessions_json(sessions, today_total),
    }
}

/// Format music preferences.
///
/// # Errors
///
/// Returns `LockinError::Parse` if JSON serialization fails.
pub fn format_music(prefs: &MusicPreferences, format: OutputFormat) -> Result<String, LockinError> {
    match format {
        OutputFormat::Pretty => Ok(format_music_pretty(prefs)),
        OutputFormat::Json => format_music_json(prefs),
    }
}
