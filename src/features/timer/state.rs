//! Timer state.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Whether the session clock is advancing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimerPhase {
    /// No session is open.
    Idle,
    /// A session is open and ticking.
    Running,
}

impl std::fmt::Display for TimerPhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Idle => write!(f, "Idle"),
            Self::Running => write!(f, "Running"),
        }
    }
}

/// The in-memory state of the work-session timer.
///
/// `session_start_time` is `Some` exactly when `is_running` is true.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionTimerState {
    /// Seconds of work completed in earlier sessions today.
    pub total_work_time: u64,
    /// Seconds elapsed in the open session.
    pub current_session_time: u64,
    /// Whether the session clock is advancing.
    pub is_running: bool,
    /// When the running segment started.
    pub session_start_time: Option<DateTime<Utc>>,
    /// Calendar day the counters belong to.
    pub work_date: NaiveDate,
}

impl SessionTimerState {
    /// Zero-valued state for `work_date`.
    #[must_use]
    pub const fn idle(work_date: NaiveDate) -> Self {
        Self {
            total_work_time: 0,
            current_session_time: 0,
            is_running: false,
            session_start_time: None,
            work_date,
        }
    }

    /// Current phase.
    #[must_use]
    pub const fn phase(&self) -> TimerPhase {
        if self.is_running {
            TimerPhase::Running
        } else {
            TimerPhase::Idle
        }
    }

    /// Seconds shown on the timer: today's total plus the open session.
    #[must_use]
    pub const fn display_seconds(&self) -> u64 {
        self.total_work_time.saturating_add(self.current_session_time)
    }

    /// Summary of today's work.
    #[must_use]
    pub const fn work_stats(&self) -> WorkStats {
        WorkStats {
            total_seconds: self.total_work_time,
            total_hours: self.total_work_time / 3600,
            total_minutes: (self.total_work_time % 3600) / 60,
            current_session: self.current_session_time,
        }
    }
}

/// Breakdown of the work completed today.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkStats {
    /// Total completed seconds (excluding the open session).
    pub total_seconds: u64,
    /// Whole hours of `total_seconds`.
    pub total_hours: u64,
    /// Remaining whole minutes of `total_seconds`.
    pub total_minutes: u64,
    /// Seconds in the open session.
    pub current_session: u64,
}

/// A session closed by `stop()`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompletedSession {
    /// Length of the session in seconds.
    pub duration_seconds: u64,
    /// When the session started.
    pub started_at: DateTime<Utc>,
    /// When the session was closed.
    pub ended_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, 15).unwrap()
    }

    #[test]
    fn test_idle_state() {
        let state = SessionTimerState::idle(day());
        assert_eq!(state.phase(), TimerPhase::Idle);
        assert_eq!(state.display_seconds(), 0);
        assert!(state.session_start_time.is_none());
    }

    #[test]
    fn test_display_seconds_sums_counters() {
        let state = SessionTimerState {
            total_work_time: 3600,
            current_session_time: 61,
            ..SessionTimerState::idle(day())
        };
        assert_eq!(state.display_seconds(), 3661);
    }

    #[test]
    fn test_work_stats() {
        let state = SessionTimerState {
            total_work_time: 2 * 3600 + 5 * 60 + 9,
            current_session_time: 30,
            ..SessionTimerState::idle(day())
        };

        let stats = state.work_stats();
        assert_eq!(stats.total_seconds, 7509);
        assert_eq!(stats.total_hours, 2);
        assert_eq!(stats.total_minutes, 5);
        assert_eq!(stats.current_session, 30);
    }

    #[test]
    fn test_phase_display() {
        assert_eq!(TimerPhase::Running.to_string(), "Running");
        assert_eq!(TimerPhase::Idle.to_string(), "Idle");
    }
}
