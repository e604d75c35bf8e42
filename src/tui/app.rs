//! Application state for the watch view.

use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

use crate::cli::commands::Workspace;
use crate::core::Clock;
use crate::features::timer::{format_compact, PresentationSink, SessionTimer, TimerPhase};

/// Message shown above the timer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Notice {
    /// Shown for a while after a session starts.
    Motivation,
    /// Shown when a session reaches the break threshold.
    BreakReminder,
}

impl Notice {
    /// Text to display.
    #[must_use]
    pub const fn text(self) -> &'static str {
        match self {
            Self::Motivation => "Locked in. One thing at a time.",
            Self::BreakReminder => "Great job! Time for a 5-minute break. You've earned it! 🎉",
        }
    }
}

/// What the timer last told the view.
#[derive(Debug, Default)]
pub struct Notices {
    /// Message currently up.
    pub notice: Option<Notice>,
    /// Running flag from the last state change.
    pub running: bool,
    /// Display total from the last state change.
    pub display_seconds: u64,
}

impl PresentationSink for Notices {
    fn on_state_changed(&mut self, running: bool, total_display_seconds: u64) {
        self.running = running;
        self.display_seconds = total_display_seconds;
    }

    fn on_break_reminder(&mut self) {
        self.notice = Some(Notice::BreakReminder);
    }

    fn on_motivation_shown(&mut self) {
        self.notice = Some(Notice::Motivation);
    }

    fn on_motivation_hidden(&mut self) {
        self.notice = None;
    }
}

/// Application state.
pub struct App<'a, C> {
    workspace: &'a Workspace<C>,
    timer: SessionTimer,
    notices: Rc<RefCell<Notices>>,
    /// Status message to display.
    pub status: Option<String>,
    /// Whether the app should quit.
    pub should_quit: bool,
}

impl<'a, C: Clock + Clone + 'static> App<'a, C> {
    /// Recover the timer from `workspace`.
    pub fn new(workspace: &'a Workspace<C>) -> Self {
        let notices = Rc::new(RefCell::new(Notices::default()));
        let timer = workspace.timer(Rc::clone(&notices), true);

        Self {
            workspace,
            timer,
            notices,
            status: None,
            should_quit: false,
        }
    }

    /// Let `elapsed` of wall time pass.
    pub fn tick(&mut self, elapsed: Duration) {
        self.timer.advance(elapsed);
    }

    /// Pause or resume.
    pub fn toggle(&mut self) {
        let running = self.timer.toggle();
        self.status = Some(if running { "Running" } else { "Paused" }.to_string());
    }

    /// Stop and log the session.
    pub fn stop(&mut self) {
        self.status = Some(match self.timer.stop() {
            Some(session) => format!("Logged {}", format_compact(session.duration_seconds)),
            None => "No session to stop".to_string(),
        });
    }

    /// Zero today's total.
    pub fn reset(&mut self) {
        self.status = Some(match self.timer.reset() {
            Some(session) => format!(
                "Logged {} and reset",
                format_compact(session.duration_seconds)
            ),
            None => "Reset".to_string(),
        });
    }

    /// The timer.
    #[must_use]
    pub const fn timer(&self) -> &SessionTimer {
        &self.timer
    }

    /// Current phase.
    #[must_use]
    pub const fn phase(&self) -> TimerPhase {
        self.timer.phase()
    }

    /// Message currently up.
    #[must_use]
    pub fn notice(&self) -> Option<Notice> {
        self.notices.borrow().notice
    }

    /// Seconds in the activity log for today.
    #[must_use]
    pub fn logged_today(&self) -> u64 {
        self.workspace.activity().today_total()
    }
}
