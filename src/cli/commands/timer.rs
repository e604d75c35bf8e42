//! Timer commands.

use crate::cli::args::OutputFormat;
use crate::core::Clock;
use crate::error::LockinError;
use crate::features::timer::Detached;
use crate::output::{format_action, format_status, ActionReport, StatusReport, TimerAction};

use super::Workspace;

/// Apply one timer operation and report the outcome.
///
/// # Errors
///
/// Returns an error if output formatting fails.
pub fn timer_action<C: Clock + Clone + 'static>(
    ws: &Workspace<C>,
    action: TimerAction,
    format: OutputFormat,
) -> Result<String, LockinError> {
    let with_music = matches!(action, TimerAction::Start | TimerAction::Toggle);
    let mut timer = ws.timer(Detached, with_music);
    let before = timer.state().clone();

    let completed = match action {
        TimerAction::Start => {
            timer.start();
            None
        },
        TimerAction::Pause => {
            timer.pause();
            None
        },
        TimerAction::Stop => timer.stop(),
        TimerAction::Reset => timer.reset(),
        TimerAction::Toggle => {
            timer.toggle();
            None
        },
    };

    let report = ActionReport {
        action,
        changed: timer.state() != &before,
        completed,
        status: StatusReport::new(&timer, ws.activity().today_total()),
    };
    format_action(&report, format)
}

/// Show the timer without changing it.
///
/// # Errors
///
/// Returns an error if output formatting fails.
pub fn status<C: Clock + Clone + 'static>(
    ws: &Workspace<C>,
    format: OutputFormat,
) -> Result<String, LockinError> {
    let timer = ws.timer(Detached, false);
    let report = StatusReport::new(&timer, ws.activity().today_total());
    format_status(&report, format)
}
