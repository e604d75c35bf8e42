//! Activity log commands.

use colored::Colorize;
use serde_json::json;

use crate::cli::args::{LogArgs, LogCommands, OutputFormat};
use crate::core::Clock;
use crate::error::LockinError;
use crate::output::{format_sessions, to_json};

use super::Workspace;

/// Show or clear the activity log.
///
/// # Errors
///
/// Returns an error if clearing is not confirmed, the log cannot be saved,
/// or output formatting fails.
pub fn log<C: Clock + Clone + 'static>(
    ws: &Workspace<C>,
    args: LogArgs,
    format: OutputFormat,
) -> Result<String, LockinError> {
    match args.command {
        Some(LogCommands::Clear { force }) => clear(ws, force, format),
        None => {
            let activity = ws.activity();
            format_sessions(activity.recent(args.limit), activity.today_total(), format)
        },
    }
}

fn clear<C: Clock + Clone + 'static>(
    ws: &Workspace<C>,
    force: bool,
    format: OutputFormat,
) -> Result<String, LockinError> {
    if !force {
        return Err(LockinError::InvalidInput(
            "This will delete all session history.\nUse --force to confirm.".to_string(),
        ));
    }

    let removed = ws.activity_mut().clear()?;

    match format {
        OutputFormat::Json => to_json(&json!({ "cleared": removed })),
        OutputFormat::Pretty => Ok(format!("Cleared {removed} sessions").green().to_string()),
    }
}

#[cfg(test)]
mod tests {
    use chrono::Duration;

    use super::*;
    use crate::cli::commands::testing::workspace;
    use crate::cli::commands::timer_action;
    use crate::output::TimerAction;

    fn args(command: Option<LogCommands>, limit: usize) -> LogArgs {
        LogArgs { command, limit }
    }

    fn work(ws: &Workspace<crate::core::ManualClock>, clock: &crate::core::ManualClock, secs: i64) {
        timer_action(ws, TimerAction::Start, OutputFormat::Json).unwrap();
        clock.advance(Duration::seconds(secs));
        timer_action(ws, TimerAction::Stop, OutputFormat::Json).unwrap();
    }

    #[test]
    fn test_log_lists_recent_sessions() {
        let (ws, clock) = workspace();
        work(&ws, &clock, 60);
        work(&ws, &clock, 120);
        work(&ws, &clock, 180);

        let output = log(&ws, args(None, 2), OutputFormat::Json).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&output).unwrap();

        assert_eq!(parsed["count"], 2);
        assert_eq!(parsed["today_total"], 360);
        assert_eq!(parsed["items"][0]["duration"], 180);
    }

    #[test]
    fn test_clear_requires_force() {
        let (ws, clock) = workspace();
        work(&ws, &clock, 60);

        let err = log(&ws, args(Some(LogCommands::Clear { force: false }), 10), OutputFormat::Json)
            .unwrap_err();
        assert!(matches!(err, LockinError::InvalidInput(_)));
        assert_eq!(ws.activity().len(), 1);
    }

    #[test]
    fn test_clear_with_force() {
        let (ws, clock) = workspace();
        work(&ws, &clock, 60);
        work(&ws, &clock, 60);

        let output =
            log(&ws, args(Some(LogCommands::Clear { force: true }), 10), OutputFormat::Json).unwrap();
        assert!(output.contains("\"cleared\": 2"));
        assert!(ws.activity().is_empty());
    }
}
