//! JSON output formatting for lockin.

use serde::Serialize;
use serde_json::json;

use crate::error::LockinError;
use crate::features::activity::ActivitySession;
use crate::features::music::MusicPreferences;

/// Format the activity log as JSON
///
/// # Errors
///
/// Returns `LockinError::Parse` if JSON serialization fails.
pub fn format_sessions_json(
    sessions: &[ActivitySession],
    today_total: u64,
) -> Result<String, LockinError> {
    let output = json!({
        "today_total": today_total,
        "count": sessions.len(),
        "items": sessions
    });
    Ok(serde_json::to_string_pretty(&output)?)
}

/// Format music preferences as JSON, with the resolved video id
///
/// # Errors
///
/// Returns `LockinError::Parse` if JSON serialization fails.
pub fn format_music_json(prefs: &MusicPreferences) -> Result<String, LockinError> {
    let output = json!({
        "music_type": prefs.music_type,
        "video_id": prefs.music_type.video_id(),
        "volume": prefs.volume,
        "muted": prefs.muted,
        "last_volume": prefs.last_volume
    });
    Ok(serde_json::to_string_pretty(&output)?)
}

/// Generic JSON formatter for any serializable type
///
/// # Errors
///
/// Returns `LockinError::Parse` if JSON serialization fails.
pub fn to_json<T: Serialize>(value: &T) -> Result<String, LockinError> {
    Ok(serde_json::to_string_pretty(value)?)
}
