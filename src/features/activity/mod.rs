//! Activity log of completed work sessions.

pub mod log;

pub use log::{ActivityLog, ActivitySession, DEFAULT_RECENT_LIMIT, KEY_ACTIVITY_SESSIONS};
