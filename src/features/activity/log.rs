//! Session history.
//!
//! Completed sessions are kept newest-first as a JSON array under a single
//! key of the shared key/value store.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::core::{to_epoch_millis, Clock};
use crate::error::LockinError;
use crate::features::timer::{format_compact, ActivityRecorder};
use crate::storage::KeyValueStore;

/// Key holding the JSON session list.
pub const KEY_ACTIVITY_SESSIONS: &str = "activitySessions";

/// Number of sessions shown by default.
pub const DEFAULT_RECENT_LIMIT: usize = 10;

/// A completed work session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActivitySession {
    /// Epoch milliseconds at which the session was recorded. Unique within a log.
    pub id: i64,
    /// Length in seconds.
    #[serde(rename = "duration")]
    pub duration_seconds: u64,
    /// When the session started.
    pub start_time: DateTime<Utc>,
    /// When the session was recorded.
    pub end_time: DateTime<Utc>,
    /// Day the session started on, which is the day it counts towards.
    pub date: NaiveDate,
}

impl ActivitySession {
    /// Duration as `MM:SS`, or `HH:MM:SS` from an hour up.
    #[must_use]
    pub fn formatted_duration(&self) -> String {
        format_compact(self.duration_seconds)
    }
}

/// Persistent list of completed sessions.
pub struct ActivityLog<S> {
    store: S,
    clock: Box<dyn Clock>,
    sessions: Vec<ActivitySession>,
}

impl<S: KeyValueStore> ActivityLog<S> {
    /// Load the log from `store`.
    ///
    /// An unreadable or corrupt blob yields an empty log; it is overwritten by
    /// the next save.
    pub fn load(store: S, clock: impl Clock + 'static) -> Self {
        let sessions = match store.get(KEY_ACTIVITY_SESSIONS) {
            Ok(Some(raw)) => serde_json::from_str(&raw).unwrap_or_else(|e| {
                warn!(error = %e, "corrupt activity log, starting empty");
                Vec::new()
            }),
            Ok(None) => Vec::new(),
            Err(e) => {
                warn!(error = %e, "failed to read activity log, starting empty");
                Vec::new()
            },
        };

        Self {
            store,
            clock: Box::new(clock),
            sessions,
        }
    }

    /// Record a session that just ended.
    ///
    /// The session is filed under the day it started, even when it ended
    /// after midnight.
    ///
    /// # Errors
    ///
    /// Returns an error if the log cannot be saved. The session is kept in
    /// memory either way.
    pub fn add_session(
        &mut self,
        duration_seconds: u64,
        start_time: DateTime<Utc>,
    ) -> Result<&ActivitySession, LockinError> {
        let now = self.clock.now();
        let mut id = to_epoch_millis(now);
        if let Some(newest) = self.sessions.first() {
            id = id.max(newest.id + 1);
        }

        self.sessions.insert(
            0,
            ActivitySession {
                id,
                duration_seconds,
                start_time,
                end_time: now,
                date: self.clock.day_of(start_time),
            },
        );
        debug!(id, duration_seconds, "session logged");

        self.save()?;
        Ok(&self.sessions[0])
    }

    /// Seconds logged on `day`.
    #[must_use]
    pub fn total_on(&self, day: NaiveDate) -> u64 {
        self.sessions
            .iter()
            .filter(|s| s.date == day)
            .map(|s| s.duration_seconds)
            .sum()
    }

    /// Seconds logged today.
    #[must_use]
    pub fn today_total(&self) -> u64 {
        self.total_on(self.clock.today())
    }

    /// Up to `limit` most recent sessions, newest first.
    #[must_use]
    pub fn recent(&self, limit: usize) -> &[ActivitySession] {
        &self.sessions[..limit.min(self.sessions.len())]
    }

    /// Every session, newest first.
    #[must_use]
    pub fn sessions(&self) -> &[ActivitySession] {
        &self.sessions
    }

    /// Number of logged sessions.
    #[must_use]
    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    /// Whether nothing has been logged.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }

    /// Drop the whole history.
    ///
    /// # Errors
    ///
    /// Returns an error if the empty log cannot be saved.
    pub fn clear(&mut self) -> Result<usize, LockinError> {
        let removed = self.sessions.len();
        self.sessions.clear();
        self.save()?;
        Ok(removed)
    }

    fn save(&self) -> Result<(), LockinError> {
        let raw = serde_json::to_string(&self.sessions)?;
        self.store.set(KEY_ACTIVITY_SESSIONS, &raw)
    }
}

impl<S: KeyValueStore> ActivityRecorder for ActivityLog<S> {
    fn on_session_completed(
        &mut self,
        duration_seconds: u64,
        start_time: DateTime<Utc>,
    ) -> Result<(), LockinError> {
        self.add_session(duration_seconds, start_time).map(|_| ())
    }
}
