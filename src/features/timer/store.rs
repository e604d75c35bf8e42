//! Timer persistence gateway.
//!
//! The timer only ever sees [`TimerStore`]; [`KvTimerStore`] lays the record
//! out as five flat string keys in a [`KeyValueStore`].

use chrono::{DateTime, NaiveDate, Utc};

use crate::core::{format_work_date, from_epoch_millis, parse_work_date, to_epoch_millis};
use crate::error::LockinError;
use crate::storage::KeyValueStore;

/// Key for cumulative seconds today.
pub const KEY_TOTAL_WORK_TIME: &str = "totalWorkTime";
/// Key for seconds in the open session.
pub const KEY_CURRENT_SESSION_TIME: &str = "currentSessionTime";
/// Key for the running flag.
pub const KEY_IS_RUNNING: &str = "isRunning";
/// Key for the session start (epoch milliseconds, or empty).
pub const KEY_SESSION_START_TIME: &str = "sessionStartTime";
/// Key for the day the record belongs to.
pub const KEY_LAST_WORK_DATE: &str = "lastWorkDate";

/// The persisted timer record.
///
/// Fields that were missing or unparsable when loaded hold their zero value;
/// an unreadable date is `None` and makes the record stale.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PersistedTimer {
    /// Cumulative seconds today.
    pub total_work_time: u64,
    /// Seconds in the open session, as of `session_start_time` when running.
    pub current_session_time: u64,
    /// Running flag.
    pub is_running: bool,
    /// Start of the running segment.
    pub session_start_time: Option<DateTime<Utc>>,
    /// Day the record belongs to.
    pub work_date: Option<NaiveDate>,
}

/// Where the timer recovers from and checkpoints to.
pub trait TimerStore {
    /// Load the last saved record.
    ///
    /// Never fails: an unreadable store or a missing record reads as `None`.
    fn load(&self) -> Option<PersistedTimer>;

    /// Save a record.
    ///
    /// # Errors
    ///
    /// Returns an error if the backing store rejects the write.
    fn save(&self, record: &PersistedTimer) -> Result<(), LockinError>;
}

/// [`TimerStore`] over a key/value store.
#[derive(Debug, Clone)]
pub struct KvTimerStore<S> {
    store: S,
}

impl<S: KeyValueStore> KvTimerStore<S> {
    /// Wrap a key/value store.
    pub const fn new(store: S) -> Self {
        Self { store }
    }

    fn read(&self, key: &str) -> Option<String> {
        match self.store.get(key) {
            Ok(value) => value,
            Err(e) => {
                tracing::warn!(key, error = %e, "failed to read timer field");
                None
            },
        }
    }

    fn read_seconds(&self, key: &str) -> u64 {
        self.read(key)
            .and_then(|v| v.trim().parse::<u64>().ok())
            .unwrap_or(0)
    }
}

impl<S: KeyValueStore> TimerStore for KvTimerStore<S> {
    fn load(&self) -> Option<PersistedTimer> {
        // No total means nothing was ever saved
        let total = self.read(KEY_TOTAL_WORK_TIME)?;

        let total_work_time = total.trim().parse::<u64>().unwrap_or_else(|_| {
            tracing::debug!(value = %total, "corrupt totalWorkTime, using 0");
            0
        });

        let session_start_time = self
            .read(KEY_SESSION_START_TIME)
            .and_then(|v| v.trim().parse::<i64>().ok())
            .and_then(from_epoch_millis);

        Some(PersistedTimer {
            total_work_time,
            current_session_time: self.read_seconds(KEY_CURRENT_SESSION_TIME),
            is_running: self.read(KEY_IS_RUNNING).as_deref() == Some("true"),
            session_start_time,
            work_date: self.read(KEY_LAST_WORK_DATE).and_then(|v| parse_work_date(&v)),
        })
    }

    fn save(&self, record: &PersistedTimer) -> Result<(), LockinError> {
        let start = record
            .session_start_time
            .map(|t| to_epoch_millis(t).to_string())
            .unwrap_or_default();
        let date = record.work_date.map(format_work_date).unwrap_or_default();

        self.store
            .set(KEY_TOTAL_WORK_TIME, &record.total_work_time.to_string())?;
        self.store
            .set(KEY_CURRENT_SESSION_TIME, &record.current_session_time.to_string())?;
        self.store
            .set(KEY_IS_RUNNING, if record.is_running { "true" } else { "false" })?;
        self.store.set(KEY_SESSION_START_TIME, &start)?;
        self.store.set(KEY_LAST_WORK_DATE, &date)?;
        Ok(())
    }
}
