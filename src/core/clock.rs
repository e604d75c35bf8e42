//! Wall-clock access.
//!
//! Everything that needs "now" or "today" goes through [`Clock`] so that day
//! rollover and resume-after-reload can be tested without waiting.

use std::sync::{Arc, Mutex, PoisonError};

use chrono::{DateTime, Duration, FixedOffset, Local, NaiveDate, Offset, TimeZone, Utc};

/// Source of the current instant and the current calendar day.
pub trait Clock {
    /// Current instant.
    fn now(&self) -> DateTime<Utc>;

    /// Calendar day of `instant` in the user's time zone.
    fn day_of(&self, instant: DateTime<Utc>) -> NaiveDate {
        instant.with_timezone(&Local).date_naive()
    }

    /// First instant of `day` in the user's time zone.
    fn start_of_day(&self, day: NaiveDate) -> Option<DateTime<Utc>> {
        let midnight = day.and_hms_opt(0, 0, 0)?;
        Local
            .from_local_datetime(&midnight)
            .earliest()
            .map(|t| t.with_timezone(&Utc))
    }

    /// Current calendar day.
    fn today(&self) -> NaiveDate {
        self.day_of(self.now())
    }
}

/// The real clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// A clock that only moves when told to.
///
/// Clones share the same instant, so a test can keep one handle while the
/// timer owns another. Calendar days are computed in a fixed offset (UTC
/// unless specified) to keep tests independent of the host time zone.
#[derive(Debug, Clone)]
pub struct ManualClock {
    now: Arc<Mutex<DateTime<Utc>>>,
    offset: FixedOffset,
}

impl ManualClock {
    /// Create a clock frozen at `now`, with days computed in UTC.
    #[must_use]
    pub fn new(now: DateTime<Utc>) -> Self {
        Self {
            now: Arc::new(Mutex::new(now)),
            offset: Utc.fix(),
        }
    }

    /// Compute calendar days in the given offset.
    #[must_use]
    pub fn with_offset(mut self, offset: FixedOffset) -> Self {
        self.offset = offset;
        self
    }

    /// Jump to a specific instant.
    pub fn set(&self, now: DateTime<Utc>) {
        *self.now.lock().unwrap_or_else(PoisonError::into_inner) = now;
    }

    /// Move forward by `by`.
    pub fn advance(&self, by: Duration) {
        let mut now = self.now.lock().unwrap_or_else(PoisonError::into_inner);
        *now += by;
    }
}

impl Clock for ManualClock {
    fn now(&self) -> DateTime<Utc> {
        *self.now.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn day_of(&self, instant: DateTime<Utc>) -> NaiveDate {
        instant.with_timezone(&self.offset).date_naive()
    }

    fn start_of_day(&self, day: NaiveDate) -> Option<DateTime<Utc>> {
        let midnight = day.and_hms_opt(0, 0, 0)?;
        self.offset
            .from_local_datetime(&midnight)
            .single()
            .map(|t| t.with_timezone(&Utc))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn noon() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 15, 12, 0, 0).unwrap()
    }

    #[test]
    fn test_manual_clock_shared_between_clones() {
        let clock = ManualClock::new(noon());
        let other = clock.clone();

        clock.advance(Duration::seconds(90));
        assert_eq!(other.now(), noon() + Duration::seconds(90));
    }

    #[test]
    fn test_manual_clock_today_rolls_over_at_midnight() {
        let clock = ManualClock::new(Utc.with_ymd_and_hms(2024, 3, 15, 23, 59, 59).unwrap());
        assert_eq!(clock.today(), NaiveDate::from_ymd_opt(2024, 3, 15).unwrap());

        clock.advance(Duration::seconds(1));
        assert_eq!(clock.today(), NaiveDate::from_ymd_opt(2024, 3, 16).unwrap());
    }

    #[test]
    fn test_manual_clock_offset() {
        let clock = ManualClock::new(Utc.with_ymd_and_hms(2024, 3, 15, 22, 0, 0).unwrap())
            .with_offset(FixedOffset::east_opt(3 * 3600).unwrap());
        assert_eq!(clock.today(), NaiveDate::from_ymd_opt(2024, 3, 16).unwrap());
    }

    #[test]
    fn test_manual_clock_start_of_day_in_offset() {
        let clock = ManualClock::new(noon()).with_offset(FixedOffset::east_opt(3 * 3600).unwrap());
        let day = NaiveDate::from_ymd_opt(2024, 3, 16).unwrap();

        let midnight = clock.start_of_day(day).unwrap();
        assert_eq!(midnight, Utc.with_ymd_and_hms(2024, 3, 15, 21, 0, 0).unwrap());
        assert_eq!(clock.day_of(midnight), day);
        assert_eq!(clock.day_of(midnight - Duration::seconds(1)), day.pred_opt().unwrap());
    }

    #[test]
    fn test_system_clock_is_close_to_now() {
        let delta = Utc::now() - SystemClock.now();
        assert!(delta.num_seconds().abs() < 5);
    }
}
