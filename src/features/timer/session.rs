//! The work-session timer.
//!
//! Tracks today's cumulative work time plus the open session, drives its own
//! timers through a [`Scheduler`], and checkpoints to a [`TimerStore`] so a
//! reload can pick up where the last process left off.

use std::time::Duration;

use chrono::{DateTime, Utc};
use tracing::{debug, info, warn};

use super::collaborators::Collaborators;
use super::format::format_hms;
use super::scheduler::{Scheduler, TimerEvent, TimerHandle};
use super::state::{CompletedSession, SessionTimerState, TimerPhase, WorkStats};
use super::store::{PersistedTimer, TimerStore};
use crate::config::TimerConfig;
use crate::core::{elapsed_whole_seconds, Clock};

/// Period of the session clock.
const TICK: Duration = Duration::from_secs(1);

/// Handles of the timers that live only while a session runs.
#[derive(Debug, Default)]
struct ActiveTimers {
    tick: Option<TimerHandle>,
    persist: Option<TimerHandle>,
    motivation: Option<TimerHandle>,
    reminder: Option<TimerHandle>,
}

/// Work-session stopwatch with persistence and recovery.
///
/// Two phases, `Idle` and `Running`. Operations that make no sense in the
/// current phase are ignored rather than reported.
pub struct SessionTimer {
    state: SessionTimerState,
    /// `current_session_time` at the moment `session_start_time` was set.
    carried_seconds: u64,
    break_reminder_fired: bool,
    /// Bumped on every transition into `Running`; ticks from older
    /// generations are dropped.
    generation: u64,
    config: TimerConfig,
    clock: Box<dyn Clock>,
    store: Box<dyn TimerStore>,
    collaborators: Collaborators,
    scheduler: Scheduler,
    timers: ActiveTimers,
}

impl SessionTimer {
    /// Build a timer and recover persisted state.
    ///
    /// A record from today is restored; if it was running, the time spent
    /// away is credited and the session resumes. A record from any other day
    /// (or no record at all) yields a zeroed, idle timer; a session it left
    /// running is recorded as ending at the close of its day.
    pub fn load(
        config: TimerConfig,
        clock: impl Clock + 'static,
        store: impl TimerStore + 'static,
        collaborators: Collaborators,
    ) -> Self {
        let today = clock.today();
        let mut timer = Self {
            state: SessionTimerState::idle(today),
            carried_seconds: 0,
            break_reminder_fired: false,
            generation: 0,
            config,
            clock: Box::new(clock),
            store: Box::new(store),
            collaborators,
            scheduler: Scheduler::new(),
            timers: ActiveTimers::default(),
        };
        timer.recover();
        timer
    }

    fn recover(&mut self) {
        let today = self.state.work_date;

        let Some(record) = self.store.load() else {
            debug!("no persisted timer state, starting fresh");
            self.notify_state();
            return;
        };

        if record.work_date != Some(today) {
            info!(stored = ?record.work_date, %today, "persisted timer state is stale, starting a new day");
            self.close_stale_session(&record);
            self.persist();
            self.notify_state();
            return;
        }

        self.state.total_work_time = record.total_work_time;
        self.state.current_session_time = record.current_session_time;

        if record.is_running {
            let now = self.clock.now();
            let away = record
                .session_start_time
                .map_or(0, |start| elapsed_whole_seconds(start, now));
            self.state.current_session_time = self.state.current_session_time.saturating_add(away);
            debug!(
                away,
                current = self.state.current_session_time,
                "resuming running session"
            );
            self.enter_running(now);
            self.persist();
        } else if self.state.current_session_time > 0 {
            // An idle record with an open counter was already folded into
            // the total when it was paused.
            debug!(
                current = self.state.current_session_time,
                "dropping folded session time from idle record"
            );
            self.state.current_session_time = 0;
        }

        self.notify_state();
    }

    /// Start a session. Ignored while running.
    ///
    /// Returns whether a session was started.
    pub fn start(&mut self) -> bool {
        self.roll_over_if_new_day();

        if self.state.is_running {
            debug!("start ignored: already running");
            return false;
        }

        let now = self.clock.now();
        self.enter_running(now);
        info!(total = self.state.total_work_time, "work session started");

        self.persist();
        self.notify_state();
        true
    }

    /// Pause the running session. Ignored while idle.
    ///
    /// The elapsed segment is folded into the total and the session counter
    /// goes back to zero, so a later `start()` counts only new time. Pausing
    /// does not produce an activity record.
    pub fn pause(&mut self) -> bool {
        self.roll_over_if_new_day();

        if !self.state.is_running {
            debug!("pause ignored: not running");
            return false;
        }

        let notice_was_up = self.cancel_timers();
        let segment = std::mem::take(&mut self.state.current_session_time);
        self.state.is_running = false;
        self.state.total_work_time = self.state.total_work_time.saturating_add(segment);
        self.state.session_start_time = None;
        self.carried_seconds = 0;

        if notice_was_up {
            self.collaborators.sink.on_motivation_hidden();
        }
        info!(segment, total = self.state.total_work_time, "work session paused");

        self.persist();
        self.notify_state();
        true
    }

    /// Close the session.
    ///
    /// Folds the open session into the total and, when it is non-empty, hands
    /// it to the activity recorder. Calling it again right away is a no-op
    /// that returns `None`.
    pub fn stop(&mut self) -> Option<CompletedSession> {
        self.roll_over_if_new_day();

        let now = self.clock.now();
        let completed = self.close_session(now);

        if completed.is_some() {
            info!(total = self.state.total_work_time, "work session stopped");
        } else {
            debug!("stop with no open session");
        }

        self.persist();
        self.notify_state();
        completed
    }

    /// Zero everything.
    ///
    /// A running session is stopped (and recorded) first.
    pub fn reset(&mut self) -> Option<CompletedSession> {
        self.roll_over_if_new_day();

        let completed = if self.state.is_running {
            self.stop()
        } else {
            None
        };

        if self.cancel_timers() {
            self.collaborators.sink.on_motivation_hidden();
        }
        self.state = SessionTimerState::idle(self.state.work_date);
        self.carried_seconds = 0;
        info!("timer reset");

        self.persist();
        self.notify_state();
        completed
    }

    /// Pause when running, start otherwise. Returns the new running flag.
    pub fn toggle(&mut self) -> bool {
        if self.state.is_running {
            self.pause();
        } else {
            self.start();
        }
        self.state.is_running
    }

    /// Let `by` of time pass, firing every timer that falls due.
    pub fn advance(&mut self, by: Duration) {
        let until = self.scheduler.now() + by;
        self.roll_over_if_new_day();

        while let Some((_, event)) = self.scheduler.pop_due(until) {
            self.handle(event);
        }
    }

    fn handle(&mut self, event: TimerEvent) {
        match event {
            TimerEvent::Tick { generation } => self.on_tick(generation),
            TimerEvent::Persist => {
                if self.state.is_running {
                    debug!(current = self.state.current_session_time, "checkpoint");
                    self.persist();
                }
            },
            TimerEvent::MotivationExpired => {
                self.timers.motivation = None;
                self.collaborators.sink.on_motivation_hidden();
            },
            TimerEvent::BreakReminderExpired => {
                self.timers.reminder = None;
                self.collaborators.sink.on_motivation_hidden();
            },
        }
    }

    fn on_tick(&mut self, generation: u64) {
        if !self.state.is_running || generation != self.generation {
            debug!(generation, current = self.generation, "stale tick ignored");
            return;
        }
        if self.roll_over_if_new_day() {
            return;
        }

        self.state.current_session_time += 1;

        if !self.break_reminder_fired
            && self.state.current_session_time == self.config.break_reminder_secs
        {
            self.break_reminder_fired = true;
            info!(
                session = self.state.current_session_time,
                "break reminder"
            );
            self.collaborators.sink.on_break_reminder();
            if let Some(old) = self.timers.reminder.take() {
                self.scheduler.cancel(old);
            }
            self.timers.reminder = Some(self.scheduler.schedule_once(
                self.config.reminder_dismiss(),
                TimerEvent::BreakReminderExpired,
            ));
        }

        self.notify_state();
    }

    /// Enter `Running` with the session clock anchored at `now`.
    fn enter_running(&mut self, now: DateTime<Utc>) {
        self.state.is_running = true;
        self.state.session_start_time = Some(now);
        self.carried_seconds = self.state.current_session_time;
        self.break_reminder_fired = false;
        self.generation += 1;

        let generation = self.generation;
        self.timers.tick = Some(
            self.scheduler
                .schedule_repeating(TICK, TimerEvent::Tick { generation }),
        );
        self.timers.persist = Some(
            self.scheduler
                .schedule_repeating(self.config.persist_interval(), TimerEvent::Persist),
        );
        if let Some(old) = self.timers.motivation.take() {
            self.scheduler.cancel(old);
        }
        self.timers.motivation = Some(self.scheduler.schedule_once(
            self.config.motivation_notice(),
            TimerEvent::MotivationExpired,
        ));

        self.collaborators.sink.on_motivation_shown();
        self.collaborators.playback.request_playback_start();
    }

    /// Stop all session timers. Returns whether a message was still up.
    fn cancel_timers(&mut self) -> bool {
        if let Some(tick) = self.timers.tick.take() {
            self.scheduler.cancel(tick);
        }
        if let Some(persist) = self.timers.persist.take() {
            self.scheduler.cancel(persist);
        }

        let mut notice_was_up = false;
        if let Some(motivation) = self.timers.motivation.take() {
            notice_was_up |= self.scheduler.cancel(motivation);
        }
        if let Some(reminder) = self.timers.reminder.take() {
            notice_was_up |= self.scheduler.cancel(reminder);
        }
        notice_was_up
    }

    /// Fold the open session into the total and go idle.
    fn close_session(&mut self, now: DateTime<Utc>) -> Option<CompletedSession> {
        let notice_was_up = self.cancel_timers();

        let duration = std::mem::take(&mut self.state.current_session_time);
        let started_at = self.session_origin(now, duration);

        self.state.is_running = false;
        self.state.total_work_time = self.state.total_work_time.saturating_add(duration);
        self.state.session_start_time = None;
        self.carried_seconds = 0;

        let completed = (duration > 0).then(|| CompletedSession {
            duration_seconds: duration,
            started_at,
            ended_at: now,
        });

        if let Some(session) = completed {
            self.record(session);
        }
        if notice_was_up {
            self.collaborators.sink.on_motivation_hidden();
        }

        completed
    }

    fn record(&mut self, session: CompletedSession) {
        if let Err(e) = self
            .collaborators
            .recorder
            .on_session_completed(session.duration_seconds, session.started_at)
        {
            warn!(error = %e, "failed to record completed session");
        }
    }

    /// Record a session a stale persisted record left running.
    ///
    /// The session is taken to have ended when its day did (or now, if that
    /// is earlier). Without a start instant there is nothing to date it by
    /// and it is dropped.
    fn close_stale_session(&mut self, record: &PersistedTimer) {
        let (true, Some(start), Some(day)) =
            (record.is_running, record.session_start_time, record.work_date)
        else {
            return;
        };

        let now = self.clock.now();
        let ended_at = day
            .succ_opt()
            .and_then(|next| self.clock.start_of_day(next))
            .map_or(now, |midnight| midnight.min(now));
        let duration = record
            .current_session_time
            .saturating_add(elapsed_whole_seconds(start, ended_at));
        if duration == 0 {
            return;
        }

        let started_at = start
            .checked_sub_signed(seconds(record.current_session_time))
            .unwrap_or(start);
        info!(duration, %day, "recording session left running on an earlier day");
        self.record(CompletedSession {
            duration_seconds: duration,
            started_at,
            ended_at,
        });
    }

    /// When the open session really began.
    ///
    /// After a reload the start instant is re-anchored to the reload, so the
    /// seconds carried over from before it are subtracted back out.
    fn session_origin(&self, now: DateTime<Utc>, duration: u64) -> DateTime<Utc> {
        let (anchor, offset) = match self.state.session_start_time {
            Some(start) => (start, self.carried_seconds),
            None => (now, duration),
        };
        anchor
            .checked_sub_signed(seconds(offset))
            .unwrap_or(anchor)
    }

    /// Reset to a zeroed idle state if the calendar day has changed.
    ///
    /// An open session is recorded, with the ticks counted so far, before it
    /// is discarded. Returns whether a rollover happened.
    fn roll_over_if_new_day(&mut self) -> bool {
        let today = self.clock.today();
        if self.state.work_date == today {
            return false;
        }

        info!(from = %self.state.work_date, to = %today, "new work day, resetting timer");
        let now = self.clock.now();
        self.close_session(now);
        self.state = SessionTimerState::idle(today);
        self.carried_seconds = 0;

        self.persist();
        self.notify_state();
        true
    }

    /// Record to persist right now.
    ///
    /// While running, the session counter is stored as of the start instant
    /// so that a reload adding `now - start` lands on the live value instead
    /// of counting the ticked seconds twice.
    #[must_use]
    pub fn snapshot(&self) -> PersistedTimer {
        let current_session_time = match (self.state.is_running, self.state.session_start_time) {
            (true, Some(start)) => self
                .state
                .current_session_time
                .saturating_sub(elapsed_whole_seconds(start, self.clock.now())),
            _ => self.state.current_session_time,
        };

        PersistedTimer {
            total_work_time: self.state.total_work_time,
            current_session_time,
            is_running: self.state.is_running,
            session_start_time: self.state.session_start_time,
            work_date: Some(self.state.work_date),
        }
    }

    fn persist(&mut self) {
        let record = self.snapshot();
        if let Err(e) = self.store.save(&record) {
            warn!(error = %e, "failed to persist timer state, keeping in-memory state");
        }
    }

    fn notify_state(&mut self) {
        let running = self.state.is_running;
        let display = self.state.display_seconds();
        self.collaborators.sink.on_state_changed(running, display);
    }

    /// Current state.
    #[must_use]
    pub const fn state(&self) -> &SessionTimerState {
        &self.state
    }

    /// Current phase.
    #[must_use]
    pub const fn phase(&self) -> TimerPhase {
        self.state.phase()
    }

    /// Whether a session is running.
    #[must_use]
    pub const fn is_running(&self) -> bool {
        self.state.is_running
    }

    /// Seconds completed in earlier sessions today.
    #[must_use]
    pub const fn total_work_time(&self) -> u64 {
        self.state.total_work_time
    }

    /// Seconds in the open session.
    #[must_use]
    pub const fn current_session_time(&self) -> u64 {
        self.state.current_session_time
    }

    /// Total shown on the timer.
    #[must_use]
    pub const fn display_seconds(&self) -> u64 {
        self.state.display_seconds()
    }

    /// Total shown on the timer as `HH:MM:SS`.
    #[must_use]
    pub fn display_time(&self) -> String {
        format_hms(self.display_seconds())
    }

    /// Today's work summary.
    #[must_use]
    pub const fn work_stats(&self) -> WorkStats {
        self.state.work_stats()
    }

    /// When the open session began, if one is running.
    #[must_use]
    pub fn session_started_at(&self) -> Option<DateTime<Utc>> {
        self.state
            .session_start_time
            .map(|_| self.session_origin(self.clock.now(), self.state.current_session_time))
    }

    /// Settings in effect.
    #[must_use]
    pub const fn config(&self) -> &TimerConfig {
        &self.config
    }
}

impl std::fmt::Debug for SessionTimer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionTimer")
            .field("state", &self.state)
            .field("generation", &self.generation)
            .field("pending_timers", &self.scheduler.pending())
            .finish_non_exhaustive()
    }
}

fn seconds(secs: u64) -> chrono::Duration {
    i64::try_from(secs)
        .ok()
        .and_then(chrono::Duration::try_seconds)
        .unwrap_or_else(chrono::Duration::zero)
}
