//! One-way notification targets of the session timer.
//!
//! The timer never reads anything back from these; they only observe.

use std::cell::RefCell;
use std::rc::Rc;

use chrono::{DateTime, Utc};

use crate::error::LockinError;

/// Receives sessions closed by `stop()`.
#[cfg_attr(test, mockall::automock)]
pub trait ActivityRecorder {
    /// A session of `duration_seconds` that began at `start_time` has ended.
    ///
    /// # Errors
    ///
    /// Returns an error if the record could not be kept. The timer logs it and
    /// carries on.
    fn on_session_completed(
        &mut self,
        duration_seconds: u64,
        start_time: DateTime<Utc>,
    ) -> Result<(), LockinError>;
}

/// Renders timer state.
#[cfg_attr(test, mockall::automock)]
pub trait PresentationSink {
    /// Called after every mutation and every tick.
    fn on_state_changed(&mut self, running: bool, total_display_seconds: u64);

    /// The session reached the break-reminder threshold.
    fn on_break_reminder(&mut self);

    /// A session started; show the motivational message.
    fn on_motivation_shown(&mut self);

    /// Hide whichever message (motivation or break reminder) is up.
    fn on_motivation_hidden(&mut self);
}

/// Background music hook.
#[cfg_attr(test, mockall::automock)]
pub trait PlaybackControl {
    /// A session started; music should begin.
    fn request_playback_start(&mut self);
}

impl<T: ActivityRecorder + ?Sized> ActivityRecorder for Rc<RefCell<T>> {
    fn on_session_completed(
        &mut self,
        duration_seconds: u64,
        start_time: DateTime<Utc>,
    ) -> Result<(), LockinError> {
        self.borrow_mut()
            .on_session_completed(duration_seconds, start_time)
    }
}

impl<T: PresentationSink + ?Sized> PresentationSink for Rc<RefCell<T>> {
    fn on_state_changed(&mut self, running: bool, total_display_seconds: u64) {
        self.borrow_mut()
            .on_state_changed(running, total_display_seconds);
    }

    fn on_break_reminder(&mut self) {
        self.borrow_mut().on_break_reminder();
    }

    fn on_motivation_shown(&mut self) {
        self.borrow_mut().on_motivation_shown();
    }

    fn on_motivation_hidden(&mut self) {
        self.borrow_mut().on_motivation_hidden();
    }
}

impl<T: PlaybackControl + ?Sized> PlaybackControl for Rc<RefCell<T>> {
    fn request_playback_start(&mut self) {
        self.borrow_mut().request_playback_start();
    }
}

/// Collaborator that ignores everything.
#[derive(Debug, Clone, Copy, Default)]
pub struct Detached;

impl ActivityRecorder for Detached {
    fn on_session_completed(&mut self, _: u64, _: DateTime<Utc>) -> Result<(), LockinError> {
        Ok(())
    }
}

impl PresentationSink for Detached {
    fn on_state_changed(&mut self, _: bool, _: u64) {}
    fn on_break_reminder(&mut self) {}
    fn on_motivation_shown(&mut self) {}
    fn on_motivation_hidden(&mut self) {}
}

impl PlaybackControl for Detached {
    fn request_playback_start(&mut self) {}
}

/// The collaborators a [`SessionTimer`](super::SessionTimer) is built with.
pub struct Collaborators {
    /// Completed-session sink.
    pub recorder: Box<dyn ActivityRecorder>,
    /// Display sink.
    pub sink: Box<dyn PresentationSink>,
    /// Music hook.
    pub playback: Box<dyn PlaybackControl>,
}

impl Collaborators {
    /// Bundle three collaborators.
    pub fn new(
        recorder: impl ActivityRecorder + 'static,
        sink: impl PresentationSink + 'static,
        playback: impl PlaybackControl + 'static,
    ) -> Self {
        Self {
            recorder: Box::new(recorder),
            sink: Box::new(sink),
            playback: Box::new(playback),
        }
    }

    /// Collaborators that observe nothing.
    #[must_use]
    pub fn detached() -> Self {
        Self::new(Detached, Detached, Detached)
    }
}

impl Default for Collaborators {
    fn default() -> Self {
        Self::detached()
    }
}
