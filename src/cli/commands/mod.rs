//! Command implementations for lockin.
//!
//! Every invocation recovers the persisted timer, applies one command, saves
//! and exits. A running session keeps accruing time between invocations
//! because recovery credits the time spent away.

mod completions;
mod log;
mod music;
mod timer;

use std::cell::{Ref, RefCell, RefMut};
use std::rc::Rc;

pub use completions::completions;
pub use log::log;
pub use music::music;
pub use timer::{status, timer_action};

use crate::config::{Config, Paths};
use crate::core::{Clock, SystemClock};
use crate::error::LockinError;
use crate::features::activity::ActivityLog;
use crate::features::music::{LogPlayer, MusicController};
use crate::features::timer::{
    Collaborators, Detached, KvTimerStore, PresentationSink, SessionTimer,
};
use crate::storage::Database;

/// Shared handle to the key/value database.
pub type Store = Rc<Database>;

/// Activity log over the database.
pub type SharedActivityLog = Rc<RefCell<ActivityLog<Store>>>;

/// Music controller over the database.
pub type SharedMusic = Rc<RefCell<MusicController<Store, LogPlayer>>>;

/// Everything a command needs: configuration, storage and the components
/// that observe the timer.
pub struct Workspace<C> {
    config: Config,
    clock: C,
    store: Store,
    activity: SharedActivityLog,
    music: SharedMusic,
}

impl Workspace<SystemClock> {
    /// Open the database under `paths` with the system clock.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be opened or migrated.
    pub fn open(paths: &Paths, config: Config) -> Result<Self, LockinError> {
        let db = Database::open(paths)?;
        Ok(Self::with_database(db, config, SystemClock))
    }
}

impl<C: Clock + Clone + 'static> Workspace<C> {
    /// Build a workspace over an already opened database.
    pub fn with_database(db: Database, config: Config, clock: C) -> Self {
        let store = Rc::new(db);
        let activity = ActivityLog::load(Rc::clone(&store), clock.clone());
        let music = MusicController::load(Rc::clone(&store), LogPlayer, config.music.default_type)
            .with_play_on_start(config.music.play_on_start);

        Self {
            config,
            clock,
            store,
            activity: Rc::new(RefCell::new(activity)),
            music: Rc::new(RefCell::new(music)),
        }
    }

    /// Recover the timer.
    ///
    /// Completed sessions go to the activity log. Music is only wired in when
    /// `with_music` is set, so read-only commands don't restart playback.
    pub fn timer(&self, sink: impl PresentationSink + 'static, with_music: bool) -> SessionTimer {
        let recorder = Rc::clone(&self.activity);
        let collaborators = if with_music {
            Collaborators::new(recorder, sink, Rc::clone(&self.music))
        } else {
            Collaborators::new(recorder, sink, Detached)
        };

        SessionTimer::load(
            self.config.timer,
            self.clock.clone(),
            KvTimerStore::new(Rc::clone(&self.store)),
            collaborators,
        )
    }

    /// Loaded configuration.
    #[must_use]
    pub const fn config(&self) -> &Config {
        &self.config
    }

    /// The activity log.
    ///
    /// # Panics
    ///
    /// Panics if called while a timer operation is recording a session.
    #[must_use]
    pub fn activity(&self) -> Ref<'_, ActivityLog<Store>> {
        self.activity.borrow()
    }

    /// The activity log, mutably.
    #[must_use]
    pub fn activity_mut(&self) -> RefMut<'_, ActivityLog<Store>> {
        self.activity.borrow_mut()
    }

    /// The music controller, mutably.
    #[must_use]
    pub fn music_mut(&self) -> RefMut<'_, MusicController<Store, LogPlayer>> {
        self.music.borrow_mut()
    }
}
