//! Work-session timer.
//!
//! - Start/pause/stop/reset of today's work session
//! - One-second session clock with break reminders
//! - Checkpointing and recovery across restarts
//! - Day rollover

pub mod collaborators;
pub mod format;
pub mod scheduler;
pub mod session;
pub mod state;
pub mod store;

pub use collaborators::{
    ActivityRecorder, Collaborators, Detached, PlaybackControl, PresentationSink,
};
pub use format::{format_compact, format_hms, format_human};
pub use scheduler::{Scheduler, TimerEvent, TimerHandle};
pub use session::SessionTimer;
pub use state::{CompletedSession, SessionTimerState, TimerPhase, WorkStats};
pub use store::{KvTimerStore, PersistedTimer, TimerStore};
